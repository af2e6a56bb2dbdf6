/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use std::path::PathBuf;
use capsync::file_utils::FileManager;
use crate::common;

/// Test file and directory existence checks
#[test]
fn test_existence_checks_withTempEntries_shouldDistinguishKinds() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir_path = temp_dir.path().to_path_buf();
    let file_path = common::create_test_file(&dir_path, "script.txt", "こんにちは。")?;

    assert!(FileManager::file_exists(&file_path));
    assert!(!FileManager::file_exists(&dir_path));
    assert!(FileManager::dir_exists(&dir_path));
    assert!(!FileManager::dir_exists(&file_path));
    assert!(!FileManager::file_exists(dir_path.join("missing.txt")));
    Ok(())
}

/// Test directory creation including parents
#[test]
fn test_ensure_dir_withNestedPath_shouldCreateAll() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let nested = temp_dir.path().join("a").join("b").join("c");

    FileManager::ensure_dir(&nested)?;

    assert!(FileManager::dir_exists(&nested));
    Ok(())
}

/// Test derived-artifact path naming
#[test]
fn test_generate_output_path_withSuffix_shouldInsertSuffix() {
    let path = FileManager::generate_output_path(
        PathBuf::from("/in/script.txt"),
        PathBuf::from("/out"),
        "clip01",
        "txt",
    );

    assert_eq!(path, PathBuf::from("/out/script.clip01.txt"));
}

/// Test artifact naming without a suffix
#[test]
fn test_generate_output_path_withoutSuffix_shouldOnlySwapExtension() {
    let path = FileManager::generate_output_path(
        PathBuf::from("/in/script.txt"),
        PathBuf::from("/out"),
        "",
        "srt",
    );

    assert_eq!(path, PathBuf::from("/out/script.srt"));
}

/// Test writing creating parent directories and round-tripping content
#[test]
fn test_write_and_read_withNestedTarget_shouldRoundTrip() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let target = temp_dir.path().join("deep").join("out.txt");

    FileManager::write_to_file(&target, "ありがとう。")?;

    assert_eq!(FileManager::read_to_string(&target)?, "ありがとう。");
    Ok(())
}

/// Test recursive discovery of script files by extension
#[test]
fn test_find_files_withMixedTree_shouldFindOnlyMatchingExtension() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path().to_path_buf();
    let sub = root.join("sub");
    FileManager::ensure_dir(&sub)?;

    common::create_test_file(&root, "one.txt", "a")?;
    common::create_test_file(&sub, "two.txt", "b")?;
    common::create_test_file(&root, "other.srt", "c")?;

    let mut found = FileManager::find_files(&root, "txt")?;
    found.sort();

    assert_eq!(found.len(), 2);
    assert!(found.iter().all(|p| p.extension().is_some_and(|e| e == "txt")));
    Ok(())
}
