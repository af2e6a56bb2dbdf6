/*!
 * Tests for fixed-width reflow functionality
 */

use capsync::engine::ReflowFormatter;

/// Strip whitespace and newlines, for wording-preservation checks
fn condensed(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Test a fifteen-character line without punctuation staying whole
#[test]
fn test_reflow_withNoBreakHints_shouldKeepLineWithinSlack() {
    let formatter = ReflowFormatter::new(14);

    let lines = formatter.reflow("職場の嫌な奴はこう扱えば大丈夫");

    // One chunk of fifteen characters: no boundary to split on, and still
    // inside the four-character slack above the target.
    assert_eq!(lines, vec!["職場の嫌な奴はこう扱えば大丈夫".to_string()]);
    assert_eq!(lines[0].chars().count(), 15);
}

/// Test break marks being consumed and close chunks packed together
#[test]
fn test_reflow_withPauseMarks_shouldDropMarksAndPackChunks() {
    let formatter = ReflowFormatter::new(14);

    let lines = formatter.reflow("こんにちは、今日は。");

    assert_eq!(lines, vec!["こんにちは今日は".to_string()]);
    assert!(!lines[0].contains('、'));
    assert!(!lines[0].contains('。'));
}

/// Test a combined length above the hard cap forcing a break
#[test]
fn test_reflow_withOversizedCombination_shouldForceBreak() {
    let formatter = ReflowFormatter::new(14);

    // Two ten-character chunks: combined twenty exceeds fourteen plus four
    let lines = formatter.reflow("あいうえおかきくけこ、さしすせそたちつてと");

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].chars().count(), 10);
    assert_eq!(lines[1].chars().count(), 10);
}

/// Test the numeric tie-break rejecting a chunk that moves away from target
#[test]
fn test_reflow_withWorseningAppend_shouldCloseLineFirst() {
    let formatter = ReflowFormatter::new(14);

    // Thirteen then four characters: appending lands at seventeen, three
    // away from the target, while thirteen is only one away.
    let lines = formatter.reflow("あいうえおかきくけこさしす、たちつて");

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].chars().count(), 13);
    assert_eq!(lines[1].chars().count(), 4);
}

/// Test the tie-break appending when the distances are equal
#[test]
fn test_reflow_withEqualDistanceAppend_shouldAppend() {
    let formatter = ReflowFormatter::new(14);

    // Twelve then four characters: both twelve and sixteen sit two away
    // from the target, and a tie goes to appending.
    let lines = formatter.reflow("あいうえおかきくけこさし、たちつて");

    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].chars().count(), 16);
}

/// Test source lines being processed independently and blanks dropped
#[test]
fn test_reflow_withMultipleSourceLines_shouldNotSpanLines() {
    let formatter = ReflowFormatter::new(14);

    let lines = formatter.reflow("こんにちは、今日は。\n\nありがとう。");

    assert_eq!(
        lines,
        vec!["こんにちは今日は".to_string(), "ありがとう".to_string()]
    );
}

/// Test no output line ever exceeding the hard cap
#[test]
fn test_reflow_withLongMixedText_shouldRespectHardCap() {
    let formatter = ReflowFormatter::new(14);
    let text = "今日は朝から雨が降っていた、でも傘を忘れた。駅まで走って、ずぶ濡れになった。\n電車の中で、少しずつ乾いていくのを感じながら、窓の外を眺めていた。";

    for line in formatter.reflow(text) {
        assert!(
            line.chars().count() <= 18,
            "line exceeds hard cap: {}",
            line
        );
    }
}

/// Test wording being preserved apart from the two break marks
#[test]
fn test_reflow_withArbitraryText_shouldPreserveWording() {
    let formatter = ReflowFormatter::new(14);
    let text = "今日は朝から雨が降っていた、でも傘を忘れた。駅まで走って、ずぶ濡れになった。";

    let output = formatter.reflow(text).join("\n");

    let expected: String = condensed(text)
        .chars()
        .filter(|c| *c != '。' && *c != '、')
        .collect();
    assert_eq!(condensed(&output), expected);
}

/// Test empty input producing no lines
#[test]
fn test_reflow_withEmptyInput_shouldReturnNoLines() {
    let formatter = ReflowFormatter::default();

    assert!(formatter.reflow("").is_empty());
    assert!(formatter.reflow("\n\n").is_empty());
    assert_eq!(formatter.reflow_to_string(""), "");
}

/// Test the joined plain-text rendering
#[test]
fn test_reflow_to_string_withTwoLines_shouldJoinWithNewline() {
    let formatter = ReflowFormatter::new(14);

    let output = formatter.reflow_to_string("こんにちは、今日は。\nありがとう。");

    assert_eq!(output, "こんにちは今日は\nありがとう");
}
