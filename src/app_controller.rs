use anyhow::{Result, anyhow};
use log::{error, warn, info, debug};
use std::path::{Path, PathBuf};
use crate::app_config::Config;
use crate::engine::{ClipSegmenter, PhraseTiming, ReflowFormatter, SubtitleExporter, TimingAllocator};
use crate::file_utils::FileManager;
use indicatif::{ProgressBar, ProgressStyle};

// @module: Application controller for caption processing

/// Main application controller for caption segmentation and timing
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a new controller with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Access the active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Clip segmenter built from the active configuration
    fn segmenter(&self) -> ClipSegmenter {
        ClipSegmenter::new(
            self.config.segmenter.min_lines,
            self.config.segmenter.merge_threshold,
            self.config.segmenter.max_chars,
        )
    }

    /// Reflow formatter built from the active configuration
    fn reflow_formatter(&self) -> ReflowFormatter {
        ReflowFormatter::new(self.config.reflow.target_length)
    }

    /// Split a script into clips and write one `<stem>.clipNN.txt` per group
    pub fn run_clips(&self, input_file: &Path, force_overwrite: bool) -> Result<()> {
        let text = FileManager::read_to_string(input_file)?;
        let segmenter = self.segmenter();

        let groups = segmenter.segment(&text);
        if groups.is_empty() {
            warn!("No clips produced from {:?} (empty script?)", input_file);
            return Ok(());
        }

        let info = segmenter.get_segment_info(&groups);
        info!(
            "Segmented {:?} into {} clips ({} chars, avg {:.1})",
            input_file, info.count, info.total_chars, info.avg_chars
        );
        for &index in &info.long_segments {
            warn!(
                "Clip {} is {} chars, above the advisory maximum of {}",
                index + 1,
                groups[index].char_count(),
                self.config.segmenter.max_chars
            );
        }

        let estimates = segmenter.estimate_duration(&groups, self.config.timing.chars_per_second);
        for (group, estimate) in groups.iter().zip(&estimates) {
            debug!("Clip {} estimated at {:.1}s of speech", group.index + 1, estimate);
        }

        let output_dir = Self::output_dir_for(input_file);
        let progress_bar = Self::styled_progress_bar(groups.len() as u64, "clips");
        progress_bar.set_message("Writing clips");

        for group in &groups {
            let output_path = FileManager::generate_output_path(
                input_file,
                &output_dir,
                &format!("clip{:02}", group.index + 1),
                "txt",
            );

            if output_path.exists() && !force_overwrite {
                warn!("Skipping existing clip file {:?} (use -f to force overwrite)", output_path);
            } else {
                FileManager::write_to_file(&output_path, &group.text)?;
            }
            progress_bar.inc(1);
        }
        progress_bar.finish_with_message("Clips written");

        Ok(())
    }

    /// Allocate per-line timing and write `<stem>.timing.json`.
    ///
    /// The optional phrase-timing JSON file holds the speech engine's
    /// per-phrase estimate; its rescaled form is carried into the output as
    /// a diagnostic next to the segments.
    pub fn run_timing(
        &self,
        input_file: &Path,
        audio_duration: f64,
        phrase_timing_file: Option<&Path>,
        force_overwrite: bool,
    ) -> Result<()> {
        let output_path = FileManager::generate_output_path(
            input_file,
            Self::output_dir_for(input_file),
            "timing",
            "json",
        );
        if output_path.exists() && !force_overwrite {
            warn!("Skipping existing timing file {:?} (use -f to force overwrite)", output_path);
            return Ok(());
        }

        let text = FileManager::read_to_string(input_file)?;

        let phrase_timing: Option<Vec<PhraseTiming>> = match phrase_timing_file {
            Some(path) => {
                let content = FileManager::read_to_string(path)?;
                let phrases: Vec<PhraseTiming> = serde_json::from_str(&content)
                    .map_err(|e| anyhow!("Failed to parse phrase timing file {:?}: {}", path, e))?;
                Some(phrases)
            }
            None => None,
        };

        let plan = TimingAllocator::allocate(
            &text,
            audio_duration,
            phrase_timing.as_deref(),
            self.config.timing.offset_seconds,
        )?;

        let json = serde_json::to_string_pretty(&plan)?;
        FileManager::write_to_file(&output_path, &json)?;
        info!(
            "Wrote {} timed segments to {:?}",
            plan.segments.len(),
            output_path
        );

        Ok(())
    }

    /// Export subtitles and write `<stem>.srt`
    pub fn run_srt(
        &self,
        input_file: &Path,
        audio_duration: f64,
        force_overwrite: bool,
    ) -> Result<()> {
        let text = FileManager::read_to_string(input_file)?;

        let output_path = FileManager::generate_output_path(
            input_file,
            Self::output_dir_for(input_file),
            "",
            "srt",
        );
        if output_path.exists() && !force_overwrite {
            warn!("Skipping existing subtitle file {:?} (use -f to force overwrite)", output_path);
            return Ok(());
        }

        SubtitleExporter::write_to_file(&output_path, &text, audio_duration)?;
        info!("Wrote subtitle file {:?}", output_path);

        Ok(())
    }

    /// Reflow a script for plain-text delivery and write `<stem>.reflow.txt`
    pub fn run_reflow(&self, input_file: &Path, force_overwrite: bool) -> Result<()> {
        let text = FileManager::read_to_string(input_file)?;
        let formatted = self.reflow_formatter().reflow_to_string(&text);

        let output_path = FileManager::generate_output_path(
            input_file,
            Self::output_dir_for(input_file),
            "reflow",
            "txt",
        );
        if output_path.exists() && !force_overwrite {
            warn!("Skipping existing reflow file {:?} (use -f to force overwrite)", output_path);
            return Ok(());
        }

        FileManager::write_to_file(&output_path, &formatted)?;
        info!("Wrote reflowed text {:?}", output_path);

        Ok(())
    }

    /// Split every `.txt` script in a directory into clips
    pub fn run_clips_folder(&self, input_dir: &Path, force_overwrite: bool) -> Result<()> {
        self.process_folder(input_dir, "Segmenting scripts", |file| {
            self.run_clips(file, force_overwrite)
        })
    }

    /// Reflow every `.txt` script in a directory
    pub fn run_reflow_folder(&self, input_dir: &Path, force_overwrite: bool) -> Result<()> {
        self.process_folder(input_dir, "Reflowing scripts", |file| {
            self.run_reflow(file, force_overwrite)
        })
    }

    /// Run an operation over every script file found in a directory
    fn process_folder<F>(&self, input_dir: &Path, label: &str, op: F) -> Result<()>
    where
        F: Fn(&Path) -> Result<()>,
    {
        let script_files: Vec<PathBuf> = FileManager::find_files(input_dir, "txt")?
            .into_iter()
            // Derived artifacts from earlier runs are not inputs
            .filter(|path| {
                let name = path.file_name().map(|n| n.to_string_lossy().to_string());
                !name.is_some_and(|n| n.contains(".clip") || n.contains(".reflow"))
            })
            .collect();

        if script_files.is_empty() {
            return Err(anyhow!("No script files found in directory: {:?}", input_dir));
        }

        let folder_pb = Self::styled_progress_bar(script_files.len() as u64, "files");
        folder_pb.set_message(label.to_string());

        // Track success and failure counts
        let mut success_count = 0;
        let mut error_count = 0;

        for script_file in script_files.iter() {
            let file_name = script_file
                .file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            folder_pb.set_message(format!("Processing: {}", file_name));

            match op(script_file) {
                Ok(()) => success_count += 1,
                Err(e) => {
                    error!("Failed to process {:?}: {}", script_file, e);
                    error_count += 1;
                }
            }
            folder_pb.inc(1);
        }

        folder_pb.finish_with_message(format!(
            "{} processed, {} failed",
            success_count, error_count
        ));
        info!(
            "Folder run complete: {} processed, {} failed",
            success_count, error_count
        );

        Ok(())
    }

    /// Output directory for artifacts derived from an input file
    fn output_dir_for(input_file: &Path) -> PathBuf {
        input_file
            .parent()
            .unwrap_or(Path::new("."))
            .to_path_buf()
    }

    /// Progress bar in the house style
    fn styled_progress_bar(len: u64, noun: &str) -> ProgressBar {
        let progress_bar = ProgressBar::new(len);
        let template = format!(
            "{{spinner:.green}} [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{pos}}/{{len}} {} ({{percent}}%) {{msg}} {{eta}}",
            noun
        );
        let template_result = ProgressStyle::default_bar()
            .template(&template)
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));
        progress_bar
    }
}
