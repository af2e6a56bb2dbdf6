/*!
 * Subtitle export in the canonical SRT format.
 *
 * Re-segments the caption text by punctuation, independent of the line-based
 * timing allocator: the two consumers intentionally disagree about
 * boundaries. Each exported entry carries punctuation-stripped text and a
 * time window proportional to its display length, with the windows summing
 * exactly to the audio duration.
 */

use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use log::debug;

use crate::errors::EngineError;

/// Punctuation marks that close a caption span; stripped from the rendered text
const SPAN_TERMINATORS: [char; 4] = ['。', '、', '！', '？'];

/// Single subtitle entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SrtEntry {
    /// 1-based sequence number
    pub seq_num: usize,

    /// Start time in ms
    pub start_time_ms: u64,

    /// End time in ms
    pub end_time_ms: u64,

    /// Caption text, terminator punctuation removed
    pub text: String,
}

impl SrtEntry {
    /// Creates a new subtitle entry
    pub fn new(seq_num: usize, start_time_ms: u64, end_time_ms: u64, text: String) -> Self {
        SrtEntry {
            seq_num,
            start_time_ms,
            end_time_ms,
            text,
        }
    }

    /// Convert start time to formatted SRT timestamp
    pub fn format_start_time(&self) -> String {
        Self::format_timestamp(self.start_time_ms)
    }

    /// Convert end time to formatted SRT timestamp
    pub fn format_end_time(&self) -> String {
        Self::format_timestamp(self.end_time_ms)
    }

    /// Format a timestamp in milliseconds to SRT format (HH:MM:SS,mmm)
    pub fn format_timestamp(ms: u64) -> String {
        let hours = ms / 3_600_000;
        let minutes = (ms % 3_600_000) / 60_000;
        let seconds = (ms % 60_000) / 1_000;
        let millis = ms % 1_000;

        format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
    }

    /// Convert seconds to whole milliseconds, truncating sub-millisecond parts
    pub fn seconds_to_ms(seconds: f64) -> u64 {
        (seconds * 1000.0) as u64
    }
}

impl fmt::Display for SrtEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.seq_num)?;
        writeln!(f, "{} --> {}", self.format_start_time(), self.format_end_time())?;
        writeln!(f, "{}", self.text)?;
        writeln!(f)
    }
}

/// Renders caption text as a time-coded subtitle document
pub struct SubtitleExporter;

impl SubtitleExporter {
    /// Export `text` as an SRT document string.
    ///
    /// Fails with [`EngineError::InvalidDuration`] when `audio_duration` is
    /// not positive. Whitespace-only text yields an empty document.
    pub fn export(text: &str, audio_duration: f64) -> Result<String, EngineError> {
        let entries = Self::export_entries(text, audio_duration)?;

        let mut document = String::new();
        for entry in &entries {
            // Display never fails when writing into a String
            let _ = fmt::write(&mut document, format_args!("{}", entry));
        }
        Ok(document)
    }

    /// Export `text` as a list of timed subtitle entries.
    ///
    /// User line breaks are ignored: the flattened text is re-cut at
    /// terminating punctuation, each span's duration is proportional to its
    /// punctuation-stripped display length, and the windows are sequential
    /// from zero and sum exactly to `audio_duration`.
    pub fn export_entries(text: &str, audio_duration: f64) -> Result<Vec<SrtEntry>, EngineError> {
        if audio_duration <= 0.0 {
            return Err(EngineError::InvalidDuration(audio_duration));
        }

        // Subtitle segmentation ignores the author's line breaks
        let flattened: String = text.chars().filter(|c| *c != '\n' && *c != '\r').collect();
        if flattened.trim().is_empty() {
            return Ok(Vec::new());
        }

        let spans = Self::split_spans(&flattened);
        let display_texts: Vec<String> = spans.iter().map(|span| Self::display_text(span)).collect();
        let display_lengths: Vec<usize> = display_texts
            .iter()
            .map(|text| text.chars().count())
            .collect();
        let total_length: usize = display_lengths.iter().sum();

        let span_count = spans.len();
        let mut entries = Vec::with_capacity(span_count);
        let mut start = 0.0_f64;

        for (i, display) in display_texts.into_iter().enumerate() {
            let duration = if total_length > 0 {
                (display_lengths[i] as f64 / total_length as f64) * audio_duration
            } else {
                audio_duration / span_count as f64
            };

            // Pin the terminal boundary so the document covers the audio exactly
            let end = if i == span_count - 1 {
                audio_duration
            } else {
                start + duration
            };

            entries.push(SrtEntry::new(
                i + 1,
                SrtEntry::seconds_to_ms(start),
                SrtEntry::seconds_to_ms(end),
                display,
            ));
            start = end;
        }

        debug!(
            "Exported {} subtitle entries over {:.2}s",
            entries.len(),
            audio_duration
        );

        Ok(entries)
    }

    /// Export `text` and write the SRT document to `path`
    pub fn write_to_file<P: AsRef<Path>>(path: P, text: &str, audio_duration: f64) -> Result<()> {
        let path = path.as_ref();
        let document = Self::export(text, audio_duration)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let mut file = File::create(path)
            .with_context(|| format!("Failed to create subtitle file: {}", path.display()))?;
        file.write_all(document.as_bytes())
            .with_context(|| format!("Failed to write subtitle file: {}", path.display()))?;

        Ok(())
    }

    /// Cut the flattened text into spans at terminating punctuation.
    ///
    /// Each span keeps its closing mark as a suffix; a non-empty remainder
    /// becomes the final span. Text with no marks is one span.
    fn split_spans(text: &str) -> Vec<String> {
        let mut spans = Vec::new();
        let mut current = String::new();

        for ch in text.chars() {
            current.push(ch);
            if SPAN_TERMINATORS.contains(&ch) {
                spans.push(std::mem::take(&mut current));
            }
        }

        if !current.is_empty() {
            spans.push(current);
        }
        if spans.is_empty() {
            spans.push(text.to_string());
        }

        spans
    }

    /// Span text with all terminator punctuation removed
    fn display_text(span: &str) -> String {
        span.chars()
            .filter(|c| !SPAN_TERMINATORS.contains(c))
            .collect()
    }
}
