/*!
 * Clip segmentation for multi-clip video generation.
 *
 * Splits a raw script into coarse clip groups, each one backing a single
 * rendered video segment. Blank lines are treated as authoritative,
 * user-chosen boundaries; without them, sentences are grouped automatically
 * until a minimum line count is reached.
 */

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

/// Runs of blank lines that act as user-chosen clip boundaries
static BLANK_LINE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n+").unwrap());

/// Sentence-terminating punctuation used for automatic grouping
const SENTENCE_TERMINATORS: [char; 3] = ['。', '！', '？'];

/// One caption-ready text block, consumed by a per-clip synthesis pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipGroup {
    /// Position of the clip within the script
    pub index: usize,

    /// Caption text, internal newlines preserved
    pub text: String,
}

impl ClipGroup {
    fn new(index: usize, text: String) -> Self {
        ClipGroup { index, text }
    }

    /// Number of newline-delimited lines in the clip
    pub fn line_count(&self) -> usize {
        self.text.split('\n').count()
    }

    /// Character count of the clip (code points, not bytes)
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// Aggregate metrics over a set of clip groups
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentInfo {
    /// Number of clips
    pub count: usize,

    /// Total character count across all clips
    pub total_chars: usize,

    /// Average character count per clip
    pub avg_chars: f64,

    /// Character count of the shortest clip
    pub min_chars: usize,

    /// Character count of the longest clip
    pub max_chars: usize,

    /// Indices of clips exceeding the advisory maximum (informational only)
    pub long_segments: Vec<usize>,
}

/// Splits raw text into clip groups
pub struct ClipSegmenter {
    /// Minimum line count before a group is closed
    min_lines: usize,

    /// A trailing group at or below this line count is merged backward
    merge_threshold: usize,

    /// Advisory maximum character count per clip, surfaced through
    /// [`SegmentInfo::long_segments`] and never enforced
    max_chars: usize,
}

impl Default for ClipSegmenter {
    fn default() -> Self {
        ClipSegmenter::new(5, 3, 150)
    }
}

impl ClipSegmenter {
    /// Create a segmenter with explicit thresholds
    pub fn new(min_lines: usize, merge_threshold: usize, max_chars: usize) -> Self {
        ClipSegmenter {
            min_lines,
            merge_threshold,
            max_chars,
        }
    }

    /// Split a script into ordered clip groups.
    ///
    /// If the script contains a blank-line separator anywhere, runs of blank
    /// lines are the only boundaries used and each surviving block becomes one
    /// clip verbatim. Otherwise sentences are accumulated into groups of at
    /// least `min_lines` newline-counted lines, and a short trailing group is
    /// merged into its predecessor instead of being emitted alone.
    ///
    /// Empty or whitespace-only input yields an empty list.
    pub fn segment(&self, text: &str) -> Vec<ClipGroup> {
        let groups = if text.contains("\n\n") {
            self.segment_on_blank_lines(text)
        } else {
            self.segment_automatically(text)
        };

        for group in &groups {
            debug!(
                "[clip {}] {} lines, {} chars",
                group.index + 1,
                group.line_count(),
                group.char_count()
            );
        }

        groups
    }

    /// Blank-line branch: the user's separators are authoritative
    fn segment_on_blank_lines(&self, text: &str) -> Vec<ClipGroup> {
        BLANK_LINE_REGEX
            .split(text)
            .map(str::trim)
            .filter(|block| !block.is_empty())
            .enumerate()
            .map(|(index, block)| ClipGroup::new(index, block.to_string()))
            .collect()
    }

    /// Automatic branch: group sentences until the minimum line count is reached
    fn segment_automatically(&self, text: &str) -> Vec<ClipGroup> {
        let sentences = Self::split_sentences(text);

        let mut groups: Vec<String> = Vec::new();
        let mut current_group: Vec<String> = Vec::new();
        let mut current_lines = 0;

        for sentence in sentences {
            let sentence_lines = sentence.split('\n').count();
            current_group.push(sentence);
            current_lines += sentence_lines;

            if current_lines >= self.min_lines {
                groups.push(current_group.join("\n"));
                current_group.clear();
                current_lines = 0;
            }
        }

        // A short trailing group reads better appended to the previous clip
        // than rendered as a clip of its own.
        if !current_group.is_empty() {
            let remaining = current_group.join("\n");
            let remaining_lines = remaining.split('\n').count();

            match groups.last_mut() {
                Some(last) if remaining_lines <= self.merge_threshold => {
                    last.push('\n');
                    last.push_str(&remaining);
                }
                _ => groups.push(remaining),
            }
        }

        groups
            .into_iter()
            .enumerate()
            .map(|(index, text)| ClipGroup::new(index, text))
            .collect()
    }

    /// Split text into sentence spans at terminating punctuation.
    ///
    /// The terminator stays attached as the suffix of the preceding span. A
    /// trailing span with no terminator is still emitted if non-empty.
    fn split_sentences(text: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        let mut current = String::new();

        for ch in text.chars() {
            current.push(ch);
            if SENTENCE_TERMINATORS.contains(&ch) {
                let trimmed = current.trim();
                if !trimmed.is_empty() {
                    sentences.push(trimmed.to_string());
                }
                current.clear();
            }
        }

        let trimmed = current.trim();
        if !trimmed.is_empty() {
            sentences.push(trimmed.to_string());
        }

        sentences
    }

    /// Compute aggregate metrics over a set of clip groups.
    ///
    /// `long_segments` lists the indices of clips whose character count
    /// exceeds the advisory maximum; nothing is enforced on them.
    pub fn get_segment_info(&self, groups: &[ClipGroup]) -> SegmentInfo {
        let char_counts: Vec<usize> = groups.iter().map(ClipGroup::char_count).collect();
        let total_chars: usize = char_counts.iter().sum();

        let avg_chars = if groups.is_empty() {
            0.0
        } else {
            total_chars as f64 / groups.len() as f64
        };

        let long_segments = char_counts
            .iter()
            .enumerate()
            .filter(|&(_, &chars)| chars > self.max_chars)
            .map(|(i, _)| i)
            .collect();

        SegmentInfo {
            count: groups.len(),
            total_chars,
            avg_chars,
            min_chars: char_counts.iter().copied().min().unwrap_or(0),
            max_chars: char_counts.iter().copied().max().unwrap_or(0),
            long_segments,
        }
    }

    /// Estimate spoken duration per clip for UI display.
    ///
    /// At synthesis speed 1.0 the speech engine reads roughly 10 characters
    /// per second. This estimate never feeds the timing allocator.
    pub fn estimate_duration(&self, groups: &[ClipGroup], chars_per_second: f64) -> Vec<f64> {
        groups
            .iter()
            .map(|group| group.char_count() as f64 / chars_per_second)
            .collect()
    }

    /// Merge clips shorter than `min_chars` into their predecessor.
    ///
    /// Not applied by [`segment`](Self::segment); callers opt in when very
    /// short clips would produce jarring cuts.
    pub fn merge_short_segments(&self, groups: Vec<ClipGroup>, min_chars: usize) -> Vec<ClipGroup> {
        if groups.is_empty() {
            return Vec::new();
        }

        let mut merged: Vec<String> = Vec::new();
        for group in groups {
            match merged.last_mut() {
                Some(last) if group.char_count() < min_chars => {
                    last.push('\n');
                    last.push_str(&group.text);
                }
                _ => merged.push(group.text),
            }
        }

        merged
            .into_iter()
            .enumerate()
            .map(|(index, text)| ClipGroup::new(index, text))
            .collect()
    }
}
