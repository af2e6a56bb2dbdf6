/*!
 * Per-line timing allocation against a synthesized audio track.
 *
 * Given caption text and the known duration of its synthesized audio, assigns
 * each display line a start time and duration proportional to its character
 * count, so the line durations sum exactly to the audio length. An optional
 * phrase-level timing estimate from the speech engine can be rescaled to the
 * audio length for inspection; it never drives the line timing itself.
 */

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::errors::EngineError;

/// Floor applied to a clamped duration so a renderer never sees a zero-length segment
pub const MIN_SEGMENT_DURATION: f64 = 0.1;

/// Per-phrase timing estimate supplied by the speech-synthesis engine.
///
/// Derived from phonetic unit durations; consumed read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhraseTiming {
    /// Phrase text as the speech engine segmented it
    pub text: String,

    /// Start offset in seconds from the beginning of the audio
    pub start: f64,

    /// Phrase duration in seconds
    pub duration: f64,
}

/// One caption line with its allocated time window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedSegment {
    /// Position of the line within the text
    pub index: usize,

    /// Line text, wording unaltered
    pub text: String,

    /// Start time in seconds
    pub start: f64,

    /// Duration in seconds
    pub duration: f64,
}

impl TimedSegment {
    /// End time in seconds
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

/// Result of a timing allocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingPlan {
    /// Time-ordered caption segments, one per display line
    pub segments: Vec<TimedSegment>,

    /// Phrase timing rescaled to the audio duration, when supplied.
    ///
    /// Diagnostic output only; the segment timing above is always
    /// character-proportional and ignores this list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rescaled_phrases: Option<Vec<PhraseTiming>>,
}

/// Allocates per-line start times and durations
pub struct TimingAllocator;

impl TimingAllocator {
    /// Allocate a time window to every display line of `text`.
    ///
    /// Lines are the newline-delimited pieces of `text` with blank lines
    /// dropped; when nothing remains the whole text is treated as one line.
    /// Each line's duration is its share of `audio_duration` proportional to
    /// its character count (equal split when the text has no characters).
    /// `offset_seconds` shifts every start, clamped at zero, and any segment
    /// pushed past the audio end has its duration clamped so it does not
    /// extend beyond `audio_duration`.
    ///
    /// Fails with [`EngineError::InvalidDuration`] when `audio_duration` is
    /// not positive.
    pub fn allocate(
        text: &str,
        audio_duration: f64,
        phrase_timing: Option<&[PhraseTiming]>,
        offset_seconds: f64,
    ) -> Result<TimingPlan, EngineError> {
        if audio_duration <= 0.0 {
            return Err(EngineError::InvalidDuration(audio_duration));
        }

        let mut lines: Vec<&str> = text
            .split('\n')
            .filter(|line| !line.trim().is_empty())
            .collect();
        if lines.is_empty() {
            lines.push(text);
        }

        let char_counts: Vec<usize> = lines.iter().map(|line| line.chars().count()).collect();
        let total_chars: usize = char_counts.iter().sum();

        let mut segments = Vec::with_capacity(lines.len());
        let mut start = 0.0_f64;

        for (index, (line, &chars)) in lines.iter().zip(&char_counts).enumerate() {
            let duration = if total_chars > 0 {
                (chars as f64 / total_chars as f64) * audio_duration
            } else {
                audio_duration / lines.len() as f64
            };

            segments.push(TimedSegment {
                index,
                text: (*line).to_string(),
                start,
                duration,
            });
            start += duration;
        }

        let rescaled_phrases =
            phrase_timing.map(|phrases| Self::rescale_phrases(phrases, audio_duration));

        if offset_seconds != 0.0 {
            Self::apply_offset(&mut segments, offset_seconds, audio_duration);
        }

        debug!(
            "Allocated {} segments over {:.2}s (offset {:+.2}s)",
            segments.len(),
            audio_duration,
            offset_seconds
        );

        Ok(TimingPlan {
            segments,
            rescaled_phrases,
        })
    }

    /// Shift every start by `offset_seconds`, keeping segments inside the audio
    fn apply_offset(segments: &mut [TimedSegment], offset_seconds: f64, audio_duration: f64) {
        for segment in segments {
            segment.start = (segment.start + offset_seconds).max(0.0);
            if segment.start + segment.duration > audio_duration {
                segment.duration = (audio_duration - segment.start).max(MIN_SEGMENT_DURATION);
            }
        }
    }

    /// Rescale the speech engine's phrase timing to the actual audio length.
    ///
    /// The phrase estimate is based on phonetic unit durations and usually
    /// disagrees slightly with the rendered audio; scaling both starts and
    /// durations by `audio_duration / estimate_total` lines the two up. A
    /// zero-length estimate falls back to scale 1.0.
    fn rescale_phrases(phrases: &[PhraseTiming], audio_duration: f64) -> Vec<PhraseTiming> {
        let estimate_total: f64 = phrases.iter().map(|phrase| phrase.duration).sum();

        let scale = if estimate_total > 0.0 {
            audio_duration / estimate_total
        } else {
            warn!("Phrase timing durations sum to zero, keeping estimate unscaled");
            1.0
        };

        debug!(
            "Rescaling {} phrases: estimate {:.2}s, audio {:.2}s, scale {:.4}",
            phrases.len(),
            estimate_total,
            audio_duration,
            scale
        );

        phrases
            .iter()
            .map(|phrase| PhraseTiming {
                text: phrase.text.clone(),
                start: phrase.start * scale,
                duration: phrase.duration * scale,
            })
            .collect()
    }
}
