/*!
 * Segmentation and timing synchronization engine.
 *
 * This module contains the core algorithms that turn a block of spoken-word
 * text plus a known audio duration into timed caption output. It is split
 * into several submodules:
 *
 * - `clip_segmenter`: Coarse splitting of a script into renderable clips
 * - `timing_allocator`: Per-line start/duration allocation against an audio track
 * - `subtitle_exporter`: Punctuation-based re-segmentation and SRT rendering
 * - `reflow_formatter`: Fixed-width line reflow for plain-text delivery
 *
 * Every component is a pure, synchronous function of its inputs. The two
 * timing-consuming components (`timing_allocator`, `subtitle_exporter`)
 * segment the same text independently and on purpose disagree about
 * boundaries: the allocator follows the author's line breaks while the
 * exporter follows punctuation.
 */

// Re-export main types for easier usage
pub use self::clip_segmenter::{ClipGroup, ClipSegmenter, SegmentInfo};
pub use self::reflow_formatter::ReflowFormatter;
pub use self::subtitle_exporter::{SrtEntry, SubtitleExporter};
pub use self::timing_allocator::{PhraseTiming, TimedSegment, TimingAllocator, TimingPlan};

// Submodules
pub mod clip_segmenter;
pub mod reflow_formatter;
pub mod subtitle_exporter;
pub mod timing_allocator;
