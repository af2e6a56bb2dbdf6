/*!
 * # capsync - Caption Segmentation & Timing Synchronization
 *
 * A Rust library for turning spoken-word text plus a synthesized audio track
 * into precisely timed on-screen caption output for short-form vertical video.
 *
 * ## Features
 *
 * - Split scripts into renderable clip groups, honoring blank-line boundaries
 * - Character-proportional per-line timing against a known audio duration
 * - Canonical SRT export with punctuation-based re-segmentation
 * - Fixed-width line reflow for plain-text delivery
 * - Rescaling of speech-engine phrase timing as an inspection diagnostic
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `engine`: the segmentation and timing core:
 *   - `engine::clip_segmenter`: Coarse clip grouping for multi-clip videos
 *   - `engine::timing_allocator`: Per-line start/duration allocation
 *   - `engine::subtitle_exporter`: SRT re-segmentation and rendering
 *   - `engine::reflow_formatter`: Fixed-width text reflow
 * - `app_config`: Configuration management
 * - `app_controller`: Main application controller
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the application
 *
 * The engine itself performs no I/O: every component is a pure function of
 * its inputs, so all four may run concurrently against the same source text.
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod engine;
pub mod errors;
pub mod file_utils;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use engine::{
    ClipGroup, ClipSegmenter, PhraseTiming, ReflowFormatter, SegmentInfo, SrtEntry,
    SubtitleExporter, TimedSegment, TimingAllocator, TimingPlan,
};
pub use errors::{AppError, EngineError};
