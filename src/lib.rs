/*!
 * # tosrt - transcript to SubRip converter
 *
 * A Rust library for turning speech-recognition transcripts into SRT subtitles.
 *
 * ## Features
 *
 * - Typed transcript schema (`speakers`, `chunks` with `[start, end]` timestamps)
 * - Validation of untyped JSON input at a single boundary
 * - SRT clock formatting with unbounded hours and millisecond truncation
 * - Configurable policy for negative or reversed timestamps
 * - File writer that reports failures as a status value
 * - Batch conversion of whole directories
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `timecode`: Seconds to `HH:MM:SS,mmm` formatting
 * - `transcript`: Transcript model and boundary validation
 * - `srt_converter`: Transcript to SRT text conversion
 * - `srt_writer`: Writing SRT files and reporting the outcome
 * - `app_config`: Configuration management
 * - `file_utils`: File system operations
 * - `app_controller`: Single file and folder workflows
 * - `errors`: Custom error types for the application
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
pub mod file_utils;
pub mod timecode;
pub mod transcript;
pub mod srt_converter;
pub mod srt_writer;
pub mod app_controller;
pub mod errors;

// Re-export main types for easier usage
pub use app_config::Config;
pub use timecode::{format_time, SrtTimestamp};
pub use transcript::{Chunk, TimestampPolicy, Transcript};
pub use srt_converter::{convert, convert_value, SrtBlock, SrtConverter, SrtDocument};
pub use srt_writer::{write_srt, SrtWriter, WriteOutcome};
pub use errors::{AppError, TranscriptError};
