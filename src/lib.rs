/*!
 * # submerge - bilingual subtitle merger
 *
 * A Rust library that catalogs a media library of videos and sidecar SRT
 * files and merges pairs of subtitle tracks into a single bilingual track.
 *
 * ## Features
 *
 * - Permissive SRT parsing: a broken caption never loses the rest of the track
 * - Timestamp-based alignment between independently timed tracks
 * - Merged `_combined` tracks written next to the base subtitle
 * - TV show / movie catalog with paginated listing queries
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `timestamp`: `HH:MM:SS,mmm` codec
 * - `subtitle_processor`: subtitle entries and tracks
 * - `subtitle_parser`: SRT text to tracks
 * - `aligner`: first-match timestamp alignment
 * - `merger`: track merging and persistence
 * - `library`: catalog model and listing queries
 * - `scanner`: directory walking and episode grouping
 * - `app_config`: Configuration management
 * - `app_controller`: Batch merge run over a library
 * - `file_utils`: File system operations
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
pub mod timestamp;
pub mod subtitle_processor;
pub mod subtitle_parser;
pub mod aligner;
pub mod merger;
pub mod library;
pub mod scanner;
pub mod app_config;
pub mod app_controller;
pub mod file_utils;
pub mod errors;

// Re-export main types for easier usage
pub use app_config::Config;
pub use subtitle_processor::{SubtitleEntry, SubtitleFormat, SubtitleTrack};
pub use subtitle_parser::SubtitleParser;
pub use aligner::TimestampAligner;
pub use merger::SubtitleMerger;
pub use library::{Library, Page};
pub use errors::{LibraryError, SubtitleError};
