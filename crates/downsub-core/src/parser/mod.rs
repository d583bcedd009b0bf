//! Parsers for DownSub payloads
//!
//! Contains the caption payload normalizer and the SRT document parser.

pub mod normalize;
pub mod srt;

pub use normalize::{normalize_response, YOUTUBE_SOURCE};
pub use srt::{extract_text_from_srt, parse_srt};
