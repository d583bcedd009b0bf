//! Normalizer for the aggregator's caption payload
//!
//! Validates the provider and reshapes the raw payload into the
//! canonical [`CaptionResult`] schema.

use crate::error::{DownsubError, Result};
use crate::language::LanguageResolver;
use crate::types::{
    CaptionMetadata, CaptionResult, CaptionTrack, RawAggregatorResponse, RawSubtitle,
};
use crate::url::build_track_urls;

/// Provider name the aggregator reports for YouTube videos
pub const YOUTUBE_SOURCE: &str = "Youtube";

/// Normalizes a raw aggregator payload into a [`CaptionResult`]
///
/// The provider check runs before anything else, so an unexpected
/// provider never produces partial output.
///
/// # Arguments
/// * `raw` - Payload fetched from the captured endpoint
/// * `expected_source` - Provider name the payload must carry
/// * `resolver` - Language name lookup used for every track
///
/// # Errors
/// Returns `UnsupportedSource` if `raw.source_name` differs from `expected_source`
pub fn normalize_response(
    raw: RawAggregatorResponse,
    expected_source: &str,
    resolver: &LanguageResolver,
) -> Result<CaptionResult> {
    if raw.source_name != expected_source {
        return Err(DownsubError::UnsupportedSource(raw.source_name));
    }

    let subtitles = build_tracks(&raw.subtitles, &raw.url_subtitle, resolver);
    let translations = build_tracks(&raw.subtitles_auto_trans, &raw.url_subtitle, resolver);

    Ok(CaptionResult {
        metadata: CaptionMetadata {
            title: raw.title,
            thumbnail: raw.thumbnail,
            duration: raw.duration,
        },
        subtitles,
        translations,
    })
}

fn build_tracks(
    entries: &[RawSubtitle],
    url_subtitle: &str,
    resolver: &LanguageResolver,
) -> Vec<CaptionTrack> {
    entries
        .iter()
        .map(|entry| CaptionTrack {
            language: resolver.resolve(&entry.name).to_string(),
            urls: build_track_urls(url_subtitle, &entry.url),
        })
        .collect()
}
