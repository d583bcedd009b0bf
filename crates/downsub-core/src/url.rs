//! URL helper functions for DownSub
//!
//! Provides functions for building the aggregator query URL and the
//! per-track download URLs.

use crate::types::TrackUrls;

/// Default aggregator front page
pub const DEFAULT_BASE_URL: &str = "https://downsub.com";

/// Builds the aggregator page URL that looks up captions for a video
///
/// # Arguments
/// * `base_url` - Aggregator front page (e.g., "https://downsub.com")
/// * `video_url` - Source video URL
///
/// # Example
/// ```
/// use downsub_core::url::build_query_url;
/// let url = build_query_url("https://downsub.com", "https://youtu.be/abc");
/// assert_eq!(url, "https://downsub.com/?url=https%3A%2F%2Fyoutu.be%2Fabc");
/// ```
pub fn build_query_url(base_url: &str, video_url: &str) -> String {
    format!(
        "{}/?url={}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(video_url)
    )
}

/// Builds the three download URLs for one caption track
///
/// The track token is percent-encoded and substituted into templates
/// derived from the aggregator's subtitle service URL.
///
/// Only `A-Z a-z 0-9 - _ . ~` are left as is. Unlike a browser's
/// `encodeURIComponent`, this also escapes `!'()*`, so a token holding
/// those characters differs byte-for-byte from a browser-built URL
/// while decoding to the same value.
///
/// # Example
/// ```
/// use downsub_core::url::build_track_urls;
/// let urls = build_track_urls("https://x/y", "abc");
/// assert_eq!(urls.raw, "https://x/y?type=raw&title=abc");
/// assert_eq!(urls.txt, "https://x/y?type=txt&title=abc");
/// assert_eq!(urls.srt, "https://x/y?url=abc");
/// ```
pub fn build_track_urls(url_subtitle: &str, track_token: &str) -> TrackUrls {
    let encoded = urlencoding::encode(track_token);
    TrackUrls {
        raw: format!("{}?type=raw&title={}", url_subtitle, encoded),
        txt: format!("{}?type=txt&title={}", url_subtitle, encoded),
        srt: format!("{}?url={}", url_subtitle, encoded),
    }
}
