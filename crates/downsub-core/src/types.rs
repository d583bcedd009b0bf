//! Core data types for the DownSub caption scraper
//!
//! Contains the raw aggregator payload as received from the captured
//! endpoint and the normalized caption schema handed back to callers.

use serde::{Deserialize, Serialize};

/// Raw payload returned by the aggregator's caption API
///
/// The shape is owned by a third party, so every field falls back to
/// its default when absent. Wrong types still fail deserialization.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawAggregatorResponse {
    /// Provider name, e.g. "Youtube"
    pub source_name: String,

    pub title: Option<String>,

    pub thumbnail: Option<String>,

    /// Passed through untouched; the aggregator is not consistent about its type
    pub duration: Option<serde_json::Value>,

    /// Base URL of the aggregator's subtitle download service
    pub url_subtitle: String,

    /// Tracks published by the video owner
    pub subtitles: Vec<RawSubtitle>,

    /// Machine-translated tracks
    pub subtitles_auto_trans: Vec<RawSubtitle>,
}

/// One track entry in the raw aggregator payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RawSubtitle {
    /// Language display name (e.g. "English")
    pub name: String,

    /// Opaque per-track token consumed by the subtitle download service
    pub url: String,
}

/// Normalized caption data for one video
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionResult {
    pub metadata: CaptionMetadata,

    /// Tracks published by the video owner
    pub subtitles: Vec<CaptionTrack>,

    /// Machine-translated tracks
    pub translations: Vec<CaptionTrack>,
}

/// Video metadata reported by the aggregator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaptionMetadata {
    pub title: Option<String>,
    pub thumbnail: Option<String>,
    pub duration: Option<serde_json::Value>,
}

/// One language variant of the captions with its download URLs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptionTrack {
    /// ISO 639-1 code, or "und" when the display name is not recognized
    pub language: String,

    pub urls: TrackUrls,
}

/// Download URLs for a caption track in each supported format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackUrls {
    pub raw: String,
    pub txt: String,
    pub srt: String,
}

/// Download format of a caption track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackFormat {
    Raw,
    Txt,
    Srt,
}

impl TrackUrls {
    /// Returns the URL for the given format
    pub fn get(&self, format: TrackFormat) -> &str {
        match format {
            TrackFormat::Raw => &self.raw,
            TrackFormat::Txt => &self.txt,
            TrackFormat::Srt => &self.srt,
        }
    }
}

/// One timed cue parsed from an SRT document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubtitleCue {
    pub id: u32,

    /// Start time in seconds
    pub start: f64,

    /// End time in seconds
    pub end: f64,

    /// Cue text, multiple lines joined with '\n'
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_response_deserialization() {
        let json = r#"{
            "sourceName": "Youtube",
            "title": "Never Gonna Give You Up",
            "thumbnail": "https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg",
            "duration": 213,
            "urlSubtitle": "https://subtitle.downsub.com",
            "subtitles": [{"name": "English", "url": "abc"}],
            "subtitlesAutoTrans": [{"name": "French", "url": "def"}]
        }"#;

        let raw: RawAggregatorResponse =
            serde_json::from_str(json).expect("Deserialization should succeed");

        assert_eq!(raw.source_name, "Youtube");
        assert_eq!(raw.title.as_deref(), Some("Never Gonna Give You Up"));
        assert_eq!(raw.duration, Some(serde_json::json!(213)));
        assert_eq!(raw.subtitles.len(), 1);
        assert_eq!(raw.subtitles_auto_trans[0].name, "French");
    }

    #[test]
    fn test_raw_response_missing_fields_default() {
        let raw: RawAggregatorResponse =
            serde_json::from_str("{}").expect("Deserialization should succeed");

        assert_eq!(raw, RawAggregatorResponse::default());
        assert!(raw.source_name.is_empty());
        assert!(raw.subtitles.is_empty());
    }

    #[test]
    fn test_raw_response_wrong_type_fails() {
        let result = serde_json::from_str::<RawAggregatorResponse>(r#"{"subtitles": "none"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_caption_result_serialization() {
        let result = CaptionResult {
            metadata: CaptionMetadata {
                title: Some("Test".to_string()),
                thumbnail: None,
                duration: Some(serde_json::json!("3:33")),
            },
            subtitles: vec![CaptionTrack {
                language: "en".to_string(),
                urls: TrackUrls {
                    raw: "https://x/y?type=raw&title=abc".to_string(),
                    txt: "https://x/y?type=txt&title=abc".to_string(),
                    srt: "https://x/y?url=abc".to_string(),
                },
            }],
            translations: Vec::new(),
        };

        let json = serde_json::to_value(&result).expect("Serialization should succeed");
        assert_eq!(json["subtitles"][0]["language"], "en");
        assert_eq!(json["subtitles"][0]["urls"]["srt"], "https://x/y?url=abc");

        let back: CaptionResult =
            serde_json::from_value(json).expect("Deserialization should succeed");
        assert_eq!(result, back);
    }

    #[test]
    fn test_track_urls_get() {
        let urls = TrackUrls {
            raw: "r".to_string(),
            txt: "t".to_string(),
            srt: "s".to_string(),
        };
        assert_eq!(urls.get(TrackFormat::Raw), "r");
        assert_eq!(urls.get(TrackFormat::Txt), "t");
        assert_eq!(urls.get(TrackFormat::Srt), "s");
    }
}
