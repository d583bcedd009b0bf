//! DownSub Caption Scraper Core Library
//!
//! Captures caption tracks for online videos through the DownSub
//! subtitle aggregator.
//!
//! # Overview
//!
//! DownSub does not publish an API. Its page calls an internal caption
//! service whose URL is generated per lookup, so this crate:
//! - Opens the aggregator page in a headless browser with request
//!   interception turned on
//! - Records the first request to the caption service (and blocks ads)
//! - Fetches the caption payload from the recorded URL
//! - Normalizes it into [`CaptionResult`] with ISO 639-1 language codes
//!
//! # Example
//!
//! ```no_run
//! use downsub_core::{DownsubScraper, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let scraper = DownsubScraper::new()?;
//!
//!     let captions = scraper
//!         .scrape_captions("https://www.youtube.com/watch?v=dQw4w9WgXcQ")
//!         .await?;
//!
//!     for track in &captions.subtitles {
//!         println!("{}: {}", track.language, track.urls.srt);
//!     }
//!
//!     // Download and parse the first track
//!     if let Some(track) = captions.subtitles.first() {
//!         let cues = scraper.download_cues(track).await?;
//!         println!("{} cues", cues.len());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Browser sessions
//!
//! Every scrape launches and closes its own browser, whatever the
//! outcome. The captured caption URL is short-lived; do not cache it.

pub mod browser;
mod client;
mod error;
pub mod language;
pub mod parser;
mod scraper;
mod state;
mod types;
pub mod url;

// Re-export browser types
pub use browser::{
    BrowserHandle, BrowserLauncher, BrowserPage, BrowserSession, CapturedEndpoint,
    ChromiumLauncher, LaunchConfig, PausedRequest, RequestInterceptor, Resolution,
};

// Re-export client types
pub use client::{CaptionClient, ClientConfig};

// Re-export error types
pub use error::{DownsubError, ErrorKind, Result};

// Re-export language lookup
pub use language::LanguageResolver;

// Re-export parser functions
pub use parser::{extract_text_from_srt, normalize_response, parse_srt};

// Re-export main scraper API
pub use scraper::{DownsubScraper, ScrapeReport, ScraperConfig};
pub use state::{ScrapeRun, ScrapeState};

// Re-export data types
pub use types::{
    CaptionMetadata, CaptionResult, CaptionTrack, RawAggregatorResponse, RawSubtitle,
    SubtitleCue, TrackFormat, TrackUrls,
};

// Re-export URL helper functions for convenience
pub use url::{build_query_url, build_track_urls};
