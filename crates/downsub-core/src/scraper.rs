//! Main scraper API for DownSub
//!
//! Drives one browser session per call to capture the caption API
//! endpoint, then fetches and normalizes the captions behind it.

use std::time::Duration;

use serde::Deserialize;
use tracing::{info, warn};

use crate::browser::interceptor::{DEFAULT_AD_PATTERN, DEFAULT_API_PATTERN};
use crate::browser::{
    BrowserLauncher, BrowserSession, ChromiumLauncher, LaunchConfig, RequestInterceptor,
};
use crate::client::{CaptionClient, ClientConfig};
use crate::error::{DownsubError, ErrorKind, Result};
use crate::language::LanguageResolver;
use crate::parser::{normalize_response, parse_srt, YOUTUBE_SOURCE};
use crate::state::{ScrapeRun, ScrapeState};
use crate::types::{CaptionResult, CaptionTrack, SubtitleCue, TrackFormat};
use crate::url::{build_query_url, DEFAULT_BASE_URL};

/// Configuration for [`DownsubScraper`]
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Aggregator front page (default: "https://downsub.com")
    pub base_url: String,
    /// Regex matching the aggregator's internal caption API requests
    pub api_pattern: String,
    /// Regex matching advertising requests to block
    pub ad_pattern: String,
    /// Provider name the caption payload must report (default: "Youtube")
    pub expected_source: String,
    /// Deadline for capturing the endpoint in milliseconds (default: 60000)
    pub navigation_timeout_ms: u64,
    /// Quiet period after page load before giving up on a capture,
    /// in milliseconds (default: 500)
    pub network_idle_ms: u64,
    pub client: ClientConfig,
    pub browser: LaunchConfig,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_pattern: DEFAULT_API_PATTERN.to_string(),
            ad_pattern: DEFAULT_AD_PATTERN.to_string(),
            expected_source: YOUTUBE_SOURCE.to_string(),
            navigation_timeout_ms: 60_000,
            network_idle_ms: 500,
            client: ClientConfig::default(),
            browser: LaunchConfig::default(),
        }
    }
}

/// Outcome of a scrape together with the states it went through
#[derive(Debug)]
pub struct ScrapeReport {
    pub result: Result<CaptionResult>,
    pub history: Vec<ScrapeState>,
}

/// Main scraper API for DownSub
///
/// Each scrape launches its own browser, so one scraper can serve
/// concurrent calls without sharing interception state.
pub struct DownsubScraper<L: BrowserLauncher = ChromiumLauncher> {
    launcher: L,
    client: CaptionClient,
    resolver: LanguageResolver,
    interceptor: RequestInterceptor,
    config: ScraperConfig,
}

impl DownsubScraper<ChromiumLauncher> {
    /// Create a new scraper with default configuration
    ///
    /// # Errors
    /// Returns error if HTTP client initialization fails
    pub fn new() -> Result<Self> {
        Self::with_config(ScraperConfig::default())
    }

    /// Create a new scraper with custom configuration, driving local Chromium
    ///
    /// # Errors
    /// - `InvalidPattern` if a configured regex does not compile
    /// - `HttpError` if HTTP client initialization fails
    pub fn with_config(config: ScraperConfig) -> Result<Self> {
        let launcher = ChromiumLauncher::new(config.browser.clone());
        Self::with_launcher(config, launcher)
    }
}

impl<L: BrowserLauncher> DownsubScraper<L> {
    /// Create a scraper that drives browsers from `launcher`
    ///
    /// # Errors
    /// - `InvalidPattern` if a configured regex does not compile
    /// - `HttpError` if HTTP client initialization fails
    pub fn with_launcher(config: ScraperConfig, launcher: L) -> Result<Self> {
        let interceptor = RequestInterceptor::new(&config.ad_pattern, &config.api_pattern)?;
        let client = CaptionClient::with_config(&config.client)?;

        Ok(Self {
            launcher,
            client,
            resolver: LanguageResolver::default(),
            interceptor,
            config,
        })
    }

    /// Replace the language table used for track languages
    pub fn with_resolver(mut self, resolver: LanguageResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    /// Scrape the caption tracks of a video
    ///
    /// # Arguments
    /// * `video_url` - Source video URL (e.g., "https://www.youtube.com/watch?v=...")
    ///
    /// # Errors
    /// - `InvalidUrl` if `video_url` is empty or whitespace only
    /// - `Launch` if the browser cannot be started
    /// - `NavigationTimeout` / `Navigation` / `EndpointNotCaptured` from the capture stage
    /// - `HttpError` / `FetchStatus` / `MalformedResponse` from the fetch stage
    /// - `UnsupportedSource` if the aggregator reports another provider
    ///
    /// # Example
    /// ```no_run
    /// # async fn example() -> downsub_core::Result<()> {
    /// use downsub_core::DownsubScraper;
    /// let scraper = DownsubScraper::new()?;
    /// let captions = scraper
    ///     .scrape_captions("https://www.youtube.com/watch?v=dQw4w9WgXcQ")
    ///     .await?;
    /// for track in &captions.subtitles {
    ///     println!("{}: {}", track.language, track.urls.srt);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn scrape_captions(&self, video_url: &str) -> Result<CaptionResult> {
        self.scrape_with_trace(video_url).await.result
    }

    /// Scrape the caption tracks of a video and report the visited states
    pub async fn scrape_with_trace(&self, video_url: &str) -> ScrapeReport {
        let mut run = ScrapeRun::new();
        let result = self.run_scrape(video_url, &mut run).await;

        match &result {
            Ok(captions) => info!(
                video_url,
                subtitles = captions.subtitles.len(),
                translations = captions.translations.len(),
                "scrape finished"
            ),
            Err(e) => warn!(video_url, error = %e, kind = ?e.kind(), "scrape failed"),
        }

        ScrapeReport {
            result,
            history: run.into_history(),
        }
    }

    async fn run_scrape(&self, video_url: &str, run: &mut ScrapeRun) -> Result<CaptionResult> {
        let video_url = video_url.trim();
        if video_url.is_empty() {
            run.advance(ScrapeState::Failed);
            return Err(DownsubError::InvalidUrl(
                "Video URL cannot be empty".to_string(),
            ));
        }

        info!(video_url, "scrape started");

        run.advance(ScrapeState::Launching);
        let session = match BrowserSession::open(&self.launcher).await {
            Ok(session) => session,
            Err(e) => return Err(fail(run, e)),
        };

        run.advance(ScrapeState::Navigating);
        let target_url = build_query_url(&self.config.base_url, video_url);
        let timeout = Duration::from_millis(self.config.navigation_timeout_ms);
        let idle = Duration::from_millis(self.config.network_idle_ms);
        let captured = session
            .navigate_and_capture(&target_url, timeout, idle, &self.interceptor)
            .await;

        match &captured {
            Ok(_) => run.advance(ScrapeState::Captured),
            Err(e) => match e.kind() {
                ErrorKind::NavigationTimeout => run.advance(ScrapeState::TimedOut),
                ErrorKind::Navigation => run.advance(ScrapeState::NavigationError),
                _ => {}
            },
        }

        // The browser is released on every path before anything else runs
        if let Err(e) = session.close().await {
            warn!(error = %e, "failed to close browser session");
        }

        let endpoint = captured.map_err(|e| fail(run, e))?;

        run.advance(ScrapeState::Fetching);
        let raw = self
            .client
            .fetch_captions(&endpoint)
            .await
            .map_err(|e| fail(run, e))?;

        run.advance(ScrapeState::Normalizing);
        let captions = normalize_response(raw, &self.config.expected_source, &self.resolver)
            .map_err(|e| fail(run, e))?;

        run.advance(ScrapeState::Done);
        Ok(captions)
    }

    /// Download one caption track in the given format
    ///
    /// # Errors
    /// - `HttpError` if the network request fails
    /// - `FetchStatus` if the subtitle service answers with a non-2xx status
    pub async fn download_track(&self, track: &CaptionTrack, format: TrackFormat) -> Result<String> {
        self.client.fetch_text(track.urls.get(format)).await
    }

    /// Download a caption track as SRT and parse it into cues
    ///
    /// # Errors
    /// Same as [`download_track`](Self::download_track)
    pub async fn download_cues(&self, track: &CaptionTrack) -> Result<Vec<SubtitleCue>> {
        let srt = self.download_track(track, TrackFormat::Srt).await?;
        Ok(parse_srt(&srt))
    }
}

fn fail(run: &mut ScrapeRun, error: DownsubError) -> DownsubError {
    run.advance(ScrapeState::Failed);
    error
}
