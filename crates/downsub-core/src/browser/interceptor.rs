//! Per-request interception policy
//!
//! Decides for every paused page request whether it is aborted or
//! allowed, and records the first request that hits the caption API.

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::error::{DownsubError, Result};

/// Default pattern for advertising requests
pub const DEFAULT_AD_PATTERN: &str = "ads";

/// Default pattern for the aggregator's internal caption API
pub const DEFAULT_API_PATTERN: &str = r"^https://get-info\.downsub\.com/\?.*";

/// How a paused request is resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Abort,
    Allow,
}

/// Caption API URL captured during one navigation
///
/// Write-once: the first recorded URL wins and later ones are ignored.
#[derive(Debug, Default)]
pub struct CapturedEndpoint {
    slot: OnceLock<String>,
}

impl CapturedEndpoint {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `url` if nothing was recorded yet
    ///
    /// Returns `true` if this call stored the URL.
    pub fn record(&self, url: &str) -> bool {
        self.slot.set(url.to_string()).is_ok()
    }

    pub fn get(&self) -> Option<&str> {
        self.slot.get().map(String::as_str)
    }

    pub fn is_set(&self) -> bool {
        self.slot.get().is_some()
    }

    pub fn into_inner(self) -> Option<String> {
        self.slot.into_inner()
    }
}

/// Interception policy applied to every request of a page
///
/// In order: advertising requests are aborted; caption API requests are
/// recorded and aborted; everything else is allowed.
#[derive(Debug, Clone)]
pub struct RequestInterceptor {
    ad_pattern: Regex,
    api_pattern: Regex,
}

impl RequestInterceptor {
    /// Create an interceptor from the advertising and caption API patterns
    ///
    /// # Errors
    /// Returns `InvalidPattern` if either pattern is not a valid regex
    pub fn new(ad_pattern: &str, api_pattern: &str) -> Result<Self> {
        Ok(Self {
            ad_pattern: compile(ad_pattern)?,
            api_pattern: compile(api_pattern)?,
        })
    }

    /// Decide how to resolve a request, recording caption API hits
    pub fn inspect(&self, url: &str, captured: &CapturedEndpoint) -> Resolution {
        if self.ad_pattern.is_match(url) {
            debug!(url, "aborting ad request");
            return Resolution::Abort;
        }

        if self.api_pattern.is_match(url) {
            if captured.record(url) {
                debug!(url, "captured caption endpoint");
            } else {
                debug!(url, "ignoring repeated caption endpoint");
            }
            return Resolution::Abort;
        }

        Resolution::Allow
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| DownsubError::InvalidPattern(e.to_string()))
}
