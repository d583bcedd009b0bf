//! Headless browser automation
//!
//! The scraper only needs five primitives from a browser: launch a
//! process, open a page, intercept the page's requests, navigate, and
//! close. They are expressed as traits so the Chrome DevTools binding in
//! [`chromium`] can be swapped for another engine or a scripted fake.

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::error::Result;

pub mod chromium;
pub mod interceptor;
pub mod session;

#[cfg(test)]
pub(crate) mod fake;

pub use chromium::{ChromiumLauncher, LaunchConfig};
pub use interceptor::{CapturedEndpoint, RequestInterceptor, Resolution};
pub use session::BrowserSession;

/// A page request held by the browser until it is aborted or allowed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PausedRequest {
    /// Engine-specific request identifier
    pub id: String,
    pub url: String,
}

/// Starts browser processes
#[async_trait]
pub trait BrowserLauncher: Send + Sync {
    type Browser: BrowserHandle;

    /// Launch one browser process
    ///
    /// # Errors
    /// Returns `Launch` if the process cannot be started
    async fn launch(&self) -> Result<Self::Browser>;
}

/// A running browser process
#[async_trait]
pub trait BrowserHandle: Send {
    type Page: BrowserPage;

    /// Open a blank page
    async fn new_page(&mut self) -> Result<Self::Page>;

    /// Terminate the browser process
    async fn close(&mut self) -> Result<()>;
}

/// One browser page
#[async_trait]
pub trait BrowserPage: Send + Sync {
    /// Turn on interception mode and return the stream of paused requests
    ///
    /// Every request yielded must later be passed to [`abort`](Self::abort)
    /// or [`allow`](Self::allow), otherwise the page stalls.
    async fn intercept_requests(&self) -> Result<BoxStream<'static, PausedRequest>>;

    /// Fail a paused request without sending it
    async fn abort(&self, request: &PausedRequest) -> Result<()>;

    /// Let a paused request continue to the network
    async fn allow(&self, request: &PausedRequest) -> Result<()>;

    /// Navigate to `url` and wait for the page to load
    ///
    /// # Errors
    /// Returns `Navigation` if the navigation itself fails
    async fn goto(&self, url: &str) -> Result<()>;
}
