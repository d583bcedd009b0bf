//! Browser session lifecycle
//!
//! Owns one browser process and one page for the duration of a single
//! scrape, and races navigation against request interception.

use std::time::Duration;

use futures::StreamExt;
use futures::stream::BoxStream;
use tracing::{debug, warn};

use super::interceptor::{CapturedEndpoint, RequestInterceptor, Resolution};
use super::{BrowserHandle, BrowserLauncher, BrowserPage, PausedRequest};
use crate::error::{DownsubError, Result};

/// One browser process with one page
///
/// [`close`](Self::close) consumes the session, so it runs at most once.
pub struct BrowserSession<B: BrowserHandle> {
    browser: B,
    page: B::Page,
}

impl<B: BrowserHandle> BrowserSession<B> {
    /// Launch a browser and open its page
    ///
    /// If the page cannot be opened the browser is closed again before
    /// the error is returned.
    pub async fn open<L>(launcher: &L) -> Result<Self>
    where
        L: BrowserLauncher<Browser = B>,
    {
        let mut browser = launcher.launch().await?;

        match browser.new_page().await {
            Ok(page) => Ok(Self { browser, page }),
            Err(e) => {
                if let Err(close_err) = browser.close().await {
                    warn!(error = %close_err, "failed to close browser after page error");
                }
                Err(e)
            }
        }
    }

    /// Navigate to `target_url` and wait for the caption API request
    ///
    /// Paused requests are resolved while the page loads. Once navigation
    /// finishes, resolution continues until no request has been paused
    /// for `idle`, since the aggregator issues its API call from script
    /// after the load event. `timeout` bounds the whole operation.
    ///
    /// # Errors
    /// - `NavigationTimeout` - Nothing was captured before the deadline
    /// - `Navigation` - The navigation itself failed
    /// - `EndpointNotCaptured` - The page settled without a match
    /// - `Browser` - A paused request could not be resolved
    pub async fn navigate_and_capture(
        &self,
        target_url: &str,
        timeout: Duration,
        idle: Duration,
        interceptor: &RequestInterceptor,
    ) -> Result<String> {
        let captured = CapturedEndpoint::new();
        let mut requests = self.page.intercept_requests().await?;

        debug!(target_url, "navigating");

        let capture = capture_endpoint(
            &self.page,
            target_url,
            &mut requests,
            idle,
            interceptor,
            &captured,
        );
        let outcome = tokio::time::timeout(timeout, capture).await;

        match outcome {
            Err(_) => Err(DownsubError::NavigationTimeout {
                timeout_ms: timeout.as_millis() as u64,
            }),
            Ok(Err(e)) => Err(e),
            Ok(Ok(())) => captured
                .into_inner()
                .ok_or(DownsubError::EndpointNotCaptured),
        }
    }

    /// Terminate the browser process
    pub async fn close(mut self) -> Result<()> {
        self.browser.close().await
    }
}

/// Drives navigation and request resolution until the endpoint is
/// captured or the page settles
///
/// Pending requests are always taken before the navigation result, and
/// a request is resolved to completion once taken, so a match that is
/// already paused when the load finishes is never lost.
async fn capture_endpoint<P: BrowserPage>(
    page: &P,
    target_url: &str,
    requests: &mut BoxStream<'static, PausedRequest>,
    idle: Duration,
    interceptor: &RequestInterceptor,
    captured: &CapturedEndpoint,
) -> Result<()> {
    let navigation = page.goto(target_url);
    tokio::pin!(navigation);
    let mut navigated = false;

    while !captured.is_set() {
        if navigated {
            match tokio::time::timeout(idle, requests.next()).await {
                Ok(Some(request)) => resolve(page, &request, interceptor, captured).await?,
                Ok(None) | Err(_) => break,
            }
            continue;
        }

        tokio::select! {
            biased;
            request = requests.next() => match request {
                Some(request) => resolve(page, &request, interceptor, captured).await?,
                None => {
                    navigation.as_mut().await?;
                    break;
                }
            },
            result = &mut navigation => {
                result?;
                debug!(target_url, "navigation finished, waiting for network idle");
                navigated = true;
            }
        }
    }

    Ok(())
}

async fn resolve<P: BrowserPage>(
    page: &P,
    request: &PausedRequest,
    interceptor: &RequestInterceptor,
    captured: &CapturedEndpoint,
) -> Result<()> {
    match interceptor.inspect(&request.url, captured) {
        Resolution::Abort => page.abort(request).await,
        Resolution::Allow => page.allow(request).await,
    }
}
