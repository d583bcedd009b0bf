//! Chrome DevTools Protocol binding
//!
//! Launches headless Chromium through `chromiumoxide` and implements
//! request interception with the CDP Fetch domain.

use std::path::PathBuf;
use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::fetch::{
    ContinueRequestParams, EnableParams, EventRequestPaused, FailRequestParams, RequestId,
};
use chromiumoxide::cdp::browser_protocol::network::ErrorReason;
use chromiumoxide::error::CdpError;
use chromiumoxide::{Browser, BrowserConfig, Handler, Page};
use futures::StreamExt;
use futures::stream::BoxStream;
use regex::Regex;
use serde::Deserialize;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::{BrowserHandle, BrowserLauncher, BrowserPage, PausedRequest};
use crate::error::{DownsubError, Result};

static NET_ERROR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"net::(ERR_[A-Z_]+)").expect("valid net error regex"));

/// Browser launch configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LaunchConfig {
    /// Run without a window (default: true)
    pub headless: bool,
    /// Chrome/Chromium binary; auto-detected when unset
    pub chrome_executable: Option<PathBuf>,
    /// Pass `--no-sandbox`, needed in most containers (default: true)
    pub no_sandbox: bool,
    /// Timeout for single DevTools commands in seconds (default: 90)
    pub request_timeout_secs: u64,
    /// Additional Chrome arguments
    pub chrome_args: Vec<String>,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            headless: true,
            chrome_executable: None,
            no_sandbox: true,
            request_timeout_secs: 90,
            chrome_args: vec![
                "--disable-dev-shm-usage".to_string(),
                "--disable-gpu".to_string(),
                "--disable-extensions".to_string(),
            ],
        }
    }
}

/// Launches local Chromium processes
#[derive(Debug, Clone, Default)]
pub struct ChromiumLauncher {
    config: LaunchConfig,
}

impl ChromiumLauncher {
    pub fn new(config: LaunchConfig) -> Self {
        Self { config }
    }

    fn browser_config(&self) -> Result<BrowserConfig> {
        let mut builder = BrowserConfig::builder()
            .request_timeout(Duration::from_secs(self.config.request_timeout_secs));

        if let Some(ref path) = self.config.chrome_executable {
            builder = builder.chrome_executable(path);
        }

        // with_head means NOT headless
        if !self.config.headless {
            builder = builder.with_head();
        }

        if self.config.no_sandbox {
            builder = builder.no_sandbox();
        }

        for arg in &self.config.chrome_args {
            builder = builder.arg(arg.as_str());
        }

        builder.build().map_err(DownsubError::Launch)
    }
}

/// Running Chromium process and its CDP event loop
pub struct ChromiumBrowser {
    browser: Browser,
    handler_task: HandlerTask,
}

/// CDP event loop task, aborted when dropped
///
/// Keeps the loop from outliving a scrape future that is dropped before
/// the session is closed.
struct HandlerTask(JoinHandle<()>);

impl HandlerTask {
    fn spawn(mut handler: Handler) -> Self {
        Self(tokio::spawn(async move {
            // Unknown CDP messages surface as errors here; they are not fatal
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    warn!(error = %e, "browser handler event error");
                }
            }
            debug!("browser handler stopped");
        }))
    }
}

impl Drop for HandlerTask {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Chromium page driven over CDP
pub struct ChromiumPage {
    page: Page,
}

#[async_trait]
impl BrowserLauncher for ChromiumLauncher {
    type Browser = ChromiumBrowser;

    async fn launch(&self) -> Result<ChromiumBrowser> {
        info!(headless = self.config.headless, "launching browser");

        let config = self.browser_config()?;
        let (browser, handler) = Browser::launch(config)
            .await
            .map_err(|e| DownsubError::Launch(e.to_string()))?;
        let handler_task = HandlerTask::spawn(handler);

        Ok(ChromiumBrowser {
            browser,
            handler_task,
        })
    }
}

#[async_trait]
impl BrowserHandle for ChromiumBrowser {
    type Page = ChromiumPage;

    async fn new_page(&mut self) -> Result<ChromiumPage> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| DownsubError::Launch(e.to_string()))?;
        Ok(ChromiumPage { page })
    }

    async fn close(&mut self) -> Result<()> {
        let closed = self.browser.close().await;

        if let Err(ref e) = closed {
            warn!(error = %e, "graceful browser close failed, killing process");
            if let Some(Err(kill_err)) = self.browser.kill().await {
                warn!(error = %kill_err, "failed to kill browser process");
            }
        } else if let Err(e) = self.browser.wait().await {
            debug!(error = %e, "failed to reap browser process");
        }

        self.handler_task.0.abort();

        closed
            .map(|_| ())
            .map_err(|e| DownsubError::Browser(e.to_string()))
    }
}

#[async_trait]
impl BrowserPage for ChromiumPage {
    async fn intercept_requests(&self) -> Result<BoxStream<'static, PausedRequest>> {
        // Subscribe before enabling so no paused request is missed
        let events = self
            .page
            .event_listener::<EventRequestPaused>()
            .await
            .map_err(protocol_error)?;

        self.page
            .execute(EnableParams::default())
            .await
            .map_err(protocol_error)?;

        Ok(events
            .map(|event| PausedRequest {
                id: event.request_id.inner().clone(),
                url: event.request.url.clone(),
            })
            .boxed())
    }

    async fn abort(&self, request: &PausedRequest) -> Result<()> {
        self.page
            .execute(FailRequestParams::new(
                RequestId::new(request.id.clone()),
                ErrorReason::BlockedByClient,
            ))
            .await
            .map_err(protocol_error)?;
        Ok(())
    }

    async fn allow(&self, request: &PausedRequest) -> Result<()> {
        self.page
            .execute(ContinueRequestParams::new(RequestId::new(request.id.clone())))
            .await
            .map_err(protocol_error)?;
        Ok(())
    }

    async fn goto(&self, url: &str) -> Result<()> {
        self.page.goto(url).await.map_err(navigation_error)?;
        Ok(())
    }
}

fn protocol_error(err: CdpError) -> DownsubError {
    DownsubError::Browser(err.to_string())
}

fn navigation_error(err: CdpError) -> DownsubError {
    let message = err.to_string();
    let name = navigation_failure_name(matches!(err, CdpError::Timeout), &message);
    DownsubError::Navigation { name, message }
}

/// Names a navigation failure the way the error message table expects
///
/// CDP timeouts become `TimeoutError`; Chrome network errors keep their
/// `ERR_*` code; anything else is a generic `NavigationError`.
fn navigation_failure_name(timed_out: bool, message: &str) -> String {
    if timed_out {
        return "TimeoutError".to_string();
    }

    NET_ERROR
        .captures(message)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| "NavigationError".to_string())
}
