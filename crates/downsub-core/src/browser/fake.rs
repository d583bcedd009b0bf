//! Scripted in-memory browser for tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use futures::stream::{self, BoxStream};
use tokio::sync::watch;

use super::interceptor::Resolution;
use super::{BrowserHandle, BrowserLauncher, BrowserPage, PausedRequest};
use crate::error::{DownsubError, Result};

#[derive(Debug, Clone, Default)]
pub(crate) enum FakeNavigation {
    /// Finishes once every scripted request has been resolved
    #[default]
    Complete,
    /// Finishes immediately, ahead of any paused request
    Immediate,
    /// Never finishes
    Hang,
    Fail {
        name: String,
        message: String,
    },
}

#[derive(Debug, Clone, Default)]
pub(crate) struct FakeScript {
    pub fail_launch: bool,
    pub fail_new_page: bool,
    /// Makes every abort/allow fail as if the DevTools session died
    pub fail_resolution: bool,
    /// URLs the page requests while navigating, in order
    pub requests: Vec<String>,
    /// URLs requested by page script shortly after navigation finishes
    pub late_requests: Vec<String>,
    pub navigation: FakeNavigation,
}

#[derive(Debug, Default)]
struct Counters {
    launches: AtomicUsize,
    closes: AtomicUsize,
    resolutions: Mutex<Vec<(String, Resolution)>>,
}

#[derive(Debug, Clone)]
pub(crate) struct FakeLauncher {
    script: FakeScript,
    counters: Arc<Counters>,
}

impl FakeLauncher {
    pub fn new(script: FakeScript) -> Self {
        Self {
            script,
            counters: Arc::default(),
        }
    }

    pub fn launch_count(&self) -> usize {
        self.counters.launches.load(Ordering::SeqCst)
    }

    pub fn close_count(&self) -> usize {
        self.counters.closes.load(Ordering::SeqCst)
    }

    pub fn resolutions(&self) -> Vec<(String, Resolution)> {
        self.counters.resolutions.lock().unwrap().clone()
    }
}

pub(crate) struct FakeBrowser {
    script: FakeScript,
    counters: Arc<Counters>,
}

pub(crate) struct FakePage {
    script: FakeScript,
    counters: Arc<Counters>,
    resolved: watch::Sender<usize>,
    navigated: watch::Sender<bool>,
}

#[async_trait]
impl BrowserLauncher for FakeLauncher {
    type Browser = FakeBrowser;

    async fn launch(&self) -> Result<FakeBrowser> {
        self.counters.launches.fetch_add(1, Ordering::SeqCst);
        if self.script.fail_launch {
            return Err(DownsubError::Launch("no chrome binary".to_string()));
        }
        Ok(FakeBrowser {
            script: self.script.clone(),
            counters: Arc::clone(&self.counters),
        })
    }
}

#[async_trait]
impl BrowserHandle for FakeBrowser {
    type Page = FakePage;

    async fn new_page(&mut self) -> Result<FakePage> {
        if self.script.fail_new_page {
            return Err(DownsubError::Launch("target crashed".to_string()));
        }
        Ok(FakePage {
            script: self.script.clone(),
            counters: Arc::clone(&self.counters),
            resolved: watch::Sender::new(0),
            navigated: watch::Sender::new(false),
        })
    }

    async fn close(&mut self) -> Result<()> {
        self.counters.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl FakePage {
    fn record(&self, request: &PausedRequest, resolution: Resolution) -> Result<()> {
        if self.script.fail_resolution {
            return Err(DownsubError::Browser(
                "Fetch.continueRequest: session closed".to_string(),
            ));
        }
        self.counters
            .resolutions
            .lock()
            .unwrap()
            .push((request.url.clone(), resolution));
        self.resolved.send_modify(|count| *count += 1);
        Ok(())
    }
}

#[async_trait]
impl BrowserPage for FakePage {
    async fn intercept_requests(&self) -> Result<BoxStream<'static, PausedRequest>> {
        let early = self.script.requests.clone();
        let late = self.script.late_requests.clone();
        let offset = early.len();
        let mut navigated = self.navigated.subscribe();

        let early = stream::iter(early.into_iter().enumerate());
        let late = stream::once(async move {
            let _ = navigated.wait_for(|done| *done).await;
            tokio::time::sleep(Duration::from_millis(20)).await;
            stream::iter(late.into_iter().enumerate().map(move |(i, url)| (offset + i, url)))
        })
        .flatten();

        // A DevTools event stream stays open for the life of the page
        Ok(early
            .chain(late)
            .map(|(i, url)| PausedRequest {
                id: i.to_string(),
                url,
            })
            .chain(stream::pending())
            .boxed())
    }

    async fn abort(&self, request: &PausedRequest) -> Result<()> {
        self.record(request, Resolution::Abort)
    }

    async fn allow(&self, request: &PausedRequest) -> Result<()> {
        self.record(request, Resolution::Allow)
    }

    async fn goto(&self, _url: &str) -> Result<()> {
        match &self.script.navigation {
            FakeNavigation::Complete => {
                let total = self.script.requests.len();
                let mut resolved = self.resolved.subscribe();
                let _ = resolved.wait_for(|count| *count >= total).await;
                self.navigated.send_replace(true);
                Ok(())
            }
            FakeNavigation::Immediate => {
                self.navigated.send_replace(true);
                Ok(())
            }
            FakeNavigation::Hang => futures::future::pending().await,
            FakeNavigation::Fail { name, message } => Err(DownsubError::Navigation {
                name: name.clone(),
                message: message.clone(),
            }),
        }
    }
}
