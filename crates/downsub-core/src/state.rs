//! Scrape lifecycle states

use serde::Serialize;
use tracing::debug;

/// Stage of a single scrape
///
/// `Done` and `Failed` are terminal. Navigation ends in `Captured`,
/// `TimedOut`, `NavigationError`, or straight in `Failed` when it settles
/// without a caption API request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrapeState {
    Idle,
    Launching,
    Navigating,
    Captured,
    Fetching,
    Normalizing,
    Done,
    TimedOut,
    NavigationError,
    Failed,
}

impl ScrapeState {
    pub fn is_terminal(self) -> bool {
        matches!(self, ScrapeState::Done | ScrapeState::Failed)
    }

    /// Whether `next` is a legal successor of this state
    pub fn can_advance_to(self, next: ScrapeState) -> bool {
        use ScrapeState::*;

        matches!(
            (self, next),
            (Idle, Launching)
                | (Idle, Failed)
                | (Launching, Navigating)
                | (Launching, Failed)
                | (Navigating, Captured)
                | (Navigating, TimedOut)
                | (Navigating, NavigationError)
                | (Navigating, Failed)
                | (Captured, Fetching)
                | (Fetching, Normalizing)
                | (Fetching, Failed)
                | (Normalizing, Done)
                | (Normalizing, Failed)
                | (TimedOut, Failed)
                | (NavigationError, Failed)
        )
    }
}

/// State history of one scrape
#[derive(Debug, Clone)]
pub struct ScrapeRun {
    history: Vec<ScrapeState>,
}

impl ScrapeRun {
    pub fn new() -> Self {
        Self {
            history: vec![ScrapeState::Idle],
        }
    }

    pub fn state(&self) -> ScrapeState {
        // history always starts with Idle
        self.history[self.history.len() - 1]
    }

    /// Move to `next`, recording the transition
    pub fn advance(&mut self, next: ScrapeState) {
        let current = self.state();
        debug_assert!(
            current.can_advance_to(next),
            "illegal scrape transition {:?} -> {:?}",
            current,
            next
        );
        debug!(from = ?current, to = ?next, "scrape state");
        self.history.push(next);
    }

    pub fn history(&self) -> &[ScrapeState] {
        &self.history
    }

    pub fn into_history(self) -> Vec<ScrapeState> {
        self.history
    }
}

impl Default for ScrapeRun {
    fn default() -> Self {
        Self::new()
    }
}
