//! Generic async status widget: Idle, Loading, then Success or Failure

use crate::error::ApiResult;
use crate::state::{Generation, RequestState, RequestStatus, Ticket};
use std::future::Future;
use tracing::{debug, warn};

/// Drives one remote read and owns its [`RequestState`]
///
/// [`trigger`](Self::trigger) is ignored while a request is in flight.
/// [`retrigger`](Self::retrigger) supersedes the in-flight request instead;
/// the superseded response is then dropped when it arrives. Responses that
/// arrive after [`unmount`](Self::unmount) are dropped as well.
#[derive(Debug, Clone)]
pub struct StatusWidget<T> {
    name: &'static str,
    state: RequestState<T>,
    generation: Generation,
}

impl<T> StatusWidget<T> {
    /// Create an idle widget
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            state: RequestState::new(),
            generation: Generation::default(),
        }
    }

    /// Widget name used in logs and rendering
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Start a request unless one is already in flight
    pub fn trigger(&mut self) -> Option<Ticket> {
        if !self.generation.is_mounted() {
            debug!(widget = self.name, "trigger ignored: unmounted");
            return None;
        }
        if self.state.is_loading() {
            debug!(widget = self.name, "trigger ignored: request in flight");
            return None;
        }
        Some(self.dispatch())
    }

    /// Start a request, superseding any request in flight
    pub fn retrigger(&mut self) -> Option<Ticket> {
        if !self.generation.is_mounted() {
            return None;
        }
        Some(self.dispatch())
    }

    fn dispatch(&mut self) -> Ticket {
        self.state.begin();
        let ticket = self.generation.issue();
        debug!(widget = self.name, "request dispatched");
        ticket
    }

    /// Apply a response; returns `false` if the ticket is stale
    pub fn settle(&mut self, ticket: Ticket, outcome: Result<T, String>) -> bool {
        if !self.generation.accepts(ticket) {
            debug!(widget = self.name, "discarding superseded response");
            return false;
        }
        if let Err(message) = &outcome {
            warn!(widget = self.name, %message, "request failed");
        } else {
            debug!(widget = self.name, "request succeeded");
        }
        self.state.settle(outcome);
        true
    }

    /// Trigger, await `fetch`, and settle
    ///
    /// Returns `false` if the trigger was ignored or the response discarded.
    pub async fn refresh<F, Fut>(&mut self, fetch: F) -> bool
    where
        T: Send,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = ApiResult<T>> + Send,
    {
        let Some(ticket) = self.trigger() else {
            return false;
        };
        let outcome = fetch().await.map_err(|e| e.to_string());
        self.settle(ticket, outcome)
    }

    /// Stop accepting responses; any in-flight request is abandoned
    pub fn unmount(&mut self) {
        self.generation.unmount();
        self.state.cancel();
    }

    /// Whether the widget is still mounted
    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.generation.is_mounted()
    }

    /// Underlying request state
    #[must_use]
    pub const fn state(&self) -> &RequestState<T> {
        &self.state
    }

    /// Loaded data, if any
    #[must_use]
    pub const fn data(&self) -> Option<&T> {
        self.state.data()
    }

    /// Error message, if the last request failed
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.state.error()
    }

    /// Whether a request is in flight
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    /// Current status
    #[must_use]
    pub fn status(&self) -> RequestStatus {
        self.state.status()
    }
}
