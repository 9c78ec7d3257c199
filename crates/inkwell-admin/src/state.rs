//! Request lifecycle state shared by every widget

/// Where a request stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestStatus {
    /// Never triggered
    Idle,
    /// Dispatched, not yet settled
    Loading,
    /// Settled with data
    Success,
    /// Settled with an error message
    Failure,
}

/// `{ data, loading, error }` for one remote operation
///
/// At rest `data` and `error` are never both set; [`RequestState::begin`]
/// clears both before dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestState<T> {
    data: Option<T>,
    loading: bool,
    error: Option<String>,
}

impl<T> Default for RequestState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

impl<T> RequestState<T> {
    /// Fresh state with nothing loaded
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear previous results and mark the request in flight
    pub fn begin(&mut self) {
        self.data = None;
        self.error = None;
        self.loading = true;
    }

    /// Store a successful result
    pub fn succeed(&mut self, data: T) {
        self.data = Some(data);
        self.error = None;
        self.loading = false;
    }

    /// Store a failure message; data stays empty
    pub fn fail(&mut self, message: impl Into<String>) {
        self.data = None;
        self.error = Some(message.into());
        self.loading = false;
    }

    /// Apply an outcome
    pub fn settle(&mut self, outcome: Result<T, String>) {
        match outcome {
            Ok(data) => self.succeed(data),
            Err(message) => self.fail(message),
        }
    }

    /// Abandon an in-flight request without recording a result
    pub fn cancel(&mut self) {
        self.loading = false;
    }

    /// Loaded data, if any
    #[must_use]
    pub const fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Error message, if the last request failed
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether a request is in flight
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Current status
    #[must_use]
    pub fn status(&self) -> RequestStatus {
        match (self.loading, &self.data, &self.error) {
            (true, _, _) => RequestStatus::Loading,
            (false, Some(_), _) => RequestStatus::Success,
            (false, None, Some(_)) => RequestStatus::Failure,
            (false, None, None) => RequestStatus::Idle,
        }
    }
}

/// Identifies one dispatched request
///
/// A ticket is only honoured if no newer request was dispatched and the
/// owning widget is still mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
}

/// Monotonic request counter with mount tracking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    current: u64,
    mounted: bool,
}

impl Default for Generation {
    fn default() -> Self {
        Self {
            current: 0,
            mounted: true,
        }
    }
}

impl Generation {
    /// Issue a ticket that supersedes every earlier one
    pub const fn issue(&mut self) -> Ticket {
        self.current += 1;
        Ticket {
            generation: self.current,
        }
    }

    /// Whether a ticket is the latest and its owner is still mounted
    #[must_use]
    pub const fn accepts(&self, ticket: Ticket) -> bool {
        self.mounted && ticket.generation == self.current
    }

    /// Invalidate every outstanding ticket
    pub const fn invalidate(&mut self) {
        self.current += 1;
    }

    /// Stop accepting any ticket
    pub const fn unmount(&mut self) {
        self.mounted = false;
        self.invalidate();
    }

    /// Whether the owner is mounted
    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.mounted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_state_is_idle() {
        let state: RequestState<u32> = RequestState::new();

        assert_eq!(state.status(), RequestStatus::Idle);
        assert!(!state.is_loading());
        assert!(state.data().is_none());
        assert!(state.error().is_none());
    }

    #[test]
    fn test_begin_clears_previous_results() {
        let mut state = RequestState::new();
        state.succeed(7);
        state.begin();

        assert_eq!(state.status(), RequestStatus::Loading);
        assert!(state.data().is_none());

        state.fail("timeout");
        state.begin();
        assert!(state.error().is_none());
        assert!(state.is_loading());
    }

    #[test]
    fn test_data_and_error_are_exclusive() {
        let mut state = RequestState::new();

        state.begin();
        state.settle(Err("HTTP 500: boom".to_string()));
        assert_eq!(state.status(), RequestStatus::Failure);
        assert_eq!(state.error(), Some("HTTP 500: boom"));
        assert!(state.data().is_none());

        state.begin();
        state.settle(Ok(42));
        assert_eq!(state.status(), RequestStatus::Success);
        assert_eq!(state.data(), Some(&42));
        assert!(state.error().is_none());
    }

    #[test]
    fn test_cancel_clears_loading_only() {
        let mut state: RequestState<u8> = RequestState::new();
        state.begin();
        state.cancel();

        assert_eq!(state.status(), RequestStatus::Idle);
    }

    #[test]
    fn test_newer_ticket_supersedes_older() {
        let mut generation = Generation::default();
        let first = generation.issue();
        let second = generation.issue();

        assert!(!generation.accepts(first));
        assert!(generation.accepts(second));
    }

    #[test]
    fn test_unmount_rejects_outstanding_tickets() {
        let mut generation = Generation::default();
        let ticket = generation.issue();

        generation.unmount();

        assert!(!generation.is_mounted());
        assert!(!generation.accepts(ticket));
    }
}
