//! Feature-flag toggle: read the flag, write its negation, reconcile

use crate::backend::AdminBackend;
use crate::state::{Generation, Ticket};
use crate::widgets::status::StatusWidget;
use inkwell_core::FeatureFlag;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Default lifetime of a success notice
pub const DEFAULT_NOTICE_TTL: Duration = Duration::from_secs(3);

/// Write-path phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No write in flight
    Idle,
    /// Write sent, waiting for the server to confirm
    Tentative {
        /// Value sent to the server
        desired: bool,
    },
    /// Write failed; waiting for a re-read of the server value
    Reconciling,
}

/// Handle for one in-flight write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleIntent {
    ticket: Ticket,
    desired: bool,
}

impl ToggleIntent {
    /// Value sent to the server
    #[must_use]
    pub const fn desired(&self) -> bool {
        self.desired
    }
}

/// Transient success message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    message: String,
    expires_at: Instant,
}

impl Notice {
    /// Message text
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether the notice is still visible at `now`
    #[must_use]
    pub fn is_visible_at(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Two-phase toggle over a backend-owned flag
///
/// The cached value only changes when the server reports one: on a read,
/// or from the body of a successful write. A failed write records an error,
/// which stays until the next toggle attempt, and re-reads the flag. Only
/// that re-read ends reconciliation; reads sent before the failure are
/// superseded by it.
#[derive(Debug, Clone)]
pub struct ToggleWidget {
    read: StatusWidget<FeatureFlag>,
    cached: Option<FeatureFlag>,
    phase: Phase,
    reconcile: Option<Ticket>,
    writes: Generation,
    error: Option<String>,
    notice: Option<Notice>,
    notice_ttl: Duration,
}

impl ToggleWidget {
    /// Create a widget with the default notice lifetime
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self::with_notice_ttl(name, DEFAULT_NOTICE_TTL)
    }

    /// Create a widget with a custom notice lifetime
    #[must_use]
    pub fn with_notice_ttl(name: &'static str, notice_ttl: Duration) -> Self {
        Self {
            read: StatusWidget::new(name),
            cached: None,
            phase: Phase::Idle,
            reconcile: None,
            writes: Generation::default(),
            error: None,
            notice: None,
            notice_ttl,
        }
    }

    /// Widget name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.read.name()
    }

    /// Start a read of the flag
    pub fn begin_fetch(&mut self) -> Option<Ticket> {
        self.read.trigger()
    }

    /// Apply a read result; returns `false` if it was discarded
    pub fn settle_fetch(&mut self, ticket: Ticket, outcome: Result<FeatureFlag, String>) -> bool {
        if !self.read.settle(ticket, outcome) {
            return false;
        }
        if let Some(flag) = self.read.data() {
            self.cached = Some(*flag);
        }
        if self.phase == Phase::Reconciling && self.reconcile == Some(ticket) {
            match self.read.error() {
                Some(error) => warn!(widget = self.name(), %error, "re-read after failed write failed"),
                None => debug!(widget = self.name(), "reconciled with server"),
            }
            self.reconcile = None;
            self.phase = Phase::Idle;
        }
        true
    }

    /// Start a write of the negated cached value
    ///
    /// Returns `None` while any request is in flight. An unknown cached
    /// value counts as disabled.
    pub fn begin_toggle(&mut self) -> Option<ToggleIntent> {
        if !self.read.is_mounted() || self.is_busy() {
            debug!(widget = self.name(), "toggle ignored");
            return None;
        }

        let desired = !self.cached.is_some_and(|flag| flag.enabled);
        self.error = None;
        self.notice = None;
        self.phase = Phase::Tentative { desired };

        Some(ToggleIntent {
            ticket: self.writes.issue(),
            desired,
        })
    }

    /// Adopt the server's value after a successful write
    pub fn confirm(&mut self, intent: ToggleIntent, server: FeatureFlag, now: Instant) -> bool {
        if !self.accepts(intent) {
            return false;
        }
        if server.enabled != intent.desired {
            warn!(
                widget = self.name(),
                desired = intent.desired,
                stored = server.enabled,
                "server stored a different value than requested"
            );
        }

        self.cached = Some(server);
        self.phase = Phase::Idle;
        let message = format!("Coming soon mode {}", server.label().to_lowercase());
        info!(widget = self.name(), %message, "flag updated");
        self.notice = Some(Notice {
            message,
            expires_at: now + self.notice_ttl,
        });
        true
    }

    /// Record a failed write and start the re-read that reconciles it
    ///
    /// The returned ticket supersedes any read already in flight, and only
    /// settling it with [`settle_fetch`](Self::settle_fetch) returns the
    /// widget to [`Phase::Idle`]. Returns `None` for a stale intent.
    pub fn revert(&mut self, intent: ToggleIntent, message: impl Into<String>) -> Option<Ticket> {
        if !self.accepts(intent) {
            return None;
        }
        let message = message.into();
        warn!(widget = self.name(), %message, "flag update failed");
        self.error = Some(message);

        let ticket = self.read.retrigger();
        self.reconcile = ticket;
        self.phase = if ticket.is_some() {
            Phase::Reconciling
        } else {
            Phase::Idle
        };
        ticket
    }

    fn accepts(&self, intent: ToggleIntent) -> bool {
        self.writes.accepts(intent.ticket)
            && matches!(self.phase, Phase::Tentative { desired } if desired == intent.desired)
    }

    /// Read the flag from the backend
    pub async fn fetch_status<B: AdminBackend + ?Sized>(&mut self, backend: &B) -> bool {
        let Some(ticket) = self.begin_fetch() else {
            return false;
        };
        self.read_flag(ticket, backend).await
    }

    async fn read_flag<B: AdminBackend + ?Sized>(&mut self, ticket: Ticket, backend: &B) -> bool {
        let outcome = backend.coming_soon().await.map_err(|e| e.to_string());
        self.settle_fetch(ticket, outcome)
    }

    /// Flip the flag on the backend
    ///
    /// On success the server's value is adopted. On failure the error is
    /// recorded and the flag is re-read so the cached value matches the
    /// server again.
    pub async fn toggle<B: AdminBackend + ?Sized>(&mut self, backend: &B) -> bool {
        let Some(intent) = self.begin_toggle() else {
            return false;
        };

        match backend.set_coming_soon(intent.desired).await {
            Ok(flag) => self.confirm(intent, flag, Instant::now()),
            Err(e) => {
                let message = format!("Failed to update coming soon mode: {e}");
                if let Some(ticket) = self.revert(intent, message) {
                    self.read_flag(ticket, backend).await;
                }
                false
            }
        }
    }

    /// Stop accepting responses
    pub fn unmount(&mut self) {
        self.read.unmount();
        self.writes.unmount();
        self.reconcile = None;
        self.phase = Phase::Idle;
    }

    /// Whether a read or write is in flight
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.read.is_loading() || self.phase != Phase::Idle
    }

    /// Last value reported by the server
    #[must_use]
    pub const fn cached(&self) -> Option<FeatureFlag> {
        self.cached
    }

    /// Current write phase
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Read-path state
    #[must_use]
    pub const fn read(&self) -> &StatusWidget<FeatureFlag> {
        &self.read
    }

    /// Error from the last failed toggle
    #[must_use]
    pub fn toggle_error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Success notice, if still visible now
    #[must_use]
    pub fn notice(&self) -> Option<&Notice> {
        self.notice_at(Instant::now())
    }

    /// Success notice, if still visible at `now`
    #[must_use]
    pub fn notice_at(&self, now: Instant) -> Option<&Notice> {
        self.notice.as_ref().filter(|notice| notice.is_visible_at(now))
    }

    /// Drop an expired notice
    pub fn expire_notice(&mut self, now: Instant) {
        if self.notice.as_ref().is_some_and(|notice| !notice.is_visible_at(now)) {
            self.notice = None;
        }
    }
}
