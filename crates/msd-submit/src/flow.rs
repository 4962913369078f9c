//! Order submission state machine.
//!
//! # Design
//!
//! Explicit state machine for one order-placement attempt:
//!
//! ```text
//!                begin (clean report)        take_submission
//!   ──────►  Idle ────────────────► Confirming ────────────► Submitting
//!              ▲  ◄────────────────    │                        │
//!              │        cancel         │                        │
//!              │                       ▼                        ▼
//!              └──── acknowledge ── Succeeded (term.)       Failed (term.)
//! ```
//!
//! Two rules distinguish it from a broker-style OMS:
//!
//! 1. **Failed triggers are not errors.** A "place order" while already
//!    confirming, or a second confirm while submitting, is a deliberate
//!    no-op surfaced as an `Ignored`/`None` outcome — rapid duplicate
//!    triggering must never fire a second order-creation request.
//! 2. **Submission is a single-use grant.** `take_submission` moves the
//!    machine to `Submitting` and hands back a [`SubmissionGrant`] that the
//!    resolution methods consume. The grant cannot be constructed outside
//!    this module, so exactly one resolution per submission is enforced at
//!    compile time.

use msd_validate::ValidationReport;

// ---------------------------------------------------------------------------
// SubmitState
// ---------------------------------------------------------------------------

/// All states one order-placement attempt can occupy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitState {
    /// No attempt in progress; the cart is freely editable.
    Idle,
    /// Validation passed; the summary dialog is up awaiting confirmation.
    Confirming,
    /// The order-creation request is in flight.
    Submitting,
    /// The order was accepted. **Terminal** until acknowledged.
    Succeeded,
    /// The request failed; `message` is surfaced to the user. **Terminal**
    /// until acknowledged.
    Failed { message: String },
}

impl SubmitState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed { .. })
    }
}

impl Default for SubmitState {
    fn default() -> Self {
        SubmitState::Idle
    }
}

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// Result of a "place order" trigger.
#[derive(Debug, PartialEq)]
pub enum BeginOutcome {
    /// Validation was clean; the machine is now `Confirming`.
    Entered,
    /// Validation failed; the machine stayed in `Idle` and the report is
    /// returned for the caller to surface. No state transition on failure.
    Blocked(ValidationReport),
    /// The machine was not `Idle`; the trigger had no effect.
    Ignored,
}

/// Single-use proof that this caller moved the machine into `Submitting`.
///
/// Only [`OrderFlow::take_submission`] constructs one, and the resolution
/// methods consume it by value: one grant, one wire request, one resolution.
#[derive(Debug)]
pub struct SubmissionGrant {
    _priv: (),
}

// ---------------------------------------------------------------------------
// OrderFlow
// ---------------------------------------------------------------------------

/// The submission state machine. Holds no cart or catalog data — side
/// effects (clearing the cart, marking sources stale) are the session's job
/// on resolution.
#[derive(Debug, Clone, Default)]
pub struct OrderFlow {
    state: SubmitState,
}

impl OrderFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SubmitState {
        &self.state
    }

    /// The failure message when the machine is in `Failed`.
    pub fn failure_message(&self) -> Option<&str> {
        match &self.state {
            SubmitState::Failed { message } => Some(message),
            _ => None,
        }
    }

    /// `Idle → Confirming`, gated on a clean validation report.
    pub fn begin(&mut self, report: ValidationReport) -> BeginOutcome {
        if self.state != SubmitState::Idle {
            return BeginOutcome::Ignored;
        }
        if !report.is_clean() {
            return BeginOutcome::Blocked(report);
        }
        self.state = SubmitState::Confirming;
        BeginOutcome::Entered
    }

    /// `Confirming → Idle`. The summary dialog is cancellable without side
    /// effects. Returns `false` (no-op) in any other state.
    pub fn cancel(&mut self) -> bool {
        if self.state == SubmitState::Confirming {
            self.state = SubmitState::Idle;
            true
        } else {
            false
        }
    }

    /// `Confirming → Submitting`. Returns the single-use grant, or `None`
    /// when the machine is not `Confirming` — notably while a submission is
    /// already in flight, which makes duplicate triggers structurally unable
    /// to fire a second request.
    pub fn take_submission(&mut self) -> Option<SubmissionGrant> {
        if self.state != SubmitState::Confirming {
            return None;
        }
        self.state = SubmitState::Submitting;
        Some(SubmissionGrant { _priv: () })
    }

    /// `Submitting → Succeeded`. Consumes the grant.
    pub fn resolve_success(&mut self, grant: SubmissionGrant) {
        let _ = grant;
        self.state = SubmitState::Succeeded;
    }

    /// `Submitting → Failed`. Consumes the grant; `message` is surfaced
    /// verbatim to the user.
    pub fn resolve_failure(&mut self, grant: SubmissionGrant, message: impl Into<String>) {
        let _ = grant;
        self.state = SubmitState::Failed {
            message: message.into(),
        };
    }

    /// Terminal → `Idle` on the next user action (dismissing the toast,
    /// editing the cart). Returns `false` if the state was not terminal.
    pub fn acknowledge(&mut self) -> bool {
        if self.state.is_terminal() {
            self.state = SubmitState::Idle;
            true
        } else {
            false
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
