//! Per-attempt lifecycle state
//!
//! The state machine doubles as the duplicate-processing guard: the first
//! outcome event claims the `Processing` slot before any awaited work runs,
//! so a retransmitted or re-entrant delivery finds the slot taken and is
//! swallowed.

/// Lifecycle of one payment attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptState {
    /// No gateway session requested yet (or the last initiation failed).
    Idle,
    /// Session initiation request in flight.
    Initiated,
    /// Gateway session handed to the renderer; listening for an outcome.
    AwaitingOutcome,
    /// First outcome claimed; write chain executing.
    Processing,
    /// Navigation issued; no further events are acted on.
    Terminal,
}

impl std::fmt::Display for AttemptState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = match self {
            AttemptState::Idle => "idle",
            AttemptState::Initiated => "initiated",
            AttemptState::AwaitingOutcome => "awaiting_outcome",
            AttemptState::Processing => "processing",
            AttemptState::Terminal => "terminal",
        };
        write!(f, "{}", value)
    }
}

impl AttemptState {
    /// All transitions the controller may take from this state. Re-invoking
    /// `initiate` before an outcome lands is legal (two independent gateway
    /// sessions, same guard), hence `AwaitingOutcome -> Initiated`. A
    /// `pending` outcome releases the guard, hence
    /// `Processing -> AwaitingOutcome`.
    pub fn valid_transitions(&self) -> &'static [AttemptState] {
        match self {
            AttemptState::Idle => &[AttemptState::Initiated],
            AttemptState::Initiated => &[
                AttemptState::AwaitingOutcome,
                AttemptState::Idle,
                AttemptState::Processing,
            ],
            AttemptState::AwaitingOutcome => {
                &[AttemptState::Initiated, AttemptState::Processing]
            }
            AttemptState::Processing => {
                &[AttemptState::Terminal, AttemptState::AwaitingOutcome]
            }
            AttemptState::Terminal => &[],
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, AttemptState::Terminal)
    }

    /// Whether an incoming outcome event may claim this attempt.
    pub fn accepts_outcome(&self) -> bool {
        matches!(
            self,
            AttemptState::Idle | AttemptState::Initiated | AttemptState::AwaitingOutcome
        )
    }

    /// Whether a (re-)initiation is allowed from this state. `Initiated` is
    /// included so overlapping initiations each get their own session.
    pub fn accepts_initiate(&self) -> bool {
        matches!(
            self,
            AttemptState::Idle | AttemptState::Initiated | AttemptState::AwaitingOutcome
        )
    }
}
