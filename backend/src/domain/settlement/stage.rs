//! Settlement stage machine.
//!
//! The pipeline is linear:
//!
//! ```text
//! Received -> Resolving -> Validating -> Persisting -> Reporting -> Completed
//! ```
//!
//! `Failed(kind)` is reachable from every non-terminal stage.

use tracing::{debug, warn};

use super::{FailureKind, SettlementError};

/// One state of a settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettlementStage {
    /// The request was accepted for processing.
    Received,
    /// Usernames are being resolved against the directory.
    Resolving,
    /// Pairing and balance validation run.
    Validating,
    /// The transaction is being written.
    Persisting,
    /// The committed receipt is being reported.
    Reporting,
    /// The settlement finished.
    Completed,
    /// The settlement stopped with the given failure.
    Failed(FailureKind),
}

impl SettlementStage {
    /// The stage that follows a successful step, or `None` when terminal.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Received => Some(Self::Resolving),
            Self::Resolving => Some(Self::Validating),
            Self::Validating => Some(Self::Persisting),
            Self::Persisting => Some(Self::Reporting),
            Self::Reporting => Some(Self::Completed),
            Self::Completed | Self::Failed(_) => None,
        }
    }

    /// Whether no further transition is possible.
    pub fn is_terminal(self) -> bool {
        self.next().is_none()
    }

    /// Whether the transaction is already durable in this stage.
    pub fn is_committed(self) -> bool {
        matches!(self, Self::Reporting | Self::Completed)
    }
}

/// Tracks the stage of one settlement and logs each transition.
#[derive(Debug)]
pub(crate) struct StageTracker {
    current: SettlementStage,
    history: Vec<SettlementStage>,
}

impl StageTracker {
    pub(crate) fn new() -> Self {
        Self {
            current: SettlementStage::Received,
            history: vec![SettlementStage::Received],
        }
    }

    pub(crate) fn current(&self) -> SettlementStage {
        self.current
    }

    #[cfg(test)]
    pub(crate) fn history(&self) -> &[SettlementStage] {
        &self.history
    }

    /// Move to the next linear stage. Terminal stages stay put.
    pub(crate) fn advance(&mut self) -> SettlementStage {
        if let Some(next) = self.current.next() {
            debug!(from = ?self.current, to = ?next, "settlement stage advanced");
            self.enter(next);
        }
        self.current
    }

    /// Record `error` as the terminal failure and hand it back.
    pub(crate) fn fail(&mut self, error: SettlementError) -> SettlementError {
        if !self.current.is_terminal() {
            if self.current.is_committed() {
                warn!(from = ?self.current, kind = ?error.kind(), "settlement failed after commit");
            } else {
                debug!(from = ?self.current, kind = ?error.kind(), "settlement stage failed");
            }
            self.enter(SettlementStage::Failed(error.kind()));
        }
        error
    }

    fn enter(&mut self, stage: SettlementStage) {
        self.current = stage;
        self.history.push(stage);
    }
}
