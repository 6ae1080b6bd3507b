//! Cancellable in-flight operation slots.
//!
//! The orchestrator keeps one slot per operation kind. Each slot holds the id
//! and abort handle of the operation currently allowed to deliver a result.
//! Starting a new operation or cancelling aborts the previous task and
//! forgets its id, so any result it already queued is recognised as stale.

use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::task::AbortHandle;
use uuid::Uuid;

/// The two kinds of asynchronous work the orchestrator performs.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum OperationKind {
    /// Fetching the first word of a round.
    StartGame,
    /// Fetching the next word after a winning answer.
    CheckWin,
}

impl OperationKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::StartGame => "StartGame",
            Self::CheckWin => "CheckWin",
        }
    }
}

/// Identity of one in-flight operation.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct OperationId(Uuid);

impl OperationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for OperationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Default)]
pub(crate) struct Slot {
    active: Option<(OperationId, AbortHandle)>,
}

impl Slot {
    /// Make `id` the live operation, aborting and returning any previous one.
    pub(crate) fn begin(&mut self, id: OperationId, handle: AbortHandle) -> Option<OperationId> {
        let previous = self.cancel();
        self.active = Some((id, handle));
        previous
    }

    /// Abort the live operation, if any.
    pub(crate) fn cancel(&mut self) -> Option<OperationId> {
        self.active.take().map(|(id, handle)| {
            handle.abort();
            id
        })
    }

    /// Accept a result from `id`. Returns false if `id` is no longer live.
    pub(crate) fn complete(&mut self, id: OperationId) -> bool {
        match &self.active {
            Some((live, _)) if *live == id => {
                self.active = None;
                true
            }
            _ => false,
        }
    }

    pub(crate) fn is_busy(&self) -> bool {
        self.active.is_some()
    }
}

/// One slot per [`OperationKind`].
#[derive(Debug, Default)]
pub(crate) struct Slots {
    start_game: Slot,
    check_win: Slot,
}

impl Slots {
    pub(crate) fn get_mut(&mut self, kind: OperationKind) -> &mut Slot {
        match kind {
            OperationKind::StartGame => &mut self.start_game,
            OperationKind::CheckWin => &mut self.check_win,
        }
    }

    pub(crate) fn get(&self, kind: OperationKind) -> &Slot {
        match kind {
            OperationKind::StartGame => &self.start_game,
            OperationKind::CheckWin => &self.check_win,
        }
    }

    pub(crate) fn cancel_all(&mut self) -> Vec<(OperationKind, OperationId)> {
        [OperationKind::StartGame, OperationKind::CheckWin]
            .into_iter()
            .filter_map(|kind| self.get_mut(kind).cancel().map(|id| (kind, id)))
            .collect()
    }
}
