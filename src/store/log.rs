//! Record of dispatched actions.

use crate::core::Action;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// One dispatched action.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DispatchRecord {
    /// Position of this dispatch since the store was created, from 0.
    pub sequence: u64,
    pub action: Action,
    /// When the reducer ran
    pub timestamp: DateTime<Utc>,
}

/// Bounded, ordered log of dispatched actions.
///
/// `record` consumes the log and returns the extended one; once `capacity`
/// entries are held the oldest is dropped.
///
/// # Example
///
/// ```rust
/// use fourletters::core::Action;
/// use fourletters::store::{ActionLog, DispatchRecord};
/// use chrono::Utc;
///
/// let log = ActionLog::with_capacity(2)
///     .record(DispatchRecord { sequence: 0, action: Action::Back, timestamp: Utc::now() })
///     .record(DispatchRecord { sequence: 1, action: Action::ResetGame, timestamp: Utc::now() })
///     .record(DispatchRecord { sequence: 2, action: Action::LoadWordError, timestamp: Utc::now() });
///
/// assert_eq!(log.actions(), vec![&Action::ResetGame, &Action::LoadWordError]);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionLog {
    records: VecDeque<DispatchRecord>,
    capacity: usize,
}

impl ActionLog {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn record(mut self, record: DispatchRecord) -> Self {
        if self.capacity == 0 {
            return self;
        }
        if self.records.len() == self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
        self
    }

    /// Actions in dispatch order.
    pub fn actions(&self) -> Vec<&Action> {
        self.records.iter().map(|r| &r.action).collect()
    }

    pub fn records(&self) -> impl Iterator<Item = &DispatchRecord> {
        self.records.iter()
    }

    pub fn last(&self) -> Option<&DispatchRecord> {
        self.records.back()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Time between the oldest and newest retained dispatch.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.records.front()?, self.records.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }
}
