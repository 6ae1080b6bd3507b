//! The single holder of application state.
//!
//! The store owns the current [`AppState`] snapshot, runs the root reducer
//! for every dispatched action and hands each new snapshot to subscribers in
//! registration order.
//!
//! Applying an action and notifying subscribers is one serialized section:
//! dispatches are queued and drained by a single caller at a time, so a
//! subscriber that dispatches from inside its callback has its action applied
//! after the current notification round finishes.
//!
//! # Example
//!
//! ```rust
//! use fourletters::core::{Action, Page};
//! use fourletters::store::Store;
//! use std::sync::{Arc, Mutex};
//!
//! let store = Store::default();
//! let seen = Arc::new(Mutex::new(Vec::new()));
//!
//! let sink = Arc::clone(&seen);
//! let subscription = store.subscribe(move |state| {
//!     sink.lock().unwrap().push(state.current_page());
//! });
//!
//! store.dispatch(Action::navigate(Page::Loading));
//! subscription.unsubscribe();
//! store.dispatch(Action::Back);
//!
//! assert_eq!(*seen.lock().unwrap(), vec![Page::Loading]);
//! assert_eq!(store.state().current_page(), Page::Menu);
//! ```

mod log;

pub use log::{ActionLog, DispatchRecord};

use crate::config::StoreConfig;
use crate::core::{Action, AppState};
use crate::reducer::{AppReducer, Reducer};
use chrono::Utc;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tracing::debug;

/// Callback receiving every new state snapshot.
pub type Listener = Arc<dyn Fn(&Arc<AppState>) + Send + Sync>;

/// Shared handle to the state container. Clones refer to the same store.
#[derive(Clone)]
pub struct Store {
    inner: Arc<Inner>,
}

struct Inner {
    state: Mutex<Arc<AppState>>,
    listeners: Mutex<Vec<(u64, Listener)>>,
    next_listener_id: AtomicU64,
    queue: Mutex<DispatchQueue>,
    log: Mutex<ActionLog>,
    next_sequence: AtomicU64,
}

#[derive(Default)]
struct DispatchQueue {
    pending: VecDeque<Action>,
    draining: bool,
}

/// Handle returned by [`Store::subscribe`].
///
/// Dropping the handle leaves the listener registered; call
/// [`Subscription::unsubscribe`] to remove it.
#[must_use = "dropping a Subscription does not unsubscribe"]
pub struct Subscription {
    id: u64,
    store: Weak<Inner>,
}

impl Subscription {
    pub fn unsubscribe(self) {
        if let Some(inner) = self.store.upgrade() {
            lock(&inner.listeners).retain(|(id, _)| *id != self.id);
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Releases the drain when a listener panics mid-notification.
struct DrainGuard<'a> {
    queue: &'a Mutex<DispatchQueue>,
}

impl Drop for DrainGuard<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            lock(self.queue).draining = false;
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}

impl Store {
    /// Create a store holding the initial state.
    pub fn new(config: StoreConfig) -> Self {
        Self::with_state(AppState::default(), config)
    }

    /// Create a store starting from `state`.
    pub fn with_state(state: AppState, config: StoreConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(Arc::new(state)),
                listeners: Mutex::new(Vec::new()),
                next_listener_id: AtomicU64::new(0),
                queue: Mutex::new(DispatchQueue::default()),
                log: Mutex::new(ActionLog::with_capacity(config.log_capacity)),
                next_sequence: AtomicU64::new(0),
            }),
        }
    }

    /// Current snapshot. Never changes after it is returned.
    pub fn state(&self) -> Arc<AppState> {
        Arc::clone(&lock(&self.inner.state))
    }

    /// Snapshot of the dispatch log.
    pub fn log(&self) -> ActionLog {
        lock(&self.inner.log).clone()
    }

    /// Register `listener` to receive every new state.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&Arc<AppState>) + Send + Sync + 'static,
    {
        let id = self.inner.next_listener_id.fetch_add(1, Ordering::Relaxed);
        lock(&self.inner.listeners).push((id, Arc::new(listener)));
        Subscription {
            id,
            store: Arc::downgrade(&self.inner),
        }
    }

    /// Apply `action` and notify subscribers.
    ///
    /// When called while another dispatch is being drained (for instance
    /// from a subscriber callback) the action is queued and applied by that
    /// drain once the in-progress notification completes.
    pub fn dispatch(&self, action: Action) {
        {
            let mut queue = lock(&self.inner.queue);
            queue.pending.push_back(action);
            if queue.draining {
                debug!(queued = queue.pending.len(), "dispatch queued behind drain");
                return;
            }
            queue.draining = true;
        }

        let _guard = DrainGuard {
            queue: &self.inner.queue,
        };
        loop {
            let next = {
                let mut queue = lock(&self.inner.queue);
                match queue.pending.pop_front() {
                    Some(action) => action,
                    None => {
                        queue.draining = false;
                        return;
                    }
                }
            };
            self.apply(next);
        }
    }

    fn apply(&self, action: Action) {
        let next = {
            let mut state = lock(&self.inner.state);
            let next = Arc::new(AppReducer.reduce(&action, &state));
            *state = Arc::clone(&next);
            next
        };

        let sequence = self.inner.next_sequence.fetch_add(1, Ordering::Relaxed);
        debug!(
            sequence,
            action = action.name(),
            page = %next.current_page(),
            load_error = next.load_error,
            "action applied"
        );
        {
            let mut log = lock(&self.inner.log);
            let current = std::mem::replace(&mut *log, ActionLog::with_capacity(0));
            *log = current.record(DispatchRecord {
                sequence,
                action,
                timestamp: Utc::now(),
            });
        }

        let listeners: Vec<Listener> = lock(&self.inner.listeners)
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener(&next);
        }
    }
}
