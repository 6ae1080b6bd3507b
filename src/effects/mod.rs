//! External collaborators behind traits.
//!
//! The orchestrator is the only caller of these. Production code plugs in
//! [`SystemClock`] and a real word supplier; tests and demos use
//! [`ManualClock`] and [`StaticWordSource`].

mod clock;
mod word_source;

pub use clock::{Clock, ManualClock, SystemClock};
pub use word_source::{StaticWordSource, WordSource};
