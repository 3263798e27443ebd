//! Ordering/CRUD Reducer
//!
//! Turns user intents into the next catalog snapshot plus the commit that
//! makes it durable, and tracks those commits while they are in flight.

mod apply;
mod intent;
mod session;

pub use apply::{apply, reconcile, revert, Change, Transition};
pub use intent::{Commit, CommitOutcome, FlightKey, Intent, Undo};
pub use session::{CatalogSession, PendingCommit};
