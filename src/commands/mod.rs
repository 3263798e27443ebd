//! Frontend Commands
//!
//! Actions behind UI events, organized by domain. Catalog writes go
//! through the optimistic session; the store accessor is reached via
//! `AppContext`.

mod catalog;
mod generation;
mod navigation;
mod preferences;

pub use catalog::*;
pub use generation::*;
pub use navigation::*;
pub use preferences::*;
