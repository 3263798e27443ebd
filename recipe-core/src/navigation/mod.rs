//! Navigation
//!
//! Path routing, the selection derived from it, and recipe grid paging.

mod page;
mod route;
mod selection;

pub use page::Page;
pub use route::{Route, Tool, COMPONENT};
pub use selection::{Navigator, Selection};
