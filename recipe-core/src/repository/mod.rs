//! Repository Layer
//!
//! The persistent store accessor: an abstract interface plus in-memory and
//! HTTP implementations.

mod error;
mod http;
mod memory;
mod traits;

#[cfg(test)]
mod tests;

pub use error::{StoreError, StoreResult};
pub use http::HttpRecipeStore;
pub use memory::{MemoryRecipeStore, SAMPLE_SITE};
pub use traits::{execute, RecipeStore};
