//! Domain Layer
//!
//! Catalog entities and core abstractions.
//! Nothing here performs I/O.

mod catalog;
mod category;
mod entity;
mod recipe;
pub(crate) mod timestamp;

pub use catalog::{Catalog, SiteEnvelope};
pub use category::Category;
pub use entity::{DomainError, DomainResult, Entity, Missing, Ordered};
pub use recipe::{Ingredients, Recipe, RecipeDraft};
