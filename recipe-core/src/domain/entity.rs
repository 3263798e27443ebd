//! Domain Layer - Core Entity Traits
//!
//! Every catalog entity has a string identifier; ordered entities also
//! carry a 1-based display order.

use std::fmt;

use thiserror::Error;

use crate::reducer::{Commit, FlightKey, Intent};

/// Core trait for all domain entities
pub trait Entity: Clone {
    /// Returns the entity's identifier (provisional or canonical)
    fn id(&self) -> &str;
}

/// Entities rendered in a user-chosen order
pub trait Ordered: Entity {
    fn display_order(&self) -> u32;

    fn set_display_order(&mut self, order: u32);
}

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// What a lookup failed to find
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Missing {
    /// Category by id
    Category(String),
    /// Recipe by id
    Recipe(String),
    /// Category by (decoded) name from a path
    CategoryNamed(String),
    /// Recipe by title inside a named category
    RecipeTitled { category: String, title: String },
    /// A path outside the routing scheme
    Path(String),
}

impl fmt::Display for Missing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Missing::Category(id) => write!(f, "category {} not found", id),
            Missing::Recipe(id) => write!(f, "recipe {} not found", id),
            Missing::CategoryNamed(name) => write!(f, "no category named \"{}\"", name),
            Missing::RecipeTitled { category, title } => {
                write!(f, "no recipe titled \"{}\" in \"{}\"", title, category)
            }
            Missing::Path(path) => write!(f, "nothing lives at {}", path),
        }
    }
}

/// Domain-level errors
#[derive(Debug, Clone, Error)]
pub enum DomainError {
    /// The catalog could not be loaded at all
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    /// A write was rejected; `retry` re-issues the same user intent
    #[error("could not {commit}: {reason}")]
    Persistence {
        commit: Commit,
        retry: Intent,
        reason: String,
    },

    #[error("{0}")]
    NotFound(Missing),

    #[error("invalid input: {0}")]
    Validation(String),

    /// Another commit already holds this entity
    #[error("{0} is still being saved")]
    InFlight(FlightKey),
}

impl DomainError {
    /// Intent to re-dispatch when the user asks for a retry
    pub fn retry_intent(&self) -> Option<&Intent> {
        match self {
            DomainError::Persistence { retry, .. } => Some(retry),
            _ => None,
        }
    }
}
