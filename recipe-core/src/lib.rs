//! Recipe Box Core
//!
//! Layered architecture:
//! - domain: catalog entities and the errors every layer reports
//! - ordering: display-order bookkeeping shared by categories and recipes
//! - reducer: intents, transitions and the optimistic session
//! - repository: store accessor trait, in-memory and HTTP implementations
//! - navigation: path routing, selection state and pagination
//! - preferences / config / generation: user settings, deployment settings, AI boundary
//! - quiz: AI quiz questions and scoring

pub mod config;
pub mod domain;
pub mod generation;
pub mod navigation;
pub mod ordering;
pub mod preferences;
pub mod provision;
pub mod quiz;
pub mod reducer;
pub mod repository;

pub use config::{AppConfig, ConfigError};
pub use domain::{Catalog, Category, DomainError, DomainResult, Ingredients, Recipe, RecipeDraft};
pub use generation::{GenerationClient, GenerationError, RecipeFillRequest};
pub use navigation::{Navigator, Page, Route, Selection};
pub use preferences::{Preferences, Theme};
pub use provision::{Provisioner, SystemProvisioner};
pub use quiz::{Quiz, QuizQuestion, QuizRequest};
pub use reducer::{CatalogSession, Commit, CommitOutcome, FlightKey, Intent, PendingCommit};
pub use repository::{HttpRecipeStore, MemoryRecipeStore, RecipeStore, StoreError, StoreResult};
