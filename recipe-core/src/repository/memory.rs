//! In-memory store
//!
//! Behaves like the remote backend (canonical ids, timestamps, 404s) and
//! serves as the offline demo backend and the test double.

use std::cell::RefCell;
use std::collections::VecDeque;

use async_trait::async_trait;
use chrono::Utc;

use super::error::{StoreError, StoreResult};
use super::traits::RecipeStore;
use crate::domain::{Catalog, Category, Recipe};
use crate::ordering;

/// Bundled demo catalog, in the legacy document shape
pub const SAMPLE_SITE: &str = include_str!("../../fixtures/sample_site.json");

#[derive(Debug, Default)]
struct MemoryState {
    catalog: Catalog,
    next_id: u32,
    failures: VecDeque<StoreError>,
    unavailable: bool,
}

impl MemoryState {
    fn canonical_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-{}", prefix, self.next_id)
    }

    /// Queued failure for the next write, if any
    fn take_failure(&mut self) -> StoreResult<()> {
        match self.failures.pop_front() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryRecipeStore {
    state: RefCell<MemoryState>,
}

impl MemoryRecipeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with an existing graph; blank ids get canonical ones
    pub fn with_catalog(catalog: Catalog) -> Self {
        let mut state = MemoryState {
            catalog: catalog.normalized(),
            ..Default::default()
        };
        let mut catalog = std::mem::take(&mut state.catalog);
        for category in &mut catalog.categories {
            if category.id.is_empty() {
                category.id = state.canonical_id("cat");
            }
            for recipe in &mut category.recipes {
                if recipe.id.is_empty() {
                    recipe.id = state.canonical_id("rec");
                }
                recipe.category_id = Some(category.id.clone());
            }
        }
        state.catalog = catalog;
        Self {
            state: RefCell::new(state),
        }
    }

    /// Seed from a stored document (either shape)
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        Catalog::from_json(raw).map(Self::with_catalog)
    }

    /// Store preloaded with [`SAMPLE_SITE`]
    pub fn demo() -> serde_json::Result<Self> {
        Self::from_json(SAMPLE_SITE)
    }

    /// Make the next write fail with `err`
    pub fn fail_next(&self, err: StoreError) {
        self.state.borrow_mut().failures.push_back(err);
    }

    /// Simulate the backend being unreachable for loads
    pub fn set_unavailable(&self, unavailable: bool) {
        self.state.borrow_mut().unavailable = unavailable;
    }

    /// Copy of what the store currently holds
    pub fn snapshot(&self) -> Catalog {
        self.state.borrow().catalog.clone()
    }
}

#[async_trait(?Send)]
impl RecipeStore for MemoryRecipeStore {
    async fn load(&self) -> StoreResult<Catalog> {
        let state = self.state.borrow();
        if state.unavailable {
            return Err(StoreError::Unreachable("memory store offline".to_string()));
        }
        Ok(state.catalog.clone())
    }

    async fn commit_category_add(&self, name: &str) -> StoreResult<Category> {
        let mut state = self.state.borrow_mut();
        state.take_failure()?;
        let id = state.canonical_id("cat");
        let order = ordering::next_order(&state.catalog.categories);
        let category = Category::new(id, name.to_string(), order, Utc::now());
        state.catalog.categories.push(category.clone());
        Ok(category)
    }

    async fn commit_category_delete(&self, id: &str) -> StoreResult<()> {
        let mut state = self.state.borrow_mut();
        state.take_failure()?;
        let index = state
            .catalog
            .category_index(id)
            .ok_or_else(|| StoreError::not_found(format!("category {}", id)))?;
        state.catalog.categories.remove(index);
        ordering::reindex(&mut state.catalog.categories);
        Ok(())
    }

    async fn commit_category_reorder(&self, ordered_ids: &[String]) -> StoreResult<()> {
        let mut state = self.state.borrow_mut();
        state.take_failure()?;
        ordering::restore_order(&mut state.catalog.categories, ordered_ids);
        Ok(())
    }

    async fn commit_recipe_add(&self, recipe: &Recipe, category_id: &str) -> StoreResult<Recipe> {
        let mut state = self.state.borrow_mut();
        state.take_failure()?;
        let id = state.canonical_id("rec");
        let category = state
            .catalog
            .category_mut(category_id)
            .ok_or_else(|| StoreError::not_found(format!("category {}", category_id)))?;
        let now = Utc::now();
        let stored = Recipe {
            id,
            category_id: Some(category_id.to_string()),
            display_order: ordering::next_order(&category.recipes),
            created_at: Some(now),
            updated_at: Some(now),
            ..recipe.clone()
        };
        category.recipes.push(stored.clone());
        Ok(stored)
    }

    async fn commit_recipe_update(&self, recipe: &Recipe) -> StoreResult<()> {
        let mut state = self.state.borrow_mut();
        state.take_failure()?;
        let (ci, ri) = state
            .catalog
            .locate_recipe(&recipe.id)
            .ok_or_else(|| StoreError::not_found(format!("recipe {}", recipe.id)))?;
        let slot = &mut state.catalog.categories[ci].recipes[ri];
        let order = slot.display_order;
        *slot = Recipe {
            display_order: order,
            updated_at: Some(Utc::now()),
            ..recipe.clone()
        };
        Ok(())
    }

    async fn commit_recipe_delete(&self, id: &str) -> StoreResult<()> {
        let mut state = self.state.borrow_mut();
        state.take_failure()?;
        let (ci, ri) = state
            .catalog
            .locate_recipe(id)
            .ok_or_else(|| StoreError::not_found(format!("recipe {}", id)))?;
        let recipes = &mut state.catalog.categories[ci].recipes;
        recipes.remove(ri);
        ordering::reindex(recipes);
        Ok(())
    }

    async fn commit_recipe_reorder(
        &self,
        category_id: &str,
        ordered_ids: &[String],
    ) -> StoreResult<()> {
        let mut state = self.state.borrow_mut();
        state.take_failure()?;
        let category = state
            .catalog
            .category_mut(category_id)
            .ok_or_else(|| StoreError::not_found(format!("category {}", category_id)))?;
        ordering::restore_order(&mut category.recipes, ordered_ids);
        Ok(())
    }
}
