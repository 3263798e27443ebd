//! Repository Layer - Core Traits
//!
//! Defines the abstract interface to the backing store.
//! Futures are not `Send`: the application runs on a single-threaded
//! event loop and the browser HTTP client is not thread-safe.

use async_trait::async_trait;

use super::error::StoreResult;
use crate::domain::{Catalog, Category, Recipe};
use crate::reducer::{Commit, CommitOutcome};

/// Whole-graph load plus one write per commit kind
#[async_trait(?Send)]
pub trait RecipeStore {
    /// Fetch the full category/recipe graph
    async fn load(&self) -> StoreResult<Catalog>;

    async fn commit_category_add(&self, name: &str) -> StoreResult<Category>;

    async fn commit_category_delete(&self, id: &str) -> StoreResult<()>;

    async fn commit_category_reorder(&self, ordered_ids: &[String]) -> StoreResult<()>;

    async fn commit_recipe_add(&self, recipe: &Recipe, category_id: &str) -> StoreResult<Recipe>;

    /// Full-field replace
    async fn commit_recipe_update(&self, recipe: &Recipe) -> StoreResult<()>;

    async fn commit_recipe_delete(&self, id: &str) -> StoreResult<()>;

    async fn commit_recipe_reorder(
        &self,
        category_id: &str,
        ordered_ids: &[String],
    ) -> StoreResult<()>;
}

/// Route a commit to the matching store call
pub async fn execute(store: &dyn RecipeStore, commit: &Commit) -> StoreResult<CommitOutcome> {
    match commit {
        Commit::AddCategory { name, .. } => store
            .commit_category_add(name)
            .await
            .map(CommitOutcome::CategoryAdded),
        Commit::DeleteCategory { id } => store
            .commit_category_delete(id)
            .await
            .map(|_| CommitOutcome::Applied),
        Commit::ReorderCategories { ordered_ids } => store
            .commit_category_reorder(ordered_ids)
            .await
            .map(|_| CommitOutcome::Applied),
        Commit::AddRecipe {
            category_id,
            recipe,
            ..
        } => store
            .commit_recipe_add(recipe, category_id)
            .await
            .map(CommitOutcome::RecipeAdded),
        Commit::UpdateRecipe { recipe } => store
            .commit_recipe_update(recipe)
            .await
            .map(|_| CommitOutcome::Applied),
        Commit::DeleteRecipe { id } => store
            .commit_recipe_delete(id)
            .await
            .map(|_| CommitOutcome::Applied),
        Commit::ReorderRecipes {
            category_id,
            ordered_ids,
        } => store
            .commit_recipe_reorder(category_id, ordered_ids)
            .await
            .map(|_| CommitOutcome::Applied),
    }
}
