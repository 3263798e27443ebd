//! Intents, commits and their bookkeeping types.

use std::fmt;

use crate::domain::{Category, Recipe, RecipeDraft};

/// Something the user asked for
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    AddCategory { name: String },
    DeleteCategory { id: String },
    ReorderCategories { from: usize, to: usize },
    AddRecipe { category_id: String, draft: RecipeDraft },
    UpdateRecipe { recipe_id: String, draft: RecipeDraft },
    DeleteRecipe { recipe_id: String },
    ReorderRecipes { category_id: String, from: usize, to: usize },
}

/// The store call that makes a transition durable
#[derive(Debug, Clone, PartialEq)]
pub enum Commit {
    AddCategory { provisional_id: String, name: String },
    DeleteCategory { id: String },
    ReorderCategories { ordered_ids: Vec<String> },
    AddRecipe { provisional_id: String, category_id: String, recipe: Recipe },
    UpdateRecipe { recipe: Recipe },
    DeleteRecipe { id: String },
    ReorderRecipes { category_id: String, ordered_ids: Vec<String> },
}

impl Commit {
    /// Entities this commit occupies until it settles
    pub fn flight_keys(&self) -> Vec<FlightKey> {
        match self {
            // the order keys stay claimed until the provisional id is swapped,
            // so no reorder can send it to the store
            Commit::AddCategory { provisional_id, .. } => vec![
                FlightKey::NewCategory,
                FlightKey::CategoryOrder,
                FlightKey::Category(provisional_id.clone()),
                FlightKey::NewRecipe(provisional_id.clone()),
                FlightKey::RecipeOrder(provisional_id.clone()),
            ],
            Commit::DeleteCategory { id } => vec![
                FlightKey::Category(id.clone()),
                FlightKey::NewRecipe(id.clone()),
                FlightKey::RecipeOrder(id.clone()),
            ],
            Commit::ReorderCategories { .. } => vec![FlightKey::CategoryOrder],
            Commit::AddRecipe { provisional_id, category_id, .. } => vec![
                FlightKey::NewRecipe(category_id.clone()),
                FlightKey::RecipeOrder(category_id.clone()),
                FlightKey::Recipe(provisional_id.clone()),
            ],
            Commit::UpdateRecipe { recipe } => vec![FlightKey::Recipe(recipe.id.clone())],
            Commit::DeleteRecipe { id } => vec![FlightKey::Recipe(id.clone())],
            Commit::ReorderRecipes { category_id, .. } => {
                vec![FlightKey::RecipeOrder(category_id.clone())]
            }
        }
    }
}

impl fmt::Display for Commit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Commit::AddCategory { name, .. } => write!(f, "add category \"{}\"", name),
            Commit::DeleteCategory { id } => write!(f, "delete category {}", id),
            Commit::ReorderCategories { .. } => write!(f, "reorder categories"),
            Commit::AddRecipe { recipe, .. } => write!(f, "add recipe \"{}\"", recipe.title),
            Commit::UpdateRecipe { recipe } => write!(f, "save recipe \"{}\"", recipe.title),
            Commit::DeleteRecipe { id } => write!(f, "delete recipe {}", id),
            Commit::ReorderRecipes { category_id, .. } => {
                write!(f, "reorder recipes in category {}", category_id)
            }
        }
    }
}

/// How to take an optimistic change back
#[derive(Debug, Clone, PartialEq)]
pub enum Undo {
    RemoveCategory { id: String },
    RestoreCategory { index: usize, category: Category },
    RestoreCategoryOrder { ordered_ids: Vec<String> },
    RemoveRecipe { id: String },
    RestoreRecipe { recipe: Recipe },
    ReinsertRecipe { category_id: String, index: usize, recipe: Recipe },
    RestoreRecipeOrder { category_id: String, ordered_ids: Vec<String> },
}

/// What the store handed back for a commit
#[derive(Debug, Clone, PartialEq)]
pub enum CommitOutcome {
    CategoryAdded(Category),
    RecipeAdded(Recipe),
    Applied,
}

/// A unit that can have at most one commit in flight
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FlightKey {
    /// The add-category form
    NewCategory,
    /// The category list order
    CategoryOrder,
    Category(String),
    /// The add-recipe form of a category
    NewRecipe(String),
    /// The recipe order inside a category
    RecipeOrder(String),
    Recipe(String),
}

impl FlightKey {
    /// Key that blocks the recipe form: editing `recipe_id`, or adding to
    /// `category_id` when there is no recipe yet
    pub fn recipe_form(category_id: &str, recipe_id: Option<&str>) -> Self {
        match recipe_id {
            Some(id) => FlightKey::Recipe(id.to_string()),
            None => FlightKey::NewRecipe(category_id.to_string()),
        }
    }
}

impl fmt::Display for FlightKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlightKey::NewCategory => write!(f, "the new category"),
            FlightKey::CategoryOrder => write!(f, "the category order"),
            FlightKey::Category(id) => write!(f, "category {}", id),
            FlightKey::NewRecipe(id) => write!(f, "the new recipe in category {}", id),
            FlightKey::RecipeOrder(id) => write!(f, "the recipe order in category {}", id),
            FlightKey::Recipe(id) => write!(f, "recipe {}", id),
        }
    }
}
