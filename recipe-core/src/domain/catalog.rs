//! Catalog (the whole site data graph)
//!
//! Categories held in display order, each owning its recipes.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use super::category::Category;
use super::recipe::Recipe;
use crate::ordering;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub categories: Vec<Category>,
}

/// Stored documents are either the bare graph or wrapped in `{"site": ...}`
#[derive(Debug)]
pub enum SiteEnvelope {
    Site { site: Catalog },
    Bare(Catalog),
}

// Picks the shape by the `site` key so a decode failure reports the
// offending field instead of a blanket shape mismatch.
impl<'de> Deserialize<'de> for SiteEnvelope {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut doc = serde_json::Value::deserialize(deserializer)?;
        let site = doc.as_object_mut().and_then(|fields| fields.remove("site"));
        let decoded = match site {
            Some(site) => Catalog::deserialize(site).map(|site| SiteEnvelope::Site { site }),
            None => Catalog::deserialize(doc).map(SiteEnvelope::Bare),
        };
        decoded.map_err(<D::Error as de::Error>::custom)
    }
}

impl SiteEnvelope {
    pub fn into_catalog(self) -> Catalog {
        match self {
            SiteEnvelope::Site { site } => site,
            SiteEnvelope::Bare(catalog) => catalog,
        }
        .normalized()
    }
}

impl Catalog {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }.normalized()
    }

    /// Parse a stored document (either shape) and normalize its ordering
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<SiteEnvelope>(raw).map(SiteEnvelope::into_catalog)
    }

    /// Sort by display order (missing orders fall back to list position),
    /// rewrite orders to 1..N and fill in recipe back-references.
    pub fn normalized(mut self) -> Self {
        ordering::normalize(&mut self.categories);
        for category in &mut self.categories {
            ordering::normalize(&mut category.recipes);
            for recipe in &mut category.recipes {
                if recipe.category_id.is_none() {
                    recipe.category_id = Some(category.id.clone());
                }
            }
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn category_mut(&mut self, id: &str) -> Option<&mut Category> {
        self.categories.iter_mut().find(|c| c.id == id)
    }

    pub fn category_index(&self, id: &str) -> Option<usize> {
        self.categories.iter().position(|c| c.id == id)
    }

    /// Case-insensitive exact name match; first in display order wins
    pub fn category_named(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.matches_name(name))
    }

    pub fn first_category(&self) -> Option<&Category> {
        self.categories.first()
    }

    /// Owning category and recipe for a recipe id
    pub fn find_recipe(&self, recipe_id: &str) -> Option<(&Category, &Recipe)> {
        self.categories
            .iter()
            .find_map(|c| c.recipe(recipe_id).map(|r| (c, r)))
    }

    /// (category index, recipe index) for a recipe id
    pub fn locate_recipe(&self, recipe_id: &str) -> Option<(usize, usize)> {
        self.categories.iter().enumerate().find_map(|(ci, c)| {
            c.recipes
                .iter()
                .position(|r| r.id == recipe_id)
                .map(|ri| (ci, ri))
        })
    }

    pub fn recipe_count(&self) -> usize {
        self.categories.iter().map(|c| c.recipes.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEGACY: &str = r#"{
        "site": {
            "categories": [
                {"_id": "b", "category": "Salads", "priority": 7, "itemPages": []},
                {"_id": "a", "category": "Soups", "priority": 3, "itemPages": [
                    {"_id": "r2", "title": "Minestrone", "ingredients": "beans", "preparation": "simmer"},
                    {"_id": "r1", "title": "Borscht", "ingredients": ["beet"], "preparation": "boil"}
                ]},
                {"_id": "c", "category": "Mains"}
            ]
        }
    }"#;

    #[test]
    fn test_legacy_document_is_normalized() {
        let catalog = Catalog::from_json(LEGACY).unwrap();
        let names: Vec<_> = catalog.categories.iter().map(|c| c.name.as_str()).collect();
        // "Mains" has no priority and falls back to position 3, tying with "Soups"
        assert_eq!(names, vec!["Soups", "Mains", "Salads"]);
        let orders: Vec<_> = catalog.categories.iter().map(|c| c.display_order).collect();
        assert_eq!(orders, vec![1, 2, 3]);

        let soups = catalog.category_named("soups").unwrap();
        assert_eq!(soups.recipes[0].display_order, 1);
        assert_eq!(soups.recipes[1].display_order, 2);
        assert_eq!(soups.recipes[0].category_id.as_deref(), Some("a"));
    }

    #[test]
    fn test_bare_document_and_lookup() {
        let raw = r#"{"categories":[{"id":"x","name":"Desserts","displayOrder":1,"recipes":[
            {"id":"r","title":"Chocolate Cake","ingredients":"","preparationSteps":""}]}]}"#;
        let catalog = Catalog::from_json(raw).unwrap();
        let (category, recipe) = catalog.find_recipe("r").unwrap();
        assert_eq!(category.name, "Desserts");
        assert_eq!(recipe.title, "Chocolate Cake");
        assert_eq!(catalog.locate_recipe("r"), Some((0, 0)));
        assert_eq!(catalog.recipe_count(), 1);
    }

    #[test]
    fn test_decode_error_names_the_field() {
        let raw = r#"{"site":{"categories":[{"_id":"a","category":"Soups","priority":"high"}]}}"#;
        let err = Catalog::from_json(raw).unwrap_err().to_string();
        assert!(err.contains("invalid type"), "{}", err);
        assert!(!err.contains("untagged"), "{}", err);

        let err = Catalog::from_json(r#"{"categories":{"a":1}}"#).unwrap_err().to_string();
        assert!(err.contains("expected a sequence"), "{}", err);
    }
}
