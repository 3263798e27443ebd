//! Category Entity
//!
//! A named, ordered bucket of recipes. The category owns its recipe list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{Entity, Ordered};
use super::recipe::Recipe;
use super::timestamp;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "CategoryRecord")]
pub struct Category {
    pub id: String,
    pub name: String,
    /// 1-based rank among all categories
    pub display_order: u32,
    pub recipes: Vec<Recipe>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Stored category as it arrives: canonical or legacy keys. Legacy
/// documents may carry `category` and `categoryName` side by side.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CategoryRecord {
    #[serde(alias = "_id", default)]
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    category_name: Option<String>,
    #[serde(alias = "priority", default)]
    display_order: u32,
    #[serde(alias = "itemPages", alias = "itemPage", default)]
    recipes: Vec<Recipe>,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default, deserialize_with = "timestamp::deserialize")]
    created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "timestamp::deserialize")]
    updated_at: Option<DateTime<Utc>>,
}

impl TryFrom<CategoryRecord> for Category {
    type Error = String;

    fn try_from(record: CategoryRecord) -> Result<Self, Self::Error> {
        let name = [record.name, record.category, record.category_name]
            .into_iter()
            .flatten()
            .find(|name| !name.trim().is_empty())
            .ok_or_else(|| format!("category {:?} has no name", record.id))?;
        Ok(Self {
            id: record.id,
            name,
            display_order: record.display_order,
            recipes: record.recipes,
            image_url: record.image_url,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}

impl Category {
    pub fn new(id: String, name: String, display_order: u32, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name,
            display_order,
            recipes: Vec::new(),
            image_url: None,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    pub fn recipe(&self, recipe_id: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == recipe_id)
    }

    /// Case-insensitive exact title match; first in display order wins
    pub fn recipe_titled(&self, title: &str) -> Option<&Recipe> {
        let wanted = title.to_lowercase();
        self.recipes.iter().find(|r| r.title.to_lowercase() == wanted)
    }

    /// Thumbnail for the category list: own image, else the first recipe's
    pub fn thumbnail(&self) -> Option<&str> {
        self.image_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .or_else(|| self.recipes.first().and_then(Recipe::image))
    }

    pub fn matches_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

impl Entity for Category {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Ordered for Category {
    fn display_order(&self) -> u32 {
        self.display_order
    }

    fn set_display_order(&mut self, order: u32) {
        self.display_order = order;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RecipeDraft;

    #[test]
    fn test_category_creation() {
        let cat = Category::new("c1".into(), "Soups".into(), 1, Utc::now());
        assert_eq!(cat.id(), "c1");
        assert!(cat.recipes.is_empty());
        assert!(cat.thumbnail().is_none());
    }

    #[test]
    fn test_thumbnail_falls_back_to_first_recipe() {
        let mut cat = Category::new("c1".into(), "Soups".into(), 1, Utc::now());
        let mut draft = RecipeDraft::titled("Borscht");
        draft.image_url = Some("https://img/borscht.png".into());
        cat.recipes.push(Recipe::from_draft("r1".into(), "c1", 1, draft, Utc::now()));
        assert_eq!(cat.thumbnail(), Some("https://img/borscht.png"));
    }

    #[test]
    fn test_recipe_title_lookup_is_case_insensitive() {
        let mut cat = Category::new("c1".into(), "Desserts".into(), 1, Utc::now());
        cat.recipes.push(Recipe::from_draft(
            "r1".into(),
            "c1",
            1,
            RecipeDraft::titled("Chocolate Cake"),
            Utc::now(),
        ));
        assert!(cat.recipe_titled("chocolate cake").is_some());
        assert!(cat.recipe_titled("chocolate").is_none());
        assert!(cat.matches_name("DESSERTS"));
    }

    #[test]
    fn test_legacy_record_with_both_name_keys() {
        let raw = r#"{"_id":"a","category":"Soups","categoryName":"Soups","priority":2,"itemPages":[]}"#;
        let cat: Category = serde_json::from_str(raw).unwrap();
        assert_eq!((cat.id.as_str(), cat.name.as_str(), cat.display_order), ("a", "Soups", 2));

        // first non-empty key wins
        let raw = r#"{"_id":"b","category":"","categoryName":"Salads"}"#;
        let cat: Category = serde_json::from_str(raw).unwrap();
        assert_eq!(cat.name, "Salads");
    }

    #[test]
    fn test_nameless_record_is_rejected() {
        let err = serde_json::from_str::<Category>(r#"{"_id":"c","category":" "}"#).unwrap_err();
        assert!(err.to_string().contains("has no name"));
    }

    #[test]
    fn test_serializes_canonical_keys() {
        let cat = Category::new("c1".into(), "Soups".into(), 1, Utc::now());
        let json = serde_json::to_value(&cat).unwrap();
        assert_eq!(json["name"], "Soups");
        assert_eq!(json["displayOrder"], 1);
        assert!(json.get("category").is_none());
        let back: Category = serde_json::from_value(json).unwrap();
        assert_eq!(back.name, "Soups");
    }
}
