//! Recipe Entity
//!
//! A single editable item owned by exactly one category.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{DomainError, DomainResult, Entity, Ordered};
use super::timestamp;

/// Ingredients are stored either as one block of text or as a list of lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Ingredients {
    List(Vec<String>),
    Text(String),
}

impl Default for Ingredients {
    fn default() -> Self {
        Ingredients::Text(String::new())
    }
}

impl Ingredients {
    /// Non-blank lines, in order
    pub fn lines(&self) -> Vec<&str> {
        match self {
            Ingredients::List(items) => items
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .collect(),
            Ingredients::Text(text) => text
                .lines()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    /// Editable text form (one ingredient per line)
    pub fn to_text(&self) -> String {
        match self {
            Ingredients::List(items) => items.join("\n"),
            Ingredients::Text(text) => text.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines().is_empty()
    }
}

impl From<&str> for Ingredients {
    fn from(text: &str) -> Self {
        Ingredients::Text(text.to_string())
    }
}

impl From<Vec<String>> for Ingredients {
    fn from(items: Vec<String>) -> Self {
        Ingredients::List(items)
    }
}

/// A recipe inside a category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    #[serde(alias = "_id", default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub ingredients: Ingredients,
    #[serde(alias = "preparation", default)]
    pub preparation_steps: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Lookup only; the owning category's list is authoritative
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    /// Position within the owning category (1-based)
    #[serde(alias = "priority", default)]
    pub display_order: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prepare_time_minutes: Option<u32>,
    #[serde(
        default,
        deserialize_with = "timestamp::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        default,
        deserialize_with = "timestamp::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Recipe {
    /// Build a new recipe from user input
    pub fn from_draft(
        id: String,
        category_id: &str,
        display_order: u32,
        draft: RecipeDraft,
        now: DateTime<Utc>,
    ) -> Self {
        let draft = draft.normalized();
        Self {
            id,
            title: draft.title,
            ingredients: draft.ingredients,
            preparation_steps: draft.preparation_steps,
            image_url: draft.image_url,
            category_id: Some(category_id.to_string()),
            display_order,
            prepare_time_minutes: draft.prepare_time_minutes,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    /// Full-field replace of the editable fields
    pub fn apply_draft(&mut self, draft: RecipeDraft, now: DateTime<Utc>) {
        let draft = draft.normalized();
        self.title = draft.title;
        self.ingredients = draft.ingredients;
        self.preparation_steps = draft.preparation_steps;
        self.image_url = draft.image_url;
        self.prepare_time_minutes = draft.prepare_time_minutes;
        self.updated_at = Some(now);
    }

    /// Image URL, treating an empty string as absent
    pub fn image(&self) -> Option<&str> {
        self.image_url.as_deref().filter(|url| !url.trim().is_empty())
    }

    /// Editable copy of this recipe
    pub fn to_draft(&self) -> RecipeDraft {
        RecipeDraft {
            title: self.title.clone(),
            ingredients: self.ingredients.clone(),
            preparation_steps: self.preparation_steps.clone(),
            image_url: self.image_url.clone(),
            prepare_time_minutes: self.prepare_time_minutes,
        }
    }
}

impl Entity for Recipe {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Ordered for Recipe {
    fn display_order(&self) -> u32 {
        self.display_order
    }

    fn set_display_order(&mut self, order: u32) {
        self.display_order = order;
    }
}

/// User-editable recipe fields, as submitted by the recipe dialog
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDraft {
    pub title: String,
    #[serde(default)]
    pub ingredients: Ingredients,
    #[serde(default)]
    pub preparation_steps: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub prepare_time_minutes: Option<u32>,
}

impl RecipeDraft {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.title.trim().is_empty() {
            return Err(DomainError::Validation("recipe title is required".to_string()));
        }
        Ok(())
    }

    /// Trimmed title, blank image URL dropped
    fn normalized(mut self) -> Self {
        self.title = self.title.trim().to_string();
        self.image_url = self
            .image_url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());
        self
    }
}
