//! HTTP store
//!
//! REST client for the hosted catalog API. Every request carries the
//! bearer token when one is configured.

use async_trait::async_trait;
use percent_encoding::utf8_percent_encode;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;
use tracing::debug;

use super::error::{StoreError, StoreResult};
use super::traits::RecipeStore;
use crate::config::AppConfig;
use crate::domain::{Catalog, Category, Recipe, SiteEnvelope};
use crate::navigation::COMPONENT;

#[derive(Serialize)]
struct NewCategoryBody<'a> {
    name: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OrderBody<'a> {
    ordered_ids: &'a [String],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NewRecipeBody<'a> {
    recipe: &'a Recipe,
    category_id: &'a str,
}

#[derive(Debug, Clone)]
pub struct HttpRecipeStore {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpRecipeStore {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
            token: token.filter(|t| !t.is_empty()),
        }
    }

    /// `None` when no API URL is configured
    pub fn from_config(config: &AppConfig) -> Option<Self> {
        config
            .api_url
            .as_ref()
            .map(|url| Self::new(url.clone(), config.api_token.clone()))
    }

    /// `{base}/api/` followed by the percent-encoded segments
    pub(crate) fn endpoint(&self, segments: &[&str]) -> String {
        let mut url = format!("{}/api", self.base_url);
        for segment in segments {
            url.push('/');
            url.extend(utf8_percent_encode(segment, COMPONENT));
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let url = self.endpoint(segments);
        debug!(%method, %url, "store request");
        let builder = self.client.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> StoreResult<Response> {
        let res = builder.send().await?;
        let status = res.status();
        if status.is_success() {
            return Ok(res);
        }
        let body = res.text().await.unwrap_or_default();
        let message = if body.trim().is_empty() {
            status.canonical_reason().unwrap_or("request failed").to_string()
        } else {
            body
        };
        Err(StoreError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait(?Send)]
impl RecipeStore for HttpRecipeStore {
    async fn load(&self) -> StoreResult<Catalog> {
        let res = self.send(self.request(Method::GET, &["site"])).await?;
        let envelope: SiteEnvelope = res.json().await?;
        Ok(envelope.into_catalog())
    }

    async fn commit_category_add(&self, name: &str) -> StoreResult<Category> {
        let builder = self
            .request(Method::POST, &["categories"])
            .json(&NewCategoryBody { name });
        Ok(self.send(builder).await?.json().await?)
    }

    async fn commit_category_delete(&self, id: &str) -> StoreResult<()> {
        self.send(self.request(Method::DELETE, &["categories", id]))
            .await?;
        Ok(())
    }

    async fn commit_category_reorder(&self, ordered_ids: &[String]) -> StoreResult<()> {
        let builder = self
            .request(Method::PUT, &["categories", "order"])
            .json(&OrderBody { ordered_ids });
        self.send(builder).await?;
        Ok(())
    }

    async fn commit_recipe_add(&self, recipe: &Recipe, category_id: &str) -> StoreResult<Recipe> {
        let builder = self
            .request(Method::POST, &["recipes"])
            .json(&NewRecipeBody {
                recipe,
                category_id,
            });
        Ok(self.send(builder).await?.json().await?)
    }

    async fn commit_recipe_update(&self, recipe: &Recipe) -> StoreResult<()> {
        let builder = self
            .request(Method::PUT, &["recipes", &recipe.id])
            .json(recipe);
        self.send(builder).await?;
        Ok(())
    }

    async fn commit_recipe_delete(&self, id: &str) -> StoreResult<()> {
        self.send(self.request(Method::DELETE, &["recipes", id]))
            .await?;
        Ok(())
    }

    async fn commit_recipe_reorder(
        &self,
        category_id: &str,
        ordered_ids: &[String],
    ) -> StoreResult<()> {
        let builder = self
            .request(Method::PUT, &["categories", category_id, "recipes", "order"])
            .json(&OrderBody { ordered_ids });
        self.send(builder).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_encodes_segments() {
        let store = HttpRecipeStore::new("https://api.example.com/", None);
        assert_eq!(
            store.endpoint(&["categories", "cat 1/x", "recipes", "order"]),
            "https://api.example.com/api/categories/cat%201%2Fx/recipes/order"
        );
        assert_eq!(store.endpoint(&["site"]), "https://api.example.com/api/site");
    }

    #[test]
    fn test_blank_token_is_dropped() {
        let store = HttpRecipeStore::new("http://localhost:5000", Some(String::new()));
        assert!(store.token.is_none());
    }

    #[test]
    fn test_from_config_requires_api_url() {
        let config = AppConfig::default();
        assert!(HttpRecipeStore::from_config(&config).is_none());

        let config = AppConfig {
            api_url: Some("http://localhost:5000".into()),
            api_token: Some("1234".into()),
            ..AppConfig::default()
        };
        let store = HttpRecipeStore::from_config(&config).unwrap();
        assert_eq!(store.token.as_deref(), Some("1234"));
    }

    #[test]
    fn test_bodies_use_camel_case() {
        let ids = vec!["a".to_string(), "b".to_string()];
        let body = serde_json::to_value(OrderBody { ordered_ids: &ids }).unwrap();
        assert_eq!(body, serde_json::json!({ "orderedIds": ["a", "b"] }));
    }
}
