//! AI generation client
//!
//! Thin wrappers over the remote AI endpoints. Payloads are explicit
//! structs: optional fields are sent only when non-empty, and required
//! free text is checked before any request goes out.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::domain::{DomainError, Ingredients, RecipeDraft};
use crate::quiz::{QuizQuestion, QuizRequest};
use crate::repository::StoreError;

#[derive(Debug, Clone, Error)]
pub enum GenerationError {
    #[error("AI service is not configured")]
    NotConfigured,

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Transport(#[from] StoreError),

    /// The service answered but left out the field we asked for
    #[error("AI service returned no {0}")]
    Empty(&'static str),
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        GenerationError::Transport(err.into())
    }
}

pub type GenerationResult<T> = Result<T, GenerationError>;

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

fn required(value: &str, what: &str) -> Result<String, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::Validation(format!("{} is required", what)));
    }
    Ok(trimmed.to_string())
}

// ===== Recipe fill =====

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecipeFillRequest {
    pub title: String,
    #[serde(skip_serializing_if = "is_blank")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub lang: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeFill {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub ingredients: Ingredients,
    #[serde(alias = "preparationSteps", default)]
    pub preparation: String,
    #[serde(alias = "s3Url", default)]
    pub image_url: Option<String>,
}

impl RecipeFill {
    /// Merge into a draft; the user's own title wins when the fill has none
    pub fn into_draft(self, fallback_title: &str) -> RecipeDraft {
        let title = if self.title.trim().is_empty() {
            fallback_title.to_string()
        } else {
            self.title
        };
        RecipeDraft {
            title,
            ingredients: self.ingredients,
            preparation_steps: self.preparation,
            image_url: self.image_url,
            prepare_time_minutes: None,
        }
    }
}

// ===== Project brief =====

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CharCountLimits {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirements: Option<u32>,
}

impl CharCountLimits {
    pub fn is_unset(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.requirements.is_none()
    }
}

fn limits_unset(limits: &Option<CharCountLimits>) -> bool {
    limits.map_or(true, |l| l.is_unset())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectBriefRequest {
    pub free_text: String,
    #[serde(skip_serializing_if = "is_blank")]
    pub lang: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub writing_style: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub job_role: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub job_type: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub years_exp: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub must_skills: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub nice_skills: Option<String>,
    #[serde(skip_serializing_if = "limits_unset")]
    pub char_count_limits: Option<CharCountLimits>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProjectBrief {
    pub title: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<String>,
    /// Anything else the service chose to return
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ===== SQL =====

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SqlRequest {
    pub q: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SqlAnswer {
    pub sql_query: Option<String>,
    pub sql: Option<String>,
}

impl SqlAnswer {
    pub fn query(&self) -> Option<&str> {
        self.sql_query
            .as_deref()
            .or(self.sql.as_deref())
            .filter(|q| !q.trim().is_empty())
    }
}

// ===== Image =====

#[derive(Debug, Clone, Serialize)]
struct ImageRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImageAnswer {
    s3_url: Option<String>,
    image_url: Option<String>,
}

// ===== Client =====

#[derive(Debug, Clone)]
pub struct GenerationClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl GenerationClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.is_empty()),
        }
    }

    pub fn from_config(config: &AppConfig) -> Option<Self> {
        config
            .ai_base()
            .map(|base| Self::new(base, config.api_token.clone()))
    }

    pub(crate) fn endpoint(&self, name: &str) -> String {
        format!("{}/api/ai/{}", self.base_url, name)
    }

    async fn post<B, T>(&self, name: &str, body: &B) -> GenerationResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(name);
        debug!(%url, "AI request");
        let mut builder = self.client.post(url).json(body);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        let res = builder.send().await?;
        let status = res.status();
        if !status.is_success() {
            let message = res.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), endpoint = name, "AI request failed");
            return Err(StoreError::Status {
                status: status.as_u16(),
                message,
            }
            .into());
        }
        Ok(res.json::<T>().await?)
    }

    /// Fill ingredients, steps and an image for a recipe title
    pub async fn fill_recipe(&self, request: &RecipeFillRequest) -> GenerationResult<RecipeFill> {
        let request = RecipeFillRequest {
            title: required(&request.title, "recipe title")?,
            ..request.clone()
        };
        self.post("recipe", &request).await
    }

    pub async fn project_brief(
        &self,
        request: &ProjectBriefRequest,
    ) -> GenerationResult<ProjectBrief> {
        let request = ProjectBriefRequest {
            free_text: required(&request.free_text, "free text")?,
            ..request.clone()
        };
        self.post("project-ai", &request).await
    }

    /// Natural-language question to a SQL query
    pub async fn free_text_sql(&self, request: &SqlRequest) -> GenerationResult<String> {
        let request = SqlRequest {
            q: required(&request.q, "question")?,
        };
        let answer: SqlAnswer = self.post("get-sql-q", &request).await?;
        answer
            .query()
            .map(str::to_string)
            .ok_or(GenerationError::Empty("SQL query"))
    }

    /// Next batch of quiz questions, normalized
    pub async fn quiz(&self, request: &QuizRequest) -> GenerationResult<Vec<QuizQuestion>> {
        if request.number_of_questions == 0 || request.number_of_possible_answers < 2 {
            return Err(DomainError::Validation(
                "a quiz needs at least one question with two answers".to_string(),
            )
            .into());
        }
        let response: serde_json::Value = self.post("react-questionaire", request).await?;
        let questions = QuizQuestion::from_response(&response);
        if questions.is_empty() {
            return Err(GenerationError::Empty("questions"));
        }
        Ok(questions)
    }

    /// Generate an image from a description; returns its hosted URL
    pub async fn generate_image(&self, text: &str) -> GenerationResult<String> {
        let text = required(text, "image description")?;
        let answer: ImageAnswer = self.post("image", &ImageRequest { text: &text }).await?;
        answer
            .s3_url
            .or(answer.image_url)
            .filter(|url| !url.trim().is_empty())
            .ok_or(GenerationError::Empty("image URL"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn offline_client() -> GenerationClient {
        // port 9 (discard); validation must fail before anything is sent
        GenerationClient::new("http://127.0.0.1:9/", Some("1234".into()))
    }

    #[test]
    fn test_recipe_fill_request_omits_empty_fields() {
        let request = RecipeFillRequest {
            title: "Shakshuka".into(),
            category: Some("  ".into()),
            lang: Some("he".into()),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "title": "Shakshuka", "lang": "he" })
        );
    }

    #[test]
    fn test_project_brief_limits_only_when_set() {
        let mut request = ProjectBriefRequest {
            free_text: "backend developer".into(),
            job_role: Some("Engineer".into()),
            years_exp: Some(String::new()),
            char_count_limits: Some(CharCountLimits::default()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "freeText": "backend developer", "jobRole": "Engineer" })
        );

        request.char_count_limits = Some(CharCountLimits {
            title: Some(100),
            ..Default::default()
        });
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["charCountLimits"], json!({ "title": 100 }));
    }

    #[test]
    fn test_fill_response_accepts_either_shape() {
        let fill: RecipeFill = serde_json::from_value(json!({
            "title": "",
            "ingredients": ["eggs", "tomatoes"],
            "preparationSteps": "fry",
            "s3Url": "https://img/x.png"
        }))
        .unwrap();
        let draft = fill.into_draft("Shakshuka");
        assert_eq!(draft.title, "Shakshuka");
        assert_eq!(draft.ingredients.lines(), ["eggs", "tomatoes"]);
        assert_eq!(draft.image_url.as_deref(), Some("https://img/x.png"));
    }

    #[test]
    fn test_sql_answer_prefers_sql_query() {
        let answer: SqlAnswer =
            serde_json::from_value(json!({ "sqlQuery": "SELECT 1", "sql": "SELECT 2" })).unwrap();
        assert_eq!(answer.query(), Some("SELECT 1"));
        assert_eq!(SqlAnswer::default().query(), None);
    }

    #[test]
    fn test_endpoint_joins_base() {
        assert_eq!(
            offline_client().endpoint("recipe"),
            "http://127.0.0.1:9/api/ai/recipe"
        );
    }

    #[tokio::test]
    async fn test_blank_required_text_is_rejected_before_sending() {
        let client = offline_client();
        let err = client
            .fill_recipe(&RecipeFillRequest {
                title: "   ".into(),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::Domain(DomainError::Validation(_))));

        let err = client
            .free_text_sql(&SqlRequest { q: String::new() })
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::Domain(DomainError::Validation(_))));

        let err = client
            .quiz(&QuizRequest {
                number_of_possible_answers: 1,
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::Domain(DomainError::Validation(_))));

        let err = client.generate_image("").await.unwrap_err();
        assert!(matches!(err, GenerationError::Domain(DomainError::Validation(_))));
    }
}
