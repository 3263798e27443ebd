//! AI Commands
//!
//! Frontend wrappers around the generation client; errors come back as
//! display strings.

use recipe_core::generation::{
    GenerationClient, ProjectBrief, ProjectBriefRequest, RecipeFillRequest, SqlRequest,
};
use recipe_core::{QuizQuestion, QuizRequest, RecipeDraft};

/// Ask the AI service to fill a recipe from its title
pub async fn fill_recipe(
    client: GenerationClient,
    title: String,
    category: Option<String>,
    lang: String,
) -> Result<RecipeDraft, String> {
    let request = RecipeFillRequest {
        title: title.clone(),
        category,
        lang: Some(lang),
    };
    tracing::info!(%title, "[AI] filling recipe");
    client
        .fill_recipe(&request)
        .await
        .map(|fill| fill.into_draft(&title))
        .map_err(|e| e.to_string())
}

/// Generate a picture for a recipe title; returns the hosted URL
pub async fn generate_image(client: GenerationClient, text: String) -> Result<String, String> {
    tracing::info!(%text, "[AI] generating image");
    client.generate_image(&text).await.map_err(|e| e.to_string())
}

/// Next quiz batch; `request.old_qs` keeps the service from repeating itself
pub async fn fetch_quiz(
    client: GenerationClient,
    request: QuizRequest,
) -> Result<Vec<QuizQuestion>, String> {
    tracing::info!(asked = request.old_qs.len(), "[AI] fetching quiz");
    client.quiz(&request).await.map_err(|e| e.to_string())
}

/// Free-text question to SQL
pub async fn free_text_sql(client: GenerationClient, question: String) -> Result<String, String> {
    tracing::info!(%question, "[AI] converting to SQL");
    client
        .free_text_sql(&SqlRequest { q: question })
        .await
        .map_err(|e| e.to_string())
}

pub async fn project_brief(
    client: GenerationClient,
    request: ProjectBriefRequest,
) -> Result<ProjectBrief, String> {
    tracing::info!("[AI] requesting project brief");
    client.project_brief(&request).await.map_err(|e| e.to_string())
}
