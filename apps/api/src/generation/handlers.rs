//! Axum route handlers for the Generation API.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, info_span, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::service::{fallback_content, GeneratedContent};
use crate::generation::ContentKind;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiContentRequest {
    /// "summary" or "skills"
    #[serde(default)]
    pub section: String,
    #[serde(default)]
    pub job_title: String,
}

/// Exactly one field is set per response.
#[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct AiContentResponse {
    pub summary: Option<String>,
    pub skills: Option<Vec<String>>,
    pub error: Option<String>,
}

impl From<GeneratedContent> for AiContentResponse {
    fn from(content: GeneratedContent) -> Self {
        match content {
            GeneratedContent::Summary(summary) => Self {
                summary: Some(summary),
                ..Self::default()
            },
            GeneratedContent::Skills(skills) => Self {
                skills: Some(skills),
                ..Self::default()
            },
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/generate-ai-content
///
/// Generates a summary or a skill list for a job title. Generation problems
/// degrade to fallback content; only bad input is rejected (400), including
/// bodies that are not valid JSON for `AiContentRequest`.
pub async fn handle_generate_ai_content(
    State(state): State<AppState>,
    payload: Result<Json<AiContentRequest>, JsonRejection>,
) -> Result<Json<AiContentResponse>, AppError> {
    let Json(request) =
        payload.map_err(|rejection| AppError::Validation(rejection.body_text()))?;

    let job_title = request.job_title.trim().to_string();
    if job_title.is_empty() {
        return Err(AppError::Validation("Job title is required".to_string()));
    }

    let kind: ContentKind = request.section.parse().map_err(AppError::Validation)?;

    let request_id = Uuid::new_v4();
    let span = info_span!("generate_content", %request_id, section = %kind, job_title = %job_title);
    info!(parent: &span, "Generating {kind} for job title: {job_title}");

    // The pipeline runs in its own task so a panic inside it still yields content.
    let content = state.content.clone();
    let title = job_title.clone();
    let task = tokio::spawn(
        async move { content.generate_content(kind, &title).await }.instrument(span.clone()),
    );

    let content = match task.await {
        Ok(content) => {
            info!(parent: &span, "Successfully generated {kind}");
            content
        }
        Err(e) => {
            error!(parent: &span, "Content task for {kind} failed: {e}. Using fallback");
            fallback_content(kind, &job_title)
        }
    };

    Ok(Json(content.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_uses_camel_case_job_title() {
        let request: AiContentRequest = serde_json::from_value(serde_json::json!({
            "section": "skills",
            "jobTitle": "Data Analyst"
        }))
        .unwrap();
        assert_eq!(request.section, "skills");
        assert_eq!(request.job_title, "Data Analyst");
    }

    #[test]
    fn test_request_missing_fields_default_to_empty() {
        let request: AiContentRequest = serde_json::from_str("{}").unwrap();
        assert!(request.section.is_empty());
        assert!(request.job_title.is_empty());
    }

    #[test]
    fn test_response_sets_only_the_generated_field() {
        let response = AiContentResponse::from(GeneratedContent::Skills(vec!["SQL".to_string()]));
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"summary": null, "skills": ["SQL"], "error": null})
        );
    }
}
