//! Content Service — orchestrates the generation pipeline for one request.
//!
//! Flow: build_prompt → generate (one call) → extract → normalize → return.
//!
//! Every failure along the way is logged and replaced with fallback content, so
//! `get_summary` and `get_skills` always return something usable.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::generation::extractor::extract;
use crate::generation::fallback::{classify, fallback_skills, fallback_summary};
use crate::generation::normalizer::{normalize_skills, normalize_summary};
use crate::generation::prompts::{build_prompt, generation_params};
use crate::generation::{ContentKind, ContentLimits};
use crate::llm_client::{GenerationError, TextGenerator};

/// Why a pipeline run fell back. Never leaves this module.
#[derive(Debug, Error)]
enum PipelineError {
    #[error("generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("no {0} content found in model output")]
    EmptyExtraction(ContentKind),

    #[error("no usable skills left after normalization")]
    NoSkills,
}

/// Output of `generate_content`, one variant per content kind.
#[derive(Debug, Clone, PartialEq)]
pub enum GeneratedContent {
    Summary(String),
    Skills(Vec<String>),
}

/// Deterministic content for `kind`, used whenever the pipeline cannot produce any.
pub fn fallback_content(kind: ContentKind, job_title: &str) -> GeneratedContent {
    match kind {
        ContentKind::Summary => GeneratedContent::Summary(fallback_summary(job_title)),
        ContentKind::Skills => GeneratedContent::Skills(fallback_skills(job_title)),
    }
}

/// Turns job titles into resume content. Holds the shared generation backend.
pub struct ContentService {
    generator: Arc<dyn TextGenerator>,
    limits: ContentLimits,
}

impl ContentService {
    pub fn new(generator: Arc<dyn TextGenerator>, limits: ContentLimits) -> Self {
        Self { generator, limits }
    }

    /// Dispatches to the operation for `kind`.
    pub async fn generate_content(&self, kind: ContentKind, job_title: &str) -> GeneratedContent {
        match kind {
            ContentKind::Summary => GeneratedContent::Summary(self.get_summary(job_title).await),
            ContentKind::Skills => GeneratedContent::Skills(self.get_skills(job_title).await),
        }
    }

    /// Returns a first-person professional summary for `job_title`.
    pub async fn get_summary(&self, job_title: &str) -> String {
        match self.run_summary(job_title).await {
            Ok(summary) => {
                info!("Generated summary: {summary}");
                summary
            }
            Err(e) => {
                warn!("Error generating summary for '{job_title}': {e}. Using fallback");
                fallback_summary(job_title)
            }
        }
    }

    /// Returns up to `max_skills` skills for `job_title`.
    pub async fn get_skills(&self, job_title: &str) -> Vec<String> {
        match self.run_skills(job_title).await {
            Ok(skills) => {
                info!("Generated skills: {skills:?}");
                skills
            }
            Err(e) => {
                warn!(
                    "Error generating skills for '{job_title}': {e}. Using {:?} fallback",
                    classify(job_title)
                );
                fallback_skills(job_title)
            }
        }
    }

    async fn run_summary(&self, job_title: &str) -> Result<String, PipelineError> {
        let span = self.generate_span(ContentKind::Summary, job_title).await?;
        Ok(normalize_summary(&span, job_title, &self.limits))
    }

    async fn run_skills(&self, job_title: &str) -> Result<Vec<String>, PipelineError> {
        let span = self.generate_span(ContentKind::Skills, job_title).await?;
        let skills = normalize_skills(&span, &self.limits);
        if skills.is_empty() {
            return Err(PipelineError::NoSkills);
        }
        Ok(skills)
    }

    /// Runs the single generation call for `kind` and extracts its section from
    /// the first returned sequence.
    async fn generate_span(
        &self,
        kind: ContentKind,
        job_title: &str,
    ) -> Result<String, PipelineError> {
        let prompt = build_prompt(kind, job_title);
        let params = generation_params(kind);

        let sequences = self.generator.generate(&prompt, &params).await?;
        let raw = sequences
            .into_iter()
            .next()
            .ok_or(GenerationError::EmptyOutput)?;
        debug!("Raw {kind} output: {raw:?}");

        let span = extract(&raw, kind, &prompt);
        if span.is_empty() {
            return Err(PipelineError::EmptyExtraction(kind));
        }
        Ok(span)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::llm_client::GenerationParams;

    /// Echoes the prompt followed by a fixed continuation, like a local pipeline.
    struct EchoGenerator {
        continuation: String,
        calls: AtomicUsize,
        last_params: Mutex<Option<GenerationParams>>,
    }

    impl EchoGenerator {
        fn new(continuation: &str) -> Self {
            Self {
                continuation: continuation.to_string(),
                calls: AtomicUsize::new(0),
                last_params: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for EchoGenerator {
        async fn generate(
            &self,
            prompt: &str,
            params: &GenerationParams,
        ) -> Result<Vec<String>, GenerationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_params.lock().unwrap() = Some(params.clone());
            Ok(vec![format!("{prompt}{}", self.continuation)])
        }
    }

    /// Returns fixed sequences without echoing anything.
    struct ScriptedGenerator(Vec<String>);

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        async fn generate(
            &self,
            _prompt: &str,
            _params: &GenerationParams,
        ) -> Result<Vec<String>, GenerationError> {
            Ok(self.0.clone())
        }
    }

    struct FailingGenerator {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl TextGenerator for FailingGenerator {
        async fn generate(
            &self,
            _prompt: &str,
            _params: &GenerationParams,
        ) -> Result<Vec<String>, GenerationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(GenerationError::Timeout(60))
        }
    }

    fn service(generator: impl TextGenerator + 'static) -> ContentService {
        ContentService::new(Arc::new(generator), ContentLimits::default())
    }

    fn is_first_person(summary: &str) -> bool {
        let lower = summary.to_lowercase();
        ["i am", "i ", "i'm", "i've", "i have"]
            .iter()
            .any(|o| lower.starts_with(*o))
    }

    #[tokio::test]
    async fn test_summary_from_echoed_output() {
        let generator = Arc::new(EchoGenerator::new(
            " acute care,   triage and patient advocacy.. ENDMARKER ignored",
        ));
        let svc = ContentService::new(generator.clone(), ContentLimits::default());

        let summary = svc.get_summary("Nurse").await;
        assert_eq!(
            summary,
            "I am a skilled Nurse with experience in acute care, triage and patient advocacy."
        );
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
        let params = generator.last_params.lock().unwrap().clone().unwrap();
        assert_eq!(params, generation_params(ContentKind::Summary));
    }

    #[tokio::test]
    async fn test_skills_from_echoed_numbered_list() {
        let svc = service(EchoGenerator::new(
            " Python\n2. SQL\n3. python\n4. Git.\n5. R\n\nThe end of the list",
        ));
        assert_eq!(svc.get_skills("Data Analyst").await, vec!["Python", "SQL", "Git"]);
    }

    #[tokio::test]
    async fn test_summary_without_marker_or_echo() {
        let svc = service(ScriptedGenerator(vec![
            "  designing resilient services for payments teams ".to_string(),
        ]));
        assert_eq!(
            svc.get_summary("Backend Developer").await,
            "I am a skilled Backend Developer with designing resilient services for payments teams."
        );
    }

    #[tokio::test]
    async fn test_generation_failure_returns_fallback_summary() {
        let generator = Arc::new(FailingGenerator {
            calls: AtomicUsize::new(0),
        });
        let svc = ContentService::new(generator.clone(), ContentLimits::default());

        assert_eq!(svc.get_summary("Nurse").await, fallback_summary("Nurse"));
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1, "no retries");
    }

    #[tokio::test]
    async fn test_generation_failure_returns_fallback_skills() {
        let svc = service(FailingGenerator {
            calls: AtomicUsize::new(0),
        });
        assert_eq!(
            svc.get_skills("Software Engineer").await,
            fallback_skills("Software Engineer")
        );
        assert_eq!(svc.get_skills("Software Engineer").await[1], "JavaScript");
    }

    #[tokio::test]
    async fn test_no_sequences_falls_back() {
        let svc = service(ScriptedGenerator(vec![]));
        assert_eq!(svc.get_summary("Chef").await, fallback_summary("Chef"));
        assert_eq!(svc.get_skills("Chef").await, fallback_skills("Chef"));
    }

    #[tokio::test]
    async fn test_empty_extraction_falls_back() {
        let svc = service(ScriptedGenerator(vec!["SUMMARY:   \n".to_string()]));
        assert_eq!(svc.get_summary("Pilot").await, fallback_summary("Pilot"));
    }

    #[tokio::test]
    async fn test_unusable_skills_fall_back() {
        let svc = service(ScriptedGenerator(vec!["SKILLS: 1. a 2. b 3. ok".to_string()]));
        assert_eq!(svc.get_skills("Data Manager").await, fallback_skills("Data Manager"));
    }

    #[tokio::test]
    async fn test_generate_content_dispatches_on_kind() {
        let svc = service(FailingGenerator {
            calls: AtomicUsize::new(0),
        });
        assert_eq!(
            svc.generate_content(ContentKind::Summary, "Nurse").await,
            GeneratedContent::Summary(fallback_summary("Nurse"))
        );
        assert_eq!(
            svc.generate_content(ContentKind::Skills, "Nurse").await,
            GeneratedContent::Skills(fallback_skills("Nurse"))
        );
    }

    #[test]
    fn test_fallback_content_matches_kind() {
        assert_eq!(
            fallback_content(ContentKind::Summary, "Nurse"),
            GeneratedContent::Summary(fallback_summary("Nurse"))
        );
        assert_eq!(
            fallback_content(ContentKind::Skills, "Data Manager"),
            GeneratedContent::Skills(fallback_skills("Data Manager"))
        );
    }

    #[tokio::test]
    async fn test_output_shape_holds_across_backends_and_titles() {
        let long = "word ".repeat(200);
        let outputs = [
            "",
            "SUMMARY:",
            "random words without any structure at all",
            "SKILLS:\n1. Rust\n2. rust\n3. Tokio",
            "SUMMARY: I'm great.... really",
            long.as_str(),
        ];
        let titles = ["Nurse", "Data Manager", "UX Designer", "Welder", "Software Engineer"];

        for output in outputs {
            let svc = service(ScriptedGenerator(vec![output.to_string()]));
            for title in titles {
                let summary = svc.get_summary(title).await;
                assert!(!summary.is_empty());
                assert!(is_first_person(&summary), "{summary:?}");
                assert!(summary.ends_with(['.', '!', '?']), "{summary:?}");
                assert!(summary.split_whitespace().count() <= 61, "{summary:?}");

                let skills = svc.get_skills(title).await;
                assert!((1..=10).contains(&skills.len()), "{skills:?}");
                let mut seen = std::collections::HashSet::new();
                for skill in &skills {
                    assert!(!skill.trim().is_empty());
                    assert!(seen.insert(skill.to_lowercase()), "duplicate in {skills:?}");
                }
            }
        }
    }
}
