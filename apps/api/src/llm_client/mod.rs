/// LLM Client — the single point of entry for all text-generation calls.
///
/// ARCHITECTURAL RULE: No other module may talk to the generation backend directly.
/// Callers depend on the `TextGenerator` trait; `InferenceClient` is the HTTP backend
/// used in production and test code swaps in scripted doubles.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    #[error("Generation backend timed out after {0}s")]
    Timeout(u64),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Generation backend returned no sequences")]
    EmptyOutput,
}

/// Sampling parameters for one generation call.
///
/// Field names follow the text-generation pipeline keyword arguments, so the
/// struct serializes straight into the endpoint's `parameters` object. This
/// matches an endpoint that forwards kwargs to a `transformers` pipeline; TGI
/// style backends want `max_new_tokens` in place of `max_length`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationParams {
    pub max_length: u32,
    pub min_length: u32,
    pub do_sample: bool,
    pub temperature: f32,
    pub top_p: f32,
    pub num_return_sequences: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_repeat_ngram_size: Option<u32>,
}

/// The generation capability. Implementations must be safe to call from
/// concurrent requests.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Returns the raw generated sequences for `prompt`, prompt echo included
    /// when the backend echoes it.
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<Vec<String>, GenerationError>;
}

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: &'a GenerationParams,
    options: InferenceOptions,
}

#[derive(Debug, Serialize)]
struct InferenceOptions {
    wait_for_model: bool,
    use_cache: bool,
}

#[derive(Debug, Deserialize)]
struct GeneratedSequence {
    generated_text: String,
}

/// Endpoints return either a list of sequences or a single object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Many(Vec<GeneratedSequence>),
    One(GeneratedSequence),
}

impl InferenceResponse {
    fn into_texts(self) -> Vec<String> {
        match self {
            InferenceResponse::Many(seqs) => seqs.into_iter().map(|s| s.generated_text).collect(),
            InferenceResponse::One(seq) => vec![seq.generated_text],
        }
    }
}

#[derive(Debug, Deserialize)]
struct InferenceErrorBody {
    error: String,
}

/// HTTP client for a Hugging Face style text-generation endpoint.
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Clone)]
pub struct InferenceClient {
    client: Client,
    url: String,
    api_token: Option<String>,
    timeout_secs: u64,
}

impl InferenceClient {
    pub fn new(
        url: String,
        api_token: Option<String>,
        timeout_secs: u64,
    ) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(GenerationError::Http)?;

        Ok(Self {
            client,
            url,
            api_token,
            timeout_secs,
        })
    }

    fn map_transport_error(&self, e: reqwest::Error) -> GenerationError {
        if e.is_timeout() {
            GenerationError::Timeout(self.timeout_secs)
        } else {
            GenerationError::Http(e)
        }
    }
}

#[async_trait]
impl TextGenerator for InferenceClient {
    /// Makes exactly one call to the endpoint. No retries: the caller owns the
    /// failure policy.
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<Vec<String>, GenerationError> {
        let request_body = InferenceRequest {
            inputs: prompt,
            parameters: params,
            options: InferenceOptions {
                wait_for_model: true,
                use_cache: false,
            },
        };

        let mut request = self.client.post(&self.url).json(&request_body);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        if !status.is_success() {
            warn!("Generation API returned {}: {}", status, body);
            let message = serde_json::from_str::<InferenceErrorBody>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let texts = parse_sequences(&body)?;
        debug!("Generation call succeeded: {} sequence(s)", texts.len());
        Ok(texts)
    }
}

/// Parses an endpoint body into its generated texts. An empty list is an error.
fn parse_sequences(body: &str) -> Result<Vec<String>, GenerationError> {
    let parsed: InferenceResponse = serde_json::from_str(body)?;
    let texts = parsed.into_texts();
    if texts.is_empty() {
        return Err(GenerationError::EmptyOutput);
    }
    Ok(texts)
}
