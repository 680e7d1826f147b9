//! Minimal Gemini client for our use-case: one prompt in, plain text out.
//!
//! We only call `models/{model}:generateContent` with a single user turn.
//! Calls are instrumented and log model name, latency, and response sizes (not contents).
//!
//! NOTE: We never log the API key.

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

use crate::config::ModelCfg;
use crate::error::GenerationError;
use crate::util::trunc_for_log;

#[derive(Clone)]
pub struct Gemini {
  pub client: reqwest::Client,
  api_key: String,
  pub base_url: String,
  pub model: String,
}

impl Gemini {
  /// Build a client with an explicit credential.
  pub fn new(cfg: &ModelCfg, api_key: String) -> Result<Self, GenerationError> {
    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(cfg.timeout_secs))
      .build()
      .map_err(|e| GenerationError::Transport(e.to_string()))?;

    Ok(Self {
      client,
      api_key,
      base_url: cfg.base_url.trim_end_matches('/').to_string(),
      model: cfg.model.clone(),
    })
  }

  /// Construct the client if we find MODEL_API_KEY; otherwise return None.
  pub fn from_env(cfg: &ModelCfg) -> Option<Self> {
    let api_key = std::env::var("MODEL_API_KEY").ok().filter(|k| !k.trim().is_empty())?;
    match Self::new(cfg, api_key) {
      Ok(g) => Some(g),
      Err(e) => {
        error!(target: "leetmate", error = %e, "Failed to build Gemini client");
        None
      }
    }
  }

  /// Send `prompt` and return the model's text unmodified.
  #[instrument(level = "info", skip(self, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
  pub async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
    let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
    let req = GenerateContentRequest {
      contents: vec![ContentReq { role: "user".into(), parts: vec![PartReq { text: prompt.into() }] }],
    };

    let start = std::time::Instant::now();
    let res = self.client.post(&url)
      .header(USER_AGENT, "leetmate-backend/0.1")
      .header(CONTENT_TYPE, "application/json")
      .header("x-goog-api-key", &self.api_key)
      .json(&req).send().await
      .map_err(|e| GenerationError::Transport(e.to_string()))?;

    if !res.status().is_success() {
      let status = res.status();
      let body = res.text().await.unwrap_or_default();
      let message = extract_gemini_error(&body).unwrap_or_else(|| trunc_for_log(&body, 200));
      error!(target: "advice", %status, elapsed = ?start.elapsed(), "Gemini returned an error status");
      return Err(GenerationError::Http { status: status.as_u16(), message });
    }

    let body: GenerateContentResponse = res.json().await.map_err(|e| GenerationError::Decode(e.to_string()))?;
    if let Some(usage) = &body.usage_metadata {
      info!(target: "advice", prompt_tokens = ?usage.prompt_token_count, completion_tokens = ?usage.candidates_token_count, total_tokens = ?usage.total_token_count, "Gemini usage");
    }

    let text: String = body.candidates.into_iter()
      .next()
      .and_then(|c| c.content)
      .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
      .unwrap_or_default();

    if text.trim().is_empty() {
      return Err(GenerationError::Empty);
    }
    info!(target: "advice", elapsed = ?start.elapsed(), response_len = text.len(), "Model response received");
    debug!(target: "advice", preview = %trunc_for_log(&text, 80), "Model response preview");
    Ok(text)
  }
}

// --- generateContent DTOs ---

#[derive(Serialize)]
struct GenerateContentRequest {
  contents: Vec<ContentReq>,
}
#[derive(Serialize)]
struct ContentReq { role: String, parts: Vec<PartReq> }
#[derive(Serialize)]
struct PartReq { text: String }

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
  #[serde(default)] candidates: Vec<Candidate>,
  #[serde(default)] usage_metadata: Option<UsageMetadata>,
}
#[derive(Deserialize)]
struct Candidate { #[serde(default)] content: Option<ContentResp> }
#[derive(Deserialize)]
struct ContentResp { #[serde(default)] parts: Vec<PartResp> }
#[derive(Deserialize)]
struct PartResp { #[serde(default)] text: Option<String> }
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
  #[serde(default)] prompt_token_count: Option<u32>,
  #[serde(default)] candidates_token_count: Option<u32>,
  #[serde(default)] total_token_count: Option<u32>,
}

/// Try to extract a clean error message from a Gemini error body.
fn extract_gemini_error(body: &str) -> Option<String> {
  #[derive(Deserialize)]
  struct EWrap { error: EObj }
  #[derive(Deserialize)]
  struct EObj { message: String }
  serde_json::from_str::<EWrap>(body).ok().map(|w| w.error.message)
}
