//! Core behaviors shared by both HTTP and WebSocket handlers.
//!
//! This includes:
//!   - Resolving a problem id through the catalog
//!   - Composing the prompt for the requested advice mode
//!   - Calling the model, substituting the per-mode fallback text on failure

use tracing::{error, info, instrument, warn};

use crate::domain::{AdviceMode, Language, PromptRequest};
use crate::error::{AppError, GenerationError};
use crate::prompt::compose;
use crate::protocol::{AdviceOut, ProblemOut};
use crate::state::AppState;

fn validate_id(id: u32) -> Result<u32, AppError> {
  if id == 0 {
    return Err(AppError::InvalidRequest("question number must be at least 1".into()));
  }
  Ok(id)
}

#[instrument(level = "info", skip(state), fields(%id))]
pub async fn lookup_problem(state: &AppState, id: u32) -> Result<ProblemOut, AppError> {
  let id = validate_id(id)?;
  let record = state.catalog.resolve(id).await?;
  Ok(ProblemOut::from(&record))
}

#[instrument(level = "info", skip(state), fields(%id, ?mode))]
pub async fn request_advice(
  state: &AppState,
  id: u32,
  mode: AdviceMode,
  language: Option<&str>,
) -> Result<AdviceOut, AppError> {
  let id = validate_id(id)?;
  // Validate the language before spending a catalog round-trip.
  let language = language
    .filter(|s| !s.trim().is_empty())
    .map(str::parse::<Language>)
    .transpose()?;
  if mode.needs_language() && language.is_none() {
    return Err(AppError::InvalidRequest(format!("a target language is required for mode {:?}", mode)));
  }

  let problem = state.catalog.resolve(id).await?;
  let request = PromptRequest::new(problem, mode, language)?;
  let prompt = compose(&state.prompts, &request);

  let (text, fallback) = match generate(state, &prompt).await {
    Ok(text) => {
      info!(target: "advice", %id, ?mode, response_len = text.len(), "Advice generated");
      (text, false)
    }
    Err(e) => {
      error!(target: "advice", %id, ?mode, error = %e, "Generation failed; using fallback text.");
      (mode.fallback_text().to_string(), true)
    }
  };

  Ok(AdviceOut {
    problem: ProblemOut::from(&request.problem),
    mode,
    heading: mode.heading().to_string(),
    text,
    code_language: if mode.needs_language() { request.language.map(Language::code_fence) } else { None },
    fallback,
  })
}

async fn generate(state: &AppState, prompt: &str) -> Result<String, GenerationError> {
  match &state.gemini {
    Some(g) => g.generate(prompt).await,
    None => {
      warn!(target: "advice", "No model configured.");
      Err(GenerationError::NotConfigured)
    }
  }
}
