//! Application state: catalog client, optional Gemini client, and prompt templates.
//!
//! Built once at startup and shared read-only behind an `Arc`. Nothing here is
//! mutated per request.

use tracing::{info, instrument, warn};

use crate::catalog::CatalogClient;
use crate::config::{AppConfig, Prompts};
use crate::error::DirectoryError;
use crate::gemini::Gemini;

#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogClient,
    pub gemini: Option<Gemini>,
    pub prompts: Prompts,
}

impl AppState {
    /// Build state from config and env (the model key is read from MODEL_API_KEY).
    #[instrument(level = "info", skip_all)]
    pub fn new(cfg: AppConfig) -> Result<Self, DirectoryError> {
        let catalog = CatalogClient::new(&cfg.catalog)?;
        info!(target: "leetmate", url = %catalog.url, timeout_secs = cfg.catalog.timeout_secs, "Catalog client ready.");

        let gemini = Gemini::from_env(&cfg.model);
        if let Some(g) = &gemini {
            info!(target: "leetmate", base_url = %g.base_url, model = %g.model, "Gemini enabled.");
        } else {
            warn!(target: "leetmate", "Gemini disabled (no MODEL_API_KEY). Advice requests will return fallback text.");
        }

        Ok(Self::with_parts(catalog, gemini, cfg.prompts))
    }

    pub fn with_parts(catalog: CatalogClient, gemini: Option<Gemini>, prompts: Prompts) -> Self {
        Self { catalog, gemini, prompts }
    }
}
