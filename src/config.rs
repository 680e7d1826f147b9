//! Loading service configuration (catalog/model endpoints + prompt templates) from TOML,
//! with environment overrides.
//!
//! See `AppConfig` and `Prompts` for the expected schema. The model API key is never
//! read from TOML; it comes from `MODEL_API_KEY` only.

use serde::Deserialize;
use tracing::{error, info};

pub const DEFAULT_CATALOG_URL: &str = "https://leetcode.com/api/problems/all/";
pub const DEFAULT_MODEL_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
  #[serde(default)]
  pub catalog: CatalogCfg,
  #[serde(default)]
  pub model: ModelCfg,
  #[serde(default)]
  pub prompts: Prompts,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct CatalogCfg {
  pub url: String,
  pub timeout_secs: u64,
}

impl Default for CatalogCfg {
  fn default() -> Self {
    Self { url: DEFAULT_CATALOG_URL.into(), timeout_secs: 20 }
  }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ModelCfg {
  pub base_url: String,
  pub model: String,
  pub timeout_secs: u64,
}

impl Default for ModelCfg {
  fn default() -> Self {
    Self { base_url: DEFAULT_MODEL_BASE_URL.into(), model: DEFAULT_MODEL.into(), timeout_secs: 30 }
  }
}

/// Prompt templates, one per advice mode.
/// Placeholders: `{title}`, `{difficulty}`, and `{language}` for the solution templates.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Prompts {
  pub hint: String,
  pub easy_solution: String,
  pub optimal_solution: String,
}

impl Default for Prompts {
  fn default() -> Self {
    Self {
      hint: "You're an expert coding mentor. Based on the following problem details, \
provide hints and strategies to solve it without revealing the exact solution.\n\n\
Problem Title: {title}\n\
Difficulty: {difficulty}\n\
Provide an explanation of the general approach and any relevant algorithms or data structures.".into(),
      easy_solution: "You're a beginner-friendly coding mentor. Write an easy-to-understand solution for the following problem \
in {language}. Use clear, beginner-friendly comments to explain each step.\n\n\
Problem Title: {title}\n\
Difficulty: {difficulty}\n\
Provide a simple solution with step-by-step explanations.".into(),
      optimal_solution: "You're an expert coder. Write the most optimal solution for the following problem \
in {language}. Use efficient algorithms and data structures, and add concise comments \
to explain the logic.\n\n\
Problem Title: {title}\n\
Difficulty: {difficulty}\n\
Provide the best solution with minimal time and space complexity.".into(),
    }
  }
}

impl AppConfig {
  /// Load from LEETMATE_CONFIG_PATH (if set and readable), then apply env overrides.
  pub fn from_env() -> Self {
    let mut cfg = load_config_from_env().unwrap_or_default();
    cfg.apply_env_overrides(|k| std::env::var(k).ok());
    cfg
  }

  fn apply_env_overrides(&mut self, get: impl Fn(&str) -> Option<String>) {
    if let Some(url) = get("CATALOG_URL") {
      self.catalog.url = url;
    }
    if let Some(base) = get("MODEL_BASE_URL") {
      self.model.base_url = base;
    }
    if let Some(model) = get("MODEL_NAME") {
      self.model.model = model;
    }
  }
}

/// Attempt to load `AppConfig` from LEETMATE_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_config_from_env() -> Option<AppConfig> {
  let path = std::env::var("LEETMATE_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<AppConfig>(&s) {
      Ok(cfg) => {
        info!(target: "leetmate", %path, "Loaded config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "leetmate", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "leetmate", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}
