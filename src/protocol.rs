//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::domain::{AdviceMode, Language, ProblemRecord};
use crate::error::{AppError, ErrorDetails};

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    Lookup {
        id: u32,
    },
    Advice {
        id: u32,
        mode: AdviceMode,
        #[serde(default)]
        language: Option<String>,
    },
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong,
    Problem {
        problem: ProblemOut,
    },
    Advice {
        #[serde(flatten)]
        advice: AdviceOut,
    },
    Error {
        #[serde(flatten)]
        error: ErrorDetails,
    },
}

impl From<AppError> for ServerWsMessage {
    fn from(e: AppError) -> Self {
        ServerWsMessage::Error { error: e.details() }
    }
}

/// DTO used by both WS and HTTP for problem delivery.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ProblemOut {
    pub id: u32,
    pub title: String,
    pub slug: String,
    pub difficulty: String,
    pub difficulty_color: String,
}

impl From<&ProblemRecord> for ProblemOut {
    fn from(p: &ProblemRecord) -> Self {
        ProblemOut {
            id: p.id,
            title: p.title.clone(),
            slug: p.slug.clone(),
            difficulty: p.difficulty.label().to_string(),
            difficulty_color: p.difficulty.color().to_string(),
        }
    }
}

/// Result of an advice request. `fallback` is true when the model call failed and
/// `text` holds the fixed per-mode placeholder instead.
#[derive(Debug, Clone, Serialize)]
pub struct AdviceOut {
    pub problem: ProblemOut,
    pub mode: AdviceMode,
    pub heading: String,
    pub text: String,
    /// Syntax-highlighting hint for solution modes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_language: Option<String>,
    pub fallback: bool,
}

//
// HTTP request/response DTOs
//

#[derive(Debug, Deserialize)]
pub struct ProblemQuery {
    pub id: u32,
}

#[derive(Debug, Deserialize)]
pub struct AdviceIn {
    pub id: u32,
    pub mode: AdviceMode,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Serialize)]
pub struct LanguagesOut {
    pub languages: Vec<&'static str>,
}

impl Default for LanguagesOut {
    fn default() -> Self {
        LanguagesOut { languages: Language::ALL.iter().map(|l| l.name()).collect() }
    }
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}
