//! LeetMate · coding-practice helper backend
//!
//! - Looks up a problem by number in the public LeetCode catalog
//! - Asks Gemini for hints, an easy solution, or an optimal solution
//! - Axum HTTP + WebSocket API, static page fallback (./static/index.html)
//!
//! Important env variables:
//!   PORT                 : u16 (default 3000)
//!   MODEL_API_KEY        : enables Gemini; advice falls back to placeholder text without it
//!   MODEL_BASE_URL       : default "https://generativelanguage.googleapis.com/v1beta"
//!   MODEL_NAME           : default "gemini-1.5-flash"
//!   CATALOG_URL          : default "https://leetcode.com/api/problems/all/"
//!   LEETMATE_CONFIG_PATH : path to TOML config (endpoints, timeouts, prompt templates)
//!   LOG_LEVEL            : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT           : "pretty" (default) or "json"

mod telemetry;
mod util;
mod error;
mod domain;
mod config;
mod catalog;
mod prompt;
mod gemini;
mod state;
mod protocol;
mod logic;
mod routes;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;

use crate::config::AppConfig;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  let state = Arc::new(AppState::new(AppConfig::from_env())?);
  let app = build_router(state);

  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "leetmate", %addr, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;
  info!(target: "leetmate", "Server stopped");
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!(target: "leetmate", error = %e, "Failed to listen for Ctrl-C");
    std::future::pending::<()>().await;
  }
}
