//! WebSocket upgrade + message loop. Each client message is parsed as JSON and
//! forwarded to core logic. We reply with a single JSON message per request.

use std::sync::Arc;
use axum::{
  extract::{
    ws::{Message, WebSocket},
    State, WebSocketUpgrade,
  },
  response::IntoResponse,
};
use tracing::{info, error, instrument, debug};

use crate::error::AppError;
use crate::protocol::{ClientWsMessage, ServerWsMessage};
use crate::logic::*;
use crate::state::AppState;

#[instrument(level = "info", skip(state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
  info!(target: "leetmate", "WebSocket upgrade requested");
  ws.on_upgrade(move |socket| handle_ws(socket, state))
}

#[instrument(level = "info", skip(socket, state))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
  info!(target: "leetmate", "WebSocket connected");
  while let Some(Ok(msg)) = socket.recv().await {
    match msg {
      Message::Text(txt) => {
        let out = reply_to_text(&txt, &state).await;
        if let Err(e) = socket.send(Message::Text(out)).await {
          error!(target: "leetmate", error = %e, "WS send error");
          break;
        }
      }
      Message::Ping(payload) => { let _ = socket.send(Message::Pong(payload)).await; }
      Message::Close(_) => break,
      _ => {}
    }
  }
  info!(target: "leetmate", "WebSocket disconnected");
}

/// Parse, dispatch, serialize response.
pub(crate) async fn reply_to_text(txt: &str, state: &AppState) -> String {
  let reply_msg = match serde_json::from_str::<ClientWsMessage>(txt) {
    Ok(incoming) => {
      debug!(target: "leetmate", "WS received: {:?}", &incoming);
      handle_client_ws(incoming, state).await
    }
    Err(e) => AppError::InvalidRequest(format!("Invalid JSON: {}", e)).into(),
  };

  serde_json::to_string(&reply_msg).unwrap_or_else(|e| {
    serde_json::json!({ "type": "error", "code": "INTERNAL", "message": format!("Serialization error: {}", e) }).to_string()
  })
}

#[instrument(level = "info", skip(state))]
async fn handle_client_ws(msg: ClientWsMessage, state: &AppState) -> ServerWsMessage {
  match msg {
    ClientWsMessage::Ping => ServerWsMessage::Pong,

    ClientWsMessage::Lookup { id } => match lookup_problem(state, id).await {
      Ok(problem) => {
        info!(target: "catalog", %id, "WS lookup served");
        ServerWsMessage::Problem { problem }
      }
      Err(e) => e.into(),
    },

    ClientWsMessage::Advice { id, mode, language } => {
      match request_advice(state, id, mode, language.as_deref()).await {
        Ok(advice) => {
          info!(target: "advice", %id, ?mode, fallback = advice.fallback, "WS advice served");
          ServerWsMessage::Advice { advice }
        }
        Err(e) => e.into(),
      }
    }
  }
}
