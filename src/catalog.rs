//! Problem directory client.
//!
//! The catalog endpoint has no per-id filter, so every lookup downloads the full
//! problem list and scans it for the requested frontend id.
//!
//! Fetch failures (transport, HTTP status, malformed payload) are reported as
//! `DirectoryError::Fetch` and are never folded into `NotFound`.

use std::time::Duration;

use reqwest::header::{ACCEPT, USER_AGENT};
use serde::Deserialize;
use tracing::{debug, error, info, instrument};

use crate::config::CatalogCfg;
use crate::domain::{Difficulty, ProblemRecord};
use crate::error::DirectoryError;

#[derive(Clone)]
pub struct CatalogClient {
  pub client: reqwest::Client,
  pub url: String,
}

// --- Catalog DTOs ---

#[derive(Debug, Deserialize)]
pub struct CatalogPayload {
  pub stat_status_pairs: Vec<CatalogEntry>,
}

#[derive(Debug, Deserialize)]
pub struct CatalogEntry {
  pub stat: CatalogStat,
  pub difficulty: CatalogDifficulty,
}

#[derive(Debug, Deserialize)]
pub struct CatalogStat {
  pub frontend_question_id: u32,
  #[serde(rename = "question__title")]
  pub title: String,
  #[serde(rename = "question__title_slug")]
  pub slug: String,
}

#[derive(Debug, Deserialize)]
pub struct CatalogDifficulty {
  pub level: i64,
}

impl CatalogClient {
  pub fn new(cfg: &CatalogCfg) -> Result<Self, DirectoryError> {
    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(cfg.timeout_secs))
      .build()
      .map_err(|e| DirectoryError::Fetch(e.to_string()))?;
    Ok(Self { client, url: cfg.url.clone() })
  }

  /// Download and decode the whole catalog.
  #[instrument(level = "info", skip(self), fields(url = %self.url))]
  pub async fn fetch_catalog(&self) -> Result<Vec<CatalogEntry>, DirectoryError> {
    let start = std::time::Instant::now();
    let res = self.client.get(&self.url)
      .header(USER_AGENT, "leetmate-backend/0.1")
      .header(ACCEPT, "application/json")
      .send().await
      .map_err(|e| DirectoryError::Fetch(e.to_string()))?;

    let status = res.status();
    if !status.is_success() {
      error!(target: "catalog", %status, "Catalog endpoint returned an error status");
      return Err(DirectoryError::Fetch(format!("catalog HTTP {}", status)));
    }

    let payload: CatalogPayload = res.json().await
      .map_err(|e| DirectoryError::Fetch(format!("malformed catalog payload: {}", e)))?;
    info!(target: "catalog", entries = payload.stat_status_pairs.len(), elapsed = ?start.elapsed(), "Catalog fetched");
    Ok(payload.stat_status_pairs)
  }

  /// Resolve a frontend id to a problem record.
  #[instrument(level = "info", skip(self), fields(%id))]
  pub async fn resolve(&self, id: u32) -> Result<ProblemRecord, DirectoryError> {
    let entries = self.fetch_catalog().await.map_err(|e| {
      error!(target: "catalog", %id, error = %e, "Catalog fetch failed");
      e
    })?;
    let record = find_problem(&entries, id)?;
    debug!(target: "catalog", %id, title = %record.title, difficulty = %record.difficulty, "Problem resolved");
    Ok(record)
  }
}

/// Linear scan; the first entry with a matching id wins.
pub fn find_problem(entries: &[CatalogEntry], id: u32) -> Result<ProblemRecord, DirectoryError> {
  let entry = entries
    .iter()
    .find(|e| e.stat.frontend_question_id == id)
    .ok_or(DirectoryError::NotFound(id))?;

  Ok(ProblemRecord {
    id,
    title: entry.stat.title.clone(),
    slug: entry.stat.slug.clone(),
    difficulty: Difficulty::try_from(entry.difficulty.level)?,
  })
}

#[cfg(test)]
pub(crate) mod tests {
  use super::*;
  use serde_json::json;
  use wiremock::matchers::{method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  pub(crate) fn catalog_json(entries: &[(u32, &str, &str, i64)]) -> serde_json::Value {
    let pairs: Vec<_> = entries
      .iter()
      .map(|(id, title, slug, level)| {
        json!({
          "stat": {
            "question_id": id + 1000,
            "frontend_question_id": id,
            "question__title": title,
            "question__title_slug": slug,
            "total_acs": 1
          },
          "difficulty": { "level": level },
          "paid_only": false
        })
      })
      .collect();
    json!({ "num_total": pairs.len(), "stat_status_pairs": pairs })
  }

  fn entries(v: serde_json::Value) -> Vec<CatalogEntry> {
    serde_json::from_value::<CatalogPayload>(v).unwrap().stat_status_pairs
  }

  pub(crate) async fn mock_catalog(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
      .and(path("/api/problems/all/"))
      .respond_with(ResponseTemplate::new(200).set_body_json(body))
      .mount(server)
      .await;
  }

  fn client_for(server: &MockServer) -> CatalogClient {
    CatalogClient::new(&CatalogCfg { url: format!("{}/api/problems/all/", server.uri()), timeout_secs: 5 }).unwrap()
  }

  #[test]
  fn finds_two_sum() {
    let list = entries(catalog_json(&[(1, "Two Sum", "two-sum", 1)]));
    let rec = find_problem(&list, 1).unwrap();
    assert_eq!(rec.title, "Two Sum");
    assert_eq!(rec.slug, "two-sum");
    assert_eq!(rec.difficulty, Difficulty::Easy);
    assert!(matches!(find_problem(&list, 2), Err(DirectoryError::NotFound(2))));
  }

  #[test]
  fn first_duplicate_wins() {
    let list = entries(catalog_json(&[
      (5, "Longest Palindromic Substring", "longest-palindromic-substring", 2),
      (5, "Shadow Copy", "shadow-copy", 3),
    ]));
    let rec = find_problem(&list, 5).unwrap();
    assert_eq!(rec.slug, "longest-palindromic-substring");
    assert_eq!(rec.difficulty, Difficulty::Medium);
  }

  #[test]
  fn empty_catalog_is_not_found() {
    assert!(matches!(find_problem(&[], 1), Err(DirectoryError::NotFound(1))));
  }

  #[test]
  fn bad_tier_on_match_is_invalid_difficulty() {
    let list = entries(catalog_json(&[(1, "Two Sum", "two-sum", 4), (2, "Add Two Numbers", "add-two-numbers", 2)]));
    assert!(matches!(find_problem(&list, 1), Err(DirectoryError::InvalidDifficulty(4))));
    assert!(find_problem(&list, 2).is_ok());
  }

  #[tokio::test]
  async fn resolve_over_http() {
    let server = MockServer::start().await;
    mock_catalog(&server, catalog_json(&[(1, "Two Sum", "two-sum", 1), (4, "Median of Two Sorted Arrays", "median-of-two-sorted-arrays", 3)])).await;
    let client = client_for(&server);

    let rec = client.resolve(4).await.unwrap();
    assert_eq!(rec.title, "Median of Two Sorted Arrays");
    assert_eq!(rec.difficulty, Difficulty::Hard);
    assert!(matches!(client.resolve(2).await, Err(DirectoryError::NotFound(2))));
  }

  #[tokio::test]
  async fn server_error_is_fetch_error_not_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/api/problems/all/"))
      .respond_with(ResponseTemplate::new(500))
      .mount(&server)
      .await;

    let err = client_for(&server).resolve(1).await.unwrap_err();
    assert!(matches!(err, DirectoryError::Fetch(_)), "got {err:?}");
  }

  #[tokio::test]
  async fn malformed_payload_is_fetch_error() {
    let server = MockServer::start().await;
    mock_catalog(&server, json!({ "questions": [] })).await;

    let err = client_for(&server).resolve(1).await.unwrap_err();
    assert!(matches!(err, DirectoryError::Fetch(_)), "got {err:?}");
  }

  #[tokio::test]
  async fn unreachable_endpoint_is_fetch_error() {
    let client = CatalogClient::new(&CatalogCfg { url: "http://127.0.0.1:1/api/problems/all/".into(), timeout_secs: 2 }).unwrap();
    assert!(matches!(client.resolve(1).await, Err(DirectoryError::Fetch(_))));
  }

  #[tokio::test]
  async fn slow_catalog_times_out_as_fetch_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/api/problems/all/"))
      .respond_with(ResponseTemplate::new(200)
        .set_body_json(catalog_json(&[(1, "Two Sum", "two-sum", 1)]))
        .set_delay(Duration::from_secs(3)))
      .mount(&server)
      .await;

    let client = CatalogClient::new(&CatalogCfg { url: format!("{}/api/problems/all/", server.uri()), timeout_secs: 1 }).unwrap();
    assert!(matches!(client.resolve(1).await, Err(DirectoryError::Fetch(_))));
  }
}
