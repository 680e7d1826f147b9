//! Tracing setup for the service.
//!
//! `LOG_LEVEL` takes `EnvFilter` directives; unset or unparsable values fall back to
//! `DEFAULT_FILTER`, which keeps catalog and advice events at debug. `LOG_FORMAT=json`
//! switches to one JSON object per line, anything else prints human-readable lines.

use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "info,catalog=debug,advice=debug,leetmate=debug,tower_http=info,axum=info";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()) {
            Some(v) if v == "json" => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Build the filter from a raw `LOG_LEVEL` value.
pub fn filter_from(level: Option<&str>) -> EnvFilter {
    level
        .filter(|l| !l.trim().is_empty())
        .and_then(|l| EnvFilter::try_new(l).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

pub fn init_tracing() {
    let level = std::env::var("LOG_LEVEL").ok();
    let format = LogFormat::parse(std::env::var("LOG_FORMAT").ok().as_deref());

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter_from(level.as_deref()))
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
    tracing::debug!(target: "leetmate", ?format, "Tracing initialized");
}
