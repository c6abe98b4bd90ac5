//! # config — read dashboard configuration from environment variables

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_ALGO_API_URL: &str = "http://localhost:8080";
const DEFAULT_TOKEN_PATH: &str = ".algo-dashboard/session.json";

/// Everything the dashboard needs at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address axum listens on
    pub bind_addr:          SocketAddr,
    /// Base URL of the step / algo API (`/api/v1/...`)
    pub algo_api_url:       String,
    /// Base URL of the stock position API (`/trades/...`)
    pub stock_api_url:      String,
    /// Prefix every dashboard route lives under, e.g. `/Algo_Front_end`.
    /// Empty means routes are mounted at the root.
    pub base_path:          String,
    /// File backing the persisted bearer token
    pub token_path:         PathBuf,
    /// Wait between a close request and the re-list that follows it
    pub close_settle_delay: Duration,
    /// Step count used by the probe table until the operator changes it
    pub step_probe_count:   i64,
    /// Per-request deadline on outbound calls
    pub http_timeout:       Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` is this over `std::env::var`.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr: SocketAddr = lookup("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("BIND_ADDR must be a socket address like 0.0.0.0:3000")?;

        let algo_api_url = trim_url(
            lookup("ALGO_API_URL").unwrap_or_else(|| DEFAULT_ALGO_API_URL.to_string()),
        );
        let stock_api_url = lookup("STOCK_ALGO_API_URL")
            .map(trim_url)
            .unwrap_or_else(|| algo_api_url.clone());

        let close_settle_ms: u64 = parse_or(&lookup, "CLOSE_SETTLE_MS", 2000)?;
        let http_timeout_secs: u64 = parse_or(&lookup, "HTTP_TIMEOUT_SECS", 120)?;

        Ok(Self {
            bind_addr,
            algo_api_url,
            stock_api_url,
            base_path:          normalize_base_path(lookup("BASE_PATH").unwrap_or_default()),
            token_path:         lookup("TOKEN_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_TOKEN_PATH)),
            close_settle_delay: Duration::from_millis(close_settle_ms),
            step_probe_count:   parse_or(&lookup, "STEP_PROBE_COUNT", 100)?,
            http_timeout:       Duration::from_secs(http_timeout_secs),
        })
    }

    /// Absolute dashboard path for `route` (which must start with `/`).
    pub fn path(&self, route: &str) -> String {
        format!("{}{}", self.base_path, route)
    }

    pub fn login_path(&self) -> String {
        self.path("/login")
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} must be a number, got '{raw}'")),
        None => Ok(default),
    }
}

fn trim_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

/// `""`, `"/"` → `""`; `"Algo_Front_end/"` → `"/Algo_Front_end"`.
fn normalize_base_path(raw: String) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}
