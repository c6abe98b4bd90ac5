//! # session — bearer credential storage and the session guard
//!
//! The dashboard process is the client of the trading API, so the credential
//! lives in *its* persistent storage: a small JSON document on disk holding a
//! single string under the fixed key `access_token`.  There is no expiry
//! metadata and no validation — whatever the operator typed is sent.
//!
//! ## Guard lifecycle
//!
//! ```text
//!  startup ── load() ──▶ fresh ──(HTTP 401)──▶ stale ──(login)──▶ fresh
//!                          │                     │
//!                   calls go out          calls short-circuit with
//!                   with the token        ApiError::Unauthorized
//! ```
//!
//! While stale, nothing is sent on the rejected credential; every caller gets
//! `Unauthorized` and the route layer redirects to the login page.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use reqwest::{RequestBuilder, Response, StatusCode};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::error::{ApiError, ApiResult};

/// Storage key the credential is persisted under.
pub const TOKEN_KEY: &str = "access_token";

// ─── TokenStore ───────────────────────────────────────────────────────────────

/// File-backed key/value storage holding the bearer credential.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored credential.  A missing file or missing key reads as
    /// the empty token.
    pub fn load(&self) -> ApiResult<String> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(String::new()),
            Err(e) => return Err(e.into()),
        };

        let doc: HashMap<String, String> = serde_json::from_str(&raw)?;
        Ok(doc.get(TOKEN_KEY).cloned().unwrap_or_default())
    }

    /// Overwrite the stored credential.
    pub async fn save(&self, token: &str) -> ApiResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let doc = HashMap::from([(TOKEN_KEY, token)]);
        tokio::fs::write(&self.path, serde_json::to_vec_pretty(&doc)?).await?;
        Ok(())
    }
}

// ─── SessionGuard ─────────────────────────────────────────────────────────────

/// Wraps every outbound call to the trading API.
pub struct SessionGuard {
    store: TokenStore,
    token: RwLock<String>,
    stale: AtomicBool,
}

// The token itself never reaches a log line.
impl std::fmt::Debug for SessionGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionGuard")
            .field("store", &self.store)
            .field("stale", &self.is_stale())
            .finish_non_exhaustive()
    }
}

impl SessionGuard {
    /// Read the credential once from `store`.
    pub fn load(store: TokenStore) -> ApiResult<Self> {
        let token = store.load()?;
        if token.is_empty() {
            warn!(path = %store.path().display(), "No stored access token — API calls will be rejected until login");
        } else {
            debug!(path = %store.path().display(), "Access token loaded");
        }

        Ok(Self {
            store,
            token: RwLock::new(token),
            stale: AtomicBool::new(false),
        })
    }

    /// True once the API rejected the current credential.
    pub fn is_stale(&self) -> bool {
        self.stale.load(Ordering::Acquire)
    }

    /// Attach `Authorization: Bearer <token>`.
    ///
    /// Fails with [`ApiError::Unauthorized`] without sending anything when the
    /// session is already stale.
    pub async fn authorize(&self, request: RequestBuilder) -> ApiResult<RequestBuilder> {
        if self.is_stale() {
            debug!("Session stale — call suppressed");
            return Err(ApiError::Unauthorized);
        }
        let token = self.token.read().await;
        Ok(request.bearer_auth(token.as_str()))
    }

    /// Turn a 401 into [`ApiError::Unauthorized`] and mark the session stale.
    /// Every other response is handed back untouched.
    pub fn check(&self, response: Response) -> ApiResult<Response> {
        if response.status() == StatusCode::UNAUTHORIZED {
            // Only the first rejection is worth a log line.
            if !self.stale.swap(true, Ordering::AcqRel) {
                warn!(url = %response.url(), "🔒 Trading API rejected the access token");
            }
            return Err(ApiError::Unauthorized);
        }
        Ok(response)
    }

    /// `authorize` → send → `check`.
    pub async fn send(&self, request: RequestBuilder) -> ApiResult<Response> {
        let response = self.authorize(request).await?.send().await?;
        self.check(response)
    }

    /// Persist a newly entered credential and make it current.
    pub async fn login(&self, token: String) -> ApiResult<()> {
        self.store.save(&token).await?;
        *self.token.write().await = token;
        self.stale.store(false, Ordering::Release);
        info!("🔑 Access token stored");
        Ok(())
    }
}
