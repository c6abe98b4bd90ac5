//! In-process stand-in for the trading API.
//!
//! Serves the same endpoints from memory on an ephemeral port and records
//! every request it sees, so tests can assert on what the dashboard sent.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Path, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::sync::Notify;

use algo_dashboard::{build_state, Config, SharedState};

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path:   String,
    pub auth:   Option<String>,
}

#[derive(Default)]
pub struct FakeState {
    pub steps:       Mutex<Vec<Value>>,
    pub positions:   Mutex<Vec<Value>>,
    pub next_id:     AtomicI64,
    pub requests:    Mutex<Vec<Recorded>>,
    pub last_put:    Mutex<Option<Value>>,
    pub last_post:   Mutex<Option<Value>>,
    pub last_close:  Mutex<Option<Value>>,
    /// Answer every request with 401.
    pub reject:      AtomicBool,
    /// Answer PUTs with 500 (after recording the body).
    pub fail_put:    AtomicBool,
    /// Hold `/trades/close` until `release_close` is notified.
    pub hold_close:  AtomicBool,
    pub close_seen:  Notify,
    pub release_close: Notify,
}

impl FakeState {
    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self, method: &str, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    pub fn step_ids(&self) -> Vec<i64> {
        self.steps
            .lock()
            .unwrap()
            .iter()
            .filter_map(|s| s["id"].as_i64())
            .collect()
    }
}

pub struct FakeApi {
    pub base_url: String,
    pub state:    Arc<FakeState>,
}

impl FakeApi {
    pub async fn spawn() -> Self {
        let state = Arc::new(FakeState::default());
        state.next_id.store(1, Ordering::SeqCst);

        let app = Router::new()
            .route("/api/v1/steps", get(list_steps).post(create_step))
            .route("/api/v1/steps/count/:n", get(step_by_count))
            .route("/api/v1/steps/:id", put(update_step).delete(delete_step))
            .route("/api/v1/algo/restart", post(restart))
            .route("/trades/with-prices", get(list_positions))
            .route("/trades/close", post(close_position))
            .layer(middleware::from_fn_with_state(Arc::clone(&state), record))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    pub fn seed_steps(&self, n: i64) {
        let mut steps = self.state.steps.lock().unwrap();
        for _ in 0..n {
            let id = self.state.next_id.fetch_add(1, Ordering::SeqCst);
            let step = steps.len() as i64 + 1;
            steps.push(step_json(id, step));
        }
    }

    pub fn seed_positions(&self, symbols: &[&str]) {
        let mut positions = self.state.positions.lock().unwrap();
        for symbol in symbols {
            positions.push(json!({
                "symbol": symbol,
                "qty": 30,
                "lot_size": 10,
                "step_size": 0.5,
                "last_fill": 20.0,
                "bid_price": 21.5,
                "diff": 1.5,
                "buy_order_qty": 10,
                "buy_order_price": 19.5,
                "sell_order_qty": 10,
                "sell_order_price": 20.5
            }));
        }
    }
}

pub fn step_json(id: i64, step: i64) -> Value {
    json!({
        "id": id,
        "step": step,
        "buy_price": 0.1,
        "sell_price": 0.11,
        "shares_to_buy": 100,
        "additional_shares": 5,
        "total_shares": 105,
        "cumulative_shares": 105 * step,
        "more_shares_needed": 0,
        "shares_to_sell": 0
    })
}

/// Dashboard state pointed at `fake`, with its token file under `token_dir`.
pub fn dashboard_state(fake: &FakeApi, token_dir: &std::path::Path, token: Option<&str>) -> SharedState {
    let token_path = token_dir.join("session.json");
    if let Some(token) = token {
        std::fs::write(&token_path, json!({ "access_token": token }).to_string()).unwrap();
    }

    let env: HashMap<&str, String> = HashMap::from([
        ("ALGO_API_URL", fake.base_url.clone()),
        ("STOCK_ALGO_API_URL", fake.base_url.clone()),
        ("TOKEN_PATH", token_path.display().to_string()),
        ("CLOSE_SETTLE_MS", "20".to_string()),
        ("HTTP_TIMEOUT_SECS", "5".to_string()),
    ]);
    let config = Config::from_lookup(|key| env.get(key).cloned()).unwrap();
    build_state(config).unwrap()
}

/// Poll `cond` for up to a second.
pub async fn eventually(cond: impl Fn() -> bool) -> bool {
    for _ in 0..100 {
        if cond() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    cond()
}

// ─── Handlers ─────────────────────────────────────────────────────────────────

async fn record(State(state): State<Arc<FakeState>>, request: Request, next: Next) -> Response {
    state.requests.lock().unwrap().push(Recorded {
        method: request.method().to_string(),
        path:   request.uri().path().to_string(),
        auth:   request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    });

    if state.reject.load(Ordering::SeqCst) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    next.run(request).await
}

async fn list_steps(State(state): State<Arc<FakeState>>) -> Json<Vec<Value>> {
    Json(state.steps.lock().unwrap().clone())
}

async fn create_step(State(state): State<Arc<FakeState>>, Json(body): Json<Value>) -> StatusCode {
    let id = state.next_id.fetch_add(1, Ordering::SeqCst);
    let mut steps = state.steps.lock().unwrap();
    let mut row = step_json(id, steps.len() as i64 + 1);
    for key in ["buy_price", "sell_price", "shares_to_buy", "additional_shares"] {
        row[key] = body[key].clone();
    }
    steps.push(row);
    *state.last_post.lock().unwrap() = Some(body);
    StatusCode::CREATED
}

async fn step_by_count(Path(n): Path<i64>) -> Json<Value> {
    let mut row = step_json(0, n);
    row["more_shares_needed"] = json!(n * 3);
    Json(row)
}

async fn update_step(
    State(state): State<Arc<FakeState>>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> StatusCode {
    *state.last_put.lock().unwrap() = Some(body.clone());
    if state.fail_put.load(Ordering::SeqCst) {
        return StatusCode::INTERNAL_SERVER_ERROR;
    }
    let mut steps = state.steps.lock().unwrap();
    if let Some(row) = steps.iter_mut().find(|s| s["id"] == json!(id)) {
        *row = body;
    }
    StatusCode::OK
}

async fn delete_step(State(state): State<Arc<FakeState>>, Path(id): Path<i64>) -> StatusCode {
    state.steps.lock().unwrap().retain(|s| s["id"] != json!(id));
    StatusCode::NO_CONTENT
}

async fn restart() -> Json<Value> {
    Json(json!({ "ok": true }))
}

async fn list_positions(State(state): State<Arc<FakeState>>) -> Json<Vec<Value>> {
    Json(state.positions.lock().unwrap().clone())
}

async fn close_position(State(state): State<Arc<FakeState>>, Json(body): Json<Value>) -> StatusCode {
    *state.last_close.lock().unwrap() = Some(body);
    state.close_seen.notify_one();
    if state.hold_close.load(Ordering::SeqCst) {
        state.release_close.notified().await;
    }
    StatusCode::OK
}
