//! # algo-dashboard
//!
//! ## Environment Variables
//!
//! | Variable             | Default                        | Description                        |
//! |----------------------|--------------------------------|------------------------------------|
//! | `BIND_ADDR`          | `0.0.0.0:3000`                 | Address axum listens on            |
//! | `ALGO_API_URL`       | `http://localhost:8080`        | Step / algo API base URL           |
//! | `STOCK_ALGO_API_URL` | same as `ALGO_API_URL`         | Stock position API base URL        |
//! | `BASE_PATH`          | *(empty)*                      | Route prefix, e.g. `/Algo_Front_end` |
//! | `TOKEN_PATH`         | `.algo-dashboard/session.json` | Persisted bearer token             |
//! | `CLOSE_SETTLE_MS`    | `2000`                         | Wait before re-listing after a sell |
//! | `STEP_PROBE_COUNT`   | `100`                          | Initial step-count probe           |
//! | `HTTP_TIMEOUT_SECS`  | `120`                          | Outbound request timeout           |
//! | `RUST_LOG`           | `algo_dashboard=debug`         | Tracing filter                     |

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use algo_dashboard::{build_router, build_state, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Load .env ──────────────────────────────────────────────────────────
    dotenvy::dotenv().ok();

    // ── 2. Structured logging ─────────────────────────────────────────────────
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::from_default_env()
                .add_directive("algo_dashboard=debug".parse()?)
                .add_directive("tower_http=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .init();

    // ── 3. Config + shared state ──────────────────────────────────────────────
    let config = Config::from_env().context("Failed to load config")?;
    let addr = config.bind_addr;

    info!(
        algo_api  = %config.algo_api_url,
        stock_api = %config.stock_api_url,
        base_path = %config.base_path,
        token     = %config.token_path.display(),
        "Algo dashboard configured"
    );

    let state = build_state(config)?;

    // ── 4. Router ─────────────────────────────────────────────────────────────
    let app = build_router(state);

    // ── 5. Bind & Serve ───────────────────────────────────────────────────────
    info!(?addr, "🚀 Algo dashboard starting");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
