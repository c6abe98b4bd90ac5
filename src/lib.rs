//! # algo-dashboard — operator dashboard for the step-ladder trading algo
//!
//! ```text
//!  ┌───────────┐  GET /  POST /steps/...   ┌──────────────────────────┐
//!  │  Browser  │ ────────────────────────▶ │ AppState                 │
//!  │ (operator)│ ◀──── HTML / 303 login ── │ ├─ StepsView             │──▶ /api/v1/steps
//!  └───────────┘                           │ ├─ PositionsView         │──▶ /trades/...
//!                                          │ └─ SessionGuard 🔑       │
//!                                          └──────────────────────────┘
//! ```
//!
//! Every rule about prices and share counts lives behind the trading API.
//! The dashboard renders what it receives and forwards edits verbatim.

pub mod api;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod models;
pub mod routes;
pub mod session;
pub mod state;
pub mod views;

pub use config::Config;
pub use routes::build_router;
pub use state::{build_state, AppState, SharedState};
