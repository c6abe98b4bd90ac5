//! # views — UI-scoped table state and the calls that keep it in sync
//!
//! Each table is a plain state container ([`steps::StepTable`],
//! [`positions::PositionTable`]) wrapped by a view ([`StepsView`],
//! [`PositionsView`]) that owns the async request/response flow:
//!
//! ```text
//! remote collection ─▶ table state ─▶ operator edit ─▶ remote mutation
//!        ▲                                                   │
//!        └──────────────────── re-list ◀─────────────────────┘
//! ```
//!
//! Locks are never held across a network call, so mutations on different
//! rows race and the last completed list wins.

pub mod positions;
pub mod steps;

pub use positions::{PositionRow, PositionTable, PositionsView};
pub use steps::{StepRow, StepTable, StepsView};

use thiserror::Error;
use tracing::{error, warn};

use crate::error::{ApiError, ApiResult};

#[derive(Debug, Error)]
pub enum ViewError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("No row at index {0}")]
    NoSuchRow(usize),

    #[error("Row {0} is not being edited")]
    NotEditing(usize),

    #[error("Row {index} no longer holds step {id}")]
    RowMoved { index: usize, id: i64 },

    #[error("No position in {0}")]
    NoSuchPosition(String),

    #[error("Position in {0} changed since it was displayed")]
    PositionChanged(String),
}

/// Decide whether a finished mutation should be followed by a re-list.
///
/// A completed request re-lists whatever its status; only a 401 (redirect)
/// or a request that never completed stops the refresh.
pub(crate) fn settle_mutation(action: &str, result: ApiResult<()>) -> Result<bool, ViewError> {
    match result {
        Ok(()) => Ok(true),
        Err(ApiError::Unauthorized) => Err(ApiError::Unauthorized.into()),
        Err(ApiError::Status { status, body }) => {
            warn!(action, %status, body = %body, "Mutation answered with an error status");
            Ok(true)
        }
        Err(e) => {
            error!(action, error = %e, "Mutation request failed");
            Ok(false)
        }
    }
}

/// Text → number the way a browser's `Number()` does it: surrounding
/// whitespace ignored, blank is `0`, `0x`/`0o`/`0b` literals accepted,
/// anything else unparsable is `NaN`.
pub fn coerce_number(text: &str) -> f64 {
    let t = text.trim();
    if t.is_empty() {
        return 0.0;
    }

    match t {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    let radix = match t.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &t[2..];
        // from_str_radix takes a sign; a browser does not after the prefix.
        if digits.starts_with(['+', '-']) {
            return f64::NAN;
        }
        return u64::from_str_radix(digits, radix)
            .map(|v| v as f64)
            .unwrap_or(f64::NAN);
    }

    // Rust's float parser also takes "inf"/"nan"; the browser does not.
    if t.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') {
        return f64::NAN;
    }

    t.parse().unwrap_or(f64::NAN)
}
