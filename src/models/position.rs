//! # models::position
//!
//! [`PositionRecord`] is one live stock position together with the price it
//! was last filled/stepped at and whatever buy/sell orders are still working.
//! Everything is computed by the stock API; `/trades/with-prices` returns the
//! collection.

use serde::{Deserialize, Serialize};

use super::nullable_f64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionRecord {
    #[serde(default)]
    pub symbol: String,

    #[serde(default, deserialize_with = "nullable_f64")]
    pub qty:       f64,
    #[serde(default, deserialize_with = "nullable_f64")]
    pub lot_size:  f64,
    #[serde(default, deserialize_with = "nullable_f64")]
    pub step_size: f64,

    /// Price of the last fill (the current ladder step)
    #[serde(default, deserialize_with = "nullable_f64")]
    pub last_fill: f64,
    /// Current market bid
    #[serde(default, deserialize_with = "nullable_f64")]
    pub bid_price: f64,
    /// `bid_price - last_fill`, as computed by the API
    #[serde(default, deserialize_with = "nullable_f64")]
    pub diff:      f64,

    // ── Working orders ────────────────────────────────────────────────────────
    #[serde(default, deserialize_with = "nullable_f64")]
    pub buy_order_qty:    f64,
    #[serde(default, deserialize_with = "nullable_f64")]
    pub buy_order_price:  f64,
    #[serde(default, deserialize_with = "nullable_f64")]
    pub sell_order_qty:   f64,
    #[serde(default, deserialize_with = "nullable_f64")]
    pub sell_order_price: f64,
}

/// Body of `POST /trades/close`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosePositionRequest {
    pub symbol: String,
    pub qty:    f64,
    pub price:  f64,
}

impl ClosePositionRequest {
    /// Sell the whole position at the current market price.
    pub fn for_position(position: &PositionRecord) -> Self {
        Self {
            symbol: position.symbol.clone(),
            qty:    position.qty,
            price:  position.bid_price,
        }
    }
}
