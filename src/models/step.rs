//! # models::step
//!
//! [`StepRecord`] is one rung of the algo's buy/sell price ladder.  Only the
//! four price/share inputs are editable; the share totals are computed by the
//! trading API and passed through untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::nullable_f64;

/// One row of trading-step configuration, as served by `/api/v1/steps`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    pub id:   i64,
    #[serde(default)]
    pub step: i64,

    // ── Operator inputs ───────────────────────────────────────────────────────
    // f64 so that a failed coercion can be carried as NaN (serialized as null).
    #[serde(default, deserialize_with = "nullable_f64")]
    pub buy_price:         f64,
    #[serde(default, deserialize_with = "nullable_f64")]
    pub sell_price:        f64,
    #[serde(default, deserialize_with = "nullable_f64")]
    pub shares_to_buy:     f64,
    #[serde(default, deserialize_with = "nullable_f64")]
    pub additional_shares: f64,

    // ── Server-derived, read-only ─────────────────────────────────────────────
    #[serde(default, deserialize_with = "nullable_f64")]
    pub total_shares:       f64,
    #[serde(default, deserialize_with = "nullable_f64")]
    pub cumulative_shares:  f64,
    #[serde(default, deserialize_with = "nullable_f64")]
    pub more_shares_needed: f64,
    #[serde(default, deserialize_with = "nullable_f64")]
    pub shares_to_sell:     f64,

    /// Columns the dashboard does not model, sent back untouched on save.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The zero-valued partial record `POST /api/v1/steps` receives from Add.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct StepTemplate {
    pub buy_price:         f64,
    pub sell_price:        f64,
    pub shares_to_buy:     f64,
    pub additional_shares: f64,
}

// ─── StepField ────────────────────────────────────────────────────────────────

/// The operator-editable columns of a [`StepRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepField {
    BuyPrice,
    SellPrice,
    SharesToBuy,
    AdditionalShares,
}

impl StepField {
    /// Column order on the page.
    pub const ALL: [StepField; 4] = [
        StepField::BuyPrice,
        StepField::SellPrice,
        StepField::SharesToBuy,
        StepField::AdditionalShares,
    ];

    /// Wire / form field name.
    pub fn name(self) -> &'static str {
        match self {
            StepField::BuyPrice         => "buy_price",
            StepField::SellPrice        => "sell_price",
            StepField::SharesToBuy      => "shares_to_buy",
            StepField::AdditionalShares => "additional_shares",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StepField::BuyPrice         => "Buy Price",
            StepField::SellPrice        => "Sell Price",
            StepField::SharesToBuy      => "Shares To Buy",
            StepField::AdditionalShares => "Additional Shares",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    pub fn get(self, record: &StepRecord) -> f64 {
        match self {
            StepField::BuyPrice         => record.buy_price,
            StepField::SellPrice        => record.sell_price,
            StepField::SharesToBuy      => record.shares_to_buy,
            StepField::AdditionalShares => record.additional_shares,
        }
    }

    pub fn set(self, record: &mut StepRecord, value: f64) {
        let slot = match self {
            StepField::BuyPrice         => &mut record.buy_price,
            StepField::SellPrice        => &mut record.sell_price,
            StepField::SharesToBuy      => &mut record.shares_to_buy,
            StepField::AdditionalShares => &mut record.additional_shares,
        };
        *slot = value;
    }
}
