//! # views::positions
//!
//! Live stock positions.  The only mutation is Close ("Sell"): the row is
//! flagged `selling` before anything goes out, the close is posted, and after
//! a fixed settle delay the table is re-listed, which is what clears the
//! flag again.  The delay is a guess at how long the broker needs; the fill
//! itself is never confirmed.
//!
//! Rows are addressed by symbol, never by position: the API does not promise
//! a stable order between fetches.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{RwLock, RwLockReadGuard};
use tracing::{debug, error, info, warn};

use super::{settle_mutation, ViewError};
use crate::api::TradingApi;
use crate::error::ApiError;
use crate::models::{ClosePositionRequest, PositionRecord};

#[derive(Debug, Clone, PartialEq)]
pub struct PositionRow {
    pub record:  PositionRecord,
    /// A close request is in flight; the sell action is disabled.
    pub selling: bool,
}

#[derive(Debug, Clone, Default)]
pub struct PositionTable {
    rows:           Vec<PositionRow>,
    /// Fetches in flight; the page shows "Fetching Data..." while non-zero.
    fetching:       usize,
    last_refreshed: Option<DateTime<Utc>>,
}

impl PositionTable {
    pub fn rows(&self) -> &[PositionRow] {
        &self.rows
    }

    pub fn is_fetching(&self) -> bool {
        self.fetching > 0
    }

    pub fn begin_fetch(&mut self) {
        self.fetching += 1;
    }

    pub fn end_fetch(&mut self) {
        self.fetching = self.fetching.saturating_sub(1);
    }

    pub fn last_refreshed(&self) -> Option<DateTime<Utc>> {
        self.last_refreshed
    }

    pub fn replace(&mut self, records: Vec<PositionRecord>) {
        self.rows = records
            .into_iter()
            .map(|record| PositionRow { record, selling: false })
            .collect();
        self.last_refreshed = Some(Utc::now());
    }

    /// Flag the position in `symbol` as selling and build its close request.
    ///
    /// `qty` is the quantity the operator was shown; a position that has
    /// since changed size is refused.  `None` when a close for that position
    /// is already in flight.
    pub fn begin_close(
        &mut self,
        symbol: &str,
        qty: Option<f64>,
    ) -> Result<Option<ClosePositionRequest>, ViewError> {
        let row = self
            .rows
            .iter_mut()
            .find(|r| r.record.symbol == symbol)
            .ok_or_else(|| ViewError::NoSuchPosition(symbol.to_string()))?;

        if qty.is_some_and(|qty| qty != row.record.qty) {
            return Err(ViewError::PositionChanged(symbol.to_string()));
        }
        if row.selling {
            return Ok(None);
        }
        row.selling = true;
        Ok(Some(ClosePositionRequest::for_position(&row.record)))
    }

    /// Re-enable the sell action for `symbol`.
    pub fn release(&mut self, symbol: &str) {
        for row in self.rows.iter_mut().filter(|r| r.record.symbol == symbol) {
            row.selling = false;
        }
    }
}

// ─── PositionsView ────────────────────────────────────────────────────────────

pub struct PositionsView {
    api:          TradingApi,
    table:        RwLock<PositionTable>,
    settle_delay: Duration,
}

impl PositionsView {
    pub fn new(api: TradingApi, settle_delay: Duration) -> Self {
        Self {
            api,
            table: RwLock::new(PositionTable::default()),
            settle_delay,
        }
    }

    pub async fn table(&self) -> RwLockReadGuard<'_, PositionTable> {
        self.table.read().await
    }

    /// Fetch `/trades/with-prices`.  Only a 401 is returned as an error.
    pub async fn list(&self) -> Result<(), ViewError> {
        self.fetch().await.map(|_| ())
    }

    /// `true` when the table was replaced.
    async fn fetch(&self) -> Result<bool, ViewError> {
        self.table.write().await.begin_fetch();
        let result = self.api.list_positions().await;

        let mut table = self.table.write().await;
        table.end_fetch();
        match result {
            Ok(records) => {
                debug!(count = records.len(), "Positions fetched");
                table.replace(records);
                Ok(true)
            }
            Err(ApiError::Unauthorized) => Err(ApiError::Unauthorized.into()),
            Err(e) => {
                error!(error = %e, "Error fetching positions");
                Ok(false)
            }
        }
    }

    /// Synchronous half of Close: disable the position's action.
    pub async fn begin_close(
        &self,
        symbol: &str,
        qty: Option<f64>,
    ) -> Result<Option<ClosePositionRequest>, ViewError> {
        self.table.write().await.begin_close(symbol, qty)
    }

    /// Asynchronous half of Close: post it, wait out the settle delay, re-list.
    ///
    /// The re-list runs even when the close failed.  Whenever the table is
    /// not replaced afterwards, the row is re-enabled by hand so it never
    /// stays disabled.
    pub async fn finish_close(&self, close: ClosePositionRequest) -> Result<(), ViewError> {
        let result = self.api.close_position(&close).await;
        if let Err(e) = settle_mutation("closing position", result) {
            self.table.write().await.release(&close.symbol);
            return Err(e);
        }

        info!(symbol = %close.symbol, delay = ?self.settle_delay, "Waiting for close to settle");
        tokio::time::sleep(self.settle_delay).await;

        let relisted = self.fetch().await;
        if !matches!(relisted, Ok(true)) {
            warn!(symbol = %close.symbol, "Re-list after close failed; re-enabling the row");
            self.table.write().await.release(&close.symbol);
        }
        relisted.map(|_| ())
    }

    /// Both halves back to back.
    pub async fn close(&self, symbol: &str, qty: Option<f64>) -> Result<(), ViewError> {
        match self.begin_close(symbol, qty).await? {
            Some(close) => self.finish_close(close).await,
            None => Ok(()),
        }
    }
}
