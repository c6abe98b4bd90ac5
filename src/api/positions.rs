//! Stock position endpoints (`/trades/with-prices`, `/trades/close`).

use tracing::info;

use super::{expect_success, TradingApi};
use crate::error::ApiResult;
use crate::models::{ClosePositionRequest, PositionRecord};

impl TradingApi {
    /// Positions joined with live prices.  The upstream call fans out to the
    /// broker per symbol and can take minutes.
    pub async fn list_positions(&self) -> ApiResult<Vec<PositionRecord>> {
        let request = self.http.get(self.stock_url("/trades/with-prices"));
        let response = expect_success(self.session.send(request).await?).await?;
        Ok(response.json().await?)
    }

    pub async fn close_position(&self, close: &ClosePositionRequest) -> ApiResult<()> {
        info!(symbol = %close.symbol, qty = close.qty, price = close.price, "💸 Closing position");
        let request = self.http.post(self.stock_url("/trades/close")).json(close);
        expect_success(self.session.send(request).await?).await?;
        Ok(())
    }
}
