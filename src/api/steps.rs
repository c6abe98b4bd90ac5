//! Step ladder and algo control endpoints.
//!
//! | Method | Path                      |
//! |--------|---------------------------|
//! | GET    | `/api/v1/steps`           |
//! | GET    | `/api/v1/steps/count/{n}` |
//! | PUT    | `/api/v1/steps/{id}`      |
//! | POST   | `/api/v1/steps`           |
//! | DELETE | `/api/v1/steps/{id}`      |
//! | POST   | `/api/v1/algo/restart`    |

use serde_json::json;
use tracing::info;

use super::{expect_success, TradingApi};
use crate::error::ApiResult;
use crate::models::{StepRecord, StepTemplate};

impl TradingApi {
    pub async fn list_steps(&self) -> ApiResult<Vec<StepRecord>> {
        let request = self.http.get(self.algo_url("/api/v1/steps"));
        let response = expect_success(self.session.send(request).await?).await?;
        Ok(response.json().await?)
    }

    /// The ladder state the API projects for a given step count.
    pub async fn step_by_count(&self, count: i64) -> ApiResult<StepRecord> {
        let request = self
            .http
            .get(self.algo_url(&format!("/api/v1/steps/count/{count}")));
        let response = expect_success(self.session.send(request).await?).await?;
        Ok(response.json().await?)
    }

    pub async fn update_step(&self, record: &StepRecord) -> ApiResult<()> {
        info!(id = record.id, step = record.step, "Saving step");
        let request = self
            .http
            .put(self.algo_url(&format!("/api/v1/steps/{}", record.id)))
            .json(record);
        expect_success(self.session.send(request).await?).await?;
        Ok(())
    }

    pub async fn create_step(&self, template: &StepTemplate) -> ApiResult<()> {
        info!("Adding step");
        let request = self.http.post(self.algo_url("/api/v1/steps")).json(template);
        expect_success(self.session.send(request).await?).await?;
        Ok(())
    }

    pub async fn delete_step(&self, id: i64) -> ApiResult<()> {
        info!(id, "Deleting step");
        let request = self
            .http
            .delete(self.algo_url(&format!("/api/v1/steps/{id}")));
        expect_success(self.session.send(request).await?).await?;
        Ok(())
    }

    pub async fn restart_algo(&self) -> ApiResult<()> {
        info!("♻️ Restarting algo");
        let request = self
            .http
            .post(self.algo_url("/api/v1/algo/restart"))
            .json(&json!({}));
        expect_success(self.session.send(request).await?).await?;
        Ok(())
    }
}
