//! # views::steps
//!
//! The step ladder table.  Rows are edited in place: entering edit mode
//! snapshots the row and seeds one text draft per editable column, leaving it
//! coerces the drafts back to numbers and PUTs the whole record.
//!
//! Alongside the table sits the step-count probe: the single record the API
//! projects for `probe_count` steps, fetched on every list.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tokio::sync::{RwLock, RwLockReadGuard};
use tracing::{debug, error};

use super::{coerce_number, settle_mutation, ViewError};
use crate::api::TradingApi;
use crate::error::ApiError;
use crate::models::{StepField, StepRecord, StepTemplate};

// ─── StepRow ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct StepRow {
    pub record:  StepRecord,
    pub editing: bool,
    snapshot:    Option<StepRecord>,
    drafts:      HashMap<StepField, String>,
}

impl StepRow {
    fn new(record: StepRecord) -> Self {
        Self {
            record,
            editing: false,
            snapshot: None,
            drafts: HashMap::new(),
        }
    }

    /// Text shown in the input for `field` while editing.
    pub fn draft(&self, field: StepField) -> String {
        self.drafts
            .get(&field)
            .cloned()
            .unwrap_or_else(|| format_number(field.get(&self.record)))
    }
}

/// Render a number the way the page displays it (`10`, `0.25`, `NaN`).
pub fn format_number(value: f64) -> String {
    value.to_string()
}

// ─── StepTable ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct StepTable {
    rows:           Vec<StepRow>,
    probe_count:    i64,
    probe:          Option<StepRecord>,
    last_refreshed: Option<DateTime<Utc>>,
}

impl StepTable {
    pub fn new(probe_count: i64) -> Self {
        Self {
            rows: Vec::new(),
            probe_count,
            probe: None,
            last_refreshed: None,
        }
    }

    pub fn rows(&self) -> &[StepRow] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Result<&StepRow, ViewError> {
        self.rows.get(index).ok_or(ViewError::NoSuchRow(index))
    }

    fn row_mut(&mut self, index: usize) -> Result<&mut StepRow, ViewError> {
        self.rows.get_mut(index).ok_or(ViewError::NoSuchRow(index))
    }

    pub fn probe_count(&self) -> i64 {
        self.probe_count
    }

    pub fn set_probe_count(&mut self, count: i64) {
        self.probe_count = count;
    }

    pub fn probe(&self) -> Option<&StepRecord> {
        self.probe.as_ref()
    }

    pub fn set_probe(&mut self, record: StepRecord) {
        self.probe = Some(record);
    }

    pub fn last_refreshed(&self) -> Option<DateTime<Utc>> {
        self.last_refreshed
    }

    /// Replace every row with a freshly fetched collection.  Edit state and
    /// uncommitted drafts are dropped.
    pub fn replace(&mut self, records: Vec<StepRecord>) {
        self.rows = records.into_iter().map(StepRow::new).collect();
        self.last_refreshed = Some(Utc::now());
    }

    pub fn begin_edit(&mut self, index: usize) -> Result<(), ViewError> {
        let row = self.row_mut(index)?;
        if row.editing {
            return Ok(());
        }
        row.snapshot = Some(row.record.clone());
        row.drafts = StepField::ALL
            .into_iter()
            .map(|f| (f, format_number(f.get(&row.record))))
            .collect();
        row.editing = true;
        Ok(())
    }

    pub fn edit_field(
        &mut self,
        index: usize,
        field: StepField,
        value: impl Into<String>,
    ) -> Result<(), ViewError> {
        let row = self.row_mut(index)?;
        if !row.editing {
            return Err(ViewError::NotEditing(index));
        }
        row.drafts.insert(field, value.into());
        Ok(())
    }

    /// Leave edit mode, returning the record to PUT.  Drafts are coerced
    /// without validation; unparsable text becomes NaN.
    pub fn finish_edit(&mut self, index: usize) -> Result<StepRecord, ViewError> {
        let row = self.row_mut(index)?;
        if !row.editing {
            return Err(ViewError::NotEditing(index));
        }
        for (field, text) in row.drafts.drain() {
            field.set(&mut row.record, coerce_number(&text));
        }
        row.snapshot = None;
        row.editing = false;
        Ok(row.record.clone())
    }

    /// Enter edit mode, or commit when already editing.  `Some(record)` is
    /// the payload to save.
    /// `finish_edit` for a row the caller identifies by position and step id.
    pub fn commit_row(
        &mut self,
        index: usize,
        id: i64,
        edits: impl IntoIterator<Item = (StepField, String)>,
    ) -> Result<StepRecord, ViewError> {
        let row = self.row(index)?;
        if row.record.id != id {
            return Err(ViewError::RowMoved { index, id });
        }
        if !row.editing {
            return Err(ViewError::NotEditing(index));
        }
        for (field, text) in edits {
            self.edit_field(index, field, text)?;
        }
        self.finish_edit(index)
    }

    pub fn toggle_edit(&mut self, index: usize) -> Result<Option<StepRecord>, ViewError> {
        if self.row(index)?.editing {
            self.finish_edit(index).map(Some)
        } else {
            self.begin_edit(index).map(|()| None)
        }
    }

    /// Drop the drafts and restore the row as it was when editing began.
    pub fn cancel_edit(&mut self, index: usize) -> Result<(), ViewError> {
        let row = self.row_mut(index)?;
        if let Some(snapshot) = row.snapshot.take() {
            row.record = snapshot;
        }
        row.drafts.clear();
        row.editing = false;
        Ok(())
    }
}

// ─── StepsView ────────────────────────────────────────────────────────────────

/// Step table plus the calls that keep it in sync with `/api/v1/steps`.
pub struct StepsView {
    api:   TradingApi,
    table: RwLock<StepTable>,
}

impl StepsView {
    pub fn new(api: TradingApi, probe_count: i64) -> Self {
        Self {
            api,
            table: RwLock::new(StepTable::new(probe_count)),
        }
    }

    /// Read access for rendering.
    pub async fn table(&self) -> RwLockReadGuard<'_, StepTable> {
        self.table.read().await
    }

    /// Fetch the ladder and the probe record.
    ///
    /// Only a 401 is returned as an error; every other failure is logged and
    /// leaves the current state in place.
    pub async fn list(&self) -> Result<(), ViewError> {
        match self.api.list_steps().await {
            Ok(records) => {
                debug!(count = records.len(), "Steps fetched");
                self.table.write().await.replace(records);
            }
            Err(ApiError::Unauthorized) => return Err(ApiError::Unauthorized.into()),
            Err(e) => error!(error = %e, "Error fetching steps"),
        }

        let count = self.table.read().await.probe_count();
        match self.api.step_by_count(count).await {
            Ok(record) => self.table.write().await.set_probe(record),
            Err(ApiError::Unauthorized) => return Err(ApiError::Unauthorized.into()),
            Err(e) => error!(count, error = %e, "Error fetching step by count"),
        }

        Ok(())
    }

    pub async fn begin_edit(&self, index: usize) -> Result<(), ViewError> {
        self.table.write().await.begin_edit(index)
    }

    pub async fn edit_field(
        &self,
        index: usize,
        field: StepField,
        value: impl Into<String>,
    ) -> Result<(), ViewError> {
        self.table.write().await.edit_field(index, field, value)
    }

    pub async fn cancel_edit(&self, index: usize) -> Result<(), ViewError> {
        self.table.write().await.cancel_edit(index)
    }

    /// Toggle edit mode on a row; committing saves and re-lists.
    pub async fn toggle_edit(&self, index: usize) -> Result<(), ViewError> {
        let payload = self.table.write().await.toggle_edit(index)?;
        match payload {
            Some(record) => self.save(record).await,
            None => Ok(()),
        }
    }

    /// Apply `edits` to the row at `index` and save it.
    ///
    /// The caller names the step it was editing; if a re-list moved another
    /// step into that position, or dropped the edit, nothing is sent.
    pub async fn commit(
        &self,
        index: usize,
        id: i64,
        edits: impl IntoIterator<Item = (StepField, String)>,
    ) -> Result<(), ViewError> {
        let record = self.table.write().await.commit_row(index, id, edits)?;
        self.save(record).await
    }

    async fn save(&self, record: StepRecord) -> Result<(), ViewError> {
        let result = self.api.update_step(&record).await;
        if settle_mutation("saving row", result)? {
            self.list().await?;
        }
        Ok(())
    }

    /// POST a zero-valued row; it shows up once the re-list returns it.
    pub async fn add(&self) -> Result<(), ViewError> {
        let result = self.api.create_step(&StepTemplate::default()).await;
        if settle_mutation("adding row", result)? {
            self.list().await?;
        }
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<(), ViewError> {
        let result = self.api.delete_step(id).await;
        if settle_mutation("deleting row", result)? {
            self.list().await?;
        }
        Ok(())
    }

    /// Change the probe count and re-list.
    pub async fn probe(&self, count: i64) -> Result<(), ViewError> {
        self.table.write().await.set_probe_count(count);
        self.list().await
    }

    /// Ask the algo to restart.  `true` when the API accepted it.
    pub async fn restart(&self) -> Result<bool, ViewError> {
        match self.api.restart_algo().await {
            Ok(()) => Ok(true),
            Err(ApiError::Unauthorized) => Err(ApiError::Unauthorized.into()),
            Err(e) => {
                error!(error = %e, "Error restarting algo");
                Ok(false)
            }
        }
    }
}
