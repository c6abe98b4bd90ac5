//! Wire records owned by the trading API.  The dashboard only holds copies.

pub mod position;
pub mod step;

pub use position::{ClosePositionRequest, PositionRecord};
pub use step::{StepField, StepRecord, StepTemplate};

use serde::{Deserialize, Deserializer};

/// A JSON `null` number reads as NaN.  The API stores a NaN it was sent as
/// `null` and leaves unknown prices `null`; either way the record still loads.
pub(crate) fn nullable_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}
