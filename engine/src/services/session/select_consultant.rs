// Handler for a change of the selected consultant.
use std::sync::Arc;

use crate::data::{EntityHistory, NormalizedTable};
use crate::error::{EngineError, EngineResult};

pub fn handle_select(
    email: Option<&str>,
    dataset: Option<Arc<NormalizedTable>>,
) -> EngineResult<EntityHistory> {
    let dataset = dataset.ok_or(EngineError::NoDataset)?;
    let email = match email {
        Some(e) if !e.is_empty() => e,
        _ => return Err(EngineError::NoSelection),
    };

    let history = dataset.history(email);
    if history.is_empty() {
        tracing::warn!(email = %email, "Selected consultant has no rows in the dataset");
    } else {
        tracing::debug!(email = %email, rows = history.len(), "Extracted consultant history");
    }
    Ok(history)
}
