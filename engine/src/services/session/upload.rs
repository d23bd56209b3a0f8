// Handler for a file upload: read, normalize, cache.
use std::sync::Arc;

use crate::config::EngineSettings;
use crate::data::{CsvLoader, DatasetCache, NormalizedTable, RecordNormalizer};
use crate::error::EngineResult;

pub fn handle_upload(
    bytes: &[u8],
    settings: &EngineSettings,
    cache: &mut DatasetCache,
) -> EngineResult<Arc<NormalizedTable>> {
    let table = cache.get_or_load(bytes, |bytes| {
        let raw = CsvLoader::from_settings(settings)?.read_bytes(bytes)?;
        Ok(RecordNormalizer::new(settings).normalize(&raw))
    })?;

    tracing::info!(
        rows = table.len(),
        consultants = table.emails().len(),
        "Upload ready"
    );
    Ok(table)
}
