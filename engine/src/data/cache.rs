// Content-keyed cache of the normalized base, owned by one session.
use super::table::NormalizedTable;
use crate::error::EngineResult;
use sha2::{Digest, Sha256};
use std::fmt;
use std::sync::Arc;

/// SHA-256 of the uploaded bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentKey([u8; 32]);

impl ContentKey {
    pub fn of(bytes: &[u8]) -> Self {
        ContentKey(Sha256::digest(bytes).into())
    }
}

impl fmt::Display for ContentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// Holds the table of the current upload only: a different upload replaces it.
#[derive(Default)]
pub struct DatasetCache {
    entry: Option<(ContentKey, Arc<NormalizedTable>)>,
}

impl DatasetCache {
    pub fn new() -> Self {
        DatasetCache { entry: None }
    }

    /// Returns the cached table when `bytes` match the current upload,
    /// otherwise runs `load` and replaces the entry. A failed load leaves
    /// the previous entry untouched.
    pub fn get_or_load<F>(&mut self, bytes: &[u8], load: F) -> EngineResult<Arc<NormalizedTable>>
    where
        F: FnOnce(&[u8]) -> EngineResult<NormalizedTable>,
    {
        let key = ContentKey::of(bytes);
        if let Some((cached_key, table)) = &self.entry {
            if *cached_key == key {
                tracing::debug!(key = %key, "Dataset cache hit");
                return Ok(Arc::clone(table));
            }
        }

        tracing::debug!(key = %key, "Dataset cache miss, normalizing upload");
        let table = Arc::new(load(bytes)?);
        if self.entry.is_some() {
            tracing::info!(key = %key, "New upload replaces cached dataset");
        }
        self.entry = Some((key, Arc::clone(&table)));
        Ok(table)
    }

    pub fn current(&self) -> Option<Arc<NormalizedTable>> {
        self.entry.as_ref().map(|(_, table)| Arc::clone(table))
    }

    pub fn key(&self) -> Option<ContentKey> {
        self.entry.as_ref().map(|(key, _)| *key)
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}
