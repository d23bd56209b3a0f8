// engine/src/services/session/mod.rs
// The session owns the dataset cache and the settings, and dispatches each
// user interaction (upload, selection) to its handler module.

use crate::config::EngineSettings;
use crate::data::{DatasetCache, EntityHistory, NormalizedTable};
use crate::error::EngineResult;
use std::path::Path;
use std::sync::Arc;

pub mod select_consultant;
pub mod upload;

pub struct AnalyzerSession {
    settings: EngineSettings,
    cache: DatasetCache,
}

impl AnalyzerSession {
    pub fn new(settings: EngineSettings) -> Self {
        AnalyzerSession {
            settings,
            cache: DatasetCache::new(),
        }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn upload(&mut self, bytes: &[u8]) -> EngineResult<Arc<NormalizedTable>> {
        tracing::info!(bytes = bytes.len(), "Received upload");
        upload::handle_upload(bytes, &self.settings, &mut self.cache)
    }

    pub fn upload_path(&mut self, path: impl AsRef<Path>) -> EngineResult<Arc<NormalizedTable>> {
        let path = path.as_ref();
        tracing::info!(path = %path.display(), "Reading upload from disk");
        let bytes = std::fs::read(path)?;
        self.upload(&bytes)
    }

    pub fn dataset(&self) -> Option<Arc<NormalizedTable>> {
        self.cache.current()
    }

    /// Options for the consultant picker; empty until something is uploaded.
    pub fn emails(&self) -> Vec<String> {
        self.cache
            .current()
            .map(|table| table.emails())
            .unwrap_or_default()
    }

    pub fn select(&self, email: Option<&str>) -> EngineResult<EntityHistory> {
        tracing::info!(email = ?email, "Received consultant selection");
        select_consultant::handle_select(email, self.cache.current())
    }

    /// Drops the cached dataset, e.g. when the upload widget is cleared.
    pub fn clear(&mut self) {
        self.cache.invalidate();
    }
}

impl Default for AnalyzerSession {
    fn default() -> Self {
        Self::new(EngineSettings::default())
    }
}
