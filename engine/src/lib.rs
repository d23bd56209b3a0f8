// Engine library root
// Loading and normalization of the unified consultant base, per-consultant
// history extraction, and the session surface the dashboard talks to.

pub mod config;
pub mod data;
pub mod error;
pub mod report;
pub mod services;

pub use config::{EngineSettings, NullDatePolicy};
pub use data::{ConsultantCard, EntityHistory, NormalizedTable, Snapshot};
pub use error::{EngineError, EngineResult};
pub use services::AnalyzerSession;
