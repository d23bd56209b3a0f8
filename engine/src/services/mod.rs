// Request/response surface consumed by the presentation layer.
pub mod session;

pub use session::AnalyzerSession;
