//! Record models and Brazilian number formatting shared by the analyzer
//! engine and whatever presentation layer renders its output.

pub mod models;
pub mod utils;

pub use models::{CoercedFields, ConsultantRecord, Curve, CurvePoint, SeriesPoint, CURVE_ORDER};
