// Loading, normalization and per-consultant extraction of the uploaded base.
pub mod cache;
pub mod csv_parser;
pub mod dates;
pub mod history;
pub mod locale_number;
pub mod normalizer;
pub mod table;

pub use cache::{ContentKey, DatasetCache};
pub use csv_parser::{CsvLoader, RawTable};
pub use history::{ConsultantCard, EntityHistory, Snapshot};
pub use normalizer::RecordNormalizer;
pub use table::NormalizedTable;
