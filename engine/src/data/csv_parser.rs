use crate::config::EngineSettings;
use crate::error::{EngineError, EngineResult};
use csv::ReaderBuilder;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

pub const DATE_COLUMN: &str = "Data";
pub const EMAIL_COLUMN: &str = "E-mail";
pub const AUC_COLUMN: &str = "AuC";
pub const REVENUE_COLUMN: &str = "Receita";
pub const AUC_CURVE_COLUMN: &str = "Curva AuC";

/// The only headers an uploaded base must carry.
pub const REQUIRED_COLUMNS: [&str; 3] = [DATE_COLUMN, EMAIL_COLUMN, AUC_COLUMN];

/// Uploaded rows exactly as read, before any type coercion.
/// Empty cells are stored as `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    /// Rows are padded or truncated to the header width.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, None);
                row
            })
            .collect();
        RawTable { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<Option<String>>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    // First header wins when a name is repeated.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col)?.as_deref()
    }

    pub fn column(&self, name: &str) -> Option<Vec<Option<&str>>> {
        let col = self.column_index(name)?;
        Some(self.rows.iter().map(|row| row[col].as_deref()).collect())
    }

    pub fn ensure_required_columns(&self) -> EngineResult<()> {
        match REQUIRED_COLUMNS.iter().find(|name| !self.has_column(name)) {
            Some(missing) => Err(EngineError::MissingColumn(missing.to_string())),
            None => Ok(()),
        }
    }
}

pub struct CsvLoader {
    delimiter: u8,
}

impl Default for CsvLoader {
    fn default() -> Self {
        CsvLoader { delimiter: b',' }
    }
}

impl CsvLoader {
    pub fn new(delimiter: u8) -> Self {
        CsvLoader { delimiter }
    }

    pub fn from_settings(settings: &EngineSettings) -> EngineResult<Self> {
        Ok(CsvLoader::new(settings.delimiter()?))
    }

    pub fn read_path(&self, file_path: impl AsRef<Path>) -> EngineResult<RawTable> {
        let file = File::open(file_path.as_ref())?;
        self.read(BufReader::new(file))
    }

    pub fn read_bytes(&self, bytes: &[u8]) -> EngineResult<RawTable> {
        self.read(bytes)
    }

    pub fn read<R: Read>(&self, reader: R) -> EngineResult<RawTable> {
        let mut rdr = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true) // Short rows are padded as missing cells
            .from_reader(reader);

        let headers: Vec<String> = rdr
            .headers()?
            .iter()
            .map(|header| header.trim_start_matches('\u{feff}').trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for result in rdr.records() {
            let record = result?;
            let row = record
                .iter()
                .map(|cell| if cell.is_empty() { None } else { Some(cell.to_string()) })
                .collect();
            rows.push(row);
        }

        let table = RawTable::new(headers, rows);
        table.ensure_required_columns()?;
        tracing::debug!(
            rows = table.len(),
            columns = table.headers().len(),
            "Read uploaded CSV"
        );
        Ok(table)
    }
}
