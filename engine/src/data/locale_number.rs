//! Column-level Brazilian number parsing.
//!
//! A column whose every present cell is already a plain number is taken as
//! numeric and passed through untouched. Any other column is textual: each
//! cell loses its `.` thousands separators and has `,` turned into the
//! decimal point. Cells that still fail to parse come back as `None`.

use shared::utils::brazilian_format;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Numeric,
    Textual,
}

impl ColumnKind {
    pub fn infer<'a, I>(cells: I) -> Self
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let all_numeric = cells
            .into_iter()
            .flatten()
            .all(brazilian_format::is_plain_number);
        if all_numeric {
            ColumnKind::Numeric
        } else {
            ColumnKind::Textual
        }
    }
}

/// Parses one cell given the kind of the column it belongs to.
pub fn parse_cell(cell: Option<&str>, kind: ColumnKind) -> Option<f64> {
    let raw = cell?;
    let value = match kind {
        ColumnKind::Numeric => raw.trim().parse::<f64>().ok()?,
        ColumnKind::Textual => brazilian_format::parse_decimal(raw).ok()?,
    };
    value.is_finite().then_some(value)
}

/// Parses a whole column; same result as [`parse_cell`] applied per row.
pub fn parse_column(cells: &[Option<&str>]) -> Vec<Option<f64>> {
    let kind = ColumnKind::infer(cells.iter().copied());
    cells.iter().map(|cell| parse_cell(*cell, kind)).collect()
}
