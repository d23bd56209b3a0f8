//! Turns an uploaded [`RawTable`] into the chronologically ordered
//! [`NormalizedTable`]. Nothing here fails: unparseable dates become `None`
//! and unparseable amounts become `0.0`.

use super::csv_parser::{
    RawTable, AUC_COLUMN, AUC_CURVE_COLUMN, DATE_COLUMN, EMAIL_COLUMN, REVENUE_COLUMN,
};
use super::dates::DateParser;
use super::locale_number;
use super::table::NormalizedTable;
use crate::config::{EngineSettings, NullDatePolicy};
use chrono::{DateTime, Utc};
use shared::models::{CoercedFields, ConsultantRecord};
use std::cmp::Ordering;
use std::collections::BTreeMap;

pub struct RecordNormalizer {
    dates: DateParser,
    null_dates: NullDatePolicy,
    revenue_curve_aliases: Vec<String>,
    placeholder: String,
}

impl RecordNormalizer {
    pub fn new(settings: &EngineSettings) -> Self {
        RecordNormalizer {
            dates: DateParser::from_settings(settings),
            null_dates: settings.null_dates,
            revenue_curve_aliases: settings.revenue_curve_aliases.clone(),
            placeholder: settings.placeholder.clone(),
        }
    }

    pub fn normalize(&self, raw: &RawTable) -> NormalizedTable {
        let row_count = raw.len();

        // 1. dates
        let dates: Vec<Option<DateTime<Utc>>> = match raw.column(DATE_COLUMN) {
            Some(cells) => cells
                .into_iter()
                .map(|cell| cell.and_then(|c| self.dates.parse(c)))
                .collect(),
            None => vec![None; row_count],
        };

        // 2. stable chronological order
        let mut order: Vec<usize> = (0..row_count).collect();
        order.sort_by(|&a, &b| compare_dates(&dates[a], &dates[b], self.null_dates));

        // 3. and 4. amounts; a missing Receita column reads as all-missing
        let auc = parse_amounts(raw, AUC_COLUMN);
        let has_revenue_column = raw.has_column(REVENUE_COLUMN);
        let revenue = parse_amounts(raw, REVENUE_COLUMN);

        let revenue_curve_column = self
            .revenue_curve_aliases
            .iter()
            .find(|alias| raw.has_column(alias))
            .cloned();

        let email_idx = raw.column_index(EMAIL_COLUMN);
        let auc_curve_idx = raw.column_index(AUC_CURVE_COLUMN);
        let revenue_curve_idx = revenue_curve_column
            .as_deref()
            .and_then(|name| raw.column_index(name));

        let records: Vec<ConsultantRecord> = order
            .into_iter()
            .map(|row| {
                let cell = |idx: Option<usize>| {
                    idx.and_then(|col| raw.cell(row, col)).map(str::to_string)
                };
                ConsultantRecord {
                    date: dates[row],
                    email: cell(email_idx),
                    auc: auc[row].unwrap_or(0.0),
                    revenue: revenue[row].unwrap_or(0.0),
                    auc_curve: cell(auc_curve_idx),
                    revenue_curve: cell(revenue_curve_idx),
                    coerced: CoercedFields {
                        auc: auc[row].is_none(),
                        revenue: has_revenue_column && revenue[row].is_none(),
                    },
                    fields: row_fields(raw, row),
                }
            })
            .collect();

        let null_dates = dates.iter().filter(|d| d.is_none()).count();
        let coerced_auc = records.iter().filter(|r| r.coerced.auc).count();
        let coerced_revenue = records.iter().filter(|r| r.coerced.revenue).count();
        if null_dates > 0 || coerced_auc > 0 || coerced_revenue > 0 {
            tracing::warn!(
                null_dates,
                coerced_auc,
                coerced_revenue,
                "Unparseable cells replaced with defaults during normalization"
            );
        }
        if !has_revenue_column {
            tracing::debug!("No '{}' column, filling with 0.0", REVENUE_COLUMN);
        }
        tracing::info!(
            rows = records.len(),
            revenue_curve_column = ?revenue_curve_column,
            "Normalized consultant base"
        );

        NormalizedTable::new(
            raw.headers().to_vec(),
            records,
            has_revenue_column,
            revenue_curve_column,
            self.placeholder.clone(),
        )
    }
}

fn compare_dates(
    a: &Option<DateTime<Utc>>,
    b: &Option<DateTime<Utc>>,
    policy: NullDatePolicy,
) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.cmp(y),
        (None, None) => Ordering::Equal,
        (None, Some(_)) => match policy {
            NullDatePolicy::First => Ordering::Less,
            NullDatePolicy::Last => Ordering::Greater,
        },
        (Some(_), None) => match policy {
            NullDatePolicy::First => Ordering::Greater,
            NullDatePolicy::Last => Ordering::Less,
        },
    }
}

fn parse_amounts(raw: &RawTable, column: &str) -> Vec<Option<f64>> {
    match raw.column(column) {
        Some(cells) => locale_number::parse_column(&cells),
        None => vec![None; raw.len()],
    }
}

fn row_fields(raw: &RawTable, row: usize) -> BTreeMap<String, String> {
    let mut fields = BTreeMap::new();
    for (col, header) in raw.headers().iter().enumerate() {
        if let Some(value) = raw.cell(row, col) {
            fields
                .entry(header.clone())
                .or_insert_with(|| value.to_string());
        }
    }
    fields
}
