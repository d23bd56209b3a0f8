use super::history::EntityHistory;
use chrono::{DateTime, Utc};
use serde::Serialize;
use shared::models::ConsultantRecord;
use std::collections::BTreeSet;

/// The uploaded base after normalization. Built once per upload by
/// [`RecordNormalizer`](super::normalizer::RecordNormalizer) and never
/// mutated afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct NormalizedTable {
    columns: Vec<String>,
    records: Vec<ConsultantRecord>,
    has_revenue_column: bool,
    revenue_curve_column: Option<String>,
    #[serde(skip)]
    placeholder: String,
}

impl NormalizedTable {
    pub(crate) fn new(
        columns: Vec<String>,
        records: Vec<ConsultantRecord>,
        has_revenue_column: bool,
        revenue_curve_column: Option<String>,
        placeholder: String,
    ) -> Self {
        NormalizedTable {
            columns,
            records,
            has_revenue_column,
            revenue_curve_column,
            placeholder,
        }
    }

    pub fn records(&self) -> &[ConsultantRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Headers as uploaded; a synthesized `Receita` is not listed here.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// `false` when `Receita` was absent and every revenue is a filled-in `0.0`.
    pub fn has_revenue_column(&self) -> bool {
        self.has_revenue_column
    }

    /// Which of the accepted revenue-curve headers the upload used, if any.
    pub fn revenue_curve_column(&self) -> Option<&str> {
        self.revenue_curve_column.as_deref()
    }

    pub fn dates(&self) -> Vec<Option<DateTime<Utc>>> {
        self.records.iter().map(|r| r.date).collect()
    }

    pub fn auc_column(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.auc).collect()
    }

    pub fn revenue_column(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.revenue).collect()
    }

    /// Distinct non-missing e-mails, ascending.
    pub fn emails(&self) -> Vec<String> {
        self.records
            .iter()
            .filter_map(|r| r.email.as_deref())
            .collect::<BTreeSet<&str>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Rows of one consultant in table order. Unknown e-mails give an
    /// empty history rather than an error.
    pub fn history(&self, email: &str) -> EntityHistory {
        let records = self
            .records
            .iter()
            .filter(|r| r.email.as_deref() == Some(email))
            .cloned()
            .collect();
        EntityHistory::new(
            email.to_string(),
            records,
            self.revenue_curve_column.is_some(),
            self.placeholder.clone(),
        )
    }
}
