//! One consultant's slice of the normalized base, plus the "current
//! snapshot" card read from its most recent row.

use crate::error::{EngineError, EngineResult};
use chrono::{DateTime, Utc};
use serde::Serialize;
use shared::models::{ConsultantRecord, CurvePoint, SeriesPoint};
use shared::utils::brazilian_format;

pub const NAME_FIELD: &str = "Nome";
pub const STATUS_FIELD: &str = "Status";
pub const CLASS_FIELD: &str = "Turma";
pub const TENURE_FIELD: &str = "Tempo (meses)";
pub const MF_FIELD: &str = "MF";
pub const REGIONAL_FIELD: &str = "Regional";

#[derive(Debug, Clone, Serialize)]
pub struct EntityHistory {
    email: String,
    records: Vec<ConsultantRecord>,
    has_revenue_curve: bool,
    #[serde(skip)]
    placeholder: String,
}

impl EntityHistory {
    pub(crate) fn new(
        email: String,
        records: Vec<ConsultantRecord>,
        has_revenue_curve: bool,
        placeholder: String,
    ) -> Self {
        EntityHistory {
            email,
            records,
            has_revenue_curve,
            placeholder,
        }
    }

    pub fn email(&self) -> &str {
        &self.email
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

    /// Most recent row. Fails instead of inventing a default record.
    pub fn snapshot(&self) -> EngineResult<Snapshot<'_>> {
        self.records
            .last()
            .map(|record| Snapshot {
                record,
                placeholder: &self.placeholder,
            })
            .ok_or_else(|| EngineError::NoDataForEntity(self.email.clone()))
    }

    pub fn auc_series(&self) -> Vec<SeriesPoint> {
        self.records
            .iter()
            .map(|r| SeriesPoint { date: r.date, value: r.auc })
            .collect()
    }

    pub fn revenue_series(&self) -> Vec<SeriesPoint> {
        self.records
            .iter()
            .map(|r| SeriesPoint { date: r.date, value: r.revenue })
            .collect()
    }

    // Rows without a curve value are skipped, as a chart would skip gaps.
    pub fn auc_curve_series(&self) -> Vec<CurvePoint> {
        self.records
            .iter()
            .filter_map(|r| r.auc_curve.as_deref().map(|c| CurvePoint::new(r.date, c)))
            .collect()
    }

    /// Empty when the upload had no revenue-curve column under any alias.
    pub fn revenue_curve_series(&self) -> Vec<CurvePoint> {
        if !self.has_revenue_curve {
            return Vec::new();
        }
        self.records
            .iter()
            .filter_map(|r| r.revenue_curve.as_deref().map(|c| CurvePoint::new(r.date, c)))
            .collect()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    record: &'a ConsultantRecord,
    placeholder: &'a str,
}

impl<'a> Snapshot<'a> {
    pub fn record(&self) -> &'a ConsultantRecord {
        self.record
    }

    pub fn date(&self) -> Option<DateTime<Utc>> {
        self.record.date
    }

    pub fn auc(&self) -> f64 {
        self.record.auc
    }

    pub fn revenue(&self) -> f64 {
        self.record.revenue
    }

    pub fn formatted_auc(&self) -> String {
        brazilian_format::format_brl(self.record.auc)
    }

    /// Raw cell of any column, or the placeholder when the row lacks it.
    pub fn field(&self, name: &str) -> &'a str {
        self.record.field(name).unwrap_or(self.placeholder)
    }

    pub fn name(&self) -> &'a str {
        self.field(NAME_FIELD)
    }

    pub fn email(&self) -> &'a str {
        self.record.email.as_deref().unwrap_or(self.placeholder)
    }

    pub fn status(&self) -> &'a str {
        self.field(STATUS_FIELD)
    }

    pub fn class(&self) -> &'a str {
        self.field(CLASS_FIELD)
    }

    pub fn tenure_months(&self) -> &'a str {
        self.field(TENURE_FIELD)
    }

    pub fn mf(&self) -> &'a str {
        self.field(MF_FIELD)
    }

    pub fn regional(&self) -> &'a str {
        self.field(REGIONAL_FIELD)
    }

    pub fn auc_curve(&self) -> &'a str {
        self.record.auc_curve.as_deref().unwrap_or(self.placeholder)
    }

    pub fn revenue_curve(&self) -> &'a str {
        self.record.revenue_curve.as_deref().unwrap_or(self.placeholder)
    }

    pub fn card(&self) -> ConsultantCard {
        ConsultantCard {
            name: self.name().to_string(),
            email: self.email().to_string(),
            status: self.status().to_string(),
            auc: self.auc(),
            auc_display: self.formatted_auc(),
            auc_curve: self.auc_curve().to_string(),
            revenue: self.revenue(),
            revenue_curve: self.revenue_curve().to_string(),
            class: self.class().to_string(),
            tenure_months: self.tenure_months().to_string(),
            mf: self.mf().to_string(),
            regional: self.regional().to_string(),
            as_of: self.date(),
        }
    }
}

/// Owned, serializable copy of the snapshot for the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsultantCard {
    pub name: String,
    pub email: String,
    pub status: String,
    pub auc: f64,
    pub auc_display: String,
    pub auc_curve: String,
    pub revenue: f64,
    pub revenue_curve: String,
    pub class: String,
    pub tenure_months: String,
    pub mf: String,
    pub regional: String,
    pub as_of: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineSettings;
    use crate::data::csv_parser::CsvLoader;
    use crate::data::normalizer::RecordNormalizer;
    use crate::data::table::NormalizedTable;

    fn table(csv: &str) -> NormalizedTable {
        let raw = CsvLoader::default().read_bytes(csv.as_bytes()).unwrap();
        RecordNormalizer::new(&EngineSettings::default()).normalize(&raw)
    }

    #[test]
    fn snapshot_is_most_recent_row() {
        let t = table(
            "Data,E-mail,AuC,Nome\n2024-03-01,a@x.com,\"1.500,00\",Ana Maria\n2024-01-01,a@x.com,\"1.000,00\",Ana\n",
        );
        let history = t.history("a@x.com");
        let snapshot = history.snapshot().unwrap();
        assert_eq!(snapshot.auc(), 1500.0);
        assert_eq!(snapshot.name(), "Ana Maria");
        assert_eq!(snapshot.formatted_auc(), "R$ 1.500,00");
    }

    #[test]
    fn empty_history_snapshot_fails() {
        let t = table("Data,E-mail,AuC\n2024-01-01,a@x.com,1\n");
        let history = t.history("nobody@x.com");
        assert!(history.auc_series().is_empty());
        match history.snapshot() {
            Err(EngineError::NoDataForEntity(email)) => assert_eq!(email, "nobody@x.com"),
            other => panic!("expected NoDataForEntity, got {:?}", other.map(|s| s.auc())),
        }
    }

    #[test]
    fn absent_fields_fall_back_to_placeholder() {
        let t = table("Data,E-mail,AuC,Status\n2024-01-01,a@x.com,1,\n");
        let history = t.history("a@x.com");
        let card = history.snapshot().unwrap().card();
        assert_eq!(card.name, "-");
        assert_eq!(card.status, "-");
        assert_eq!(card.class, "-");
        assert_eq!(card.tenure_months, "-");
        assert_eq!(card.mf, "-");
        assert_eq!(card.regional, "-");
        assert_eq!(card.auc_curve, "-");
        assert_eq!(card.revenue_curve, "-");
        assert_eq!(card.email, "a@x.com");
    }

    #[test]
    fn card_reads_secondary_fields() {
        let t = table(
            "Data,E-mail,AuC,Turma,Tempo (meses),MF,Regional,Curva AuC,Curva Receita\n2024-01-01,a@x.com,1,T3,14,Carla,Sul,B,C\n",
        );
        let history = t.history("a@x.com");
        let card = history.snapshot().unwrap().card();
        assert_eq!(card.class, "T3");
        assert_eq!(card.tenure_months, "14");
        assert_eq!(card.mf, "Carla");
        assert_eq!(card.regional, "Sul");
        assert_eq!(card.auc_curve, "B");
        assert_eq!(card.revenue_curve, "C");
    }

    #[test]
    fn series_follow_history_order() {
        let t = table(
            "Data,E-mail,AuC,Receita,Curva AuC,Curva Receita do Consultor\n2024-02-01,a@x.com,20,\"2,5\",A,X\n2024-01-01,a@x.com,10,\"1,5\",C,\n",
        );
        let history = t.history("a@x.com");

        let auc: Vec<f64> = history.auc_series().iter().map(|p| p.value).collect();
        assert_eq!(auc, vec![10.0, 20.0]);
        let revenue: Vec<f64> = history.revenue_series().iter().map(|p| p.value).collect();
        assert_eq!(revenue, vec![1.5, 2.5]);

        let curve = history.auc_curve_series();
        assert_eq!(curve.len(), 2);
        assert_eq!((curve[0].label.as_str(), curve[0].rank), ("C", Some(1)));
        assert_eq!((curve[1].label.as_str(), curve[1].rank), ("A", Some(3)));

        // "X" is outside D..A but still reported, without a rank.
        let revenue_curve = history.revenue_curve_series();
        assert_eq!(revenue_curve.len(), 1);
        assert_eq!(revenue_curve[0].label, "X");
        assert_eq!(revenue_curve[0].rank, None);
    }

    #[test]
    fn no_revenue_curve_column_gives_empty_series() {
        let t = table("Data,E-mail,AuC\n2024-01-01,a@x.com,1\n");
        assert!(t.history("a@x.com").revenue_curve_series().is_empty());
    }
}
