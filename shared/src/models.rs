use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Display order of the ranking curve, lowest first.
pub const CURVE_ORDER: [&str; 4] = ["D", "C", "B", "A"];

/// One normalized row of the consultant base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsultantRecord {
    /// `None` when the `Data` cell could not be parsed.
    pub date: Option<DateTime<Utc>>,
    pub email: Option<String>,
    pub auc: f64,
    pub revenue: f64,
    pub auc_curve: Option<String>,
    pub revenue_curve: Option<String>,
    pub coerced: CoercedFields,
    /// Every non-empty raw cell of the row, keyed by header.
    pub fields: BTreeMap<String, String>,
}

impl ConsultantRecord {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// Marks metrics that were zero-filled because the cell was missing or
/// unparseable, so a real zero balance can be told apart from an unknown one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoercedFields {
    pub auc: bool,
    pub revenue: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Curve {
    D,
    C,
    B,
    A,
}

impl Curve {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "D" => Some(Curve::D),
            "C" => Some(Curve::C),
            "B" => Some(Curve::B),
            "A" => Some(Curve::A),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        CURVE_ORDER[self.rank()]
    }

    /// Position in [`CURVE_ORDER`]; A is the top of the axis.
    pub fn rank(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: Option<DateTime<Utc>>,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub date: Option<DateTime<Utc>>,
    pub label: String,
    /// `None` for labels outside [`CURVE_ORDER`].
    pub rank: Option<usize>,
}

impl CurvePoint {
    pub fn new(date: Option<DateTime<Utc>>, label: &str) -> Self {
        let label = label.trim();
        CurvePoint {
            date,
            label: label.to_string(),
            rank: Curve::parse(label).map(Curve::rank),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curve_order_matches_ranks() {
        for (idx, label) in CURVE_ORDER.iter().enumerate() {
            let curve = Curve::parse(label).unwrap();
            assert_eq!(curve.rank(), idx);
            assert_eq!(curve.as_str(), *label);
        }
        assert!(Curve::A > Curve::B && Curve::C > Curve::D);
    }

    #[test]
    fn unknown_curve_labels_are_tolerated() {
        assert_eq!(Curve::parse("E"), None);
        let point = CurvePoint::new(None, " Z ");
        assert_eq!(point.label, "Z");
        assert_eq!(point.rank, None);
        assert_eq!(CurvePoint::new(None, "B").rank, Some(2));
    }

    #[test]
    fn record_serializes_to_json() {
        let record = ConsultantRecord {
            date: None,
            email: Some("a@x.com".to_string()),
            auc: 10.5,
            revenue: 0.0,
            auc_curve: Some("A".to_string()),
            revenue_curve: None,
            coerced: CoercedFields { auc: false, revenue: true },
            fields: BTreeMap::from([("Nome".to_string(), "Ana".to_string())]),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["email"], "a@x.com");
        assert_eq!(json["coerced"]["revenue"], true);
        assert_eq!(record.field("Nome"), Some("Ana"));
        assert_eq!(record.field("Status"), None);
    }
}
