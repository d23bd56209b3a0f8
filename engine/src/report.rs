//! Plain-text and JSON rendering of a consultant history, used by the
//! `engine` binary in place of the dashboard widgets.

use crate::data::{ConsultantCard, EntityHistory, NormalizedTable};
use crate::error::EngineResult;
use crate::services::AnalyzerSession;
use chrono::{DateTime, Utc};
use serde::Serialize;
use shared::models::{CurvePoint, SeriesPoint, CURVE_ORDER};
use shared::utils::brazilian_format;
use std::fmt::{self, Write};

#[derive(Debug, Serialize)]
pub struct HistoryReport {
    pub card: ConsultantCard,
    pub auc: Vec<SeriesPoint>,
    pub revenue: Vec<SeriesPoint>,
    pub auc_curve: Vec<CurvePoint>,
    pub revenue_curve: Vec<CurvePoint>,
    pub curve_order: [&'static str; 4],
}

impl HistoryReport {
    /// Fails with `NoDataForEntity` for an empty history.
    pub fn build(history: &EntityHistory) -> EngineResult<Self> {
        let card = history.snapshot()?.card();
        Ok(HistoryReport {
            card,
            auc: history.auc_series(),
            revenue: history.revenue_series(),
            auc_curve: history.auc_curve_series(),
            revenue_curve: history.revenue_curve_series(),
            curve_order: CURVE_ORDER,
        })
    }
}

fn format_date(date: Option<DateTime<Utc>>) -> String {
    date.map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| "-".to_string())
}

pub fn render_summary(table: &NormalizedTable) -> EngineResult<String> {
    let mut out = String::new();
    write_summary(&mut out, table)?;
    Ok(out)
}

fn write_summary(out: &mut impl Write, table: &NormalizedTable) -> fmt::Result {
    let dates: Vec<DateTime<Utc>> = table.dates().into_iter().flatten().collect();
    writeln!(out, "Registros: {}", table.len())?;
    writeln!(out, "Consultores: {}", table.emails().len())?;
    if let (Some(first), Some(last)) = (dates.first(), dates.last()) {
        writeln!(
            out,
            "Período: {} a {}",
            format_date(Some(*first)),
            format_date(Some(*last))
        )?;
    }
    if !table.has_revenue_column() {
        writeln!(out, "Coluna 'Receita' ausente: valores considerados 0,00")?;
    }
    Ok(())
}

pub fn render_text(history: &EntityHistory) -> EngineResult<String> {
    let card = history.snapshot()?.card();
    let mut out = String::new();
    write_card(&mut out, &card)?;
    writeln!(out)?;
    write_series(&mut out, history)?;
    Ok(out)
}

fn write_card(out: &mut impl Write, card: &ConsultantCard) -> fmt::Result {
    writeln!(out, "Ficha do Consultor")?;
    writeln!(out, "  Nome:           {}", card.name)?;
    writeln!(out, "  E-mail:         {}", card.email)?;
    writeln!(out, "  Status:         {}", card.status)?;
    writeln!(out, "  AuC Atual (PL): {}", card.auc_display)?;
    writeln!(out, "  Curva Atual:    {}", card.auc_curve)?;
    writeln!(out)?;
    writeln!(out, "Informações Secundárias")?;
    writeln!(out, "  Turma:    {}", card.class)?;
    writeln!(out, "  Tempo:    {} meses", card.tenure_months)?;
    writeln!(out, "  MF:       {}", card.mf)?;
    writeln!(out, "  Regional: {}", card.regional)
}

fn write_series(out: &mut impl Write, history: &EntityHistory) -> fmt::Result {
    writeln!(out, "Evolução Histórica")?;
    writeln!(
        out,
        "  {:<10}  {:>20}  {:>20}  {:<9}  {:<13}",
        "Data", "AuC", "Receita", "Curva AuC", "Curva Receita"
    )?;
    for record in history.records() {
        writeln!(
            out,
            "  {:<10}  {:>20}  {:>20}  {:<9}  {:<13}",
            format_date(record.date),
            brazilian_format::format_brl(record.auc),
            brazilian_format::format_brl(record.revenue),
            record.auc_curve.as_deref().unwrap_or("-"),
            record.revenue_curve.as_deref().unwrap_or("-"),
        )?;
    }
    Ok(())
}

/// What the terminal shows for one consultant selection.
#[derive(Debug, PartialEq)]
pub enum Rendered {
    Report(String),
    /// Empty selection or a consultant without rows: a notice, no report.
    Nothing(String),
}

pub fn render_selection(
    session: &AnalyzerSession,
    email: Option<&str>,
    json: bool,
) -> EngineResult<Rendered> {
    let rendered = session.select(email).and_then(|history| {
        if json {
            render_json(&history)
        } else {
            render_text(&history)
        }
    });
    match rendered {
        Ok(out) => Ok(Rendered::Report(out)),
        Err(err) if err.is_empty_selection() => Ok(Rendered::Nothing(err.to_string())),
        Err(err) => Err(err),
    }
}

pub fn render_json(history: &EntityHistory) -> EngineResult<String> {
    let report = HistoryReport::build(history)?;
    Ok(serde_json::to_string_pretty(&report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    fn session() -> AnalyzerSession {
        let mut session = AnalyzerSession::default();
        session
            .upload(
                "Data,E-mail,AuC,Nome,Curva AuC,Tempo (meses)\n2024-03-01,a@x.com,\"1.500,00\",Ana,A,12\n2024-01-01,a@x.com,\"1.000,00\",Ana,B,10\n"
                    .as_bytes(),
            )
            .unwrap();
        session
    }

    #[test]
    fn text_report_shows_card_and_series() {
        let history = session().select(Some("a@x.com")).unwrap();
        let text = render_text(&history).unwrap();
        assert!(text.contains("AuC Atual (PL): R$ 1.500,00"));
        assert!(text.contains("Curva Atual:    A"));
        assert!(text.contains("Tempo:    12 meses"));
        assert!(text.contains("Regional: -"));
        let jan = text.find("01/01/2024").unwrap();
        let mar = text.find("01/03/2024").unwrap();
        assert!(jan < mar);
    }

    #[test]
    fn json_report_carries_curve_order() {
        let history = session().select(Some("a@x.com")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&render_json(&history).unwrap()).unwrap();
        assert_eq!(value["card"]["auc"], 1500.0);
        assert_eq!(value["curve_order"], serde_json::json!(["D", "C", "B", "A"]));
        assert_eq!(value["auc_curve"][0]["rank"], 2);
        assert_eq!(value["revenue"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn empty_history_is_not_rendered() {
        let history = session().select(Some("ghost@x.com")).unwrap();
        assert!(matches!(
            render_text(&history),
            Err(EngineError::NoDataForEntity(_))
        ));
    }

    #[test]
    fn empty_selection_renders_nothing() {
        let session = session();
        match render_selection(&session, Some(""), false).unwrap() {
            Rendered::Nothing(notice) => assert!(notice.contains("No consultant selected")),
            other => panic!("expected a notice, got {:?}", other),
        }
        assert!(matches!(
            render_selection(&session, None, true).unwrap(),
            Rendered::Nothing(_)
        ));
        assert!(matches!(
            render_selection(&session, Some("ghost@x.com"), false).unwrap(),
            Rendered::Nothing(_)
        ));
    }

    #[test]
    fn selection_renders_report() {
        match render_selection(&session(), Some("a@x.com"), false).unwrap() {
            Rendered::Report(text) => assert!(text.contains("Ficha do Consultor")),
            other => panic!("expected a report, got {:?}", other),
        }
    }

    #[test]
    fn selection_before_upload_is_an_error() {
        let session = AnalyzerSession::default();
        assert!(matches!(
            render_selection(&session, Some("a@x.com"), false),
            Err(EngineError::NoDataset)
        ));
    }

    #[test]
    fn summary_mentions_synthesized_revenue() {
        let session = session();
        let summary = render_summary(&session.dataset().unwrap()).unwrap();
        assert!(summary.contains("Registros: 2"));
        assert!(summary.contains("Consultores: 1"));
        assert!(summary.contains("Período: 01/01/2024 a 01/03/2024"));
        assert!(summary.contains("'Receita' ausente"));
    }
}
