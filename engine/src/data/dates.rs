// Lenient parsing of the `Data` column: RFC 3339 first, then each configured
// chrono format, as a datetime and then as a bare date (midnight UTC), and
// last the month-only formats, pinned to day 1.
use crate::config::EngineSettings;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

#[derive(Debug, Clone)]
pub struct DateParser {
    formats: Vec<String>,
    month_formats: Vec<String>,
}

impl DateParser {
    pub fn new(formats: Vec<String>, month_formats: Vec<String>) -> Self {
        DateParser {
            formats,
            month_formats,
        }
    }

    pub fn from_settings(settings: &EngineSettings) -> Self {
        Self::new(settings.date_formats.clone(), settings.month_formats.clone())
    }

    pub fn parse(&self, raw: &str) -> Option<DateTime<Utc>> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        for format in &self.formats {
            if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
                return Some(DateTime::from_naive_utc_and_offset(naive, Utc));
            }
            if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
                return Some(DateTime::from_naive_utc_and_offset(
                    date.and_time(NaiveTime::MIN),
                    Utc,
                ));
            }
        }
        // chrono needs a day to build a NaiveDate, so supply one.
        let with_day = format!("{raw} 01");
        self.month_formats.iter().find_map(|format| {
            NaiveDate::parse_from_str(&with_day, &format!("{format} %d"))
                .ok()
                .map(|date| DateTime::from_naive_utc_and_offset(date.and_time(NaiveTime::MIN), Utc))
        })
    }
}
