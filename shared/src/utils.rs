// Brazilian number handling shared by the engine (parsing uploaded cells)
// and the report output (formatting money as "R$ 1.234,56").
pub mod brazilian_format {
    use std::str::FromStr;
    use anyhow::{Result, anyhow};

    /// Reads an AuC/Receita cell written as "250.000,00": dots group
    /// thousands, the comma marks the cents.
    pub fn parse_decimal(cell: &str) -> Result<f64> {
        let machine: String = cell
            .trim()
            .chars()
            .filter(|&c| c != '.')
            .map(|c| if c == ',' { '.' } else { c })
            .collect();

        f64::from_str(&machine).map_err(|e| anyhow!("'{}' is not a BRL amount: {}", cell, e))
    }

    // True when the cell is already a plain machine number ("1500.5", "-3", "1e3").
    pub fn is_plain_number(s: &str) -> bool {
        f64::from_str(s.trim()).map_or(false, f64::is_finite)
    }

    // Fixed decimals with ',' as the decimal separator and '.' grouping thousands.
    pub fn format_decimal(value: f64, decimals: usize) -> String {
        let formatted = format!("{:.decimals$}", value.abs(), decimals = decimals);
        let (int_part, frac_part) = match formatted.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (formatted.as_str(), None),
        };

        let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
        for (idx, ch) in int_part.chars().enumerate() {
            if idx > 0 && (int_part.len() - idx) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }

        let is_zero = formatted.chars().all(|c| c == '0' || c == '.');
        let sign = if value.is_sign_negative() && !is_zero { "-" } else { "" };
        match frac_part {
            Some(frac) => format!("{sign}{grouped},{frac}"),
            None => format!("{sign}{grouped}"),
        }
    }

    // Currency display used on the consultant card: "R$ 1.234,56"
    pub fn format_brl(value: f64) -> String {
        format!("R$ {}", format_decimal(value, 2))
    }

}
