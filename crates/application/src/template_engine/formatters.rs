//! Bundled formatter helpers
//!
//! Ready-made `ValueFormatter`s for common message formatting: digit
//! grouping, currency amounts, dates, case conversion, and path-conditional
//! dispatch between two formatters.

use std::fmt::Write as _;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate};
use stencil_domain::Value;

use super::formatter::{DisplayFormatter, ValueFormatter};

fn group_digits(digits: &str, separator: char) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let len = digits.len();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

/// Groups the integer part of an already rendered decimal number.
fn group_rendered(rendered: &str, separator: char) -> String {
    let (sign, unsigned) = rendered
        .strip_prefix('-')
        .map_or(("", rendered), |rest| ("-", rest));
    let (int_part, frac_part) = unsigned
        .split_once('.')
        .map_or((unsigned, None), |(i, f)| (i, Some(f)));

    let mut out = String::from(sign);
    out.push_str(&group_digits(int_part, separator));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Formats numbers with a thousands separator (`1234567` → `1,234,567`).
///
/// Non-numeric and non-finite values use their natural text form.
#[derive(Debug, Clone, Copy)]
pub struct GroupedNumber {
    /// Character inserted between digit groups.
    pub separator: char,
}

impl GroupedNumber {
    /// Creates a grouping formatter with a custom separator.
    #[must_use]
    pub const fn new(separator: char) -> Self {
        Self { separator }
    }
}

impl Default for GroupedNumber {
    fn default() -> Self {
        Self::new(',')
    }
}

impl ValueFormatter for GroupedNumber {
    fn format(&self, value: &Value, _path: &str) -> String {
        match value {
            Value::Int(_) => group_rendered(&value.to_string(), self.separator),
            Value::Float(x) if x.is_finite() => group_rendered(&value.to_string(), self.separator),
            other => other.to_string(),
        }
    }
}

/// Formats numbers as money: fixed decimals, grouped, symbol prefix.
#[derive(Debug, Clone)]
pub struct Currency {
    /// Symbol placed before the amount.
    pub symbol: String,
    /// Digits after the decimal point.
    pub decimals: usize,
    /// Thousands separator.
    pub separator: char,
}

impl Currency {
    /// Creates a currency formatter with two decimals and `,` grouping.
    #[must_use]
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            decimals: 2,
            separator: ',',
        }
    }

    /// Sets the number of decimals.
    #[must_use]
    pub fn with_decimals(mut self, decimals: usize) -> Self {
        self.decimals = decimals;
        self
    }
}

impl ValueFormatter for Currency {
    fn format(&self, value: &Value, _path: &str) -> String {
        let Some(amount) = value.as_f64().filter(|x| x.is_finite()) else {
            return value.to_string();
        };
        let fixed = format!("{:.*}", self.decimals, amount.abs());
        let sign = if amount < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0') {
            "-"
        } else {
            ""
        };
        format!("{sign}{}{}", self.symbol, group_rendered(&fixed, self.separator))
    }
}

/// Formats dates with a strftime pattern.
///
/// Accepts RFC 3339 strings, `YYYY-MM-DD` strings and integer Unix
/// timestamps (seconds). Anything else, or a pattern the value cannot
/// satisfy, falls back to the natural text form.
#[derive(Debug, Clone)]
pub struct DateFormat {
    /// strftime-style pattern, e.g. `%d/%m/%Y`.
    pub format: String,
}

impl DateFormat {
    /// Creates a date formatter.
    #[must_use]
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
        }
    }

    fn try_format(&self, value: &Value) -> Option<String> {
        let mut out = String::new();
        match value {
            Value::String(s) => {
                if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                    write!(out, "{}", dt.format(&self.format)).ok()?;
                } else {
                    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
                    let midnight = date.and_hms_opt(0, 0, 0)?;
                    write!(out, "{}", midnight.format(&self.format)).ok()?;
                }
            }
            Value::Int(secs) => {
                let dt = DateTime::from_timestamp(*secs, 0)?;
                write!(out, "{}", dt.format(&self.format)).ok()?;
            }
            _ => return None,
        }
        Some(out)
    }
}

impl ValueFormatter for DateFormat {
    fn format(&self, value: &Value, _path: &str) -> String {
        self.try_format(value).unwrap_or_else(|| value.to_string())
    }
}

/// Upper-cases the natural text form.
#[derive(Debug, Clone, Copy, Default)]
pub struct UpperCase;

impl ValueFormatter for UpperCase {
    fn format(&self, value: &Value, _path: &str) -> String {
        value.to_string().to_uppercase()
    }
}

/// Lower-cases the natural text form.
#[derive(Debug, Clone, Copy, Default)]
pub struct LowerCase;

impl ValueFormatter for LowerCase {
    fn format(&self, value: &Value, _path: &str) -> String {
        value.to_string().to_lowercase()
    }
}

/// Picks a formatter based on whether the placeholder path contains a
/// needle (ASCII case-insensitive).
#[derive(Clone)]
pub struct PathContains {
    needle: String,
    matched: Arc<dyn ValueFormatter>,
    otherwise: Arc<dyn ValueFormatter>,
}

impl PathContains {
    /// Uses `matched` for paths containing `needle`, natural text otherwise.
    #[must_use]
    pub fn new(needle: impl Into<String>, matched: impl ValueFormatter + 'static) -> Self {
        Self {
            needle: needle.into().to_ascii_lowercase(),
            matched: Arc::new(matched),
            otherwise: Arc::new(DisplayFormatter),
        }
    }

    /// Sets the formatter for paths that do not contain the needle.
    #[must_use]
    pub fn otherwise(mut self, formatter: impl ValueFormatter + 'static) -> Self {
        self.otherwise = Arc::new(formatter);
        self
    }
}

impl std::fmt::Debug for PathContains {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PathContains")
            .field("needle", &self.needle)
            .finish_non_exhaustive()
    }
}

impl ValueFormatter for PathContains {
    fn format(&self, value: &Value, path: &str) -> String {
        if path.to_ascii_lowercase().contains(&self.needle) {
            self.matched.format(value, path)
        } else {
            self.otherwise.format(value, path)
        }
    }
}

/// Groups digits only for placeholders whose path mentions `count`.
#[must_use]
pub fn count_grouping() -> PathContains {
    PathContains::new("count", GroupedNumber::default())
}
