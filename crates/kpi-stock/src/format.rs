//! Display formatting for metric values

use chrono::DateTime;
use serde::Serialize;
use serde::ser::{SerializeStruct, Serializer};

/// Placeholder shown for any absent value
pub const NOT_AVAILABLE: &str = "N/A";

/// How the provider scales a percentage field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PercentScale {
    /// 0–1 fraction, multiplied by 100 for display
    Fraction,
    /// Already expressed in percent
    Percent,
}

/// Semantic kind of a metric, which decides its display format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "scale")]
pub enum MetricKind {
    /// `$1,234.56`
    Currency,
    /// `$1,235`
    WholeCurrency,
    /// `28.45%`
    Percent(PercentScale),
    /// `1,234.56`
    Ratio,
    /// `164,000`
    Count,
    /// Epoch seconds rendered as `YYYY-MM-DD`
    Date,
    /// Passed through unchanged
    Text,
}

/// Raw value as extracted from the bundle
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

/// A value paired with the kind that decides how it is displayed
#[derive(Debug, Clone, PartialEq)]
pub struct MetricValue {
    pub kind: MetricKind,
    pub raw: Option<RawValue>,
}

impl MetricValue {
    /// Numeric metric; `None` renders as N/A
    pub fn number(kind: MetricKind, value: Option<f64>) -> Self {
        Self {
            kind,
            raw: value.map(RawValue::Number),
        }
    }

    /// Text metric with the default placeholder
    pub fn text(value: Option<String>) -> Self {
        Self {
            kind: MetricKind::Text,
            raw: value.map(RawValue::Text),
        }
    }

    /// Whether the underlying value was missing
    pub fn is_missing(&self) -> bool {
        self.raw.is_none()
    }

    /// Rendered display string
    pub fn display(&self) -> String {
        match &self.raw {
            None => NOT_AVAILABLE.to_string(),
            Some(RawValue::Text(text)) => text.clone(),
            Some(RawValue::Number(value)) => format_number(self.kind, *value),
        }
    }
}

impl Serialize for MetricValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("MetricValue", 3)?;
        state.serialize_field("kind", &self.kind)?;
        state.serialize_field("raw", &self.raw)?;
        state.serialize_field("display", &self.display())?;
        state.end()
    }
}

/// Format a number under `kind`
pub fn format_number(kind: MetricKind, value: f64) -> String {
    match kind {
        MetricKind::Currency => format_currency(value),
        MetricKind::WholeCurrency => format_whole_currency(value),
        MetricKind::Percent(scale) => format_percent(value, scale),
        MetricKind::Ratio => format_ratio(value),
        MetricKind::Count => format_count(value),
        MetricKind::Date => format_date(value),
        MetricKind::Text => value.to_string(),
    }
}

/// `2876542000000.0` → `$2,876,542,000,000.00`
pub fn format_currency(value: f64) -> String {
    with_sign(value, |abs| format!("${}", group_decimal(abs, 2)))
}

/// `2876542000000.0` → `$2,876,542,000,000`
pub fn format_whole_currency(value: f64) -> String {
    with_sign(value, |abs| format!("${}", group_decimal(abs, 0)))
}

/// `0.2845` as a fraction → `28.45%`
pub fn format_percent(value: f64, scale: PercentScale) -> String {
    let percent = match scale {
        PercentScale::Fraction => value * 100.0,
        PercentScale::Percent => value,
    };
    with_sign(percent, |abs| format!("{abs:.2}%"))
}

/// `1234.5` → `1,234.50`
pub fn format_ratio(value: f64) -> String {
    with_sign(value, |abs| group_decimal(abs, 2))
}

/// `164000.0` → `164,000`
pub fn format_count(value: f64) -> String {
    with_sign(value, |abs| group_decimal(abs, 0))
}

/// Epoch seconds → `YYYY-MM-DD` (UTC); out-of-range input falls back to the raw number
pub fn format_date(epoch_seconds: f64) -> String {
    DateTime::from_timestamp(epoch_seconds as i64, 0).map_or_else(
        || format_count(epoch_seconds),
        |dt| dt.format("%Y-%m-%d").to_string(),
    )
}

fn with_sign(value: f64, body: impl Fn(f64) -> String) -> String {
    let formatted = body(value.abs());
    if value < 0.0 && formatted.chars().any(|c| c.is_ascii_digit() && c != '0') {
        format!("-{formatted}")
    } else {
        formatted
    }
}

/// Fixed decimals with `,` between thousands in the integer part
fn group_decimal(value: f64, decimals: usize) -> String {
    let fixed = format!("{value:.decimals$}");
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match frac_part {
        Some(frac) => format!("{grouped}.{frac}"),
        None => grouped,
    }
}
