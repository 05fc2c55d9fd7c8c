//! The per-query field bundle and its typed accessors
//!
//! A [`StockBundle`] is the flat set of named fields the provider returned for
//! one ticker. Coverage differs wildly between tickers, so every accessor
//! treats a missing or null field as an ordinary `None`.

use serde_json::{Map, Value};

/// Flat mapping of provider field name to value for one ticker
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StockBundle {
    fields: Map<String, Value>,
}

impl StockBundle {
    /// Create an empty bundle
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an already flat JSON object
    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Insert a field unless a non-null value is already present.
    ///
    /// Earlier sources take precedence over later ones.
    pub fn insert_if_absent(&mut self, key: impl Into<String>, value: Value) {
        if value.is_null() {
            return;
        }
        let key = key.into();
        match self.fields.get(&key) {
            Some(existing) if !existing.is_null() => {},
            _ => {
                self.fields.insert(key, value);
            },
        }
    }

    /// Number of fields present
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the provider returned no fields at all
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// First candidate that holds a number (or a numeric string)
    pub fn number(&self, keys: &[&str]) -> Option<f64> {
        keys.iter()
            .filter_map(|key| self.fields.get(*key))
            .find_map(as_number)
    }

    /// First candidate rendered as non-empty text
    pub fn text(&self, keys: &[&str]) -> Option<String> {
        keys.iter()
            .filter_map(|key| self.fields.get(*key))
            .find_map(|value| match value {
                Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                Value::Bool(b) => Some(b.to_string()),
                _ => None,
            })
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

impl FromIterator<(String, Value)> for StockBundle {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut bundle = Self::new();
        for (key, value) in iter {
            bundle.insert_if_absent(key, value);
        }
        bundle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bundle(value: Value) -> StockBundle {
        match value {
            Value::Object(map) => StockBundle::from_map(map),
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_first_present_candidate_wins() {
        let b = bundle(json!({
            "regularMarketPrice": null,
            "currentPrice": 189.5,
            "previousClose": 188.0
        }));
        assert_eq!(
            b.number(&["regularMarketPrice", "currentPrice", "previousClose"]),
            Some(189.5)
        );
    }

    #[test]
    fn test_missing_is_none() {
        let b = StockBundle::new();
        assert!(b.is_empty());
        assert_eq!(b.number(&["marketCap"]), None);
        assert_eq!(b.text(&["sector"]), None);
    }

    #[test]
    fn test_numeric_strings_and_non_numbers() {
        let b = bundle(json!({ "beta": "1.24", "sector": "Technology", "bad": "n/a" }));
        assert_eq!(b.number(&["beta"]), Some(1.24));
        assert_eq!(b.number(&["sector"]), None);
        assert_eq!(b.number(&["bad", "beta"]), Some(1.24));
    }

    #[test]
    fn test_text() {
        let b = bundle(json!({ "fullTimeEmployees": 164000, "website": "" }));
        assert_eq!(b.text(&["website"]), None);
        assert_eq!(b.text(&["fullTimeEmployees"]), Some("164000".to_string()));
    }

    #[test]
    fn test_insert_if_absent_keeps_first() {
        let bundle: StockBundle = vec![
            ("marketCap".to_string(), json!(100)),
            ("marketCap".to_string(), json!(200)),
            ("beta".to_string(), Value::Null),
        ]
        .into_iter()
        .collect();

        assert_eq!(bundle.number(&["marketCap"]), Some(100.0));
        assert_eq!(bundle.len(), 1);
    }
}
