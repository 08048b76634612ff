use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single scalar attribute value from a spec table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpecValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl SpecValue {
    /// Numeric view of the value. Text that parses as a number counts.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            SpecValue::Number(n) => Some(*n),
            SpecValue::Text(s) => s.trim().parse().ok(),
            SpecValue::Bool(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SpecValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Empty strings are treated like missing fields.
    pub fn is_blank(&self) -> bool {
        matches!(self, SpecValue::Text(s) if s.trim().is_empty())
    }
}

impl fmt::Display for SpecValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecValue::Bool(true) => f.write_str("Yes"),
            SpecValue::Bool(false) => f.write_str("No"),
            SpecValue::Number(n) => f.write_str(&format_number(*n)),
            SpecValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for SpecValue {
    fn from(value: f64) -> Self {
        SpecValue::Number(value)
    }
}

impl From<i64> for SpecValue {
    fn from(value: i64) -> Self {
        SpecValue::Number(value as f64)
    }
}

impl From<&str> for SpecValue {
    fn from(value: &str) -> Self {
        SpecValue::Text(value.to_string())
    }
}

impl From<String> for SpecValue {
    fn from(value: String) -> Self {
        SpecValue::Text(value)
    }
}

/// Render a number without a trailing `.0` when it is integral.
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// One equipment model's attributes, keyed by canonical field name.
///
/// `model_number` is held outside the field map so the key/field invariant is
/// enforced once, at load time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpecRecord {
    pub model_number: String,
    fields: BTreeMap<String, SpecValue>,
}

impl SpecRecord {
    pub fn new(model_number: impl Into<String>) -> Self {
        Self {
            model_number: model_number.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style insert, mostly for tests and enrichment.
    pub fn with(mut self, field: &str, value: impl Into<SpecValue>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: &str, value: impl Into<SpecValue>) {
        self.fields.insert(field.to_string(), value.into());
    }

    /// Present and non-blank.
    pub fn get(&self, field: &str) -> Option<&SpecValue> {
        self.fields.get(field).filter(|v| !v.is_blank())
    }

    pub fn has(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    pub fn number(&self, field: &str) -> Option<f64> {
        self.get(field).and_then(SpecValue::as_f64)
    }

    pub fn text(&self, field: &str) -> Option<String> {
        self.get(field).map(|v| v.to_string())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn equipment_type(&self) -> Option<&str> {
        self.get("equipment_type").and_then(SpecValue::as_str)
    }

    /// Nominal tonnage; zero is treated as absent.
    pub fn tonnage(&self) -> Option<f64> {
        self.number("tonnage").filter(|t| *t > 0.0)
    }
}
