/// Canonical spec-record schema and the normalization step applied to every
/// input source.
///
/// Spec tables from different product lines were extracted by different tools
/// and disagree on field names (`cooling_capacity_btuh` vs `cooling_btu_h` vs
/// `cooling_capacity_btu`, `tonnage` vs `nominal_capacity_tons`, ...). Every
/// record is rewritten into the canonical names below when it is loaded, so the
/// rest of the pipeline only ever sees one convention.
use serde_json::{Map, Value};
use tracing::warn;

use crate::record::{SpecRecord, SpecValue};

/// `(alias, canonical)` pairs. A canonical field present in the source always
/// wins over any of its aliases.
pub const FIELD_ALIASES: &[(&str, &str)] = &[
    ("cooling_btu_h", "cooling_capacity_btuh"),
    ("cooling_capacity_btu", "cooling_capacity_btuh"),
    ("heating_btu_h", "heating_capacity_btuh"),
    ("heating_capacity_btu", "heating_capacity_btuh"),
    ("nominal_capacity_tons", "tonnage"),
    ("nominal_capacity_tons_cooling", "tonnage"),
    ("nominal_tonnage", "tonnage"),
    ("seer2_max", "seer2"),
    ("eer2_max", "eer2"),
    ("hspf2_max", "hspf2"),
    ("afue_percent", "afue"),
    ("refrigerant", "refrigerant_type"),
    ("min_circuit_ampacity", "mca"),
    ("max_breaker", "mop"),
    ("max_overcurrent_protection", "mop"),
    ("sound_level_db", "sound_level_dba"),
    ("weight", "shipping_weight_lb"),
    ("weight_lb", "shipping_weight_lb"),
    ("shipping_weight_lbs", "shipping_weight_lb"),
];

/// Nested `dimensions` object keys and the flat fields they map to.
const DIMENSION_FIELDS: &[(&str, &str)] = &[
    ("height", "height_in"),
    ("width", "width_in"),
    ("depth", "depth_in"),
];

pub fn canonical_name(field: &str) -> &str {
    FIELD_ALIASES
        .iter()
        .find(|(alias, _)| *alias == field)
        .map(|(_, canonical)| *canonical)
        .unwrap_or(field)
}

/// Build a canonical `SpecRecord` from one raw JSON object.
///
/// `key` is the model number the record is filed under. The record's own
/// `model_number` field is checked against it; on mismatch the key wins.
pub fn normalize_record(key: &str, raw: &Map<String, Value>) -> SpecRecord {
    let mut record = SpecRecord::new(key);

    if let Some(field_model) = raw.get("model_number").and_then(Value::as_str) {
        if !field_model.trim().eq_ignore_ascii_case(key) {
            warn!(
                key,
                model_number = field_model,
                "spec record model_number disagrees with its key, using key"
            );
        }
    }

    // Canonical names first so they take precedence over aliases.
    let mut aliased: Vec<(&str, &Value)> = Vec::new();
    for (field, value) in raw {
        if field == "model_number" {
            continue;
        }
        let canonical = canonical_name(field);
        if canonical != field {
            aliased.push((canonical, value));
            continue;
        }
        if field == "dimensions" {
            flatten_dimensions(&mut record, key, value);
            continue;
        }
        if let Some(scalar) = to_scalar(key, field, value) {
            record.insert(field, scalar);
        }
    }

    for (canonical, value) in aliased {
        if record.has(canonical) {
            continue;
        }
        if let Some(scalar) = to_scalar(key, canonical, value) {
            record.insert(canonical, scalar);
        }
    }

    record
}

fn to_scalar(key: &str, field: &str, value: &Value) -> Option<SpecValue> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(SpecValue::Bool(*b)),
        Value::Number(n) => n.as_f64().map(SpecValue::Number),
        Value::String(s) => Some(SpecValue::Text(s.trim().to_string())),
        Value::Array(_) | Value::Object(_) => {
            warn!(key, field, "dropping non-scalar spec field");
            None
        }
    }
}

fn flatten_dimensions(record: &mut SpecRecord, key: &str, value: &Value) {
    let Some(dims) = value.as_object() else {
        warn!(key, "dimensions field is not an object, dropping");
        return;
    };
    for (nested, flat) in DIMENSION_FIELDS {
        if record.has(flat) {
            continue;
        }
        if let Some(scalar) = dims.get(*nested).and_then(|v| to_scalar(key, flat, v)) {
            // Extracted sheets sometimes carry the inch mark in the value.
            let scalar = match scalar {
                SpecValue::Text(s) => SpecValue::Text(s.trim_end_matches('"').trim().to_string()),
                other => other,
            };
            record.insert(flat, scalar);
        }
    }
}
