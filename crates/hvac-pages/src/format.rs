/// Display formatting for spec values.
///
/// Units are chosen from the canonical field name, so every formatter here is
/// keyed on the names produced by `hvac_common::schema`.
use hvac_common::record::{format_number, SpecValue};

pub const NOT_AVAILABLE: &str = "N/A";

const FRACTIONS: &[(f64, &str)] = &[
    (0.25, "¼"),
    (0.375, "⅜"),
    (0.5, "½"),
    (0.625, "⅝"),
    (0.75, "¾"),
    (0.875, "⅞"),
    (1.125, "1⅛"),
    (1.375, "1⅜"),
    (1.625, "1⅝"),
];

/// Refrigerant line diameter in inches, as a fraction where one is common.
pub fn format_fraction(inches: f64) -> String {
    FRACTIONS
        .iter()
        .find(|(value, _)| (value - inches).abs() < 1e-6)
        .map(|(_, glyph)| format!("{glyph}\""))
        .unwrap_or_else(|| format!("{}\"", format_number(inches)))
}

pub fn format_tonnage(tons: f64) -> String {
    format_number(tons)
}

/// `24000` → `24,000`. Fractions are rounded away.
pub fn format_thousands(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn format_btu(value: f64) -> String {
    format!("{} BTU/h", format_thousands(value))
}

/// Format one field's value with the unit its name implies.
pub fn format_value(field: &str, value: &SpecValue) -> String {
    let number = match value {
        SpecValue::Number(n) => *n,
        SpecValue::Text(text) => match value.as_f64() {
            Some(n) => n,
            None => return text.trim().to_string(),
        },
        SpecValue::Bool(_) => return value.to_string(),
    };
    format_number_field(field, number)
}

fn format_number_field(field: &str, n: f64) -> String {
    let key = field.to_ascii_lowercase();
    let plain = format_number(n);

    if key == "tonnage" {
        format!("{plain} Ton")
    } else if key.contains("btuh") || key.contains("capacity") {
        format_btu(n)
    } else if key.contains("seer") || key.contains("eer") || key.contains("hspf") {
        plain
    } else if key.contains("afue") {
        format!("{plain}%")
    } else if key.contains("voltage") {
        format!("{plain}V")
    } else if key.contains("weight") {
        format!("{plain} lbs")
    } else if key.contains("line") && key.ends_with("_in") {
        format_fraction(n)
    } else if key.contains("height") || key.contains("width") || key.contains("depth") {
        format!("{plain}\"")
    } else if key.ends_with("_oz") {
        format!("{} oz", format_number(n.round()))
    } else if key.ends_with("_kw") {
        format!("{plain} kW")
    } else if key.ends_with("_cfm") {
        format!("{plain} CFM")
    } else if key.ends_with("_dba") {
        format!("{plain} dBA")
    } else if key.ends_with("_hp") {
        format!("{plain} HP")
    } else if key == "mca" || key == "mop" {
        format!("{plain} A")
    } else {
        plain
    }
}
