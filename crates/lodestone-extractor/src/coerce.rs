//! Answer coercion
//!
//! Model answers arrive as free text. Coercion maps them onto the schema's
//! declared field types without second-guessing the model: an answer that
//! does not fit its type becomes `Null` rather than an error.

use lodestone_domain::{FieldType, FieldValue};

/// Coerce a raw model answer into the declared field type
///
/// Boolean: any whole word `yes` or `true` (case-insensitive) wins as
/// `true`; otherwise any whole word `no` or `false` yields `false`;
/// otherwise `Null`.
///
/// Number: strips everything but ASCII digits and dots, then parses as
/// `f64`. Currency markers, thousands separators, and units fall away
/// (`"$2,500/month"` → 2500.0), but so do minus signs. Unparseable
/// leftovers (`""`, `"1.2.3"`) yield `Null`.
///
/// Text: the trimmed answer as-is.
pub fn coerce_answer(field_type: FieldType, raw: &str) -> FieldValue {
    match field_type {
        FieldType::Boolean => coerce_boolean(raw),
        FieldType::Number => coerce_number(raw),
        FieldType::Text => FieldValue::Text(raw.trim().to_string()),
    }
}

fn coerce_boolean(raw: &str) -> FieldValue {
    let mut saw_negative = false;
    for word in raw.split(|c: char| !c.is_ascii_alphanumeric()) {
        if word.eq_ignore_ascii_case("yes") || word.eq_ignore_ascii_case("true") {
            return FieldValue::Bool(true);
        }
        if word.eq_ignore_ascii_case("no") || word.eq_ignore_ascii_case("false") {
            saw_negative = true;
        }
    }
    if saw_negative {
        FieldValue::Bool(false)
    } else {
        FieldValue::Null
    }
}

fn coerce_number(raw: &str) -> FieldValue {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    match cleaned.parse::<f64>() {
        Ok(value) => FieldValue::Number(value),
        Err(_) => FieldValue::Null,
    }
}
