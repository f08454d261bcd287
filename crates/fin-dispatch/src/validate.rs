use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::schema::{Field, FieldType, Schema, DATE_PATTERN};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Valid,
    /// Description of the first violation found.
    Invalid(String),
}

/// Checks `request` against `schema`.
///
/// Checks run in a fixed order and stop at the first violation: unknown fields, field types,
/// list lengths, value constraints (enumerations and lower bounds), then required-sets. Callers
/// rely on the wording of that first message, so the order is part of the contract.
pub fn validate(schema: &Schema, request: &Value) -> Validation {
    let Value::Object(fields) = request else {
        return Validation::Invalid(format!("{} is not of type 'object'", render_value(request)));
    };

    match first_violation(schema, fields) {
        Some(message) => Validation::Invalid(message),
        None => Validation::Valid,
    }
}

fn first_violation(schema: &Schema, fields: &Map<String, Value>) -> Option<String> {
    check_unknown_fields(schema, fields)
        .or_else(|| present(schema, fields).find_map(|(f, v)| check_type(f, v)))
        .or_else(|| present(schema, fields).find_map(|(f, v)| check_length(f, v)))
        .or_else(|| present(schema, fields).find_map(|(f, v)| check_constraints(f, v)))
        .or_else(|| check_required(schema, fields))
}

fn present<'a>(
    schema: &'a Schema,
    fields: &'a Map<String, Value>,
) -> impl Iterator<Item = (&'a Field, &'a Value)> + 'a {
    schema
        .fields
        .iter()
        .filter_map(move |f| fields.get(f.name).map(|v| (f, v)))
}

fn check_unknown_fields(schema: &Schema, fields: &Map<String, Value>) -> Option<String> {
    let unexpected: Vec<String> = fields
        .keys()
        .filter(|k| schema.field(k).is_none())
        .map(|k| format!("'{k}'"))
        .collect();

    match unexpected.len() {
        0 => None,
        1 => Some(format!(
            "Additional properties are not allowed ({} was unexpected)",
            unexpected[0]
        )),
        _ => Some(format!(
            "Additional properties are not allowed ({} were unexpected)",
            unexpected.join(", ")
        )),
    }
}

fn date_pattern() -> &'static Regex {
    static DATE_RE: OnceLock<Regex> = OnceLock::new();
    DATE_RE.get_or_init(|| Regex::new(DATE_PATTERN).expect("valid regex"))
}

fn not_of_type(value: &Value, type_name: &str) -> String {
    format!("{} is not of type '{type_name}'", render_value(value))
}

fn check_type(field: &Field, value: &Value) -> Option<String> {
    let type_name = field.ty.json_name();
    match field.ty {
        FieldType::Number => (!value.is_number()).then(|| not_of_type(value, type_name)),
        FieldType::Integer { .. } => {
            (integral(value).is_none()).then(|| not_of_type(value, type_name))
        }
        FieldType::Text => (!value.is_string()).then(|| not_of_type(value, type_name)),
        FieldType::Object => (!value.is_object()).then(|| not_of_type(value, type_name)),
        FieldType::NumberList => match value {
            Value::Array(items) => items
                .iter()
                .find(|item| !item.is_number())
                .map(|item| not_of_type(item, "number")),
            other => Some(not_of_type(other, type_name)),
        },
        FieldType::DateList => match value {
            Value::Array(items) => items.iter().find_map(|item| match item {
                Value::String(s) if date_pattern().is_match(s) => None,
                Value::String(s) => Some(format!("'{s}' does not match '{DATE_PATTERN}'")),
                other => Some(not_of_type(other, "string")),
            }),
            other => Some(not_of_type(other, type_name)),
        },
    }
}

fn check_length(field: &Field, value: &Value) -> Option<String> {
    match value {
        Value::Array(items) if items.len() < field.min_items => {
            Some(format!("{} is too short", render_value(value)))
        }
        _ => None,
    }
}

fn check_constraints(field: &Field, value: &Value) -> Option<String> {
    if let FieldType::Integer { allowed } = field.ty {
        if let Some(n) = integral(value) {
            if !allowed.contains(&n) {
                let allowed: Vec<String> = allowed.iter().map(i64::to_string).collect();
                return Some(format!(
                    "{} is not one of [{}]",
                    render_value(value),
                    allowed.join(", ")
                ));
            }
        }
    }

    if let (Some(minimum), Some(n)) = (field.minimum, value.as_f64()) {
        if n < minimum {
            return Some(format!(
                "{} is less than the minimum of {}",
                render_value(value),
                render_number(minimum)
            ));
        }
    }

    None
}

fn check_required(schema: &Schema, fields: &Map<String, Value>) -> Option<String> {
    if schema
        .required
        .iter()
        .any(|set| set.iter().all(|name| fields.contains_key(*name)))
    {
        return None;
    }

    let first = schema.required.first()?;
    first
        .iter()
        .find(|name| !fields.contains_key(**name))
        .map(|name| format!("'{name}' is a required property"))
}

/// Integral value of a JSON number, accepting floats with no fractional part.
pub(crate) fn integral(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    let f = value.as_f64()?;
    (f.is_finite() && f.fract() == 0.0 && f.abs() < 9.0e15).then_some(f as i64)
}

fn render_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1.0e16 {
        format!("{n:.0}")
    } else {
        n.to_string()
    }
}

/// Renders a JSON value in literal notation for violation messages: strings single-quoted,
/// lists bracketed, floats keep their decimal point.
pub(crate) fn render_value(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if !n.is_i64() && !n.is_u64() && f.is_finite() && f.fract() == 0.0 => {
                format!("{f:.1}")
            }
            _ => n.to_string(),
        },
        Value::String(s) => format!("'{s}'"),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().map(render_value).collect();
            format!("[{}]", parts.join(", "))
        }
        Value::Object(map) => {
            let parts: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("'{k}': {}", render_value(v)))
                .collect();
            format!("{{{}}}", parts.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn renders_values_in_literal_notation() {
        assert_eq!(render_value(&json!("test1")), "'test1'");
        assert_eq!(render_value(&json!([100])), "[100]");
        assert_eq!(render_value(&json!([1.5, "a"])), "[1.5, 'a']");
        assert_eq!(render_value(&json!(12.0)), "12.0");
        assert_eq!(render_value(&json!(null)), "None");
        assert_eq!(render_value(&json!({"foo": true})), "{'foo': True}");
    }

    #[test]
    fn integral_accepts_whole_floats_only() {
        assert_eq!(integral(&json!(1)), Some(1));
        assert_eq!(integral(&json!(1.0)), Some(1));
        assert_eq!(integral(&json!(0.5)), None);
        assert_eq!(integral(&json!("1")), None);
    }

    #[test]
    fn minimum_renders_without_fraction() {
        assert_eq!(render_number(1.0), "1");
        assert_eq!(render_number(0.25), "0.25");
    }
}
