use chrono::NaiveDate;
use serde_json::{Map, Value};

use crate::error::DispatchError;
use crate::schema::Schema;

/// Read access to a validated request, applying the schema's declared defaults.
#[derive(Clone, Copy, Debug)]
pub struct Args<'a> {
    schema: &'static Schema,
    fields: &'a Map<String, Value>,
}

impl<'a> Args<'a> {
    pub fn new(schema: &'static Schema, fields: &'a Map<String, Value>) -> Self {
        Self { schema, fields }
    }

    pub fn number(&self, name: &str) -> Result<f64, DispatchError> {
        match self.fields.get(name) {
            Some(value) => value.as_f64().ok_or_else(|| {
                DispatchError::Shape(format!("'{name}' is not of type 'number'"))
            }),
            None => self
                .schema
                .field(name)
                .and_then(|f| f.default)
                .ok_or_else(|| DispatchError::required_property(name)),
        }
    }

    pub fn numbers(&self, name: &str) -> Result<Vec<f64>, DispatchError> {
        self.list(name)?
            .iter()
            .map(|v| {
                v.as_f64()
                    .ok_or_else(|| DispatchError::Shape(format!("'{name}' must hold numbers")))
            })
            .collect()
    }

    pub fn dates(&self, name: &str) -> Result<Vec<NaiveDate>, DispatchError> {
        self.list(name)?
            .iter()
            .map(|v| match v {
                Value::String(s) => parse_date(s),
                _ => Err(DispatchError::Shape(format!("'{name}' must hold date strings"))),
            })
            .collect()
    }

    pub fn count(&self, name: &str) -> Result<usize, DispatchError> {
        Ok(self.list(name)?.len())
    }

    fn list(&self, name: &str) -> Result<&'a Vec<Value>, DispatchError> {
        match self.fields.get(name) {
            Some(Value::Array(items)) => Ok(items),
            Some(_) => Err(DispatchError::Shape(format!("'{name}' is not of type 'array'"))),
            None => Err(DispatchError::required_property(name)),
        }
    }
}

/// Parses `YYYY-M-D` (one or two digit month and day).
pub fn parse_date(text: &str) -> Result<NaiveDate, DispatchError> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|_| DispatchError::Shape(format!("invalid date '{text}', expected YYYY-M-D")))
}
