//! Validation failures: the ORM's raw violation bag and the normalized
//! [`FieldError`] it is translated into.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// One normalized validation failure, addressed to a single field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub code: String,
    pub args: Vec<Value>,
}

impl FieldError {
    pub fn new(field: impl Into<String>, code: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            field: field.into(),
            code: code.into(),
            args,
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.code)
    }
}

/// A raw violation as reported by the ORM. Every field is optional on the
/// wire; absent or `null` strings deserialize as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Violation {
    #[serde(deserialize_with = "null_as_empty")]
    pub path: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub validator_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validator_args: Option<Vec<Value>>,
}

/// The error object the ORM raises when validation fails.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViolationBag {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<Violation>>,
}

impl ViolationBag {
    pub fn new(errors: Vec<Violation>) -> Self {
        Self {
            errors: Some(errors),
        }
    }

    /// Consumes the bag; see [`translate`].
    pub fn into_field_errors(self) -> Vec<FieldError> {
        self.errors
            .unwrap_or_default()
            .into_iter()
            .map(FieldError::from)
            .collect()
    }
}

/// Maps every violation, in order, onto a [`FieldError`].
///
/// `args` holds the offending value (only when present and truthy) followed
/// by the validator's own arguments. Never fails.
pub fn translate(bag: &ViolationBag) -> Vec<FieldError> {
    bag.errors
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(FieldError::from)
        .collect()
}

impl From<&Violation> for FieldError {
    fn from(v: &Violation) -> Self {
        let value = v.value.iter().filter(|value| is_truthy(value)).cloned();
        let extra = v.validator_args.iter().flatten().cloned();
        FieldError::new(v.path.clone(), v.validator_key.clone(), value.chain(extra).collect())
    }
}

impl From<Violation> for FieldError {
    fn from(v: Violation) -> Self {
        let mut args = Vec::new();
        if let Some(value) = v.value.filter(is_truthy) {
            args.push(value);
        }
        args.extend(v.validator_args.unwrap_or_default());
        FieldError::new(v.path, v.validator_key, args)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Truthiness as the ORM's host runtime defines it: `null`, `false`, `0`,
/// `NaN` and `""` are falsy; arrays and objects are always truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
