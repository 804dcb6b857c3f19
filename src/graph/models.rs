use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single value from a variable's domain.
///
/// Domains are finite and discrete. Values must be hashable and ordered so
/// that CPT rows can be keyed by (value, parent-assignment) pairs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Boolean(bool),
    Integer(i64),
    String(String),
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Integer(i) => write!(f, "{}", i),
            Value::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl Value {
    /// Try to get the value as a boolean
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get the value as an integer
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get the value as a string
    pub fn as_string(&self) -> Option<&String> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

/// A partial assignment of values to variables: the shape of both a
/// hypothesis and a conditioning set.
pub type Assignment = HashMap<String, Value>;

/// Build an assignment from name/value pairs.
pub fn assignment(entries: &[(&str, Value)]) -> Assignment {
    entries
        .iter()
        .map(|(variable, value)| ((*variable).to_string(), value.clone()))
        .collect()
}

/// Merge two assignments into a new map. Entries of `overlay` win when both
/// maps assign the same variable; neither input is modified.
pub fn merged(base: &Assignment, overlay: &Assignment) -> Assignment {
    let mut combined = base.clone();
    for (variable, value) in overlay {
        combined.insert(variable.clone(), value.clone());
    }
    combined
}

/// Parse a comma-separated assignment string such as `"Rain=true,Grade=2"`.
///
/// `true`/`false` become booleans, integer literals become integers, and
/// anything else is kept as a string value.
pub fn parse_assignment(text: &str) -> Result<Assignment> {
    let mut parsed = Assignment::new();
    for item in text.split(',') {
        let item = item.trim();
        let Some((variable, value)) = item.split_once('=') else {
            bail!("expected 'Variable=value', got '{}'", item);
        };
        let variable = variable.trim();
        let value = value.trim();
        if variable.is_empty() || value.is_empty() {
            bail!("expected 'Variable=value', got '{}'", item);
        }
        let value = match value {
            "true" => Value::Boolean(true),
            "false" => Value::Boolean(false),
            other => match other.parse::<i64>() {
                Ok(i) => Value::Integer(i),
                Err(_) => Value::String(other.to_string()),
            },
        };
        if parsed.insert(variable.to_string(), value).is_some() {
            bail!("variable '{}' assigned twice", variable);
        }
    }
    Ok(parsed)
}
