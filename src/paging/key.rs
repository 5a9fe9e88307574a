use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque record identifier as the backend sends it.
///
/// The same logical id may arrive as a JSON number on one endpoint and as a
/// string on another, and search terms typed by the operator are always
/// text, so comparisons go through [`RecordKey::loose_eq`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordKey {
    Number(i64),
    Text(String),
}

impl RecordKey {
    /// Parse operator input. Blank input means "no key".
    pub fn from_input(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(RecordKey::Text(trimmed.to_string()))
        }
    }

    /// Value equality tolerating number/string mixes (`42 ~ "42"`).
    pub fn loose_eq(&self, other: &RecordKey) -> bool {
        match (self, other) {
            (RecordKey::Number(a), RecordKey::Number(b)) => a == b,
            (RecordKey::Text(a), RecordKey::Text(b)) => a == b,
            (RecordKey::Number(n), RecordKey::Text(t)) | (RecordKey::Text(t), RecordKey::Number(n)) => {
                numeric_value(t).map_or(false, |v| v == *n as f64)
            }
        }
    }

    /// False for values the backend uses as "no id" (`0`, `""`).
    pub fn is_present(&self) -> bool {
        match self {
            RecordKey::Number(n) => *n != 0,
            RecordKey::Text(t) => !t.trim().is_empty(),
        }
    }
}

fn numeric_value(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKey::Number(n) => write!(f, "{}", n),
            RecordKey::Text(t) => write!(f, "{}", t),
        }
    }
}

impl From<i64> for RecordKey {
    fn from(n: i64) -> Self {
        RecordKey::Number(n)
    }
}

impl From<&str> for RecordKey {
    fn from(s: &str) -> Self {
        RecordKey::Text(s.to_string())
    }
}

/// A record that can be looked up by key in a cached page.
pub trait Identified {
    fn record_key(&self) -> Option<RecordKey>;
}
