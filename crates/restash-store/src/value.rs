use serde_json::Value;

/// Decode a persisted raw string. Parse failure is not an error: the raw
/// string is the value, verbatim.
pub fn decode(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_owned()))
}

/// Tagged result of reading a storage slot.
///
/// `Raw` and `Decoded` are distinct on purpose: seeding an initial value
/// must only happen on `Absent`, never over a stored string that merely
/// failed to parse.
#[derive(Debug, Clone, PartialEq)]
pub enum StoredValue {
    Absent,
    Raw(String),
    Decoded(Value),
}

impl StoredValue {
    pub fn from_raw(raw: Option<String>) -> Self {
        match raw {
            None => StoredValue::Absent,
            Some(s) => match serde_json::from_str(&s) {
                Ok(v) => StoredValue::Decoded(v),
                Err(_) => StoredValue::Raw(s),
            },
        }
    }

    /// Collapse into the value an observer sees: a raw string degrades to
    /// `Value::String`, absence to `None`.
    pub fn into_value(self) -> Option<Value> {
        match self {
            StoredValue::Absent => None,
            StoredValue::Raw(s) => Some(Value::String(s)),
            StoredValue::Decoded(v) => Some(v),
        }
    }
}
