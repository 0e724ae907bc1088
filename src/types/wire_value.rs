use serde::{Deserialize, Serialize};

/// A value as it crosses the gateway.
/// The Data API only knows JSON-compatible scalars and arrays of them;
/// anything richer has to be encoded into one of these by a converter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireValue {
    Null,
    Bool(bool),
    Long(i64),
    Double(f64),
    String(String),
    Array(Vec<WireValue>),
}

impl WireValue {
    pub fn is_null(&self) -> bool {
        matches!(self, WireValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            WireValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for WireValue {
    fn from(value: &str) -> Self {
        WireValue::String(value.to_string())
    }
}

impl From<String> for WireValue {
    fn from(value: String) -> Self {
        WireValue::String(value)
    }
}

impl From<i32> for WireValue {
    fn from(value: i32) -> Self {
        WireValue::Long(i64::from(value))
    }
}

impl From<i64> for WireValue {
    fn from(value: i64) -> Self {
        WireValue::Long(value)
    }
}

impl From<bool> for WireValue {
    fn from(value: bool) -> Self {
        WireValue::Bool(value)
    }
}

impl From<f64> for WireValue {
    fn from(value: f64) -> Self {
        WireValue::Double(value)
    }
}

impl<T: Into<WireValue>> From<Option<T>> for WireValue {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => WireValue::Null,
        }
    }
}

/// A named statement parameter handed to the driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SqlParameter {
    pub name: String,
    pub value: WireValue,
}

impl SqlParameter {
    pub fn new(name: impl Into<String>, value: impl Into<WireValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}
