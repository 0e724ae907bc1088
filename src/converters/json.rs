use super::{cast, TypeConverter};
use crate::error::{AdaError, Result};
use crate::types::{SqlValue, WireValue};

/// JSON and JSONB columns.
///
/// Values travel as serialized JSON text. Without a cast some gateways store
/// the parameter as a JSON string instead of a document, so the PostgreSQL
/// dialect wraps the placeholder in `CAST(... AS JSON)`.
#[derive(Debug, Clone, Copy)]
pub struct JsonConverter {
    sql_type: &'static str,
    cast: bool,
}

impl JsonConverter {
    pub const fn new(sql_type: &'static str) -> Self {
        Self {
            sql_type,
            cast: true,
        }
    }

    pub const fn plain(sql_type: &'static str) -> Self {
        Self {
            sql_type,
            cast: false,
        }
    }
}

impl TypeConverter for JsonConverter {
    fn sql_type(&self) -> &str {
        self.sql_type
    }

    fn bind(&self, value: &SqlValue) -> Result<WireValue> {
        let document = match value {
            SqlValue::Null => return Ok(WireValue::Null),
            SqlValue::Json(v) => serde_json::to_string(v)?,
            other => serde_json::to_string(&other.to_json())?,
        };
        Ok(WireValue::String(document))
    }

    fn bind_expression(&self, placeholder: &str) -> String {
        if self.cast {
            cast(placeholder, self.sql_type)
        } else {
            placeholder.to_string()
        }
    }

    fn result(&self, value: WireValue) -> Result<SqlValue> {
        match value {
            WireValue::Null => Ok(SqlValue::Null),
            WireValue::String(s) => serde_json::from_str(&s)
                .map(SqlValue::Json)
                .map_err(|e| AdaError::conversion(self.sql_type, &s, e)),
            WireValue::Bool(b) => Ok(SqlValue::Json(serde_json::Value::Bool(b))),
            WireValue::Long(i) => Ok(SqlValue::Json(serde_json::Value::from(i))),
            WireValue::Double(f) => Ok(SqlValue::Json(serde_json::Value::from(f))),
            other => Err(AdaError::type_mismatch(self.sql_type, "string", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mapping_round_trip() {
        let converter = JsonConverter::new("JSONB");
        let doc = json!({"foo": [1, 2, 3], "bar": {"baz": null}});
        let wire = converter.bind(&SqlValue::Json(doc.clone())).unwrap();
        assert!(matches!(wire, WireValue::String(_)));
        assert_eq!(converter.result(wire).unwrap(), SqlValue::Json(doc));
    }

    #[test]
    fn test_text_is_encoded_as_json_string() {
        let converter = JsonConverter::new("JSON");
        assert_eq!(
            converter.bind(&SqlValue::Text("hi".into())).unwrap(),
            WireValue::from("\"hi\"")
        );
    }

    #[test]
    fn test_cast_expression() {
        assert_eq!(
            JsonConverter::new("JSONB").bind_expression(":p2"),
            "CAST(:p2 AS JSONB)"
        );
        assert_eq!(JsonConverter::plain("JSON").bind_expression(":p2"), ":p2");
    }

    #[test]
    fn test_invalid_document() {
        let err = JsonConverter::new("JSON")
            .result(WireValue::from("{not json"))
            .unwrap_err();
        assert!(matches!(err, AdaError::Conversion { .. }));
    }
}
