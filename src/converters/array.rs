use std::sync::Arc;

use super::{cast, TypeConverter};
use crate::error::{AdaError, Result};
use crate::types::{SqlValue, WireValue};

/// Separator between array elements on bind (vertical tab, U+000B).
pub const ARRAY_DELIMITER: char = '\u{b}';

/// Array columns.
///
/// The gateway has no array parameter type, so on bind the elements are
/// joined with `ARRAY_DELIMITER` into one string and the backend splits it
/// again with `string_to_array`. Elements containing the delimiter cannot be
/// represented and are rejected. Arrays come back from the gateway as arrays
/// and are converted element by element.
#[derive(Debug, Clone)]
pub struct ArrayConverter {
    element: Arc<dyn TypeConverter>,
    sql_type: String,
}

impl ArrayConverter {
    pub fn new(element: Arc<dyn TypeConverter>) -> Self {
        let sql_type = format!("{}[]", element.sql_type());
        Self { element, sql_type }
    }

    fn element_text(&self, item: &SqlValue) -> Result<String> {
        let text = match self.element.bind(item)? {
            WireValue::String(s) => s,
            WireValue::Long(i) => i.to_string(),
            WireValue::Double(f) => f.to_string(),
            WireValue::Bool(b) => b.to_string(),
            other @ (WireValue::Null | WireValue::Array(_)) => {
                return Err(AdaError::conversion(
                    &self.sql_type,
                    other,
                    "array elements must be non-null scalars",
                ))
            }
        };
        if text.contains(ARRAY_DELIMITER) {
            return Err(AdaError::conversion(
                &self.sql_type,
                &text,
                "element contains the array delimiter U+000B",
            ));
        }
        Ok(text)
    }
}

impl TypeConverter for ArrayConverter {
    fn sql_type(&self) -> &str {
        &self.sql_type
    }

    fn bind(&self, value: &SqlValue) -> Result<WireValue> {
        match value {
            SqlValue::Null => Ok(WireValue::Null),
            SqlValue::Array(items) => {
                let parts = items
                    .iter()
                    .map(|item| self.element_text(item))
                    .collect::<Result<Vec<_>>>()?;
                Ok(WireValue::String(parts.join(ARRAY_DELIMITER.to_string().as_str())))
            }
            other => Err(AdaError::type_mismatch(&self.sql_type, "array", other.kind())),
        }
    }

    fn bind_expression(&self, placeholder: &str) -> String {
        let split = format!("string_to_array({}, chr(11))", placeholder);
        if self.element.sql_type() == "TEXT" {
            split
        } else {
            cast(&split, &self.sql_type)
        }
    }

    fn result(&self, value: WireValue) -> Result<SqlValue> {
        match value {
            WireValue::Null => Ok(SqlValue::Null),
            WireValue::Array(items) => items
                .into_iter()
                .map(|item| self.element.result(item))
                .collect::<Result<Vec<_>>>()
                .map(SqlValue::Array),
            other => Err(AdaError::type_mismatch(&self.sql_type, "array", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converters::{IntegerConverter, TemporalConverter, TextConverter};
    use chrono::NaiveDate;

    fn text_array() -> ArrayConverter {
        ArrayConverter::new(Arc::new(TextConverter))
    }

    #[test]
    fn test_bind_joins_with_delimiter() {
        let friends = SqlValue::from(vec!["Scarlett O'Hara", "Ada \"Hacker\" Lovelace"]);
        assert_eq!(
            text_array().bind(&friends).unwrap(),
            WireValue::from("Scarlett O'Hara\u{b}Ada \"Hacker\" Lovelace")
        );
        assert_eq!(
            text_array().bind_expression(":p1"),
            "string_to_array(:p1, chr(11))"
        );
    }

    #[test]
    fn test_typed_elements_are_cast() {
        let converter = ArrayConverter::new(Arc::new(IntegerConverter));
        assert_eq!(
            converter.bind(&SqlValue::from(vec![1, 2, 3])).unwrap(),
            WireValue::from("1\u{b}2\u{b}3")
        );
        assert_eq!(
            converter.bind_expression(":p1"),
            "CAST(string_to_array(:p1, chr(11)) AS INTEGER[])"
        );
    }

    #[test]
    fn test_elements_use_element_converter() {
        let converter = ArrayConverter::new(Arc::new(TemporalConverter::<NaiveDate>::new("DATE")));
        let day = NaiveDate::from_ymd_opt(2020, 2, 29).unwrap();
        assert_eq!(
            converter.bind(&SqlValue::Array(vec![SqlValue::Date(day)])).unwrap(),
            WireValue::from("2020-02-29")
        );
        assert_eq!(
            converter
                .result(WireValue::Array(vec![WireValue::from("2020-02-29")]))
                .unwrap(),
            SqlValue::Array(vec![SqlValue::Date(day)])
        );
    }

    #[test]
    fn test_delimiter_in_element_rejected() {
        let err = text_array()
            .bind(&SqlValue::from(vec!["a\u{b}b"]))
            .unwrap_err();
        assert!(matches!(err, AdaError::Conversion { .. }));
    }

    #[test]
    fn test_null_element_rejected() {
        let value = SqlValue::Array(vec![SqlValue::Text("a".into()), SqlValue::Null]);
        assert!(text_array().bind(&value).is_err());
    }

    #[test]
    fn test_result_requires_array() {
        assert!(text_array().result(WireValue::from("a,b")).is_err());
        assert_eq!(text_array().result(WireValue::Null).unwrap(), SqlValue::Null);
    }
}
