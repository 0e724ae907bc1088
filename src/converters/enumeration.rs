use super::{cast, TypeConverter};
use crate::error::{AdaError, Result};
use crate::types::{SqlValue, WireValue};

/// Enum columns. Members travel as their labels.
///
/// An empty member list accepts any label.
#[derive(Debug, Clone)]
pub struct EnumConverter {
    type_name: String,
    variants: Vec<String>,
    cast: bool,
}

impl EnumConverter {
    pub fn new(type_name: impl Into<String>, variants: Vec<String>, cast: bool) -> Self {
        Self {
            type_name: type_name.into(),
            variants,
            cast,
        }
    }

    pub fn variants(&self) -> &[String] {
        &self.variants
    }

    fn check(&self, label: &str) -> Result<()> {
        if self.variants.is_empty() || self.variants.iter().any(|v| v == label) {
            Ok(())
        } else {
            Err(AdaError::conversion(
                &self.type_name,
                label,
                format!("not one of {:?}", self.variants),
            ))
        }
    }
}

impl TypeConverter for EnumConverter {
    fn sql_type(&self) -> &str {
        &self.type_name
    }

    fn bind(&self, value: &SqlValue) -> Result<WireValue> {
        match value {
            SqlValue::Null => Ok(WireValue::Null),
            SqlValue::Enum(label) | SqlValue::Text(label) => {
                self.check(label)?;
                Ok(WireValue::String(label.clone()))
            }
            other => Err(AdaError::type_mismatch(&self.type_name, "enum", other.kind())),
        }
    }

    fn bind_expression(&self, placeholder: &str) -> String {
        if self.cast {
            cast(placeholder, &self.type_name)
        } else {
            placeholder.to_string()
        }
    }

    fn result(&self, value: WireValue) -> Result<SqlValue> {
        match value {
            WireValue::Null => Ok(SqlValue::Null),
            WireValue::String(label) => {
                self.check(&label)?;
                Ok(SqlValue::Enum(label))
            }
            other => Err(AdaError::type_mismatch(&self.type_name, "string", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mood() -> EnumConverter {
        EnumConverter::new("mood", vec!["sad".into(), "ok".into(), "happy".into()], true)
    }

    #[test]
    fn test_round_trip_returns_same_member() {
        let converter = mood();
        let member = SqlValue::Enum("happy".into());
        let wire = converter.bind(&member).unwrap();
        assert_eq!(converter.bind_expression(":p1"), "CAST(:p1 AS mood)");
        assert_eq!(converter.result(wire).unwrap(), member);
    }

    #[test]
    fn test_unknown_label_rejected() {
        let converter = mood();
        assert!(converter.bind(&SqlValue::Enum("angry".into())).is_err());
        assert!(converter.result(WireValue::from("angry")).is_err());
    }

    #[test]
    fn test_unconstrained_when_no_variants() {
        let converter = EnumConverter::new("anything", Vec::new(), false);
        assert_eq!(
            converter.result(WireValue::from("x")).unwrap(),
            SqlValue::Enum("x".into())
        );
        assert_eq!(converter.bind_expression(":p1"), ":p1");
    }
}
