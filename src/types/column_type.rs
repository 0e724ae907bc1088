use std::fmt;

/// Semantic column type, chosen when a column is declared.
/// The dialect maps each type to the converter that handles its values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Text,
    Integer,
    BigInt,
    Boolean,
    Float,
    Numeric,
    Date,
    Time,
    Timestamp,
    Json,
    Jsonb,
    Uuid,
    Enum {
        /// Database type name, e.g. `mood` for `CREATE TYPE mood AS ENUM (...)`.
        name: String,
        variants: Vec<String>,
    },
    Array(Box<ColumnType>),
}

/// Payload-free tag of a `ColumnType`; the key of a dialect's colspecs table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    Text,
    Integer,
    BigInt,
    Boolean,
    Float,
    Numeric,
    Date,
    Time,
    Timestamp,
    Json,
    Jsonb,
    Uuid,
    Enum,
    Array,
}

impl ColumnType {
    /// Declares an enum column type with the given member labels.
    pub fn enumeration<I, S>(name: impl Into<String>, variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ColumnType::Enum {
            name: name.into(),
            variants: variants.into_iter().map(Into::into).collect(),
        }
    }

    pub fn array_of(element: ColumnType) -> Self {
        ColumnType::Array(Box::new(element))
    }

    pub fn kind(&self) -> ColumnKind {
        match self {
            ColumnType::Text => ColumnKind::Text,
            ColumnType::Integer => ColumnKind::Integer,
            ColumnType::BigInt => ColumnKind::BigInt,
            ColumnType::Boolean => ColumnKind::Boolean,
            ColumnType::Float => ColumnKind::Float,
            ColumnType::Numeric => ColumnKind::Numeric,
            ColumnType::Date => ColumnKind::Date,
            ColumnType::Time => ColumnKind::Time,
            ColumnType::Timestamp => ColumnKind::Timestamp,
            ColumnType::Json => ColumnKind::Json,
            ColumnType::Jsonb => ColumnKind::Jsonb,
            ColumnType::Uuid => ColumnKind::Uuid,
            ColumnType::Enum { .. } => ColumnKind::Enum,
            ColumnType::Array(_) => ColumnKind::Array,
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Enum { name, .. } => write!(f, "ENUM({})", name),
            ColumnType::Array(element) => write!(f, "{}[]", element),
            other => write!(f, "{}", other.kind()),
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnKind::Text => "TEXT",
            ColumnKind::Integer => "INTEGER",
            ColumnKind::BigInt => "BIGINT",
            ColumnKind::Boolean => "BOOLEAN",
            ColumnKind::Float => "FLOAT",
            ColumnKind::Numeric => "NUMERIC",
            ColumnKind::Date => "DATE",
            ColumnKind::Time => "TIME",
            ColumnKind::Timestamp => "TIMESTAMP",
            ColumnKind::Json => "JSON",
            ColumnKind::Jsonb => "JSONB",
            ColumnKind::Uuid => "UUID",
            ColumnKind::Enum => "ENUM",
            ColumnKind::Array => "ARRAY",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(ColumnType::Timestamp.to_string(), "TIMESTAMP");
        assert_eq!(ColumnType::array_of(ColumnType::Text).to_string(), "TEXT[]");
        assert_eq!(
            ColumnType::enumeration("mood", ["sad", "ok"]).to_string(),
            "ENUM(mood)"
        );
    }
}
