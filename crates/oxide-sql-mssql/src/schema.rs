//! Column representation types.
//!
//! A [`ColumnSpec`] describes a column in logical terms. It is dialect
//! independent: the SQL Server type string is produced later by a
//! [`TypeRenderer`](crate::dialect::TypeRenderer).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Logical column types.
///
/// Names that do not correspond to a known type are kept as
/// [`LogicalType::Unknown`] so that they fail at rendering time with the
/// offending column name, rather than at deserialization time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LogicalType {
    /// Small integer (16-bit).
    SmallInt,
    /// Integer (32-bit).
    Integer,
    /// Big integer (64-bit).
    BigInt,
    /// Boolean.
    Boolean,
    /// Exact numeric with precision and scale.
    Decimal,
    /// Floating point.
    Float,
    /// Character string with a length.
    String,
    /// Character large object.
    Text,
    /// Globally unique identifier.
    Guid,
    /// Binary string with a length.
    Binary,
    /// Binary large object.
    Blob,
    /// Date only.
    Date,
    /// Time only.
    Time,
    /// Date and time.
    DateTime,
    /// Date and time with time zone offset.
    DateTimeTz,
    /// JSON document stored as text.
    Json,
    /// A type name with no known mapping.
    Unknown(String),
}

impl LogicalType {
    /// Returns the canonical name of this type.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::SmallInt => "smallint",
            Self::Integer => "integer",
            Self::BigInt => "bigint",
            Self::Boolean => "boolean",
            Self::Decimal => "decimal",
            Self::Float => "float",
            Self::String => "string",
            Self::Text => "text",
            Self::Guid => "guid",
            Self::Binary => "binary",
            Self::Blob => "blob",
            Self::Date => "date",
            Self::Time => "time",
            Self::DateTime => "datetime",
            Self::DateTimeTz => "datetimetz",
            Self::Json => "json",
            Self::Unknown(name) => name.as_str(),
        }
    }

    /// Parses a logical type name (case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "smallint" => Self::SmallInt,
            "integer" | "int" => Self::Integer,
            "bigint" => Self::BigInt,
            "boolean" | "bool" => Self::Boolean,
            "decimal" | "numeric" => Self::Decimal,
            "float" | "double" => Self::Float,
            "string" => Self::String,
            "text" | "clob" => Self::Text,
            "guid" | "uuid" => Self::Guid,
            "binary" => Self::Binary,
            "blob" => Self::Blob,
            "date" => Self::Date,
            "time" => Self::Time,
            "datetime" => Self::DateTime,
            "datetimetz" => Self::DateTimeTz,
            "json" => Self::Json,
            _ => Self::Unknown(name.to_string()),
        }
    }
}

impl From<String> for LogicalType {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<LogicalType> for String {
    fn from(ty: LogicalType) -> Self {
        ty.name().to_string()
    }
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Default value for a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultValue {
    /// NULL default.
    Null,
    /// Boolean default.
    Boolean(bool),
    /// Integer default.
    Integer(i64),
    /// Float default.
    Float(f64),
    /// String default.
    String(String),
    /// SQL expression (e.g., "CURRENT_TIMESTAMP").
    Expression(String),
}

/// Schema definition for a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Column name, unquoted.
    pub name: String,
    /// Logical data type.
    #[serde(rename = "type")]
    pub logical_type: LogicalType,
    /// Length for string and binary types.
    #[serde(default)]
    pub length: Option<u32>,
    /// Precision for decimal types.
    #[serde(default)]
    pub precision: Option<u8>,
    /// Scale for decimal types.
    #[serde(default)]
    pub scale: Option<u8>,
    /// Whether a string or binary column is fixed-length.
    #[serde(default)]
    pub fixed: bool,
    /// Whether the column allows NULL values.
    #[serde(default = "default_nullable")]
    pub nullable: bool,
    /// Whether the column is an identity column.
    #[serde(default)]
    pub autoincrement: bool,
    /// Column collation.
    #[serde(default)]
    pub collation: Option<String>,
    /// Default value.
    #[serde(default)]
    pub default: Option<DefaultValue>,
    /// Whether the column is unsigned. SQL Server has no unsigned types, so
    /// this flag never reaches the generated SQL.
    #[serde(default)]
    pub unsigned: bool,
}

const fn default_nullable() -> bool {
    true
}

impl ColumnSpec {
    /// Creates a new nullable column without default.
    #[must_use]
    pub fn new(name: impl Into<String>, logical_type: LogicalType) -> Self {
        Self {
            name: name.into(),
            logical_type,
            length: None,
            precision: None,
            scale: None,
            fixed: false,
            nullable: true,
            autoincrement: false,
            collation: None,
            default: None,
            unsigned: false,
        }
    }

    /// Sets the length.
    #[must_use]
    pub fn length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    /// Sets precision and scale.
    #[must_use]
    pub fn precision(mut self, precision: u8, scale: u8) -> Self {
        self.precision = Some(precision);
        self.scale = Some(scale);
        self
    }

    /// Makes the column fixed-length.
    #[must_use]
    pub fn fixed(mut self) -> Self {
        self.fixed = true;
        self
    }

    /// Sets the column as NOT NULL.
    #[must_use]
    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Sets the column as an identity column.
    #[must_use]
    pub fn autoincrement(mut self) -> Self {
        self.autoincrement = true;
        self
    }

    /// Sets the collation.
    #[must_use]
    pub fn collation(mut self, collation: impl Into<String>) -> Self {
        self.collation = Some(collation.into());
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn default(mut self, value: DefaultValue) -> Self {
        self.default = Some(value);
        self
    }

    /// Marks the column as unsigned.
    #[must_use]
    pub fn unsigned(mut self) -> Self {
        self.unsigned = true;
        self
    }

    /// Returns a copy of this column whose type axis (type, length,
    /// precision, scale, fixed) is taken from `other`.
    #[must_use]
    pub fn with_type_of(&self, other: &Self) -> Self {
        Self {
            logical_type: other.logical_type.clone(),
            length: other.length,
            precision: other.precision,
            scale: other.scale,
            fixed: other.fixed,
            ..self.clone()
        }
    }

    /// Returns the default value backed by a constraint.
    ///
    /// An explicit `NULL` default is the same as no default: no constraint
    /// is created for it.
    #[must_use]
    pub fn constraint_default(&self) -> Option<&DefaultValue> {
        self.default
            .as_ref()
            .filter(|d| !matches!(d, DefaultValue::Null))
    }

    /// Returns true if the column has a non-null default.
    #[must_use]
    pub fn has_default(&self) -> bool {
        self.constraint_default().is_some()
    }
}
