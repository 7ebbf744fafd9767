//! SQL Server type rendering.

use crate::error::{DdlError, Result};
use crate::schema::{ColumnSpec, DefaultValue, LogicalType};
use crate::version::PlatformVersion;

use super::TypeRenderer;

/// Length used for strings and binaries declared without one.
const DEFAULT_LENGTH: u32 = 255;

/// Longest `NVARCHAR(n)`/`NCHAR(n)` before falling back to `MAX`.
const MAX_STRING_LENGTH: u32 = 4000;

/// Longest `VARBINARY(n)`/`BINARY(n)` before falling back to `MAX`.
const MAX_BINARY_LENGTH: u32 = 8000;

/// SQL Server type renderer for a given platform version.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SqlServerTypes {
    version: PlatformVersion,
}

impl SqlServerTypes {
    /// Creates a renderer for a platform version.
    #[must_use]
    pub const fn new(version: PlatformVersion) -> Self {
        Self { version }
    }

    /// Returns the platform version types are rendered for.
    #[must_use]
    pub const fn version(&self) -> PlatformVersion {
        self.version
    }

    /// Character large object type.
    fn clob_declaration(self) -> &'static str {
        if self.version.supports_max_length() {
            "NVARCHAR(MAX)"
        } else {
            "NTEXT"
        }
    }

    /// Binary large object type.
    fn blob_declaration(self) -> &'static str {
        if self.version.supports_max_length() {
            "VARBINARY(MAX)"
        } else {
            "IMAGE"
        }
    }

    /// Unicode string types store two bytes per character and the length
    /// is declared in bytes, so the logical length is doubled.
    fn string_declaration(self, length: Option<u32>, fixed: bool) -> String {
        let length = length.unwrap_or(DEFAULT_LENGTH);
        if length > MAX_STRING_LENGTH {
            return self.clob_declaration().to_string();
        }

        let size = match length.saturating_mul(2) {
            0 => DEFAULT_LENGTH.to_string(),
            n if n > MAX_STRING_LENGTH => {
                if !self.version.supports_max_length() {
                    return self.clob_declaration().to_string();
                }
                "MAX".to_string()
            }
            n => n.to_string(),
        };

        if fixed {
            format!("NCHAR({size})")
        } else {
            format!("NVARCHAR({size})")
        }
    }

    fn binary_declaration(self, length: Option<u32>, fixed: bool) -> String {
        let size = match length.unwrap_or(DEFAULT_LENGTH) {
            0 => DEFAULT_LENGTH.to_string(),
            n if n > MAX_BINARY_LENGTH => {
                if !self.version.supports_max_length() {
                    return self.blob_declaration().to_string();
                }
                "MAX".to_string()
            }
            n => n.to_string(),
        };

        if fixed {
            format!("BINARY({size})")
        } else {
            format!("VARBINARY({size})")
        }
    }

    fn temporal_declaration(self, logical_type: &LogicalType) -> &'static str {
        if !self.version.supports_extended_temporal_types() {
            return "DATETIME";
        }
        match logical_type {
            LogicalType::Date => "DATE",
            LogicalType::Time => "TIME(0)",
            LogicalType::DateTimeTz => "DATETIMEOFFSET(6)",
            _ => "DATETIME2(6)",
        }
    }
}

impl TypeRenderer for SqlServerTypes {
    fn name(&self) -> &'static str {
        self.version.name()
    }

    fn type_declaration(&self, column: &ColumnSpec) -> Result<String> {
        let sql = match &column.logical_type {
            LogicalType::SmallInt => "SMALLINT".to_string(),
            LogicalType::Integer => "INT".to_string(),
            LogicalType::BigInt => "BIGINT".to_string(),
            LogicalType::Boolean => "BIT".to_string(),
            LogicalType::Float => "FLOAT".to_string(),
            LogicalType::Decimal => format!(
                "NUMERIC({}, {})",
                column.precision.unwrap_or(10),
                column.scale.unwrap_or(0)
            ),
            LogicalType::String => self.string_declaration(column.length, column.fixed),
            LogicalType::Text | LogicalType::Json => self.clob_declaration().to_string(),
            LogicalType::Guid => "UNIQUEIDENTIFIER".to_string(),
            LogicalType::Binary => self.binary_declaration(column.length, column.fixed),
            LogicalType::Blob => self.blob_declaration().to_string(),
            ty @ (LogicalType::Date
            | LogicalType::Time
            | LogicalType::DateTime
            | LogicalType::DateTimeTz) => self.temporal_declaration(ty).to_string(),
            LogicalType::Unknown(name) => {
                return Err(DdlError::UnrenderableType {
                    column: column.name.clone(),
                    type_name: name.clone(),
                })
            }
        };
        Ok(sql)
    }

    fn render_default(&self, column: &str, default: &DefaultValue) -> Result<String> {
        match default {
            DefaultValue::Null => Ok("NULL".to_string()),
            DefaultValue::Boolean(b) => Ok(if *b { "1" } else { "0" }.to_string()),
            DefaultValue::Integer(i) => Ok(i.to_string()),
            DefaultValue::Float(f) if f.is_finite() => Ok(f.to_string()),
            DefaultValue::Float(f) => Err(DdlError::UnresolvableDefault {
                column: column.to_string(),
                reason: format!("{f} has no SQL literal"),
            }),
            DefaultValue::String(s) if s.is_ascii() => Ok(self.quote_string(s)),
            DefaultValue::String(s) => Ok(format!("N{}", self.quote_string(s))),
            DefaultValue::Expression(expr) if expr.trim().is_empty() => {
                Err(DdlError::UnresolvableDefault {
                    column: column.to_string(),
                    reason: "empty default expression".to_string(),
                })
            }
            DefaultValue::Expression(expr) => Ok(expr.clone()),
        }
    }
}

/// Maps a SQL Server native type name to the logical type used for it.
///
/// Returns `None` for types without a mapping.
#[must_use]
pub fn native_type_mapping(native_type: &str) -> Option<LogicalType> {
    let ty = match native_type.to_ascii_lowercase().as_str() {
        "bigint" => LogicalType::BigInt,
        "int" => LogicalType::Integer,
        "smallint" | "tinyint" => LogicalType::SmallInt,
        "bit" => LogicalType::Boolean,
        "decimal" | "numeric" | "money" | "smallmoney" => LogicalType::Decimal,
        "float" | "real" | "double" => LogicalType::Float,
        "char" | "nchar" | "varchar" | "nvarchar" | "sysname" => LogicalType::String,
        "text" | "ntext" | "xml" => LogicalType::Text,
        "uniqueidentifier" => LogicalType::Guid,
        "binary" | "varbinary" | "timestamp" | "rowversion" => LogicalType::Binary,
        "image" | "hierarchyid" => LogicalType::Blob,
        "date" => LogicalType::Date,
        "time" => LogicalType::Time,
        "datetime" | "datetime2" | "smalldatetime" => LogicalType::DateTime,
        "datetimeoffset" => LogicalType::DateTimeTz,
        _ => return None,
    };
    Some(ty)
}
