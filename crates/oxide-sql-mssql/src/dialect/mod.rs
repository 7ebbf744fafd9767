//! Dialect seams for DDL generation.
//!
//! DDL generation is split in two capabilities:
//!
//! - [`TypeRenderer`] turns column specs into SQL type strings, column
//!   declarations and default literals.
//! - [`AlterTableCompiler`] turns a whole [`TableDiff`] into statements.
//!
//! [`SqlServerPlatform`] is itself an [`AlterTableCompiler`] that handles
//! added columns, default constraints of removed columns and diff noise,
//! then hands the rest of the diff to a fallback compiler
//! ([`GenericAlterTable`] by default).

pub mod filter;
mod generic;
mod platform;
mod types;

pub use filter::{filter_column_change, filter_table_diff};
pub use generic::GenericAlterTable;
pub use platform::SqlServerPlatform;
pub use types::{SqlServerTypes, native_type_mapping};

use crate::diff::TableDiff;
use crate::error::Result;
use crate::schema::{ColumnSpec, DefaultValue};

/// Dialect-specific rendering of column types and values.
pub trait TypeRenderer {
    /// Returns the dialect name.
    fn name(&self) -> &'static str;

    /// Renders the SQL type of a column (e.g. `NVARCHAR(510)`).
    ///
    /// # Errors
    ///
    /// Fails if the column's logical type has no representation.
    fn type_declaration(&self, column: &ColumnSpec) -> Result<String>;

    /// Renders a default value as a SQL literal.
    ///
    /// # Errors
    ///
    /// Fails if the value has no literal representation.
    fn render_default(&self, column: &str, default: &DefaultValue) -> Result<String>;

    /// Renders a column declaration, without its default.
    ///
    /// # Errors
    ///
    /// Fails if the column type cannot be rendered.
    fn column_declaration(&self, column: &ColumnSpec) -> Result<String> {
        let mut sql = format!(
            "{} {}",
            self.quote_column_name(&column.name),
            self.type_declaration(column)?
        );

        if column.autoincrement {
            sql.push_str(" IDENTITY");
        }

        if let Some(ref collation) = column.collation {
            sql.push_str(&format!(" COLLATE {collation}"));
        }

        if !column.nullable {
            sql.push_str(" NOT NULL");
        }

        Ok(sql)
    }

    /// Quotes a table name. Dotted names (`dbo.users`) are quoted part by
    /// part; parts already in brackets are kept as they are.
    fn quote_identifier(&self, name: &str) -> String {
        name.split('.')
            .map(|part| {
                if part.len() >= 2 && part.starts_with('[') && part.ends_with(']') {
                    part.to_string()
                } else {
                    self.quote_column_name(part)
                }
            })
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Quotes a column name as a single identifier, dots included.
    fn quote_column_name(&self, name: &str) -> String {
        format!("[{}]", name.replace(']', "]]"))
    }

    /// Quotes a string literal.
    fn quote_string(&self, value: &str) -> String {
        format!("'{}'", value.replace('\'', "''"))
    }
}

/// Compiles a table diff into ALTER TABLE statements.
pub trait AlterTableCompiler {
    /// Returns the statements applying `diff`, in execution order.
    ///
    /// # Errors
    ///
    /// Propagates rendering failures of the underlying [`TypeRenderer`].
    fn alter_table_sql(&self, diff: &TableDiff) -> Result<Vec<String>>;
}

impl<C: AlterTableCompiler + ?Sized> AlterTableCompiler for Box<C> {
    fn alter_table_sql(&self, diff: &TableDiff) -> Result<Vec<String>> {
        (**self).alter_table_sql(diff)
    }
}
