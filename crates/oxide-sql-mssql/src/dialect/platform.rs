//! SQL Server platform: ALTER TABLE planning and lock hints.

use tracing::debug;

use crate::diff::TableDiff;
use crate::error::Result;
use crate::lock::{LockHintTable, LockMode, append_lock_hint};
use crate::naming::default_constraint_name;
use crate::version::PlatformVersion;

use super::filter::filter_table_diff;
use super::{AlterTableCompiler, GenericAlterTable, SqlServerTypes, TypeRenderer};

/// SQL Server platform.
///
/// Wraps a fallback [`AlterTableCompiler`] and takes over the parts of a
/// diff the fallback gets wrong on SQL Server:
///
/// - diff noise (`unsigned`, type changes with identical SQL types) is
///   removed before anything is emitted;
/// - added columns get their default constraint in the same statement as
///   the column, so NOT NULL columns can be added to populated tables;
/// - default constraints of removed columns are dropped first, since SQL
///   Server refuses to drop a column that still has one.
///
/// # Example
///
/// ```rust
/// use oxide_sql_mssql::prelude::*;
///
/// let platform = SqlServerPlatform::new(PlatformVersion::SqlServer2008);
/// let diff = TableDiff::new("T").add_column(
///     ColumnSpec::new("C", LogicalType::Integer)
///         .not_null()
///         .default(DefaultValue::Integer(0)),
/// );
///
/// let sql = platform.alter_table_sql(&diff).unwrap();
/// assert_eq!(
///     sql,
///     vec!["ALTER TABLE [T] ADD [C] INT NOT NULL CONSTRAINT DF_BE047A60_3DD7FFA7 DEFAULT 0"]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct SqlServerPlatform<C = GenericAlterTable<SqlServerTypes>> {
    types: SqlServerTypes,
    fallback: C,
    lock_hints: LockHintTable,
}

impl Default for SqlServerPlatform {
    fn default() -> Self {
        Self::new(PlatformVersion::default())
    }
}

impl SqlServerPlatform {
    /// Creates a platform for a SQL Server version, with the generic
    /// fallback compiler and the default lock hints.
    #[must_use]
    pub fn new(version: PlatformVersion) -> Self {
        let types = SqlServerTypes::new(version);
        Self::with_fallback(version, GenericAlterTable::new(types))
    }

    /// Creates a platform from a server version string.
    ///
    /// # Errors
    ///
    /// Returns [`DdlError::InvalidVersion`](crate::error::DdlError::InvalidVersion)
    /// if the version cannot be parsed.
    pub fn for_server_version(version: &str) -> Result<Self> {
        Ok(Self::new(PlatformVersion::from_version_string(version)?))
    }
}

impl<C: AlterTableCompiler> SqlServerPlatform<C> {
    /// Creates a platform delegating residual changes to `fallback`.
    #[must_use]
    pub fn with_fallback(version: PlatformVersion, fallback: C) -> Self {
        Self {
            types: SqlServerTypes::new(version),
            fallback,
            lock_hints: LockHintTable::default(),
        }
    }

    /// Returns the platform version.
    #[must_use]
    pub const fn version(&self) -> PlatformVersion {
        self.types.version()
    }

    /// Returns the type renderer.
    #[must_use]
    pub const fn types(&self) -> &SqlServerTypes {
        &self.types
    }

    /// Returns the lock hint table.
    #[must_use]
    pub const fn lock_hints(&self) -> &LockHintTable {
        &self.lock_hints
    }

    /// Replaces the whole lock hint table.
    pub fn set_lock_hints(&mut self, hints: LockHintTable) {
        self.lock_hints = hints;
    }

    /// Overrides the hint of a single lock mode.
    pub fn set_lock_hint(&mut self, mode: LockMode, hint: impl Into<String>) {
        self.lock_hints.set(mode, hint);
    }

    /// Appends the configured lock hint for `mode` to a FROM clause.
    #[must_use]
    pub fn append_lock_hint(&self, from_clause: &str, mode: LockMode) -> String {
        append_lock_hint(from_clause, mode, &self.lock_hints)
    }

    /// Returns the name used for the default constraint of a column.
    #[must_use]
    pub fn default_constraint_name(&self, table: &str, column: &str) -> String {
        default_constraint_name(table, column)
    }

    /// Emits one statement per added column, with its default constraint
    /// inline, and removes the columns from `diff`.
    fn add_columns_sql(&self, diff: &mut TableDiff) -> Result<Vec<String>> {
        let table = self.types.quote_identifier(&diff.name);
        let mut sql = Vec::with_capacity(diff.added.len());

        for column in std::mem::take(&mut diff.added) {
            let mut statement = format!(
                "ALTER TABLE {table} ADD {}",
                self.types.column_declaration(&column)?
            );

            if let Some(default) = column.constraint_default() {
                statement.push_str(&format!(
                    " CONSTRAINT {} DEFAULT {}",
                    default_constraint_name(&diff.name, &column.name),
                    self.types.render_default(&column.name, default)?
                ));
            }

            sql.push(statement);
        }

        Ok(sql)
    }

    /// Emits a guarded DROP CONSTRAINT for every removed column that had a
    /// non-null default. The removed columns stay in `diff`.
    fn drop_removed_defaults_sql(&self, diff: &TableDiff) -> Vec<String> {
        let table = self.types.quote_identifier(&diff.name);

        diff.removed
            .iter()
            .filter(|column| column.has_default())
            .map(|column| {
                let name = default_constraint_name(&diff.name, &column.name);
                format!(
                    "IF EXISTS(SELECT 1 FROM sys.objects WHERE type_desc = 'DEFAULT_CONSTRAINT' \
                     AND name = '{name}') BEGIN ALTER TABLE {table} DROP CONSTRAINT {name}; END"
                )
            })
            .collect()
    }
}

impl<C: AlterTableCompiler> AlterTableCompiler for SqlServerPlatform<C> {
    fn alter_table_sql(&self, diff: &TableDiff) -> Result<Vec<String>> {
        let mut diff = diff.clone();

        filter_table_diff(&mut diff, &self.types)?;

        let mut sql = self.add_columns_sql(&mut diff)?;
        sql.extend(self.drop_removed_defaults_sql(&diff));
        let handled = sql.len();

        sql.extend(self.fallback.alter_table_sql(&diff)?);

        debug!(
            table = %diff.name,
            platform = self.types.name(),
            handled,
            delegated = sql.len() - handled,
            "Generated ALTER TABLE statements"
        );

        Ok(sql)
    }
}
