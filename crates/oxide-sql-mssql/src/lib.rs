//! # oxide-sql-mssql
//!
//! ALTER TABLE generation for Microsoft SQL Server.
//!
//! The crate turns a [`TableDiff`](diff::TableDiff) (the difference between
//! two versions of a table) into the DDL statements that migrate a SQL
//! Server database from one to the other.
//!
//! # How SQL Server differs from other dialects
//!
//! - **[Default constraints]**: column defaults are named constraints. A
//!   default must be dropped by name before its column can be dropped, so
//!   every default constraint gets a deterministic name derived from the
//!   table and column ([`naming::default_constraint_name`]).
//! - **Adding NOT NULL columns**: a NOT NULL column can only be added to a
//!   populated table if its default is declared in the same statement.
//! - **[Table hints]**: row locking is requested with `WITH (...)` hints
//!   after a table reference rather than `SELECT ... FOR UPDATE`.
//! - **Identifier quoting**: square brackets (`[name]`).
//! - **Unicode strings**: `NVARCHAR(n)`/`NCHAR(n)`, with `MAX` for long
//!   values since SQL Server 2005.
//!
//! [Default constraints]: https://learn.microsoft.com/en-us/sql/relational-databases/tables/specify-default-values-for-columns
//! [Table hints]: https://learn.microsoft.com/en-us/sql/t-sql/queries/hints-transact-sql-table
//!
//! ## Example
//!
//! ```rust
//! use oxide_sql_mssql::prelude::*;
//!
//! let platform = SqlServerPlatform::for_server_version("10.50.1600.1").unwrap();
//!
//! let diff = TableDiff::new("users")
//!     .add_column(
//!         ColumnSpec::new("is_active", LogicalType::Boolean)
//!             .not_null()
//!             .default(DefaultValue::Boolean(true)),
//!     )
//!     .remove_column(
//!         ColumnSpec::new("deleted_at", LogicalType::DateTime)
//!             .default(DefaultValue::Expression("GETDATE()".into())),
//!     );
//!
//! let sql = platform.alter_table_sql(&diff).unwrap();
//! assert_eq!(
//!     sql[0],
//!     "ALTER TABLE [users] ADD [is_active] BIT NOT NULL CONSTRAINT DF_1483A5E9_1B5771DD DEFAULT 1"
//! );
//! assert_eq!(sql[2], "ALTER TABLE [users] DROP COLUMN [deleted_at]");
//!
//! assert_eq!(
//!     platform.append_lock_hint("FROM users u", LockMode::PessimisticRead),
//!     "FROM users u WITH (HOLDLOCK, ROWLOCK)"
//! );
//! ```

pub mod config;
pub mod diff;
pub mod dialect;
pub mod driver;
pub mod error;
pub mod lock;
pub mod naming;
pub mod schema;
pub mod version;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::PlatformConfig;
    pub use crate::dialect::{
        AlterTableCompiler, GenericAlterTable, SqlServerPlatform, SqlServerTypes, TypeRenderer,
    };
    pub use crate::diff::{ChangedProperty, ColumnChange, RenamedColumn, TableDiff};
    pub use crate::error::{DdlError, Result};
    pub use crate::lock::{LockHintTable, LockMode};
    pub use crate::naming::default_constraint_name;
    pub use crate::schema::{ColumnSpec, DefaultValue, LogicalType};
    pub use crate::version::PlatformVersion;
}
