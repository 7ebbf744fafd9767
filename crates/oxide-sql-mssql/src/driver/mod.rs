//! Driver-side helpers for the dblib/ODBC family of SQL Server drivers.
//!
//! Nothing here opens a connection. These are the pieces of driver glue
//! with fixed behaviour: building the DSN, the session settings applied
//! right after connecting, and a statement wrapper closing the cursor
//! before each bind and execute.

mod dsn;
mod statement;

pub use dsn::{DsnParams, PortSeparator, build_dsn};
pub use statement::{CursorGuard, DriverStatement, ParamType};

/// Session settings applied right after connecting, so that the session
/// behaves like one opened by the native client.
pub const SESSION_INIT_SQL: [&str; 5] = [
    "SET ANSI_WARNINGS ON",
    "SET ANSI_PADDING ON",
    "SET ANSI_NULLS ON",
    "SET QUOTED_IDENTIFIER ON",
    "SET CONCAT_NULL_YIELDS_NULL ON",
];
