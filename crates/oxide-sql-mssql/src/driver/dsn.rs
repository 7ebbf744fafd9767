//! DSN construction for the dblib driver.

use serde::{Deserialize, Serialize};

/// Connection parameters used to build a DSN.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DsnParams {
    /// Server host name.
    #[serde(default)]
    pub host: Option<String>,
    /// Server port. `None` and `0` both mean the driver default.
    #[serde(default)]
    pub port: Option<u16>,
    /// Database name.
    #[serde(default)]
    pub dbname: Option<String>,
    /// Client character set.
    #[serde(default)]
    pub charset: Option<String>,
}

/// Separator placed between host and port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortSeparator {
    /// `host,port`, used by Windows client libraries.
    Comma,
    /// `host:port`, used by FreeTDS.
    Colon,
}

impl PortSeparator {
    /// Returns the separator of the current platform.
    #[must_use]
    pub const fn native() -> Self {
        if cfg!(windows) {
            Self::Comma
        } else {
            Self::Colon
        }
    }

    const fn as_char(self) -> char {
        match self {
            Self::Comma => ',',
            Self::Colon => ':',
        }
    }
}

/// Builds a `dblib:` DSN.
///
/// # Example
///
/// ```rust
/// use oxide_sql_mssql::driver::{DsnParams, PortSeparator, build_dsn};
///
/// let params = DsnParams {
///     host: Some("db.local".into()),
///     port: Some(1433),
///     dbname: Some("shop".into()),
///     charset: None,
/// };
/// assert_eq!(
///     build_dsn(&params, PortSeparator::Colon),
///     "dblib:host=db.local:1433;dbname=shop"
/// );
/// ```
#[must_use]
pub fn build_dsn(params: &DsnParams, separator: PortSeparator) -> String {
    let mut dsn = String::from("dblib:host=");

    if let Some(ref host) = params.host {
        dsn.push_str(host);
    }

    if let Some(port) = params.port.filter(|p| *p != 0) {
        dsn.push(separator.as_char());
        dsn.push_str(&port.to_string());
    }

    if let Some(ref dbname) = params.dbname {
        dsn.push_str(";dbname=");
        dsn.push_str(dbname);
    }

    if let Some(ref charset) = params.charset {
        dsn.push_str(";charset=");
        dsn.push_str(charset);
    }

    dsn
}
