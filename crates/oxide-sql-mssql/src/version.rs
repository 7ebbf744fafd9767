//! SQL Server platform versions.
//!
//! The platform variant is chosen once by the host, either explicitly or
//! from the server's version string, and stored by the platform.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DdlError, Result};

/// Supported SQL Server generations.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PlatformVersion {
    /// SQL Server 2000 and earlier.
    SqlServer,
    /// SQL Server 2005 (major version 9).
    SqlServer2005,
    /// SQL Server 2008 and 2008 R2 (major version 10).
    SqlServer2008,
    /// SQL Server 2012 and later (major version 11+).
    #[default]
    SqlServer2012,
}

impl PlatformVersion {
    /// Selects the platform for a server version string such as
    /// `"10.50.1600.1"`. Only the major component is considered.
    ///
    /// # Errors
    ///
    /// Returns [`DdlError::InvalidVersion`] if the major component is not a
    /// number.
    ///
    /// # Example
    ///
    /// ```rust
    /// use oxide_sql_mssql::version::PlatformVersion;
    ///
    /// let version = PlatformVersion::from_version_string("10.50.1600.1").unwrap();
    /// assert_eq!(version, PlatformVersion::SqlServer2008);
    /// ```
    pub fn from_version_string(version: &str) -> Result<Self> {
        let major = version
            .trim()
            .split('.')
            .next()
            .unwrap_or_default()
            .parse::<u32>()
            .map_err(|_| DdlError::InvalidVersion(version.to_string()))?;

        Ok(match major {
            0..=8 => Self::SqlServer,
            9 => Self::SqlServer2005,
            10 => Self::SqlServer2008,
            _ => Self::SqlServer2012,
        })
    }

    /// Returns the platform name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::SqlServer => "mssql",
            Self::SqlServer2005 => "mssql2005",
            Self::SqlServer2008 => "mssql2008",
            Self::SqlServer2012 => "mssql2012",
        }
    }

    /// Returns true if `VARCHAR(MAX)`-style types are available.
    #[must_use]
    pub fn supports_max_length(self) -> bool {
        self >= Self::SqlServer2005
    }

    /// Returns true if `DATE`, `TIME`, `DATETIME2` and `DATETIMEOFFSET` are
    /// available.
    #[must_use]
    pub fn supports_extended_temporal_types(self) -> bool {
        self >= Self::SqlServer2008
    }
}

impl fmt::Display for PlatformVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_thresholds() {
        let cases = [
            ("8.00.2039", PlatformVersion::SqlServer),
            ("9.00.5000.00", PlatformVersion::SqlServer2005),
            ("10.0.1600.22", PlatformVersion::SqlServer2008),
            ("10.50.1600.1", PlatformVersion::SqlServer2008),
            ("11.0.2100.60", PlatformVersion::SqlServer2012),
            ("16.0.1000.6", PlatformVersion::SqlServer2012),
            ("12", PlatformVersion::SqlServer2012),
        ];
        for (input, expected) in cases {
            assert_eq!(
                PlatformVersion::from_version_string(input).unwrap(),
                expected,
                "version {input}"
            );
        }
    }

    #[test]
    fn test_invalid_version() {
        assert!(matches!(
            PlatformVersion::from_version_string("Microsoft SQL Server"),
            Err(DdlError::InvalidVersion(_))
        ));
        assert!(PlatformVersion::from_version_string("").is_err());
    }

    #[test]
    fn test_default_is_newest() {
        assert_eq!(PlatformVersion::default(), PlatformVersion::SqlServer2012);
    }

    #[test]
    fn test_feature_flags() {
        assert!(!PlatformVersion::SqlServer.supports_max_length());
        assert!(PlatformVersion::SqlServer2005.supports_max_length());
        assert!(!PlatformVersion::SqlServer2005.supports_extended_temporal_types());
        assert!(PlatformVersion::SqlServer2008.supports_extended_temporal_types());
    }
}
