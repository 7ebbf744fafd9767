//! Platform configuration.
//!
//! A [`PlatformConfig`] is read from JSON:
//!
//! ```json
//! {
//!     "server_version": "10.50.1600.1",
//!     "lock_hints": { "none": " WITH (READPAST)" },
//!     "replace_lock_hints": false,
//!     "connection": { "host": "db.local", "port": 1433, "dbname": "shop" }
//! }
//! ```
//!
//! Every field is optional.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::dialect::SqlServerPlatform;
use crate::driver::DsnParams;
use crate::error::{DdlError, Result};
use crate::lock::LockMode;
use crate::version::PlatformVersion;

/// Configuration of a [`SqlServerPlatform`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlatformConfig {
    /// Server version string. The newest platform is used when absent.
    #[serde(default)]
    pub server_version: Option<String>,
    /// Lock hints, keyed by lock mode.
    #[serde(default)]
    pub lock_hints: BTreeMap<LockMode, String>,
    /// Replace the default hint table instead of overriding entries.
    #[serde(default)]
    pub replace_lock_hints: bool,
    /// Connection parameters.
    #[serde(default)]
    pub connection: Option<DsnParams>,
}

impl PlatformConfig {
    /// Parses a configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`DdlError::Serialization`] on malformed JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`DdlError::Io`] if the file cannot be read and
    /// [`DdlError::Serialization`] if it is not valid JSON.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading platform configuration");
        Self::from_json_str(&fs::read_to_string(path)?)
    }

    /// Resolves the platform version.
    ///
    /// # Errors
    ///
    /// Returns [`DdlError::InvalidVersion`] if `server_version` is set but
    /// cannot be parsed.
    pub fn version(&self) -> Result<PlatformVersion> {
        self.server_version
            .as_deref()
            .map_or(Ok(PlatformVersion::default()), |v| {
                PlatformVersion::from_version_string(v)
            })
    }

    /// Builds the configured platform.
    ///
    /// # Errors
    ///
    /// Returns [`DdlError::InvalidVersion`] for an unparsable version.
    pub fn build_platform(&self) -> Result<SqlServerPlatform> {
        let version = self.version()?;
        let mut platform = SqlServerPlatform::new(version);

        if self.replace_lock_hints {
            platform.set_lock_hints(self.lock_hints.clone().into_iter().collect());
        } else {
            for (mode, hint) in &self.lock_hints {
                platform.set_lock_hint(*mode, hint.clone());
            }
        }

        info!(
            platform = version.name(),
            lock_hints = platform.lock_hints().len(),
            "Selected SQL Server platform"
        );

        Ok(platform)
    }
}
