//! Application configuration loaded from `--config <PATH>`.
//!
//! Every section is optional in the file; missing sections and fields fall
//! back to the built-in defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use nozyk_geo::Region;
use nozyk_model::columns::{DRIVER_ID, EXCEPTION_INFO, GPS_X, GPS_Y, KNOWN_EXCEPTIONS};
use nozyk_normalization::NormalizationOptions;
use nozyk_transform::AddressColumns;

/// Names of the semantic columns besides the address ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    pub driver: String,
    pub status: String,
    pub gps_x: String,
    pub gps_y: String,
    /// Status values offered (and selected by default) for filtering.
    pub known_exceptions: Vec<String>,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            driver: DRIVER_ID.to_string(),
            status: EXCEPTION_INFO.to_string(),
            gps_x: GPS_X.to_string(),
            gps_y: GPS_Y.to_string(),
            known_exceptions: KNOWN_EXCEPTIONS.iter().map(ToString::to_string).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub normalization: NormalizationOptions,
    pub region: Region,
    pub address: AddressColumns,
    pub columns: ColumnConfig,
}

impl AppConfig {
    /// Reads a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text =
            fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parse config {}", path.display()))
    }

    /// Reads `path` when given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
