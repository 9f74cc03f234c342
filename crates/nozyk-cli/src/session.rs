//! Remembered selection between runs (`--session <PATH>`).
//!
//! The state is read before a run and written back after it; it is passed
//! around as a value and never held globally.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::pipeline::{ExceptionSelection, Selection};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionState {
    pub selection: Selection,
}

impl SessionState {
    /// Reads the session file; a missing file is an empty session.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no session file yet");
            return Ok(Self::default());
        }
        let text =
            fs::read_to_string(path).with_context(|| format!("read session {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parse session {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
        }
        let text = serde_json::to_string_pretty(self).context("serialize session")?;
        fs::write(path, text).with_context(|| format!("write session {}", path.display()))
    }

    /// Overlays explicitly given choices on the remembered ones.
    pub fn merge(&self, overrides: &SelectionOverrides) -> Selection {
        let mut selection = self.selection.clone();
        if let Some(sheet) = &overrides.sheet {
            selection.sheet = Some(sheet.clone());
        }
        if let Some(dates) = overrides.dates {
            selection.dates = dates;
        }
        if let Some(driver) = &overrides.driver {
            selection.driver = Some(driver.clone());
        }
        if let Some(exceptions) = &overrides.exceptions {
            selection.exceptions = exceptions.clone();
        }
        selection
    }
}

/// Choices given on the command line; `None` keeps the remembered value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionOverrides {
    pub sheet: Option<String>,
    pub dates: Option<nozyk_transform::DateOption>,
    pub driver: Option<String>,
    pub exceptions: Option<ExceptionSelection>,
}
