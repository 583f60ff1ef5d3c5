//! Export configuration

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::coerce::NullPolicy;
use crate::error::RecordResult;
use crate::serialize::{RenderOptions, DEFAULT_INDENT};

/// Settings for writing a generated database to disk.
///
/// ```toml
/// output_dir = "monsters-json"
/// pretty = true
/// indent = 4
/// null_policy = "falsy"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory receiving one `<id>.json` file per record
    pub output_dir: PathBuf,
    pub pretty: bool,
    pub indent: usize,
    /// Null handling used when loading raw records
    pub null_policy: NullPolicy,
}

impl Default for ExportConfig {
    fn default() -> Self {
        ExportConfig {
            output_dir: PathBuf::from("monsters-json"),
            pretty: true,
            indent: DEFAULT_INDENT,
            null_policy: NullPolicy::default(),
        }
    }
}

impl ExportConfig {
    /// Load configuration from a TOML file, or defaults if it doesn't exist
    pub fn load(path: &Path) -> RecordResult<Self> {
        if !path.exists() {
            return Ok(ExportConfig::default());
        }

        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> RecordResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            pretty: self.pretty,
            indent: self.indent,
        }
    }
}
