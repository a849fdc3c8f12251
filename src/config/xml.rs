//! XML configuration support.
//! - Loads settings from config.xml (quick_xml).
//! - A missing file means defaults; there is no template to write at boot.
//!
//! Notes:
//! - Unknown XML fields are a hard error to surface misconfigurations early.
//! - Empty elements are treated as unset.

use anyhow::{anyhow, Context, Result};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::paths::default_config_path;
use crate::fs_ops::io_error_with_help;
use super::types::{parse_dir_mode, Config, LogLevel};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    #[serde(rename = "marker_path")]
    marker_path: Option<String>,
    #[serde(rename = "dir_mode")]
    dir_mode: Option<String>,
    #[serde(rename = "log_level")]
    log_level: Option<String>,
    #[serde(rename = "log_file")]
    log_file: Option<String>,
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|t| !t.is_empty())
}

// Map XmlConfig -> Config
fn xml_to_config(parsed: XmlConfig, path: &Path) -> Result<Config> {
    let mut cfg = Config::default();

    if let Some(m) = non_empty(parsed.marker_path.as_deref()) {
        cfg.marker_path = PathBuf::from(m);
    }
    if let Some(m) = non_empty(parsed.dir_mode.as_deref()) {
        cfg.dir_mode = parse_dir_mode(m)
            .map_err(|e| anyhow!("{} in config '{}'", e, path.display()))?;
    }
    if let Some(l) = non_empty(parsed.log_level.as_deref()) {
        cfg.log_level = l
            .parse::<LogLevel>()
            .map_err(|e| anyhow!("{} in config '{}'", e, path.display()))?;
    }
    if let Some(f) = non_empty(parsed.log_file.as_deref()) {
        cfg.log_file = Some(PathBuf::from(f));
    }

    Ok(cfg)
}

/// Load a Config from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents =
        fs::read_to_string(path).map_err(io_error_with_help("read config xml", path))?;
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    xml_to_config(parsed, path)
}

/// Load from `$BOOTMOUNT_CONFIG` or the system path. Missing file: defaults.
pub fn load_config() -> Result<Config> {
    let path = default_config_path();
    if !path.exists() {
        debug!(path = %path.display(), "No config file; using defaults");
        return Ok(Config::default());
    }
    debug!(path = %path.display(), "Loading config");
    load_config_from_xml_path(&path)
}
