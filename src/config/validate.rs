//! Config validation logic.
//! Rejects settings that would make every operation fail in a confusing way later.

use anyhow::{bail, Result};
use tracing::{debug, error};

use super::types::Config;

impl Config {
    /// Validate marker path, directory mode and log file location.
    pub fn validate(&self) -> Result<()> {
        if !self.marker_path.is_absolute() {
            error!("marker_path is not absolute: {}", self.marker_path.display());
            bail!("marker_path must be absolute: '{}'", self.marker_path.display());
        }

        if self.dir_mode > 0o7777 {
            error!("dir_mode out of range: {:o}", self.dir_mode);
            bail!("dir_mode must be at most 7777 (octal), got {:o}", self.dir_mode);
        }

        if let Some(log) = &self.log_file {
            if log.is_dir() {
                error!("log_file is a directory: {}", log.display());
                bail!("log_file must be a file path, '{}' is a directory", log.display());
            }
        }

        debug!(
            marker = %self.marker_path.display(),
            dir_mode = %format!("{:04o}", self.dir_mode),
            log_level = %self.log_level,
            "Config validated"
        );
        Ok(())
    }
}
