//! Provisioning operations: modularized.
//!
//! [`Provisioner`] carries the host and the settings every operation needs. Each
//! operation comes in a completion form (`ensure_dir`, `mount_fs`, `mkdir_mount`,
//! `move_mount`, `mkdir_move`) and a blocking form with the same policy (`*_sync`).

pub(crate) mod helpers;
mod migrate;
mod mkdir;
mod mkmount;
mod mountfs;
mod relocate;

pub use helpers::io_error_with_help;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::Config;
use crate::host::{Host, LinuxHost};

/// Sentinel whose presence means "container: do not mount".
pub const MARKER_PATH_DEFAULT: &str = "/.dockerinit";

/// Mode for directories created on the caller's behalf: no access bits.
pub const DIR_MODE_DEFAULT: u32 = 0o000;

/// Runs the provisioning operations against a [`Host`].
pub struct Provisioner<H: Host = LinuxHost> {
    host: Arc<H>,
    marker_path: PathBuf,
    dir_mode: u32,
}

impl<H: Host> Clone for Provisioner<H> {
    fn clone(&self) -> Self {
        Self {
            host: Arc::clone(&self.host),
            marker_path: self.marker_path.clone(),
            dir_mode: self.dir_mode,
        }
    }
}

impl Default for Provisioner<LinuxHost> {
    fn default() -> Self {
        Self::new(Arc::new(LinuxHost::new()))
    }
}

impl Provisioner<LinuxHost> {
    /// Real host, settings taken from `cfg`.
    pub fn from_config(cfg: &Config) -> Self {
        Self::new(Arc::new(LinuxHost::new()))
            .with_marker_path(&cfg.marker_path)
            .with_dir_mode(cfg.dir_mode)
    }
}

impl<H: Host> Provisioner<H> {
    pub fn new(host: Arc<H>) -> Self {
        Self {
            host,
            marker_path: PathBuf::from(MARKER_PATH_DEFAULT),
            dir_mode: DIR_MODE_DEFAULT,
        }
    }

    pub fn with_marker_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.marker_path = path.into();
        self
    }

    pub fn with_dir_mode(mut self, mode: u32) -> Self {
        self.dir_mode = mode;
        self
    }

    pub fn host(&self) -> &Arc<H> {
        &self.host
    }

    pub fn marker_path(&self) -> &Path {
        &self.marker_path
    }

    pub fn dir_mode(&self) -> u32 {
        self.dir_mode
    }
}
