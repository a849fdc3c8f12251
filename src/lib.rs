//! Core library for `bootmount`.
//!
//! Filesystem provisioning primitives for early userspace: ensure a directory
//! exists, mount a filesystem onto it unless a container marker says not to, and
//! move a live mount to a new mount point. Each operation has a completion form
//! and a blocking form with identical error tolerance; see [`Provisioner`].

pub mod cli;
pub mod config;
pub mod errors;
pub mod fs_ops;
pub mod host;
pub mod logging;
pub mod output;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{default_config_path, load_config, load_config_from_xml_path, Config, LogLevel};
pub use errors::{ErrorCode, FsError};
pub use fs_ops::{Provisioner, DIR_MODE_DEFAULT, MARKER_PATH_DEFAULT};
pub use host::{Completion, Host, LinuxHost, MountFlags, MountOptions, MountRequest};
