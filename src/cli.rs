//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - --debug is a shorthand for --log-level debug.
//! - Global flags override values from the config file.

use clap::{Parser, Subcommand, ValueHint};
use std::path::PathBuf;
use std::str::FromStr;

use crate::config::types::{parse_dir_mode, Config, LogLevel};
use crate::host::{MountFlags, MountOptions};

/// Provision directories and mounts during early userspace bring-up.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Directory and mount provisioning for early boot")]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(
        short = 'd',
        long,
        global = true,
        help = "Enable debug logging (shorthand for --log-level debug)"
    )]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(
        long,
        global = true,
        value_parser = LogLevel::from_str,
        help = "Set log level: quiet, normal, info, debug"
    )]
    pub log_level: Option<LogLevel>,

    /// Emit logs in structured JSON.
    #[arg(long, global = true, help = "Emit logs in structured JSON")]
    pub json: bool,

    /// Also write logs to this file.
    #[arg(long, global = true, value_hint = ValueHint::FilePath, help = "Append logs to this file")]
    pub log_file: Option<PathBuf>,

    /// Override the container marker file.
    #[arg(long, global = true, value_hint = ValueHint::FilePath, help = "Marker file whose presence skips mounting")]
    pub marker: Option<PathBuf>,

    /// Override the mode used for created directories (octal).
    #[arg(long, global = true, value_parser = parse_dir_mode, help = "Octal mode for created directories (default 0000)")]
    pub dir_mode: Option<u32>,

    /// Use the blocking operation family instead of completion callbacks.
    #[arg(long, global = true, help = "Run operations in blocking form")]
    pub sync: bool,

    /// Print which config file would be read, then exit.
    #[arg(long, help = "Print the config file location and exit")]
    pub print_config: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create a directory (and ancestors); an existing entry is fine.
    Mkdir {
        #[arg(value_hint = ValueHint::DirPath)]
        path: PathBuf,
    },
    /// Mount a filesystem unless the marker file is present.
    Mount {
        #[arg(value_hint = ValueHint::DirPath)]
        target: PathBuf,
        /// Filesystem type, e.g. proc, sysfs, tmpfs
        fstype: Option<String>,
        /// Filesystem-specific data, e.g. size=64m
        #[arg(long)]
        data: Option<String>,
        /// Comma-separated flags, e.g. nosuid,nodev,noexec
        #[arg(long)]
        flags: Option<MountFlags>,
        /// Source device (defaults to the filesystem type name)
        #[arg(long, value_hint = ValueHint::AnyPath)]
        dev: Option<PathBuf>,
    },
    /// Create the target directory and mount onto it, ignoring the marker file.
    MkdirMount {
        #[arg(value_hint = ValueHint::DirPath)]
        target: PathBuf,
        /// Filesystem type, e.g. proc, sysfs, tmpfs
        fstype: Option<String>,
        /// Filesystem-specific data, e.g. size=64m
        #[arg(long)]
        data: Option<String>,
        /// Comma-separated flags, e.g. nosuid,nodev,noexec
        #[arg(long)]
        flags: Option<MountFlags>,
        /// Source device (defaults to the filesystem type name)
        #[arg(long, value_hint = ValueHint::AnyPath)]
        dev: Option<PathBuf>,
    },
    /// Move an active mount and remove the emptied source directory.
    Move {
        #[arg(value_hint = ValueHint::DirPath)]
        source: PathBuf,
        #[arg(value_hint = ValueHint::DirPath)]
        target: PathBuf,
    },
    /// Create the target directory, then move the mount onto it.
    MkdirMove {
        #[arg(value_hint = ValueHint::DirPath)]
        source: PathBuf,
        #[arg(value_hint = ValueHint::DirPath)]
        target: PathBuf,
    },
}

impl Command {
    /// Mount options assembled from the `mount`/`mkdir-mount` flags; None when none were given.
    pub fn mount_options(&self) -> Option<MountOptions> {
        match self {
            Command::Mount {
                data, flags, dev, ..
            }
            | Command::MkdirMount {
                data, flags, dev, ..
            } if data.is_some() || flags.is_some() || dev.is_some() => Some(MountOptions {
                data: data.clone(),
                flags: *flags,
                dev_file: dev.clone(),
            }),
            _ => None,
        }
    }
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.clone()
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(f) = &self.log_file {
            cfg.log_file = Some(f.clone());
        }
        if let Some(m) = &self.marker {
            cfg.marker_path = m.clone();
        }
        if let Some(mode) = self.dir_mode {
            cfg.dir_mode = mode;
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
