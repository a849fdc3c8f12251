//! Config module.
//! Provides configuration types, the config file location, XML loading, and validation.

pub mod paths;
pub mod types;
mod validate;
pub mod xml;

pub use paths::{default_config_path, path_has_symlink_ancestor, CONFIG_ENV};
pub use types::{parse_dir_mode, Config, LogLevel};
pub use xml::{load_config, load_config_from_xml_path};

/// System-wide config location used when BOOTMOUNT_CONFIG is unset.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/bootmount/config.xml";
