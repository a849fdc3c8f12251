//! Config path resolution and symlink checks.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::SYSTEM_CONFIG_PATH;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "BOOTMOUNT_CONFIG";

/// Config file path: `$BOOTMOUNT_CONFIG` if set and non-empty, else the system path.
pub fn default_config_path() -> PathBuf {
    match env::var_os(CONFIG_ENV) {
        Some(p) if !p.is_empty() => PathBuf::from(p),
        _ => PathBuf::from(SYSTEM_CONFIG_PATH),
    }
}

/// Return true if any existing ancestor of `path` is a symlink.
pub fn path_has_symlink_ancestor(path: &Path) -> io::Result<bool> {
    let mut p = path.parent();
    while let Some(anc) = p {
        if anc.exists() {
            let meta = fs::symlink_metadata(anc)?;
            if meta.file_type().is_symlink() {
                return Ok(true);
            }
        }
        p = anc.parent();
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::fs::symlink;
    use tempfile::tempdir;

    #[test]
    fn detects_symlinked_ancestor() {
        let dir = tempdir().unwrap();
        let real = dir.path().join("real");
        fs::create_dir(&real).unwrap();
        let link = dir.path().join("link");
        symlink(&real, &link).unwrap();

        assert!(path_has_symlink_ancestor(&link.join("boot.log")).unwrap());
        // the temp root itself may sit behind a symlink on some hosts
        let base_linked = path_has_symlink_ancestor(&dir.path().join("x")).unwrap();
        assert_eq!(
            path_has_symlink_ancestor(&real.join("boot.log")).unwrap(),
            base_linked
        );
    }
}
