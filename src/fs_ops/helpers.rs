//! I/O helper utilities.
//!
//! Builds actionable messages for failed primitives: operation, path, OS text, a
//! hint keyed on the raw errno, and the code itself.
//!
//! Usage:
//!   // in functions returning anyhow::Result<_>
//!   fs::read_to_string(p).map_err(io_error_with_help("read config", p))?;

use anyhow::anyhow;
use std::io;
use std::path::Path;

/// Format a human-friendly message with op/path plus errno-specific hints.
pub(crate) fn build_message(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, path.display(), e);

    if let Some(code) = e.raw_os_error() {
        match code {
            libc::EPERM => {
                msg.push_str(" — operation not permitted; mounting needs CAP_SYS_ADMIN.");
            }
            libc::EACCES => {
                msg.push_str(" — permission denied; check ownership and search permissions on ancestors.");
            }
            libc::EBUSY => {
                msg.push_str(" — resource busy; something still holds the mount or directory.");
            }
            libc::EINVAL => {
                msg.push_str(" — invalid argument; a move source must be an active mount point.");
            }
            libc::ENODEV => {
                msg.push_str(" — filesystem type not supported by the kernel.");
            }
            libc::ENOTDIR => {
                msg.push_str(" — a path component is not a directory.");
            }
            libc::ENOTEMPTY => {
                msg.push_str(" — directory not empty.");
            }
            libc::ENOENT => {
                msg.push_str(" — path not found; verify it exists.");
            }
            libc::EEXIST => {
                msg.push_str(" — already exists.");
            }
            libc::EROFS => {
                msg.push_str(" — read-only filesystem; cannot write here.");
            }
            libc::ELOOP => {
                msg.push_str(" — too many symbolic link levels (ELOOP); possible symlink cycle.");
            }
            libc::ENAMETOOLONG => {
                msg.push_str(" — filename or path too long; shorten path segments.");
            }
            _ => {}
        }
        msg.push_str(&format!(" [os code: {}]", code));
    } else {
        match e.kind() {
            io::ErrorKind::PermissionDenied => {
                msg.push_str(" — permission denied; check ownership and write permissions.");
            }
            io::ErrorKind::NotFound => {
                msg.push_str(" — path not found; verify it exists.");
            }
            io::ErrorKind::AlreadyExists => {
                msg.push_str(" — already exists.");
            }
            io::ErrorKind::InvalidInput => {
                msg.push_str(" — path cannot be passed to the OS (interior NUL byte?).");
            }
            _ => {}
        }
    }

    msg
}

/// Adapter for anyhow::Result code.
/// Returns a closure suitable for `.map_err(...)` that converts io::Error -> anyhow::Error.
pub fn io_error_with_help<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> anyhow::Error + 'a {
    move |e: io::Error| anyhow!(build_message(op, path, &e))
}
