//! The real host: `std::fs` for directories, `libc::mount` for mounts.

use std::ffi::{CString, OsString};
use std::fs::{self, DirBuilder};
use std::io;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::fs::DirBuilderExt;
use std::path::Path;
use std::ptr;

use tracing::trace;

use super::{Host, MountRequest};
use crate::errors::{fs_err, FsError};

/// Host backed by the running kernel. Completion forms finish inline.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinuxHost;

impl LinuxHost {
    pub fn new() -> Self {
        LinuxHost
    }
}

fn c_path(op: &'static str, path: &Path) -> Result<CString, FsError> {
    CString::new(path.as_os_str().as_bytes()).map_err(|_| {
        FsError::new(
            op,
            path,
            io::Error::new(io::ErrorKind::InvalidInput, "path contains null byte"),
        )
    })
}

impl Host for LinuxHost {
    fn mkdirp_sync(&self, path: &Path, mode: u32) -> Result<(), FsError> {
        trace!(path = %path.display(), mode = %format!("{:04o}", mode), "mkdirp");
        DirBuilder::new()
            .recursive(true)
            .mode(mode)
            .create(path)
            .map_err(fs_err("mkdirp", path))
    }

    fn stat_sync(&self, path: &Path) -> Result<(), FsError> {
        trace!(path = %path.display(), "stat");
        fs::metadata(path).map(|_| ()).map_err(fs_err("stat", path))
    }

    fn mount_sync(&self, req: &MountRequest) -> Result<(), FsError> {
        trace!(
            source = %req.source.display(),
            target = %req.target.display(),
            fstype = ?req.fstype,
            flags = %req.flags,
            "mount"
        );
        let source = c_path("mount", &req.source)?;
        let target = c_path("mount", &req.target)?;
        let fstype = req
            .fstype
            .as_deref()
            .map(|t| c_path("mount", Path::new(t)))
            .transpose()?;
        let data = req
            .data
            .as_deref()
            .map(|d| c_path("mount", Path::new(d)))
            .transpose()?;

        let rc = unsafe {
            libc::mount(
                source.as_ptr(),
                target.as_ptr(),
                fstype.as_ref().map_or(ptr::null(), |t| t.as_ptr()),
                req.flags.bits(),
                data.as_ref()
                    .map_or(ptr::null(), |d| d.as_ptr() as *const libc::c_void),
            )
        };
        if rc != 0 {
            return Err(FsError::last_os_error("mount", &req.target));
        }
        Ok(())
    }

    fn read_dir_sync(&self, path: &Path) -> Result<Vec<OsString>, FsError> {
        trace!(path = %path.display(), "readdir");
        fs::read_dir(path)
            .map_err(fs_err("readdir", path))?
            .map(|entry| entry.map(|e| e.file_name()).map_err(fs_err("readdir", path)))
            .collect()
    }

    fn rmdir_sync(&self, path: &Path) -> Result<(), FsError> {
        trace!(path = %path.display(), "rmdir");
        fs::remove_dir(path).map_err(fs_err("rmdir", path))
    }
}
