//! Mount a filesystem unless the host marker says mounting is off.

use std::path::Path;

use tracing::{debug, warn};

use super::Provisioner;
use crate::errors::{ErrorCode, FsError};
use crate::host::{Host, MountOptions};

/// Outcome of the marker probe: `Ok(true)` means skip, `Ok(false)` means mount.
fn marker_says_skip(marker: &Path, probe: Result<(), FsError>) -> Result<bool, FsError> {
    match probe {
        Ok(()) => {
            warn!(marker = %marker.display(), "Marker file present; skipping mount");
            Ok(true)
        }
        Err(e) if e.code() == ErrorCode::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

impl<H: Host> Provisioner<H> {
    /// Mount `fstype` at `target`.
    ///
    /// Order: probe the marker, then [`mkdir_mount`](Provisioner::mkdir_mount).
    /// Marker present means success with nothing else done. A probe failure
    /// other than "not found" is reported as-is. The mount's own result is final.
    pub fn mount_fs<F>(
        &self,
        target: impl AsRef<Path>,
        fstype: Option<&str>,
        options: Option<MountOptions>,
        done: F,
    ) where
        F: FnOnce(Result<(), FsError>) + Send + 'static,
    {
        let target = target.as_ref().to_path_buf();
        let fstype = fstype.map(str::to_owned);
        let this = self.clone();
        debug!(target_path = %target.display(), ?fstype, "Mount requested");

        self.host.stat(
            &self.marker_path,
            Box::new(move |probe| {
                match marker_says_skip(&this.marker_path, probe) {
                    Ok(true) => return done(Ok(())),
                    Ok(false) => {}
                    Err(e) => return done(Err(e)),
                }
                this.mkdir_mount(&target, fstype.as_deref(), options, done);
            }),
        );
    }

    /// Blocking form of [`Provisioner::mount_fs`].
    pub fn mount_fs_sync(
        &self,
        target: impl AsRef<Path>,
        fstype: Option<&str>,
        options: Option<&MountOptions>,
    ) -> Result<(), FsError> {
        let target = target.as_ref();
        debug!(target_path = %target.display(), ?fstype, "Mount requested");
        if marker_says_skip(&self.marker_path, self.host.stat_sync(&self.marker_path))? {
            return Ok(());
        }
        self.mkdir_mount_sync(target, fstype, options)
    }
}
