//! Create a mount point and mount onto it, with no marker check.

use std::path::Path;

use tracing::{debug, info};

use super::Provisioner;
use crate::errors::FsError;
use crate::host::{Host, MountOptions, MountRequest};

fn log_mounted(req: &MountRequest) {
    info!(
        target_path = %req.target.display(),
        fstype = req.fstype.as_deref().unwrap_or("none"),
        flags = %req.flags,
        "Mounted filesystem"
    );
}

impl<H: Host> Provisioner<H> {
    /// Ensure `target` exists, then mount `fstype` on it.
    ///
    /// Unlike [`mount_fs`](Provisioner::mount_fs) the marker file is never
    /// consulted. A creation failure other than "already exists" is final.
    pub fn mkdir_mount<F>(
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
        debug!(target_path = %target.display(), ?fstype, "Creating mount point");

        let host = self.host.clone();
        let dir = target.clone();
        self.ensure_dir(&dir, move |res| {
            if let Err(e) = res {
                return done(Err(e));
            }
            let req = MountRequest::plain(&target, fstype.as_deref(), options.as_ref());
            let logged = req.clone();
            host.mount(
                req,
                Box::new(move |res| {
                    if res.is_ok() {
                        log_mounted(&logged);
                    }
                    done(res)
                }),
            );
        });
    }

    /// Blocking form of [`Provisioner::mkdir_mount`].
    pub fn mkdir_mount_sync(
        &self,
        target: impl AsRef<Path>,
        fstype: Option<&str>,
        options: Option<&MountOptions>,
    ) -> Result<(), FsError> {
        let target = target.as_ref();
        debug!(target_path = %target.display(), ?fstype, "Creating mount point");
        self.ensure_dir_sync(target)?;
        let req = MountRequest::plain(target, fstype, options);
        self.host.mount_sync(&req)?;
        log_mounted(&req);
        Ok(())
    }
}
