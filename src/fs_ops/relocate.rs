//! Move a live mount to a new mount point and drop the emptied source directory.
//!
//! The move always runs before the emptiness check: the source directory is only
//! known to be empty once the mounted filesystem has been detached from it. A
//! source that still has entries after the move is left in place and the
//! operation still succeeds; nothing retries the cleanup later.

use std::path::Path;

use tracing::{debug, info};

use super::Provisioner;
use crate::errors::FsError;
use crate::host::{Host, MountRequest};

fn log_moved(source: &Path, dest: &Path) {
    info!(src = %source.display(), dest = %dest.display(), "Moved mount");
}

fn log_kept(source: &Path, entries: usize) {
    info!(
        src = %source.display(),
        entries,
        "Source directory not empty after move; leaving it in place"
    );
}

impl<H: Host> Provisioner<H> {
    /// Relocate the mount at `source` to `target`, then remove `source` if empty.
    pub fn move_mount<F>(&self, source: impl AsRef<Path>, target: impl AsRef<Path>, done: F)
    where
        F: FnOnce(Result<(), FsError>) + Send + 'static,
    {
        let source = source.as_ref().to_path_buf();
        let target = target.as_ref().to_path_buf();
        debug!(src = %source.display(), dest = %target.display(), "Moving mount");

        let req = MountRequest::relocate(&source, &target);
        let host = self.host.clone();
        self.host.mount(
            req,
            Box::new(move |res| {
                if let Err(e) = res {
                    return done(Err(e));
                }
                log_moved(&source, &target);
                let listed = source.clone();
                let cleanup = host.clone();
                host.read_dir(
                    &listed,
                    Box::new(move |listing| {
                        let entries = match listing {
                            Ok(entries) => entries,
                            Err(e) => return done(Err(e)),
                        };
                        if !entries.is_empty() {
                            log_kept(&source, entries.len());
                            return done(Ok(()));
                        }
                        debug!(src = %source.display(), "Removing emptied source directory");
                        cleanup.rmdir(&source, Box::new(done));
                    }),
                );
            }),
        );
    }

    /// Blocking form of [`Provisioner::move_mount`].
    pub fn move_mount_sync(
        &self,
        source: impl AsRef<Path>,
        target: impl AsRef<Path>,
    ) -> Result<(), FsError> {
        let source = source.as_ref();
        let target = target.as_ref();
        debug!(src = %source.display(), dest = %target.display(), "Moving mount");

        self.host.mount_sync(&MountRequest::relocate(source, target))?;
        log_moved(source, target);

        let entries = self.host.read_dir_sync(source)?;
        if entries.is_empty() {
            debug!(src = %source.display(), "Removing emptied source directory");
            self.host.rmdir_sync(source)?;
        } else {
            log_kept(source, entries.len());
        }
        Ok(())
    }
}
