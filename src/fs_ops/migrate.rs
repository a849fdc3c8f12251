//! Create a destination directory and move a mount onto it.

use std::path::Path;

use tracing::debug;

use super::Provisioner;
use crate::errors::FsError;
use crate::host::Host;

impl<H: Host> Provisioner<H> {
    /// Ensure `target` exists, then [`move_mount`](Provisioner::move_mount) from
    /// `source`. A creation failure other than "already exists" is final and the
    /// move is never attempted.
    pub fn mkdir_move<F>(&self, source: impl AsRef<Path>, target: impl AsRef<Path>, done: F)
    where
        F: FnOnce(Result<(), FsError>) + Send + 'static,
    {
        let source = source.as_ref().to_path_buf();
        let target = target.as_ref().to_path_buf();
        debug!(src = %source.display(), dest = %target.display(), "Migrating mount");

        let this = self.clone();
        let dir = target.clone();
        self.ensure_dir(&dir, move |res| {
            if let Err(e) = res {
                return done(Err(e));
            }
            this.move_mount(&source, &target, done);
        });
    }

    /// Blocking form of [`Provisioner::mkdir_move`].
    pub fn mkdir_move_sync(
        &self,
        source: impl AsRef<Path>,
        target: impl AsRef<Path>,
    ) -> Result<(), FsError> {
        let source = source.as_ref();
        let target = target.as_ref();
        debug!(src = %source.display(), dest = %target.display(), "Migrating mount");
        self.ensure_dir_sync(target)?;
        self.move_mount_sync(source, target)
    }
}
