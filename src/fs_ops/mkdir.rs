//! Ensure a directory exists.

use std::path::Path;

use tracing::debug;

use super::Provisioner;
use crate::errors::{ErrorCode, FsError};
use crate::host::Host;

/// Swallow "already exists"; everything else passes through unchanged.
pub(super) fn tolerate_existing(path: &Path, res: Result<(), FsError>) -> Result<(), FsError> {
    match res {
        Err(e) if e.code() == ErrorCode::AlreadyExists => {
            debug!(path = %path.display(), "Directory already exists");
            Ok(())
        }
        other => other,
    }
}

impl<H: Host> Provisioner<H> {
    /// Create `path` and missing ancestors with the configured mode.
    /// `done` fires once; an existing entry counts as success.
    pub fn ensure_dir<F>(&self, path: impl AsRef<Path>, done: F)
    where
        F: FnOnce(Result<(), FsError>) + Send + 'static,
    {
        let path = path.as_ref().to_path_buf();
        debug!(path = %path.display(), mode = %format!("{:04o}", self.dir_mode), "Ensuring directory");
        let shown = path.clone();
        self.host.mkdirp(
            &path,
            self.dir_mode,
            Box::new(move |res| done(tolerate_existing(&shown, res))),
        );
    }

    /// Blocking form of [`Provisioner::ensure_dir`].
    pub fn ensure_dir_sync(&self, path: impl AsRef<Path>) -> Result<(), FsError> {
        let path = path.as_ref();
        debug!(path = %path.display(), mode = %format!("{:04o}", self.dir_mode), "Ensuring directory");
        tolerate_existing(path, self.host.mkdirp_sync(path, self.dir_mode))
    }
}
