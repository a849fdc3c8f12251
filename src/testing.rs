//! Scripted host for unit tests.
//!
//! Each primitive returns a preset outcome (success or an errno) and appends a
//! [`Call`] to a shared log. Completions built with [`ScriptedHost::done`] append
//! [`Call::Done`] to the same log, so tests can assert the exact order of
//! primitives and the final callback.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::errors::{ErrorCode, FsError};
use crate::host::{Completion, Host, MountRequest};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Mkdirp(PathBuf, u32),
    Stat(PathBuf),
    Mount(MountRequest),
    ReadDir(PathBuf),
    Rmdir(PathBuf),
    /// The operation's completion fired with this outcome (`None` = success).
    Done(Option<ErrorCode>),
}

#[derive(Debug, Default)]
pub struct ScriptedHost {
    calls: Mutex<Vec<Call>>,
    mkdirp_errno: Option<i32>,
    stat_errno: Option<i32>,
    mount_errno: Option<i32>,
    listing: Vec<OsString>,
    read_dir_errno: Option<i32>,
    rmdir_errno: Option<i32>,
}

impl ScriptedHost {
    /// Every primitive succeeds; the marker probe finds nothing (ENOENT).
    pub fn new() -> Self {
        Self {
            stat_errno: Some(libc::ENOENT),
            ..Default::default()
        }
    }

    pub fn mkdirp_fails(mut self, errno: i32) -> Self {
        self.mkdirp_errno = Some(errno);
        self
    }

    pub fn marker_present(mut self) -> Self {
        self.stat_errno = None;
        self
    }

    pub fn stat_fails(mut self, errno: i32) -> Self {
        self.stat_errno = Some(errno);
        self
    }

    pub fn mount_fails(mut self, errno: i32) -> Self {
        self.mount_errno = Some(errno);
        self
    }

    pub fn listing(mut self, names: &[&str]) -> Self {
        self.listing = names.iter().map(OsString::from).collect();
        self
    }

    pub fn read_dir_fails(mut self, errno: i32) -> Self {
        self.read_dir_errno = Some(errno);
        self
    }

    pub fn rmdir_fails(mut self, errno: i32) -> Self {
        self.rmdir_errno = Some(errno);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// How many times the completion fired.
    pub fn done_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Done(_)))
            .count()
    }

    /// A completion that records its outcome in the call log.
    pub fn done(self: &Arc<Self>) -> impl FnOnce(Result<(), FsError>) + Send + 'static {
        let host = Arc::clone(self);
        move |res: Result<(), FsError>| host.record(Call::Done(res.err().map(|e| e.code())))
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn outcome(op: &'static str, path: &Path, errno: Option<i32>) -> Result<(), FsError> {
        match errno {
            Some(code) => Err(FsError::from_raw_os_error(op, path, code)),
            None => Ok(()),
        }
    }
}

impl Host for ScriptedHost {
    fn mkdirp_sync(&self, path: &Path, mode: u32) -> Result<(), FsError> {
        self.record(Call::Mkdirp(path.to_path_buf(), mode));
        Self::outcome("mkdirp", path, self.mkdirp_errno)
    }

    fn stat_sync(&self, path: &Path) -> Result<(), FsError> {
        self.record(Call::Stat(path.to_path_buf()));
        Self::outcome("stat", path, self.stat_errno)
    }

    fn mount_sync(&self, req: &MountRequest) -> Result<(), FsError> {
        self.record(Call::Mount(req.clone()));
        Self::outcome("mount", &req.target, self.mount_errno)
    }

    fn read_dir_sync(&self, path: &Path) -> Result<Vec<OsString>, FsError> {
        self.record(Call::ReadDir(path.to_path_buf()));
        Self::outcome("readdir", path, self.read_dir_errno).map(|_| self.listing.clone())
    }

    fn rmdir_sync(&self, path: &Path) -> Result<(), FsError> {
        self.record(Call::Rmdir(path.to_path_buf()));
        Self::outcome("rmdir", path, self.rmdir_errno)
    }
}

/// Host whose completion forms park the continuation instead of finishing
/// inline; `step()` resumes the oldest one. Lets tests check that an operation
/// issues nothing new until the previous primitive completes.
#[derive(Default)]
pub struct DeferredHost {
    inner: ScriptedHost,
    parked: Mutex<Vec<Box<dyn FnOnce() + Send>>>,
}

impl DeferredHost {
    pub fn new(inner: ScriptedHost) -> Self {
        Self {
            inner,
            parked: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.calls()
    }

    pub fn pending(&self) -> usize {
        self.parked.lock().unwrap().len()
    }

    /// Resume the oldest parked completion. Returns false when nothing is parked.
    pub fn step(&self) -> bool {
        let next = {
            let mut parked = self.parked.lock().unwrap();
            if parked.is_empty() {
                return false;
            }
            parked.remove(0)
        };
        next();
        true
    }

    fn park<T: Send + 'static>(&self, res: Result<T, FsError>, done: Completion<T>) {
        self.parked.lock().unwrap().push(Box::new(move || done(res)));
    }

    pub fn done(self: &Arc<Self>) -> impl FnOnce(Result<(), FsError>) + Send + 'static {
        let host = Arc::clone(self);
        move |res: Result<(), FsError>| host.inner.record(Call::Done(res.err().map(|e| e.code())))
    }
}

impl Host for DeferredHost {
    fn mkdirp_sync(&self, path: &Path, mode: u32) -> Result<(), FsError> {
        self.inner.mkdirp_sync(path, mode)
    }
    fn stat_sync(&self, path: &Path) -> Result<(), FsError> {
        self.inner.stat_sync(path)
    }
    fn mount_sync(&self, req: &MountRequest) -> Result<(), FsError> {
        self.inner.mount_sync(req)
    }
    fn read_dir_sync(&self, path: &Path) -> Result<Vec<OsString>, FsError> {
        self.inner.read_dir_sync(path)
    }
    fn rmdir_sync(&self, path: &Path) -> Result<(), FsError> {
        self.inner.rmdir_sync(path)
    }

    fn mkdirp(&self, path: &Path, mode: u32, done: Completion<()>) {
        self.park(self.inner.mkdirp_sync(path, mode), done)
    }
    fn stat(&self, path: &Path, done: Completion<()>) {
        self.park(self.inner.stat_sync(path), done)
    }
    fn mount(&self, req: MountRequest, done: Completion<()>) {
        self.park(self.inner.mount_sync(&req), done)
    }
    fn read_dir(&self, path: &Path, done: Completion<Vec<OsString>>) {
        self.park(self.inner.read_dir_sync(path), done)
    }
    fn rmdir(&self, path: &Path, done: Completion<()>) {
        self.park(self.inner.rmdir_sync(path), done)
    }
}
