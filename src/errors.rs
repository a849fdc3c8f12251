//! Typed error definitions for bootmount.
//!
//! Every failure reported by a host primitive is an [`FsError`]. Policy code never
//! looks at raw errno values directly; it asks for the [`ErrorCode`] classification
//! and decides whether to swallow or propagate based on that alone.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::fs_ops::helpers::build_message;

/// Classification of an OS failure. Exactly one tag per error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// EEXIST: entry already exists
    AlreadyExists,
    /// ENOENT: no such entry
    NotFound,
    /// Anything else, including errors with no OS code
    Unknown,
}

impl ErrorCode {
    /// Map a raw platform error number to its classification.
    pub fn from_raw_os_error(code: i32) -> Self {
        match code {
            libc::EEXIST => ErrorCode::AlreadyExists,
            libc::ENOENT => ErrorCode::NotFound,
            _ => ErrorCode::Unknown,
        }
    }

    /// Classify an `io::Error`.
    ///
    /// The raw OS code wins when present. Synthetic errors (no OS code) fall back to
    /// their `ErrorKind`, so `io::Error::from(ErrorKind::NotFound)` is still `NotFound`.
    pub fn classify(e: &io::Error) -> Self {
        match e.raw_os_error() {
            Some(code) => Self::from_raw_os_error(code),
            None => match e.kind() {
                io::ErrorKind::AlreadyExists => ErrorCode::AlreadyExists,
                io::ErrorKind::NotFound => ErrorCode::NotFound,
                _ => ErrorCode::Unknown,
            },
        }
    }

    /// Symbolic name used in logs and CLI output.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::AlreadyExists => "EEXIST",
            ErrorCode::NotFound => "ENOENT",
            ErrorCode::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed host primitive: which operation, on which path, and the OS error.
#[derive(Debug, Error)]
#[error("{}", build_message(self.op, &self.path, &self.source))]
pub struct FsError {
    op: &'static str,
    path: PathBuf,
    #[source]
    source: io::Error,
}

impl FsError {
    pub fn new(op: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self {
            op,
            path: path.into(),
            source,
        }
    }

    /// Build from a raw errno, as a host that talks to libc directly would.
    pub fn from_raw_os_error(op: &'static str, path: impl Into<PathBuf>, code: i32) -> Self {
        Self::new(op, path, io::Error::from_raw_os_error(code))
    }

    /// Build from `errno` right after a failed libc call.
    pub fn last_os_error(op: &'static str, path: impl Into<PathBuf>) -> Self {
        Self::new(op, path, io::Error::last_os_error())
    }

    pub fn code(&self) -> ErrorCode {
        ErrorCode::classify(&self.source)
    }

    pub fn op(&self) -> &'static str {
        self.op
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn raw_os_error(&self) -> Option<i32> {
        self.source.raw_os_error()
    }

    pub fn io_error(&self) -> &io::Error {
        &self.source
    }
}

/// Adapter for `.map_err(...)` on `io::Result` values coming from a named primitive.
pub fn fs_err<'a>(op: &'static str, path: &'a Path) -> impl FnOnce(io::Error) -> FsError + 'a {
    move |e| FsError::new(op, path, e)
}
