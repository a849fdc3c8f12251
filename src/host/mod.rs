//! Host primitives.
//!
//! The provisioning operations never touch the OS directly; they go through
//! [`Host`], which exposes each primitive in a blocking form (`*_sync`) and a
//! completion form. The completion form defaults to running the blocking call and
//! completing inline, which is what [`LinuxHost`] does. A host driven by an event
//! loop can override the completion forms and finish later on another context;
//! the operations only ever resume from the completion.

mod linux;

pub use linux::LinuxHost;

use std::ffi::OsString;
use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::errors::FsError;

/// Completion handler for a host primitive or a provisioning operation.
pub type Completion<T> = Box<dyn FnOnce(Result<T, FsError>) + Send + 'static>;

/// Bitmask of `MS_*` mount flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct MountFlags(libc::c_ulong);

impl MountFlags {
    pub const EMPTY: MountFlags = MountFlags(0);
    /// Relocate an existing mount (MS_MOVE).
    pub const MOVE: MountFlags = MountFlags(libc::MS_MOVE);

    const NAMED: &'static [(&'static str, libc::c_ulong)] = &[
        ("rdonly", libc::MS_RDONLY),
        ("ro", libc::MS_RDONLY),
        ("nosuid", libc::MS_NOSUID),
        ("nodev", libc::MS_NODEV),
        ("noexec", libc::MS_NOEXEC),
        ("sync", libc::MS_SYNCHRONOUS),
        ("remount", libc::MS_REMOUNT),
        ("bind", libc::MS_BIND),
        ("rec", libc::MS_REC),
        ("relatime", libc::MS_RELATIME),
        ("noatime", libc::MS_NOATIME),
        ("move", libc::MS_MOVE),
    ];

    pub const fn from_bits(bits: libc::c_ulong) -> Self {
        MountFlags(bits)
    }

    pub const fn bits(&self) -> libc::c_ulong {
        self.0
    }

    pub fn contains(&self, other: MountFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl BitOr for MountFlags {
    type Output = MountFlags;
    fn bitor(self, rhs: MountFlags) -> MountFlags {
        MountFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for MountFlags {
    fn bitor_assign(&mut self, rhs: MountFlags) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for MountFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Parses a comma-separated list of flag names, e.g. `nosuid,nodev,noexec`.
impl FromStr for MountFlags {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut flags = MountFlags::EMPTY;
        for name in s.split(',').map(str::trim).filter(|n| !n.is_empty()) {
            let lower = name.to_ascii_lowercase();
            let bits = Self::NAMED
                .iter()
                .find(|(n, _)| *n == lower)
                .map(|(_, b)| *b)
                .ok_or_else(|| format!("unknown mount flag: '{name}'"))?;
            flags |= MountFlags(bits);
        }
        Ok(flags)
    }
}

/// Optional knobs for a plain mount. Everything defaults to none.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MountOptions {
    /// Filesystem-specific data string (e.g. `size=64m,mode=0755`)
    pub data: Option<String>,
    /// Mount flags
    pub flags: Option<MountFlags>,
    /// Source device or existing mount to act on
    pub dev_file: Option<PathBuf>,
}

impl MountOptions {
    /// The fixed option shape used to relocate the mount at `source`.
    pub fn relocate_from(source: impl Into<PathBuf>) -> Self {
        Self {
            dev_file: Some(source.into()),
            ..Default::default()
        }
    }
}

/// Fully resolved arguments for one mount(2) call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountRequest {
    pub source: PathBuf,
    pub target: PathBuf,
    pub fstype: Option<String>,
    pub flags: MountFlags,
    pub data: Option<String>,
}

impl MountRequest {
    /// A plain mount of `fstype` at `target`.
    ///
    /// The source is the options' dev file when given, otherwise the type name
    /// (`mount -t proc proc /proc`), otherwise `none`.
    pub fn plain(target: &Path, fstype: Option<&str>, options: Option<&MountOptions>) -> Self {
        let options = options.cloned().unwrap_or_default();
        let source = options
            .dev_file
            .unwrap_or_else(|| PathBuf::from(fstype.unwrap_or("none")));
        Self {
            source,
            target: target.to_path_buf(),
            fstype: fstype.map(str::to_owned),
            flags: options.flags.unwrap_or_default(),
            data: options.data,
        }
    }

    /// Move the mount at `source` to `target`: `{ dev_file: source }` plus MS_MOVE.
    pub fn relocate(source: &Path, target: &Path) -> Self {
        let options = MountOptions {
            flags: Some(MountFlags::MOVE),
            ..MountOptions::relocate_from(source)
        };
        Self::plain(target, None, Some(&options))
    }
}

/// OS primitives consumed by the provisioning operations.
pub trait Host: Send + Sync + 'static {
    /// Create `path` and any missing ancestors with `mode`.
    fn mkdirp_sync(&self, path: &Path, mode: u32) -> Result<(), FsError>;

    /// Succeeds when `path` exists.
    fn stat_sync(&self, path: &Path) -> Result<(), FsError>;

    fn mount_sync(&self, req: &MountRequest) -> Result<(), FsError>;

    /// Entry names of the directory at `path`.
    fn read_dir_sync(&self, path: &Path) -> Result<Vec<OsString>, FsError>;

    /// Remove the empty directory at `path`.
    fn rmdir_sync(&self, path: &Path) -> Result<(), FsError>;

    fn mkdirp(&self, path: &Path, mode: u32, done: Completion<()>) {
        done(self.mkdirp_sync(path, mode))
    }

    fn stat(&self, path: &Path, done: Completion<()>) {
        done(self.stat_sync(path))
    }

    fn mount(&self, req: MountRequest, done: Completion<()>) {
        done(self.mount_sync(&req))
    }

    fn read_dir(&self, path: &Path, done: Completion<Vec<OsString>>) {
        done(self.read_dir_sync(path))
    }

    fn rmdir(&self, path: &Path, done: Completion<()>) {
        done(self.rmdir_sync(path))
    }
}
