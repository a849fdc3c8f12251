//! Tracing setup for the binary.
//!
//! One level from [`LogLevel`], one layer builder shared by the console (stderr)
//! and the optional log file. The console shows level, message and the
//! operation fields (`path`, `src`, `dest`, `target_path`, `code`, `op`); the
//! file additionally records the emitting module and never carries ANSI codes.
//! A log file behind a symlinked ancestor is refused and logging stays on
//! stderr.

use anyhow::Result;
use chrono::Local;
use std::fmt as stdfmt;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::{self as tsfmt, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{registry, Layer, Registry};

use crate::config::{path_has_symlink_ancestor, LogLevel};
use crate::output as out;

/// Wall-clock stamp with milliseconds; boot steps often land in the same second.
struct BootClock;

impl FormatTime for BootClock {
    fn format_time(&self, w: &mut Writer<'_>) -> stdfmt::Result {
        write!(w, "{}", Local::now().format("%H:%M:%S%.3f"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

impl LogFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json { LogFormat::Json } else { LogFormat::Compact }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sink {
    Console,
    File,
}

/// Program level to tracing level; each step is one notch more verbose.
pub fn to_level_filter(lvl: &LogLevel) -> LevelFilter {
    match lvl {
        LogLevel::Quiet => LevelFilter::ERROR,
        LogLevel::Normal => LevelFilter::INFO,
        LogLevel::Info => LevelFilter::DEBUG,
        LogLevel::Debug => LevelFilter::TRACE,
    }
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

fn fmt_layer<W>(format: LogFormat, sink: Sink, writer: W, level: LevelFilter) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let filter = EnvFilter::default().add_directive(level.into());
    let ansi = sink == Sink::Console && atty::is(atty::Stream::Stderr);
    let layer = tsfmt::layer()
        .with_writer(writer)
        .with_timer(BootClock)
        .with_target(sink == Sink::File)
        .with_ansi(ansi);
    match format {
        LogFormat::Json => layer.json().flatten_event(true).with_filter(filter).boxed(),
        LogFormat::Compact => layer.compact().with_filter(filter).boxed(),
    }
}

/// Open the log file for appending. A newly created file gets 0600; an existing
/// one keeps its permissions.
pub fn open_log_file_secure_append(path: &Path) -> io::Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .mode(0o600)
        .open(path)
}

/// Non-blocking writer for `path`, or the reason file logging is off.
fn file_sink(path: &Path) -> Result<(NonBlocking, WorkerGuard), String> {
    match path_has_symlink_ancestor(path) {
        Ok(false) => {}
        Ok(true) => return Err("an ancestor directory is a symlink".into()),
        Err(e) => return Err(format!("cannot inspect path: {e}")),
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| format!("cannot create parent: {e}"))?;
    }
    let file = open_log_file_secure_append(path).map_err(|e| format!("cannot open: {e}"))?;
    Ok(tracing_appender::non_blocking(file))
}

/// Install the global subscriber. The returned guard flushes the file sink on
/// drop and must be held until the program exits.
pub fn init_tracing(
    lvl: &LogLevel,
    log_file: Option<&Path>,
    format: LogFormat,
) -> Result<Option<WorkerGuard>> {
    let level = to_level_filter(lvl);
    let mut layers = vec![fmt_layer(format, Sink::Console, io::stderr, level)];

    let guard = match log_file.map(|p| (p, file_sink(p))) {
        Some((_, Ok((writer, guard)))) => {
            layers.push(fmt_layer(format, Sink::File, writer, level));
            Some(guard)
        }
        Some((path, Err(reason))) => {
            out::print_warn(&format!(
                "File logging to '{}' disabled ({reason}); logging to stderr only.",
                path.display()
            ));
            None
        }
        None => None,
    };

    registry().with(layers).try_init()?;
    Ok(guard)
}
