//! Application orchestrator.
//! Loads/merges config, initializes logging, and runs one provisioning operation
//! in either the completion or the blocking form.
//!
//! Operation failures are reported here with their code and turned into a
//! failing exit status; setup errors are returned for `main` to print.

use anyhow::{bail, Context, Result};
use std::process::ExitCode;
use std::sync::mpsc;
use tracing::{debug, error};

use bootmount::cli::{Args, Command};
use bootmount::logging::{init_tracing, LogFormat};
use bootmount::output as out;
use bootmount::{default_config_path, load_config, FsError, Provisioner};

/// Run the CLI application.
pub fn run(args: Args) -> Result<ExitCode> {
    // Handle --print-config before logging init
    if args.print_config {
        let p = default_config_path();
        out::print_info(&format!("bootmount config path:\n  {}\n", p.display()));
        if p.exists() {
            out::print_info("A config file exists at that location.");
        } else {
            out::print_info("No config file there; built-in defaults apply.");
        }
        return Ok(ExitCode::SUCCESS);
    }

    let mut cfg = load_config().context("Failed to load config")?;
    args.apply_overrides(&mut cfg);
    cfg.validate().context("Invalid configuration")?;

    let format = LogFormat::from_json_flag(args.json);
    let _guard = init_tracing(&cfg.log_level, cfg.log_file.as_deref(), format)
        .context("Failed to initialize logging")?;

    let Some(command) = args.command.clone() else {
        bail!("No command given; see --help.");
    };
    debug!(?command, sync = args.sync, "Starting bootmount");

    let provisioner = Provisioner::from_config(&cfg);
    let result = if args.sync {
        run_blocking(&provisioner, &command)
    } else {
        run_with_completion(&provisioner, &command)?
    };

    match result {
        Ok(()) => {
            out::print_success(&describe(&command));
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            let code = e.code();
            error!(%code, op = e.op(), path = %e.path().display(), "Operation failed");
            out::print_fs_error(code, &e.to_string());
            Ok(ExitCode::FAILURE)
        }
    }
}

fn run_blocking(p: &Provisioner, command: &Command) -> Result<(), FsError> {
    match command {
        Command::Mkdir { path } => p.ensure_dir_sync(path),
        Command::Mount { target, fstype, .. } => {
            let options = command.mount_options();
            p.mount_fs_sync(target, fstype.as_deref(), options.as_ref())
        }
        Command::MkdirMount { target, fstype, .. } => {
            let options = command.mount_options();
            p.mkdir_mount_sync(target, fstype.as_deref(), options.as_ref())
        }
        Command::Move { source, target } => p.move_mount_sync(source, target),
        Command::MkdirMove { source, target } => p.mkdir_move_sync(source, target),
    }
}

/// Drive the completion form and wait for its single report.
fn run_with_completion(p: &Provisioner, command: &Command) -> Result<Result<(), FsError>> {
    let (tx, rx) = mpsc::channel();
    let done = move |res: Result<(), FsError>| {
        let _ = tx.send(res);
    };
    match command {
        Command::Mkdir { path } => p.ensure_dir(path, done),
        Command::Mount { target, fstype, .. } => {
            p.mount_fs(target, fstype.as_deref(), command.mount_options(), done)
        }
        Command::MkdirMount { target, fstype, .. } => {
            p.mkdir_mount(target, fstype.as_deref(), command.mount_options(), done)
        }
        Command::Move { source, target } => p.move_mount(source, target, done),
        Command::MkdirMove { source, target } => p.mkdir_move(source, target, done),
    }
    rx.recv().context("operation finished without reporting a result")
}

fn describe(command: &Command) -> String {
    match command {
        Command::Mkdir { path } => format!("directory ready: {}", path.display()),
        Command::Mount { target, fstype, .. } | Command::MkdirMount { target, fstype, .. } => format!(
            "mount ready: {} ({})",
            target.display(),
            fstype.as_deref().unwrap_or("none")
        ),
        Command::Move { source, target } | Command::MkdirMove { source, target } => {
            format!("moved mount {} -> {}", source.display(), target.display())
        }
    }
}
