//! User-facing console messages.
//! Colored `info:`/`warn:`/`error:`/`ok:` prefixes when stdout is a TTY, plain otherwise.

use owo_colors::OwoColorize;

use crate::errors::ErrorCode;

fn is_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

pub fn print_info(msg: &str) {
    if is_tty() {
        println!("{} {}", "info:".cyan().bold(), msg);
    } else {
        println!("info: {}", msg);
    }
}

pub fn print_warn(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {}", msg);
    }
}

pub fn print_error(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "error:".red().bold(), msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

/// Error line tagged with its classification, e.g. `error: [UNKNOWN] mount '/x': ...`.
pub fn print_fs_error(code: ErrorCode, msg: &str) {
    if is_tty() {
        eprintln!("{} [{}] {}", "error:".red().bold(), code.as_str().red(), msg);
    } else {
        eprintln!("error: [{}] {}", code, msg);
    }
}

pub fn print_success(msg: &str) {
    if is_tty() {
        println!("{} {}", "ok:".green().bold(), msg);
    } else {
        println!("ok: {}", msg);
    }
}
