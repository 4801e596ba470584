//! Console output switches and the macros every module prints through.
//!
//! Progress and report lines go to stdout and respect `--quiet`; errors go to
//! stderr and are always shown.

use crate::constants::{ERROR_PREFIX, WARNING_PREFIX};
use std::sync::atomic::{AtomicBool, Ordering};

static QUIET_MODE: AtomicBool = AtomicBool::new(false);
static VERBOSE_MODE: AtomicBool = AtomicBool::new(false);

/// Per-file lines sit under their `[i/N] Processing:` header.
pub const FILE_INDENT: &str = "  ";

pub fn set_quiet_mode(quiet: bool) {
    QUIET_MODE.store(quiet, Ordering::Relaxed);
}

pub fn set_verbose_mode(verbose: bool) {
    VERBOSE_MODE.store(verbose, Ordering::Relaxed);
}

pub fn is_quiet() -> bool {
    QUIET_MODE.load(Ordering::Relaxed)
}

pub fn is_verbose() -> bool {
    VERBOSE_MODE.load(Ordering::Relaxed)
}

pub fn format_error(message: &str) -> String {
    format!("{} {}", ERROR_PREFIX, message)
}

/// `  ❌ Error: <message>`, aligned with the other lines of a file's block.
pub fn format_file_error(message: &str) -> String {
    format!("{}{}", FILE_INDENT, format_error(&format!("Error: {}", message)))
}

pub fn format_warning(message: &str) -> String {
    format!("{}  {}", WARNING_PREFIX, message)
}

pub fn format_verbose(message: &str) -> String {
    format!("{}🔍 {}", FILE_INDENT, message)
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        if !$crate::logger::is_quiet() {
            println!($($arg)*);
        }
    };
}

#[macro_export]
macro_rules! verbose {
    ($($arg:tt)*) => {
        if $crate::logger::is_verbose() && !$crate::logger::is_quiet() {
            println!("{}", $crate::logger::format_verbose(&format!($($arg)*)));
        }
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        eprintln!("{}", $crate::logger::format_error(&format!($($arg)*)));
    };
}

/// Failure of a single file inside the batch report.
#[macro_export]
macro_rules! file_error {
    ($($arg:tt)*) => {
        eprintln!("{}", $crate::logger::format_file_error(&format!($($arg)*)));
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        if !$crate::logger::is_quiet() {
            eprintln!("{}", $crate::logger::format_warning(&format!($($arg)*)));
        }
    };
}
