//! User-facing diagnostics on stderr

use std::fmt;

use crate::color::{MaybePaint, ERROR_INDICATOR, ERROR_TEXT, WARNING_INDICATOR, WARNING_TEXT};

pub const DEFAULT_EXIT_CODE: i32 = 1;

pub fn fmt_error<T: fmt::Display>(f: &mut fmt::Formatter<'_>, text: T) -> fmt::Result {
    let text = text.to_string();

    write!(
        f,
        "{} {}",
        ERROR_INDICATOR.maybe_paint("error:"),
        ERROR_TEXT.maybe_paint(text.as_str())
    )
}

pub fn fmt_warn<T: fmt::Display>(f: &mut fmt::Formatter<'_>, text: T) -> fmt::Result {
    let text = text.to_string();

    write!(
        f,
        "{} {}",
        WARNING_INDICATOR.maybe_paint("warning:"),
        WARNING_TEXT.maybe_paint(text.as_str())
    )
}

struct Diagnostic<'a> {
    severity: Severity,
    text: &'a str,
}

#[derive(Clone, Copy)]
enum Severity {
    Error,
    Warn,
}

impl fmt::Display for Diagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.severity {
            Severity::Error => fmt_error(f, self.text),
            Severity::Warn => fmt_warn(f, self.text),
        }
    }
}

pub fn error_internal(text: &str) {
    eprintln!(
        "{}",
        Diagnostic {
            severity: Severity::Error,
            text
        }
    );
}

pub fn warn_internal(text: &str) {
    eprintln!(
        "{}",
        Diagnostic {
            severity: Severity::Warn,
            text
        }
    );
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => ({
        let formatted = format!($($arg)*);
        $crate::utils::errors::warn_internal(&formatted);
    })
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => ({
        let formatted = format!($($arg)*);
        $crate::utils::errors::error_internal(&formatted);
    })
}

#[macro_export]
macro_rules! die {
    ($($arg:tt)*) => ({
        let formatted = format!($($arg)*);
        $crate::utils::errors::error_internal(&formatted);
        ::std::process::exit($crate::utils::errors::DEFAULT_EXIT_CODE);
    })
}
