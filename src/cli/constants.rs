//! Verbosity-gated diagnostic macros shared by the three consumer binaries.
//!
//! Rust port of `lz4cli.c`'s `DISPLAY`/`DISPLAYLEVEL` pattern
//! (`cli::constants` in the teacher crate): a global atomic level plus
//! macros that gate `eprint!`/`print!` calls on it, rather than a
//! `log`/`tracing` subscriber — matching how GNU-coreutils-style tools gate
//! `-v` output.

use std::sync::atomic::{AtomicU32, Ordering};

/// 0 = silent, 1 = errors only (default), 2 = verbose (`-v`).
pub static DISPLAY_LEVEL: AtomicU32 = AtomicU32::new(1);

#[inline]
pub fn display_level() -> u32 {
    DISPLAY_LEVEL.load(Ordering::Relaxed)
}

#[inline]
pub fn set_display_level(level: u32) {
    DISPLAY_LEVEL.store(level, Ordering::Relaxed);
}

/// Print to stderr unconditionally — equivalent to C `DISPLAY(...)`.
#[macro_export]
macro_rules! display {
    ($($arg:tt)*) => { eprint!($($arg)*) };
}

/// Print to stderr only at or above the configured verbosity level —
/// equivalent to C `DISPLAYLEVEL(l, ...)`.
#[macro_export]
macro_rules! displaylevel {
    ($level:expr, $($arg:tt)*) => {
        if $crate::cli::constants::display_level() >= $level {
            eprint!($($arg)*);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_level_is_one() {
        // Other tests in this binary may mutate the global; only assert it
        // reads back whatever was last stored.
        set_display_level(1);
        assert_eq!(display_level(), 1);
        set_display_level(2);
        assert_eq!(display_level(), 2);
    }
}
