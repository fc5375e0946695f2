//! Compile-time configuration constants.
//!
//! Migrated from gnulib's `multibyte.h`/`mbbuffer.h` constants and from the
//! per-consumer defaults in `cut.c`/`fold.c`/`unorm.c` (LZ4-style: one file
//! collecting the magic numbers the original scattered across headers).

/// Maximum number of bytes a single multibyte sequence can occupy in the
/// locale's native encoding. Corresponds to glibc's `MB_LEN_MAX`.
///
/// UTF-8 sequences are at most 4 bytes; we use the same ceiling glibc does
/// so that buffer math matches the C source exactly.
pub const MB_LEN_MAX: usize = 16;

/// Default I/O block size used when the caller does not request a specific
/// buffer size and the platform's preferred block size is unavailable.
/// Corresponds to `BUFSIZ` as used by `mbbuf_init_file`.
pub const DEFAULT_BLOCK_SIZE: usize = 8192;

/// Default replacement code point for `unorm`'s *replace* policy.
/// Corresponds to the `unorm.c` default of `U+FFFD` (REPLACEMENT CHARACTER).
pub const DEFAULT_REPLACEMENT_CHAR: char = '\u{FFFD}';

/// Default recode format template for `unorm`'s *recode* policy.
pub const DEFAULT_RECODE_FORMAT: &str = "<0x%02x>";

/// Default line delimiter (`\n`), overridden to NUL by `-z`.
pub const DEFAULT_LINE_DELIM: u8 = b'\n';

/// Tab stop width used by the column wrapper. Corresponds to `fold.c`'s
/// hardcoded 8-column tab stops.
pub const TAB_WIDTH: usize = 8;

/// Default wrap width for `fold`/`fmt`. Corresponds to `fold.c`'s default of
/// 80 columns.
pub const DEFAULT_WIDTH: usize = 80;

/// Starting capacity for `bounded_read`'s geometric growth. Corresponds to
/// the initial allocation in `widetext.c`'s `grgetndelim2`.
pub const BOUNDED_READ_INITIAL_CAPACITY: usize = 64;
