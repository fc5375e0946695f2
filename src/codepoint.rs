//! Code-point classification, surrogate-pair handling, and locale probes.
//!
//! Rust port of the scalar-value helpers in gnulib's `gl/lib/multibyte.c`
//! and the `HAVE_UTF16_SURROGATES` branch documented in `mbbuffer.h`: on a
//! platform whose native wide-character type is 16 bits (the only real-world
//! case is Windows/Cygwin, where `wchar_t == uint16_t`), a single Unicode
//! scalar outside the Basic Multilingual Plane is produced by the platform
//! decoder as two code units (a surrogate pair) that must be joined before
//! the rest of this crate ever sees them.
//!
//! Rust's `char` already guarantees "a valid Unicode scalar value, never a
//! lone surrogate," so everything past [`decode_next_utf16_joining`] gets
//! that invariant for free from the type system — no `#ifdef`-equivalent is
//! threaded through the decoder or either consumer (distilled spec §9).

use std::sync::OnceLock;

/// `true` iff `c` lies in the supplementary planes (`0x10000..=0x10FFFF`).
#[inline]
#[must_use]
pub const fn is_supplementary(c: u32) -> bool {
    c >= 0x1_0000 && c <= 0x10_FFFF
}

/// `true` iff `c` lies in the surrogate range `0xD800..=0xDFFF`.
#[inline]
#[must_use]
pub const fn is_surrogate(c: u32) -> bool {
    c >= 0xD800 && c <= 0xDFFF
}

/// `true` iff `c` is a high (lead) surrogate, `0xD800..=0xDBFF`.
#[inline]
#[must_use]
pub const fn is_surrogate_high(c: u32) -> bool {
    c >= 0xD800 && c <= 0xDBFF
}

/// `true` iff `c` is a low (trail) surrogate, `0xDC00..=0xDFFF`.
#[inline]
#[must_use]
pub const fn is_surrogate_low(c: u32) -> bool {
    c >= 0xDC00 && c <= 0xDFFF
}

/// Combine a high/low surrogate pair into one supplementary scalar value.
///
/// No validation is performed: callers must have already established that
/// `h` is a high surrogate and `l` a low surrogate (see
/// [`decode_next_utf16_joining`]).
#[inline]
#[must_use]
pub const fn combine_surrogates(h: u32, l: u32) -> u32 {
    0x1_0000 + ((h - 0xD800) << 10) + (l - 0xDC00)
}

/// Split a supplementary scalar value into its high/low surrogate pair.
///
/// Results are undefined (not panicking, just meaningless) if `c < 0x10000`;
/// callers are expected to guard with [`is_supplementary`] first, mirroring
/// the C source's lack of a precondition check here.
#[inline]
#[must_use]
pub const fn split_surrogates(c: u32) -> (u32, u32) {
    let v = c - 0x1_0000;
    let h = 0xD800 + (v >> 10);
    let l = 0xDC00 + (v & 0x3FF);
    (h, l)
}

/// Result of [`decode_next_utf16_joining`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinResult {
    /// A complete scalar value was decoded, consuming `units` 16-bit code
    /// units (1 for a non-surrogate or standalone BMP value, 2 for a
    /// successfully joined surrogate pair).
    Scalar { value: u32, units: usize },
    /// The input could not be joined into a scalar value (a lone low
    /// surrogate, or a high surrogate not followed by a low surrogate).
    Invalid,
}

/// Decode one scalar value from a sequence of native 16-bit code units,
/// joining a high+low surrogate pair into one code point.
///
/// Used only on platforms where [`can_decode_to_surrogate_pair`] is true —
/// i.e. where the native wide-character decoder hands back one code unit at
/// a time and supplementary characters arrive as two units. On platforms
/// whose native wide-character type already carries full scalar values this
/// function is never called; the native decode step is used directly
/// (distilled spec §4.1, "alias for the native decode step").
#[must_use]
pub fn decode_next_utf16_joining(units: &[u16]) -> JoinResult {
    let Some(&first) = units.first() else {
        return JoinResult::Invalid;
    };
    let first = u32::from(first);

    if is_surrogate_low(first) {
        return JoinResult::Invalid;
    }
    if !is_surrogate_high(first) {
        return JoinResult::Scalar {
            value: first,
            units: 1,
        };
    }
    // `first` is a high surrogate: require one more unit, and it must be low.
    let Some(&second) = units.get(1) else {
        return JoinResult::Invalid;
    };
    let second = u32::from(second);
    if !is_surrogate_low(second) {
        return JoinResult::Invalid;
    }
    JoinResult::Scalar {
        value: combine_surrogates(first, second),
        units: 2,
    }
}

// ── Platform probes ──────────────────────────────────────────────────────────
//
// Each probe is a constant function of the process's locale, computed once
// and cached in a `OnceLock` — the idiomatic-Rust equivalent of the C
// sources' file-scope statics initialized on first use.

static USES_MULTIBYTE: OnceLock<bool> = OnceLock::new();
static LOCALE_LOOKS_LIKE_UTF8: OnceLock<bool> = OnceLock::new();
static CAN_DECODE_SURROGATE_PAIR: OnceLock<bool> = OnceLock::new();

/// `true` if the current locale's encoding can require more than one byte
/// per character. Corresponds to checking `MB_CUR_MAX > 1`.
#[must_use]
pub fn uses_multibyte() -> bool {
    *USES_MULTIBYTE.get_or_init(|| platform::mb_cur_max() > 1)
}

/// `true` iff the current `LC_CTYPE` value's suffix (after the last `.`) is
/// one of `UTF-8`, `UTF8`, `utf-8`, `utf8`.
#[must_use]
pub fn locale_looks_like_utf8() -> bool {
    *LOCALE_LOOKS_LIKE_UTF8.get_or_init(|| {
        let Some(name) = platform::lc_ctype_name() else {
            // No locale information available (e.g. the probe is
            // unsupported on this target): assume UTF-8, the only encoding
            // this crate natively decodes without the surrogate-join path.
            return true;
        };
        match name.rsplit('.').next() {
            Some(suffix) => matches!(suffix, "UTF-8" | "UTF8" | "utf-8" | "utf8"),
            None => false,
        }
    })
}

/// The detected `LC_CTYPE` locale name, for diagnostics (e.g. the
/// normalizer's pre-flight locale check). `None` if the platform probe is
/// unsupported.
#[must_use]
pub fn detected_locale() -> Option<String> {
    platform::lc_ctype_name()
}

/// `true` iff the native wide-character decoder emits a surrogate pair for a
/// supplementary character (true on 16-bit-wide-character platforms; false
/// everywhere Rust's `char` already spans the full scalar range, which is
/// every target this crate runs the normal decode path on).
#[must_use]
pub fn can_decode_to_surrogate_pair() -> bool {
    *CAN_DECODE_SURROGATE_PAIR.get_or_init(|| cfg!(has_utf16_wchar))
}

#[cfg(unix)]
mod platform {
    use std::ffi::{CStr, CString};
    use std::sync::OnceLock;

    static LOCALE_NAME: OnceLock<Option<String>> = OnceLock::new();

    /// Queries `LC_CTYPE` via `setlocale(LC_CTYPE, "")`, which both applies
    /// the process's environment-derived locale and returns its name — the
    /// same call gnulib's locale probes rely on.
    pub(super) fn lc_ctype_name() -> Option<String> {
        LOCALE_NAME
            .get_or_init(|| unsafe {
                let empty = CString::new("").expect("no interior NUL");
                let ptr = libc::setlocale(libc::LC_CTYPE, empty.as_ptr());
                if ptr.is_null() {
                    return None;
                }
                Some(CStr::from_ptr(ptr).to_string_lossy().into_owned())
            })
            .clone()
    }

    /// `MB_CUR_MAX` for the current locale. glibc exposes this as a macro
    /// expanding to a function call; `libc` exposes the same function.
    pub(super) fn mb_cur_max() -> usize {
        lc_ctype_name();
        unsafe { libc::MB_CUR_MAX }
    }
}

#[cfg(not(unix))]
mod platform {
    pub(super) fn lc_ctype_name() -> Option<String> {
        None
    }

    pub(super) fn mb_cur_max() -> usize {
        1
    }
}
