//! The glyph I/O layer: read/peek/write operations over a pushback-capable
//! byte source, plus the growable line buffer and dual-delimiter bounded
//! read used by the field extractor.
//!
//! Rust port of `src/grapheme.c`'s binary-tolerant I/O wrappers
//! (`fgetgr`/`fpeekgr`/`fputgr`) and `src/widetext.c`'s
//! `readgrlinebuffer_delim`/`grgetndelim2`.

pub mod bounded;
pub mod line_buffer;

pub use bounded::bounded_read;
pub use line_buffer::LineBuffer;

use std::io::{self, Write};

use crate::codepoint;
use crate::decoder::{ByteSource, Decoder, NextGlyph, PushbackSource};
use crate::glyph::Glyph;

/// Consume the next glyph from `dec`. Thin wrapper over
/// [`Decoder::decode_next`]: pushback (needed to implement `peek_glyph`) is
/// the decoder's own concern, so this layer does not duplicate buffering —
/// it only provides the name and shape gnulib's `fgetgr` gives callers.
pub fn get_glyph<S: ByteSource>(dec: &mut Decoder<PushbackSource<S>>) -> NextGlyph {
    dec.decode_next()
}

/// Peek the next glyph without consuming it: a subsequent `get_glyph` (or
/// another `peek_glyph`) reproduces exactly what this call returned.
/// Corresponds to `fpeekgr`.
pub fn peek_glyph<S: ByteSource>(dec: &mut Decoder<PushbackSource<S>>) -> NextGlyph {
    dec.peek_next()
}

/// Write one glyph to `dst`. A byte glyph is written verbatim; a decoded
/// glyph is encoded in the locale's multibyte encoding. On a single-byte
/// locale asked to emit a scalar outside `0..=0xFF` (only reachable via
/// `unorm`'s `--replace-char`, never through ordinary decode→re-emit), falls
/// back to writing the low byte — the C-locale compatibility behavior of
/// `fputgr`/`fputwcgr` when the locale's `wctomb` refuses the character.
pub fn put_glyph(dst: &mut impl Write, g: Glyph) -> io::Result<()> {
    match g {
        Glyph::Byte(b) => dst.write_all(&[b]),
        Glyph::Decoded { value, .. } => {
            if codepoint::uses_multibyte() {
                let mut buf = [0u8; 4];
                dst.write_all(value.encode_utf8(&mut buf).as_bytes())
            } else {
                // Single-byte locale: the low 8 bits are the only
                // representable value, whether or not the scalar actually
                // fit in that range.
                dst.write_all(&[(value as u32 & 0xFF) as u8])
            }
        }
    }
}
