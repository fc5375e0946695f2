//! Dual-delimiter bounded read with geometric buffer growth.
//!
//! Rust port of `src/widetext.c`'s `grgetndelim2`: grows the destination
//! buffer geometrically as glyphs arrive, stopping at either of two
//! delimiters, a maximum count, or EOF. Used by the field extractor to read
//! an entire first field before deciding whether a non-delimited line
//! should be suppressed (distilled spec §4.7).

use crate::config::BOUNDED_READ_INITIAL_CAPACITY;
use crate::decoder::{ByteSource, Decoder, NextGlyph, PushbackSource};
use crate::glyph::Glyph;

/// Read glyphs from `dec` into `buf` (appending after any existing
/// content, starting at `offset`), growing geometrically from
/// [`BOUNDED_READ_INITIAL_CAPACITY`], doubling each time, until a glyph
/// matching `delim1` or `delim2` is consumed, `max` glyphs total have been
/// stored, or EOF is reached. `buf` is truncated to `offset` before
/// reading. One slot of capacity headroom beyond the stored count is
/// always reserved, mirroring the C source's reservation of space for a
/// terminating NUL glyph.
///
/// Returns the number of glyphs stored (including the matched delimiter,
/// if any), or `-1` if the decoder's underlying source reported an I/O
/// error (distilled spec §4.5: "return the number of glyphs stored, or −1
/// on error").
pub fn bounded_read<S: ByteSource>(
    buf: &mut Vec<Glyph>,
    offset: usize,
    max: usize,
    delim1: char,
    delim2: char,
    dec: &mut Decoder<PushbackSource<S>>,
) -> i64 {
    buf.truncate(offset);
    let mut capacity = BOUNDED_READ_INITIAL_CAPACITY.max(offset + 1);

    loop {
        if buf.len() >= max {
            break;
        }
        // Reserve headroom for a trailing synthetic glyph slot.
        if buf.len() + 1 >= capacity {
            capacity = (capacity * 2).min(max.saturating_add(1)).max(capacity + 1);
            buf.reserve(capacity.saturating_sub(buf.capacity()));
        }

        match dec.decode_next() {
            NextGlyph::End => break,
            NextGlyph::Glyph(g) => {
                let is_delim = matches!(g.as_char(), Some(c) if c == delim1 || c == delim2);
                buf.push(g);
                if is_delim {
                    break;
                }
            }
        }
    }

    if dec.is_error() {
        return -1;
    }
    (buf.len() - offset) as i64
}
