//! Growable line buffer of glyphs.
//!
//! Rust port of `src/widetext.c`'s `struct grlinebuffer` /
//! `readgrlinebuffer_delim`, plus the small `grslen`/`grmemchr`-equivalent
//! helpers from `src/grapheme.c` that the original keeps as free functions
//! over raw glyph slices — here they are inherent methods on the owning
//! buffer, since `Vec<Glyph>` already tracks its own length.

use crate::decoder::{ByteSource, Decoder, NextGlyph, PushbackSource};
use crate::glyph::Glyph;

/// A growable ordered sequence of glyphs holding at most one line's worth of
/// content, including the delimiter glyph if any. May contain embedded
/// decoded NUL glyphs; is not NUL-terminated.
#[derive(Debug, Clone, Default)]
pub struct LineBuffer {
    glyphs: Vec<Glyph>,
}

impl LineBuffer {
    #[must_use]
    pub fn new() -> Self {
        LineBuffer { glyphs: Vec::new() }
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Glyph] {
        &self.glyphs
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn clear(&mut self) {
        self.glyphs.clear();
    }

    /// Number of glyphs, corresponds to `grslen`. Provided alongside `len`
    /// under the gnulib name for readers tracing this port back to
    /// `grapheme.c`.
    #[must_use]
    pub fn grslen(&self) -> usize {
        self.glyphs.len()
    }

    /// Find the first glyph decoding to `value`, corresponds to `grmemchr`.
    #[must_use]
    pub fn grmemchr(&self, value: char) -> Option<usize> {
        self.glyphs
            .iter()
            .position(|g| g.as_char() == Some(value))
    }

    /// Read glyphs from `dec` until a glyph decoding to `delimiter` is
    /// consumed, or EOF. Every glyph read is appended to the buffer
    /// (including the delimiter, if found). If EOF is reached before the
    /// delimiter, a synthetic delimiter glyph is appended so that every
    /// returned line is delimiter-terminated. Returns `false` (the C NULL
    /// return) iff the stream was already empty on entry — the buffer is
    /// cleared first, so "empty on entry" means the very first read
    /// attempt hits EOF.
    pub fn read_delim<S: ByteSource>(
        &mut self,
        dec: &mut Decoder<PushbackSource<S>>,
        delimiter: char,
    ) -> bool {
        self.glyphs.clear();
        loop {
            match dec.decode_next() {
                NextGlyph::End => {
                    if self.glyphs.is_empty() {
                        return false;
                    }
                    self.glyphs.push(Glyph::from_code_point(delimiter, 1));
                    return true;
                }
                NextGlyph::Glyph(g) => {
                    let is_delim = g.as_char() == Some(delimiter);
                    self.glyphs.push(g);
                    if is_delim {
                        return true;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::{FdSource, PushbackSource};

    fn dec(bytes: &'static [u8]) -> Decoder<PushbackSource<FdSource<&'static [u8]>>> {
        Decoder::new(PushbackSource::new(FdSource::new(bytes)), 8)
    }

    #[test]
    fn reads_one_line_with_delimiter() {
        let mut d = dec(b"abc\ndef\n");
        let mut lb = LineBuffer::new();
        assert!(lb.read_delim(&mut d, '\n'));
        assert_eq!(lb.grslen(), 4);
        assert_eq!(lb.as_slice()[3].as_char(), Some('\n'));
    }

    #[test]
    fn appends_synthetic_delimiter_at_eof() {
        let mut d = dec(b"abc");
        let mut lb = LineBuffer::new();
        assert!(lb.read_delim(&mut d, '\n'));
        assert_eq!(lb.grslen(), 4);
        assert_eq!(lb.as_slice()[3].as_char(), Some('\n'));
    }

    #[test]
    fn empty_stream_returns_false() {
        let mut d = dec(b"");
        let mut lb = LineBuffer::new();
        assert!(!lb.read_delim(&mut d, '\n'));
        assert!(lb.is_empty());
    }

    #[test]
    fn grmemchr_finds_position() {
        let mut d = dec(b"ab:cd\n");
        let mut lb = LineBuffer::new();
        lb.read_delim(&mut d, '\n');
        assert_eq!(lb.grmemchr(':'), Some(2));
        assert_eq!(lb.grmemchr('z'), None);
    }
}
