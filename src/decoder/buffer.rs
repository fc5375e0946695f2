//! The buffered decoder: reassembles multibyte sequences across buffer
//! boundaries into a stream of [`Glyph`]s.
//!
//! Rust port of gnulib's `struct mbbuf` / `mbbuf_getchar` /
//! `mbbuf_fd_getchar` (`gl/lib/mbbuffer.c`), generalized over any
//! [`ByteSource`] instead of being duplicated per `FILE*`/fd variant, and
//! made stateless across calls where gnulib threads an `mbstate_t`: because
//! every multibyte sequence this crate decodes is either fully valid or
//! immediately rejected as one byte, there is no partial shift-state to
//! carry between calls (distilled spec §3: "the decoder's associated
//! multibyte-state is reset whenever a byte glyph is produced" — here that
//! reset is simply the absence of any state to reset).

use std::io;

use crate::codepoint;
use crate::config::MB_LEN_MAX;
use crate::decoder::source::{ByteSource, Fill, PushbackSource};
use crate::glyph::Glyph;

/// The result of one [`Decoder::decode_next`] call: either a glyph, or the
/// end-of-stream sentinel. Never stores EOF inside a [`Glyph`] (distilled
/// spec §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextGlyph {
    Glyph(Glyph),
    End,
}

impl NextGlyph {
    #[must_use]
    pub fn glyph(self) -> Option<Glyph> {
        match self {
            NextGlyph::Glyph(g) => Some(g),
            NextGlyph::End => None,
        }
    }
}

/// A fixed-capacity byte buffer that decodes one glyph at a time from a
/// [`ByteSource`].
pub struct Decoder<S> {
    source: S,
    buf: Vec<u8>,
    /// Read offset of the first unconsumed byte within `buf`.
    offset: usize,
    /// Number of unconsumed bytes starting at `offset`.
    len: usize,
    eof: bool,
    error: Option<io::Error>,
}

impl<S: ByteSource> Decoder<S> {
    /// Construct a decoder with the given preferred I/O block size. If
    /// `base_size` is zero, falls back to [`crate::config::DEFAULT_BLOCK_SIZE`].
    /// Capacity is `base_size + MB_LEN_MAX`.
    pub fn new(source: S, base_size: usize) -> Self {
        let base_size = if base_size == 0 {
            crate::config::DEFAULT_BLOCK_SIZE
        } else {
            base_size
        };
        Decoder {
            source,
            buf: vec![0u8; base_size + MB_LEN_MAX],
            offset: 0,
            len: 0,
            eof: false,
            error: None,
        }
    }

    /// `true` once a read from the source has failed; every subsequent
    /// [`Self::decode_next`] call returns [`NextGlyph::End`].
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// The I/O error observed, if any.
    #[must_use]
    pub fn error(&self) -> Option<&io::Error> {
        self.error.as_ref()
    }

    fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Compact remaining bytes to offset 0, then refill until either the
    /// buffer holds at least `MB_LEN_MAX` bytes, EOF is observed, or an
    /// error occurs.
    fn refill(&mut self) {
        if self.offset > 0 {
            self.buf.copy_within(self.offset..self.offset + self.len, 0);
            self.offset = 0;
        }
        while self.len < MB_LEN_MAX && !self.eof && self.error.is_none() {
            let cap = self.capacity();
            match self.source.read(&mut self.buf[self.len..cap]) {
                Ok(Fill::Eof) => self.eof = true,
                Ok(Fill::Read(0)) => self.eof = true,
                Ok(Fill::Read(n)) => {
                    let requested = cap - (self.len);
                    self.len += n;
                    if n < requested && !self.source.retries_short_reads() {
                        self.eof = true;
                    }
                }
                Err(e) => self.error = Some(e),
            }
        }
    }

    /// Decode the next glyph, returning the number of source bytes
    /// consumed. Corresponds to `fgetgr_count`, required by the field
    /// extractor.
    pub fn decode_next_counted(&mut self) -> (NextGlyph, usize) {
        if self.error.is_some() {
            return (NextGlyph::End, 0);
        }
        if self.len < MB_LEN_MAX && !self.eof {
            self.refill();
            if self.error.is_some() {
                return (NextGlyph::End, 0);
            }
        }
        if self.len == 0 {
            return (NextGlyph::End, 0);
        }

        let window = &self.buf[self.offset..self.offset + self.len];
        let (glyph, consumed) = decode_one(window, self.eof);
        self.offset += consumed;
        self.len -= consumed;
        (NextGlyph::Glyph(glyph), consumed)
    }

    /// Decode the next glyph.
    pub fn decode_next(&mut self) -> NextGlyph {
        self.decode_next_counted().0
    }
}

impl<S: ByteSource> Decoder<PushbackSource<S>> {
    /// Identical to [`Self::decode_next`], except every consumed byte is
    /// pushed back into the source's pushback buffer, so the next
    /// `decode_next` reproduces the same glyph.
    pub fn peek_next(&mut self) -> NextGlyph {
        if self.error.is_some() {
            return NextGlyph::End;
        }
        if self.len < MB_LEN_MAX && !self.eof {
            self.refill();
            if self.error.is_some() {
                return NextGlyph::End;
            }
        }
        if self.len == 0 {
            return NextGlyph::End;
        }

        let window = &self.buf[self.offset..self.offset + self.len];
        let (glyph, consumed) = decode_one(window, self.eof);
        let bytes: Vec<u8> = window[..consumed].to_vec();
        self.offset += consumed;
        self.len -= consumed;
        self.source.push_back(&bytes);
        NextGlyph::Glyph(glyph)
    }
}

/// Decode one glyph from the start of `window`. `at_eof` indicates that no
/// further bytes will ever arrive, so an incomplete sequence must be
/// resolved as a byte-glyph rather than awaiting more input.
fn decode_one(window: &[u8], at_eof: bool) -> (Glyph, usize) {
    debug_assert!(!window.is_empty());

    if !codepoint::uses_multibyte() {
        // Single-byte locale: every byte is its own decoded glyph. Rust's
        // `char` covers 0..=255 as valid scalar values (Latin-1 range), so
        // this never produces a byte-glyph.
        let b = window[0];
        return (Glyph::from_code_point(char::from(b), 1), 1);
    }

    match decode_utf8(window) {
        Utf8Step::Valid { value, len } => (Glyph::from_code_point(value, len), usize::from(len)),
        Utf8Step::Invalid => (Glyph::from_byte(window[0]), 1),
        Utf8Step::Incomplete => {
            // Only possible when genuinely at EOF (the refill loop
            // guarantees `window.len() >= MB_LEN_MAX` otherwise, and
            // MB_LEN_MAX comfortably exceeds the longest UTF-8 sequence).
            debug_assert!(at_eof || window.len() >= 4);
            (Glyph::from_byte(window[0]), 1)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Utf8Step {
    Valid { value: char, len: u8 },
    Invalid,
    Incomplete,
}

/// Decode one UTF-8 sequence from the start of `bytes`. Rejects overlong
/// encodings, surrogate code points, and out-of-range scalars, exactly as
/// `mbrtowc` would for a conforming UTF-8 locale.
fn decode_utf8(bytes: &[u8]) -> Utf8Step {
    let b0 = bytes[0];
    if b0 < 0x80 {
        return Utf8Step::Valid {
            value: char::from(b0),
            len: 1,
        };
    }

    let (seq_len, min_value, mut value): (usize, u32, u32) = match b0 {
        0xC2..=0xDF => (2, 0x80, u32::from(b0 & 0x1F)),
        0xE0..=0xEF => (3, 0x800, u32::from(b0 & 0x0F)),
        0xF0..=0xF4 => (4, 0x1_0000, u32::from(b0 & 0x07)),
        _ => return Utf8Step::Invalid,
    };

    if bytes.len() < seq_len {
        return Utf8Step::Incomplete;
    }

    for &b in &bytes[1..seq_len] {
        if b & 0xC0 != 0x80 {
            return Utf8Step::Invalid;
        }
        value = (value << 6) | u32::from(b & 0x3F);
    }

    if value < min_value || value > 0x10_FFFF || codepoint::is_surrogate(value) {
        return Utf8Step::Invalid;
    }

    match char::from_u32(value) {
        Some(c) => Utf8Step::Valid {
            value: c,
            len: seq_len as u8,
        },
        None => Utf8Step::Invalid,
    }
}
