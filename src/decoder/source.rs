//! Byte sources for the buffered decoder.
//!
//! Rust port of the two refill strategies gnulib's `mbbuffer.c` implements:
//! `mbbuf_fd_getchar` (raw file descriptor, retries short reads) and
//! `mbbuf_getchar` (`FILE*`/buffered stream, a short read is treated as
//! EOF-or-error because stdio already buffers internally). Both are exposed
//! through one trait so [`crate::decoder::buffer::Decoder`] is generic over
//! either.

use std::io::{self, Read};

/// One read attempt's outcome, reported back to the decoder's refill loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    /// `n` bytes were placed at the start of the destination slice.
    Read(usize),
    /// No more bytes will ever be available.
    Eof,
}

/// A source of raw bytes for the decoder, abstracting over file descriptors
/// and generic buffered readers.
///
/// `read` performs exactly one underlying read attempt (retried internally
/// only to absorb `EINTR`, never to wait for more data than the OS handed
/// back in one call). The *retry-for-more-data* policy on a short read is
/// reported separately by [`ByteSource::retries_short_reads`] and
/// implemented by the decoder's refill loop, because that policy differs
/// between file-descriptor sources and buffered-stream sources (distilled
/// spec §4.3).
pub trait ByteSource {
    /// Perform one read attempt into `buf`, returning how many bytes were
    /// read, or [`Fill::Eof`] if the source is exhausted.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<Fill>;

    /// Whether the decoder's refill loop should keep calling [`Self::read`]
    /// after a short (nonzero, but less-than-requested) read in the same
    /// refill cycle. `true` for raw file descriptors (a short read there
    /// means only "try again"), `false` for buffered streams (a short read
    /// there means "no more is coming").
    fn retries_short_reads(&self) -> bool;
}

/// A byte source backed by a raw file descriptor (or, in this portable
/// port, any [`Read`] implementor that is known to back a real descriptor —
/// e.g. `std::fs::File` or `std::io::Stdin`). A short read is retried within
/// the same refill cycle; reads interrupted by a signal are restarted.
///
/// Corresponds to `mbbuf_fd_getchar`.
pub struct FdSource<R> {
    inner: R,
}

impl<R: Read> FdSource<R> {
    pub fn new(inner: R) -> Self {
        FdSource { inner }
    }
}

impl<R: Read> ByteSource for FdSource<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<Fill> {
        loop {
            match self.inner.read(buf) {
                Ok(0) => return Ok(Fill::Eof),
                Ok(n) => return Ok(Fill::Read(n)),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    fn retries_short_reads(&self) -> bool {
        true
    }
}

/// A byte source backed by a buffered stream (e.g. `std::io::BufReader`).
/// A short read is treated as EOF-or-error for the purposes of this refill
/// cycle — the stream's own internal buffering means a short read here
/// already reflects "no more is immediately available," matching stdio
/// `fread` semantics.
///
/// Corresponds to `mbbuf_getchar`.
pub struct StreamSource<R> {
    inner: R,
}

impl<R: Read> StreamSource<R> {
    pub fn new(inner: R) -> Self {
        StreamSource { inner }
    }
}

impl<R: Read> ByteSource for StreamSource<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<Fill> {
        match self.inner.read(buf) {
            Ok(0) => Ok(Fill::Eof),
            Ok(n) => Ok(Fill::Read(n)),
            Err(e) => Err(e),
        }
    }

    fn retries_short_reads(&self) -> bool {
        false
    }
}

/// Wraps any [`ByteSource`] with a single-byte-or-more pushback stack, so a
/// consumer can "unread" bytes it has already consumed. The glyph I/O layer
/// (§4.5) uses this to implement `peek_glyph` in terms of `get_glyph` plus
/// pushback, exactly as gnulib's peek functions push bytes back through the
/// stream's `ungetc`-equivalent facility rather than keeping a separate
/// buffer.
pub struct PushbackSource<S> {
    inner: S,
    /// LIFO stack of pushed-back bytes; the *front* of the stream is the
    /// *back* of this vector, so popping returns bytes in original order.
    pushback: Vec<u8>,
}

impl<S: ByteSource> PushbackSource<S> {
    pub fn new(inner: S) -> Self {
        PushbackSource {
            inner,
            pushback: Vec::new(),
        }
    }

    /// Push `bytes` back so that a subsequent `read` reproduces them, in
    /// order, before any new bytes from the underlying source.
    pub fn push_back(&mut self, bytes: &[u8]) {
        // The stack's top is the next byte to be read, so bytes must be
        // pushed in reverse so popping restores original order.
        self.pushback.extend(bytes.iter().rev());
    }
}

impl<S: ByteSource> ByteSource for PushbackSource<S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<Fill> {
        if self.pushback.is_empty() {
            return self.inner.read(buf);
        }
        let mut n = 0;
        while n < buf.len() {
            match self.pushback.pop() {
                Some(b) => {
                    buf[n] = b;
                    n += 1;
                }
                None => break,
            }
        }
        Ok(Fill::Read(n))
    }

    fn retries_short_reads(&self) -> bool {
        // A pushback-fed short read means exactly "that's all that was
        // pushed"; whether to keep reading from the underlying source is
        // the underlying source's own policy, and the decoder's refill
        // loop will call `read` again immediately since pushback is
        // drained before the inner source is ever touched in the same
        // call.
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fd_source_reports_eof() {
        let mut src = FdSource::new(&b""[..]);
        let mut buf = [0u8; 4];
        assert_eq!(src.read(&mut buf).unwrap(), Fill::Eof);
    }

    #[test]
    fn fd_source_reads_available_bytes() {
        let mut src = FdSource::new(&b"ab"[..]);
        let mut buf = [0u8; 4];
        assert_eq!(src.read(&mut buf).unwrap(), Fill::Read(2));
        assert_eq!(&buf[..2], b"ab");
    }

    #[test]
    fn stream_source_reports_eof() {
        let mut src = StreamSource::new(&b""[..]);
        let mut buf = [0u8; 4];
        assert_eq!(src.read(&mut buf).unwrap(), Fill::Eof);
    }

    #[test]
    fn retry_policy_differs() {
        assert!(FdSource::new(&b""[..]).retries_short_reads());
        assert!(!StreamSource::new(&b""[..]).retries_short_reads());
    }

    #[test]
    fn pushback_replays_before_inner_source() {
        let mut src = PushbackSource::new(FdSource::new(&b"cd"[..]));
        src.push_back(b"ab");
        let mut buf = [0u8; 4];
        let Fill::Read(n) = src.read(&mut buf).unwrap() else {
            panic!("expected Read")
        };
        assert_eq!(&buf[..n], b"ab");
        let Fill::Read(n2) = src.read(&mut buf).unwrap() else {
            panic!("expected Read")
        };
        assert_eq!(&buf[..n2], b"cd");
    }
}
