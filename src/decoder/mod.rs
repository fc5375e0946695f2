//! The character-stream runtime's decoder core.
//!
//! Assembles the byte-source abstraction ([`source`]) and the fixed-buffer
//! decode loop ([`buffer`]) into the public [`Decoder`] / [`NextGlyph`]
//! types used by every consumer in this crate.

pub mod buffer;
pub mod source;

pub use buffer::{Decoder, NextGlyph};
pub use source::{ByteSource, Fill, FdSource, PushbackSource, StreamSource};
