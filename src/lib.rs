//! `mbtext` — a character-stream runtime for multibyte-tolerant text tools.
//!
//! Bytes flow one way: [`decoder`] turns a raw byte stream into a sequence
//! of [`glyph::Glyph`]s (a decoded scalar or an un-decodable raw byte),
//! [`position`] tracks file offset/line/column as glyphs go by, [`gio`]
//! layers read/peek/write and line-buffering on top, and three consumers
//! drive the stream end to end: [`normalize`] (Unicode normalization plus
//! invalid-byte repair), [`cut`] (field/column/byte extraction), and
//! [`fold`] (display-width-aware line wrapping). [`fmt`] is a fourth,
//! unwired exemplar that exercises the same width classifier through a
//! paragraph-filling dynamic program.

pub mod cli;
pub mod codepoint;
pub mod config;
pub mod cut;
pub mod decoder;
pub mod fmt;
pub mod fold;
pub mod gio;
pub mod glyph;
pub mod normalize;
pub mod position;

pub use decoder::{ByteSource, Decoder, FdSource, NextGlyph, PushbackSource, StreamSource};
pub use glyph::Glyph;
