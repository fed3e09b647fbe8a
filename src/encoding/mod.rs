//! Fixed-width byte encoding primitives.
//!
//! All integers are little-endian. Encoders return owned [`Bytes`] so that
//! sector encoders can concatenate them into a single buffer; readers live
//! in [`reader`] and title sanitization in [`text`].

pub mod reader;
pub mod text;

pub use reader::{read_boolean, read_string, read_uint16, read_uint32, read_uint8};
pub use text::filter_multibyte_chars;

use bytes::{BufMut, Bytes, BytesMut};

/// Returns a 4-byte little-endian unsigned integer.
pub fn uint32(value: u32) -> Bytes {
    let mut buf = BytesMut::with_capacity(4);
    buf.put_u32_le(value);
    buf.freeze()
}

/// Returns a 2-byte little-endian unsigned integer.
pub fn uint16(value: u16) -> Bytes {
    let mut buf = BytesMut::with_capacity(2);
    buf.put_u16_le(value);
    buf.freeze()
}

/// Returns a single unsigned byte.
pub fn uint8(value: u8) -> Bytes {
    Bytes::copy_from_slice(&[value])
}

/// Returns the UTF-8 bytes of `text`.
///
/// Length fields in the sector layout count bytes, so callers that need one
/// byte per character must run [`filter_multibyte_chars`] first.
pub fn string(text: &str) -> Bytes {
    Bytes::copy_from_slice(text.as_bytes())
}

/// Returns `1` for true and `0` for false.
pub fn boolean(value: bool) -> Bytes {
    uint8(value as u8)
}

/// Zero-extends `buf` to `length` bytes. Never truncates.
pub fn pad_to(buf: &mut BytesMut, length: usize) {
    if buf.len() < length {
        buf.resize(length, 0);
    }
}

/// Zero-extends or truncates `buf` to exactly `length` bytes.
pub fn fit_to(buf: &mut BytesMut, length: usize) {
    buf.resize(length, 0);
}
