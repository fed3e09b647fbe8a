//! Readers for the fixed-width primitives.
//!
//! Readers are total: bytes past the end of the buffer read as zero and
//! string ranges are clamped, so a short or garbage buffer yields a
//! best-effort value instead of a panic.

/// Copies `N` bytes starting at `address`, zero-filling past the end.
fn read_array<const N: usize>(data: &[u8], address: usize) -> [u8; N] {
    let mut out = [0u8; N];
    if address < data.len() {
        let end = data.len().min(address.saturating_add(N));
        out[..end - address].copy_from_slice(&data[address..end]);
    }
    out
}

/// Reads a UTF-8 string from `[start, end)`.
///
/// NUL bytes and U+FFFD replacement characters are removed; both appear
/// when the range covers zero padding or a truncated multi-byte sequence.
pub fn read_string(data: &[u8], start: usize, end: usize) -> String {
    let end = end.min(data.len());
    let start = start.min(end);
    String::from_utf8_lossy(&data[start..end])
        .chars()
        .filter(|c| *c != '\u{0}' && *c != char::REPLACEMENT_CHARACTER)
        .collect()
}

/// Reads a little-endian `u32` at `address`.
pub fn read_uint32(data: &[u8], address: usize) -> u32 {
    u32::from_le_bytes(read_array(data, address))
}

/// Reads a little-endian `u16` at `address`.
pub fn read_uint16(data: &[u8], address: usize) -> u16 {
    u16::from_le_bytes(read_array(data, address))
}

/// Reads the byte at `address`.
pub fn read_uint8(data: &[u8], address: usize) -> u8 {
    data.get(address).copied().unwrap_or(0)
}

/// Reads a boolean byte; any non-zero value is true.
pub fn read_boolean(data: &[u8], address: usize) -> bool {
    read_uint8(data, address) != 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_integers() {
        let data = [0x01, 0x02, 0x03, 0x04, 0x05];
        assert_eq!(read_uint32(&data, 0), 0x0403_0201);
        assert_eq!(read_uint32(&data, 1), 0x0504_0302);
        assert_eq!(read_uint16(&data, 3), 0x0504);
        assert_eq!(read_uint8(&data, 4), 0x05);
    }

    #[test]
    fn test_read_past_end_is_zero_filled() {
        let data = [0xFF, 0xFF];
        assert_eq!(read_uint32(&data, 0), 0x0000_FFFF);
        assert_eq!(read_uint32(&data, 10), 0);
        assert_eq!(read_uint16(&data, 1), 0x00FF);
        assert_eq!(read_uint8(&data, 2), 0);
        assert_eq!(read_uint32(&data, usize::MAX), 0);
    }

    #[test]
    fn test_read_boolean() {
        let data = [0, 1, 7];
        assert!(!read_boolean(&data, 0));
        assert!(read_boolean(&data, 1));
        assert!(read_boolean(&data, 2));
        assert!(!read_boolean(&data, 3));
    }

    #[test]
    fn test_read_string_strips_padding() {
        let data = b"abc\0\0\0";
        assert_eq!(read_string(data, 0, 6), "abc");
        assert_eq!(read_string(data, 1, 3), "bc");
    }

    #[test]
    fn test_read_string_strips_broken_sequences() {
        // "é" is [0xC3, 0xA9]; cut after the first byte
        let data = [b'a', 0xC3, 0xA9, b'b'];
        assert_eq!(read_string(&data, 0, 2), "a");
        assert_eq!(read_string(&data, 0, 4), "aéb");
    }

    #[test]
    fn test_read_string_clamps_range() {
        let data = b"hello";
        assert_eq!(read_string(data, 3, 100), "lo");
        assert_eq!(read_string(data, 10, 20), "");
        assert_eq!(read_string(data, 4, 2), "");
    }
}
