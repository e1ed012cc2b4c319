//! Bounds-safe byte window primitives.
//!
//! Every rule in the catalog is built from these. They are total over any
//! buffer length: a buffer too short for the requested window is a plain
//! `false` / `None`, never a panic.

/// True if `pattern` occurs at `offset` in `data`.
#[inline]
pub fn match_at(data: &[u8], offset: usize, pattern: &[u8]) -> bool {
    match offset.checked_add(pattern.len()) {
        Some(end) if end <= data.len() => &data[offset..end] == pattern,
        _ => false,
    }
}

/// True if `data` starts with `pattern`.
#[inline]
pub fn match_prefix(data: &[u8], pattern: &[u8]) -> bool {
    match_at(data, 0, pattern)
}

/// True if `needle` occurs anywhere inside `data[..max_offset + needle.len()]`.
///
/// A buffer shorter than that window never matches, even when the needle is
/// present in the bytes that do exist.
pub fn contains_within_bound(data: &[u8], max_offset: usize, needle: &[u8]) -> bool {
    let end = match max_offset.checked_add(needle.len()) {
        Some(end) if end <= data.len() => end,
        _ => return false,
    };
    if needle.is_empty() {
        return true;
    }
    data[..end].windows(needle.len()).any(|w| w == needle)
}

/// True if `needle` occurs anywhere in `data`.
#[inline]
pub fn contains(data: &[u8], needle: &[u8]) -> bool {
    contains_within_bound(data, data.len().saturating_sub(needle.len()), needle)
}

/// Little-endian u16 at `offset`, if the buffer reaches that far.
#[inline]
pub fn read_u16_le(data: &[u8], offset: usize) -> Option<u16> {
    let end = offset.checked_add(2)?;
    let bytes = data.get(offset..end)?;
    Some(u16::from_le_bytes([bytes[0], bytes[1]]))
}

/// Little-endian u32 at `offset`, if the buffer reaches that far.
#[inline]
pub fn read_u32_le(data: &[u8], offset: usize) -> Option<u32> {
    let end = offset.checked_add(4)?;
    let bytes = data.get(offset..end)?;
    Some(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_at_exact_fit() {
        let data = [0x00, 0x01, 0x02, 0x03];
        assert!(match_at(&data, 2, &[0x02, 0x03]));
        assert!(!match_at(&data, 3, &[0x03, 0x04]));
    }

    #[test]
    fn test_match_at_short_buffer() {
        assert!(!match_at(&[], 0, &[0x00]));
        assert!(!match_at(&[0xFF, 0xD8], 0, &[0xFF, 0xD8, 0xFF]));
        assert!(!match_at(&[0x00; 4], usize::MAX, &[0x00]));
    }

    #[test]
    fn test_match_prefix() {
        assert!(match_prefix(b"%PDF-1.7", b"%PDF"));
        assert!(!match_prefix(b"%PD", b"%PDF"));
        assert!(match_prefix(b"", b""));
    }

    #[test]
    fn test_contains_within_bound_window_edges() {
        let data = b"....webm";
        // Window is data[..4 + 4], needle ends exactly at the window edge
        assert!(contains_within_bound(data, 4, b"webm"));
        // Window data[..3 + 4] cuts the needle off
        assert!(!contains_within_bound(data, 3, b"webm"));
    }

    #[test]
    fn test_contains_within_bound_requires_full_window() {
        // The needle is present, but the buffer is shorter than the window
        assert!(!contains_within_bound(b"webm", 32, b"webm"));
        assert!(!contains_within_bound(b"", 0, b"x"));
    }

    #[test]
    fn test_contains_whole_buffer() {
        assert!(contains(b"abcAndroidManifest.xml", b"AndroidManifest.xml"));
        assert!(contains(b"AndroidManifest.xml", b"AndroidManifest.xml"));
        assert!(!contains(b"Manifest", b"AndroidManifest.xml"));
    }

    #[test]
    fn test_read_le_fields() {
        let data = [0x34, 0x12, 0x78, 0x56];
        assert_eq!(read_u16_le(&data, 0), Some(0x1234));
        assert_eq!(read_u32_le(&data, 0), Some(0x5678_1234));
        assert_eq!(read_u16_le(&data, 3), None);
        assert_eq!(read_u32_le(&data, 1), None);
        assert_eq!(read_u32_le(&data, usize::MAX - 1), None);
    }
}
