//! Compound File Binary: legacy Word, PowerPoint, Excel and Windows
//! Installer files share the same 8-byte header. The first sector after the
//! 512-byte header usually starts with the application's own stream, which
//! is enough to tell the Office formats apart.

use crate::magic::formats::{self, KnownFormat};
use crate::magic::window::{contains, match_at, match_prefix};

/// CFB header signature
pub const CFB_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// First byte after the header sector
const FIRST_SECTOR: usize = 512;

const WORD_SECTOR: &[u8] = &[0xEC, 0xA5, 0xC1, 0x00];

const POWERPOINT_SECTORS: &[&[u8]] = &[
    &[0x00, 0x6E, 0x1E, 0xF0],
    &[0xA0, 0x46, 0x1D, 0xF0],
    &[0x0F, 0x00, 0xE8, 0x03],
];

const EXCEL_SECTOR: &[u8] = &[0x09, 0x08, 0x10, 0x00, 0x00, 0x06, 0x05, 0x00];

/// "PowerPoint Document" stream name, UTF-16LE, as stored in the directory
const POWERPOINT_STREAM: &[u8] = &[
    0x50, 0x00, 0x6F, 0x00, 0x77, 0x00, 0x65, 0x00, 0x72, 0x00, 0x50, 0x00, 0x6F, 0x00, 0x69, 0x00,
    0x6E, 0x00, 0x74, 0x00, 0x20, 0x00, 0x44, 0x00, 0x6F, 0x00, 0x63, 0x00, 0x75, 0x00, 0x6D, 0x00,
    0x65, 0x00, 0x6E, 0x00, 0x74, 0x00,
];

/// Installer headers: minor version 0x3E, major version 4 (64-bit) or 3
/// (32-bit) with the matching sector shift
const MSI_HEADERS: &[&[u8]] = &[
    &[
        0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x3E, 0x00, 0x04, 0x00, 0xFE, 0xFF,
        0x0C, 0x00, 0x06,
    ],
    &[
        0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x3E, 0x00, 0x03, 0x00, 0xFE, 0xFF,
        0x09, 0x00, 0x06,
    ],
];

/// Classify a CFB buffer. Unrecognised compound files fall through.
pub fn resolve(data: &[u8]) -> Option<&'static KnownFormat> {
    if !match_prefix(data, CFB_MAGIC) {
        return None;
    }

    if match_at(data, FIRST_SECTOR, WORD_SECTOR) {
        return Some(&formats::DOC);
    }
    if POWERPOINT_SECTORS
        .iter()
        .any(|sector| match_at(data, FIRST_SECTOR, sector))
    {
        return Some(&formats::PPT);
    }
    if match_at(data, FIRST_SECTOR, EXCEL_SECTOR) {
        return Some(&formats::XLS);
    }
    // The directory entry usually sits near the end of small files, so this
    // only succeeds reliably on a complete buffer
    if contains(data, POWERPOINT_STREAM) {
        return Some(&formats::PPT);
    }
    if MSI_HEADERS.iter().any(|header| match_prefix(data, header)) {
        return Some(&formats::MSI);
    }

    None
}
