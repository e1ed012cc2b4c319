//! Portable Executable: the DOS stub points at the PE header, whose COFF
//! characteristics say whether the image is a DLL or a plain executable.

use crate::magic::formats::{self, KnownFormat};
use crate::magic::window::{match_prefix, read_u16_le, read_u32_le};

/// DOS header magic `MZ`
pub const DOS_MAGIC: &[u8] = &[0x4D, 0x5A];

/// Offset of `e_lfanew`, the file offset of the PE header
const E_LFANEW_OFFSET: usize = 60;
/// Offset of the characteristics field inside the PE header
/// (4-byte signature + machine, sections, timestamp, symtab ptr, symbols, opt size)
const CHARACTERISTICS_OFFSET: usize = 22;

pub const IMAGE_FILE_EXECUTABLE_IMAGE: u16 = 0x0002;
pub const IMAGE_FILE_DLL: u16 = 0x2000;

/// COFF characteristics of the image, if the buffer reaches them
pub fn characteristics(data: &[u8]) -> Option<u16> {
    if !match_prefix(data, DOS_MAGIC) || data.len() <= 64 {
        return None;
    }
    let header = usize::try_from(read_u32_le(data, E_LFANEW_OFFSET)?).ok()?;
    read_u16_le(data, header.checked_add(CHARACTERISTICS_OFFSET)?)
}

/// Classify an `MZ` buffer.
///
/// A truncated header or an image that is neither flag is not a match, and
/// the catalog carries on with the remaining rules.
pub fn resolve(data: &[u8]) -> Option<&'static KnownFormat> {
    let flags = characteristics(data)?;
    if flags & IMAGE_FILE_DLL != 0 {
        Some(&formats::DLL)
    } else if flags & IMAGE_FILE_EXECUTABLE_IMAGE != 0 {
        Some(&formats::EXE)
    } else {
        None
    }
}

#[cfg(test)]
pub(crate) fn pe_image(e_lfanew: u32, flags: u16, len: usize) -> Vec<u8> {
    let mut data = vec![0u8; len];
    data[..2].copy_from_slice(DOS_MAGIC);
    data[60..64].copy_from_slice(&e_lfanew.to_le_bytes());
    let header = e_lfanew as usize;
    if header.saturating_add(4) <= len {
        data[header..header + 4].copy_from_slice(b"PE\0\0");
    }
    let field = header.saturating_add(CHARACTERISTICS_OFFSET);
    if field.saturating_add(2) <= len {
        data[field..field + 2].copy_from_slice(&flags.to_le_bytes());
    }
    data
}
