//! ZIP family: EPUB, OpenDocument, OOXML, XPI, APK and JAR all start with a
//! plain local file header. The first entry's name, and a few well-known
//! part paths, tell them apart.

use crate::magic::formats::{self, KnownFormat};
use crate::magic::window::{contains, contains_within_bound, match_at, match_prefix, read_u16_le};

/// Local file header signature `PK\x03\x04`
pub const LOCAL_FILE_HEADER: &[u8] = &[0x50, 0x4B, 0x03, 0x04];

/// Offset of the file-name length field in the local file header
const NAME_LEN_OFFSET: usize = 26;
/// Offset of the file name itself
const NAME_OFFSET: usize = 30;
/// Where the stored `mimetype` entry's content starts (30 + "mimetype".len())
const MIMETYPE_CONTENT_OFFSET: usize = 38;
/// How far into the archive the JAR manifest may start
const MANIFEST_SEARCH_BOUND: usize = 512;
/// Bytes excluded from the tail of the buffer when looking for OOXML parts
const OOXML_TAIL_SKIP: usize = 5;

static MIMETYPES: &[(&[u8], &KnownFormat)] = &[
    (b"application/epub+zip", &formats::EPUB),
    (b"application/vnd.oasis.opendocument.text", &formats::ODT),
    (b"application/vnd.oasis.opendocument.presentation", &formats::ODP),
    (b"application/vnd.oasis.opendocument.spreadsheet", &formats::ODS),
];

static OOXML_PARTS: &[(&[u8], &KnownFormat)] = &[
    (b"word/", &formats::DOCX),
    (b"ppt/", &formats::PPTX),
    (b"xl/", &formats::XLSX),
];

/// Name of the first entry, if the header is complete enough to hold it
pub fn first_entry_name(data: &[u8]) -> Option<&[u8]> {
    let len = read_u16_le(data, NAME_LEN_OFFSET)? as usize;
    data.get(NAME_OFFSET..NAME_OFFSET + len)
}

/// Classify a ZIP-based buffer.
///
/// Always answers for a `PK\x03\x04` buffer: anything not recognised as a
/// more specific member of the family is a plain ZIP archive.
pub fn resolve(data: &[u8]) -> Option<&'static KnownFormat> {
    if !match_prefix(data, LOCAL_FILE_HEADER) {
        return None;
    }
    Some(resolve_member(data).unwrap_or(&formats::ZIP))
}

fn resolve_member(data: &[u8]) -> Option<&'static KnownFormat> {
    let name = first_entry_name(data)?;

    if name == b"mimetype" {
        return MIMETYPES
            .iter()
            .find(|(mime, _)| match_at(data, MIMETYPE_CONTENT_OFFSET, mime))
            .map(|&(_, format)| format);
    }

    if name.ends_with(b".xml") || name.ends_with(b".rels") {
        let bound = data.len().saturating_sub(OOXML_TAIL_SKIP);
        return OOXML_PARTS
            .iter()
            .find(|(part, _)| contains_within_bound(data, bound, part))
            .map(|&(_, format)| format);
    }

    if name == b"META-INF/mozilla.rsa" {
        return Some(&formats::XPI);
    }

    if contains_within_bound(data, MANIFEST_SEARCH_BOUND, b"META-INF/MANIFEST.MF") {
        // Best effort: a manifest without AndroidManifest.xml is assumed to be a JAR
        if contains(data, b"AndroidManifest.xml") {
            return Some(&formats::APK);
        }
        return Some(&formats::JAR);
    }

    None
}
