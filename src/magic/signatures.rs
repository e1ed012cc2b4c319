//! The ordered signature catalog.
//!
//! Each entry pairs a byte predicate with the format it yields. Entries are
//! evaluated top to bottom and the first hit wins, so order is part of the
//! contract: some headers are strict prefixes of others (the JPEG variants
//! share `FF D8 FF`), and some outer magic bytes are only disambiguated by
//! a nested check that must run before any fallback for the same prefix
//! (Matroska vs WebM, the `ftyp` brands, the ZIP family).
//!
//! Rules that need more than a fixed comparison use [`Matcher::Resolve`]
//! with a small discriminator returning `None` to let evaluation continue.

use super::containers::{cfb, pe, zip};
use super::formats::{self, KnownFormat};
use super::window::{contains_within_bound, match_at, match_prefix};

/// Catalog section a signature belongs to. Sections appear in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Group {
    Images,
    Video,
    AudioContainer,
    Archives,
    Documents,
    Misc,
}

/// How a signature inspects the buffer
#[derive(Debug, Clone, Copy)]
pub enum Matcher {
    /// Fixed bytes at offset 0
    Prefix(&'static [u8], &'static KnownFormat),
    /// Any of several fixed headers at offset 0
    AnyPrefix(&'static [&'static [u8]], &'static KnownFormat),
    /// Any of several (offset, bytes) pairs
    AnyAt(&'static [(usize, &'static [u8])], &'static KnownFormat),
    /// Fixed prefix plus a needle somewhere in `data[..max_offset + needle.len()]`
    PrefixWithin {
        prefix: &'static [u8],
        max_offset: usize,
        needle: &'static [u8],
        format: &'static KnownFormat,
    },
    /// Multi-stage rule; `None` means "not mine, keep going"
    Resolve(fn(&[u8]) -> Option<&'static KnownFormat>),
}

impl Matcher {
    pub fn evaluate(&self, data: &[u8]) -> Option<&'static KnownFormat> {
        match *self {
            Matcher::Prefix(header, format) => match_prefix(data, header).then_some(format),
            Matcher::AnyPrefix(headers, format) => headers
                .iter()
                .any(|h| match_prefix(data, h))
                .then_some(format),
            Matcher::AnyAt(pairs, format) => pairs
                .iter()
                .any(|&(offset, header)| match_at(data, offset, header))
                .then_some(format),
            Matcher::PrefixWithin {
                prefix,
                max_offset,
                needle,
                format,
            } => (match_prefix(data, prefix) && contains_within_bound(data, max_offset, needle))
                .then_some(format),
            Matcher::Resolve(resolve) => resolve(data),
        }
    }
}

/// A named catalog entry
#[derive(Debug, Clone, Copy)]
pub struct Signature {
    pub name: &'static str,
    pub group: Group,
    pub matcher: Matcher,
}

const EBML: &[u8] = &[0x1A, 0x45, 0xDF, 0xA3];

/// All signatures in evaluation order
pub fn all_signatures() -> &'static [Signature] {
    SIGNATURES
}

static SIGNATURES: &[Signature] = &[
    // === Images ===
    Signature {
        name: "ICO",
        group: Group::Images,
        matcher: Matcher::Prefix(&[0x00, 0x00, 0x01, 0x00], &formats::ICO),
    },
    Signature {
        name: "GIF",
        group: Group::Images,
        matcher: Matcher::Prefix(b"GIF8", &formats::GIF),
    },
    Signature {
        name: "TIFF",
        group: Group::Images,
        matcher: Matcher::AnyPrefix(
            &[&[0x49, 0x49, 0x2A, 0x00], &[0x4D, 0x4D, 0x00, 0x2A]],
            &formats::TIFF,
        ),
    },
    Signature {
        name: "JPEG/JFIF",
        group: Group::Images,
        matcher: Matcher::Prefix(&[0xFF, 0xD8, 0xFF, 0xE0], &formats::JPEG_JFIF),
    },
    Signature {
        name: "JPEG/EXIF",
        group: Group::Images,
        matcher: Matcher::Prefix(&[0xFF, 0xD8, 0xFF, 0xE1], &formats::JPEG_EXIF),
    },
    Signature {
        name: "JPEG/SPIFF",
        group: Group::Images,
        matcher: Matcher::Prefix(&[0xFF, 0xD8, 0xFF, 0xE8], &formats::JPEG_SPIFF),
    },
    Signature {
        name: "JPEG 2000",
        group: Group::Images,
        matcher: Matcher::Resolve(discriminate_jp2),
    },
    Signature {
        name: "PSD",
        group: Group::Images,
        matcher: Matcher::Prefix(b"8BPS", &formats::PSD),
    },
    Signature {
        name: "BMP",
        group: Group::Images,
        matcher: Matcher::Prefix(b"BM", &formats::BMP),
    },
    Signature {
        name: "PNG",
        group: Group::Images,
        matcher: Matcher::Prefix(&[0x89, 0x50, 0x4E, 0x47], &formats::PNG),
    },
    // === Video ===
    Signature {
        name: "Matroska",
        group: Group::Video,
        matcher: Matcher::PrefixWithin {
            prefix: EBML,
            max_offset: 32,
            needle: b"matroska",
            format: &formats::MKV,
        },
    },
    Signature {
        name: "MPEG video",
        group: Group::Video,
        matcher: Matcher::Prefix(&[0x00, 0x00, 0x01, 0xB0], &formats::MPEG_VIDEO),
    },
    Signature {
        name: "MPEG-PS",
        group: Group::Video,
        matcher: Matcher::Prefix(&[0x00, 0x00, 0x01, 0xBA], &formats::MPEG_PS),
    },
    Signature {
        name: "MPEG-1/2",
        group: Group::Video,
        matcher: Matcher::Prefix(&[0x00, 0x00, 0x01, 0xB3], &formats::MPEG_ES),
    },
    Signature {
        name: "ISO base media (ftyp)",
        group: Group::Video,
        matcher: Matcher::Resolve(discriminate_ftyp),
    },
    Signature {
        name: "QuickTime atom",
        group: Group::Video,
        matcher: Matcher::AnyAt(
            &[(4, b"moov"), (4, b"free"), (4, b"mdat"), (4, b"wide"), (4, b"pnot"), (4, b"skip")],
            &formats::MOV,
        ),
    },
    Signature {
        name: "WebM",
        group: Group::Video,
        matcher: Matcher::PrefixWithin {
            prefix: EBML,
            max_offset: 32,
            needle: b"webm",
            format: &formats::WEBM,
        },
    },
    Signature {
        name: "WMV/ASF",
        group: Group::Video,
        matcher: Matcher::Prefix(
            &[
                0x30, 0x26, 0xB2, 0x75, 0x8E, 0x66, 0xCF, 0x11, 0xA6, 0xD9, 0x00, 0xAA, 0x00, 0x62,
                0xCE, 0x6C,
            ],
            &formats::WMV,
        ),
    },
    Signature {
        name: "FLV",
        group: Group::Video,
        matcher: Matcher::Prefix(b"FLV\x01", &formats::FLV),
    },
    // === Audio + IFF + RIFF ===
    Signature {
        name: "IFF",
        group: Group::AudioContainer,
        matcher: Matcher::Resolve(discriminate_iff),
    },
    Signature {
        name: "RIFF",
        group: Group::AudioContainer,
        matcher: Matcher::Resolve(discriminate_riff),
    },
    Signature {
        name: "FLAC",
        group: Group::AudioContainer,
        matcher: Matcher::Prefix(b"fLaC", &formats::FLAC),
    },
    Signature {
        name: "OGG",
        group: Group::AudioContainer,
        matcher: Matcher::Resolve(discriminate_ogg),
    },
    Signature {
        name: "MIDI",
        group: Group::AudioContainer,
        matcher: Matcher::Prefix(b"MThd", &formats::MIDI),
    },
    // === Archives ===
    Signature {
        name: "compress (LZW)",
        group: Group::Archives,
        matcher: Matcher::Prefix(&[0x1F, 0x9D], &formats::Z_LZW),
    },
    Signature {
        name: "compress (LZH)",
        group: Group::Archives,
        matcher: Matcher::Prefix(&[0x1F, 0xA0], &formats::Z_LZH),
    },
    Signature {
        name: "ZIP",
        group: Group::Archives,
        matcher: Matcher::Resolve(zip::resolve),
    },
    Signature {
        name: "RAR4",
        group: Group::Archives,
        matcher: Matcher::Prefix(&[0x52, 0x61, 0x72, 0x21, 0x1A, 0x07, 0x00], &formats::RAR4),
    },
    Signature {
        name: "RAR5",
        group: Group::Archives,
        matcher: Matcher::Prefix(
            &[0x52, 0x61, 0x72, 0x21, 0x1A, 0x07, 0x01, 0x00],
            &formats::RAR5,
        ),
    },
    Signature {
        name: "TAR",
        group: Group::Archives,
        matcher: Matcher::AnyAt(
            &[(257, b"ustar\x0000"), (257, b"ustar  \x00")],
            &formats::TAR,
        ),
    },
    Signature {
        name: "7z",
        group: Group::Archives,
        matcher: Matcher::Prefix(&[0x37, 0x7A, 0xBC, 0xAF, 0x27, 0x1C], &formats::SEVEN_ZIP),
    },
    Signature {
        name: "DEB",
        group: Group::Archives,
        matcher: Matcher::Prefix(b"!<arch>\n", &formats::DEB),
    },
    Signature {
        name: "ISO 9660",
        group: Group::Archives,
        matcher: Matcher::AnyAt(
            &[(32769, b"CD001"), (34817, b"CD001"), (36865, b"CD001")],
            &formats::ISO,
        ),
    },
    Signature {
        name: "GZIP",
        group: Group::Archives,
        matcher: Matcher::Prefix(&[0x1F, 0x8B, 0x08], &formats::GZIP),
    },
    Signature {
        name: "BZIP2",
        group: Group::Archives,
        matcher: Matcher::Prefix(b"BZh", &formats::BZIP2),
    },
    Signature {
        name: "XZ",
        group: Group::Archives,
        matcher: Matcher::Prefix(&[0xFD, 0x37, 0x7A, 0x58, 0x5A, 0x00], &formats::XZ),
    },
    Signature {
        name: "ZSTD",
        group: Group::Archives,
        matcher: Matcher::Prefix(&[0x28, 0xB5, 0x2F, 0xFD], &formats::ZSTD),
    },
    // === Documents ===
    Signature {
        name: "CFB",
        group: Group::Documents,
        matcher: Matcher::Resolve(cfb::resolve),
    },
    // === Other ===
    Signature {
        name: "Java class",
        group: Group::Misc,
        matcher: Matcher::Prefix(&[0xCA, 0xFE, 0xBA, 0xBE], &formats::JAVA_CLASS),
    },
    Signature {
        name: "PE",
        group: Group::Misc,
        matcher: Matcher::Resolve(pe::resolve),
    },
    Signature {
        name: "PDF",
        group: Group::Misc,
        matcher: Matcher::Prefix(b"%PDF", &formats::PDF),
    },
    Signature {
        name: "VDI",
        group: Group::Misc,
        matcher: Matcher::Prefix(b"<<< Oracle VM VirtualBox Disk Image >>>", &formats::VDI),
    },
    Signature {
        name: "LNK",
        group: Group::Misc,
        matcher: Matcher::Prefix(
            &[0x4C, 0x00, 0x00, 0x00, 0x01, 0x14, 0x02, 0x00],
            &formats::LNK,
        ),
    },
    Signature {
        name: "ELF",
        group: Group::Misc,
        matcher: Matcher::Prefix(&[0x7F, 0x45, 0x4C, 0x46], &formats::ELF),
    },
    Signature {
        name: "SQLite",
        group: Group::Misc,
        matcher: Matcher::Prefix(b"SQLite format 3\x00", &formats::SQLITE),
    },
    Signature {
        name: "WASM",
        group: Group::Misc,
        matcher: Matcher::Prefix(&[0x00, 0x61, 0x73, 0x6D], &formats::WASM),
    },
];

// Longest brand first: "jp20" shares its first bytes with "jp2" and would
// otherwise never report JPA
static JP2_BRANDS: &[(&[u8], &KnownFormat)] = &[
    (b"jp20", &formats::JPA),
    (b"jp2", &formats::JP2),
    (b"jpx", &formats::JPX),
    (b"jpm", &formats::JPM),
    (b"mjp2", &formats::MJ2),
];

/// JPEG 2000: 12-byte signature box, then the `ftyp` brand at offset 20
pub(crate) fn discriminate_jp2(data: &[u8]) -> Option<&'static KnownFormat> {
    const SIGNATURE_BOX: &[u8] = &[
        0x00, 0x00, 0x00, 0x0C, 0x6A, 0x50, 0x20, 0x20, 0x0D, 0x0A, 0x87, 0x0A,
    ];
    if !match_prefix(data, SIGNATURE_BOX) {
        return None;
    }
    let brand = JP2_BRANDS
        .iter()
        .find(|(brand, _)| match_at(data, 20, brand))
        .map(|&(_, format)| format);

    Some(brand.unwrap_or(&formats::JP2))
}

/// MP4/MOV family: `ftyp` box at offset 4, major brand at offset 8
pub(crate) fn discriminate_ftyp(data: &[u8]) -> Option<&'static KnownFormat> {
    if !match_at(data, 4, b"ftyp") {
        return None;
    }
    let format = if match_at(data, 8, b"qt") {
        &formats::MOV
    } else if match_at(data, 8, b"M4P") {
        &formats::M4P
    } else if match_at(data, 8, b"M4A") {
        &formats::M4A
    } else if match_at(data, 8, b"M4V") {
        // Also covers the M4VH and M4VP brands
        &formats::M4V
    } else if match_at(data, 8, b"3gp") {
        &formats::THREE_GP
    } else {
        &formats::ISO_MEDIA_UNKNOWN
    };
    Some(format)
}

/// IFF: only AIFF is told apart; other FORM types are reported as unknown IFF
pub(crate) fn discriminate_iff(data: &[u8]) -> Option<&'static KnownFormat> {
    if !match_prefix(data, b"FORM") {
        return None;
    }
    if match_at(data, 8, b"AIFF") {
        Some(&formats::AIFF)
    } else {
        Some(&formats::IFF_UNKNOWN)
    }
}

/// RIFF sub-type discriminator: checks bytes 8-11 to distinguish WAV/AVI/WEBP
pub(crate) fn discriminate_riff(data: &[u8]) -> Option<&'static KnownFormat> {
    if !match_prefix(data, b"RIFF") {
        return None;
    }
    match data.get(8..12)? {
        b"WAVE" => Some(&formats::WAV),
        b"AVI " => Some(&formats::AVI),
        b"WEBP" => Some(&formats::WEBP),
        _ => None,
    }
}

/// OGG: codec identification header of the first packet starts at offset 28
pub(crate) fn discriminate_ogg(data: &[u8]) -> Option<&'static KnownFormat> {
    static CODECS: &[(&[u8], &KnownFormat)] = &[
        (&[0x7F, 0x46, 0x4C, 0x41, 0x43], &formats::OGA),
        (&[0x01, 0x76, 0x6F, 0x72, 0x62, 0x69, 0x73], &formats::OGG),
        (&[0x01, 0x76, 0x69, 0x64, 0x65, 0x6F, 0x00], &formats::OGM),
        (&[0x80, 0x74, 0x68, 0x65, 0x6F, 0x72, 0x61], &formats::OGV),
        (b"OpusHead", &formats::OPUS),
        (b"Speex  ", &formats::SPX),
    ];
    if !match_prefix(data, b"OggS") {
        return None;
    }
    let format = CODECS
        .iter()
        .find(|(id, _)| match_at(data, 28, id))
        .map(|&(_, format)| format)
        .unwrap_or(&formats::OGX);
    Some(format)
}
