//! Every format the catalog can report.
//!
//! Several signatures may yield the same format (TIFF has two byte orders,
//! MPEG three start codes), so formats live apart from the rules that find
//! them.

use super::descriptor::{Category, FormatDescriptor};

/// A static catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownFormat {
    pub extension: &'static str,
    pub mime: &'static str,
    pub description: &'static str,
    pub category: Category,
}

impl KnownFormat {
    pub const fn new(
        extension: &'static str,
        mime: &'static str,
        description: &'static str,
        category: Category,
    ) -> Self {
        Self {
            extension,
            mime,
            description,
            category,
        }
    }

    pub fn descriptor(&self) -> FormatDescriptor {
        FormatDescriptor::new(self.extension, self.mime, self.description, self.category)
    }
}

use Category::*;

// === Images ===
pub static ICO: KnownFormat = KnownFormat::new(
    "ico",
    "image/vnd.microsoft.icon",
    "Computer icon encoded in ICO file format",
    Image,
);
pub static GIF: KnownFormat = KnownFormat::new(
    "gif",
    "image/gif",
    "Image file encoded in the Graphics Interchange Format",
    Image,
);
pub static TIFF: KnownFormat = KnownFormat::new(
    "tiff",
    "image/tiff",
    "Tagged Image File Format",
    Image,
);
pub static JPEG_JFIF: KnownFormat = KnownFormat::new(
    "jpg",
    "image/jpeg",
    "JPEG using JPEG File Interchange Format (JFIF)",
    Image,
);
pub static JPEG_EXIF: KnownFormat = KnownFormat::new(
    "jpg",
    "image/jpeg",
    "JPEG using Exchangeable Image File Format (EXIF)",
    Image,
);
pub static JPEG_SPIFF: KnownFormat = KnownFormat::new(
    "jpg",
    "image/jpeg",
    "JPEG using Still Picture Interchange File Format",
    Image,
);
pub static JP2: KnownFormat = KnownFormat::new("jp2", "image/jp2", "JPEG 2000 format", Image);
// Brand-specific descriptions and media types, so JPX, JPM and MJ2 are
// distinguishable from plain JP2 in listings
pub static JPX: KnownFormat = KnownFormat::new(
    "jpx",
    "image/jpx",
    "JPEG 2000 format (extended)",
    Image,
);
pub static JPM: KnownFormat = KnownFormat::new(
    "jpm",
    "image/jpm",
    "JPEG 2000 compound image format",
    Image,
);
// Motion JPEG 2000 is a video container
pub static MJ2: KnownFormat = KnownFormat::new("mj2", "video/mj2", "Motion JPEG 2000 video", Video);
pub static JPA: KnownFormat = KnownFormat::new("jpa", "image/jpa", "JPEG 2000 format", Image);
pub static PSD: KnownFormat = KnownFormat::new(
    "psd",
    "image/vnd.adobe.photoshop",
    "Photoshop Document file, Adobe Photoshop's native file format",
    Image,
);
pub static BMP: KnownFormat = KnownFormat::new(
    "bmp",
    "image/bmp",
    "A bitmap format used mostly in the Windows world",
    Image,
);
pub static PNG: KnownFormat = KnownFormat::new(
    "png",
    "image/png",
    "Image encoded in the Portable Network Graphics format",
    Image,
);

// === Video ===
pub static MKV: KnownFormat = KnownFormat::new(
    "mkv",
    "video/x-matroska",
    "Matroska media container",
    Video,
);
pub static MPEG_VIDEO: KnownFormat = KnownFormat::new(
    "mpg",
    "video/mpeg",
    "MPEG video file",
    Video,
);
pub static MPEG_PS: KnownFormat = KnownFormat::new(
    "mpg",
    "video/mpeg",
    "MPEG Program Stream",
    Video,
);
pub static MPEG_ES: KnownFormat = KnownFormat::new(
    "mpg",
    "video/mpeg",
    "MPEG-1 video and MPEG-2 video",
    Video,
);
pub static MOV: KnownFormat = KnownFormat::new(
    "mov",
    "video/quicktime",
    "ISO Media, Apple QuickTime movie, Apple QuickTime (.MOV/QT)",
    Video,
);
pub static M4P: KnownFormat = KnownFormat::new(
    "m4p",
    "audio/m4p",
    "ISO Media, Apple iTunes Audio",
    Audio,
);
pub static M4A: KnownFormat = KnownFormat::new(
    "m4a",
    "audio/mp4",
    "ISO Media, Apple iTunes Audio encoded with AAC or ALAC",
    Audio,
);
pub static M4V: KnownFormat = KnownFormat::new(
    "m4v",
    "video/x-m4v",
    "ISO Media, Apple iTunes Video (.M4V)",
    Video,
);
pub static THREE_GP: KnownFormat = KnownFormat::new(
    "3gp",
    "video/3gpp",
    "3rd Generation Partnership Project 3GPP multimedia file",
    Video,
);
// Fallback for an unrecognised `ftyp` brand; carries the QuickTime media type
// so the result is never media-type-less
pub static ISO_MEDIA_UNKNOWN: KnownFormat = KnownFormat::new(
    "",
    "video/quicktime",
    "Unknown QuickTime file format",
    Video,
);
pub static WEBM: KnownFormat = KnownFormat::new(
    "webm",
    "video/webm",
    "Matroska media container (webm)",
    Video,
);
pub static WMV: KnownFormat = KnownFormat::new(
    "wmv",
    "video/x-ms-wmv",
    "Microsoft Windows Media Audio/Video File",
    Video,
);
pub static FLV: KnownFormat = KnownFormat::new("flv", "video/x-flv", "Flash Video file", Video);

// === Audio + IFF + RIFF ===
pub static AIFF: KnownFormat = KnownFormat::new(
    "aiff",
    "audio/x-aiff",
    "Audio Interchange File Format",
    Audio,
);
// Any FORM type other than AIFF; the media type is the generic IFF one
pub static IFF_UNKNOWN: KnownFormat = KnownFormat::new(
    "",
    "application/x-iff",
    "Unknown IFF format",
    Other,
);
pub static WAV: KnownFormat = KnownFormat::new(
    "wav",
    "audio/x-wav",
    "Waveform Audio File Format",
    Audio,
);
pub static AVI: KnownFormat = KnownFormat::new(
    "avi",
    "video/x-msvideo",
    "Audio Video Interleave video format",
    Video,
);
pub static WEBP: KnownFormat = KnownFormat::new(
    "webp",
    "image/webp",
    "Google WebP image file",
    Image,
);
pub static FLAC: KnownFormat = KnownFormat::new(
    "flac",
    "audio/x-flac",
    "Free Lossless Audio Codec",
    Audio,
);
pub static OGA: KnownFormat = KnownFormat::new(
    "oga",
    "audio/ogg",
    "An open source media container format (Audio)",
    Audio,
);
pub static OGG: KnownFormat = KnownFormat::new(
    "ogg",
    "audio/ogg",
    "An open source media container format (Audio)",
    Audio,
);
pub static OGM: KnownFormat = KnownFormat::new("ogm", "video/ogg", "OGG Media Stream file", Video);
pub static OGV: KnownFormat = KnownFormat::new("ogv", "video/ogg", "Ogg Video file", Video);
pub static OPUS: KnownFormat = KnownFormat::new(
    "opus",
    "audio/opus",
    "An open source media container format (Audio)",
    Audio,
);
pub static SPX: KnownFormat = KnownFormat::new(
    "spx",
    "audio/ogg",
    "An open source media container format (Audio)",
    Audio,
);
pub static OGX: KnownFormat = KnownFormat::new(
    "ogx",
    "application/ogg",
    "An open source media container format",
    Other,
);
pub static MIDI: KnownFormat = KnownFormat::new("mid", "audio/midi", "MIDI sound file", Audio);

// === Archives ===
pub static Z_LZW: KnownFormat = KnownFormat::new(
    "Z",
    "application/x-compress",
    "Compressed tape archive file using standard Lempel-Ziv-Welch compression",
    Archive,
);
pub static Z_LZH: KnownFormat = KnownFormat::new(
    "Z",
    "application/x-compress",
    "Compressed tape archive file using Lempel-Ziv-Huffman compression",
    Archive,
);
pub static ZIP: KnownFormat = KnownFormat::new(
    "zip",
    "application/zip",
    "PKZIP archive file",
    Archive,
);
pub static EPUB: KnownFormat = KnownFormat::new(
    "epub",
    "application/epub+zip",
    "E-book file format",
    Document,
);
pub static ODT: KnownFormat = KnownFormat::new(
    "odt",
    "application/vnd.oasis.opendocument.text",
    "OpenOffice Text Document",
    Document,
);
pub static ODP: KnownFormat = KnownFormat::new(
    "odp",
    "application/vnd.oasis.opendocument.presentation",
    "OpenOffice Presentation Document",
    Document,
);
pub static ODS: KnownFormat = KnownFormat::new(
    "ods",
    "application/vnd.oasis.opendocument.spreadsheet",
    "OpenDocument Spreadsheet Document",
    Document,
);
pub static DOCX: KnownFormat = KnownFormat::new(
    "docx",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "Office Open XML File Format",
    Document,
);
pub static PPTX: KnownFormat = KnownFormat::new(
    "pptx",
    "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    "Office Open XML File Format",
    Document,
);
pub static XLSX: KnownFormat = KnownFormat::new(
    "xlsx",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "Office Open XML File Format",
    Document,
);
pub static XPI: KnownFormat = KnownFormat::new(
    "xpi",
    "application/x-xpinstall",
    "Mozilla Browser Archive",
    Archive,
);
pub static APK: KnownFormat = KnownFormat::new(
    "apk",
    "application/apk-archive",
    "Android package",
    Executable,
);
pub static JAR: KnownFormat = KnownFormat::new(
    "jar",
    "application/java-archive",
    "Java archive",
    Archive,
);
pub static RAR4: KnownFormat = KnownFormat::new(
    "rar",
    "application/vnd.rar",
    "Roshal ARchive compressed archive v1.50 onwards",
    Archive,
);
pub static RAR5: KnownFormat = KnownFormat::new(
    "rar",
    "application/vnd.rar",
    "Roshal ARchive compressed archive v5.00 onwards",
    Archive,
);
pub static TAR: KnownFormat = KnownFormat::new("tar", "application/x-tar", "tar archive", Archive);
pub static SEVEN_ZIP: KnownFormat = KnownFormat::new(
    "7z",
    "application/x-7z-compressed",
    "7-Zip File Format",
    Archive,
);
pub static DEB: KnownFormat = KnownFormat::new(
    "deb",
    "application/vnd.debian.binary-package",
    "Linux deb file",
    Archive,
);
pub static ISO: KnownFormat = KnownFormat::new(
    "iso",
    "application/x-iso9660-image",
    "ISO9660 CD/DVD image file",
    DiskImage,
);
pub static GZIP: KnownFormat = KnownFormat::new(
    "gz",
    "application/gzip",
    "GZIP compressed file",
    Archive,
);
pub static BZIP2: KnownFormat = KnownFormat::new(
    "bz2",
    "application/x-bzip2",
    "Bzip2 compressed file",
    Archive,
);
pub static XZ: KnownFormat = KnownFormat::new(
    "xz",
    "application/x-xz",
    "XZ compressed file",
    Archive,
);
pub static ZSTD: KnownFormat = KnownFormat::new(
    "zst",
    "application/zstd",
    "Zstandard compressed file",
    Archive,
);

// === Documents ===
pub static DOC: KnownFormat = KnownFormat::new(
    "doc",
    "application/msword",
    "MS Office Word document file",
    Document,
);
pub static PPT: KnownFormat = KnownFormat::new(
    "ppt",
    "application/vnd.ms-powerpoint",
    "MS Office PowerPoint presentation file",
    Document,
);
pub static XLS: KnownFormat = KnownFormat::new(
    "xls",
    "application/vnd.ms-excel",
    "MS Office Excel spreadsheet file",
    Document,
);
pub static MSI: KnownFormat = KnownFormat::new(
    "msi",
    "application/x-msi",
    "Microsoft Software Installer",
    Executable,
);

// === Other ===
pub static JAVA_CLASS: KnownFormat = KnownFormat::new(
    "class",
    "application/x-java-class",
    "Java class file",
    Executable,
);
pub static DLL: KnownFormat = KnownFormat::new(
    "dll",
    "application/x-msdownload",
    "Dynamic-link library for Microsoft Windows",
    Executable,
);
pub static EXE: KnownFormat = KnownFormat::new(
    "exe",
    "application/x-msdownload",
    "Executable file for Microsoft Windows",
    Executable,
);
pub static PDF: KnownFormat = KnownFormat::new(
    "pdf",
    "application/pdf",
    "Portable Document Format",
    Document,
);
pub static VDI: KnownFormat = KnownFormat::new(
    "vdi",
    "application/x-virtualbox-vdi",
    "Oracle VirtualBox Disk Image",
    DiskImage,
);
pub static LNK: KnownFormat = KnownFormat::new(
    "lnk",
    "application/x-ms-shortcut",
    "Windows shell link (shortcut) file",
    Other,
);
pub static ELF: KnownFormat = KnownFormat::new(
    "elf",
    "application/x-executable",
    "Executable and Linkable Format binary",
    Executable,
);
pub static SQLITE: KnownFormat = KnownFormat::new(
    "sqlite",
    "application/vnd.sqlite3",
    "SQLite 3 database file",
    Other,
);
pub static WASM: KnownFormat = KnownFormat::new(
    "wasm",
    "application/wasm",
    "WebAssembly binary module",
    Executable,
);

/// All formats in catalog order
#[rustfmt::skip]
pub static ALL_FORMATS: &[&KnownFormat] = &[
    &ICO, &GIF, &TIFF, &JPEG_JFIF, &JPEG_EXIF, &JPEG_SPIFF, &JP2, &JPX, &JPM, &MJ2, &JPA,
    &PSD, &BMP, &PNG,
    &MKV, &MPEG_VIDEO, &MPEG_PS, &MPEG_ES, &MOV, &M4P, &M4A, &M4V, &THREE_GP,
    &ISO_MEDIA_UNKNOWN, &WEBM, &WMV, &FLV,
    &AIFF, &IFF_UNKNOWN, &WAV, &AVI, &WEBP, &FLAC, &OGA, &OGG, &OGM, &OGV, &OPUS, &SPX,
    &OGX, &MIDI,
    &Z_LZW, &Z_LZH, &ZIP, &EPUB, &ODT, &ODP, &ODS, &DOCX, &PPTX, &XLSX, &XPI, &APK, &JAR,
    &RAR4, &RAR5, &TAR, &SEVEN_ZIP, &DEB, &ISO, &GZIP, &BZIP2, &XZ, &ZSTD,
    &DOC, &PPT, &XLS, &MSI,
    &JAVA_CLASS, &DLL, &EXE, &PDF, &VDI, &LNK, &ELF, &SQLITE, &WASM,
];
