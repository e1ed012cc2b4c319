//! Extension and media-type lookup over the catalog's formats.
//!
//! Built once per process on first use and never mutated.

use std::collections::HashMap;
use std::sync::LazyLock;

use super::formats::{KnownFormat, ALL_FORMATS};

static BY_EXTENSION: LazyLock<HashMap<String, &'static KnownFormat>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    for &format in ALL_FORMATS {
        if format.extension.is_empty() {
            continue;
        }
        // First registration wins (JPEG/JFIF over the other JPEG variants)
        map.entry(format.extension.to_ascii_lowercase())
            .or_insert(format);
    }
    map
});

static BY_MEDIA_TYPE: LazyLock<HashMap<&'static str, Vec<&'static KnownFormat>>> =
    LazyLock::new(|| {
        let mut map: HashMap<&'static str, Vec<&'static KnownFormat>> = HashMap::new();
        for &format in ALL_FORMATS.iter().filter(|f| !f.extension.is_empty()) {
            let entry = map.entry(format.mime).or_default();
            if !entry.iter().any(|f| f.extension == format.extension) {
                entry.push(format);
            }
        }
        map
    });

/// Catalog format for a file extension, with or without the leading dot
pub fn format_for_extension(ext: &str) -> Option<&'static KnownFormat> {
    let ext = ext.trim_start_matches('.').to_ascii_lowercase();
    BY_EXTENSION.get(&ext).copied()
}

/// Catalog formats sharing a media type, one per distinct extension
pub fn formats_for_media_type(mime: &str) -> &'static [&'static KnownFormat] {
    BY_MEDIA_TYPE
        .get(mime.trim().to_ascii_lowercase().as_str())
        .map(Vec::as_slice)
        .unwrap_or(&[])
}
