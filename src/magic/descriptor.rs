//! Detected format values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Coarse format categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Image,
    Video,
    Audio,
    Archive,
    Document,
    Executable,
    DiskImage,
    Other,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Image,
        Category::Video,
        Category::Audio,
        Category::Archive,
        Category::Document,
        Category::Executable,
        Category::DiskImage,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Image => "image",
            Category::Video => "video",
            Category::Audio => "audio",
            Category::Archive => "archive",
            Category::Document => "document",
            Category::Executable => "executable",
            Category::DiskImage => "disk-image",
            Category::Other => "other",
        }
    }

    /// Get color for terminal display
    pub fn color_code(&self) -> &'static str {
        match self {
            Category::Image => "\x1b[35m",      // Magenta
            Category::Video => "\x1b[36m",      // Cyan
            Category::Audio => "\x1b[33m",      // Yellow
            Category::Document => "\x1b[32m",   // Green
            Category::Archive => "\x1b[34m",    // Blue
            Category::Executable => "\x1b[91m", // Bright Red
            Category::DiskImage => "\x1b[94m",  // Bright Blue
            Category::Other => "\x1b[37m",      // White
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `type/subtype` media type pair.
///
/// The subtype is empty only when the source string had no `/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MediaType {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub subtype: &'static str,
}

impl MediaType {
    /// Split on the first `/`.
    pub fn parse(mime: &'static str) -> Self {
        match mime.split_once('/') {
            Some((kind, subtype)) => Self { kind, subtype },
            None => Self {
                kind: mime,
                subtype: "",
            },
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.subtype)
    }
}

/// The result of a successful match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FormatDescriptor {
    pub media_type: MediaType,
    /// Canonical extension without the dot; empty for unknown sub-variants
    pub extension: &'static str,
    pub description: &'static str,
    pub category: Category,
}

impl FormatDescriptor {
    pub fn new(
        extension: &'static str,
        mime: &'static str,
        description: &'static str,
        category: Category,
    ) -> Self {
        Self {
            media_type: MediaType::parse(mime),
            extension,
            description,
            category,
        }
    }

    /// Media type rendered as `type/subtype`
    pub fn mime(&self) -> String {
        self.media_type.to_string()
    }
}

impl fmt::Display for FormatDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) [{}]",
            self.description, self.extension, self.media_type
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_type_split() {
        let mt = MediaType::parse("image/png");
        assert_eq!(mt.kind, "image");
        assert_eq!(mt.subtype, "png");
        assert_eq!(mt.to_string(), "image/png");
    }

    #[test]
    fn test_media_type_splits_once() {
        let mt = MediaType::parse("application/x/y");
        assert_eq!(mt.kind, "application");
        assert_eq!(mt.subtype, "x/y");
    }

    #[test]
    fn test_media_type_without_separator() {
        let mt = MediaType::parse("octet");
        assert_eq!(mt.kind, "octet");
        assert_eq!(mt.subtype, "");
        let empty = MediaType::parse("");
        assert_eq!((empty.kind, empty.subtype), ("", ""));
    }

    #[test]
    fn test_descriptor_display() {
        let d = FormatDescriptor::new(
            "pdf",
            "application/pdf",
            "Portable Document Format",
            Category::Document,
        );
        assert_eq!(d.to_string(), "Portable Document Format (pdf) [application/pdf]");
        assert_eq!(d.mime(), "application/pdf");
    }

    #[test]
    fn test_descriptor_serializes_flat_media_type() {
        let d = FormatDescriptor::new("png", "image/png", "PNG", Category::Image);
        let json = serde_json::to_value(d).unwrap();
        assert_eq!(json["media_type"]["type"], "image");
        assert_eq!(json["media_type"]["subtype"], "png");
        assert_eq!(json["category"], "image");
    }

    #[test]
    fn test_category_names_unique() {
        let mut names: Vec<_> = Category::ALL.iter().map(|c| c.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), Category::ALL.len());
    }
}
