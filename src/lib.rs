//! Diamond Probe Library
//!
//! Content-sniffing file format detection - identifies ~90 image, media,
//! archive, document and executable formats from their leading bytes.
//!
//! # Features
//!
//! - **Ordered Catalog**: First-match-wins signature table, deterministic results
//! - **Container Aware**: Tells DOCX from ZIP, DOC from MSI, DLL from EXE
//! - **Bounded Reads**: Samples a prefix, maps the whole file only on a miss
//! - **Parallel Scanning**: Uses rayon to identify whole directory trees
//! - **Read-Only Safe**: Never modifies source data
//!
//! # Example
//!
//! ```
//! use diamond_probe::identify;
//!
//! let format = identify(b"\x89PNG\r\n\x1a\n").unwrap();
//! assert_eq!(format.extension, "png");
//! assert_eq!(format.mime(), "image/png");
//!
//! assert!(identify(b"plain text").is_err());
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod magic;
pub mod probe;
pub mod report;
pub mod scan;

// Re-export commonly used types
pub use config::Config;
pub use error::{DetectError, ProbeError};
pub use magic::{
    first_match, format_for_extension, formats_for_media_type, identify, Category,
    FormatDescriptor, KnownFormat, Match, MediaType,
};
pub use probe::{Probe, Prober, ReadTier};
pub use scan::{ScanEntry, ScanOptions, ScanOutcome, ScanReport, ScanStats, Scanner};
