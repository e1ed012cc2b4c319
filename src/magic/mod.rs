//! Content-based format detection.
//!
//! [`identify`] runs the ordered [`signatures`] catalog over a byte buffer
//! and returns the first format that matches. The buffer may be a prefix of
//! a file or the whole file; some container rules look near the end of the
//! buffer and only succeed on a complete file.
//!
//! Matching is a pure function of the input: no I/O, no shared state, safe
//! to call from any number of threads at once.

pub mod containers;
pub mod descriptor;
pub mod formats;
pub mod lookup;
pub mod signatures;
pub mod window;

pub use descriptor::{Category, FormatDescriptor, MediaType};
pub use formats::{KnownFormat, ALL_FORMATS};
pub use lookup::{format_for_extension, formats_for_media_type};
pub use signatures::{all_signatures, Group, Matcher, Signature};

use crate::error::DetectError;

/// A successful match together with the rule that produced it
#[derive(Debug, Clone, Copy)]
pub struct Match {
    pub signature: &'static Signature,
    pub format: &'static KnownFormat,
}

impl Match {
    pub fn descriptor(&self) -> FormatDescriptor {
        self.format.descriptor()
    }
}

/// First catalog rule that matches `data`, if any
pub fn first_match(data: &[u8]) -> Option<Match> {
    all_signatures().iter().find_map(|signature| {
        signature.matcher.evaluate(data).map(|format| {
            tracing::trace!(
                rule = signature.name,
                extension = format.extension,
                "signature matched"
            );
            Match { signature, format }
        })
    })
}

/// Identify the format of `data` from its content.
pub fn identify(data: &[u8]) -> Result<FormatDescriptor, DetectError> {
    first_match(data)
        .map(|m| m.descriptor())
        .ok_or(DetectError::UnknownFormat)
}
