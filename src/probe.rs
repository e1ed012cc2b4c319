//! Probe - identify files on disk
//!
//! Reads a bounded prefix first and only falls back to the whole file when
//! the prefix is not enough. Container rules that look near the end of the
//! buffer (OOXML parts, APK manifests, the PowerPoint stream name) need the
//! complete file.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{DetectError, ProbeError};
use crate::magic::{self, FormatDescriptor};

/// Default prefix size for the first read
pub const DEFAULT_SAMPLE_SIZE: usize = 500_000;

/// Number of leading bytes kept for display
pub const MAGIC_PREVIEW_LEN: usize = 16;

/// Which read produced the result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadTier {
    /// The bounded prefix was enough (or was the whole file)
    Prefix,
    /// The prefix missed and the whole file was mapped
    FullFile,
}

/// Result of probing one file
#[derive(Debug, Clone, Serialize)]
pub struct Probe {
    pub path: PathBuf,
    pub size: u64,
    pub tier: ReadTier,
    pub format: FormatDescriptor,
    /// Matched catalog rule
    pub rule: &'static str,
    /// First bytes of the file
    #[serde(serialize_with = "serialize_hex")]
    pub magic: Vec<u8>,
}

fn serialize_hex<T, S>(bytes: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: AsRef<[u8]>,
    S: serde::Serializer,
{
    serializer.serialize_str(&hex::encode(bytes.as_ref()))
}

/// File prober configuration
#[derive(Debug, Clone)]
pub struct Prober {
    /// Bytes read on the first attempt
    pub sample_size: usize,
    /// Map the whole file when the prefix is not recognised
    pub full_read_on_miss: bool,
}

impl Default for Prober {
    fn default() -> Self {
        Self {
            sample_size: DEFAULT_SAMPLE_SIZE,
            full_read_on_miss: true,
        }
    }
}

impl Prober {
    pub fn new(sample_size: usize, full_read_on_miss: bool) -> Self {
        Self {
            sample_size,
            full_read_on_miss,
        }
    }

    /// Identify a file by content
    pub fn probe_path(&self, path: &Path) -> Result<Probe, ProbeError> {
        let file = File::open(path).map_err(|e| ProbeError::io(path, e))?;
        let size = file.metadata().map_err(|e| ProbeError::io(path, e))?.len();

        let mut sample = Vec::with_capacity(self.sample_size.min(size as usize));
        (&file)
            .take(self.sample_size as u64)
            .read_to_end(&mut sample)
            .map_err(|e| ProbeError::io(path, e))?;

        let magic = sample[..sample.len().min(MAGIC_PREVIEW_LEN)].to_vec();

        if let Some(m) = magic::first_match(&sample) {
            return Ok(Probe {
                path: path.to_path_buf(),
                size,
                tier: ReadTier::Prefix,
                format: m.descriptor(),
                rule: m.signature.name,
                magic,
            });
        }

        if !self.full_read_on_miss || (sample.len() as u64) >= size {
            return Err(DetectError::UnknownFormat.into());
        }

        tracing::debug!(
            path = %path.display(),
            sampled = sample.len(),
            size,
            "Prefix not recognised, mapping whole file"
        );
        drop(sample);

        // SAFETY: the mapping is read-only and dropped before returning; a
        // concurrent truncation of the file can still fault, as with any mmap
        let mmap = unsafe { memmap2::Mmap::map(&file) }.map_err(|e| ProbeError::io(path, e))?;

        let m = magic::first_match(&mmap).ok_or(DetectError::UnknownFormat)?;
        Ok(Probe {
            path: path.to_path_buf(),
            size,
            tier: ReadTier::FullFile,
            format: m.descriptor(),
            rule: m.signature.name,
            magic,
        })
    }

    /// Identify an in-memory buffer with the same two-tier policy, treating
    /// `data` as the complete file
    pub fn probe_bytes(&self, data: &[u8]) -> Result<(FormatDescriptor, ReadTier), DetectError> {
        let prefix = &data[..data.len().min(self.sample_size)];
        match magic::identify(prefix) {
            Ok(format) => Ok((format, ReadTier::Prefix)),
            Err(e) if !self.full_read_on_miss || prefix.len() == data.len() => Err(e),
            Err(_) => magic::identify(data).map(|format| (format, ReadTier::FullFile)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    /// ZIP whose first entry is `[Content_Types].xml`, with the Word part
    /// placed far enough in that a small prefix misses it
    fn padded_docx(padding: usize) -> Vec<u8> {
        let mut data = Vec::new();
        let name = b"[Content_Types].xml";
        data.extend_from_slice(b"PK\x03\x04");
        data.extend_from_slice(&[0u8; 22]);
        data.extend_from_slice(&(name.len() as u16).to_le_bytes());
        data.extend_from_slice(&[0u8; 2]);
        data.extend_from_slice(name);
        data.extend(std::iter::repeat(b' ').take(padding));
        data.extend_from_slice(b"PK\x03\x04word/document.xml");
        data.extend_from_slice(&[0u8; 32]);
        data
    }

    #[test]
    fn test_probe_prefix_tier() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("image.bin");
        std::fs::write(&path, b"\x89PNG\r\n\x1a\n\x00\x00\x00\rIHDR").unwrap();

        let probe = Prober::default().probe_path(&path).unwrap();
        assert_eq!(probe.format.extension, "png");
        assert_eq!(probe.tier, ReadTier::Prefix);
        assert_eq!(probe.rule, "PNG");
        assert_eq!(probe.size, 16);
        assert_eq!(probe.magic.len(), 16);
    }

    #[test]
    fn test_probe_prefix_hides_ooxml_part() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.bin");
        std::fs::write(&path, padded_docx(4096)).unwrap();

        // A 1 KiB sample only sees a plain ZIP, and a match is never retried
        let prober = Prober::new(1024, true);
        let probe = prober.probe_path(&path).unwrap();
        assert_eq!(probe.tier, ReadTier::Prefix);
        assert_eq!(probe.format.extension, "zip");

        // The whole file reveals the Word part
        let probe = Prober::new(1 << 20, true).probe_path(&path).unwrap();
        assert_eq!(probe.format.extension, "docx");
    }

    #[test]
    fn test_probe_retries_cfb_with_whole_file() {
        let mut data = vec![0u8; 8192];
        data[..8].copy_from_slice(&[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1]);
        let marker: Vec<u8> = "PowerPoint Document"
            .encode_utf16()
            .flat_map(|u| u.to_le_bytes())
            .collect();
        data[7000..7000 + marker.len()].copy_from_slice(&marker);

        let dir = tempdir().unwrap();
        let path = dir.path().join("slides.bin");
        std::fs::write(&path, &data).unwrap();

        let probe = Prober::new(1024, true).probe_path(&path).unwrap();
        assert_eq!(probe.format.extension, "ppt");
        assert_eq!(probe.tier, ReadTier::FullFile);

        let err = Prober::new(1024, false).probe_path(&path).unwrap_err();
        assert!(err.is_unknown_format());
    }

    #[test]
    fn test_probe_empty_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty");
        std::fs::write(&path, b"").unwrap();

        let err = Prober::default().probe_path(&path).unwrap_err();
        assert!(err.is_unknown_format());
    }

    #[test]
    fn test_probe_missing_file() {
        let err = Prober::default()
            .probe_path(Path::new("/nonexistent/file.bin"))
            .unwrap_err();
        assert!(matches!(err, ProbeError::Io { .. }));
    }

    #[test]
    fn test_probe_bytes_tiers() {
        let mut data = vec![0u8; 8192];
        data[..8].copy_from_slice(&[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1]);
        data[512..516].copy_from_slice(&[0xEC, 0xA5, 0xC1, 0x00]);

        let (format, tier) = Prober::new(1024, true).probe_bytes(&data).unwrap();
        assert_eq!(format.extension, "doc");
        assert_eq!(tier, ReadTier::Prefix);

        // 256 bytes stop short of the first sector
        let (format, tier) = Prober::new(256, true).probe_bytes(&data).unwrap();
        assert_eq!(format.extension, "doc");
        assert_eq!(tier, ReadTier::FullFile);

        assert!(Prober::new(256, false).probe_bytes(&data).is_err());
    }

    #[test]
    fn test_probe_serializes_magic_as_hex() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("doc.pdf");
        std::fs::write(&path, b"%PDF-1.7").unwrap();

        let probe = Prober::default().probe_path(&path).unwrap();
        let json = serde_json::to_value(&probe).unwrap();
        assert_eq!(json["magic"], "255044462d312e37");
        assert_eq!(json["tier"], "prefix");
        assert_eq!(json["format"]["extension"], "pdf");
    }
}
