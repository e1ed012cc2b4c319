//! Scanner - Parallel directory scanner that identifies every file by content
//!
//! Walks the tree with walkdir, then probes files on a rayon pool. Each entry
//! records whether the file's name agrees with what its bytes say.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::Serialize;
use walkdir::{DirEntry, WalkDir};

use crate::magic::{Category, FormatDescriptor};
use crate::probe::{Probe, Prober, ReadTier};

/// Scanner configuration options
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Root directory (or single file) to scan
    pub source: PathBuf,
    /// Skip hidden files and directories
    pub skip_hidden: bool,
    /// Maximum traversal depth
    pub max_depth: Option<usize>,
    /// File extensions to include (None = all)
    pub extensions: Option<Vec<String>>,
    /// Number of parallel workers (0 = CPU count)
    pub workers: usize,
    /// How each file is read
    pub prober: Prober,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            source: PathBuf::from("."),
            skip_hidden: true,
            max_depth: None,
            extensions: None,
            workers: 0,
            prober: Prober::default(),
        }
    }
}

/// Outcome for one file
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScanOutcome {
    Identified {
        format: FormatDescriptor,
        rule: &'static str,
        tier: ReadTier,
        /// Name and content disagree
        extension_mismatch: bool,
    },
    Unknown,
    Failed {
        error: String,
    },
}

/// One scanned file
#[derive(Debug, Clone, Serialize)]
pub struct ScanEntry {
    pub path: PathBuf,
    pub size: u64,
    #[serde(flatten)]
    pub outcome: ScanOutcome,
}

impl ScanEntry {
    pub fn format(&self) -> Option<&FormatDescriptor> {
        match &self.outcome {
            ScanOutcome::Identified { format, .. } => Some(format),
            _ => None,
        }
    }

    pub fn is_mismatch(&self) -> bool {
        matches!(
            self.outcome,
            ScanOutcome::Identified {
                extension_mismatch: true,
                ..
            }
        )
    }

    pub fn category(&self) -> Option<Category> {
        self.format().map(|f| f.category)
    }
}

/// Statistics from a scan operation
#[derive(Debug, Default, Clone, Serialize)]
pub struct ScanStats {
    pub files_found: usize,
    pub identified: usize,
    pub unknown: usize,
    pub errors: usize,
    pub mismatches: usize,
    pub full_reads: usize,
    pub bytes_total: u64,
    pub duration_ms: u64,
}

/// Result of a scan: entries sorted by path plus totals
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub source: PathBuf,
    pub stats: ScanStats,
    pub entries: Vec<ScanEntry>,
}

/// Parallel content scanner
pub struct Scanner {
    options: ScanOptions,
}

impl Scanner {
    pub fn new(options: ScanOptions) -> Self {
        Self { options }
    }

    /// Walk the source and probe every file
    pub fn scan(&self) -> Result<ScanReport> {
        let start = Instant::now();
        let options = &self.options;

        anyhow::ensure!(
            options.source.exists(),
            "Scan source not found: {}",
            options.source.display()
        );

        let paths = self.collect_paths();
        tracing::debug!(files = paths.len(), source = %options.source.display(), "Walk complete");

        let workers = if options.workers == 0 {
            num_cpus::get()
        } else {
            options.workers
        };
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()
            .context("Failed to build scan thread pool")?;

        let mut entries: Vec<ScanEntry> = pool.install(|| {
            paths
                .par_iter()
                .map(|path| scan_one(&options.prober, path))
                .collect()
        });
        entries.sort_by(|a, b| a.path.cmp(&b.path));

        let mut stats = ScanStats {
            files_found: entries.len(),
            ..Default::default()
        };
        for entry in &entries {
            stats.bytes_total += entry.size;
            match &entry.outcome {
                ScanOutcome::Identified {
                    tier,
                    extension_mismatch,
                    ..
                } => {
                    stats.identified += 1;
                    if *extension_mismatch {
                        stats.mismatches += 1;
                    }
                    if *tier == ReadTier::FullFile {
                        stats.full_reads += 1;
                    }
                }
                ScanOutcome::Unknown => stats.unknown += 1,
                ScanOutcome::Failed { .. } => stats.errors += 1,
            }
        }
        stats.duration_ms = start.elapsed().as_millis() as u64;

        tracing::info!(
            files = stats.files_found,
            identified = stats.identified,
            unknown = stats.unknown,
            errors = stats.errors,
            mismatches = stats.mismatches,
            duration_ms = stats.duration_ms,
            "Scan complete"
        );

        Ok(ScanReport {
            source: options.source.clone(),
            stats,
            entries,
        })
    }

    fn collect_paths(&self) -> Vec<PathBuf> {
        let options = &self.options;
        let mut walker = WalkDir::new(&options.source).follow_links(false);
        if let Some(depth) = options.max_depth {
            walker = walker.max_depth(depth);
        }

        let source_path = options.source.clone();
        let skip_hidden = options.skip_hidden;
        walker
            .into_iter()
            .filter_entry(move |e| !skip_hidden || e.path() == source_path || !is_hidden(e))
            .filter_map(|e| match e {
                Ok(entry) => Some(entry),
                Err(err) => {
                    tracing::warn!("Skipping unreadable entry: {}", err);
                    None
                }
            })
            .filter(|e| e.file_type().is_file())
            .filter(|e| extension_allowed(e.path(), options.extensions.as_deref()))
            .map(DirEntry::into_path)
            .collect()
    }
}

fn scan_one(prober: &Prober, path: &Path) -> ScanEntry {
    let size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
    let outcome = match prober.probe_path(path) {
        Ok(Probe {
            format, rule, tier, ..
        }) => ScanOutcome::Identified {
            extension_mismatch: extension_mismatch(path, &format),
            format,
            rule,
            tier,
        },
        Err(e) if e.is_unknown_format() => ScanOutcome::Unknown,
        Err(e) => {
            tracing::warn!("Error probing {}: {}", path.display(), e);
            ScanOutcome::Failed {
                error: e.to_string(),
            }
        }
    };
    ScanEntry {
        path: path.to_path_buf(),
        size,
        outcome,
    }
}

/// True when the file name claims a different format than its content.
///
/// Files without an extension, and unknown sub-variants without a canonical
/// extension, never count as mismatches.
pub fn extension_mismatch(path: &Path, format: &FormatDescriptor) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    if format.extension.is_empty() || ext.eq_ignore_ascii_case(format.extension) {
        return false;
    }
    let detected = format.mime();
    !mime_guess::from_ext(ext)
        .iter()
        .any(|guess| guess.essence_str().eq_ignore_ascii_case(&detected))
}

fn extension_allowed(path: &Path, allowed: Option<&[String]>) -> bool {
    let Some(allowed) = allowed else {
        return true;
    };
    path.extension()
        .map(|ext| {
            let ext_str = ext.to_string_lossy().to_lowercase();
            allowed
                .iter()
                .any(|a| a.to_lowercase().trim_start_matches('.') == ext_str)
        })
        .unwrap_or(false)
}

/// Check if entry is hidden (starts with .)
fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|s| s.starts_with('.'))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::magic::identify;
    use tempfile::tempdir;

    fn write(dir: &Path, name: &str, data: &[u8]) {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, data).unwrap();
    }

    #[test]
    fn test_scan_identifies_and_sorts() {
        let dir = tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        write(&root, "b.pdf", b"%PDF-1.4\n");
        write(&root, "a.png", b"\x89PNG\r\n\x1a\n");
        write(&root, "notes.txt", b"just text");
        write(&root, "sub/c.gz", &[0x1F, 0x8B, 0x08, 0x00]);

        let report = Scanner::new(ScanOptions {
            source: root.clone(),
            skip_hidden: false,
            workers: 2,
            ..Default::default()
        })
        .scan()
        .unwrap();

        assert_eq!(report.stats.files_found, 4);
        assert_eq!(report.stats.identified, 3);
        assert_eq!(report.stats.unknown, 1);
        assert_eq!(report.stats.errors, 0);
        assert_eq!(report.stats.mismatches, 0);

        let names: Vec<_> = report
            .entries
            .iter()
            .map(|e| e.path.strip_prefix(&root).unwrap().to_string_lossy().into_owned())
            .collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_scan_flags_renamed_file() {
        let dir = tempdir().unwrap();
        write(dir.path(), "holiday.jpg", b"%PDF-1.7\n");

        let report = Scanner::new(ScanOptions {
            source: dir.path().to_path_buf(),
            workers: 1,
            ..Default::default()
        })
        .scan()
        .unwrap();

        assert_eq!(report.stats.mismatches, 1);
        assert!(report.entries[0].is_mismatch());
        assert_eq!(report.entries[0].category(), Some(Category::Document));
    }

    #[test]
    fn test_scan_skips_hidden_and_filters_extensions() {
        let dir = tempdir().unwrap();
        write(dir.path(), ".secret/key.pdf", b"%PDF-1.7\n");
        write(dir.path(), "visible.pdf", b"%PDF-1.7\n");
        write(dir.path(), "visible.png", b"\x89PNG\r\n\x1a\n");

        let report = Scanner::new(ScanOptions {
            source: dir.path().to_path_buf(),
            skip_hidden: true,
            extensions: Some(vec![".PDF".to_string()]),
            workers: 1,
            ..Default::default()
        })
        .scan()
        .unwrap();

        assert_eq!(report.stats.files_found, 1);
        assert!(report.entries[0].path.ends_with("visible.pdf"));
    }

    #[test]
    fn test_scan_missing_source() {
        let result = Scanner::new(ScanOptions {
            source: PathBuf::from("/nonexistent/scan/root"),
            ..Default::default()
        })
        .scan();
        assert!(result.is_err());
    }

    #[test]
    fn test_extension_mismatch_rules() {
        let pdf = identify(b"%PDF-1.7").unwrap();
        assert!(!extension_mismatch(Path::new("a.pdf"), &pdf));
        assert!(!extension_mismatch(Path::new("A.PDF"), &pdf));
        assert!(!extension_mismatch(Path::new("README"), &pdf));
        assert!(extension_mismatch(Path::new("a.docx"), &pdf));

        // Aliases resolve through the media type
        let jpg = identify(&[0xFF, 0xD8, 0xFF, 0xE0]).unwrap();
        assert!(!extension_mismatch(Path::new("photo.jpeg"), &jpg));

        // Unknown sub-variants have no canonical extension to disagree with
        let iff = identify(b"FORM\x00\x00\x00\x0c8SVX").unwrap();
        assert!(!extension_mismatch(Path::new("sample.8svx"), &iff));
    }

    #[test]
    fn test_scan_entry_serializes_status() {
        let entry = ScanEntry {
            path: PathBuf::from("x.bin"),
            size: 3,
            outcome: ScanOutcome::Unknown,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["status"], "unknown");
        assert_eq!(json["size"], 3);
    }
}
