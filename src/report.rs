//! Report - human and JSON rendering for probes, scans and the format catalog

use std::path::{Path, PathBuf};

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use crate::error::ProbeError;
use crate::magic::{Category, FormatDescriptor};
use crate::probe::{Probe, ReadTier};
use crate::scan::{ScanEntry, ScanOutcome, ScanReport};

/// Rendering preferences
#[derive(Debug, Clone, Copy)]
pub struct ReportOptions {
    pub color: bool,
    pub show_magic: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            color: true,
            show_magic: false,
        }
    }
}

/// One `identify` result, as emitted in JSON
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum IdentifyRecord {
    Identified(Probe),
    Unknown { path: PathBuf },
    Failed { path: PathBuf, error: String },
}

impl IdentifyRecord {
    pub fn from_result(path: &Path, result: Result<Probe, ProbeError>) -> Self {
        match result {
            Ok(probe) => IdentifyRecord::Identified(probe),
            Err(e) if e.is_unknown_format() => IdentifyRecord::Unknown {
                path: path.to_path_buf(),
            },
            Err(e) => IdentifyRecord::Failed {
                path: path.to_path_buf(),
                error: e.to_string(),
            },
        }
    }

    pub fn is_identified(&self) -> bool {
        matches!(self, IdentifyRecord::Identified(_))
    }
}

/// Serialize any report value as pretty JSON
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn paint_category(text: &str, category: Category, opts: &ReportOptions) -> String {
    if opts.color {
        format!("{}{}\x1b[0m", category.color_code(), text)
    } else {
        text.to_string()
    }
}

fn alert(text: &str, opts: &ReportOptions) -> String {
    if opts.color {
        text.red().bold().to_string()
    } else {
        text.to_string()
    }
}

fn describe(format: &FormatDescriptor, opts: &ReportOptions) -> String {
    let ext = if format.extension.is_empty() {
        "?"
    } else {
        format.extension
    };
    format!(
        "{} [{}] {}",
        paint_category(ext, format.category, opts),
        format.mime(),
        format.description
    )
}

/// Render identify results, one line per file
pub fn format_identify(records: &[IdentifyRecord], opts: &ReportOptions) -> String {
    let mut out = String::new();

    for record in records {
        match record {
            IdentifyRecord::Identified(probe) => {
                out.push_str(&format!(
                    "{}: {}",
                    probe.path.display(),
                    describe(&probe.format, opts)
                ));
                if probe.tier == ReadTier::FullFile {
                    out.push_str(" (full read)");
                }
                out.push('\n');
                if opts.show_magic {
                    out.push_str(&format!(
                        "    magic: {}  size: {}\n",
                        hex::encode(&probe.magic),
                        humansize::format_size(probe.size, humansize::BINARY)
                    ));
                }
            }
            IdentifyRecord::Unknown { path } => {
                out.push_str(&format!(
                    "{}: {}\n",
                    path.display(),
                    alert("unknown format", opts)
                ));
            }
            IdentifyRecord::Failed { path, error } => {
                out.push_str(&format!(
                    "{}: {} {}\n",
                    path.display(),
                    alert("error:", opts),
                    error
                ));
            }
        }
    }

    out
}

/// Which scan entries to show
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanFilter {
    pub mismatches_only: bool,
    pub category: Option<Category>,
}

impl ScanFilter {
    pub fn accepts(&self, entry: &ScanEntry) -> bool {
        if self.mismatches_only && !entry.is_mismatch() {
            return false;
        }
        match self.category {
            Some(category) => entry.category() == Some(category),
            None => true,
        }
    }
}

/// Render a scan report: one line per shown entry, then totals and a
/// per-category breakdown
pub fn format_scan_report(
    report: &ScanReport,
    filter: &ScanFilter,
    opts: &ReportOptions,
) -> String {
    let mut out = String::new();

    out.push_str(&format!("\n  Diamond Probe Scan: {}\n", report.source.display()));
    out.push_str("  ==========================================\n\n");

    for entry in report.entries.iter().filter(|e| filter.accepts(e)) {
        let path = entry
            .path
            .strip_prefix(&report.source)
            .unwrap_or(&entry.path);
        match &entry.outcome {
            ScanOutcome::Identified {
                format,
                extension_mismatch,
                ..
            } => {
                out.push_str(&format!("  {}  {}", path.display(), describe(format, opts)));
                if *extension_mismatch {
                    out.push_str(&format!("  {}", alert("MISMATCH", opts)));
                }
                out.push('\n');
            }
            ScanOutcome::Unknown => {
                out.push_str(&format!("  {}  unknown\n", path.display()));
            }
            ScanOutcome::Failed { error } => {
                out.push_str(&format!(
                    "  {}  {} {}\n",
                    path.display(),
                    alert("ERROR", opts),
                    error
                ));
            }
        }
    }

    let stats = &report.stats;
    out.push('\n');
    out.push_str(&format!("  Files:          {}\n", stats.files_found));
    out.push_str(&format!("  Identified:     {}\n", stats.identified));
    out.push_str(&format!("  Unknown:        {}\n", stats.unknown));
    out.push_str(&format!("  Errors:         {}\n", stats.errors));
    out.push_str(&format!("  Mismatches:     {}\n", stats.mismatches));
    out.push_str(&format!("  Full reads:     {}\n", stats.full_reads));
    out.push_str(&format!(
        "  Total size:     {}\n",
        humansize::format_size(stats.bytes_total, humansize::BINARY)
    ));
    out.push_str(&format!("  Duration:       {} ms\n", stats.duration_ms));

    let counts: Vec<(Category, usize)> = Category::ALL
        .iter()
        .map(|&c| (c, report.entries.iter().filter(|e| e.category() == Some(c)).count()))
        .filter(|&(_, n)| n > 0)
        .collect();
    if !counts.is_empty() {
        out.push_str("\n  By category:\n");
        for (category, n) in counts {
            let name = format!("{:<12}", category.as_str());
            out.push_str(&format!(
                "    {} {}\n",
                paint_category(&name, category, opts),
                n
            ));
        }
    }

    out
}

/// Render a list of catalog formats as a table
pub fn format_catalog(formats: &[FormatDescriptor], opts: &ReportOptions) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{:<6} {:<48} {:<11} {}\n",
        "EXT", "MEDIA TYPE", "CATEGORY", "DESCRIPTION"
    ));
    for format in formats {
        let ext = if format.extension.is_empty() {
            "-"
        } else {
            format.extension
        };
        // Pad before painting so escape codes don't skew the columns
        let category = format!("{:<11}", format.category.as_str());
        out.push_str(&format!(
            "{:<6} {:<48} {} {}\n",
            ext,
            format.mime(),
            paint_category(&category, format.category, opts),
            format.description
        ));
    }
    out.push_str(&format!("\n{} formats\n", formats.len()));

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::magic::identify;
    use crate::scan::ScanStats;

    const PLAIN: ReportOptions = ReportOptions {
        color: false,
        show_magic: false,
    };

    fn probe(path: &str, data: &[u8], tier: ReadTier) -> Probe {
        Probe {
            path: PathBuf::from(path),
            size: data.len() as u64,
            tier,
            format: identify(data).unwrap(),
            rule: "test",
            magic: data.to_vec(),
        }
    }

    #[test]
    fn test_format_identify_lines() {
        let records = vec![
            IdentifyRecord::Identified(probe("a.pdf", b"%PDF-1.7", ReadTier::Prefix)),
            IdentifyRecord::Unknown {
                path: PathBuf::from("b.txt"),
            },
            IdentifyRecord::Failed {
                path: PathBuf::from("c"),
                error: "failed to read c: denied".to_string(),
            },
        ];
        let out = format_identify(&records, &PLAIN);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "a.pdf: pdf [application/pdf] Portable Document Format");
        assert_eq!(lines[1], "b.txt: unknown format");
        assert_eq!(lines[2], "c: error: failed to read c: denied");
        assert!(!out.contains('\x1b'));
    }

    #[test]
    fn test_format_identify_magic_and_tier() {
        let opts = ReportOptions {
            color: false,
            show_magic: true,
        };
        let records = vec![IdentifyRecord::Identified(probe(
            "x",
            b"%PDF",
            ReadTier::FullFile,
        ))];
        let out = format_identify(&records, &opts);
        assert!(out.contains("(full read)"));
        assert!(out.contains("magic: 25504446"));
        assert!(out.contains("4 B"));
    }

    #[test]
    fn test_identify_record_json() {
        let record = IdentifyRecord::Unknown {
            path: PathBuf::from("b.txt"),
        };
        let json: serde_json::Value = serde_json::from_str(&to_json(&record).unwrap()).unwrap();
        assert_eq!(json["status"], "unknown");
        assert_eq!(json["path"], "b.txt");

        let record =
            IdentifyRecord::Identified(probe("a.png", b"\x89PNG\r\n\x1a\n", ReadTier::Prefix));
        let json: serde_json::Value = serde_json::from_str(&to_json(&record).unwrap()).unwrap();
        assert_eq!(json["status"], "identified");
        assert_eq!(json["format"]["extension"], "png");
    }

    fn sample_report() -> ScanReport {
        let pdf = identify(b"%PDF-1.7").unwrap();
        let png = identify(b"\x89PNG\r\n\x1a\n").unwrap();
        ScanReport {
            source: PathBuf::from("/data"),
            stats: ScanStats {
                files_found: 3,
                identified: 2,
                unknown: 1,
                mismatches: 1,
                bytes_total: 2048,
                ..Default::default()
            },
            entries: vec![
                ScanEntry {
                    path: PathBuf::from("/data/a.png"),
                    size: 1024,
                    outcome: ScanOutcome::Identified {
                        format: png,
                        rule: "PNG",
                        tier: ReadTier::Prefix,
                        extension_mismatch: false,
                    },
                },
                ScanEntry {
                    path: PathBuf::from("/data/b.jpg"),
                    size: 1024,
                    outcome: ScanOutcome::Identified {
                        format: pdf,
                        rule: "PDF",
                        tier: ReadTier::Prefix,
                        extension_mismatch: true,
                    },
                },
                ScanEntry {
                    path: PathBuf::from("/data/c.txt"),
                    size: 0,
                    outcome: ScanOutcome::Unknown,
                },
            ],
        }
    }

    #[test]
    fn test_format_scan_report() {
        let out = format_scan_report(&sample_report(), &ScanFilter::default(), &PLAIN);
        assert!(out.contains("a.png  png [image/png]"));
        assert!(out.contains("b.jpg  pdf [application/pdf] Portable Document Format  MISMATCH"));
        assert!(out.contains("c.txt  unknown"));
        assert!(out.contains("Mismatches:     1"));
        assert!(out.contains("Total size:") && out.contains("KiB"));
        assert!(out.contains("image"));
        assert!(out.contains("document"));
    }

    #[test]
    fn test_scan_filter() {
        let report = sample_report();
        let mismatches = ScanFilter {
            mismatches_only: true,
            category: None,
        };
        let out = format_scan_report(&report, &mismatches, &PLAIN);
        assert!(out.contains("b.jpg"));
        assert!(!out.contains("a.png"));

        let images = ScanFilter {
            mismatches_only: false,
            category: Some(Category::Image),
        };
        let shown: Vec<_> = report.entries.iter().filter(|e| images.accepts(e)).collect();
        assert_eq!(shown.len(), 1);
        assert!(shown[0].path.ends_with("a.png"));
    }

    #[test]
    fn test_format_catalog() {
        let formats = vec![
            identify(b"%PDF-1.7").unwrap(),
            identify(b"FORM\x00\x00\x00\x0c8SVX").unwrap(),
        ];
        let out = format_catalog(&formats, &PLAIN);
        assert!(out.starts_with("EXT"));
        assert!(out.contains("application/pdf"));
        assert!(out.lines().any(|l| l.starts_with("-      application/x-iff")));
        assert!(out.ends_with("2 formats\n"));
    }

    /// Drop SGR escape sequences so coloured output can be compared by column
    fn strip_escapes(text: &str) -> String {
        let mut out = String::new();
        let mut chars = text.chars();
        while let Some(c) = chars.next() {
            if c == '\x1b' {
                chars.by_ref().find(|&c| c == 'm');
            } else {
                out.push(c);
            }
        }
        out
    }

    #[test]
    fn test_category_counts_align_with_color() {
        let opts = ReportOptions {
            color: true,
            show_magic: false,
        };
        let out = format_scan_report(&sample_report(), &ScanFilter::default(), &opts);
        assert!(out.contains(Category::Image.color_code()));

        let plain = strip_escapes(&out);
        assert!(plain.contains("\n    image        1\n"));
        assert!(plain.contains("\n    document     1\n"));
    }

    #[test]
    fn test_color_wraps_category() {
        let opts = ReportOptions {
            color: true,
            show_magic: false,
        };
        let format = identify(b"%PDF-1.7").unwrap();
        let out = describe(&format, &opts);
        assert!(out.starts_with(Category::Document.color_code()));
    }
}
