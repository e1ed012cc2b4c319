//! CLI module - Command line interface definitions and handlers

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use crate::config::{generate_sample_config, Config};
use crate::magic::{self, Category, FormatDescriptor};
use crate::probe::Prober;
use crate::report::{self, IdentifyRecord, ReportOptions, ScanFilter};
use crate::scan::{ScanOptions, Scanner};

/// Diamond Probe - identify files by their content, not their name
///
/// Reads the leading bytes of each file and matches them against an ordered
/// catalog of magic-number signatures. All operations are READ-ONLY.
#[derive(Parser, Debug)]
#[command(name = "diamond-probe")]
#[command(author = "Ryan Cashmoney <tunclon@proton.me>")]
#[command(version)]
#[command(about = "💎 Content-sniffing file format detector", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Output format for machine parsing
    #[arg(long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Config file (default: platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Identify one or more files
    Identify(IdentifyArgs),

    /// Identify every file under a directory
    Scan(ScanArgs),

    /// List known formats or look one up
    Formats(FormatsArgs),

    /// Show or create the configuration file
    Config(ConfigArgs),
}

#[derive(Debug, Clone, Parser)]
pub struct IdentifyArgs {
    /// Files to identify
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Bytes read before the first attempt
    #[arg(long)]
    pub sample_size: Option<usize>,

    /// Don't read the whole file when the sample is not recognised
    #[arg(long, conflicts_with = "full")]
    pub no_retry: bool,

    /// Read whole files straight away
    #[arg(long)]
    pub full: bool,
}

#[derive(Debug, Clone, Parser)]
pub struct ScanArgs {
    /// Directory to scan
    #[arg(required = true)]
    pub source: PathBuf,

    /// Maximum depth to traverse
    #[arg(long, short)]
    pub depth: Option<usize>,

    /// Include hidden files and directories
    #[arg(long)]
    pub include_hidden: bool,

    /// File extensions to include (e.g., jpg,png,pdf)
    #[arg(long, short = 'e', value_delimiter = ',')]
    pub extensions: Option<Vec<String>>,

    /// Number of parallel workers (default: CPU count)
    #[arg(long, short)]
    pub workers: Option<usize>,

    /// Only show files whose extension disagrees with their content
    #[arg(long)]
    pub mismatches_only: bool,

    /// Only show files of this category
    #[arg(long, value_enum)]
    pub category: Option<CategoryFilter>,
}

#[derive(Debug, Clone, Parser)]
pub struct FormatsArgs {
    /// Look up the format registered for an extension
    #[arg(long, conflicts_with = "media_type")]
    pub extension: Option<String>,

    /// Look up formats reported with a media type
    #[arg(long)]
    pub media_type: Option<String>,
}

#[derive(Debug, Clone, Parser)]
pub struct ConfigArgs {
    /// Write the sample config if none exists
    #[arg(long)]
    pub init: bool,

    /// Print the config file location
    #[arg(long)]
    pub print_path: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human readable (default)
    Human,
    /// JSON output
    Json,
}

impl OutputFormat {
    /// Parse the `[output] format` config value
    pub fn from_config(value: &str) -> Self {
        if value.eq_ignore_ascii_case("json") {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CategoryFilter {
    Image,
    Video,
    Audio,
    Archive,
    Document,
    Executable,
    DiskImage,
    Other,
}

impl From<CategoryFilter> for Category {
    fn from(filter: CategoryFilter) -> Self {
        match filter {
            CategoryFilter::Image => Category::Image,
            CategoryFilter::Video => Category::Video,
            CategoryFilter::Audio => Category::Audio,
            CategoryFilter::Archive => Category::Archive,
            CategoryFilter::Document => Category::Document,
            CategoryFilter::Executable => Category::Executable,
            CategoryFilter::DiskImage => Category::DiskImage,
            CategoryFilter::Other => Category::Other,
        }
    }
}

/// Settings shared by every command once CLI flags and config are merged
pub struct Context {
    pub config: Config,
    pub config_path: PathBuf,
    pub output: OutputFormat,
    pub report: ReportOptions,
}

impl Context {
    pub fn new(cli: &Cli, config: Config, config_path: PathBuf) -> Self {
        let output = cli
            .output
            .unwrap_or_else(|| OutputFormat::from_config(&config.output.format));
        let report = ReportOptions {
            color: config.output.color,
            show_magic: config.output.show_magic || cli.verbose,
        };
        Self {
            config,
            config_path,
            output,
            report,
        }
    }
}

/// Identify files. Returns true when every file was identified.
pub fn run_identify(ctx: &Context, args: &IdentifyArgs) -> Result<bool> {
    let mut prober = ctx.config.probe.prober();
    if let Some(sample_size) = args.sample_size {
        prober.sample_size = sample_size.max(1);
    }
    if args.no_retry {
        prober.full_read_on_miss = false;
    }
    if args.full {
        prober = Prober::new(usize::MAX, false);
    }

    let records: Vec<IdentifyRecord> = args
        .files
        .iter()
        .map(|path| IdentifyRecord::from_result(path, prober.probe_path(path)))
        .collect();

    match ctx.output {
        OutputFormat::Human => print!("{}", report::format_identify(&records, &ctx.report)),
        OutputFormat::Json => println!("{}", report::to_json(&records)?),
    }

    Ok(records.iter().all(IdentifyRecord::is_identified))
}

/// Scan a directory tree
pub fn run_scan(ctx: &Context, args: &ScanArgs) -> Result<()> {
    let scan = &ctx.config.scan;
    let options = ScanOptions {
        source: args.source.clone(),
        skip_hidden: scan.skip_hidden && !args.include_hidden,
        max_depth: args.depth.or_else(|| ctx.config.max_depth()),
        extensions: args.extensions.clone().or_else(|| ctx.config.extensions()),
        workers: args.workers.unwrap_or(scan.workers),
        prober: ctx.config.probe.prober(),
    };
    let filter = ScanFilter {
        mismatches_only: args.mismatches_only,
        category: args.category.map(Category::from),
    };

    let mut result = Scanner::new(options).scan()?;

    match ctx.output {
        OutputFormat::Human => {
            print!("{}", report::format_scan_report(&result, &filter, &ctx.report));
        }
        OutputFormat::Json => {
            result.entries.retain(|e| filter.accepts(e));
            println!("{}", report::to_json(&result)?);
        }
    }

    Ok(())
}

/// Formats matching the lookup flags, or the whole catalog
pub fn select_formats(args: &FormatsArgs) -> Vec<FormatDescriptor> {
    if let Some(ext) = &args.extension {
        return magic::format_for_extension(ext.trim_start_matches('.'))
            .map(|f| vec![f.descriptor()])
            .unwrap_or_default();
    }
    if let Some(mime) = &args.media_type {
        return magic::formats_for_media_type(mime)
            .iter()
            .map(|f| f.descriptor())
            .collect();
    }
    magic::ALL_FORMATS.iter().map(|f| f.descriptor()).collect()
}

/// List or look up formats
pub fn run_formats(ctx: &Context, args: &FormatsArgs) -> Result<()> {
    let formats = select_formats(args);
    if formats.is_empty() {
        anyhow::bail!("No known format matches the lookup");
    }

    match ctx.output {
        OutputFormat::Human => print!("{}", report::format_catalog(&formats, &ctx.report)),
        OutputFormat::Json => println!("{}", report::to_json(&formats)?),
    }

    Ok(())
}

/// Show or create the config file
pub fn run_config(ctx: &Context, args: &ConfigArgs) -> Result<()> {
    if args.print_path {
        println!("{}", ctx.config_path.display());
        return Ok(());
    }

    if args.init {
        if Config::ensure_exists(&ctx.config_path)? {
            println!("Created {}", ctx.config_path.display());
        } else {
            println!("Config already exists: {}", ctx.config_path.display());
        }
        return Ok(());
    }

    print!("{}", generate_sample_config());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_identify() {
        let cli = Cli::parse_from([
            "diamond-probe",
            "--output",
            "json",
            "identify",
            "a.bin",
            "b.bin",
            "--sample-size",
            "4096",
            "--no-retry",
        ]);
        assert_eq!(cli.output, Some(OutputFormat::Json));
        match cli.command {
            Commands::Identify(args) => {
                assert_eq!(args.files.len(), 2);
                assert_eq!(args.sample_size, Some(4096));
                assert!(args.no_retry);
                assert!(!args.full);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_no_retry_conflicts_with_full() {
        let result =
            Cli::try_parse_from(["diamond-probe", "identify", "a", "--no-retry", "--full"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_scan() {
        let cli = Cli::parse_from([
            "diamond-probe",
            "scan",
            "/data",
            "-e",
            "jpg,png",
            "--category",
            "disk-image",
            "--mismatches-only",
            "-v",
        ]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Scan(args) => {
                assert_eq!(args.extensions, Some(vec!["jpg".to_string(), "png".to_string()]));
                assert_eq!(args.category.map(Category::from), Some(Category::DiskImage));
                assert!(args.mismatches_only);
                assert!(!args.include_hidden);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_select_formats() {
        let by_ext = select_formats(&FormatsArgs {
            extension: Some(".PNG".to_string()),
            media_type: None,
        });
        assert_eq!(by_ext.len(), 1);
        assert_eq!(by_ext[0].extension, "png");

        let by_mime = select_formats(&FormatsArgs {
            extension: None,
            media_type: Some("application/x-msdownload".to_string()),
        });
        assert_eq!(by_mime.len(), 2);

        let all = select_formats(&FormatsArgs {
            extension: None,
            media_type: None,
        });
        assert_eq!(all.len(), magic::ALL_FORMATS.len());

        let none = select_formats(&FormatsArgs {
            extension: Some("nope".to_string()),
            media_type: None,
        });
        assert!(none.is_empty());
    }

    #[test]
    fn test_context_merges_config() {
        let cli = Cli::parse_from(["diamond-probe", "-v", "formats"]);
        let mut config = Config::default();
        config.output.format = "json".to_string();
        let ctx = Context::new(&cli, config, PathBuf::from("config.toml"));
        assert_eq!(ctx.output, OutputFormat::Json);
        assert!(ctx.report.show_magic);

        let cli = Cli::parse_from(["diamond-probe", "--output", "human", "formats"]);
        let mut config = Config::default();
        config.output.format = "json".to_string();
        let ctx = Context::new(&cli, config, PathBuf::from("config.toml"));
        assert_eq!(ctx.output, OutputFormat::Human);
    }
}
