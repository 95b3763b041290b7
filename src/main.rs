// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info};
use std::io::Write;
use std::path::PathBuf;

use sitemigrate::app_config::{self, Config};
use sitemigrate::{Controller, MigrationSummary, PhotoSource};

// @const: Config file picked up from the working directory
const DEFAULT_CONFIG_PATH: &str = "sitemigrate.json";

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Migrate legacy case-study pages into the case-study collection
    CaseStudies {
        /// Print what would be written, don't create files
        #[arg(long)]
        dry_run: bool,

        /// Only migrate the case studies with this output slug (repeatable)
        #[arg(long, value_name = "SLUG")]
        only: Vec<String>,
    },

    /// Generate photography entries from image filenames
    Photos {
        /// Image filenames (e.g. sunset.jpg). If none, every image in the photos directory is used
        #[arg(value_name = "FILENAMES")]
        filenames: Vec<String>,

        /// Read filenames from a file (one per line)
        #[arg(short, long, value_name = "FILE")]
        list: Option<PathBuf>,

        /// Print what would be written, don't create files
        #[arg(long)]
        dry_run: bool,
    },

    /// Write the default configuration as JSON
    InitConfig {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Generate shell completions for sitemigrate
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// sitemigrate - content migrations for a static site
///
/// Moves legacy case-study pages and photo files into the site generator's
/// content collections.
#[derive(Parser, Debug)]
#[command(name = "sitemigrate")]
#[command(version)]
#[command(about = "Migrate legacy static-site content into content collections")]
#[command(long_about = "sitemigrate moves legacy site content into a static-site generator's collections.

EXAMPLES:
    sitemigrate case-studies                      # Migrate every configured case study
    sitemigrate case-studies --only microhelp     # Migrate a single case study
    sitemigrate photos                            # One entry per image in images/photos/
    sitemigrate photos sunset.jpg cafe.png        # Entries for the given images
    sitemigrate photos --list my-photos.txt       # Filenames from a list file
    sitemigrate photos --dry-run                  # Show what would be written
    sitemigrate init-config                       # Write sitemigrate.json with the defaults

CONFIGURATION:
    Settings are read from sitemigrate.json in the working directory when present,
    otherwise built-in defaults are used. Relative paths resolve against the site root.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Site root every relative path resolves against
    #[arg(short, long, global = true)]
    root: Option<PathBuf>,

    /// Set logging level
    #[arg(long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation, filtered by the global max level
struct CustomLogger;

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and prefix for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("1;31", "Error: "),
            Level::Warn => ("1;33", "Warning: "),
            Level::Info => ("1;32", ""),
            Level::Debug => ("1;36", ""),
            Level::Trace => ("1;35", ""),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, prefix) = Self::style_for_level(record.level());
            let _ = writeln!(
                std::io::stderr(),
                "\x1B[{}m{} {}{}\x1B[0m",
                color, now, prefix, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();
    if let Some(level) = cli.log_level {
        log::set_max_level(app_config::LogLevel::from(level).into());
    }

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "sitemigrate", &mut std::io::stdout());
            Ok(())
        }
        Commands::InitConfig { force } => {
            let path = cli.config.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
            if path.exists() && !force {
                return Err(anyhow!("{} already exists. Use --force to overwrite.", path.display()));
            }
            Config::default().save(&path)?;
            info!("Wrote default configuration to {}", path.display());
            Ok(())
        }
        Commands::CaseStudies { dry_run, only } => {
            let controller = build_controller(cli.config, cli.root, cli.log_level)?;
            let summary = controller.run_case_studies(dry_run, &only)?;
            if !dry_run {
                println!(
                    "Done. {} case stud{} migrated, {} skipped.",
                    summary.written,
                    if summary.written == 1 { "y" } else { "ies" },
                    summary.skipped
                );
            }
            Ok(())
        }
        Commands::Photos { filenames, list, dry_run } => {
            let controller = build_controller(cli.config, cli.root, cli.log_level)?;
            let source = PhotoSource::from_args(list, filenames);
            let summary = controller.run_photos(&source, dry_run)?;
            print_photo_summary(&summary, dry_run);
            Ok(())
        }
    }
}

// @loads: Configuration with CLI overrides applied
fn build_controller(
    config_path: Option<PathBuf>,
    root: Option<PathBuf>,
    log_level: Option<CliLogLevel>,
) -> Result<Controller> {
    let mut config = match &config_path {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Could not load configuration {}", path.display()))?,
        None => Config::load_or_default(DEFAULT_CONFIG_PATH)?,
    };

    if let Some(root) = root {
        config.site_root = root;
    }

    // Command line wins over the config file
    match log_level {
        Some(level) => config.log_level = level.into(),
        None => log::set_max_level(config.log_level.into()),
    }

    Controller::with_config(config)
}

fn print_photo_summary(summary: &MigrationSummary, dry_run: bool) {
    if dry_run || (summary.written == 0 && summary.skipped == 0) {
        return;
    }
    println!(
        "Done. {} photography entr{} generated.",
        summary.written,
        if summary.written == 1 { "y" } else { "ies" }
    );
    if summary.skipped > 0 {
        println!("{} file(s) skipped.", summary.skipped);
    }
}
