use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::errors::MigrationError;
use crate::extractor::parse_selector;
use crate::front_matter::FrontMatter;

/// Application configuration module
/// This module handles loading, validating and saving the migration settings.
/// Every field has a default, so a partial JSON file is enough.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Directory every relative path below is resolved against
    #[serde(default = "default_site_root")]
    pub site_root: PathBuf,

    /// Selectors used to cut legacy pages apart
    #[serde(default)]
    pub extraction: ExtractionConfig,

    /// Case studies to migrate, in processing order
    #[serde(default = "default_case_studies")]
    pub case_studies: Vec<CaseStudy>,

    /// Photo gallery settings
    #[serde(default)]
    pub photography: PhotographyConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Log level for the application
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// CSS selectors for the extractor
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ExtractionConfig {
    // @field: First match becomes the style region
    #[serde(default = "default_style_selector")]
    pub style_selector: String,

    // @field: First match inside <body> is dropped
    #[serde(default = "default_header_selector")]
    pub header_selector: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            style_selector: default_style_selector(),
            header_selector: default_header_selector(),
        }
    }
}

/// One legacy page migrated into the case-study collection.
///
/// Field order here is the order the front matter is written in.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CaseStudy {
    /// Legacy HTML page, relative to the site root
    pub source: PathBuf,

    /// Collection file to write, relative to the site root
    pub output: PathBuf,

    #[serde(default = "default_case_study_layout")]
    pub layout: String,

    pub title: String,

    #[serde(default)]
    pub subtitle: String,

    #[serde(default)]
    pub featured: bool,

    #[serde(default)]
    pub meta: String,
}

impl CaseStudy {
    // @creates: Case study with the default layout
    pub fn new(source: &str, output: &str, title: &str, subtitle: &str, featured: bool, meta: &str) -> Self {
        Self {
            source: PathBuf::from(source),
            output: PathBuf::from(output),
            layout: default_case_study_layout(),
            title: title.to_string(),
            subtitle: subtitle.to_string(),
            featured,
            meta: meta.to_string(),
        }
    }

    // @returns: Output file stem, used to filter runs
    pub fn slug(&self) -> String {
        self.output
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    /// Front matter for this case study
    pub fn front_matter(&self) -> FrontMatter {
        FrontMatter::new()
            .with("layout", self.layout.as_str())
            .with("title", self.title.as_str())
            .with("subtitle", self.subtitle.as_str())
            .with("featured", self.featured)
            .with("meta", self.meta.as_str())
    }
}

/// Photo gallery configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PhotographyConfig {
    // @field: Directory scanned when no filenames are given
    #[serde(default = "default_photos_dir")]
    pub photos_dir: PathBuf,

    // @field: Directory the entries are written to
    #[serde(default = "default_photography_output_dir")]
    pub output_dir: PathBuf,

    // @field: URL prefix of the image field
    #[serde(default = "default_image_url_prefix")]
    pub image_url_prefix: String,

    // @field: Allowed extensions, lowercase with leading dot
    #[serde(default = "default_image_extensions")]
    pub extensions: Vec<String>,
}

impl Default for PhotographyConfig {
    fn default() -> Self {
        Self {
            photos_dir: default_photos_dir(),
            output_dir: default_photography_output_dir(),
            image_url_prefix: default_image_url_prefix(),
            extensions: default_image_extensions(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site_root: default_site_root(),
            extraction: ExtractionConfig::default(),
            case_studies: default_case_studies(),
            photography: PhotographyConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Load a configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;
        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to the built-in defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            log::debug!("No config file at {}, using built-in defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Write the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        parse_selector(&self.extraction.style_selector)?;
        parse_selector(&self.extraction.header_selector)?;

        let mut outputs = HashSet::new();
        for case in &self.case_studies {
            if case.source.as_os_str().is_empty() || case.output.as_os_str().is_empty() {
                return Err(MigrationError::Config(format!(
                    "Case study '{}' needs both a source and an output path",
                    case.title
                ))
                .into());
            }
            if case.title.trim().is_empty() {
                return Err(MigrationError::Config(format!(
                    "Case study {} has no title",
                    case.source.display()
                ))
                .into());
            }
            if !outputs.insert(&case.output) {
                return Err(MigrationError::Config(format!(
                    "Output {} is used by more than one case study",
                    case.output.display()
                ))
                .into());
            }
        }

        if let Some(ext) = self
            .photography
            .extensions
            .iter()
            .find(|ext| !ext.starts_with('.') || ext.len() < 2)
        {
            return Err(MigrationError::Config(format!(
                "Image extension '{}' must start with a dot",
                ext
            ))
            .into());
        }

        Ok(())
    }

    // @returns: Path resolved against the site root
    pub fn resolve<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.site_root.join(path)
        }
    }
}

fn default_site_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_style_selector() -> String {
    "style".to_string()
}

fn default_header_selector() -> String {
    "header.top-bar".to_string()
}

fn default_case_study_layout() -> String {
    "case_study".to_string()
}

fn default_photos_dir() -> PathBuf {
    PathBuf::from("images/photos")
}

fn default_photography_output_dir() -> PathBuf {
    PathBuf::from("_photography")
}

fn default_image_url_prefix() -> String {
    "/images/photos".to_string()
}

fn default_image_extensions() -> Vec<String> {
    [".jpg", ".jpeg", ".png", ".webp", ".gif"]
        .iter()
        .map(|ext| ext.to_string())
        .collect()
}

fn default_case_studies() -> Vec<CaseStudy> {
    const META: &str = "Product Case Study · February 2026";
    vec![
        CaseStudy::new(
            "case-studies/pit-strategy-case-study.html",
            "_case_studies/pit-strategy.html",
            "Pit Strategy Optimizer",
            "Data-driven decision support for Formula 1 pit stop strategy",
            true,
            META,
        ),
        CaseStudy::new(
            "case-studies/microhelp-case-study.html",
            "_case_studies/microhelp.html",
            "MicroHelp",
            "Rebuilding community, one small favor at a time",
            true,
            META,
        ),
        CaseStudy::new(
            "case-studies/autoperfpy-case-study.html",
            "_case_studies/autoperfpy.html",
            "AutoPerfPy",
            "Democratizing performance engineering for edge AI",
            true,
            META,
        ),
    ]
}
