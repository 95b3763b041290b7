use anyhow::Result;
use log::{info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};

use crate::app_config::{Config, PhotographyConfig};
use crate::case_study::MigrationSummary;
use crate::errors::MigrationError;
use crate::file_utils::{self, FileManager};
use crate::front_matter::{FrontMatter, compose_metadata_only};

// @module: Photo gallery entries generated from image filenames

// @const: Characters turned into spaces in titles
static SLUG_SEPARATORS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[_-]").unwrap()
});

// @const: Extension of generated entries
const ENTRY_EXTENSION: &str = "md";

/// Turn a slug like `sunset-at-beach` into `Sunset At Beach`.
///
/// Falls back to the raw slug when nothing but separators is left.
pub fn slug_to_title(slug: &str) -> String {
    let spaced = SLUG_SEPARATORS.replace_all(slug, " ");
    let trimmed = spaced.trim();
    if trimmed.is_empty() {
        slug.to_string()
    } else {
        title_case(trimmed)
    }
}

// @returns: Text with each alphabetic run capitalized and the rest lowercased
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_alphabetic = false;
    for c in text.chars() {
        if previous_alphabetic {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        previous_alphabetic = c.is_alphabetic();
    }
    out
}

// @struct: One gallery entry derived from an image filename
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoEntry {
    // @field: Filename as given, relative to the photos directory
    pub filename: String,

    // @field: Filename without extension
    pub slug: String,

    // @field: Display title
    pub title: String,

    // @field: Site URL of the image
    pub image_path: String,
}

impl PhotoEntry {
    /// Derive an entry, rejecting extensions outside the configured set
    pub fn from_filename(filename: &str, config: &PhotographyConfig) -> Result<Self, MigrationError> {
        let path = Path::new(filename);
        if !file_utils::has_extension(path, &config.extensions) {
            return Err(MigrationError::UnsupportedExtension(filename.to_string()));
        }

        let slug = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_default();

        Ok(Self {
            filename: filename.to_string(),
            title: slug_to_title(&slug),
            image_path: format!("{}/{}", config.image_url_prefix.trim_end_matches('/'), filename),
            slug,
        })
    }

    pub fn front_matter(&self) -> FrontMatter {
        FrontMatter::new()
            .with("title", self.title.as_str())
            .with("image", self.image_path.as_str())
    }

    // @returns: Entry file contents
    pub fn render(&self) -> String {
        compose_metadata_only(&self.front_matter())
    }

    // @returns: `<output_dir>/<slug>.md`
    pub fn output_path(&self, output_dir: &Path) -> PathBuf {
        file_utils::output_path_for(output_dir, &self.slug, ENTRY_EXTENSION)
    }
}

/// Where the image filenames come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoSource {
    /// Newline-delimited list file
    ListFile(PathBuf),
    /// Filenames given on the command line
    Filenames(Vec<String>),
    /// Every supported image in the photos directory
    Directory,
}

impl PhotoSource {
    // @creates: Source from CLI arguments. A list file wins over filenames.
    pub fn from_args(list: Option<PathBuf>, filenames: Vec<String>) -> Self {
        match list {
            Some(list) => Self::ListFile(list),
            None if !filenames.is_empty() => Self::Filenames(filenames),
            None => Self::Directory,
        }
    }
}

/// Writes gallery entries for a batch of image filenames
pub struct PhotoGenerator<'a> {
    // @field: Validated configuration
    config: &'a Config,

    // @field: Print instead of writing
    dry_run: bool,
}

impl<'a> PhotoGenerator<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config, dry_run: false }
    }

    // @sets: Dry-run mode
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Resolve the filenames of a source, in processing order
    pub fn collect_filenames(&self, source: &PhotoSource) -> Result<Vec<String>> {
        match source {
            PhotoSource::ListFile(list) => FileManager::read_list_file(self.config.resolve(list)),
            PhotoSource::Filenames(filenames) => Ok(filenames.clone()),
            PhotoSource::Directory => {
                let photos_dir = self.config.resolve(&self.config.photography.photos_dir);
                if !FileManager::dir_exists(&photos_dir) {
                    return Err(MigrationError::MissingPhotosDir(photos_dir).into());
                }
                FileManager::list_files_with_extensions(&photos_dir, &self.config.photography.extensions)
            }
        }
    }

    /// Generate one entry per filename of `source`
    pub fn generate(&self, source: &PhotoSource) -> Result<MigrationSummary> {
        let filenames = self.collect_filenames(source)?;
        let mut summary = MigrationSummary::default();

        if filenames.is_empty() {
            let photos_dir = self.config.resolve(&self.config.photography.photos_dir);
            warn!("No image filenames to process.");
            info!(
                "Add {} files to {} or pass filenames as arguments",
                self.config.photography.extensions.join("/"),
                photos_dir.display()
            );
            return Ok(summary);
        }

        let output_dir = self.config.resolve(&self.config.photography.output_dir);
        for filename in &filenames {
            let entry = match PhotoEntry::from_filename(filename, &self.config.photography) {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("{}", e);
                    summary.skipped += 1;
                    continue;
                }
            };

            let path = entry.output_path(&output_dir);
            let content = entry.render();
            if self.dry_run {
                println!("Would write {}\n{}", path.display(), content);
            } else {
                FileManager::write_to_file(&path, &content)?;
                info!("Wrote {}", path.display());
            }
            summary.written += 1;
        }

        Ok(summary)
    }
}
