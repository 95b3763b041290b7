/*!
 * Case-study migration.
 *
 * Each configured case study is read from its legacy page, cut into style and
 * body regions, given its front matter and written into the collection.
 * Entries are processed in configuration order. A missing source skips that
 * entry only; any other failure stops the run and leaves earlier outputs in place.
 */

use anyhow::Result;
use log::{debug, info, warn};
use std::path::PathBuf;

use crate::app_config::{CaseStudy, Config};
use crate::errors::MigrationError;
use crate::extractor::HtmlExtractor;
use crate::file_utils::FileManager;
use crate::front_matter::compose_case_study;

/// Counts reported at the end of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MigrationSummary {
    /// Files written (or printed, in dry-run mode)
    pub written: usize,
    /// Entries skipped with a recoverable error
    pub skipped: usize,
}

/// Runs the case-study table of a configuration
pub struct CaseStudyMigrator<'a> {
    // @field: Validated configuration
    config: &'a Config,

    // @field: Extractor built from the configured selectors
    extractor: HtmlExtractor,

    // @field: Print instead of writing
    dry_run: bool,
}

impl<'a> CaseStudyMigrator<'a> {
    // @creates: Migrator writing to disk
    pub fn new(config: &'a Config) -> Result<Self> {
        Ok(Self {
            config,
            extractor: HtmlExtractor::new(&config.extraction)?,
            dry_run: false,
        })
    }

    // @sets: Dry-run mode
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Migrate every configured case study, or only those whose slug is in
    /// `only` when it is not empty.
    pub fn migrate_all(&self, only: &[String]) -> Result<MigrationSummary> {
        let mut summary = MigrationSummary::default();

        for slug in self.unknown_slugs(only) {
            warn!("No case study with slug '{}'", slug);
        }

        for case in &self.config.case_studies {
            if !only.is_empty() && !only.contains(&case.slug()) {
                debug!("Skipping {} (not selected)", case.slug());
                continue;
            }

            match self.migrate(case) {
                Ok(_) => summary.written += 1,
                Err(e) => match e.downcast_ref::<MigrationError>() {
                    Some(migration_error) if migration_error.is_recoverable() => {
                        warn!("{}", migration_error);
                        summary.skipped += 1;
                    }
                    _ => return Err(e),
                },
            }
        }

        Ok(summary)
    }

    // @returns: Requested slugs that match no configured case study
    pub fn unknown_slugs(&self, only: &[String]) -> Vec<String> {
        only.iter()
            .filter(|slug| !self.config.case_studies.iter().any(|case| &case.slug() == *slug))
            .cloned()
            .collect()
    }

    /// Migrate a single case study and return the output path
    pub fn migrate(&self, case: &CaseStudy) -> Result<PathBuf> {
        let output = self.config.resolve(&case.output);
        let document = self.render(case)?;

        if self.dry_run {
            println!("Would write {}\n{}", output.display(), document);
        } else {
            FileManager::write_to_file(&output, &document)?;
            info!("Created {}", output.display());
        }

        Ok(output)
    }

    /// Build the output document of a case study without writing it
    pub fn render(&self, case: &CaseStudy) -> Result<String> {
        let source = self.config.resolve(&case.source);
        if !FileManager::file_exists(&source) {
            return Err(MigrationError::MissingInputFile(source).into());
        }

        let html = FileManager::read_to_string(&source)?;
        let content = self.extractor.extract(&html);
        debug!(
            "Extracted {} bytes of style and {} bytes of body from {}",
            content.styles.len(),
            content.body.len(),
            source.display()
        );

        Ok(compose_case_study(&case.front_matter(), &content))
    }
}
