use anyhow::{Context, Result};
use log::{debug, info};
use std::time::Instant;

use crate::app_config::Config;
use crate::case_study::{CaseStudyMigrator, MigrationSummary};
use crate::photography::{PhotoGenerator, PhotoSource};

// @module: Application controller for the migrations

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config })
    }

    /// Migrate the configured case studies into the collection
    pub fn run_case_studies(&self, dry_run: bool, only: &[String]) -> Result<MigrationSummary> {
        let start_time = Instant::now();
        debug!(
            "Migrating {} case studies from {}",
            self.config.case_studies.len(),
            self.config.site_root.display()
        );

        let summary = CaseStudyMigrator::new(&self.config)?
            .with_dry_run(dry_run)
            .migrate_all(only)?;

        if !dry_run && summary.written > 0 {
            info!("All case studies migrated to the collection format!");
        }
        debug!("Case study migration took {:?}", start_time.elapsed());
        Ok(summary)
    }

    /// Generate gallery entries for the filenames of `source`
    pub fn run_photos(&self, source: &PhotoSource, dry_run: bool) -> Result<MigrationSummary> {
        let start_time = Instant::now();
        let summary = PhotoGenerator::new(&self.config)
            .with_dry_run(dry_run)
            .generate(source)?;
        debug!("Photo generation took {:?}", start_time.elapsed());
        Ok(summary)
    }
}
