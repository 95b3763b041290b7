/*!
 * End-to-end tests for the case-study migration
 */

use std::fs;
use anyhow::Result;
use sitemigrate::app_config::CaseStudy;
use sitemigrate::front_matter::{FrontMatter, FrontMatterValue};
use sitemigrate::{CaseStudyMigrator, Controller, MigrationSummary};
use crate::common;

/// Test the full migration of a legacy page
#[test]
fn test_migrateAll_withLegacyPage_shouldWriteCollectionFile() -> Result<()> {
    common::init_logging();
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "case-studies/microhelp-case-study.html", &common::legacy_page("MicroHelp"))?;
    let config = common::config_with_case_study(
        temp_dir.path(),
        "case-studies/microhelp-case-study.html",
        "_case_studies/microhelp.html",
        "MicroHelp",
    );

    let summary = CaseStudyMigrator::new(&config)?.migrate_all(&[])?;
    assert_eq!(summary, MigrationSummary { written: 1, skipped: 0 });

    let output = fs::read_to_string(temp_dir.path().join("_case_studies/microhelp.html"))?;
    assert!(output.starts_with("---\nlayout: case_study\ntitle: MicroHelp\nsubtitle: Subtitle\nfeatured: true\nmeta: Product Case Study\n---\n\n<style>\n"));
    assert!(output.contains(".hero { padding: 2rem; }\n</style>\n\n<section class=\"hero\">"));
    assert!(output.contains("<p>Case study body.</p>\n"));
    assert!(!output.contains("Back to portfolio"));
    assert!(!output.contains("<body>"));

    Ok(())
}

/// Test that missing sources are skipped and the rest still migrate
#[test]
fn test_migrateAll_withMissingSource_shouldSkipAndContinue() -> Result<()> {
    common::init_logging();
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "old/b.html", &common::legacy_page("B"))?;

    let mut config = common::config_rooted_at(temp_dir.path());
    config.case_studies = vec![
        CaseStudy::new("old/a.html", "_case_studies/a.html", "A", "", false, ""),
        CaseStudy::new("old/b.html", "_case_studies/b.html", "B", "", false, ""),
    ];

    let summary = Controller::with_config(config)?.run_case_studies(false, &[])?;

    assert_eq!(summary, MigrationSummary { written: 1, skipped: 1 });
    assert!(!temp_dir.path().join("_case_studies/a.html").exists());
    assert!(temp_dir.path().join("_case_studies/b.html").exists());
    Ok(())
}

/// Test that running twice produces byte-identical output
#[test]
fn test_migrateAll_runTwice_shouldBeIdempotent() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "src.html", &common::legacy_page("Idem"))?;
    let config = common::config_with_case_study(temp_dir.path(), "src.html", "out/idem.html", "Idem");
    let output_path = temp_dir.path().join("out/idem.html");

    CaseStudyMigrator::new(&config)?.migrate_all(&[])?;
    let first = fs::read(&output_path)?;
    CaseStudyMigrator::new(&config)?.migrate_all(&[])?;
    let second = fs::read(&output_path)?;

    assert_eq!(first, second);
    Ok(())
}

/// Test that dry-run mode writes nothing
#[test]
fn test_migrateAll_withDryRun_shouldNotWrite() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "src.html", &common::legacy_page("Dry"))?;
    let config = common::config_with_case_study(temp_dir.path(), "src.html", "_case_studies/dry.html", "Dry");

    let summary = CaseStudyMigrator::new(&config)?.with_dry_run(true).migrate_all(&[])?;

    assert_eq!(summary.written, 1);
    assert!(!temp_dir.path().join("_case_studies").exists());
    Ok(())
}

/// Test the slug filter
#[test]
fn test_migrateAll_withOnlyFilter_shouldMigrateSelectedSlug() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "a.html", &common::legacy_page("A"))?;
    common::create_test_file(temp_dir.path(), "b.html", &common::legacy_page("B"))?;

    let mut config = common::config_rooted_at(temp_dir.path());
    config.case_studies = vec![
        CaseStudy::new("a.html", "_cs/alpha.html", "A", "", true, ""),
        CaseStudy::new("b.html", "_cs/beta.html", "B", "", true, ""),
    ];

    let summary = CaseStudyMigrator::new(&config)?.migrate_all(&["beta".to_string()])?;

    assert_eq!(summary.written, 1);
    assert!(!temp_dir.path().join("_cs/alpha.html").exists());

    let written = fs::read_to_string(temp_dir.path().join("_cs/beta.html"))?;
    let front_matter = FrontMatter::parse(&written).expect("front matter");
    assert_eq!(front_matter.get("title"), Some(&FrontMatterValue::Text("B".to_string())));
    assert_eq!(front_matter.get("featured"), Some(&FrontMatterValue::Bool(true)));
    Ok(())
}

/// Test that slugs matching no case study are reported and migrate nothing
#[test]
fn test_migrateAll_withUnknownOnlySlug_shouldReportItAndWriteNothing() -> Result<()> {
    common::init_logging();
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "a.html", &common::legacy_page("A"))?;

    let mut config = common::config_rooted_at(temp_dir.path());
    config.case_studies = vec![CaseStudy::new("a.html", "_cs/alpha.html", "A", "", true, "")];
    let only = vec!["alpha".to_string(), "alhpa".to_string()];

    let migrator = CaseStudyMigrator::new(&config)?;
    assert_eq!(migrator.unknown_slugs(&only), vec!["alhpa".to_string()]);

    let summary = migrator.migrate_all(&["alhpa".to_string()])?;
    assert_eq!(summary, MigrationSummary { written: 0, skipped: 0 });
    assert!(!temp_dir.path().join("_cs/alpha.html").exists());
    Ok(())
}

/// Test that a page without markers still produces a file with empty regions
#[test]
fn test_migrate_withPlainTextSource_shouldWriteEmptyRegions() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "plain.html", "just some text")?;
    let config = common::config_with_case_study(temp_dir.path(), "plain.html", "plain-out.html", "Plain");

    let path = CaseStudyMigrator::new(&config)?.migrate(&config.case_studies[0])?;

    let written = fs::read_to_string(path)?;
    assert!(written.ends_with("---\n\n<style>\n\n</style>\n\n\n"));
    Ok(())
}
