/*!
 * Tests for extraction and case-study composition
 */

use anyhow::Result;
use sitemigrate::app_config::ExtractionConfig;
use sitemigrate::case_study::CaseStudyMigrator;
use sitemigrate::errors::MigrationError;
use sitemigrate::extractor::HtmlExtractor;
use sitemigrate::front_matter::{FrontMatter, FrontMatterValue, compose_case_study};
use crate::common;

/// Test the reference top-bar page
#[test]
fn test_extract_withTopBarPage_shouldDropHeaderAndKeepContent() {
    let html = r#"<html><head><style>.a{}</style></head><body><header class="top-bar">X</header>Hello</body></html>"#;
    let content = HtmlExtractor::default().extract(html);

    assert_eq!(content.styles, ".a{}");
    assert_eq!(content.body, "Hello");
}

/// Test that a header is matched by class even with extra attributes
#[test]
fn test_extract_withReorderedAttributes_shouldStillDropHeader() {
    let html = r#"<body><header id="nav" class="sticky top-bar">Menu</header><p>Body</p></body>"#;
    let content = HtmlExtractor::default().extract(html);

    assert!(!content.body.contains("Menu"));
    assert_eq!(content.body, "<p>Body</p>");
}

/// Test that the first style element wins
#[test]
fn test_extract_withTwoStyles_shouldUseFirst() {
    let html = "<style>.first{}</style><style>.second{}</style><body>x</body>";
    assert_eq!(HtmlExtractor::default().extract(html).styles, ".first{}");
}

/// Test that empty input degrades to empty regions
#[test]
fn test_extract_withEmptyInput_shouldReturnEmptyRegions() {
    let content = HtmlExtractor::default().extract("");
    assert_eq!(content.styles, "");
    assert_eq!(content.body, "");
}

/// Test that an unclosed body yields the rest of the source as written
#[test]
fn test_extract_withUnclosedBody_shouldDegradeGracefully() {
    let content = HtmlExtractor::default().extract("<body><p>Partial");
    assert_eq!(content.body, "<p>Partial");
}

/// Test a custom header selector
#[test]
fn test_extract_withCustomHeaderSelector_shouldUseIt() -> Result<()> {
    let extractor = HtmlExtractor::new(&ExtractionConfig {
        header_selector: "nav#site".to_string(),
        ..ExtractionConfig::default()
    })?;
    let content = extractor.extract(r#"<body><nav id="site">Links</nav><header class="top-bar">Kept</header></body>"#);

    assert!(!content.body.contains("Links"));
    assert!(content.body.contains("Kept"));
    Ok(())
}

/// Test that composed documents parse back to their front matter
#[test]
fn test_composeCaseStudy_thenParse_shouldRoundTripFrontMatter() {
    let html = "<style>.a{}</style><body><header class=\"top-bar\">X</header>Hello</body>";
    let content = HtmlExtractor::default().extract(html);
    let front_matter = FrontMatter::new()
        .with("layout", "case_study")
        .with("title", "Pit Strategy Optimizer")
        .with("featured", true);

    let document = compose_case_study(&front_matter, &content);

    assert_eq!(FrontMatter::parse(&document), Some(front_matter));
    assert!(document.contains("<style>\n.a{}\n</style>"));
    assert!(document.ends_with("\n\nHello\n"));
    assert!(!document.contains('X'));
}

/// Test that values are written verbatim, so delimiter text ends the block early
#[test]
fn test_render_withDelimiterInValue_shouldNotEscape() {
    let front_matter = FrontMatter::new().with("title", "a\n---\nb");
    assert!(front_matter.render().contains("title: a\n---\nb\n"));

    let parsed = FrontMatter::parse(&front_matter.render()).expect("block closes early");
    assert_eq!(parsed.get("title"), Some(&FrontMatterValue::Text("a".to_string())));
}

/// Test that a missing source is a recoverable error for the single entry
#[test]
fn test_render_withMissingSource_shouldReturnMissingInputFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config = common::config_with_case_study(temp_dir.path(), "missing.html", "_case_studies/m.html", "M");
    let migrator = CaseStudyMigrator::new(&config)?;

    let error = migrator.render(&config.case_studies[0]).unwrap_err();
    let migration_error = error.downcast_ref::<MigrationError>().expect("typed error");
    assert!(matches!(migration_error, MigrationError::MissingInputFile(_)));
    assert!(migration_error.is_recoverable());
    Ok(())
}
