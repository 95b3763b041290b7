/*!
 * # sitemigrate - content migrations for a static site
 *
 * A Rust library and CLI that moves legacy site content into a static-site
 * generator's content collections.
 *
 * ## Features
 *
 * - Migrate standalone case-study pages into a collection:
 *   - inline stylesheet and body pulled out with a DOM parse
 *   - the page's top-bar header dropped from the body
 *   - front matter composed from a declarative table
 * - Generate photo gallery entries from image filenames
 * - Dry-run mode for both migrations
 * - JSON configuration with built-in defaults
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `extractor`: Style and body extraction from legacy pages
 * - `front_matter`: Front matter rendering/parsing and file composition
 * - `case_study`: Case-study batch migration
 * - `photography`: Slug/title derivation and gallery entry generation
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod case_study;
pub mod errors;
pub mod extractor;
pub mod file_utils;
pub mod front_matter;
pub mod photography;

// Re-export main types for easier usage
pub use app_config::{CaseStudy, Config};
pub use app_controller::Controller;
pub use case_study::{CaseStudyMigrator, MigrationSummary};
pub use errors::MigrationError;
pub use extractor::{ExtractedContent, HtmlExtractor};
pub use front_matter::{FrontMatter, FrontMatterValue};
pub use photography::{PhotoEntry, PhotoGenerator, PhotoSource, slug_to_title};
