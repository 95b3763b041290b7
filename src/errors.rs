/*!
 * Error types for the sitemigrate application.
 *
 * Migration steps report the failures they know about through `MigrationError`.
 * Some of them are recoverable (the entry is skipped and the run continues),
 * the others abort the whole run.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while migrating site content
#[derive(Error, Debug)]
pub enum MigrationError {
    /// A case-study source document does not exist
    #[error("{} not found, skipping...", .0.display())]
    MissingInputFile(PathBuf),

    /// The filename list passed with `--list` does not exist
    #[error("list file not found: {}", .0.display())]
    MissingListFile(PathBuf),

    /// The photos directory to scan does not exist
    #[error("photos directory not found: {}", .0.display())]
    MissingPhotosDir(PathBuf),

    /// An image filename with an extension outside the allowed set
    #[error("Skipping {0} (unknown extension).")]
    UnsupportedExtension(String),

    /// A CSS selector from the configuration could not be parsed
    #[error("Invalid selector '{selector}': {message}")]
    InvalidSelector {
        /// The selector as written in the configuration
        selector: String,
        /// Parser message
        message: String,
    },

    /// Configuration is inconsistent
    #[error("Configuration error: {0}")]
    Config(String),
}

impl MigrationError {
    /// Whether the run can go on after this error (the entry is skipped)
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::MissingInputFile(_) | Self::UnsupportedExtension(_)
        )
    }
}
