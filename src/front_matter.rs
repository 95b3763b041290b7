/*!
 * Front matter serialization and content-file composition.
 *
 * A front-matter block is a `---` delimited list of `key: value` lines placed
 * at the top of a content file. Values are written verbatim; a value that
 * contains a newline or starts a new `---` line corrupts the block.
 */

use std::fmt;

use crate::extractor::ExtractedContent;

// @const: Front matter block delimiter line
pub const DELIMITER: &str = "---";

/// A single front-matter value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrontMatterValue {
    /// Plain text, written as is
    Text(String),
    /// Boolean, written as `true` / `false`
    Bool(bool),
}

impl fmt::Display for FrontMatterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => write!(f, "{}", text),
            Self::Bool(flag) => write!(f, "{}", flag),
        }
    }
}

impl From<&str> for FrontMatterValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for FrontMatterValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<bool> for FrontMatterValue {
    fn from(flag: bool) -> Self {
        Self::Bool(flag)
    }
}

/// Ordered metadata header of a content file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    // @field: Fields in declaration order
    fields: Vec<(String, FrontMatterValue)>,
}

impl FrontMatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field, keeping declaration order
    pub fn with(mut self, key: &str, value: impl Into<FrontMatterValue>) -> Self {
        self.fields.push((key.to_string(), value.into()));
        self
    }

    pub fn fields(&self) -> &[(String, FrontMatterValue)] {
        &self.fields
    }

    /// Look up a field by key
    pub fn get(&self, key: &str) -> Option<&FrontMatterValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Render the block, delimiters included, without a trailing newline
    pub fn render(&self) -> String {
        let mut out = String::from(DELIMITER);
        out.push('\n');
        for (key, value) in &self.fields {
            out.push_str(&format!("{}: {}\n", key, value));
        }
        out.push_str(DELIMITER);
        out
    }

    /// Read the leading front-matter block of `text`.
    ///
    /// Returns `None` when the text does not start with a closed block.
    pub fn parse(text: &str) -> Option<Self> {
        let mut lines = text.lines();
        if lines.next()? != DELIMITER {
            return None;
        }

        let mut front_matter = Self::new();
        for line in lines {
            if line == DELIMITER {
                return Some(front_matter);
            }
            let (key, value) = line.split_once(": ").unwrap_or((line.trim_end_matches(':'), ""));
            let value = match value {
                "true" => FrontMatterValue::Bool(true),
                "false" => FrontMatterValue::Bool(false),
                other => FrontMatterValue::Text(other.to_string()),
            };
            front_matter.fields.push((key.to_string(), value));
        }

        None
    }
}

/// Build a case-study content file: front matter, style wrapper, then body
pub fn compose_case_study(front_matter: &FrontMatter, content: &ExtractedContent) -> String {
    format!(
        "{}\n\n<style>\n{}\n</style>\n\n{}\n",
        front_matter.render(),
        content.styles,
        content.body
    )
}

/// Build a metadata-only content file
pub fn compose_metadata_only(front_matter: &FrontMatter) -> String {
    format!("{}\n", front_matter.render())
}
