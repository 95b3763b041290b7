use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use log::debug;

use crate::app_config::ExtractionConfig;
use crate::errors::MigrationError;

// @module: Style and body extraction from legacy HTML pages
//
// The parsed tree decides which elements match; the returned text is always
// sliced out of the raw input so the markup is kept byte for byte.

// @const: Comment or start/end tag token
static TAG_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<!--.*?(?:-->|\z)|<(/?)([A-Za-z][A-Za-z0-9:-]*)[^>]*>").unwrap()
});

// @const: Elements whose content is text, never markup
const RAW_TEXT_ELEMENTS: [&str; 4] = ["script", "style", "textarea", "title"];

// @const: Elements without an end tag
const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

// @struct: Fragments pulled out of a legacy page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedContent {
    // @field: Inline stylesheet text, trimmed
    pub styles: String,

    // @field: Body markup without the header element, trimmed
    pub body: String,
}

// @struct: Tag token found in the raw text
#[derive(Debug, Clone, PartialEq, Eq)]
struct RawTag {
    name: String,
    closing: bool,
    self_closing: bool,
    start: usize,
    end: usize,
}

/// Pulls the inline stylesheet and the body out of a legacy page.
///
/// Missing regions come back as empty strings; markup is never validated.
pub struct HtmlExtractor {
    // @field: Selects the style element
    style: Selector,

    // @field: Selects the body element
    body: Selector,

    // @field: Selects the header element dropped from the body
    header: Selector,
}

impl HtmlExtractor {
    // @creates: Extractor from configured selectors
    pub fn new(config: &ExtractionConfig) -> Result<Self, MigrationError> {
        Ok(Self {
            style: parse_selector(&config.style_selector)?,
            body: parse_selector("body")?,
            header: parse_selector(&config.header_selector)?,
        })
    }

    /// Extract the style and body regions of `html`
    pub fn extract(&self, html: &str) -> ExtractedContent {
        let document = Html::parse_document(html);

        // Style content is raw text in the tree, identical to the source
        let styles = document
            .select(&self.style)
            .next()
            .map(|style| style.text().collect::<String>())
            .unwrap_or_default();

        let body = match body_range(&scan_tags(html), html.len()) {
            Some((start, end)) => {
                let raw_body = &html[start..end];
                match self.header_range(&document, raw_body) {
                    Some((header_start, header_end)) => {
                        debug!("Dropping header element from body");
                        format!("{}{}", &raw_body[..header_start], &raw_body[header_end..])
                    }
                    None => raw_body.to_string(),
                }
            }
            None => {
                debug!("No <body> tag found, body region is empty");
                String::new()
            }
        };

        ExtractedContent {
            styles: styles.trim().to_string(),
            body: body.trim().to_string(),
        }
    }

    // @returns: Byte range of the header element inside `raw_body`.
    // The tree picks the element; its position among same-named elements
    // locates the raw start tag.
    fn header_range(&self, document: &Html, raw_body: &str) -> Option<(usize, usize)> {
        let body = document.select(&self.body).next()?;
        let header = body.select(&self.header).next()?;
        let name = header.value().name();

        let ordinal = body
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(|element| element.value().name() == name)
            .position(|element| element.id() == header.id())?;

        let tags = scan_tags(raw_body);
        let (open_index, open) = tags
            .iter()
            .enumerate()
            .filter(|(_, tag)| tag.name == name && !tag.closing)
            .nth(ordinal)?;

        if open.self_closing || VOID_ELEMENTS.contains(&name) {
            return Some((open.start, open.end));
        }

        let mut depth = 0usize;
        for tag in tags[open_index + 1..].iter().filter(|tag| tag.name == name) {
            if tag.closing {
                if depth == 0 {
                    return Some((open.start, tag.end));
                }
                depth -= 1;
            } else if !tag.self_closing {
                depth += 1;
            }
        }

        // Unclosed element runs to the end of the body
        Some((open.start, raw_body.len()))
    }
}

impl Default for HtmlExtractor {
    fn default() -> Self {
        Self::new(&ExtractionConfig::default())
            .unwrap_or_else(|e| unreachable!("default selectors are valid: {}", e))
    }
}

/// Parse a CSS selector, mapping the parser error into the crate taxonomy
pub fn parse_selector(selector: &str) -> Result<Selector, MigrationError> {
    Selector::parse(selector).map_err(|e| MigrationError::InvalidSelector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

// @returns: Tag tokens of `html` in source order, skipping comments and
// the content of raw text elements
fn scan_tags(html: &str) -> Vec<RawTag> {
    let lowered = html.to_ascii_lowercase();
    let mut tags = Vec::new();
    let mut pos = 0;

    while let Some(caps) = TAG_TOKEN.captures_at(html, pos) {
        let Some(whole) = caps.get(0) else { break };
        pos = whole.end();
        let Some(name) = caps.get(2) else { continue };

        let tag = RawTag {
            name: name.as_str().to_ascii_lowercase(),
            closing: caps.get(1).is_some_and(|slash| !slash.as_str().is_empty()),
            self_closing: whole.as_str().ends_with("/>"),
            start: whole.start(),
            end: whole.end(),
        };

        if !tag.closing && RAW_TEXT_ELEMENTS.contains(&tag.name.as_str()) {
            let close = format!("</{}", tag.name);
            pos = lowered[pos..].find(&close).map_or(html.len(), |offset| pos + offset);
        }
        tags.push(tag);
    }

    tags
}

// @returns: Range between the end of the first <body> start tag and the
// following </body>, or the end of input when it is missing
fn body_range(tags: &[RawTag], len: usize) -> Option<(usize, usize)> {
    let open = tags.iter().position(|tag| tag.name == "body" && !tag.closing)?;
    let start = tags[open].end;
    let end = tags[open + 1..]
        .iter()
        .find(|tag| tag.name == "body" && tag.closing)
        .map_or(len, |tag| tag.start);
    Some((start, end))
}
