//! Translation quality validation module.
//!
//! Locale strings carry machine-readable fragments that must survive
//! translation untouched: interpolation placeholders (`{count}`,
//! `{{name}}`), inline HTML/JSX tags and URLs. This module compares the
//! fragments found in the source and the translated text.

use regex::Regex;
use std::sync::OnceLock;

/// Validation report containing warnings about a translation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationReport {
    /// Non-critical warnings about potential issues
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the report is clean (no warnings)
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Validator for translation quality.
pub struct TranslationValidator;

// Regex patterns for extraction (compiled once)
static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();
static TAG_REGEX: OnceLock<Regex> = OnceLock::new();
static URL_REGEX: OnceLock<Regex> = OnceLock::new();

impl TranslationValidator {
    /// Validate that a translation preserves the fragments of the original.
    ///
    /// Fragments are compared as multisets: translations may legitimately
    /// reorder them, but must neither drop, duplicate nor alter any.
    ///
    /// # Arguments
    /// * `original` - The source text
    /// * `translated` - The text returned by the translation provider
    ///
    /// # Returns
    /// A `ValidationReport` listing every mismatch found.
    pub fn validate(original: &str, translated: &str) -> ValidationReport {
        let mut report = ValidationReport::new();

        let orig_placeholders = Self::extract_placeholders(original);
        let trans_placeholders = Self::extract_placeholders(translated);
        if orig_placeholders != trans_placeholders {
            report.warnings.push(format!(
                "Placeholder mismatch: original has {:?}, translation has {:?}",
                orig_placeholders, trans_placeholders
            ));
        }

        let orig_tags = Self::extract_tags(original);
        let trans_tags = Self::extract_tags(translated);
        if orig_tags != trans_tags {
            report.warnings.push(format!(
                "Markup mismatch: original has {:?}, translation has {:?}",
                orig_tags, trans_tags
            ));
        }

        let orig_urls = Self::extract_urls(original);
        let trans_urls = Self::extract_urls(translated);
        if orig_urls != trans_urls {
            report.warnings.push(format!(
                "URL mismatch: original has {} URLs, translation has {} URLs",
                orig_urls.len(),
                trans_urls.len()
            ));
        }

        report
    }

    /// Extract `{name}` and `{{name}}` placeholders, sorted
    fn extract_placeholders(text: &str) -> Vec<String> {
        let regex = PLACEHOLDER_REGEX.get_or_init(|| {
            Regex::new(r"\{\{\s*[\w.]+\s*\}\}|\{\s*[\w.]+\s*\}").expect("placeholder pattern")
        });

        sorted(regex.find_iter(text).map(|m| m.as_str().to_string()))
    }

    /// Extract opening and closing tag names (e.g. `<b`, `</b`), sorted
    fn extract_tags(text: &str) -> Vec<String> {
        let regex = TAG_REGEX.get_or_init(|| {
            Regex::new(r"</?[A-Za-z][A-Za-z0-9]*").expect("tag pattern")
        });

        sorted(regex.find_iter(text).map(|m| m.as_str().to_string()))
    }

    /// Extract URLs, sorted
    fn extract_urls(text: &str) -> Vec<String> {
        let regex = URL_REGEX
            .get_or_init(|| Regex::new(r#"https?://[^\s)\]"'<>]+"#).expect("url pattern"));

        sorted(regex.find_iter(text).map(|m| m.as_str().to_string()))
    }
}

fn sorted(items: impl Iterator<Item = String>) -> Vec<String> {
    let mut items: Vec<String> = items.collect();
    items.sort();
    items
}
