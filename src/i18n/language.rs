//! Language type: a validated locale code.
//!
//! A `Language` names one locale bundle (one subdirectory of the locales root).
//! Construction only checks that the code is safe to use as a directory name;
//! the registry supplies display names where it knows the code.

use crate::i18n::{LanguageConfig, LanguageRegistry};
use anyhow::{bail, Result};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A validated locale code.
///
/// Equality ignores ASCII case: "EN" and "en" name the same bundle on
/// case-insensitive filesystems, so they are the same language.
#[derive(Debug, Clone)]
pub struct Language {
    /// Code exactly as configured (e.g., "fr", "pt-BR")
    code: String,
}

impl Language {
    /// Create a Language from a locale code string.
    ///
    /// # Arguments
    /// * `code` - The locale code (e.g., "fr", "pt-BR", "zh_Hans")
    ///
    /// # Returns
    /// * `Ok(Language)` if the code is non-empty and made of ASCII letters,
    ///   digits, `-` or `_`
    /// * `Err` otherwise (the code could escape the locales directory)
    pub fn from_code(code: &str) -> Result<Language> {
        let code = code.trim();

        if code.is_empty() {
            bail!("Language code must not be empty");
        }

        if !code
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            bail!("Invalid language code: '{}'", code);
        }

        Ok(Language {
            code: code.to_string(),
        })
    }

    /// The code as configured; also the bundle's directory name.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Registry entry for this language, if known.
    pub fn config(&self) -> Option<&'static LanguageConfig> {
        LanguageRegistry::get().get_by_code(&self.code)
    }

    /// English name of the language, or the code when unknown.
    pub fn name(&self) -> &str {
        self.config().map_or(self.code.as_str(), |c| c.name)
    }

    /// Name of the language in itself, or the code when unknown.
    pub fn native_name(&self) -> &str {
        self.config().map_or(self.code.as_str(), |c| c.native_name)
    }

    /// Code to send to Google Translate.
    ///
    /// Docusaurus style codes such as "zh-Hans" are mapped to the codes the
    /// service expects; unknown codes are passed through unchanged.
    pub fn google_code(&self) -> &str {
        match self.config().and_then(|c| c.google_code) {
            Some(code) => code,
            None => &self.code,
        }
    }
}

impl PartialEq for Language {
    fn eq(&self, other: &Self) -> bool {
        self.code.eq_ignore_ascii_case(&other.code)
    }
}

impl Eq for Language {}

impl Hash for Language {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for byte in self.code.bytes() {
            state.write_u8(byte.to_ascii_lowercase());
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}
