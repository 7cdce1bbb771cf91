//! Language registry: metadata for the language codes a site is likely to use.
//!
//! The registry is only descriptive. Any well-formed code can be synchronized;
//! codes missing from the table simply have no human-readable name. It uses a
//! singleton pattern with `OnceLock` so the table is built once and shared.

use std::sync::OnceLock;

/// Metadata for a known language.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// Locale directory code (e.g., "en", "fr", "pt-BR", "zh-Hans")
    pub code: &'static str,

    /// English name of the language (e.g., "French")
    pub name: &'static str,

    /// Native name of the language (e.g., "Français")
    pub native_name: &'static str,

    /// Code understood by Google Translate when it differs from `code`
    pub google_code: Option<&'static str>,
}

/// Global language registry singleton.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: known_languages(),
        })
    }

    /// Get a language configuration by its code.
    ///
    /// Matching is case-insensitive and treats `_` like `-`. When the full code
    /// is unknown the primary subtag is tried, so "fr-CA" resolves to French.
    ///
    /// # Arguments
    /// * `code` - The locale code (e.g., "fr", "pt-BR", "zh_Hans")
    ///
    /// # Returns
    /// * `Some(&LanguageConfig)` if the language (or its primary subtag) is known
    /// * `None` otherwise
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        let normalized = code.replace('_', "-");

        self.find_exact(&normalized).or_else(|| {
            let primary = normalized.split('-').next()?;
            self.find_exact(primary)
        })
    }

    fn find_exact(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages
            .iter()
            .find(|lang| lang.code.eq_ignore_ascii_case(code))
    }
}

/// Languages commonly shipped by documentation sites.
fn known_languages() -> Vec<LanguageConfig> {
    fn lang(
        code: &'static str,
        name: &'static str,
        native_name: &'static str,
        google_code: Option<&'static str>,
    ) -> LanguageConfig {
        LanguageConfig {
            code,
            name,
            native_name,
            google_code,
        }
    }

    vec![
        lang("en", "English", "English", None),
        lang("fr", "French", "Français", None),
        lang("de", "German", "Deutsch", None),
        lang("ru", "Russian", "Русский", None),
        lang("es", "Spanish", "Español", None),
        lang("it", "Italian", "Italiano", None),
        lang("pt", "Portuguese", "Português", None),
        lang("pt-BR", "Brazilian Portuguese", "Português (Brasil)", Some("pt")),
        lang("nl", "Dutch", "Nederlands", None),
        lang("pl", "Polish", "Polski", None),
        lang("uk", "Ukrainian", "Українська", None),
        lang("tr", "Turkish", "Türkçe", None),
        lang("ja", "Japanese", "日本語", None),
        lang("ko", "Korean", "한국어", None),
        lang("zh", "Chinese", "中文", Some("zh-CN")),
        lang("zh-Hans", "Simplified Chinese", "简体中文", Some("zh-CN")),
        lang("zh-Hant", "Traditional Chinese", "繁體中文", Some("zh-TW")),
        lang("ar", "Arabic", "العربية", None),
        lang("hi", "Hindi", "हिन्दी", None),
        lang("fa", "Persian", "فارسی", None),
        lang("he", "Hebrew", "עברית", Some("iw")),
        lang("vi", "Vietnamese", "Tiếng Việt", None),
        lang("id", "Indonesian", "Bahasa Indonesia", None),
    ]
}
