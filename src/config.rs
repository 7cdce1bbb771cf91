use crate::i18n::Language;
use crate::providers::google;
use crate::sync::SyncConfig;
use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use std::str::FromStr;

/// Which translation service backs the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Google,
    OpenAi,
}

impl FromStr for ProviderKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "google" => Ok(ProviderKind::Google),
            "openai" => Ok(ProviderKind::OpenAi),
            other => bail!(
                "Unknown TRANSLATION_PROVIDER '{}' (expected 'google' or 'openai')",
                other
            ),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    // Locale layout
    pub locales_dir: PathBuf,
    pub default_locale: String,
    pub target_locales: Vec<String>,

    // Provider
    pub provider: ProviderKind,
    pub google_translate_url: String,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_api_url: String,

    // Requests
    pub max_attempts: u32,
    pub request_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any variable source.
    pub fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let provider = match var("TRANSLATION_PROVIDER") {
            Some(value) => value.parse()?,
            None => ProviderKind::Google,
        };

        Ok(Self {
            // Locale layout
            locales_dir: PathBuf::from(var("LOCALES_DIR").unwrap_or_else(|| "i18n".to_string())),
            default_locale: var("DEFAULT_LOCALE").unwrap_or_else(|| "en".to_string()),
            target_locales: parse_locale_list(
                &var("TARGET_LOCALES").unwrap_or_else(|| "fr,de,ru".to_string()),
            ),

            // Provider
            provider,
            google_translate_url: var("GOOGLE_TRANSLATE_URL")
                .unwrap_or_else(|| google::DEFAULT_ENDPOINT.to_string()),
            openai_api_key: var("OPENAI_API_KEY").filter(|key| !key.trim().is_empty()),
            openai_model: var("OPENAI_MODEL").unwrap_or_else(|| "gpt-4o-mini".to_string()),
            openai_api_url: var("OPENAI_API_URL")
                .unwrap_or_else(|| "https://api.openai.com/v1/chat/completions".to_string()),

            // Requests
            max_attempts: parse_or("TRANSLATION_MAX_ATTEMPTS", var("TRANSLATION_MAX_ATTEMPTS"), 3)?,
            request_timeout_secs: parse_or("REQUEST_TIMEOUT_SECS", var("REQUEST_TIMEOUT_SECS"), 30)?,
        })
    }

    /// Validate the locale settings and turn them into a `SyncConfig`.
    pub fn sync_config(&self) -> Result<SyncConfig> {
        let default_language = Language::from_code(&self.default_locale)
            .context("DEFAULT_LOCALE is not a valid language code")?;

        let target_languages = self
            .target_locales
            .iter()
            .map(|code| Language::from_code(code))
            .collect::<Result<Vec<_>>>()
            .context("TARGET_LOCALES contains an invalid language code")?;

        SyncConfig::new(&self.locales_dir, default_language, target_languages)
    }
}

/// Split a comma separated list, dropping blanks.
fn parse_locale_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse an optional numeric variable. Unlike a missing value, a malformed one
/// is an error rather than a silent default.
fn parse_or<T>(name: &str, value: Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match value {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be a number, got '{}'", name, raw)),
        None => Ok(default),
    }
}
