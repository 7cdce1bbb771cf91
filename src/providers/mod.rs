//! HTTP translation providers.
//!
//! - `google`: the public Google Translate endpoint (default, no API key)
//! - `openai`: OpenAI chat completions with a translator prompt
//!
//! [`ProviderTranslator`] selects one of them from [`Config`].

pub mod google;
pub mod openai;

pub use google::GoogleTranslator;
pub use openai::OpenAiTranslator;

use crate::config::{Config, ProviderKind};
use crate::error::TranslateError;
use crate::i18n::Language;
use crate::retry::RetryConfig;
use crate::translator::Translator;
use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, RETRY_AFTER};
use std::time::Duration;

/// The provider chosen by configuration.
#[derive(Debug)]
pub enum ProviderTranslator {
    Google(GoogleTranslator),
    OpenAi(OpenAiTranslator),
}

impl ProviderTranslator {
    /// Build the configured provider around a shared HTTP client.
    pub fn from_config(config: &Config, client: reqwest::Client) -> Result<Self> {
        let source = Language::from_code(&config.default_locale)?;
        let retry = RetryConfig::per_key().with_max_attempts(config.max_attempts);

        let translator = match config.provider {
            ProviderKind::Google => ProviderTranslator::Google(GoogleTranslator::new(
                client,
                &config.google_translate_url,
                source,
                retry,
            )),
            ProviderKind::OpenAi => {
                let api_key = config
                    .openai_api_key
                    .clone()
                    .context("OPENAI_API_KEY not set (required for the openai provider)")?;
                ProviderTranslator::OpenAi(OpenAiTranslator::new(
                    client,
                    &config.openai_api_url,
                    api_key,
                    &config.openai_model,
                    source,
                    retry,
                ))
            }
        };

        Ok(translator)
    }

    /// Human-readable provider name for log lines.
    pub fn name(&self) -> &'static str {
        match self {
            ProviderTranslator::Google(_) => google::PROVIDER,
            ProviderTranslator::OpenAi(_) => openai::PROVIDER,
        }
    }

    fn source_language(&self) -> &Language {
        match self {
            ProviderTranslator::Google(t) => t.source_language(),
            ProviderTranslator::OpenAi(t) => t.source_language(),
        }
    }
}

impl Translator for ProviderTranslator {
    async fn translate(&self, text: &str, target: &Language) -> Result<String, TranslateError> {
        // Nothing to translate; skip the round trip
        if text.trim().is_empty() || target == self.source_language() {
            return Ok(text.to_string());
        }

        match self {
            ProviderTranslator::Google(t) => t.translate(text, target).await,
            ProviderTranslator::OpenAi(t) => t.translate(text, target).await,
        }
    }
}

/// Turn a non-success response into a `TranslateError`.
///
/// 429 becomes `RateLimited` (carrying any `Retry-After` hint); every other
/// failure status becomes `Api` with the response body for diagnostics.
pub(crate) async fn ensure_success(
    provider: &'static str,
    response: reqwest::Response,
) -> Result<reqwest::Response, TranslateError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(TranslateError::RateLimited {
            provider,
            retry_after: parse_retry_after(response.headers()),
        });
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|e| format!("<failed to read body: {}>", e));

    Err(TranslateError::Api {
        provider,
        status: status.as_u16(),
        body,
    })
}

/// `Retry-After` in its delay-seconds form. HTTP-date values are ignored.
fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;
    use std::path::PathBuf;
    use wiremock::{matchers::method, Mock, MockServer, ResponseTemplate};

    fn create_test_config(provider: ProviderKind) -> Config {
        Config {
            locales_dir: PathBuf::from("i18n"),
            default_locale: "en".to_string(),
            target_locales: vec!["fr".to_string()],
            provider,
            google_translate_url: "http://invalid-url-should-not-be-called.test".to_string(),
            openai_api_key: None,
            openai_model: "gpt-4o-mini".to_string(),
            openai_api_url: "http://invalid-url-should-not-be-called.test".to_string(),
            max_attempts: 1,
            request_timeout_secs: 5,
        }
    }

    // ==================== Retry-After Parsing Tests ====================

    #[test]
    fn test_parse_retry_after_seconds() {
        let mut headers = HeaderMap::new();
        headers.insert(RETRY_AFTER, HeaderValue::from_static("7"));
        assert_eq!(parse_retry_after(&headers), Some(Duration::from_secs(7)));
    }

    #[test]
    fn test_parse_retry_after_http_date_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(
            RETRY_AFTER,
            HeaderValue::from_static("Wed, 21 Oct 2015 07:28:00 GMT"),
        );
        assert_eq!(parse_retry_after(&headers), None);
    }

    #[test]
    fn test_parse_retry_after_missing() {
        assert_eq!(parse_retry_after(&HeaderMap::new()), None);
    }

    // ==================== from_config Tests ====================

    #[test]
    fn test_from_config_google() {
        let config = create_test_config(ProviderKind::Google);
        let translator = ProviderTranslator::from_config(&config, reqwest::Client::new())
            .expect("Should build");
        assert_eq!(translator.name(), "Google Translate");
    }

    #[test]
    fn test_from_config_openai_requires_key() {
        let config = create_test_config(ProviderKind::OpenAi);
        let err = ProviderTranslator::from_config(&config, reqwest::Client::new()).unwrap_err();
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn test_from_config_openai_with_key() {
        let mut config = create_test_config(ProviderKind::OpenAi);
        config.openai_api_key = Some("test-openai-key".to_string());
        let translator = ProviderTranslator::from_config(&config, reqwest::Client::new())
            .expect("Should build");
        assert_eq!(translator.name(), "OpenAI");
    }

    // ==================== Short-circuit Tests ====================

    #[tokio::test]
    async fn test_empty_text_skips_api_call() {
        // The endpoint is unreachable, so any request would fail
        let config = create_test_config(ProviderKind::Google);
        let translator =
            ProviderTranslator::from_config(&config, reqwest::Client::new()).unwrap();

        let result = translator
            .translate("   ", &Language::from_code("fr").unwrap())
            .await;
        assert_eq!(result.unwrap(), "   ");
    }

    #[tokio::test]
    async fn test_source_language_target_skips_api_call() {
        let config = create_test_config(ProviderKind::Google);
        let translator =
            ProviderTranslator::from_config(&config, reqwest::Client::new()).unwrap();

        let result = translator
            .translate("Home", &Language::from_code("en").unwrap())
            .await;
        assert_eq!(result.unwrap(), "Home");
    }

    // ==================== ensure_success Tests ====================

    #[tokio::test]
    async fn test_ensure_success_rate_limited() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "3"))
            .mount(&mock_server)
            .await;

        let response = reqwest::get(mock_server.uri()).await.unwrap();
        let err = ensure_success("Google Translate", response).await.unwrap_err();

        assert!(matches!(err, TranslateError::RateLimited { .. }));
        assert_eq!(err.retry_after(), Some(Duration::from_secs(3)));
    }

    #[tokio::test]
    async fn test_ensure_success_api_error_keeps_body() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(400).set_body_string("bad target language"))
            .mount(&mock_server)
            .await;

        let response = reqwest::get(mock_server.uri()).await.unwrap();
        let err = ensure_success("Google Translate", response).await.unwrap_err();

        match err {
            TranslateError::Api { status, body, .. } => {
                assert_eq!(status, 400);
                assert_eq!(body, "bad target language");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
