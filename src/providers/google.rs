use crate::error::TranslateError;
use crate::i18n::Language;
use crate::providers::ensure_success;
use crate::retry::{with_retry, RetryConfig};
use crate::translator::Translator;
use serde_json::Value;

pub(crate) const PROVIDER: &str = "Google Translate";

/// Default public endpoint, the one used by the `gtx` web client.
pub const DEFAULT_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

/// Longest text sent in the query string. Percent-encoding can triple the
/// size, so longer text goes in a form-encoded POST body instead.
const MAX_QUERY_TEXT_BYTES: usize = 1000;

/// Translator backed by the public Google Translate endpoint.
///
/// No API key is needed. The service throttles aggressively, so requests go
/// through the retry helper and 429 responses honor `Retry-After`.
#[derive(Debug)]
pub struct GoogleTranslator {
    client: reqwest::Client,
    endpoint: String,
    source: Language,
    retry: RetryConfig,
}

impl GoogleTranslator {
    pub fn new(
        client: reqwest::Client,
        endpoint: &str,
        source: Language,
        retry: RetryConfig,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.to_string(),
            source,
            retry,
        }
    }

    pub fn source_language(&self) -> &Language {
        &self.source
    }

    async fn request(&self, text: &str, target: &Language) -> Result<String, TranslateError> {
        let params = [
            ("client", "gtx"),
            ("sl", self.source.google_code()),
            ("tl", target.google_code()),
            ("dt", "t"),
        ];

        // Long values would push the URL past server limits
        let request = if text.len() > MAX_QUERY_TEXT_BYTES {
            self.client
                .post(&self.endpoint)
                .query(&params)
                .form(&[("q", text)])
        } else {
            self.client
                .get(&self.endpoint)
                .query(&params)
                .query(&[("q", text)])
        };

        let response = request
            .send()
            .await
            .map_err(|source| TranslateError::Network {
                provider: PROVIDER,
                source,
            })?;

        let response = ensure_success(PROVIDER, response).await?;

        let body: Value = response
            .json()
            .await
            .map_err(|e| TranslateError::InvalidResponse {
                provider: PROVIDER,
                message: format!("body is not JSON: {}", e),
            })?;

        parse_translation(&body).ok_or_else(|| TranslateError::InvalidResponse {
            provider: PROVIDER,
            message: "response contained no translated segments".to_string(),
        })
    }
}

impl Translator for GoogleTranslator {
    async fn translate(&self, text: &str, target: &Language) -> Result<String, TranslateError> {
        with_retry(
            &self.retry,
            &format!("{} to {}", PROVIDER, target),
            || self.request(text, target),
        )
        .await
    }
}

/// Extract the translation from a `translate_a/single` response.
///
/// The body is a nested array whose first element lists segments as
/// `[translated, original, ...]`. Long inputs are split into several segments,
/// so the translated parts are concatenated in order.
fn parse_translation(body: &Value) -> Option<String> {
    let segments = body.get(0)?.as_array()?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    if translated.is_empty() {
        None
    } else {
        Some(translated)
    }
}
