use crate::error::TranslateError;
use crate::i18n::Language;
use crate::providers::ensure_success;
use crate::retry::{with_retry, RetryConfig};
use crate::translator::Translator;
use serde::{Deserialize, Serialize};

pub(crate) const PROVIDER: &str = "OpenAI";

/// Upper bound on completion tokens for a single locale string
const MAX_COMPLETION_TOKENS: u32 = 1000;

/// Reasoning models spend tokens before answering, so they get more room
const REASONING_MAX_COMPLETION_TOKENS: u32 = 4000;

/// OpenAI Chat Completion request for translation
#[derive(Debug, Serialize)]
struct TranslationRequest {
    model: String,
    messages: Vec<Message>,
    max_completion_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reasoning_effort: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

/// Check if a model is a reasoning model that doesn't support temperature
fn is_reasoning_model(model: &str) -> bool {
    model.starts_with("gpt-5")
        || model.starts_with("o1")
        || model.starts_with("o3")
        || model.starts_with("o4")
}

/// Build the system prompt for translating one UI string
fn build_translation_system_prompt(source_language: &str, target_language: &str) -> String {
    format!(
        r#"You are a professional translator localizing a documentation website. Translate the user's text from {} to {}.

## Rules

### DO NOT translate or alter:
- Interpolation placeholders (e.g., {{count}}, {{{{name}}}})
- HTML or JSX tags and their attributes
- URLs and links
- Code snippets, file names and command names
- Product and brand names

### Output:
- Reply with the translated text only, without quotes, notes or explanations
- Keep the original capitalization style, punctuation and surrounding whitespace
- Keep markdown formatting unchanged
- If the text cannot be meaningfully translated, return it unchanged"#,
        source_language, target_language
    )
}

/// Language as named in the prompt, e.g. "German (Deutsch)"
fn prompt_language(language: &Language) -> String {
    let (name, native) = (language.name(), language.native_name());
    if name == native {
        name.to_string()
    } else {
        format!("{} ({})", name, native)
    }
}

/// Put the source's leading and trailing whitespace back around a translation.
///
/// Models drop or invent surrounding whitespace, so the reply is trimmed and
/// the source padding is restored.
fn restore_padding(source: &str, translated: &str) -> String {
    let core = source.trim();
    if core.is_empty() {
        return source.to_string();
    }
    let leading = &source[..source.len() - source.trim_start().len()];
    let trailing = &source[source.trim_end().len()..];
    format!("{}{}{}", leading, translated.trim(), trailing)
}

/// Translator backed by OpenAI chat completions.
#[derive(Debug)]
pub struct OpenAiTranslator {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
    source: Language,
    retry: RetryConfig,
}

impl OpenAiTranslator {
    pub fn new(
        client: reqwest::Client,
        api_url: &str,
        api_key: String,
        model: &str,
        source: Language,
        retry: RetryConfig,
    ) -> Self {
        Self {
            client,
            api_url: api_url.to_string(),
            api_key,
            model: model.to_string(),
            source,
            retry,
        }
    }

    pub fn source_language(&self) -> &Language {
        &self.source
    }

    fn build_request(&self, text: &str, target: &Language) -> TranslationRequest {
        // Reasoning models need higher token limits and don't support temperature
        let is_reasoning = is_reasoning_model(&self.model);

        TranslationRequest {
            model: self.model.clone(),
            messages: vec![
                Message {
                    role: "system".to_string(),
                    content: build_translation_system_prompt(
                        &prompt_language(&self.source),
                        &prompt_language(target),
                    ),
                },
                Message {
                    role: "user".to_string(),
                    content: text.to_string(),
                },
            ],
            max_completion_tokens: if is_reasoning {
                REASONING_MAX_COMPLETION_TOKENS
            } else {
                MAX_COMPLETION_TOKENS
            },
            temperature: if is_reasoning { None } else { Some(0.3) },
            reasoning_effort: if is_reasoning {
                Some("low".to_string())
            } else {
                None
            },
        }
    }

    async fn request(&self, request: &TranslationRequest) -> Result<String, TranslateError> {
        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|source| TranslateError::Network {
                provider: PROVIDER,
                source,
            })?;

        let response = ensure_success(PROVIDER, response).await?;

        let chat_response: ChatResponse =
            response
                .json()
                .await
                .map_err(|e| TranslateError::InvalidResponse {
                    provider: PROVIDER,
                    message: format!("failed to parse chat completion: {}", e),
                })?;

        chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| TranslateError::InvalidResponse {
                provider: PROVIDER,
                message: "response contained no choices".to_string(),
            })
    }
}

impl Translator for OpenAiTranslator {
    async fn translate(&self, text: &str, target: &Language) -> Result<String, TranslateError> {
        let request = self.build_request(text, target);

        let translated = with_retry(
            &self.retry,
            &format!("{} translation to {}", PROVIDER, target.name()),
            || self.request(&request),
        )
        .await?;

        Ok(restore_padding(text, &translated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::{
        matchers::{body_partial_json, body_string_contains, header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn create_translator(api_url: &str, model: &str, retry: RetryConfig) -> OpenAiTranslator {
        OpenAiTranslator::new(
            reqwest::Client::new(),
            api_url,
            "test-openai-key".to_string(),
            model,
            Language::from_code("en").unwrap(),
            retry,
        )
    }

    fn mock_url(server: &MockServer) -> String {
        format!("{}/v1/chat/completions", server.uri())
    }

    fn fast_retry() -> RetryConfig {
        RetryConfig::new(3, Duration::from_millis(10))
    }

    fn create_openai_response(content: &str) -> serde_json::Value {
        serde_json::json!({
            "id": "chatcmpl-123",
            "object": "chat.completion",
            "choices": [
                {
                    "index": 0,
                    "message": {
                        "role": "assistant",
                        "content": content
                    },
                    "finish_reason": "stop"
                }
            ]
        })
    }

    fn german() -> Language {
        Language::from_code("de").unwrap()
    }

    // ==================== System Prompt Tests ====================

    #[test]
    fn test_system_prompt_names_languages() {
        let prompt = build_translation_system_prompt("English", "German");
        assert!(prompt.contains("from English to German"));
    }

    #[test]
    fn test_prompt_language_includes_native_name() {
        assert_eq!(prompt_language(&german()), "German (Deutsch)");
        assert_eq!(prompt_language(&Language::from_code("en").unwrap()), "English");
        assert_eq!(prompt_language(&Language::from_code("tlh").unwrap()), "tlh");
    }

    // ==================== Whitespace Tests ====================

    #[test]
    fn test_restore_padding() {
        assert_eq!(restore_padding(" Home ", "Accueil"), " Accueil ");
        assert_eq!(restore_padding("Home\n", " Accueil\n\n"), "Accueil\n");
        assert_eq!(restore_padding("\tHome", "Accueil"), "\tAccueil");
        assert_eq!(restore_padding("Home", "  Accueil  "), "Accueil");
        assert_eq!(restore_padding("   ", "x"), "   ");
    }

    #[test]
    fn test_system_prompt_protects_placeholders() {
        let prompt = build_translation_system_prompt("English", "German");
        assert!(prompt.contains("{count}"));
        assert!(prompt.contains("{{name}}"));
        assert!(prompt.contains("HTML or JSX tags"));
        assert!(prompt.contains("URLs"));
        assert!(prompt.contains("translated text only"));
    }

    // ==================== Request Structure Tests ====================

    #[test]
    fn test_build_request_standard_model() {
        let translator = create_translator("http://unused.test", "gpt-4o-mini", fast_retry());
        let request = translator.build_request("Home", &german());

        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, "system");
        assert!(request.messages[0].content.contains("from English to German (Deutsch)"));
        assert_eq!(request.messages[1].role, "user");
        assert_eq!(request.messages[1].content, "Home");
        assert_eq!(request.max_completion_tokens, MAX_COMPLETION_TOKENS);
        assert_eq!(request.temperature, Some(0.3));
        assert!(request.reasoning_effort.is_none());
    }

    #[test]
    fn test_build_request_reasoning_model() {
        let translator = create_translator("http://unused.test", "gpt-5-mini", fast_retry());
        let request = translator.build_request("Home", &german());

        assert_eq!(request.max_completion_tokens, REASONING_MAX_COMPLETION_TOKENS);
        assert!(request.temperature.is_none());
        assert_eq!(request.reasoning_effort.as_deref(), Some("low"));

        let json = serde_json::to_string(&request).expect("Should serialize");
        assert!(json.contains("reasoning_effort"));
        assert!(!json.contains("temperature"));
    }

    #[test]
    fn test_translation_request_serialization_skips_none() {
        let translator = create_translator("http://unused.test", "gpt-4o-mini", fast_retry());
        let json = serde_json::to_string(&translator.build_request("Home", &german()))
            .expect("Should serialize");

        assert!(json.contains("gpt-4o-mini"));
        assert!(json.contains("max_completion_tokens"));
        assert!(json.contains("0.3"));
        assert!(!json.contains("reasoning_effort"));
    }

    #[test]
    fn test_is_reasoning_model() {
        assert!(is_reasoning_model("gpt-5-mini"));
        assert!(is_reasoning_model("gpt-5"));
        assert!(is_reasoning_model("o1-mini"));
        assert!(is_reasoning_model("o3"));
        assert!(is_reasoning_model("o4-mini"));
        assert!(!is_reasoning_model("gpt-4o-mini"));
        assert!(!is_reasoning_model("gpt-4-turbo"));
    }

    // ==================== ChatResponse Deserialization Tests ====================

    #[test]
    fn test_chat_response_deserialization() {
        let json = r#"{"choices": [{"message": {"role": "assistant", "content": "Startseite"}}]}"#;
        let response: ChatResponse = serde_json::from_str(json).expect("Should deserialize");
        assert_eq!(response.choices.len(), 1);
        assert_eq!(response.choices[0].message.content, "Startseite");
    }

    // ==================== Integration Tests with Wiremock ====================

    #[tokio::test]
    async fn test_translate_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("Authorization", "Bearer test-openai-key"))
            .and(body_partial_json(serde_json::json!({"model": "gpt-4o-mini"})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(create_openai_response("Startseite\n")),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let translator = create_translator(&mock_url(&mock_server), "gpt-4o-mini", fast_retry());
        let result = translator.translate("Home", &german()).await;

        assert_eq!(result.unwrap(), "Startseite");
    }

    #[tokio::test]
    async fn test_translate_keeps_source_padding() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(body_string_contains(r#""content":" Home ""#))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(create_openai_response(" Startseite ")),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let translator = create_translator(&mock_url(&mock_server), "gpt-4o-mini", fast_retry());
        let result = translator.translate(" Home ", &german()).await;

        assert_eq!(result.unwrap(), " Startseite ");
    }

    #[tokio::test]
    async fn test_translate_empty_choices() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})),
            )
            .mount(&mock_server)
            .await;

        let translator = create_translator(
            &mock_url(&mock_server),
            "gpt-4o-mini",
            RetryConfig::no_retry(),
        );
        let err = translator.translate("Home", &german()).await.unwrap_err();

        assert!(err.to_string().contains("no choices"), "{}", err);
    }

    #[tokio::test]
    async fn test_translate_retries_on_500_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_string(r#"{"error": {"message": "Internal Server Error"}}"#),
            )
            .up_to_n_times(2)
            .mount(&mock_server)
            .await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(create_openai_response("Startseite")),
            )
            .mount(&mock_server)
            .await;

        let translator = create_translator(&mock_url(&mock_server), "gpt-4o-mini", fast_retry());
        let result = translator.translate("Home", &german()).await;

        assert!(result.is_ok(), "Should succeed after retries: {:?}", result);
    }

    #[tokio::test]
    async fn test_translate_no_retry_on_401_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_string(r#"{"error": {"message": "Invalid API key"}}"#),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let translator = create_translator(&mock_url(&mock_server), "gpt-4o-mini", fast_retry());
        let err = translator.translate("Home", &german()).await.unwrap_err();

        assert!(err.to_string().contains("401"), "{}", err);
        assert!(err.to_string().contains("Invalid API key"));
    }

    #[tokio::test]
    async fn test_translate_exhausts_retries_on_persistent_500() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Persistent failure"))
            .expect(3)
            .mount(&mock_server)
            .await;

        let translator = create_translator(&mock_url(&mock_server), "gpt-4o-mini", fast_retry());
        let err = translator.translate("Home", &german()).await.unwrap_err();

        assert!(err.to_string().contains("500"), "{}", err);
    }
}
