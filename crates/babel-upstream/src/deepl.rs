use async_trait::async_trait;
use babel_types::{TranslationRequest, TranslationResult};

use crate::Provider;
use crate::error::TranslateError;

pub const DEFAULT_API_URL: &str = "https://api-free.deepl.com/v2/translate";

/// DeepL REST backend
#[derive(Clone)]
pub struct DeepLProvider {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
}

impl DeepLProvider {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            api_url,
        }
    }

    async fn request_translation(&self, request: &TranslationRequest) -> Result<String, TranslateError> {
        if self.api_key.is_empty() {
            return Err(TranslateError::AuthenticationError);
        }

        // DeepL only accepts a bare language as source, but regional targets
        let source_lang = request.source.primary_language().to_uppercase();
        let target_lang = request.target.as_str().to_uppercase();
        let params = [
            ("text", request.phrase.as_str()),
            ("source_lang", source_lang.as_str()),
            ("target_lang", target_lang.as_str()),
        ];

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key))
            .form(&params)
            .send()
            .await?;

        if response.status() == 429 || response.status() == 456 {
            return Err(TranslateError::RateLimitExceeded);
        }

        if response.status() == 403 {
            return Err(TranslateError::AuthenticationError);
        }

        if !response.status().is_success() {
            return Err(TranslateError::ApiError(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let json: serde_json::Value = response.json().await.map_err(|e| {
            TranslateError::ApiError(format!("Failed to parse response: {}", e))
        })?;

        extract_translation(&json)
    }
}

fn extract_translation(json: &serde_json::Value) -> Result<String, TranslateError> {
    json["translations"]
        .get(0)
        .and_then(|t| t["text"].as_str())
        .map(str::to_string)
        .ok_or_else(|| TranslateError::ApiError("No translation in response".to_string()))
}

#[async_trait]
impl Provider for DeepLProvider {
    async fn translate(&self, request: &TranslationRequest) -> TranslationResult {
        match self.request_translation(request).await {
            Ok(text) => TranslationResult::success(request, text),
            Err(e) => {
                tracing::warn!(provider = "deepl", request_id = %request.id, "DeepL call failed: {e}");
                TranslationResult::failure(request, e.into())
            }
        }
    }

    fn name(&self) -> &str {
        "deepl"
    }
}
