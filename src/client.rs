use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::level::CefrLevel;
use crate::engine::token::Token;

/// Failures surfaced to the session layer. Validation errors are caught
/// before any network call; the other two wrap whatever the collaborator or
/// transport reported. None of these are fatal — they become view state.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("analysis failed: {0}")]
    Analysis(String),
    #[error("translation failed: {0}")]
    Translation(String),
}

/// Translation result for a single word. `root` carries the root form
/// (e.g. a Hebrew shoresh) when the provider knows one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Translation {
    pub translation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AnalyzeResponse {
    pub tokens: Vec<Token>,
}

#[derive(Debug, Serialize)]
struct AnalyzeRequestBody<'a> {
    text: &'a str,
    user_level: &'a str,
}

#[derive(Debug, Serialize)]
struct TranslateRequestBody<'a> {
    word: &'a str,
    context: &'a str,
}

/// Translate responses are not trusted to be well-formed: the provider can
/// answer 200 with an error payload, or with the expected fields missing.
#[derive(Debug, Deserialize)]
struct TranslateResponseBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    translation: Option<String>,
    #[serde(default)]
    root: Option<String>,
    #[serde(default)]
    example: Option<String>,
}

/// Blocking HTTP client for the analyzer/translator service. Cheap to clone;
/// worker threads each build their own transport per request.
#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: String,
    timeout: Duration,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    /// `POST /api/analyze`: full text plus the learner's target level; the
    /// analyzer returns the ordered token stream.
    pub fn analyze(&self, text: &str, user_level: CefrLevel) -> Result<Vec<Token>, ServiceError> {
        let body = AnalyzeRequestBody {
            text,
            user_level: user_level.as_str(),
        };
        let response: AnalyzeResponse = self
            .post_json("/api/analyze", &body)
            .map_err(ServiceError::Analysis)?;
        Ok(response.tokens)
    }

    /// `POST /api/translate`: one word plus a context snippet.
    pub fn translate(&self, word: &str, context: &str) -> Result<Translation, ServiceError> {
        let body = TranslateRequestBody { word, context };
        let response: TranslateResponseBody = self
            .post_json("/api/translate", &body)
            .map_err(ServiceError::Translation)?;

        if let Some(error) = response.error {
            return Err(ServiceError::Translation(error));
        }
        let translation = response
            .translation
            .ok_or_else(|| ServiceError::Translation("provider returned no translation".into()))?;
        Ok(Translation {
            translation,
            root: response.root,
            example: response.example,
        })
    }

    #[cfg(feature = "network")]
    fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, String>
    where
        B: Serialize,
        R: serde::de::DeserializeOwned,
    {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| e.to_string())?;
        let url = format!("{}{path}", self.base_url);
        let response = client
            .post(&url)
            .json(body)
            .send()
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if !status.is_success() {
            // FastAPI-style error bodies carry a "detail" message.
            #[derive(Deserialize)]
            struct ErrorBody {
                detail: Option<String>,
            }
            let detail = response
                .json::<ErrorBody>()
                .ok()
                .and_then(|b| b.detail)
                .unwrap_or_else(|| format!("server returned {status}"));
            return Err(detail);
        }

        response
            .json::<R>()
            .map_err(|e| format!("malformed response: {e}"))
    }

    #[cfg(not(feature = "network"))]
    fn post_json<B, R>(&self, _path: &str, _body: &B) -> Result<R, String>
    where
        B: Serialize,
        R: serde::de::DeserializeOwned,
    {
        Err("built without network support".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client = ApiClient::new("http://localhost:8000/", 10);
        assert_eq!(client.base_url, "http://localhost:8000");
    }

    #[test]
    fn translation_round_trips_without_optional_fields() {
        let json = r#"{"translation": "שלום"}"#;
        let t: Translation = serde_json::from_str(json).unwrap();
        assert_eq!(t.translation, "שלום");
        assert_eq!(t.root, None);
        let back = serde_json::to_string(&t).unwrap();
        assert!(!back.contains("root"));
    }

    #[test]
    fn analyze_response_parses_a_mixed_stream() {
        let json = r#"{"tokens": [
            {"text": "Hello", "importance": 1, "cefr": "A1", "isDifficult": false},
            {"text": "\n", "importance": -1, "cefr": ""}
        ]}"#;
        let response: AnalyzeResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.tokens.len(), 2);
        assert!(response.tokens[0].is_word());
        assert!(response.tokens[1].is_line_break());
    }
}
