mod echo;
mod http;

use crate::language::Language;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};

pub use echo::EchoTranslationService;
pub use http::HttpTranslationService;

/// Body of `POST /translate`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TranslationRequest {
    pub text: String,
    pub input_language: Language,
    pub output_language: Language,
}

/// Success body of `POST /translate`. The service echoes the request
/// fields back; only `translated_text` is required.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TranslationResponse {
    pub translated_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_language: Option<String>,
}

impl TranslationResponse {
    pub fn new<S: Into<String>>(translated_text: S) -> Self {
        Self {
            translated_text: translated_text.into(),
            original_text: None,
            input_language: None,
            output_language: None,
        }
    }
}

/// Body of `GET /test`: a fixed English to Malay pair.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiagnosticSample {
    pub test_input: String,
    pub test_output: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Body of `GET /`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceStatus {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docs: Option<String>,
}

#[derive(thiserror::Error, Debug)]
pub enum TranslateError {
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),
    #[error("request timed out")]
    Timeout,
    #[error("HTTP {status}: {}", .detail.as_deref().unwrap_or("no detail"))]
    Api { status: u16, detail: Option<String> },
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl TranslateError {
    /// Human-readable reason supplied by the service, if it sent one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            TranslateError::Api {
                detail: Some(detail),
                ..
            } if !detail.trim().is_empty() => Some(detail),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            TranslateError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// The remote translation service as seen by the UI component.
pub trait TranslationService: Send + Sync {
    fn translate(
        &self,
        request: TranslationRequest,
    ) -> BoxFuture<'_, Result<TranslationResponse, TranslateError>>;

    fn self_test(&self) -> BoxFuture<'_, Result<DiagnosticSample, TranslateError>>;

    fn status(&self) -> BoxFuture<'_, Result<ServiceStatus, TranslateError>>;
}
