use crate::config::{ApiBaseUrl, AppConfig};
use crate::translate::{
    DiagnosticSample, ServiceStatus, TranslateError, TranslationRequest, TranslationResponse,
    TranslationService,
};
use futures::future::BoxFuture;
use futures::FutureExt;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Talks JSON over HTTP to the translation service.
#[derive(Clone)]
pub struct HttpTranslationService {
    client: Client,
    base: ApiBaseUrl,
}

impl HttpTranslationService {
    pub fn new(config: &AppConfig) -> Result<Self, TranslateError> {
        let client = Client::builder()
            .timeout(config.request_timeout.duration())
            .build()
            .map_err(TranslateError::Network)?;
        Ok(Self::with_client(client, config.api_base.clone()))
    }

    pub fn with_client(client: Client, base: ApiBaseUrl) -> Self {
        Self { client, base }
    }
}

/// Error body shape. `detail` is a string for application errors but a list
/// of objects for request validation failures, so it is read loosely.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

fn map_send_error(e: reqwest::Error) -> TranslateError {
    if e.is_timeout() {
        TranslateError::Timeout
    } else {
        TranslateError::Network(e)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, TranslateError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.detail)
            .and_then(|d| match d {
                serde_json::Value::String(s) => Some(s),
                _ => None,
            });
        tracing::warn!(status = status.as_u16(), detail = ?detail, "service returned an error");
        return Err(TranslateError::Api {
            status: status.as_u16(),
            detail,
        });
    }

    let bytes = response.bytes().await.map_err(map_send_error)?;
    serde_json::from_slice(&bytes)
        .map_err(|e| TranslateError::InvalidResponse(format!("failed to parse JSON: {e}")))
}

impl TranslationService for HttpTranslationService {
    fn translate(
        &self,
        request: TranslationRequest,
    ) -> BoxFuture<'_, Result<TranslationResponse, TranslateError>> {
        async move {
            let url = self.base.endpoint("translate");
            tracing::debug!(
                %url,
                from = %request.input_language,
                to = %request.output_language,
                chars = request.text.chars().count(),
                "sending translation request"
            );

            let response = self
                .client
                .post(&url)
                .json(&request)
                .send()
                .await
                .map_err(map_send_error)?;

            decode(response).await
        }
        .boxed()
    }

    fn self_test(&self) -> BoxFuture<'_, Result<DiagnosticSample, TranslateError>> {
        async move {
            let url = self.base.endpoint("test");
            tracing::debug!(%url, "running service self-test");

            let response = self.client.get(&url).send().await.map_err(map_send_error)?;
            decode(response).await
        }
        .boxed()
    }

    fn status(&self) -> BoxFuture<'_, Result<ServiceStatus, TranslateError>> {
        async move {
            let url = self.base.endpoint("");
            tracing::debug!(%url, "pinging service");

            let response = self.client.get(&url).send().await.map_err(map_send_error)?;
            decode(response).await
        }
        .boxed()
    }
}
