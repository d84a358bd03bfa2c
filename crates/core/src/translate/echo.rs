use crate::language::Language;
use crate::translate::{
    DiagnosticSample, ServiceStatus, TranslateError, TranslationRequest, TranslationResponse,
    TranslationService,
};
use futures::future::BoxFuture;
use futures::FutureExt;

pub const SAMPLE_INPUT: &str = "I like programming.";
pub const SAMPLE_OUTPUT: &str = "Saya suka pengaturcaraan.";

/// In-process stand-in for the remote service, used by `--offline`.
/// "Translates" by tagging the text with the target language.
#[derive(Clone, Debug, Default)]
pub struct EchoTranslationService;

impl EchoTranslationService {
    pub fn new() -> Self {
        Self
    }
}

impl TranslationService for EchoTranslationService {
    fn translate(
        &self,
        request: TranslationRequest,
    ) -> BoxFuture<'_, Result<TranslationResponse, TranslateError>> {
        async move {
            if request.text.trim().is_empty() {
                return Err(TranslateError::Api {
                    status: 400,
                    detail: Some("Text cannot be empty".to_owned()),
                });
            }
            Ok(TranslationResponse {
                translated_text: format!("[{}] {}", request.output_language, request.text.trim()),
                original_text: Some(request.text),
                input_language: Some(request.input_language.to_string()),
                output_language: Some(request.output_language.to_string()),
            })
        }
        .boxed()
    }

    fn self_test(&self) -> BoxFuture<'_, Result<DiagnosticSample, TranslateError>> {
        async {
            Ok(DiagnosticSample {
                test_input: SAMPLE_INPUT.to_owned(),
                test_output: SAMPLE_OUTPUT.to_owned(),
                status: Some("success".to_owned()),
            })
        }
        .boxed()
    }

    fn status(&self) -> BoxFuture<'_, Result<ServiceStatus, TranslateError>> {
        async {
            Ok(ServiceStatus {
                message: format!(
                    "Offline echo service ({} to {} sample)",
                    Language::DEFAULT_SOURCE,
                    Language::DEFAULT_TARGET
                ),
                docs: None,
            })
        }
        .boxed()
    }
}
