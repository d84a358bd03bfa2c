use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use translator_ui_core::clipboard::MemoryClipboard;
use translator_ui_core::config::{ApiBaseUrl, AppConfig, RequestTimeout};
use translator_ui_core::language::Language;
use translator_ui_core::translate::{
    HttpTranslationService, TranslateError, TranslationRequest, TranslationService,
};
use translator_ui_core::ui::{TranslatorApp, UiError};

async fn serve(router: Router) -> ApiBaseUrl {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("test server");
    });
    ApiBaseUrl::new(format!("http://{addr}")).expect("valid base url")
}

fn service(base: ApiBaseUrl) -> HttpTranslationService {
    HttpTranslationService::new(&AppConfig {
        api_base: base,
        request_timeout: RequestTimeout::new(5_000).expect("nonzero"),
    })
    .expect("http client")
}

async fn translate_handler(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let text = body["text"].as_str().unwrap_or_default().to_owned();
    let from = body["input_language"].as_str().unwrap_or_default().to_owned();
    let to = body["output_language"].as_str().unwrap_or_default().to_owned();
    if text.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "detail": "Text cannot be empty" })),
        );
    }
    let translated = match (text.as_str(), to.as_str()) {
        ("Hello", "Malay") => "Helo".to_owned(),
        _ => format!("{text} in {to}"),
    };
    (
        StatusCode::OK,
        Json(json!({
            "original_text": text,
            "translated_text": translated,
            "input_language": from,
            "output_language": to,
        })),
    )
}

fn happy_router() -> Router {
    Router::new()
        .route(
            "/",
            get(|| async {
                Json(json!({ "message": "Translation API is running", "docs": "/docs" }))
            }),
        )
        .route("/translate", post(translate_handler))
        .route(
            "/test",
            get(|| async {
                Json(json!({
                    "test_input": "I like programming.",
                    "test_output": "Saya suka pengaturcaraan.",
                    "status": "success",
                }))
            }),
        )
}

fn failing_router() -> Router {
    Router::new()
        .route(
            "/translate",
            post(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "detail": "quota exceeded" })),
                )
            }),
        )
        .route(
            "/test",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "upstream down") }),
        )
}

#[tokio::test]
async fn translate_posts_wire_body_and_reads_response() {
    let svc = service(serve(happy_router()).await);
    let resp = svc
        .translate(TranslationRequest {
            text: "Hello".into(),
            input_language: Language::English,
            output_language: Language::Malay,
        })
        .await
        .expect("translation");

    assert_eq!(resp.translated_text, "Helo");
    assert_eq!(resp.original_text.as_deref(), Some("Hello"));
    assert_eq!(resp.input_language.as_deref(), Some("English"));
    assert_eq!(resp.output_language.as_deref(), Some("Malay"));
}

#[tokio::test]
async fn error_detail_is_extracted() {
    let svc = service(serve(failing_router()).await);
    let err = svc
        .translate(TranslationRequest {
            text: "Hello".into(),
            input_language: Language::English,
            output_language: Language::Malay,
        })
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert_eq!(err.detail(), Some("quota exceeded"));
}

#[tokio::test]
async fn non_json_error_body_has_no_detail() {
    let svc = service(serve(failing_router()).await);
    let err = svc.self_test().await.unwrap_err();
    assert!(matches!(err, TranslateError::Api { status: 500, detail: None }));
}

#[tokio::test]
async fn structured_detail_is_not_shown() {
    let router = Router::new().route(
        "/translate",
        post(|| async {
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "detail": [{ "loc": ["body", "text"], "msg": "field required" }] })),
            )
        }),
    );
    let svc = service(serve(router).await);
    let err = svc
        .translate(TranslationRequest {
            text: "Hello".into(),
            input_language: Language::English,
            output_language: Language::Malay,
        })
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(422));
    assert_eq!(err.detail(), None);
}

#[tokio::test]
async fn malformed_success_body_is_invalid_response() {
    let router = Router::new().route(
        "/test",
        get(|| async { Json(json!({ "unexpected": true })) }),
    );
    let svc = service(serve(router).await);
    let err = svc.self_test().await.unwrap_err();
    assert!(matches!(err, TranslateError::InvalidResponse(_)));
}

#[tokio::test]
async fn self_test_and_status_decode() {
    let svc = service(serve(happy_router()).await);

    let sample = svc.self_test().await.expect("self-test");
    assert_eq!(sample.test_input, "I like programming.");
    assert_eq!(sample.status.as_deref(), Some("success"));

    let status = svc.status().await.expect("status");
    assert_eq!(status.message, "Translation API is running");
    assert_eq!(status.docs.as_deref(), Some("/docs"));
}

#[tokio::test]
async fn unreachable_service_is_a_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let svc = service(ApiBaseUrl::new(format!("http://{addr}")).expect("url"));
    let err = svc.status().await.unwrap_err();
    assert!(matches!(err, TranslateError::Network(_)));
}

#[tokio::test]
async fn app_round_trip_over_http() {
    let svc = service(serve(happy_router()).await);
    let mut app = TranslatorApp::new(svc, MemoryClipboard::new());

    app.set_input_text("Hello");
    app.submit().await.expect("translate");
    assert_eq!(app.state().output_text(), "Helo");

    app.set_source_language(Language::Spanish);
    app.run_self_test().await.expect("self-test");
    assert_eq!(app.state().source_language(), Language::English);
    assert_eq!(app.state().output_text(), "Saya suka pengaturcaraan.");
}

#[tokio::test]
async fn app_surfaces_http_failure() {
    let svc = service(serve(failing_router()).await);
    let mut app = TranslatorApp::new(svc, MemoryClipboard::new());

    app.set_input_text("Hello");
    let err = app.submit().await.unwrap_err();
    assert_eq!(err, UiError::Request("quota exceeded".into()));
    assert_eq!(app.state().output_text(), "");

    let err = app.run_self_test().await.unwrap_err();
    assert_eq!(
        err,
        UiError::Request("Test failed. Make sure the API is running.".into())
    );
}
