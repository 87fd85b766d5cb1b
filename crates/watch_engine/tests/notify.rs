use pretty_assertions::assert_eq;
use serde_json::json;
use watch_engine::{NotifyError, NotifySettings, Notifier, TelegramNotifier};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn notifier_for(server: &MockServer) -> TelegramNotifier {
    let settings = NotifySettings {
        api_base: format!("{}/", server.uri()),
        ..NotifySettings::default()
    };
    TelegramNotifier::new(settings, "bot-token").unwrap()
}

#[tokio::test]
async fn send_posts_chat_id_and_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/botbot-token/sendMessage"))
        .and(body_json(json!({"chat_id": "12345", "text": "hello"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true, "result": {}})))
        .expect(1)
        .mount(&server)
        .await;

    notifier_for(&server)
        .send("12345", "hello")
        .await
        .expect("delivered");
}

#[tokio::test]
async fn api_error_status_carries_description() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "ok": false,
            "error_code": 400,
            "description": "Bad Request: chat not found"
        })))
        .mount(&server)
        .await;

    let err = notifier_for(&server).send("0", "hello").await.unwrap_err();
    assert_eq!(
        err,
        NotifyError::HttpStatus {
            status: 400,
            description: "Bad Request: chat not found".to_string(),
        }
    );
}

#[tokio::test]
async fn not_ok_reply_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": false})))
        .mount(&server)
        .await;

    let err = notifier_for(&server).send("1", "hello").await.unwrap_err();
    assert!(matches!(err, NotifyError::Rejected { .. }));
}
