//! Client over the real reqwest transport, against a wiremock server.

use futures::StreamExt;
use opencode_sdk::session::Message;
use opencode_sdk::{Client, Error, Event};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Given a server answering /global/health,
/// When health is called,
/// Then the version is returned.
#[tokio::test]
async fn health_hits_global_health() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/global/health"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"version":"0.5.1"}"#))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new(format!("{}/", server.uri()));
    let health = client.health().await.unwrap();
    assert_eq!(health.version, "0.5.1");
}

/// Given a server returning 500,
/// When an operation is called,
/// Then it fails with Error::Status carrying the body.
#[tokio::test]
async fn non_success_status_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/session/ses_1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = Client::new(server.uri())
        .session_delete("ses_1", None)
        .await
        .unwrap_err();
    match err {
        Error::Status { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("expected Status, got {:?}", other),
    }
}

/// Given a directory and a wrapped message list,
/// When session_messages is called,
/// Then the directory query is sent and messages are decoded.
#[tokio::test]
async fn messages_send_directory_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/session/ses_1/message"))
        .and(query_param("directory", "/work"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"messages":[{"id":"msg_1","role":"user","sessionID":"ses_1","time":{"created":1},"parts":[{"type":"text","text":"hi"}]}]}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let dir = std::path::PathBuf::from("/work");
    let messages = Client::new(server.uri())
        .session_messages("ses_1", Some(&dir))
        .await
        .unwrap();
    assert_eq!(messages.len(), 1);
    assert!(matches!(messages[0].variant(), Message::User(_)));
}

/// Given an SSE endpoint,
/// When event_stream is opened,
/// Then Accept: text/event-stream is sent and events are decoded.
#[tokio::test]
async fn event_stream_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/event"))
        .and(header("accept", "text/event-stream"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/event-stream")
                .set_body_string(
                    "data: {\"type\":\"installation.updated\",\"properties\":{\"version\":\"0.6.0\"}}\n\n",
                ),
        )
        .mount(&server)
        .await;

    let mut stream = Client::new(server.uri()).event_stream(None).await.unwrap();
    let event = stream.next().await.unwrap().unwrap();
    match event.variant() {
        Event::InstallationUpdated(ev) => assert_eq!(ev.properties.version, "0.6.0"),
        other => panic!("expected installation.updated, got {:?}", other),
    }
    assert!(stream.next().await.is_none());
}
