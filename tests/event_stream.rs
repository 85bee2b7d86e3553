//! BDD-style tests for the SSE event stream.

mod common;

use common::{client, RecordingTransport};
use futures::StreamExt;
use opencode_sdk::{Error, Event};

fn sse(data: &str) -> String {
    format!("data: {}\n\n", data)
}

/// Given an SSE body split across chunks, with an empty event and an unknown type,
/// When event_stream is consumed,
/// Then empty events are skipped and every other event is decoded.
#[tokio::test]
async fn decodes_events_and_skips_empty_data() {
    let transport = RecordingTransport::new();
    let first = sse(r#"{"type":"session.idle","properties":{"sessionID":"ses_1"}}"#);
    let (head, tail) = first.split_at(20);
    let empty = "data:\n\n".to_string();
    let unknown = sse(r#"{"type":"lsp.updated","properties":{}}"#);
    transport.stream(&[head, tail, empty.as_str(), unknown.as_str()]);

    let events: Vec<_> = client(&transport)
        .event_stream(None)
        .await
        .unwrap()
        .collect()
        .await;
    assert_eq!(events.len(), 2);
    let first = events[0].as_ref().unwrap();
    assert_eq!(first.tag(), Some("session.idle"));
    assert!(matches!(first.variant(), Event::SessionIdle(_)));
    assert!(events[1].as_ref().unwrap().is_unknown());

    let call = &transport.calls()[0];
    assert_eq!(call.path, "/event");
}

/// Given a malformed event between two good ones,
/// When event_stream is consumed,
/// Then the malformed one is an error item and the stream continues.
#[tokio::test]
async fn malformed_event_does_not_end_stream() {
    let transport = RecordingTransport::new();
    let good = sse(r#"{"type":"file.edited","properties":{"file":"a.rs"}}"#);
    let bad = sse(r#"{"type":"file.edited"}"#);
    transport.stream(&[good.as_str(), bad.as_str(), good.as_str()]);

    let events: Vec<_> = client(&transport)
        .event_stream(None)
        .await
        .unwrap()
        .collect()
        .await;
    assert_eq!(events.len(), 3);
    assert!(events[0].is_ok());
    assert!(matches!(
        events[1],
        Err(Error::MissingRequiredField { union: "Event", .. })
    ));
    assert!(events[2].is_ok());
}

/// Given text deltas for two sessions followed by session.idle,
/// When stream_session_text is called for one session,
/// Then only its deltas are forwarded and the call returns at completion.
#[tokio::test]
async fn stream_session_text_until_idle() {
    let transport = RecordingTransport::new();
    let delta = |session: &str, text: &str| {
        sse(&format!(
            r#"{{"type":"message.part.updated","properties":{{"part":{{"type":"text","text":"{text}","sessionID":"{session}"}},"delta":"{text}"}}}}"#
        ))
    };
    let a = delta("ses_1", "Hel");
    let b = delta("ses_2", "other");
    let c = delta("ses_1", "lo");
    let idle = sse(r#"{"type":"session.idle","properties":{"sessionID":"ses_1"}}"#);
    let after = delta("ses_1", "late");
    transport.stream(&[
        a.as_str(),
        b.as_str(),
        "data: not json\n\n",
        c.as_str(),
        idle.as_str(),
        after.as_str(),
    ]);

    let mut out = String::new();
    client(&transport)
        .stream_session_text(None, "ses_1", |t| out.push_str(t))
        .await
        .unwrap();
    assert_eq!(out, "Hello");
}

#[tokio::test]
async fn stream_session_text_requires_session_id() {
    let transport = RecordingTransport::new();
    let err = client(&transport)
        .stream_session_text(None, "", |_| {})
        .await
        .unwrap_err();
    assert!(matches!(err, Error::MissingRequiredParameter("id")));
    assert!(transport.calls().is_empty());
}
