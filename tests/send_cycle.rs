//! End-to-end tests for the send cycle.
//!
//! These tests drive `ChatSession::send` against a canned HTTP/1.1 listener
//! so they run without a live service.

use std::net::SocketAddr;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

use banter::chat::{ChatConfig, ChatSession, Renderer, TurnOutcome};
use banter::{ChatClient, MessageRole, SuggestedAction};

/// Renderer that records every call for assertions.
#[derive(Default)]
struct RecordingRenderer {
    messages: Vec<(MessageRole, String)>,
    notices: Vec<String>,
    action_labels: Vec<Vec<String>>,
    errors: Vec<String>,
    infos: Vec<String>,
}

impl Renderer for RecordingRenderer {
    fn message(&mut self, role: MessageRole, text: &str) {
        self.messages.push((role, text.to_string()));
    }
    fn notice(&mut self, text: &str) {
        self.notices.push(text.to_string());
    }
    fn actions(&mut self, actions: &[SuggestedAction]) {
        self.action_labels
            .push(actions.iter().map(|a| a.text_label().to_string()).collect());
    }
    fn error(&mut self, text: &str) {
        self.errors.push(text.to_string());
    }
    fn info(&mut self, text: &str) {
        self.infos.push(text.to_string());
    }
}

fn http_response(status: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    )
}

fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// Reads one HTTP request off the socket and returns its body.
async fn read_request(socket: &mut TcpStream) -> String {
    let mut data = Vec::new();
    let mut buf = [0u8; 4096];
    let header_end = loop {
        if let Some(pos) = find_subsequence(&data, b"\r\n\r\n") {
            break pos;
        }
        let n = socket.read(&mut buf).await.unwrap();
        assert!(n > 0, "connection closed mid-request");
        data.extend_from_slice(&buf[..n]);
    };

    let headers = String::from_utf8_lossy(&data[..header_end]).to_string();
    let content_length = headers
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.eq_ignore_ascii_case("content-length") {
                value.trim().parse::<usize>().ok()
            } else {
                None
            }
        })
        .unwrap_or(0);

    let body_start = header_end + 4;
    while data.len() < body_start + content_length {
        let n = socket.read(&mut buf).await.unwrap();
        assert!(n > 0, "connection closed mid-body");
        data.extend_from_slice(&buf[..n]);
    }
    String::from_utf8_lossy(&data[body_start..body_start + content_length]).to_string()
}

/// Serves the given responses, one connection each, and returns the
/// captured request bodies.
async fn spawn_server(responses: Vec<String>) -> (SocketAddr, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let mut bodies = Vec::new();
        for response in responses {
            let (mut socket, _) = listener.accept().await.unwrap();
            bodies.push(read_request(&mut socket).await);
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        }
        bodies
    });
    (addr, handle)
}

fn session_for(addr: SocketAddr) -> ChatSession {
    let base = format!("http://{addr}/api/v1/");
    let client = ChatClient::with_options(Some(base), None).unwrap();
    ChatSession::new(client, ChatConfig::default())
}

#[tokio::test]
async fn success_renders_reply_and_presents_actions() {
    let response = http_response(
        "200 OK",
        r#"{
            "reply": { "text": "Hello!" },
            "suggested_actions": [
                { "type": "quick_reply", "text_label": "Learn more", "payload": "more" }
            ]
        }"#,
    );
    let (addr, handle) = spawn_server(vec![response]).await;
    let mut session = session_for(addr);
    let mut renderer = RecordingRenderer::default();

    let outcome = session.send("hi", &mut renderer).await;
    assert_eq!(outcome, TurnOutcome::Replied);

    // Transcript: the user's message, then the reply.
    assert_eq!(
        renderer.messages,
        vec![
            (MessageRole::User, "hi".to_string()),
            (MessageRole::Assistant, "Hello!".to_string()),
        ]
    );
    assert_eq!(renderer.action_labels, vec![vec!["Learn more".to_string()]]);
    assert!(renderer.errors.is_empty());

    // Exactly one request went out, carrying the message and the history
    // window that already includes it.
    let bodies = handle.await.unwrap();
    assert_eq!(bodies.len(), 1);
    let request: serde_json::Value = serde_json::from_str(&bodies[0]).unwrap();
    assert_eq!(request["message"]["text"], "hi");
    assert_eq!(request["user_id"], "1");
    assert!(
        request["session_id"]
            .as_str()
            .unwrap()
            .starts_with("session_")
    );
    let history = request["conversation_history"].as_array().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["role"], "user");
    assert_eq!(history[0]["content"], "hi");
    assert_eq!(request["user_profile"], serde_json::json!({}));

    // No updated history from the server: the optimistic append stands.
    assert_eq!(session.context().history().len(), 1);
    assert_eq!(session.context().history()[0].content, "hi");
}

#[tokio::test]
async fn quick_reply_activation_sends_the_payload() {
    let first = http_response(
        "200 OK",
        r#"{
            "reply": { "text": "Hello!" },
            "suggested_actions": [
                { "type": "quick_reply", "text_label": "Learn more", "payload": "Tell me more" }
            ]
        }"#,
    );
    let second = http_response("200 OK", r#"{ "reply": { "text": "Gladly." } }"#);
    let (addr, handle) = spawn_server(vec![first, second]).await;
    let mut session = session_for(addr);
    let mut renderer = RecordingRenderer::default();

    session.send("hi", &mut renderer).await;
    let outcome = session.activate(1, &mut renderer).await;
    assert_eq!(outcome, TurnOutcome::Replied);

    let bodies = handle.await.unwrap();
    let request: serde_json::Value = serde_json::from_str(&bodies[1]).unwrap();
    // The payload goes out exactly as if the user typed it.
    assert_eq!(request["message"]["text"], "Tell me more");
    let history = request["conversation_history"].as_array().unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[1]["content"], "Tell me more");

    // The activation was echoed into the transcript like a typed message.
    assert_eq!(
        renderer.messages[2],
        (MessageRole::User, "Tell me more".to_string())
    );

    // The second response presented no actions, so the tray is empty.
    assert!(session.actions().is_empty());
}

#[tokio::test]
async fn server_history_replaces_local_history() {
    let response = http_response(
        "200 OK",
        r#"{
            "reply": { "text": "Hello!" },
            "suggested_actions": [],
            "updated_conversation_history": [
                { "role": "user", "content": "hi", "timestamp": "2024-05-01T12:30:45Z" },
                { "role": "system", "content": "profile attached", "timestamp": "2024-05-01T12:30:45Z" },
                { "role": "assistant", "content": "Hello!", "timestamp": "2024-05-01T12:30:46Z" }
            ]
        }"#,
    );
    let (addr, handle) = spawn_server(vec![response]).await;
    let mut session = session_for(addr);
    let mut renderer = RecordingRenderer::default();

    session.send("hi", &mut renderer).await;
    handle.await.unwrap();

    // The server's sequence lands verbatim; no merge with the local copy.
    let history = session.context().history();
    assert_eq!(history.len(), 3);
    assert_eq!(history[0].role, MessageRole::User);
    assert_eq!(history[1].role, MessageRole::System);
    assert_eq!(history[1].content, "profile attached");
    assert_eq!(history[2].role, MessageRole::Assistant);
}

#[tokio::test]
async fn rejection_detail_is_surfaced_and_history_kept() {
    let response = http_response("500 Internal Server Error", r#"{"detail":"rate limited"}"#);
    let (addr, handle) = spawn_server(vec![response]).await;
    let mut session = session_for(addr);
    let mut renderer = RecordingRenderer::default();

    let outcome = session.send("hi", &mut renderer).await;
    assert_eq!(outcome, TurnOutcome::Failed);
    handle.await.unwrap();

    assert_eq!(renderer.errors, vec!["Error: rate limited".to_string()]);
    // Only the user's optimistic append; no assistant entry.
    let history = session.context().history();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].role, MessageRole::User);
}

#[tokio::test]
async fn rejection_without_detail_uses_fallback() {
    let response = http_response("503 Service Unavailable", "backend going away");
    let (addr, handle) = spawn_server(vec![response]).await;
    let mut session = session_for(addr);
    let mut renderer = RecordingRenderer::default();

    let outcome = session.send("hi", &mut renderer).await;
    assert_eq!(outcome, TurnOutcome::Failed);
    handle.await.unwrap();

    assert_eq!(
        renderer.errors,
        vec!["Error: Could not reach server.".to_string()]
    );
}

#[tokio::test]
async fn connection_failure_renders_generic_message() {
    // Bind to grab a free port, then drop the listener so connects fail.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut session = session_for(addr);
    let mut renderer = RecordingRenderer::default();

    let outcome = session.send("hi", &mut renderer).await;
    assert_eq!(outcome, TurnOutcome::Failed);

    assert_eq!(
        renderer.errors,
        vec!["Error: Could not connect to the assistant.".to_string()]
    );
    assert_eq!(session.context().history().len(), 1);
}

#[tokio::test]
async fn malformed_success_body_is_a_failure_not_a_crash() {
    let response = http_response("200 OK", r#"{ "suggested_actions": [] }"#);
    let (addr, handle) = spawn_server(vec![response]).await;
    let mut session = session_for(addr);
    let mut renderer = RecordingRenderer::default();

    let outcome = session.send("hi", &mut renderer).await;
    assert_eq!(outcome, TurnOutcome::Failed);
    handle.await.unwrap();

    assert_eq!(renderer.errors.len(), 1);
    assert_eq!(session.context().history().len(), 1);
}
