//! HTTP source tests: a local listener plays the upstream posts API.
//!
//! Each accepted connection gets the next canned response, then closes.

use caseflow_core::{engine::CaseDesk, source::HttpCaseSource};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

const POSTS: &str = r#"[
    {"userId": 1, "id": 7, "title": "qui est esse", "body": "est rerum tempore"},
    {"userId": 2, "id": 10, "title": "optio molestias", "body": "quo et expedita"}
]"#;

fn http_response(status_line: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {status_line}\r\n\
         Content-Type: application/json\r\n\
         Content-Length: {}\r\n\
         Connection: close\r\n\
         \r\n\
         {body}",
        body.len()
    )
}

/// Serve `responses` in order, one per connection. Returns the posts URL.
async fn serve(responses: Vec<String>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        for response in responses {
            let (mut socket, _) = listener.accept().await.expect("accept");
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            loop {
                let n = socket.read(&mut buf).await.expect("read request");
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                if request.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            socket
                .write_all(response.as_bytes())
                .await
                .expect("write response");
            let _ = socket.shutdown().await;
        }
    });

    format!("http://{addr}/posts")
}

fn desk_for(endpoint: String) -> CaseDesk {
    let _ = env_logger::builder().is_test(true).try_init();
    let client = reqwest::Client::builder()
        .no_proxy()
        .build()
        .expect("http client");
    CaseDesk::new(Box::new(HttpCaseSource::with_client(client, endpoint)))
}

#[tokio::test]
async fn http_load_lifecycle_covers_status_success_and_decode_failure() {
    let endpoint = serve(vec![
        http_response("404 Not Found", "{}"),
        http_response("200 OK", POSTS),
        http_response("200 OK", r#"[{"userId": 1, "id": "seven"}]"#),
    ])
    .await;
    let mut desk = desk_for(endpoint);

    // Non-success status surfaces as "HTTP {code}".
    desk.reload().await.unwrap();
    let state = desk.state();
    assert_eq!(state.error.as_deref(), Some("HTTP 404"));
    assert!(!state.is_loading);
    assert!(state.items.is_empty());
    assert_eq!(state.selected_case_id, None);

    // Success replaces the list and selects the first case.
    desk.reload().await.unwrap();
    let state = desk.state();
    assert_eq!(state.error, None);
    let ids: Vec<u64> = state.items.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![7, 10]);
    assert_eq!(state.selected_case_id, Some(7));
    assert_eq!(state.items[1].subject_name, "Northstar Trading");

    // A malformed batch fails as a whole and keeps the previous list.
    desk.reload().await.unwrap();
    let state = desk.state();
    let error = state.error.as_deref().unwrap_or_default();
    assert!(error.starts_with("Decode error"), "unexpected error: {error}");
    assert!(!state.is_loading);
    assert_eq!(state.items.len(), 2);
    assert_eq!(state.selected_case_id, Some(7));
}

#[tokio::test]
async fn unreachable_endpoint_is_a_load_failure() {
    // Bind then drop, so nothing listens on the port.
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let mut desk = desk_for(format!("http://{addr}/posts"));
    desk.reload().await.unwrap();

    let state = desk.state();
    let error = state.error.as_deref().unwrap_or_default();
    assert!(error.starts_with("Transport error"), "unexpected error: {error}");
    assert!(!state.is_loading);
}
