//! Tests for the fetch wrapper

use super::*;
use crate::surface::{MemorySurface, NodeSpec};
use crate::test_utils::test_helpers::*;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

/// Helper to run async tests with a tokio runtime
fn run_async<F: std::future::Future>(f: F) -> F::Output {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("Failed to create tokio runtime");
    rt.block_on(f)
}

/// Serve a single canned HTTP response on a local port.
///
/// Returns the URL to request and a handle yielding the raw request text.
fn serve_once(status_line: &str, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind local port");
    let url = format!("http://{}/api/pedidos", listener.local_addr().unwrap());
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status_line,
        body.len(),
        body
    );

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept connection");
        let request = read_request(&mut stream);
        stream.write_all(response.as_bytes()).expect("write response");
        request
    });
    (url, handle)
}

fn read_request(stream: &mut std::net::TcpStream) -> String {
    let mut raw = Vec::new();
    let mut buf = [0u8; 1024];
    loop {
        let n = stream.read(&mut buf).expect("read request");
        if n == 0 {
            break;
        }
        raw.extend_from_slice(&buf[..n]);

        let text = String::from_utf8_lossy(&raw);
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .filter_map(|line| line.split_once(':'))
                .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
                .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if raw.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&raw).into_owned()
}

/// Flash page that also carries a CSRF meta tag
fn page_with_csrf(token: &str) -> MemorySurface {
    MemorySurface::from_nodes(&[
        NodeSpec::new("meta")
            .with_attr("name", "csrf-token")
            .with_attr("content", token),
        NodeSpec::new("main")
            .with_class("container")
            .with_child(NodeSpec::new("div").with_id("flash-container")),
    ])
}

fn client() -> FetchClient {
    FetchClient::new(&FetchConfig::default()).expect("build client")
}

/// Texts of the banners on the page, newest first
fn banner_texts(manager: &TestManager) -> Vec<String> {
    manager
        .visible()
        .into_iter()
        .map(|alert| manager.surface().text(alert).to_string())
        .collect()
}

#[test]
fn test_error_message_prefers_json_message() {
    let msg = error_message(StatusCode::NOT_FOUND, r#"{"message": "Producto no encontrado"}"#);
    assert_eq!(msg, "Producto no encontrado");
}

#[test]
fn test_error_message_json_without_message_uses_status_code() {
    let msg = error_message(StatusCode::BAD_REQUEST, r#"{"error": "campo requerido"}"#);
    assert_eq!(msg, "Error HTTP: 400");
}

#[test]
fn test_error_message_empty_json_message_uses_status_code() {
    let msg = error_message(StatusCode::CONFLICT, r#"{"message": ""}"#);
    assert_eq!(msg, "Error HTTP: 409");
}

#[test]
fn test_error_message_non_json_uses_reason() {
    let msg = error_message(StatusCode::INTERNAL_SERVER_ERROR, "<h1>Oops</h1>");
    assert_eq!(msg, "Internal Server Error");
}

#[test]
fn test_error_message_unknown_status_without_reason() {
    let status = StatusCode::from_u16(599).unwrap();
    assert_eq!(error_message(status, "not json"), "Error HTTP: 599");
}

#[test]
fn test_build_headers_defaults() {
    let headers = build_headers(None, &[]).unwrap();

    assert_eq!(headers.get(ACCEPT).unwrap(), "application/json");
    assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
    assert!(headers.get(CSRF_HEADER).is_none());
}

#[test]
fn test_build_headers_includes_csrf_token() {
    let headers = build_headers(Some("tok123"), &[]).unwrap();
    assert_eq!(headers.get("X-CSRFToken").unwrap(), "tok123");
}

#[test]
fn test_build_headers_caller_overrides_defaults() {
    let extra = vec![
        ("Content-Type".to_string(), "text/plain".to_string()),
        ("X-Requested-With".to_string(), "fetch".to_string()),
    ];

    let headers = build_headers(Some("tok123"), &extra).unwrap();

    assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "text/plain");
    assert_eq!(headers.get_all(CONTENT_TYPE).iter().count(), 1);
    assert_eq!(headers.get("x-requested-with").unwrap(), "fetch");
    assert_eq!(headers.get(ACCEPT).unwrap(), "application/json");
}

#[test]
fn test_build_headers_rejects_invalid_name() {
    let extra = vec![("bad header".to_string(), "x".to_string())];
    let result = build_headers(None, &extra);
    assert!(matches!(result, Err(FlashError::Header(_))));
}

#[test]
fn test_csrf_token_read_from_meta() {
    let surface = page_with_csrf("tok123");
    assert_eq!(client().csrf_token(&surface), Some("tok123"));
}

#[test]
fn test_csrf_token_missing_meta() {
    assert_eq!(client().csrf_token(&flash_page()), None);
}

#[test]
fn test_csrf_token_uses_configured_meta_name() {
    let surface = MemorySurface::from_nodes(&[NodeSpec::new("meta")
        .with_attr("name", "_token")
        .with_attr("content", "abc")]);
    let config = FetchConfig {
        csrf_meta_name: "_token".to_string(),
        ..FetchConfig::default()
    };
    let client = FetchClient::new(&config).unwrap();

    assert_eq!(client.csrf_token(&surface), Some("abc"));
}

#[test]
fn test_fetch_success_returns_json_without_banner() {
    let (url, server) = serve_once("200 OK", r#"{"pedidos": [1, 2]}"#);
    let mut manager = manager(page_with_csrf("tok123"));

    let result = run_async(client().fetch_json(&url, &FetchOptions::default(), &mut manager));

    assert_eq!(result.unwrap(), serde_json::json!({"pedidos": [1, 2]}));
    assert!(manager.visible().is_empty());

    let request = server.join().unwrap().to_ascii_lowercase();
    assert!(request.starts_with("get /api/pedidos"));
    assert!(request.contains("x-csrftoken: tok123"));
    assert!(request.contains("accept: application/json"));
}

#[test]
fn test_fetch_post_sends_json_body() {
    let (url, server) = serve_once("201 Created", r#"{"id": 7}"#);
    let mut manager = manager(flash_page());
    let options = FetchOptions::post(serde_json::json!({"producto": "pollo asado"}));

    let result = run_async(client().fetch_json(&url, &options, &mut manager));

    assert_eq!(result.unwrap()["id"], 7);
    let request = server.join().unwrap();
    assert!(request.starts_with("POST /api/pedidos"));
    assert!(request.ends_with(r#"{"producto":"pollo asado"}"#));
    assert!(!request.to_ascii_lowercase().contains("x-csrftoken"));
}

#[test]
fn test_fetch_http_error_shows_server_message() {
    let (url, server) = serve_once("404 Not Found", r#"{"message": "Producto no encontrado"}"#);
    let mut manager = manager(flash_page());

    let result = run_async(client().fetch_json(&url, &FetchOptions::default(), &mut manager));
    server.join().unwrap();

    match result {
        Err(FlashError::Http { status, message }) => {
            assert_eq!(status, 404);
            assert_eq!(message, "Producto no encontrado");
        }
        other => panic!("expected HTTP error, got {:?}", other),
    }
    assert_eq!(banner_texts(&manager), vec!["Error: Producto no encontrado"]);
}

#[test]
fn test_fetch_http_error_banner_is_persistent() {
    let (url, server) = serve_once("500 Internal Server Error", "<h1>Oops</h1>");
    let mut manager = manager(flash_page());

    let _ = run_async(client().fetch_json(&url, &FetchOptions::default(), &mut manager));
    server.join().unwrap();

    assert_eq!(banner_texts(&manager), vec!["Error: Internal Server Error"]);
    advance(&mut manager, TIMEOUT * 3);
    assert_eq!(manager.visible().len(), 1);
}

#[test]
fn test_fetch_invalid_json_reports_parse_error() {
    let (url, server) = serve_once("200 OK", "not json");
    let mut manager = manager(flash_page());

    let result = run_async(client().fetch_json(&url, &FetchOptions::default(), &mut manager));
    server.join().unwrap();

    assert!(matches!(result, Err(FlashError::Parse(_))));
    let texts = banner_texts(&manager);
    assert_eq!(texts.len(), 1);
    assert!(texts[0].starts_with("Error: "));
}

#[test]
fn test_fetch_connection_refused_reports_network_error() {
    // Bind then drop to get a port nothing listens on
    let port = TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let url = format!("http://127.0.0.1:{}/api", port);
    let mut manager = manager(flash_page());

    let result = run_async(client().fetch_json(&url, &FetchOptions::default(), &mut manager));

    assert!(matches!(result, Err(FlashError::Network(_))));
    assert_eq!(manager.visible().len(), 1);
}

#[test]
fn test_fetch_without_container_still_returns_error() {
    let mut manager = manager(bare_page());

    let result = run_async(client().fetch_json(
        "http://127.0.0.1:1/api",
        &FetchOptions::default(),
        &mut manager,
    ));

    assert!(result.is_err());
    assert!(manager.visible().is_empty());
}

#[test]
fn test_pre_cancelled_fetch_shows_no_banner() {
    let token = CancellationToken::new();
    token.cancel();
    let mut manager = manager(flash_page());

    let result = run_async(client().fetch_json_with_cancel(
        "http://127.0.0.1:1/api",
        &FetchOptions::default(),
        &mut manager,
        &token,
    ));

    assert!(matches!(result, Err(FlashError::Cancelled)));
    assert!(manager.visible().is_empty());
}
