use compete_insight::adapters::ai::GeminiAdapter;
use compete_insight::domain::DomainError;
use compete_insight::ports::AiPort;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

const REPORT_JSON: &str = r#"{
    "executiveSummary": "summary",
    "marketLandscape": {"marketSize": "large", "trends": ["ev"], "competitiveLandscape": "crowded"},
    "competitors": [{"name": "蔚来", "positioning": "premium", "metrics": [], "strengths": [], "weaknesses": []}],
    "strategicComparison": [],
    "marketingInsights": "insights",
    "actionPlan": []
}"#;

fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

/// Read one HTTP request (headers plus Content-Length body).
async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(end) = find_header_end(&buf) {
            let headers = String::from_utf8_lossy(&buf[..end]).to_lowercase();
            let content_length = headers
                .lines()
                .find_map(|l| l.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// Serve a single canned response; the handle yields the raw request.
async fn serve_once(status_line: &'static str, body: String) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
        request
    });
    (format!("http://{}", addr), handle)
}

fn adapter(base_url: String, key: Option<&str>) -> GeminiAdapter {
    GeminiAdapter::new(
        base_url,
        key.map(str::to_string),
        "gemini-test".to_string(),
        Duration::from_secs(5),
        Duration::from_secs(5),
    )
    .unwrap()
}

#[tokio::test]
async fn grounded_fenced_response_becomes_report() {
    let body = serde_json::json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": format!("```json\n{}\n```", REPORT_JSON)}]},
            "groundingMetadata": {
                "groundingChunks": [{"web": {"uri": "https://example.com/a", "title": "Example"}}]
            }
        }]
    })
    .to_string();
    let (url, server) = serve_once("200 OK", body).await;

    let report = adapter(url, Some("test-key"))
        .analyze_competitors(&["蔚来".to_string()])
        .await
        .unwrap();

    assert_eq!(report.competitors.len(), 1);
    assert_eq!(report.competitors[0].name, "蔚来");
    assert_eq!(report.sources.len(), 1);
    assert_eq!(report.sources[0].title, "Example");

    let request = server.await.unwrap();
    assert!(request.starts_with("POST /models/gemini-test:generateContent?key=test-key "));
    assert!(request.contains("\"googleSearch\":{}"));
    assert!(request.contains("\"responseMimeType\":\"application/json\""));
}

#[tokio::test]
async fn empty_candidates_is_empty_response() {
    let (url, server) = serve_once("200 OK", r#"{"candidates": []}"#.to_string()).await;

    let err = adapter(url, Some("k"))
        .analyze_competitors(&["蔚来".to_string()])
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::EmptyResponse));
    server.await.unwrap();
}

#[tokio::test]
async fn http_error_status_is_api_fault() {
    let (url, server) = serve_once(
        "403 Forbidden",
        r#"{"error": {"message": "API key not valid"}}"#.to_string(),
    )
    .await;

    let err = adapter(url, Some("bad"))
        .analyze_competitors(&["蔚来".to_string()])
        .await
        .unwrap_err();

    match err {
        DomainError::Api { status, body } => {
            assert_eq!(status, 403);
            assert!(body.contains("API key not valid"));
        }
        other => panic!("expected Api error, got {:?}", other),
    }
    server.await.unwrap();
}

#[tokio::test]
async fn unreachable_service_is_transport_fault() {
    // Bind then drop to get a port nobody listens on.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = adapter(format!("http://{}", addr), Some("k"))
        .analyze_competitors(&["蔚来".to_string()])
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Transport(_)));
}
