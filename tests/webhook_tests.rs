//! End-to-end tests of the webhook backend against a throwaway local HTTP
//! listener that answers a single request with a canned response.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use songmatch::{FallbackReason, Origin, Searcher, SongQuery, WebhookBackend};

/// What the listener saw of the request.
struct Captured {
    request_line: String,
    headers: Vec<(String, String)>,
    body: String,
}

impl Captured {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Serve one request with `status` and `body`, returning the URL to hit.
fn serve_once(status: u16, body: &'static str) -> (String, JoinHandle<Captured>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/webhook/test", listener.local_addr().unwrap());

    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        stream.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());

        let mut request_line = String::new();
        reader.read_line(&mut request_line).unwrap();

        let mut headers = Vec::new();
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            let line = line.trim_end();
            if line.is_empty() {
                break;
            }
            if let Some((k, v)) = line.split_once(':') {
                headers.push((k.trim().to_string(), v.trim().to_string()));
            }
        }

        let length: usize = headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
            .and_then(|(_, v)| v.parse().ok())
            .unwrap_or(0);
        let mut raw = vec![0u8; length];
        reader.read_exact(&mut raw).unwrap();

        let response = format!(
            "HTTP/1.1 {} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        let mut stream = stream;
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();

        Captured {
            request_line: request_line.trim_end().to_string(),
            headers,
            body: String::from_utf8(raw).unwrap(),
        }
    });

    (url, handle)
}

fn searcher(url: &str) -> Searcher<WebhookBackend> {
    Searcher::new(WebhookBackend::with_timeout(url, Duration::from_secs(5)))
}

#[test]
fn test_posts_payload_and_uses_live_results() {
    let (url, server) = serve_once(
        200,
        r#"[{"output":{"recommendations":[
            {"title":"Take On Me","artist":"a-ha","genre":"Synth-pop","matchScore":9.5},
            {"title":"Physical","artist":"Dua Lipa","matchScore":55,"tags":["x","y"]}
        ]}}]"#,
    );

    let query = SongQuery::new("Blinding Lights", "The Weeknd").unwrap();
    let result = searcher(&url).search(&query);
    let captured = server.join().unwrap();

    assert!(captured.request_line.starts_with("POST /webhook/test"));
    assert_eq!(captured.header("Accept"), Some("application/json"));
    assert!(captured.header("Content-Type").unwrap().starts_with("application/json"));

    let sent: serde_json::Value = serde_json::from_str(&captured.body).unwrap();
    assert_eq!(sent["songTitle"], "Blinding Lights");
    assert_eq!(sent["artist"], "The Weeknd");
    assert!(sent["timestamp"].is_string());
    assert!(sent["userAgent"].is_string());
    assert!(sent["platform"].is_string());

    assert_eq!(result.origin, Origin::Webhook);
    assert_eq!(result.recommendations.len(), 2);
    assert_eq!(result.recommendations[0].match_score, 95);
    assert_eq!(result.recommendations[0].tags, vec!["Synth-pop"]);
    assert_eq!(result.recommendations[1].match_score, 55);
    assert_eq!(result.recommendations[1].tags, vec!["x", "y"]);
}

#[test]
fn test_server_error_uses_backup() {
    let (url, server) = serve_once(500, r#"{"message":"Workflow failed"}"#);

    let query = SongQuery::new("Yesterday", "").unwrap();
    let result = searcher(&url).search(&query);
    server.join().unwrap();

    assert_eq!(result.origin, Origin::Backup(FallbackReason::HttpStatus(500)));
    assert_eq!(result.recommendations.len(), 6);
    assert_eq!(result.recommendations[0].title, "Save Your Tears");
}

#[test]
fn test_unrecognized_body_uses_backup() {
    let (url, server) = serve_once(200, "{}");

    let query = SongQuery::new("", "Queen").unwrap();
    let result = searcher(&url).search(&query);
    server.join().unwrap();

    assert_eq!(result.origin, Origin::Backup(FallbackReason::NoRecommendations));
    assert_eq!(result.recommendations.len(), 6);
}

#[test]
fn test_non_json_body_uses_backup() {
    let (url, server) = serve_once(200, "Workflow was started");

    let query = SongQuery::new("Yesterday", "The Beatles").unwrap();
    let result = searcher(&url).search(&query);
    server.join().unwrap();

    assert!(matches!(result.origin, Origin::Backup(FallbackReason::MalformedBody(_))));
    assert_eq!(result.status_message(), "Connection failed. Using backup...");
    assert_eq!(result.recommendations.len(), 6);
}

#[test]
fn test_empty_query_sends_nothing() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.set_nonblocking(true).unwrap();

    assert!(matches!(SongQuery::new("  ", ""), Err(songmatch::Error::EmptyQuery)));

    let err = listener.accept().unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::WouldBlock);
}
