use std::sync::Mutex;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use super::extract::{article_text, ld_json_summary};
use super::{
    ContentFetcher, Disposition, FetchOutcome, Sleeper, backoff, disposition_for, is_soft_404,
};

/// Sleeper that records requested durations without waiting.
#[derive(Default)]
struct RecordingSleeper {
    sleeps: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    fn recorded(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

impl Sleeper for &RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
    }
}

fn article_html() -> String {
    let body = "This sentence is part of a long enough article body to pass the \
                minimum content length check used by the extractor heuristic."
        .repeat(2);
    format!("<html><body><article><p>{body}</p></article></body></html>")
}

fn http_response(status_line: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {status_line}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    )
}

/// Serves one scripted response per connection, then stops.
async fn scripted_server(responses: Vec<String>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        for response in responses {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            // Drain the request head; scripted responses ignore its content.
            let _ = stream.read(&mut buf).await;
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.unwrap();
        }
    });

    format!("http://{addr}/article/some-claim")
}

#[tokio::test]
async fn test_retries_forbidden_then_succeeds() {
    let html = article_html();
    let url = scripted_server(vec![
        http_response("403 Forbidden", "<html>blocked</html>"),
        http_response("403 Forbidden", "<html>blocked</html>"),
        http_response("200 OK", &html),
    ])
    .await;

    let sleeper = RecordingSleeper::default();
    let fetcher = ContentFetcher::with_sleeper(5, &sleeper).unwrap();

    let outcome = fetcher.fetch(&url).await;
    let text = outcome.text().expect("third attempt should succeed");
    assert!(text.contains("long enough article body"));

    // One backoff per failed attempt, within [2^n, 2^n + 1) seconds.
    let sleeps = sleeper.recorded();
    assert_eq!(sleeps.len(), 2);
    assert!(sleeps[0] >= Duration::from_secs(1) && sleeps[0] < Duration::from_secs(2));
    assert!(sleeps[1] >= Duration::from_secs(2) && sleeps[1] < Duration::from_secs(3));
}

#[tokio::test]
async fn test_not_found_aborts_without_retry() {
    let url = scripted_server(vec![http_response("404 Not Found", "gone")]).await;

    let sleeper = RecordingSleeper::default();
    let fetcher = ContentFetcher::with_sleeper(5, &sleeper).unwrap();

    assert_eq!(fetcher.fetch(&url).await, FetchOutcome::Unavailable);
    assert!(sleeper.recorded().is_empty());
}

#[tokio::test]
async fn test_server_error_aborts_without_retry() {
    let url = scripted_server(vec![http_response("503 Service Unavailable", "down")]).await;

    let sleeper = RecordingSleeper::default();
    let fetcher = ContentFetcher::with_sleeper(5, &sleeper).unwrap();

    assert_eq!(fetcher.fetch(&url).await, FetchOutcome::Unavailable);
    assert!(sleeper.recorded().is_empty());
}

#[tokio::test]
async fn test_exhausted_attempts_is_unavailable() {
    let url = scripted_server(vec![
        http_response("403 Forbidden", "blocked"),
        http_response("403 Forbidden", "blocked"),
    ])
    .await;

    let sleeper = RecordingSleeper::default();
    let fetcher = ContentFetcher::with_sleeper(2, &sleeper).unwrap();

    assert_eq!(fetcher.fetch(&url).await, FetchOutcome::Unavailable);
    assert_eq!(sleeper.recorded().len(), 1);
}

#[tokio::test]
async fn test_invalid_url_is_unavailable() {
    let sleeper = RecordingSleeper::default();
    let fetcher = ContentFetcher::with_sleeper(5, &sleeper).unwrap();
    assert_eq!(fetcher.fetch("not a url").await, FetchOutcome::Unavailable);
}

#[test]
fn test_status_dispositions() {
    use reqwest::StatusCode;

    assert_eq!(disposition_for(StatusCode::OK), Disposition::Proceed);
    assert_eq!(
        disposition_for(StatusCode::FORBIDDEN),
        Disposition::RetryWithCookie
    );
    assert_eq!(disposition_for(StatusCode::NOT_FOUND), Disposition::Abort);
    assert_eq!(
        disposition_for(StatusCode::INTERNAL_SERVER_ERROR),
        Disposition::Abort
    );
    assert_eq!(disposition_for(StatusCode::BAD_GATEWAY), Disposition::Abort);
    assert_eq!(
        disposition_for(StatusCode::TOO_MANY_REQUESTS),
        Disposition::Abort
    );
}

#[test]
fn test_backoff_doubles_with_jitter() {
    for attempt in 0..4u32 {
        let base = 1u64 << attempt;
        let wait = backoff(attempt);
        assert!(wait >= Duration::from_secs(base));
        assert!(wait < Duration::from_secs(base + 1));
    }
}

#[test]
fn test_soft_404_detection() {
    let requested = url::Url::parse("https://news.example.com/2026/story").unwrap();
    let root = url::Url::parse("https://news.example.com/").unwrap();
    let other = url::Url::parse("https://news.example.com/2026/story-moved").unwrap();

    assert!(is_soft_404(&requested, &root));
    assert!(!is_soft_404(&requested, &other));
    assert!(!is_soft_404(&root, &root));
}

#[test]
fn test_extract_prefers_content_container() {
    let filler = "Container paragraph text that is clearly long enough to pass \
                  the extractor minimum once repeated a couple of times. "
        .repeat(3);
    let html = format!(
        "<html><body>\
         <nav><p>Menu item</p></nav>\
         <article><p>{filler}</p></article>\
         <footer><p>Footer text</p></footer>\
         </body></html>"
    );

    let text = article_text(&html).unwrap();
    assert!(text.contains("Container paragraph text"));
    assert!(!text.contains("Menu item"));
    assert!(!text.contains("Footer text"));
}

#[test]
fn test_extract_joins_paragraphs_without_container() {
    let para = "A paragraph of body text long enough that two of them clear the \
                one hundred character minimum together easily.";
    let html = format!("<html><body><p>{para}</p><p>{para}</p></body></html>");

    let text = article_text(&html).unwrap();
    assert_eq!(text.matches(para).count(), 2);
    assert!(text.contains('\n'));
}

#[test]
fn test_extract_skips_script_and_style() {
    let filler = "Readable article text that should survive extraction and be \
                  returned to the caller for evidence synthesis. "
        .repeat(2);
    let html = format!(
        "<html><body><main>\
         <script>var tracking = \"beacon\";</script>\
         <style>.ad {{ display: none; }}</style>\
         <p>{filler}</p>\
         </main></body></html>"
    );

    let text = article_text(&html).unwrap();
    assert!(text.contains("Readable article text"));
    assert!(!text.contains("tracking"));
    assert!(!text.contains("display: none"));
}

#[test]
fn test_extract_short_content_is_none() {
    assert!(article_text("<html><body><p>Too short.</p></body></html>").is_none());
    assert!(article_text("").is_none());
}

#[test]
fn test_extract_truncates_on_char_boundary() {
    // Multibyte content longer than the truncation limit.
    let para = "Többnyelvű szöveg műértő olvasóknak. ".repeat(400);
    let html = format!("<html><body><article><p>{para}</p></article></body></html>");

    let text = article_text(&html).unwrap();
    assert_eq!(text.chars().count(), 5000);
}

#[test]
fn test_ld_json_summary_object_and_array() {
    let object = r#"<html><head><script type="application/ld+json">
        {"headline": "Claim debunked", "description": "It was never true."}
    </script></head><body></body></html>"#;
    assert_eq!(
        ld_json_summary(object).unwrap(),
        "Claim debunked\n\nIt was never true."
    );

    let array = r#"<html><head><script type="application/ld+json">
        [{"headline": "First entry wins"}]
    </script></head><body></body></html>"#;
    assert_eq!(ld_json_summary(array).unwrap(), "First entry wins");

    assert!(ld_json_summary("<html><body></body></html>").is_none());
}
