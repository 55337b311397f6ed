use std::time::Duration;

use httpmock::prelude::*;
use wordsmith::words::{ExternalSource, FallbackList, FetchError, Origin, WordProvider};

fn provider_for(server: &MockServer, timeout: Duration) -> WordProvider {
    let source = ExternalSource::new(&server.url("/word"), timeout).unwrap();
    WordProvider::new(source, FallbackList::default())
}

fn assert_fallback(provider: &WordProvider, word: &wordsmith::words::Word, origin: &Origin) {
    assert!(origin.is_fallback(), "expected fallback, got {origin:?}");
    assert!(provider.fallback().contains(word));
    assert_eq!(word.as_str(), word.as_str().to_uppercase());
}

#[tokio::test]
async fn test_external_word_is_uppercased() {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/word").query_param("number", "1");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!(["whale"]));
        })
        .await;

    let provider = provider_for(&server, Duration::from_secs(5));
    let (word, origin) = provider.get_word_with_origin().await;

    api_mock.assert_async().await;
    assert_eq!(word.as_str(), "WHALE");
    assert!(matches!(origin, Origin::External));
}

#[tokio::test]
async fn test_only_first_of_several_words_is_used() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/word");
            then.status(200).json_body(serde_json::json!(["Narwhal", "seal", "otter"]));
        })
        .await;

    let provider = provider_for(&server, Duration::from_secs(5));
    assert_eq!(provider.get_word().await.as_str(), "NARWHAL");
}

#[tokio::test]
async fn test_timeout_falls_back() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/word");
            then.status(200)
                .delay(Duration::from_secs(2))
                .json_body(serde_json::json!(["late"]));
        })
        .await;

    let provider = provider_for(&server, Duration::from_millis(200));
    let (word, origin) = provider.get_word_with_origin().await;

    assert_fallback(&provider, &word, &origin);
    assert!(matches!(origin, Origin::Fallback(FetchError::Timeout)));
}

#[tokio::test]
async fn test_server_error_falls_back() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/word");
            then.status(500).body("Internal Server Error");
        })
        .await;

    let provider = provider_for(&server, Duration::from_secs(5));
    let (word, origin) = provider.get_word_with_origin().await;

    assert_fallback(&provider, &word, &origin);
    match origin {
        Origin::Fallback(FetchError::Status(status)) => assert_eq!(status.as_u16(), 500),
        other => panic!("expected protocol failure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_array_falls_back() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/word");
            then.status(200).json_body(serde_json::json!([]));
        })
        .await;

    let provider = provider_for(&server, Duration::from_secs(5));
    let (word, origin) = provider.get_word_with_origin().await;

    assert_fallback(&provider, &word, &origin);
    assert!(matches!(origin, Origin::Fallback(FetchError::Shape(_))));
}

#[tokio::test]
async fn test_non_json_body_falls_back() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/word");
            then.status(200)
                .header("Content-Type", "text/html")
                .body("<html><body>Application Error</body></html>");
        })
        .await;

    let provider = provider_for(&server, Duration::from_secs(5));
    let (word, origin) = provider.get_word_with_origin().await;

    assert_fallback(&provider, &word, &origin);
    assert!(matches!(origin, Origin::Fallback(FetchError::Shape(_))));
}

#[tokio::test]
async fn test_connection_refused_falls_back() {
    // Grab a free port, then release it so nothing is listening there.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let source =
        ExternalSource::new(&format!("http://{addr}/word"), Duration::from_secs(2)).unwrap();
    let provider = WordProvider::new(source, FallbackList::new(["offline"]).unwrap());
    let (word, origin) = provider.get_word_with_origin().await;

    assert_eq!(word.as_str(), "OFFLINE");
    match origin {
        Origin::Fallback(e) => assert_eq!(e.class(), "transport"),
        Origin::External => panic!("expected fallback"),
    }
}
