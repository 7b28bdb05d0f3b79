use fitness_companion_core::http_client::ReqwestNewsClient;
use fitness_companion_core::{HeadlineQuery, NewsClient, NewsError};
use secrecy::SecretString;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> ReqwestNewsClient {
    ReqwestNewsClient::new(&server.uri(), SecretString::new("tok".into()))
}

#[tokio::test]
async fn fetch_headlines_sends_key_and_parses_articles() {
    let server = MockServer::start().await;
    let body = serde_json::json!({
        "status": "ok",
        "totalResults": 2,
        "articles": [
            {
                "source": {"id": null, "name": "Health Daily"},
                "author": "A. Writer",
                "title": "Hydration basics",
                "description": "Drink water",
                "url": "https://example.com/1",
                "urlToImage": "https://example.com/1.jpg",
                "publishedAt": "2025-10-01T08:00:00Z",
                "content": "..."
            },
            {
                "source": null,
                "title": "Sleep and recovery",
                "description": null,
                "url": "https://example.com/2",
                "urlToImage": null
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/v2/top-headlines"))
        .and(query_param("country", "us"))
        .and(query_param("category", "health"))
        .and(header("x-api-key", "tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let articles = client(&server)
        .fetch_headlines("us", "health")
        .await
        .expect("articles");
    assert_eq!(articles.len(), 2);
    assert_eq!(articles[0].title, "Hydration basics");
    assert_eq!(articles[0].source_name(), "Health Daily");
    assert!(articles[1].description.is_none());
    assert!(articles[1].url_to_image.is_none());
}

#[tokio::test]
async fn paged_query_forwards_page_params() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/top-headlines"))
        .and(query_param("page", "3"))
        .and(query_param("pageSize", "5"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"status": "ok", "totalResults": 42, "articles": []})),
        )
        .mount(&server)
        .await;

    let query = HeadlineQuery::new("mx", "sports").with_page(3, 5);
    let resp = client(&server)
        .fetch_headlines_page(&query)
        .await
        .expect("page");
    assert_eq!(resp.total_results, 42);
    assert!(resp.articles.is_empty());
}

#[tokio::test]
async fn unauthorized_maps_to_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/top-headlines"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "status": "error",
            "code": "apiKeyInvalid",
            "message": "Your API key is invalid."
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .fetch_headlines("us", "health")
        .await
        .unwrap_err();
    match err {
        NewsError::Auth(msg) => assert_eq!(msg, "Your API key is invalid."),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn rate_limit_maps_to_rate_limited() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/top-headlines"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .mount(&server)
        .await;

    let err = client(&server)
        .fetch_headlines("us", "health")
        .await
        .unwrap_err();
    assert!(matches!(err, NewsError::RateLimited(ref m) if m == "slow down"));
}

#[tokio::test]
async fn error_status_in_ok_body_maps_to_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/top-headlines"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "error",
            "code": "parametersMissing",
            "message": "Required parameters are missing."
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .fetch_headlines("us", "health")
        .await
        .unwrap_err();
    match err {
        NewsError::Api { code, .. } => assert_eq!(code, "parametersMissing"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn server_error_without_body_maps_to_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/top-headlines"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client(&server)
        .fetch_headlines("us", "health")
        .await
        .unwrap_err();
    assert!(matches!(err, NewsError::Status { status: 503, .. }));
}

#[tokio::test]
async fn one_request_per_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/top-headlines"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let _ = client(&server).fetch_headlines("us", "health").await;
    server.verify().await;
}
