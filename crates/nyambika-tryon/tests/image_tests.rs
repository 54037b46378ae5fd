//! Image normalization tests for the URL-fetching paths.

use reqwest::Client;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use nyambika_tryon::image::{fetch_as_base64, to_clothflow_input, to_raw_base64};

#[tokio::test]
async fn test_to_clothflow_input_always_yields_data_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/photo.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"hi".to_vec()))
        .mount(&server)
        .await;

    let client = Client::new();

    // Raw base64
    let raw = to_clothflow_input(&client, "AAAA").await.unwrap();
    assert_eq!(raw, "data:image/jpeg;base64,AAAA");

    // Data URL passes through unchanged
    let data_url = to_clothflow_input(&client, "data:image/png;base64,AAAA").await.unwrap();
    assert_eq!(data_url, "data:image/png;base64,AAAA");

    // Remote URL is fetched and inlined ("hi" encodes to aGk=)
    let fetched = to_clothflow_input(&client, &format!("{}/photo.jpg", server.uri()))
        .await
        .unwrap();
    assert_eq!(fetched, "data:image/jpeg;base64,aGk=");
}

#[tokio::test]
async fn test_to_raw_base64_covers_all_encodings() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/photo.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"hi".to_vec()))
        .mount(&server)
        .await;

    let client = Client::new();

    assert_eq!(to_raw_base64(&client, "AAAA").await.unwrap(), "AAAA");
    assert_eq!(
        to_raw_base64(&client, "data:image/jpeg;base64,AAAA").await.unwrap(),
        "AAAA"
    );
    assert_eq!(
        to_raw_base64(&client, &format!("{}/photo.jpg", server.uri()))
            .await
            .unwrap(),
        "aGk="
    );
}

#[tokio::test]
async fn test_fetch_failure_reports_the_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing.jpg"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let url = format!("{}/missing.jpg", server.uri());
    let err = fetch_as_base64(&Client::new(), &url).await.unwrap_err();
    assert_eq!(err.to_string(), format!("Failed to fetch image: {}", url));
}
