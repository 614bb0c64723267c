use newsroom_api::{Client, Error};
use wiremock::matchers::{header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn fetch_html_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/facts-and-statistics"))
        .and(header_exists("user-agent"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><title>Index</title></html>"))
        .mount(&mock_server)
        .await;

    let client = Client::new().unwrap();
    let url = format!("{}/facts-and-statistics", mock_server.uri());
    let body = client.fetch_html(&url).await.unwrap();
    assert!(body.contains("<title>Index</title>"));
}

#[tokio::test]
async fn fetch_html_not_found_is_status_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/facts-and-statistics/country/atlantis"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&mock_server)
        .await;

    let client = Client::new().unwrap();
    let url = format!("{}/facts-and-statistics/country/atlantis", mock_server.uri());
    let err = client.fetch_html(&url).await.unwrap_err();
    match err {
        Error::HttpStatus { status, body } => {
            assert_eq!(status, 404);
            assert_eq!(body, "Not Found");
        }
        other => panic!("expected HttpStatus, got {:?}", other),
    }
}

#[tokio::test]
async fn fetch_html_connection_refused() {
    // Start and drop a server so the port is very likely closed.
    let uri = {
        let mock_server = MockServer::start().await;
        mock_server.uri()
    };

    let client = Client::new().unwrap();
    let result = client.fetch_html(&format!("{}/anything", uri)).await;
    assert!(matches!(result, Err(Error::RequestFailed(_))));
}

#[tokio::test]
async fn fetch_html_relative_url_is_invalid() {
    let client = Client::new().unwrap();
    let result = client.fetch_html("/facts-and-statistics").await;
    assert!(matches!(result, Err(Error::InvalidUrl { .. })));
}
