//! Integration tests for the GitHub fetcher and image encoder using wiremock

use core::time::Duration;
use serde_json::json;
use typecard::activity::{Aggregator, AggregatorOptions};
use typecard::card::CardError;
use typecard::github::{Fetcher, GitHubFetcher, RepoRef};
use typecard::render::{HttpImageEncoder, ImageEncoder, MAX_IMAGE_BYTES};
use url::Url;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetcher(server: &MockServer) -> GitHubFetcher {
    GitHubFetcher::new(Some("test-token"), server.uri(), "typecard-tests", Duration::from_secs(5)).expect("Failed to build fetcher")
}

async fn mount_user(server: &MockServer, login: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/users/{login}")))
        .and(header("authorization", "token test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "login": login, "node_id": "MDQ6VXNlcjE=" })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_user_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/ghost"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Not Found" })))
        .mount(&server)
        .await;

    let err = fetcher(&server).user_id("ghost").await.unwrap_err();
    assert!(matches!(err, CardError::NotFound(_)), "{err}");
}

#[tokio::test]
async fn test_user_lookup_server_error_is_transient() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = fetcher(&server).user_id("octocat").await.unwrap_err();
    assert!(matches!(err, CardError::TransientUpstreamFailure(_)), "{err}");
}

#[tokio::test]
async fn test_user_lookup_returns_node_id() {
    let server = MockServer::start().await;
    mount_user(&server, "octocat").await;

    assert_eq!(fetcher(&server).user_id("octocat").await.unwrap(), "MDQ6VXNlcjE=");
}

#[tokio::test]
async fn test_graphql_errors_mean_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "user": null },
            "errors": [{ "message": "Could not resolve to a User with the login of 'ghost'." }]
        })))
        .mount(&server)
        .await;

    let err = fetcher(&server).recent_repositories("ghost", 10).await.unwrap_err();
    assert!(matches!(err, CardError::NotFound(_)), "{err}");
}

#[tokio::test]
async fn test_graphql_server_error_is_transient() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let repo = RepoRef::new("octocat", "hello");
    let err = fetcher(&server).commit_timestamps(&repo, "ID", 100).await.unwrap_err();
    assert!(matches!(err, CardError::TransientUpstreamFailure(_)), "{err}");
}

#[tokio::test]
async fn test_empty_repository_yields_no_commits() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "repository": { "defaultBranchRef": null } }
        })))
        .mount(&server)
        .await;

    let repo = RepoRef::new("octocat", "empty");
    assert!(fetcher(&server).commit_timestamps(&repo, "ID", 100).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_full_aggregation_over_http() {
    let server = MockServer::start().await;
    mount_user(&server, "octocat").await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("recentRepositories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "user": { "repositories": { "nodes": [{ "name": "hello" }, { "name": "world" }] } } }
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("commitHistory"))
        .and(body_string_contains("\"repo\":\"hello\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "repository": { "defaultBranchRef": { "target": { "history": { "nodes": [
                { "committedDate": "2024-05-01T07:30:00Z" },
                { "committedDate": "2024-05-02T13:00:00Z" },
                { "committedDate": "2024-05-03T22:45:00Z" }
            ] } } } } }
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("commitHistory"))
        .and(body_string_contains("\"repo\":\"world\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "repository": { "defaultBranchRef": { "target": { "history": { "nodes": [
                { "committedDate": "2024-05-04T02:10:00+00:00" }
            ] } } } } }
        })))
        .mount(&server)
        .await;

    let aggregator = Aggregator::new(fetcher(&server), AggregatorOptions::default());
    let result = aggregator.aggregate("octocat").await.unwrap();

    assert_eq!(result.total, 4);
    let counts: Vec<u64> = result.buckets.iter().map(|b| b.count).collect();
    assert_eq!(counts, [1, 1, 1, 1]);
    assert!(result.failed_repositories.is_empty());
}

#[tokio::test]
async fn test_image_is_embedded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bg.jpg"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(b"jpeg-bytes".to_vec())
                .insert_header("content-type", "image/jpeg"),
        )
        .mount(&server)
        .await;

    let encoder = HttpImageEncoder::new("typecard-tests", Duration::from_secs(5)).unwrap();
    let url = Url::parse(&format!("{}/bg.jpg", server.uri())).unwrap();
    let image = encoder.encode(&url).await.unwrap();

    assert_eq!(image.mime_type, "image/jpeg");
    assert_eq!(image.base64, "anBlZy1ieXRlcw==");
}

#[tokio::test]
async fn test_image_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/page.html"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html></html>")
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/huge.png"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(vec![0_u8; MAX_IMAGE_BYTES + 1])
                .insert_header("content-type", "image/png"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/missing.png"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let encoder = HttpImageEncoder::new("typecard-tests", Duration::from_secs(5)).unwrap();
    let url = |p: &str| Url::parse(&format!("{}{p}", server.uri())).unwrap();

    let err = encoder.encode(&url("/page.html")).await.unwrap_err();
    assert!(matches!(err, CardError::InvalidRequest(_)), "{err}");

    let err = encoder.encode(&url("/huge.png")).await.unwrap_err();
    assert!(matches!(err, CardError::InvalidRequest(_)), "{err}");

    let err = encoder.encode(&url("/missing.png")).await.unwrap_err();
    assert!(matches!(err, CardError::NotFound(_)), "{err}");
}
