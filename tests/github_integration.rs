//! HTTP-level tests for the GitHub forge implementation.
//!
//! These run the real reqwest client against a local wiremock server and
//! verify endpoint paths, request bodies, headers, and status mapping.

use semver_sync::forge::github::GitHubForge;
use semver_sync::forge::{Forge, ForgeError};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn reference_body(ref_name: &str, sha: &str) -> serde_json::Value {
    json!({
        "ref": ref_name,
        "node_id": "MDM6UmVmcmVmcy90YWdzL3Yx",
        "url": format!("https://api.github.com/repos/octo/rolling/git/{}", ref_name),
        "object": {
            "sha": sha,
            "type": "commit",
            "url": format!("https://api.github.com/repos/octo/rolling/git/commits/{}", sha),
        }
    })
}

// =============================================================================
// get_ref
// =============================================================================

#[tokio::test]
async fn get_ref_hits_singular_ref_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/octo/rolling/git/ref/tags/v1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(reference_body(
            "refs/tags/v1",
            "aa218f56b14c9653891f9e74264a383fa43fefbd",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let forge = GitHubForge::with_api_base("test-token", server.uri());
    let r = forge.get_ref("octo", "rolling", "tags/v1").await.unwrap();

    assert_eq!(r.name, "refs/tags/v1");
    assert_eq!(r.sha, "aa218f56b14c9653891f9e74264a383fa43fefbd");
}

#[tokio::test]
async fn get_ref_sends_auth_and_api_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/octo/rolling/git/ref/tags/v1"))
        .and(header("Authorization", "Bearer test-token"))
        .and(header("Accept", "application/vnd.github+json"))
        .and(header("X-GitHub-Api-Version", "2022-11-28"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(reference_body("refs/tags/v1", "abc")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let forge = GitHubForge::with_api_base("test-token", server.uri());
    forge.get_ref("octo", "rolling", "tags/v1").await.unwrap();
}

#[tokio::test]
async fn get_ref_404_maps_to_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/octo/rolling/git/ref/tags/v1"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})))
        .mount(&server)
        .await;

    let forge = GitHubForge::with_api_base("test-token", server.uri());
    let err = forge.get_ref("octo", "rolling", "tags/v1").await.unwrap_err();

    assert_eq!(err, ForgeError::NotFound("Not Found".to_string()));
}

// =============================================================================
// create_ref
// =============================================================================

#[tokio::test]
async fn create_ref_posts_fully_qualified_ref() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/repos/octo/rolling/git/refs"))
        .and(body_json(json!({"ref": "refs/tags/v1", "sha": "abc123"})))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(reference_body("refs/tags/v1", "abc123")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let forge = GitHubForge::with_api_base("test-token", server.uri());
    let r = forge
        .create_ref("octo", "rolling", "refs/tags/v1", "abc123")
        .await
        .unwrap();

    assert_eq!(r.name, "refs/tags/v1");
    assert_eq!(r.sha, "abc123");
}

#[tokio::test]
async fn create_ref_422_maps_to_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/repos/octo/rolling/git/refs"))
        .respond_with(
            ResponseTemplate::new(422)
                .set_body_json(json!({"message": "Reference already exists"})),
        )
        .mount(&server)
        .await;

    let forge = GitHubForge::with_api_base("test-token", server.uri());
    let err = forge
        .create_ref("octo", "rolling", "refs/tags/v1", "abc123")
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ForgeError::ApiError {
            status: 422,
            message: "Reference already exists".to_string()
        }
    );
}

// =============================================================================
// update_ref
// =============================================================================

#[tokio::test]
async fn update_ref_patches_with_unconditional_force() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/repos/octo/rolling/git/refs/tags/v1"))
        .and(body_json(json!({"sha": "abc123", "force": true})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(reference_body("refs/tags/v1", "abc123")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let forge = GitHubForge::with_api_base("test-token", server.uri());
    let r = forge
        .update_ref("octo", "rolling", "tags/v1", "abc123")
        .await
        .unwrap();

    assert_eq!(r.sha, "abc123");
}

// =============================================================================
// Status Mapping
// =============================================================================

#[tokio::test]
async fn unauthorized_maps_to_auth_failed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/octo/rolling/git/ref/tags/v1"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "Bad credentials"})),
        )
        .mount(&server)
        .await;

    let forge = GitHubForge::with_api_base("bad-token", server.uri());
    let err = forge.get_ref("octo", "rolling", "tags/v1").await.unwrap_err();

    assert!(matches!(err, ForgeError::AuthFailed(_)));
}

#[tokio::test]
async fn forbidden_maps_to_auth_failed_with_message() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/repos/octo/rolling/git/refs/tags/v1"))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_json(json!({"message": "Resource not accessible by integration"})),
        )
        .mount(&server)
        .await;

    let forge = GitHubForge::with_api_base("test-token", server.uri());
    let err = forge
        .update_ref("octo", "rolling", "tags/v1", "abc")
        .await
        .unwrap_err();

    match err {
        ForgeError::AuthFailed(message) => {
            assert!(message.contains("Resource not accessible by integration"));
        }
        other => panic!("expected AuthFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn too_many_requests_maps_to_rate_limited() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/octo/rolling/git/ref/tags/v1"))
        .respond_with(
            ResponseTemplate::new(429).set_body_json(json!({"message": "API rate limit exceeded"})),
        )
        .mount(&server)
        .await;

    let forge = GitHubForge::with_api_base("test-token", server.uri());
    let err = forge.get_ref("octo", "rolling", "tags/v1").await.unwrap_err();

    assert_eq!(err, ForgeError::RateLimited);
}

#[tokio::test]
async fn server_error_maps_to_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/octo/rolling/git/ref/tags/v1"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "boom"})))
        .mount(&server)
        .await;

    let forge = GitHubForge::with_api_base("test-token", server.uri());
    let err = forge.get_ref("octo", "rolling", "tags/v1").await.unwrap_err();

    match err {
        ForgeError::ApiError { status, message } => {
            assert_eq!(status, 500);
            assert!(message.contains("boom"));
        }
        other => panic!("expected ApiError, got {:?}", other),
    }
}

#[tokio::test]
async fn error_without_json_body_still_maps() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/octo/rolling/git/ref/tags/v1"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not json"))
        .mount(&server)
        .await;

    let forge = GitHubForge::with_api_base("test-token", server.uri());
    let err = forge.get_ref("octo", "rolling", "tags/v1").await.unwrap_err();

    assert_eq!(err, ForgeError::NotFound("Unknown error".to_string()));
}

#[tokio::test]
async fn connection_failure_maps_to_network_error() {
    // Nothing listens on this port.
    let forge = GitHubForge::with_api_base("test-token", "http://127.0.0.1:1");
    let err = forge.get_ref("octo", "rolling", "tags/v1").await.unwrap_err();

    assert!(matches!(err, ForgeError::NetworkError(_)));
}
