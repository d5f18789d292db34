//! Classic project REST calls against a mock GitHub.

use filing::{
    BoardApiError, ClassicProjectBoard, ClassicProjectId, ColumnId, PullRequestId,
};
use github::{GitHubClient, GitHubClientConfig};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> GitHubClient {
    let mut config = GitHubClientConfig::new("ghs_test_token");
    config.api_url = format!("{}/", server.uri());
    config.graphql_url = format!("{}/graphql", server.uri());
    GitHubClient::new(config).unwrap()
}

#[tokio::test]
async fn get_project_sends_auth_and_decodes_metadata() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/projects/1"))
        .and(header("authorization", "Bearer ghs_test_token"))
        .and(header("accept", "application/vnd.github+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1,
            "name": "Sprint board",
            "state": "open",
            "number": 1,
            "body": "Tracks the sprint"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let project = client_for(&server)
        .get_project(ClassicProjectId::new(1))
        .await
        .unwrap();

    assert_eq!(project.name, "Sprint board");
    assert_eq!(project.state.as_deref(), Some("open"));
}

#[tokio::test]
async fn list_columns_requests_a_full_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/projects/1/columns"))
        .and(query_param("per_page", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 367, "name": "Backlog", "url": "https://api.github.com/projects/columns/367" },
            { "id": 368, "name": "ToDo", "url": "https://api.github.com/projects/columns/368" }
        ])))
        .mount(&server)
        .await;

    let columns = client_for(&server)
        .list_columns(ClassicProjectId::new(1))
        .await
        .unwrap();

    assert_eq!(columns.len(), 2);
    assert_eq!(columns[1].id, ColumnId::new(368));
    assert_eq!(columns[1].name, "ToDo");
}

#[tokio::test]
async fn create_card_posts_pull_request_content() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/projects/columns/368/cards"))
        .and(body_json(json!({
            "content_id": 1_296_269,
            "content_type": "PullRequest"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 1478,
            "content_url": "https://api.github.com/repos/o/r/issues/42"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let card = client_for(&server)
        .create_card(ColumnId::new(368), PullRequestId::new(1_296_269))
        .await
        .unwrap();

    assert_eq!(card.as_u64(), 1478);
}

#[tokio::test]
async fn error_status_carries_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/projects/9"))
        .respond_with(
            ResponseTemplate::new(410).set_body_string(r#"{"message":"Projects (classic) has been deprecated"}"#),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_project(ClassicProjectId::new(9))
        .await
        .unwrap_err();

    match err {
        BoardApiError::Status { status, body, .. } => {
            assert_eq!(status, 410);
            assert!(body.contains("deprecated"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn unexpected_shape_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/projects/1/columns"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "columns": [] })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .list_columns(ClassicProjectId::new(1))
        .await
        .unwrap_err();

    assert!(matches!(err, BoardApiError::Decode { .. }));
}
