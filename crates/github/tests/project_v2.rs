//! ProjectV2 GraphQL calls against a mock GitHub.

use filing::{BoardApiError, NodeId, OwnerLogin, ProjectNumber, ProjectV2Board, StatusTarget};
use github::{GitHubClient, GitHubClientConfig};
use serde_json::json;
use wiremock::matchers::{body_partial_json, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> GitHubClient {
    let mut config = GitHubClientConfig::new("ghs_test_token");
    config.api_url = server.uri();
    config.graphql_url = format!("{}/graphql", server.uri());
    GitHubClient::new(config).unwrap()
}

fn node(id: &str) -> NodeId {
    NodeId::new(id).unwrap()
}

#[tokio::test]
async fn fetch_project_keeps_single_select_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("projectV2(number: $projectNumber)"))
        .and(body_partial_json(json!({
            "variables": { "owner": "sidtech-solutions", "projectNumber": 2 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "organization": {
                    "projectV2": {
                        "id": "PVT_kwDOBoard",
                        "fields": {
                            "nodes": [
                                {},
                                {
                                    "id": "PVTSSF_status",
                                    "name": "Status",
                                    "options": [
                                        { "id": "f75ad846", "name": "Todo" },
                                        { "id": "47fc9ee4", "name": "In Progress" }
                                    ]
                                }
                            ]
                        }
                    }
                }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let snapshot = client_for(&server)
        .fetch_project(
            &OwnerLogin::new("sidtech-solutions").unwrap(),
            ProjectNumber::new(2),
        )
        .await
        .unwrap();

    assert_eq!(snapshot.id.as_str(), "PVT_kwDOBoard");
    assert_eq!(snapshot.fields.len(), 2);
    assert!(snapshot.fields[0].name.is_none());
    let options = snapshot.fields[1].options.as_ref().unwrap();
    assert_eq!(options[0].id, "f75ad846");
}

#[tokio::test]
async fn fetch_project_reports_unknown_project() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "organization": { "projectV2": null } }
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_project(&OwnerLogin::new("acme").unwrap(), ProjectNumber::new(99))
        .await
        .unwrap_err();

    match err {
        BoardApiError::MissingData { what } => assert_eq!(what, "project #99 of acme"),
        other => panic!("expected missing data, got {other:?}"),
    }
}

#[tokio::test]
async fn graphql_errors_are_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "organization": null },
            "errors": [
                { "type": "NOT_FOUND", "message": "Could not resolve to an Organization with the login of 'nobody'." }
            ]
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_project(&OwnerLogin::new("nobody").unwrap(), ProjectNumber::new(1))
        .await
        .unwrap_err();

    match err {
        BoardApiError::GraphQl { messages } => {
            assert_eq!(messages.len(), 1);
            assert!(messages[0].contains("Could not resolve"));
        }
        other => panic!("expected GraphQL error, got {other:?}"),
    }
}

#[tokio::test]
async fn add_item_sends_project_and_content_ids() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("addProjectV2ItemById"))
        .and(body_partial_json(json!({
            "variables": { "projectId": "PVT_kwDOBoard", "contentId": "PR_kwDOA1" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "addProjectV2ItemById": { "item": { "id": "PVTI_lADOBoard" } } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let item = client_for(&server)
        .add_item(&node("PVT_kwDOBoard"), &node("PR_kwDOA1"))
        .await
        .unwrap();

    assert_eq!(item.as_str(), "PVTI_lADOBoard");
}

#[tokio::test]
async fn set_single_select_sends_option_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("updateProjectV2ItemFieldValue"))
        .and(body_partial_json(json!({
            "variables": {
                "projectId": "PVT_kwDOBoard",
                "itemId": "PVTI_lADOBoard",
                "fieldId": "PVTSSF_status",
                "optionId": "f75ad846"
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "updateProjectV2ItemFieldValue": { "projectV2Item": { "id": "PVTI_lADOBoard" } } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let target = StatusTarget {
        field_id: node("PVTSSF_status"),
        option_id: "f75ad846".to_string(),
    };

    client_for(&server)
        .set_single_select(&node("PVT_kwDOBoard"), &node("PVTI_lADOBoard"), &target)
        .await
        .unwrap();
}

#[tokio::test]
async fn graphql_http_failure_is_a_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Bad credentials"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .add_item(&node("PVT_kwDOBoard"), &node("PR_kwDOA1"))
        .await
        .unwrap_err();

    assert!(matches!(err, BoardApiError::Status { status: 401, .. }));
}
