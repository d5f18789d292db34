//! ProjectV2 boards over the GraphQL API.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use filing::{
    BoardApiError, NodeId, OwnerLogin, ProjectField, ProjectNumber, ProjectV2Board,
    ProjectV2Snapshot, StatusTarget,
};

use crate::GitHubClient;

const PROJECT_QUERY: &str = r"
    query($owner: String!, $projectNumber: Int!) {
      organization(login: $owner) {
        projectV2(number: $projectNumber) {
          id
          fields(first: 20) {
            nodes {
              ... on ProjectV2SingleSelectField {
                id
                name
                options {
                  id
                  name
                }
              }
            }
          }
        }
      }
    }
";

const ADD_ITEM_MUTATION: &str = r"
    mutation($projectId: ID!, $contentId: ID!) {
      addProjectV2ItemById(input: {projectId: $projectId, contentId: $contentId}) {
        item {
          id
        }
      }
    }
";

const SET_STATUS_MUTATION: &str = r"
    mutation($projectId: ID!, $itemId: ID!, $fieldId: ID!, $optionId: String!) {
      updateProjectV2ItemFieldValue(
        input: {
          projectId: $projectId
          itemId: $itemId
          fieldId: $fieldId
          value: { singleSelectOptionId: $optionId }
        }
      ) {
        projectV2Item {
          id
        }
      }
    }
";

// ---------------------------------------------------------------------------
// Response shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ProjectQueryData {
    organization: Option<Organization>,
}

#[derive(Debug, Deserialize)]
struct Organization {
    #[serde(rename = "projectV2")]
    project_v2: Option<ProjectNode>,
}

#[derive(Debug, Deserialize)]
struct ProjectNode {
    id: NodeId,
    fields: FieldConnection,
}

#[derive(Debug, Deserialize)]
struct FieldConnection {
    #[serde(default)]
    nodes: Vec<Option<ProjectField>>,
}

#[derive(Debug, Deserialize)]
struct AddItemData {
    #[serde(rename = "addProjectV2ItemById")]
    add_item: Option<AddItemPayload>,
}

#[derive(Debug, Deserialize)]
struct AddItemPayload {
    item: Option<ItemNode>,
}

#[derive(Debug, Deserialize)]
struct ItemNode {
    id: NodeId,
}

#[derive(Debug, Deserialize)]
struct SetStatusData {
    #[serde(rename = "updateProjectV2ItemFieldValue")]
    update: Option<SetStatusPayload>,
}

#[derive(Debug, Deserialize)]
struct SetStatusPayload {
    #[serde(rename = "projectV2Item")]
    item: Option<ItemNode>,
}

// ---------------------------------------------------------------------------
// Variables
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectVariables<'a> {
    owner: &'a str,
    project_number: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AddItemVariables<'a> {
    project_id: &'a str,
    content_id: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SetStatusVariables<'a> {
    project_id: &'a str,
    item_id: &'a str,
    field_id: &'a str,
    option_id: &'a str,
}

fn missing(what: impl Into<String>) -> BoardApiError {
    BoardApiError::MissingData { what: what.into() }
}

#[async_trait]
impl ProjectV2Board for GitHubClient {
    #[instrument(skip(self), fields(owner = %owner, project_number = %number))]
    async fn fetch_project(
        &self,
        owner: &OwnerLogin,
        number: ProjectNumber,
    ) -> Result<ProjectV2Snapshot, BoardApiError> {
        let variables = ProjectVariables {
            owner: owner.as_str(),
            project_number: number.as_u64(),
        };
        let data: ProjectQueryData = self.graphql(PROJECT_QUERY, variables).await?;

        let project = data
            .organization
            .ok_or_else(|| missing(format!("organization {owner}")))?
            .project_v2
            .ok_or_else(|| missing(format!("project #{number} of {owner}")))?;

        Ok(ProjectV2Snapshot {
            id: project.id,
            fields: project.fields.nodes.into_iter().flatten().collect(),
        })
    }

    #[instrument(skip(self), fields(project_id = %project, content_id = %content))]
    async fn add_item(&self, project: &NodeId, content: &NodeId) -> Result<NodeId, BoardApiError> {
        let variables = AddItemVariables {
            project_id: project.as_str(),
            content_id: content.as_str(),
        };
        let data: AddItemData = self.graphql(ADD_ITEM_MUTATION, variables).await?;

        data.add_item
            .and_then(|payload| payload.item)
            .map(|item| item.id)
            .ok_or_else(|| missing("added project item"))
    }

    #[instrument(skip(self, target), fields(project_id = %project, item_id = %item))]
    async fn set_single_select(
        &self,
        project: &NodeId,
        item: &NodeId,
        target: &StatusTarget,
    ) -> Result<(), BoardApiError> {
        let variables = SetStatusVariables {
            project_id: project.as_str(),
            item_id: item.as_str(),
            field_id: target.field_id.as_str(),
            option_id: &target.option_id,
        };
        let data: SetStatusData = self.graphql(SET_STATUS_MUTATION, variables).await?;

        data.update
            .and_then(|payload| payload.item)
            .map(|_| ())
            .ok_or_else(|| missing("updated project item"))
    }
}
