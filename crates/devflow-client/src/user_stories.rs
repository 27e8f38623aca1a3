//! User story CRUD and batch import endpoints

use devflow::domain::{ClarificationQA, StoryPriority, StoryStatus, UserStory};
use serde::{Deserialize, Serialize};

use crate::client::{DetailResponse, DevFlowClient, ListResponse, MessageResponse};
use crate::error::ApiError;

/// Create/update payload; also the row shape for batch import
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserStoryRequest {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub story_id: Option<String>,
    pub original_requirement: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clarification_qas: Option<Vec<ClarificationQA>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optimized_requirement: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_story: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acceptance_criteria: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technical_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<StoryStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<StoryPriority>,
}

/// Optional list filters forwarded as query parameters
#[derive(Debug, Clone, Default)]
pub struct StoryListQuery {
    pub project_id: Option<String>,
    pub owner_id: Option<String>,
    pub status: Option<StoryStatus>,
}

impl StoryListQuery {
    fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(project_id) = &self.project_id {
            params.push(("projectId", project_id.clone()));
        }
        if let Some(owner_id) = &self.owner_id {
            params.push(("ownerId", owner_id.clone()));
        }
        if let Some(status) = self.status {
            params.push(("status", status.to_string()));
        }
        params
    }
}

#[derive(Debug, Serialize)]
struct StatusPatch {
    status: StoryStatus,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchImportRequest<'a> {
    user_stories: &'a [CreateUserStoryRequest],
}

impl DevFlowClient {
    pub async fn create_user_story(
        &self,
        request: &CreateUserStoryRequest,
    ) -> Result<UserStory, ApiError> {
        let response: DetailResponse<UserStory> =
            self.post_json("/user-stories", request).await?;
        Ok(response.data)
    }

    pub async fn get_user_story(&self, id: &str) -> Result<UserStory, ApiError> {
        let response: DetailResponse<UserStory> = self
            .get_json(&format!("/user-stories/{}", id), &[])
            .await?;
        Ok(response.data)
    }

    pub async fn list_user_stories(
        &self,
        query: &StoryListQuery,
    ) -> Result<ListResponse<UserStory>, ApiError> {
        self.get_json("/user-stories", &query.to_params()).await
    }

    pub async fn update_user_story(
        &self,
        id: &str,
        request: &CreateUserStoryRequest,
    ) -> Result<UserStory, ApiError> {
        let response: DetailResponse<UserStory> = self
            .put_json(&format!("/user-stories/{}", id), request)
            .await?;
        Ok(response.data)
    }

    pub async fn update_user_story_status(
        &self,
        id: &str,
        status: StoryStatus,
    ) -> Result<UserStory, ApiError> {
        let response: DetailResponse<UserStory> = self
            .patch_json(&format!("/user-stories/{}/status", id), &StatusPatch { status })
            .await?;
        Ok(response.data)
    }

    pub async fn delete_user_story(&self, id: &str) -> Result<MessageResponse, ApiError> {
        self.delete_json(&format!("/user-stories/{}", id)).await
    }

    /// Download the spreadsheet template for batch import as raw bytes
    pub async fn download_import_template(&self) -> Result<Vec<u8>, ApiError> {
        self.get_bytes("/user-stories/batch-import/template").await
    }

    pub async fn batch_import_user_stories(
        &self,
        stories: &[CreateUserStoryRequest],
    ) -> Result<MessageResponse, ApiError> {
        self.post_json(
            "/user-stories/batch-import",
            &BatchImportRequest {
                user_stories: stories,
            },
        )
        .await
    }
}
