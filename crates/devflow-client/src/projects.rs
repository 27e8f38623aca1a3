//! Project management endpoints

use devflow::domain::{GitRepository, Project, ProjectManagementSystem, ProjectStatus};
use serde::Serialize;

use crate::client::{DetailResponse, DevFlowClient, ListResponse, MessageResponse};
use crate::error::ApiError;

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_repository: Option<GitRepository>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_management_system: Option<ProjectManagementSystem>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_repository: Option<GitRepository>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_management_system: Option<ProjectManagementSystem>,
}

#[derive(Debug, Clone, Default)]
pub struct ProjectListQuery {
    pub name: Option<String>,
    pub status: Option<ProjectStatus>,
}

impl ProjectListQuery {
    fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(name) = &self.name {
            params.push(("name", name.clone()));
        }
        if let Some(status) = self.status {
            params.push(("status", status.to_string()));
        }
        params
    }
}

impl DevFlowClient {
    pub async fn create_project(
        &self,
        request: &CreateProjectRequest,
    ) -> Result<Project, ApiError> {
        let response: DetailResponse<Project> = self.post_json("/projects", request).await?;
        Ok(response.data)
    }

    pub async fn get_project(&self, id: &str) -> Result<Project, ApiError> {
        let response: DetailResponse<Project> =
            self.get_json(&format!("/projects/{}", id), &[]).await?;
        Ok(response.data)
    }

    pub async fn list_projects(
        &self,
        query: &ProjectListQuery,
    ) -> Result<ListResponse<Project>, ApiError> {
        self.get_json("/projects", &query.to_params()).await
    }

    pub async fn update_project(
        &self,
        id: &str,
        request: &UpdateProjectRequest,
    ) -> Result<Project, ApiError> {
        let response: DetailResponse<Project> =
            self.put_json(&format!("/projects/{}", id), request).await?;
        Ok(response.data)
    }

    pub async fn delete_project(&self, id: &str) -> Result<MessageResponse, ApiError> {
        self.delete_json(&format!("/projects/{}", id)).await
    }
}
