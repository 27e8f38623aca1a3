//! User management endpoints

use devflow::domain::{Role, User};
use serde::Serialize;

use crate::client::{DetailResponse, DevFlowClient, ListResponse, MessageResponse};
use crate::error::ApiError;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_ids: Option<Vec<String>>,
}

/// Update payload; password stays unchanged when omitted
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub username: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_ids: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default)]
pub struct UserListQuery {
    pub role: Option<Role>,
    pub project_id: Option<String>,
}

impl UserListQuery {
    fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(role) = self.role {
            params.push(("role", role.to_string()));
        }
        if let Some(project_id) = &self.project_id {
            params.push(("projectId", project_id.clone()));
        }
        params
    }
}

impl DevFlowClient {
    pub async fn create_user(&self, request: &CreateUserRequest) -> Result<User, ApiError> {
        let response: DetailResponse<User> = self.post_json("/users", request).await?;
        Ok(response.data)
    }

    pub async fn get_user(&self, id: &str) -> Result<User, ApiError> {
        let response: DetailResponse<User> = self.get_json(&format!("/users/{}", id), &[]).await?;
        Ok(response.data)
    }

    pub async fn list_users(&self, query: &UserListQuery) -> Result<ListResponse<User>, ApiError> {
        self.get_json("/users", &query.to_params()).await
    }

    pub async fn update_user(
        &self,
        id: &str,
        request: &UpdateUserRequest,
    ) -> Result<User, ApiError> {
        let response: DetailResponse<User> =
            self.put_json(&format!("/users/{}", id), request).await?;
        Ok(response.data)
    }

    pub async fn delete_user(&self, id: &str) -> Result<MessageResponse, ApiError> {
        self.delete_json(&format!("/users/{}", id)).await
    }
}
