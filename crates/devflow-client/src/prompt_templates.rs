//! Prompt template endpoints
//!
//! CRUD plus the precedence-resolution reads. These endpoints return bare
//! template payloads rather than the `{success, data}` envelope.

use devflow::domain::{PromptLevel, PromptTemplate, PromptType};
use serde::Serialize;

use crate::client::DevFlowClient;
use crate::error::ApiError;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptTemplateRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub template_type: PromptType,
    pub level: PromptLevel,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

fn type_param(template_type: Option<PromptType>) -> Vec<(&'static str, String)> {
    match template_type {
        Some(t) => vec![("type", t.to_string())],
        None => Vec::new(),
    }
}

impl DevFlowClient {
    /// Resolve the template the backend would use for `template_type`,
    /// honoring the USER > PROJECT > SYSTEM precedence
    pub async fn effective_template(
        &self,
        template_type: PromptType,
        project_id: Option<&str>,
    ) -> Result<PromptTemplate, ApiError> {
        let mut params = vec![("type", template_type.to_string())];
        if let Some(project_id) = project_id {
            params.push(("projectId", project_id.to_string()));
        }
        self.get_json("/prompt-templates/effective", &params).await
    }

    pub async fn system_default_template(
        &self,
        template_type: PromptType,
    ) -> Result<PromptTemplate, ApiError> {
        self.get_json(
            "/prompt-templates/system/default",
            &[("type", template_type.to_string())],
        )
        .await
    }

    pub async fn system_templates(
        &self,
        template_type: Option<PromptType>,
    ) -> Result<Vec<PromptTemplate>, ApiError> {
        self.get_json("/prompt-templates/system", &type_param(template_type))
            .await
    }

    pub async fn project_templates(
        &self,
        project_id: &str,
        template_type: Option<PromptType>,
    ) -> Result<Vec<PromptTemplate>, ApiError> {
        self.get_json(
            &format!("/prompt-templates/project/{}", project_id),
            &type_param(template_type),
        )
        .await
    }

    /// Templates owned by the calling user
    pub async fn my_templates(
        &self,
        template_type: Option<PromptType>,
    ) -> Result<Vec<PromptTemplate>, ApiError> {
        self.get_json(
            "/prompt-templates/user/my-templates",
            &type_param(template_type),
        )
        .await
    }

    pub async fn get_template(&self, id: &str) -> Result<PromptTemplate, ApiError> {
        self.get_json(&format!("/prompt-templates/{}", id), &[])
            .await
    }

    pub async fn create_template(
        &self,
        request: &PromptTemplateRequest,
    ) -> Result<PromptTemplate, ApiError> {
        self.post_json("/prompt-templates", request).await
    }

    pub async fn update_template(
        &self,
        id: &str,
        request: &PromptTemplateRequest,
    ) -> Result<PromptTemplate, ApiError> {
        self.put_json(&format!("/prompt-templates/{}", id), request)
            .await
    }

    pub async fn delete_template(&self, id: &str) -> Result<(), ApiError> {
        self.delete_unit(&format!("/prompt-templates/{}", id)).await
    }
}
