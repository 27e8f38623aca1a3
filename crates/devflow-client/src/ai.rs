//! AI-assisted requirement refinement endpoints
//!
//! The backend's provider integration is opaque to this client; requests
//! only carry an optional [`Provider`] selector.

use devflow::domain::{ClarificationQA, Provider};
use serde::{Deserialize, Serialize};

use crate::client::DevFlowClient;
use crate::error::ApiError;

/// One clarification question proposed by the AI
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClarificationQuestion {
    pub id: String,
    pub question: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementClarificationRequest {
    pub original_requirement: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_template_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<Provider>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementClarificationResponse {
    pub questions: Vec<ClarificationQuestion>,
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementOptimizationRequest {
    pub original_requirement: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_template_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<Provider>,
    pub clarification_answers: Vec<ClarificationQA>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementOptimizationResponse {
    pub optimized_requirement: String,
    pub user_story: String,
    pub acceptance_criteria: String,
    pub technical_notes: String,
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStoryOptimizationRequest {
    pub description: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_requirements: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<Provider>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStoryOptimizationResponse {
    pub optimized_description: String,
    pub acceptance_criteria: String,
    pub definition_of_done: String,
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCaseGenerationRequest {
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optimized_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<Provider>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCaseGenerationResponse {
    pub test_cases: Vec<String>,
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl DevFlowClient {
    /// Ask the AI for clarification questions about a raw requirement
    pub async fn clarify_requirement(
        &self,
        request: &RequirementClarificationRequest,
    ) -> Result<RequirementClarificationResponse, ApiError> {
        self.post_json("/ai/clarify-requirement", request).await
    }

    /// Turn a requirement plus answered questions into an optimized story
    pub async fn optimize_requirement(
        &self,
        request: &RequirementOptimizationRequest,
    ) -> Result<RequirementOptimizationResponse, ApiError> {
        self.post_json("/ai/optimize-requirement", request).await
    }

    pub async fn optimize_user_story(
        &self,
        request: &UserStoryOptimizationRequest,
    ) -> Result<UserStoryOptimizationResponse, ApiError> {
        self.post_json("/ai/optimize-user-story", request).await
    }

    pub async fn generate_test_cases(
        &self,
        request: &TestCaseGenerationRequest,
    ) -> Result<TestCaseGenerationResponse, ApiError> {
        self.post_json("/ai/generate-test-cases", request).await
    }
}
