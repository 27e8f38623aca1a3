//! UserStory - Requirement record with AI-derived refinement fields

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{StoryPriority, StoryStatus};

/// One answered clarification question attached to a story
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClarificationQA {
    pub question_id: String,
    pub question: String,
    pub answer: String,
    pub category: String,
}

/// A user story
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStory {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub project_id: Option<String>,
    /// ID from an external project management system (e.g. Zentao)
    #[serde(default)]
    pub story_id: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// The requirement as originally captured
    pub original_requirement: String,
    /// Business context given to the AI alongside the requirement
    #[serde(default)]
    pub project_context: Option<String>,
    #[serde(default)]
    pub clarification_qas: Vec<ClarificationQA>,
    #[serde(default)]
    pub optimized_requirement: Option<String>,
    /// The "as a / I want / so that" narrative derived by the AI
    #[serde(default)]
    pub user_story: Option<String>,
    #[serde(default)]
    pub acceptance_criteria: Option<String>,
    #[serde(default)]
    pub technical_notes: Option<String>,
    pub status: StoryStatus,
    #[serde(default)]
    pub priority: Option<StoryPriority>,
    pub owner_id: String,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_by: Option<String>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}
