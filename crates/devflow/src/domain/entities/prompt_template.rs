//! PromptTemplate - Reusable instruction template for AI-assisted flows

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{PromptLevel, PromptType};

/// A prompt template
///
/// The backend resolves an "effective" template per type by level
/// precedence USER > PROJECT > SYSTEM; the client only requests it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptTemplate {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub template_type: PromptType,
    pub level: PromptLevel,
    pub content: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub is_default: Option<bool>,
    pub enabled: bool,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_by: Option<String>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}
