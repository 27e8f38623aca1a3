//! PromptType - What a prompt template is used for

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Prompt template type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PromptType {
    RequirementClarification,
    RequirementOptimization,
}

impl std::fmt::Display for PromptType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PromptType::RequirementClarification => write!(f, "REQUIREMENT_CLARIFICATION"),
            PromptType::RequirementOptimization => write!(f, "REQUIREMENT_OPTIMIZATION"),
        }
    }
}

impl std::str::FromStr for PromptType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "REQUIREMENT_CLARIFICATION" => Ok(PromptType::RequirementClarification),
            "REQUIREMENT_OPTIMIZATION" => Ok(PromptType::RequirementOptimization),
            _ => Err(DomainError::unknown_variant("prompt type", s)),
        }
    }
}
