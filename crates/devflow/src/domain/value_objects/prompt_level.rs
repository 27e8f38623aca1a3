//! PromptLevel - Precedence level of a prompt template
//!
//! Templates are resolved server-side by precedence USER > PROJECT > SYSTEM.

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Prompt template level
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PromptLevel {
    System,
    Project,
    User,
}

impl std::fmt::Display for PromptLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PromptLevel::System => write!(f, "SYSTEM"),
            PromptLevel::Project => write!(f, "PROJECT"),
            PromptLevel::User => write!(f, "USER"),
        }
    }
}

impl std::str::FromStr for PromptLevel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "SYSTEM" => Ok(PromptLevel::System),
            "PROJECT" => Ok(PromptLevel::Project),
            "USER" => Ok(PromptLevel::User),
            _ => Err(DomainError::unknown_variant("prompt level", s)),
        }
    }
}
