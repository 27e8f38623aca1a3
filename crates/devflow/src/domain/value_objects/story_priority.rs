//! StoryPriority - Priority of a user story

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// User story priority
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StoryPriority {
    High,
    #[default]
    Medium,
    Low,
}

impl std::fmt::Display for StoryPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoryPriority::High => write!(f, "HIGH"),
            StoryPriority::Medium => write!(f, "MEDIUM"),
            StoryPriority::Low => write!(f, "LOW"),
        }
    }
}

impl std::str::FromStr for StoryPriority {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "HIGH" => Ok(StoryPriority::High),
            "MEDIUM" => Ok(StoryPriority::Medium),
            "LOW" => Ok(StoryPriority::Low),
            _ => Err(DomainError::unknown_variant("story priority", s)),
        }
    }
}
