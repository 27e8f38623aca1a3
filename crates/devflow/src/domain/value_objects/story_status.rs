//! StoryStatus - Lifecycle state of a user story

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// User story status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StoryStatus {
    #[default]
    Draft,
    InProgress,
    Done,
    Archived,
}

impl std::fmt::Display for StoryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoryStatus::Draft => write!(f, "DRAFT"),
            StoryStatus::InProgress => write!(f, "IN_PROGRESS"),
            StoryStatus::Done => write!(f, "DONE"),
            StoryStatus::Archived => write!(f, "ARCHIVED"),
        }
    }
}

impl std::str::FromStr for StoryStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DRAFT" => Ok(StoryStatus::Draft),
            "IN_PROGRESS" => Ok(StoryStatus::InProgress),
            "DONE" => Ok(StoryStatus::Done),
            "ARCHIVED" => Ok(StoryStatus::Archived),
            _ => Err(DomainError::unknown_variant("story status", s)),
        }
    }
}
