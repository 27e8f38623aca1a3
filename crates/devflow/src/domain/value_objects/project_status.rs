//! ProjectStatus - Lifecycle state of a project

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Project status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    #[default]
    Active,
    Archived,
    Deleted,
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectStatus::Active => write!(f, "ACTIVE"),
            ProjectStatus::Archived => write!(f, "ARCHIVED"),
            ProjectStatus::Deleted => write!(f, "DELETED"),
        }
    }
}

impl std::str::FromStr for ProjectStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ACTIVE" => Ok(ProjectStatus::Active),
            "ARCHIVED" => Ok(ProjectStatus::Archived),
            "DELETED" => Ok(ProjectStatus::Deleted),
            _ => Err(DomainError::unknown_variant("project status", s)),
        }
    }
}
