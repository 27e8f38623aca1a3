//! DevFlow Domain Library
//!
//! Core domain types for the DevFlow requirement management client.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain/`): Pure business entities and logic
//!   - `entities/`: Core domain models (User, Project, UserStory, PromptTemplate, Session)
//!   - `value_objects/`: Immutable value types (Role, PromptType, PromptLevel, ...)
//!   - `services/`: Side-effect-free domain services (template filtering)
//!   - `errors/`: Domain-specific error types
//!
//! # Usage
//!
//! ```rust,ignore
//! use devflow::domain::{PromptTemplate, Session};
//! use devflow::domain::services::{FilterOptions, TemplateFilter};
//! ```

pub mod domain;

// Re-export commonly used types
pub use domain::{
    ClarificationQA, DomainError, GitRepository, Project, ProjectManagementSystem, ProjectStatus,
    PromptLevel, PromptTemplate, PromptType, Provider, Role, Session, StoryPriority, StoryStatus,
    User, UserStory,
};
pub use domain::services::{
    group_by_level, group_by_type, statistics, FilterOptions, LevelGroups, TemplateFilter,
    TemplateStatistics, TypeGroups,
};
