//! Domain Entities
//!
//! Pure domain models without infrastructure dependencies.
//! - User: Account identity with role and project memberships
//! - Project: Grouping of user stories and members
//! - UserStory: Requirement record with AI-derived refinement fields
//! - PromptTemplate: Reusable instruction template for AI-assisted flows
//! - Session: Client-side cache of the authenticated identity

mod project;
mod prompt_template;
mod session;
mod user;
mod user_story;

pub use project::*;
pub use prompt_template::*;
pub use session::*;
pub use user::*;
pub use user_story::*;
