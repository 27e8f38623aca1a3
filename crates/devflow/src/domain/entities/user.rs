//! User - Account identity as returned by the backend

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::Role;

/// A DevFlow user account
///
/// Matches both the `/auth/me` payload and the user-management payloads;
/// audit fields are absent on the former. Timestamps are zone-less because
/// the backend serializes `LocalDateTime` without an offset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    pub role: Role,
    #[serde(default)]
    pub project_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}
