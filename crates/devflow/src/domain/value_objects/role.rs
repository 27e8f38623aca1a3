//! Role - Coarse access roles for DevFlow users

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// User role, consulted for coarse role-based access control
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Operator,
    User,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "ADMIN"),
            Role::Operator => write!(f, "OPERATOR"),
            Role::User => write!(f, "USER"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ADMIN" => Ok(Role::Admin),
            "OPERATOR" => Ok(Role::Operator),
            "USER" => Ok(Role::User),
            _ => Err(DomainError::unknown_variant("role", s)),
        }
    }
}
