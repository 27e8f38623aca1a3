//! Session - Client-side cache of the authenticated identity
//!
//! Not a security boundary. Fields are either all-empty (logged out) or
//! all-populated (logged in); `login` and `clear` are the only transitions
//! that cross between the two states.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::Role;

/// Authenticated user's client-side identity cache
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub id: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
    pub project_ids: Vec<String>,
}

impl Session {
    /// Create a logged-out session
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite every field with the given identity
    pub fn login(
        &mut self,
        id: impl Into<String>,
        username: impl Into<String>,
        email: impl Into<String>,
        role: Role,
        project_ids: Vec<String>,
    ) {
        self.id = Some(id.into());
        self.username = Some(username.into());
        self.email = Some(email.into());
        self.role = Some(role);
        self.project_ids = project_ids;
    }

    /// Mutate only the email field
    pub fn update_profile(&mut self, email: impl Into<String>) {
        self.email = Some(email.into());
    }

    /// Reset every field to its empty value
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_authenticated(&self) -> bool {
        self.id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_populates_all_fields() {
        let mut session = Session::new();
        session.login(
            "u-1",
            "alice",
            "alice@example.com",
            Role::Operator,
            vec!["p-1".to_string(), "p-2".to_string()],
        );

        assert_eq!(session.id.as_deref(), Some("u-1"));
        assert_eq!(session.username.as_deref(), Some("alice"));
        assert_eq!(session.email.as_deref(), Some("alice@example.com"));
        assert_eq!(session.role, Some(Role::Operator));
        assert_eq!(session.project_ids, vec!["p-1", "p-2"]);
        assert!(session.is_authenticated());
    }

    #[test]
    fn test_update_profile_touches_only_email() {
        let mut session = Session::new();
        session.login("u-1", "alice", "alice@example.com", Role::User, vec![]);
        session.update_profile("new@example.com");

        assert_eq!(session.email.as_deref(), Some("new@example.com"));
        assert_eq!(session.username.as_deref(), Some("alice"));
    }

    #[test]
    fn test_clear_empties_every_field() {
        let mut session = Session::new();
        session.login("u-1", "alice", "a@b.c", Role::Admin, vec!["p-1".to_string()]);
        session.clear();

        assert_eq!(session, Session::default());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_login_overwrites_previous_identity() {
        let mut session = Session::new();
        session.login("u-1", "alice", "a@b.c", Role::Admin, vec!["p-1".to_string()]);
        session.login("u-2", "bob", "b@b.c", Role::User, vec![]);

        assert_eq!(session.id.as_deref(), Some("u-2"));
        assert!(session.project_ids.is_empty());
    }
}
