use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::Role;

/// Caller identity recovered from a verified token.
///
/// Request-scoped; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Subject email
    pub email: String,
    pub role: Role,
    /// Present when the token carried the `uid` claim
    pub user_id: Option<Uuid>,
}

impl Identity {
    pub fn new(email: impl Into<String>, role: Role) -> Self {
        Self {
            email: email.into(),
            role,
            user_id: None,
        }
    }

    pub fn with_user_id(mut self, user_id: Uuid) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn is_staff(&self) -> bool {
        self.role == Role::Staff
    }
}
