use crate::helpers::{hash_password, PasswordError};
use crate::models;
use serde::{Deserialize, Serialize};
use serde_valid::Validate;

/// Fields of a user that may be changed through the API. Anything else in the
/// request body is rejected during deserialization.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UserPatch {
    #[validate(min_length = 3)]
    #[validate(max_length = 50)]
    #[validate(pattern = r"^[A-Za-z0-9_.\-]+$")]
    pub username: Option<String>,
    #[validate(max_length = 100)]
    #[validate(pattern = r"\S")]
    pub name: Option<String>,
    #[validate(max_length = 254)]
    #[validate(pattern = r"^[^@\s]+@[^@\s]+\.[^@\s]+$")]
    pub email: Option<String>,
    #[validate(min_length = 8)]
    #[validate(max_length = 128)]
    pub password: Option<String>,
    pub role: Option<models::Role>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.name.is_none()
            && self.email.is_none()
            && self.password.is_none()
            && self.role.is_none()
    }

    /// Applies the patch, hashing a new password before it touches the model.
    pub fn apply(self, user: &mut models::User) -> Result<(), PasswordError> {
        if let Some(password) = self.password {
            user.password = hash_password(&password)?;
        }
        if let Some(username) = self.username {
            user.username = username.trim().to_string();
        }
        if let Some(name) = self.name {
            user.name = name.trim().to_string();
        }
        if let Some(email) = self.email {
            user.email = email.trim().to_lowercase();
        }
        if let Some(role) = self.role {
            user.role = role;
        }

        Ok(())
    }
}
