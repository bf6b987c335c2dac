// Request/response bodies for the remote store HTTP API.

use serde::{Deserialize, Serialize};

use crate::types::User;

/// Minimum password length enforced client-side before hitting the API.
pub const MIN_PASSWORD_LEN: usize = 8;

/// `POST /register` body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// `POST /login` body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response to both `/register` and `/login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthResponse {
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

/// `POST /files` body. The store assigns `_id` and `updatedAt`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SaveFileRequest {
    pub title: String,
    pub content: String,
}

/// Error body the store attaches to non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiErrorBody {
    pub error: String,
}

/// Client-side pre-validation failures for the auth forms.
///
/// The server remains authoritative; these only catch the cases the
/// original sign-up form rejected before submitting.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialError {
    #[error("all fields are required")]
    MissingField,
    #[error("password must be at least {MIN_PASSWORD_LEN} characters")]
    PasswordTooShort,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), CredentialError> {
        if self.name.trim().is_empty()
            || self.email.trim().is_empty()
            || self.password.is_empty()
        {
            return Err(CredentialError::MissingField);
        }
        if self.password.len() < MIN_PASSWORD_LEN {
            return Err(CredentialError::PasswordTooShort);
        }
        Ok(())
    }
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), CredentialError> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(CredentialError::MissingField);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(name: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn register_accepts_complete_credentials() {
        assert_eq!(register("Ada", "ada@example.com", "longenough").validate(), Ok(()));
    }

    #[test]
    fn register_rejects_blank_fields() {
        assert_eq!(
            register("  ", "ada@example.com", "longenough").validate(),
            Err(CredentialError::MissingField)
        );
        assert_eq!(
            register("Ada", "", "longenough").validate(),
            Err(CredentialError::MissingField)
        );
    }

    #[test]
    fn register_rejects_short_password() {
        assert_eq!(
            register("Ada", "ada@example.com", "short").validate(),
            Err(CredentialError::PasswordTooShort)
        );
    }

    #[test]
    fn auth_response_tolerates_missing_user() {
        let parsed: AuthResponse = serde_json::from_str(r#"{"token":"t1"}"#).unwrap();
        assert_eq!(parsed.token, "t1");
        assert!(parsed.user.is_none());
    }
}
