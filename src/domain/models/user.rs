use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    #[default]
    User,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::User => "user",
        }
    }

    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(UserRole::Admin),
            "user" => Ok(UserRole::User),
            other => Err(DomainError::invalid_input(format!(
                "Unknown user role '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered account. Only the bcrypt hash of the password is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    username: String,
    password_hash: String,
    role: UserRole,
}

impl User {
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>, role: UserRole) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
            role,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn role(&self) -> UserRole {
        self.role
    }
}

/// The authenticated user a command runs as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    username: String,
    role: UserRole,
}

impl Session {
    pub fn new(username: impl Into<String>, role: UserRole) -> Self {
        Self {
            username: username.into(),
            role,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn role(&self) -> UserRole {
        self.role
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    pub fn require_admin(&self) -> Result<(), DomainError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(DomainError::unauthorized(format!(
                "user '{}' is not an administrator",
                self.username
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_admin() {
        assert!(Session::new("admin", UserRole::Admin).require_admin().is_ok());

        let err = Session::new("user", UserRole::User)
            .require_admin()
            .unwrap_err();
        assert!(err.is_unauthorized());
    }

    #[test]
    fn test_user_role_parse() {
        assert_eq!(UserRole::parse("ADMIN").unwrap(), UserRole::Admin);
        assert_eq!(UserRole::parse("user").unwrap(), UserRole::User);
        assert!(UserRole::parse("root").is_err());
    }
}
