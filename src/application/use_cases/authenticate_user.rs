use std::sync::Arc;

use tracing::{info, warn};

use crate::application::UserRepository;
use crate::domain::{check_credentials, DomainError, Session, User, UserRole};

const INVALID_CREDENTIALS: &str = "invalid username or password";

/// Use case for logging in and registering accounts.
pub struct AuthenticateUserUseCase {
    user_repo: Arc<dyn UserRepository>,
    bcrypt_cost: u32,
}

impl AuthenticateUserUseCase {
    pub fn new(user_repo: Arc<dyn UserRepository>, bcrypt_cost: u32) -> Self {
        Self {
            user_repo,
            bcrypt_cost,
        }
    }

    /// Every failure yields the same `Unauthorized` error.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, DomainError> {
        match self.try_login(username, password).await {
            Ok(session) => {
                info!("User {} logged in as {}", session.username(), session.role());
                Ok(session)
            }
            Err(e) => {
                warn!("Login failed for '{}': {}", username, e);
                Err(DomainError::unauthorized(INVALID_CREDENTIALS))
            }
        }
    }

    async fn try_login(&self, username: &str, password: &str) -> Result<Session, DomainError> {
        check_credentials(username, password)?;

        let user = self
            .user_repo
            .find_by_username(username)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("User not found: {}", username)))?;

        let password = password.to_string();
        let hash = user.password_hash().to_string();
        let verified = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| DomainError::internal(format!("Password check failed: {}", e)))?
            .map_err(|e| DomainError::internal(format!("Invalid password hash: {}", e)))?;

        if !verified {
            return Err(DomainError::unauthorized("wrong password"));
        }

        Ok(Session::new(user.username(), user.role()))
    }

    /// True while no account exists; the first account needs no session.
    pub async fn needs_bootstrap(&self) -> Result<bool, DomainError> {
        Ok(self.user_repo.count().await? == 0)
    }

    /// Registers an account on behalf of `actor`.
    ///
    /// The first account is always an admin and needs no actor; later ones need an admin.
    pub async fn register(
        &self,
        actor: Option<&Session>,
        username: &str,
        password: &str,
        role: UserRole,
    ) -> Result<User, DomainError> {
        let role = if self.needs_bootstrap().await? {
            if role != UserRole::Admin {
                info!("First account {} is registered as admin", username);
            }
            UserRole::Admin
        } else {
            actor
                .ok_or_else(|| DomainError::unauthorized("login required"))?
                .require_admin()?;
            role
        };

        check_credentials(username, password).map_err(|_| {
            DomainError::invalid_input(
                "username and password may only contain letters, digits, '_' and '@'",
            )
        })?;

        let password = password.to_string();
        let cost = self.bcrypt_cost;
        let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| DomainError::internal(format!("Password hashing failed: {}", e)))?
            .map_err(|e| DomainError::internal(format!("Password hashing failed: {}", e)))?;

        self.user_repo.save(&User::new(username, hash, role)).await
    }
}
