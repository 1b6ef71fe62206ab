use async_trait::async_trait;

use crate::domain::{DomainError, User};

/// Persistence for application accounts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Fails with `AlreadyExists` when the username is taken.
    async fn save(&self, user: &User) -> Result<User, DomainError>;

    async fn count(&self) -> Result<u64, DomainError>;
}
