use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::application::UserRepository;
use crate::domain::{DomainError, User};

pub struct InMemoryUserRepository {
    users: Arc<Mutex<HashMap<String, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.lock().await;
        Ok(users.get(username).cloned())
    }

    async fn save(&self, user: &User) -> Result<User, DomainError> {
        let mut users = self.users.lock().await;
        if users.contains_key(user.username()) {
            return Err(DomainError::already_exists(format!(
                "User '{}' already exists",
                user.username()
            )));
        }
        users.insert(user.username().to_string(), user.clone());
        Ok(user.clone())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let users = self.users.lock().await;
        Ok(users.len() as u64)
    }
}
