use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::application::MemberRepository;
use crate::domain::{current_timestamp, DomainError, Member};

#[derive(Default)]
struct Store {
    next_id: i64,
    members: BTreeMap<i64, Member>,
}

impl Store {
    fn insert(&mut self, member: &Member) -> Member {
        self.next_id += 1;
        let mut stored = member.clone().with_id(self.next_id);
        stored.stamp_created(current_timestamp());
        self.members.insert(stored.id(), stored.clone());
        stored
    }
}

/// Volatile member store used with `--memory-storage` and in tests.
pub struct InMemoryMemberRepository {
    store: Arc<Mutex<Store>>,
}

impl InMemoryMemberRepository {
    pub fn new() -> Self {
        Self {
            store: Arc::new(Mutex::new(Store::default())),
        }
    }
}

impl Default for InMemoryMemberRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MemberRepository for InMemoryMemberRepository {
    async fn find_all(&self) -> Result<Vec<Member>, DomainError> {
        let store = self.store.lock().await;
        Ok(store.members.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Member>, DomainError> {
        let store = self.store.lock().await;
        Ok(store.members.get(&id).cloned())
    }

    async fn save(&self, member: &Member) -> Result<Member, DomainError> {
        let mut store = self.store.lock().await;
        let stored = store.insert(member);
        debug!("Saved member {} in memory", stored.id());
        Ok(stored)
    }

    async fn save_batch(&self, members: &[Member]) -> Result<Vec<Member>, DomainError> {
        let mut store = self.store.lock().await;
        let stored: Vec<Member> = members.iter().map(|m| store.insert(m)).collect();
        debug!("Saved {} members in memory", stored.len());
        Ok(stored)
    }

    async fn update(&self, id: i64, member: &Member) -> Result<Option<Member>, DomainError> {
        let mut store = self.store.lock().await;
        let Some(existing) = store.members.get(&id) else {
            return Ok(None);
        };

        let mut updated = member
            .clone()
            .with_id(id)
            .with_timestamps(existing.created_at(), existing.updated_at());
        updated.stamp_updated(current_timestamp());
        store.members.insert(id, updated.clone());
        Ok(Some(updated))
    }

    async fn delete(&self, id: i64) -> Result<Option<Member>, DomainError> {
        let mut store = self.store.lock().await;
        Ok(store.members.remove(&id))
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let store = self.store.lock().await;
        Ok(store.members.len() as u64)
    }
}
