use async_trait::async_trait;

use crate::domain::{DomainError, Member};

/// Persistence for squad members.
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// All members ordered by id.
    async fn find_all(&self) -> Result<Vec<Member>, DomainError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Member>, DomainError>;

    /// Insert a new member. The incoming id is ignored; the stored row is returned
    /// with its assigned id and fresh timestamps.
    async fn save(&self, member: &Member) -> Result<Member, DomainError>;

    /// Insert several members in a single transaction. Nothing is stored if one fails.
    async fn save_batch(&self, members: &[Member]) -> Result<Vec<Member>, DomainError>;

    /// Replace the member with the given id, keeping its creation time.
    /// Returns `None` when no such member exists.
    async fn update(&self, id: i64, member: &Member) -> Result<Option<Member>, DomainError>;

    /// Remove a member, returning what was removed.
    async fn delete(&self, id: i64) -> Result<Option<Member>, DomainError>;

    async fn count(&self) -> Result<u64, DomainError>;
}
