use std::path::Path;

use async_trait::async_trait;

use crate::domain::{DomainError, Member};

/// Reads and writes member snapshots to files.
#[async_trait]
pub trait MemberStorage: Send + Sync {
    /// Fails with a storage error when the file does not exist or cannot be parsed.
    async fn read(&self, path: &Path) -> Result<Vec<Member>, DomainError>;

    /// Fails with a storage error when the parent directory does not exist.
    async fn write(&self, path: &Path, members: &[Member]) -> Result<(), DomainError>;
}
