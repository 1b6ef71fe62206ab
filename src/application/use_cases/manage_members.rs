use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::application::{MemberCache, MemberRepository};
use crate::domain::{DomainError, Member, MemberValidator};

/// Use case for the member CRUD operations, with a lookaside cache in front of the repository.
pub struct ManageMembersUseCase {
    member_repo: Arc<dyn MemberRepository>,
    cache: Arc<dyn MemberCache>,
    validator: MemberValidator,
    images_dir: PathBuf,
}

impl ManageMembersUseCase {
    pub fn new(
        member_repo: Arc<dyn MemberRepository>,
        cache: Arc<dyn MemberCache>,
        images_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            member_repo,
            cache,
            validator: MemberValidator::new(),
            images_dir: images_dir.into(),
        }
    }

    pub async fn get_all(&self) -> Result<Vec<Member>, DomainError> {
        self.member_repo.find_all().await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Member, DomainError> {
        if let Some(member) = self.cache.get(id) {
            debug!("Member {} served from cache", id);
            return Ok(member);
        }

        let member = self
            .member_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Member not found: {}", id)))?;

        self.cache.put(id, member.clone());
        Ok(member)
    }

    pub async fn save(&self, member: &Member) -> Result<Member, DomainError> {
        self.validator.validate(member)?;
        let stored = self.member_repo.save(member).await?;
        info!("Added {} with id {}", stored.summary(), stored.id());
        Ok(stored)
    }

    pub async fn update(&self, id: i64, member: &Member) -> Result<Member, DomainError> {
        self.validator.validate(member)?;
        let updated = self
            .member_repo
            .update(id, member)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Member not found: {}", id)))?;

        self.cache.invalidate(id);
        info!("Updated member {}", id);
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<Member, DomainError> {
        let deleted = self
            .member_repo
            .delete(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Member not found: {}", id)))?;

        self.cache.invalidate(id);
        info!("Deleted {}", deleted.summary());
        Ok(deleted)
    }

    /// Copies `source` into the images directory as `<id>-<uuid>.<ext>` and points the member at it.
    pub async fn update_image(&self, id: i64, source: &Path) -> Result<Member, DomainError> {
        if !source.is_file() {
            return Err(DomainError::not_found(format!(
                "Image file not found: {}",
                source.display()
            )));
        }

        let member = self.get_by_id(id).await?;

        let extension = source
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("png");
        let target = self
            .images_dir
            .join(format!("{}-{}.{}", id, Uuid::new_v4(), extension));

        tokio::fs::copy(source, &target).await.map_err(|e| {
            DomainError::storage(format!(
                "Failed to copy image to {}: {}",
                target.display(),
                e
            ))
        })?;

        let image = target.to_string_lossy().into_owned();
        let updated = match self.member_repo.update(id, &member.with_image(image)).await {
            Ok(Some(updated)) => updated,
            outcome => {
                if let Err(e) = tokio::fs::remove_file(&target).await {
                    warn!("Failed to remove unused image {}: {}", target.display(), e);
                }
                return Err(outcome.err().unwrap_or_else(|| {
                    DomainError::not_found(format!("Member not found: {}", id))
                }));
            }
        };

        self.cache.invalidate(id);
        info!("Member {} now uses image {}", id, updated.image());
        Ok(updated)
    }
}
