use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use crate::application::{MemberRepository, MemberStorage};
use crate::domain::{DomainError, Member, MemberValidator};

/// Bare file names resolve inside `base_dir`; anything with a directory part is used as given.
fn resolve(base_dir: &Path, file: &Path) -> PathBuf {
    let is_bare = !file.is_absolute()
        && file
            .parent()
            .map_or(true, |parent| parent.as_os_str().is_empty());
    if is_bare {
        base_dir.join(file)
    } else {
        file.to_path_buf()
    }
}

/// Use case for loading a squad file into the repository.
pub struct ImportMembersUseCase {
    storage: Arc<dyn MemberStorage>,
    member_repo: Arc<dyn MemberRepository>,
    validator: MemberValidator,
    data_dir: PathBuf,
}

impl ImportMembersUseCase {
    pub fn new(
        storage: Arc<dyn MemberStorage>,
        member_repo: Arc<dyn MemberRepository>,
        data_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            storage,
            member_repo,
            validator: MemberValidator::new(),
            data_dir: data_dir.into(),
        }
    }

    /// Every record is validated before anything is stored.
    pub async fn execute(&self, file: &Path) -> Result<Vec<Member>, DomainError> {
        let path = resolve(&self.data_dir, file);
        info!("Importing members from {}", path.display());

        let members = self.storage.read(&path).await?;

        for (index, member) in members.iter().enumerate() {
            self.validator.validate(member).map_err(|e| match e {
                DomainError::InvalidInput(reason) => {
                    DomainError::invalid_input(format!("record {}: {}", index + 1, reason))
                }
                other => other,
            })?;
        }

        let stored = self.member_repo.save_batch(&members).await?;
        info!("Imported {} members", stored.len());
        Ok(stored)
    }
}

/// Use case for writing the whole squad to a file.
pub struct ExportMembersUseCase {
    storage: Arc<dyn MemberStorage>,
    member_repo: Arc<dyn MemberRepository>,
    backup_dir: PathBuf,
}

impl ExportMembersUseCase {
    pub fn new(
        storage: Arc<dyn MemberStorage>,
        member_repo: Arc<dyn MemberRepository>,
        backup_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            storage,
            member_repo,
            backup_dir: backup_dir.into(),
        }
    }

    /// Returns the number of members written.
    pub async fn execute(&self, file: &Path) -> Result<usize, DomainError> {
        let path = resolve(&self.backup_dir, file);
        let members = self.member_repo.find_all().await?;

        self.storage.write(&path, &members).await?;

        info!("Exported {} members to {}", members.len(), path.display());
        Ok(members.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_bare_names_against_base_dir() {
        let base = Path::new("/srv/data");
        assert_eq!(resolve(base, Path::new("squad.csv")), base.join("squad.csv"));
        assert_eq!(
            resolve(base, Path::new("other/squad.csv")),
            PathBuf::from("other/squad.csv")
        );
        assert_eq!(
            resolve(base, Path::new("/tmp/squad.csv")),
            PathBuf::from("/tmp/squad.csv")
        );
    }
}
