use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::debug;

use super::settings::Settings;
use crate::application::{MemberCache, MemberRepository, MemberStorage, UserRepository};
use crate::{
    AuthenticateUserUseCase, DuckdbMemberRepository, DuckdbUserRepository, ExportMembersUseCase,
    FileMemberStorage, ImportMembersUseCase, InMemoryMemberRepository, InMemoryUserRepository,
    ListMembersUseCase, ManageMembersUseCase, MokaMemberCache,
};

pub struct ContainerConfig {
    pub data_dir: PathBuf,
    pub backup_dir: PathBuf,
    pub images_dir: PathBuf,
    /// Relative paths are resolved inside `data_dir`.
    pub database_file: PathBuf,
    pub init_tables: bool,
    /// Keep members and users in process memory instead of DuckDB.
    pub memory_storage: bool,
    pub cache_size: u64,
    pub cache_ttl: Duration,
    pub bcrypt_cost: u32,
}

impl ContainerConfig {
    /// Builds the configuration from the settings file, with `data_dir` overriding
    /// `storage.data_dir` when given.
    pub fn from_settings(settings: &Settings, data_dir: Option<&str>, memory_storage: bool) -> Self {
        Self {
            data_dir: PathBuf::from(data_dir.unwrap_or(&settings.storage.data_dir)),
            backup_dir: PathBuf::from(&settings.storage.backup_dir),
            images_dir: PathBuf::from(&settings.storage.images_dir),
            database_file: PathBuf::from(&settings.database.file),
            init_tables: settings.database.init_tables,
            memory_storage,
            cache_size: settings.cache.size,
            cache_ttl: Duration::from_millis(settings.cache.expiration_ms),
            bcrypt_cost: settings.auth.bcrypt_cost,
        }
    }

    pub fn database_path(&self) -> PathBuf {
        if self.database_file.is_absolute() {
            self.database_file.clone()
        } else {
            self.data_dir.join(&self.database_file)
        }
    }
}

pub struct Container {
    member_repo: Arc<dyn MemberRepository>,
    user_repo: Arc<dyn UserRepository>,
    cache: Arc<dyn MemberCache>,
    storage: Arc<dyn MemberStorage>,
    config: ContainerConfig,
}

impl Container {
    pub async fn new(config: ContainerConfig) -> Result<Self> {
        for dir in [&config.data_dir, &config.backup_dir, &config.images_dir] {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create directory {}", dir.display()))?;
        }

        let (member_repo, user_repo): (Arc<dyn MemberRepository>, Arc<dyn UserRepository>) =
            if config.memory_storage {
                debug!("Using in-memory member and user storage");
                (
                    Arc::new(InMemoryMemberRepository::new()),
                    Arc::new(InMemoryUserRepository::new()),
                )
            } else {
                let db_path = config.database_path();
                debug!("Using DuckDB storage at {:?}", db_path);
                let members = DuckdbMemberRepository::new(&db_path, config.init_tables)?;
                // Share the connection with the user repository
                let users = DuckdbUserRepository::with_connection(
                    members.shared_connection(),
                    config.init_tables,
                )
                .await?;
                (Arc::new(members), Arc::new(users))
            };

        let cache = Arc::new(MokaMemberCache::new(config.cache_size, config.cache_ttl));

        Ok(Self {
            member_repo,
            user_repo,
            cache,
            storage: Arc::new(FileMemberStorage::new()),
            config,
        })
    }

    pub fn manage_members_use_case(&self) -> ManageMembersUseCase {
        ManageMembersUseCase::new(
            self.member_repo.clone(),
            self.cache.clone(),
            self.config.images_dir.clone(),
        )
    }

    pub fn list_use_case(&self) -> ListMembersUseCase {
        ListMembersUseCase::new(self.member_repo.clone())
    }

    pub fn import_use_case(&self) -> ImportMembersUseCase {
        ImportMembersUseCase::new(
            self.storage.clone(),
            self.member_repo.clone(),
            self.config.data_dir.clone(),
        )
    }

    pub fn export_use_case(&self) -> ExportMembersUseCase {
        ExportMembersUseCase::new(
            self.storage.clone(),
            self.member_repo.clone(),
            self.config.backup_dir.clone(),
        )
    }

    pub fn auth_use_case(&self) -> AuthenticateUserUseCase {
        AuthenticateUserUseCase::new(self.user_repo.clone(), self.config.bcrypt_cost)
    }

    pub fn data_dir(&self) -> &Path {
        &self.config.data_dir
    }
}
