use anyhow::{bail, Result};

use crate::cli::{Credentials, RoleArg};
use crate::{Session, UserRole};

use super::super::Container;

pub struct UserController<'a> {
    container: &'a Container,
}

impl<'a> UserController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn authenticate(&self, credentials: &Credentials) -> Result<Session> {
        let (Some(username), Some(password)) = (&credentials.username, &credentials.password)
        else {
            bail!("login required: pass --user and --password (or set NEWTEAM_USER and NEWTEAM_PASSWORD)");
        };

        let use_case = self.container.auth_use_case();
        Ok(use_case.login(username, password).await?)
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<String> {
        let session = self.authenticate(credentials).await?;
        Ok(format!(
            "Logged in as {} ({})",
            session.username(),
            session.role()
        ))
    }

    pub async fn add_user(
        &self,
        credentials: &Credentials,
        username: String,
        password: String,
        role: RoleArg,
    ) -> Result<String> {
        let use_case = self.container.auth_use_case();

        let session = if use_case.needs_bootstrap().await? {
            None
        } else {
            Some(self.authenticate(credentials).await?)
        };

        let role = match role {
            RoleArg::Admin => UserRole::Admin,
            RoleArg::User => UserRole::User,
        };

        let user = use_case
            .register(session.as_ref(), &username, &password, role)
            .await?;
        Ok(format!(
            "Registered user {} ({})",
            user.username(),
            user.role()
        ))
    }
}
