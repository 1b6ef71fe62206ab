use std::path::PathBuf;

use anyhow::Result;
use tracing::debug;

use crate::cli::{CoachArgs, Commands, Credentials, KindArg, PlayerArgs, SortArg};

use super::container::Container;
use super::controller::{ListController, MemberController, TransferController, UserController};

pub struct Router<'a> {
    user_controller: UserController<'a>,
    member_controller: MemberController<'a>,
    list_controller: ListController<'a>,
    transfer_controller: TransferController<'a>,
}

impl<'a> Router<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self {
            user_controller: UserController::new(container),
            member_controller: MemberController::new(container),
            list_controller: ListController::new(container),
            transfer_controller: TransferController::new(container),
        }
    }

    /// Reads need any session; changes, imports and exports need an admin.
    /// `add-user` does its own check so the first account can be created.
    pub async fn route(&self, command: Commands, credentials: &Credentials) -> Result<String> {
        match command {
            Commands::Login => self.user_controller.login(credentials).await,
            Commands::AddUser {
                username,
                new_password,
                role,
            } => {
                self.user_controller
                    .add_user(credentials, username, new_password, role)
                    .await
            }
            Commands::List {
                role,
                name,
                sort,
                desc,
            } => {
                let query = SquadCommand::List {
                    role,
                    name,
                    sort,
                    desc,
                };
                self.route_authenticated(query, credentials).await
            }
            Commands::Stats => self.route_authenticated(SquadCommand::Stats, credentials).await,
            Commands::Show { id } => {
                self.route_authenticated(SquadCommand::Show { id }, credentials)
                    .await
            }
            Commands::AddPlayer(args) => {
                self.route_authenticated(SquadCommand::AddPlayer(args), credentials)
                    .await
            }
            Commands::AddCoach(args) => {
                self.route_authenticated(SquadCommand::AddCoach(args), credentials)
                    .await
            }
            Commands::UpdatePlayer { id, player } => {
                self.route_authenticated(SquadCommand::UpdatePlayer { id, player }, credentials)
                    .await
            }
            Commands::UpdateCoach { id, coach } => {
                self.route_authenticated(SquadCommand::UpdateCoach { id, coach }, credentials)
                    .await
            }
            Commands::Delete { id } => {
                self.route_authenticated(SquadCommand::Delete { id }, credentials)
                    .await
            }
            Commands::SetImage { id, file } => {
                self.route_authenticated(SquadCommand::SetImage { id, file }, credentials)
                    .await
            }
            Commands::Import { file } => {
                self.route_authenticated(SquadCommand::Import { file }, credentials)
                    .await
            }
            Commands::Export { file } => {
                self.route_authenticated(SquadCommand::Export { file }, credentials)
                    .await
            }
        }
    }

    async fn route_authenticated(
        &self,
        command: SquadCommand,
        credentials: &Credentials,
    ) -> Result<String> {
        let session = self.user_controller.authenticate(credentials).await?;
        if command.requires_admin() {
            session.require_admin()?;
        }
        debug!("Running {:?} as {}", command, session.username());

        match command {
            SquadCommand::List {
                role,
                name,
                sort,
                desc,
            } => self.list_controller.list(role, name, sort, desc).await,
            SquadCommand::Stats => self.list_controller.stats().await,
            SquadCommand::Show { id } => self.member_controller.show(id).await,
            SquadCommand::AddPlayer(args) => self.member_controller.add_player(args).await,
            SquadCommand::AddCoach(args) => self.member_controller.add_coach(args).await,
            SquadCommand::UpdatePlayer { id, player } => {
                self.member_controller.update_player(id, player).await
            }
            SquadCommand::UpdateCoach { id, coach } => {
                self.member_controller.update_coach(id, coach).await
            }
            SquadCommand::Delete { id } => self.member_controller.delete(id).await,
            SquadCommand::SetImage { id, file } => {
                self.member_controller.set_image(id, file).await
            }
            SquadCommand::Import { file } => self.transfer_controller.import(file).await,
            SquadCommand::Export { file } => self.transfer_controller.export(file).await,
        }
    }
}

/// Commands that run under an authenticated session.
#[derive(Debug)]
enum SquadCommand {
    List {
        role: Option<KindArg>,
        name: Option<String>,
        sort: Option<SortArg>,
        desc: bool,
    },
    Stats,
    Show {
        id: i64,
    },
    AddPlayer(PlayerArgs),
    AddCoach(CoachArgs),
    UpdatePlayer {
        id: i64,
        player: PlayerArgs,
    },
    UpdateCoach {
        id: i64,
        coach: CoachArgs,
    },
    Delete {
        id: i64,
    },
    SetImage {
        id: i64,
        file: PathBuf,
    },
    Import {
        file: PathBuf,
    },
    Export {
        file: PathBuf,
    },
}

impl SquadCommand {
    fn requires_admin(&self) -> bool {
        !matches!(
            self,
            SquadCommand::List { .. } | SquadCommand::Show { .. } | SquadCommand::Stats
        )
    }
}
