use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Subcommand, ValueEnum};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check the configured credentials
    Login,

    /// Register an account (the first account is always an admin)
    AddUser {
        username: String,

        #[arg(long)]
        new_password: String,

        #[arg(long, value_enum, default_value_t = RoleArg::User)]
        role: RoleArg,
    },

    List {
        #[arg(long, value_enum)]
        role: Option<KindArg>,

        /// Case-insensitive search on the full name
        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long, value_enum)]
        sort: Option<SortArg>,

        #[arg(long)]
        desc: bool,
    },

    Show {
        id: i64,
    },

    AddPlayer(PlayerArgs),

    AddCoach(CoachArgs),

    UpdatePlayer {
        id: i64,

        #[command(flatten)]
        player: PlayerArgs,
    },

    UpdateCoach {
        id: i64,

        #[command(flatten)]
        coach: CoachArgs,
    },

    Delete {
        id: i64,
    },

    /// Copy an image into the images directory and assign it to a member
    SetImage {
        id: i64,

        file: PathBuf,
    },

    /// Load members from a .csv, .json, .xml or .bin file (bare names are looked up in the data dir)
    Import {
        file: PathBuf,
    },

    /// Write all members to a .csv, .json, .xml or .bin file (bare names go to the backup dir)
    Export {
        file: PathBuf,
    },

    Stats,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum RoleArg {
    Admin,
    User,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Players,
    Coaches,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Salary,
    Name,
}

#[derive(Args, Debug, Clone)]
pub struct MemberArgs {
    #[arg(long)]
    pub first_name: String,

    #[arg(long)]
    pub last_name: String,

    /// YYYY-MM-DD
    #[arg(long)]
    pub birth_date: NaiveDate,

    /// YYYY-MM-DD
    #[arg(long)]
    pub joined_on: NaiveDate,

    #[arg(long)]
    pub salary: f64,

    #[arg(long)]
    pub country: String,

    #[arg(long)]
    pub image: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct PlayerArgs {
    #[command(flatten)]
    pub member: MemberArgs,

    /// CENTROCAMPISTA, DELANTERO, PORTERO or DEFENSA
    #[arg(long)]
    pub position: String,

    #[arg(long)]
    pub number: i32,

    /// Metres
    #[arg(long)]
    pub height: f64,

    /// Kilograms
    #[arg(long)]
    pub weight: f64,

    #[arg(long, default_value = "0")]
    pub goals: i32,

    #[arg(long, default_value = "0")]
    pub matches: i32,

    #[arg(long, default_value = "0")]
    pub minutes: i32,
}

#[derive(Args, Debug, Clone)]
pub struct CoachArgs {
    #[command(flatten)]
    pub member: MemberArgs,

    /// ENTRENADOR_ASISTENTE, ENTRENADOR_PORTEROS or ENTRENADOR_PRINCIPAL
    #[arg(long)]
    pub specialty: String,
}

/// Username and password taken from the global flags or the environment.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Credentials {
    pub fn new(username: Option<String>, password: Option<String>) -> Self {
        Self { username, password }
    }
}
