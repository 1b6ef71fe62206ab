use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{Position, Specialty};
use crate::domain::DomainError;

pub const DEFAULT_IMAGE: &str = "media/profile_picture.png";

/// Discriminates members without looking at role data.
/// `as_str` yields the role label stored in the database and in squad files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemberKind {
    Player,
    Coach,
}

impl MemberKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberKind::Player => "Jugador",
            MemberKind::Coach => "Entrenador",
        }
    }

    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s.trim() {
            "Jugador" => Ok(MemberKind::Player),
            "Entrenador" => Ok(MemberKind::Coach),
            other => Err(DomainError::invalid_input(format!(
                "Unknown member role '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub position: Position,
    pub number: i32,
    /// Metres.
    pub height: f64,
    /// Kilograms.
    pub weight: f64,
    pub goals: i32,
    pub matches_played: i32,
    pub minutes_played: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberRole {
    Player(PlayerStats),
    Coach(Specialty),
}

impl MemberRole {
    pub fn kind(&self) -> MemberKind {
        match self {
            MemberRole::Player(_) => MemberKind::Player,
            MemberRole::Coach(_) => MemberKind::Coach,
        }
    }
}

/// A member of the squad, either a player or a coach.
///
/// The id is 0 until the member has been persisted; the repository assigns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    id: i64,
    first_name: String,
    last_name: String,
    birth_date: NaiveDate,
    joined_on: NaiveDate,
    salary: f64,
    country: String,
    image: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
    role: MemberRole,
}

impl Member {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        birth_date: NaiveDate,
        joined_on: NaiveDate,
        salary: f64,
        country: impl Into<String>,
        role: MemberRole,
    ) -> Self {
        let now = current_timestamp();
        Self {
            id: 0,
            first_name: first_name.into(),
            last_name: last_name.into(),
            birth_date,
            joined_on,
            salary,
            country: country.into(),
            image: DEFAULT_IMAGE.to_string(),
            created_at: now,
            updated_at: now,
            role,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Restores persisted timestamps (used by adapters).
    pub fn with_timestamps(mut self, created_at: NaiveDateTime, updated_at: NaiveDateTime) -> Self {
        self.created_at = created_at;
        self.updated_at = updated_at;
        self
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    pub fn joined_on(&self) -> NaiveDate {
        self.joined_on
    }

    pub fn salary(&self) -> f64 {
        self.salary
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    pub fn updated_at(&self) -> NaiveDateTime {
        self.updated_at
    }

    pub fn role(&self) -> &MemberRole {
        &self.role
    }

    pub fn kind(&self) -> MemberKind {
        self.role.kind()
    }

    pub fn is_player(&self) -> bool {
        matches!(self.role, MemberRole::Player(_))
    }

    pub fn is_coach(&self) -> bool {
        matches!(self.role, MemberRole::Coach(_))
    }

    pub fn player_stats(&self) -> Option<&PlayerStats> {
        match &self.role {
            MemberRole::Player(stats) => Some(stats),
            MemberRole::Coach(_) => None,
        }
    }

    pub fn specialty(&self) -> Option<Specialty> {
        match &self.role {
            MemberRole::Coach(specialty) => Some(*specialty),
            MemberRole::Player(_) => None,
        }
    }

    /// Marks the member as freshly created at `now`.
    pub fn stamp_created(&mut self, now: NaiveDateTime) {
        self.created_at = now;
        self.updated_at = now;
    }

    pub fn stamp_updated(&mut self, now: NaiveDateTime) {
        self.updated_at = now;
    }

    pub fn summary(&self) -> String {
        match &self.role {
            MemberRole::Player(stats) => format!(
                "{} ({} #{}, {})",
                self.full_name(),
                stats.position,
                stats.number,
                self.country
            ),
            MemberRole::Coach(specialty) => {
                format!("{} ({}, {})", self.full_name(), specialty, self.country)
            }
        }
    }
}

pub fn current_timestamp() -> NaiveDateTime {
    Local::now().naive_local()
}
