use chrono::{Local, NaiveDate};
use tracing::debug;

use crate::domain::{DomainError, Member, PlayerStats};

/// Business rules a member must satisfy before it is persisted.
#[derive(Debug, Clone, Default)]
pub struct MemberValidator;

impl MemberValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate<'a>(&self, member: &'a Member) -> Result<&'a Member, DomainError> {
        self.validate_at(member, Local::now().date_naive())
    }

    /// Validates against an explicit "today", the upper bound for every date.
    pub fn validate_at<'a>(
        &self,
        member: &'a Member,
        today: NaiveDate,
    ) -> Result<&'a Member, DomainError> {
        debug!("Validating member {}", member.full_name());

        if member.first_name().trim().is_empty() {
            return Err(DomainError::invalid_input("first name cannot be blank"));
        }

        if member.last_name().trim().is_empty() {
            return Err(DomainError::invalid_input("last name cannot be blank"));
        }

        if member.birth_date() > today {
            return Err(DomainError::invalid_input(
                "birth date cannot be in the future",
            ));
        }

        if member.joined_on() > today {
            return Err(DomainError::invalid_input("join date cannot be in the future"));
        }

        if member.joined_on() < member.birth_date() {
            return Err(DomainError::invalid_input(
                "join date cannot be earlier than the birth date",
            ));
        }

        if !member.salary().is_finite() || member.salary() < 0.0 {
            return Err(DomainError::invalid_input("salary cannot be negative"));
        }

        if member.country().trim().is_empty() {
            return Err(DomainError::invalid_input("country cannot be blank"));
        }

        if let Some(stats) = member.player_stats() {
            self.validate_player(stats)?;
        }

        Ok(member)
    }

    fn validate_player(&self, stats: &PlayerStats) -> Result<(), DomainError> {
        if !(1..=99).contains(&stats.number) {
            return Err(DomainError::invalid_input(
                "shirt number must be between 1 and 99",
            ));
        }

        if !(0.0..=3.0).contains(&stats.height) {
            return Err(DomainError::invalid_input(
                "height must be between 0 and 3 metres",
            ));
        }

        if !stats.weight.is_finite() || stats.weight < 0.0 {
            return Err(DomainError::invalid_input("weight cannot be negative"));
        }

        if stats.goals < 0 {
            return Err(DomainError::invalid_input("goals cannot be negative"));
        }

        if stats.matches_played < 0 {
            return Err(DomainError::invalid_input(
                "matches played cannot be negative",
            ));
        }

        if stats.minutes_played < 0 {
            return Err(DomainError::invalid_input(
                "minutes played cannot be negative",
            ));
        }

        Ok(())
    }
}
