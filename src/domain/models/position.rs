use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Where a player plays. The serialized names are the ones found in squad files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "CENTROCAMPISTA")]
    Midfielder,
    #[serde(rename = "DELANTERO")]
    Forward,
    #[serde(rename = "PORTERO")]
    Goalkeeper,
    #[serde(rename = "DEFENSA")]
    Defender,
}

impl Position {
    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Midfielder => "CENTROCAMPISTA",
            Position::Forward => "DELANTERO",
            Position::Goalkeeper => "PORTERO",
            Position::Defender => "DEFENSA",
        }
    }

    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s.trim().to_uppercase().as_str() {
            "CENTROCAMPISTA" => Ok(Position::Midfielder),
            "DELANTERO" => Ok(Position::Forward),
            "PORTERO" => Ok(Position::Goalkeeper),
            "DEFENSA" => Ok(Position::Defender),
            other => Err(DomainError::invalid_input(format!(
                "Unknown position '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A coach's specialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Specialty {
    #[serde(rename = "ENTRENADOR_ASISTENTE")]
    AssistantCoach,
    #[serde(rename = "ENTRENADOR_PORTEROS")]
    GoalkeeperCoach,
    #[serde(rename = "ENTRENADOR_PRINCIPAL")]
    HeadCoach,
}

impl Specialty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Specialty::AssistantCoach => "ENTRENADOR_ASISTENTE",
            Specialty::GoalkeeperCoach => "ENTRENADOR_PORTEROS",
            Specialty::HeadCoach => "ENTRENADOR_PRINCIPAL",
        }
    }

    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s.trim().to_uppercase().as_str() {
            "ENTRENADOR_ASISTENTE" => Ok(Specialty::AssistantCoach),
            "ENTRENADOR_PORTEROS" => Ok(Specialty::GoalkeeperCoach),
            "ENTRENADOR_PRINCIPAL" => Ok(Specialty::HeadCoach),
            other => Err(DomainError::invalid_input(format!(
                "Unknown coach specialty '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for Specialty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_parse_is_case_insensitive() {
        assert_eq!(Position::parse("delantero").unwrap(), Position::Forward);
        assert_eq!(Position::parse(" PORTERO ").unwrap(), Position::Goalkeeper);
        assert!(Position::parse("STRIKER").is_err());
    }

    #[test]
    fn test_specialty_round_trips_through_str() {
        for specialty in [
            Specialty::AssistantCoach,
            Specialty::GoalkeeperCoach,
            Specialty::HeadCoach,
        ] {
            assert_eq!(Specialty::parse(specialty.as_str()).unwrap(), specialty);
        }
    }
}
