use std::fmt::Display;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{
    DomainError, Member, MemberKind, MemberRole, PlayerStats, Position, Specialty, DEFAULT_IMAGE,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Flat, wire-named view of a member shared by the CSV, JSON and binary formats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberRecord {
    #[serde(default)]
    pub id: i64,
    pub nombre: String,
    pub apellidos: String,
    pub fecha_nacimiento: String,
    pub fecha_incorporacion: String,
    pub salario: f64,
    pub pais: String,
    pub rol: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub especialidad: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub posicion: Option<String>,
    #[serde(default, deserialize_with = "empty_number_as_none")]
    pub dorsal: Option<i32>,
    #[serde(default, deserialize_with = "empty_number_as_none")]
    pub altura: Option<f64>,
    #[serde(default, deserialize_with = "empty_number_as_none")]
    pub peso: Option<f64>,
    #[serde(default, deserialize_with = "empty_number_as_none")]
    pub goles: Option<i32>,
    #[serde(default, deserialize_with = "empty_number_as_none")]
    pub partidos_jugados: Option<i32>,
    #[serde(default, deserialize_with = "empty_number_as_none")]
    pub minutos_jugados: Option<i32>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub imagen: Option<String>,
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText<T> {
    Number(T),
    Text(String),
}

/// Accepts a number, a numeric string, `null` or a blank string (absent).
fn empty_number_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: Display,
{
    match Option::<NumberOrText<T>>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrText::Number(value)) => Ok(Some(value)),
        Some(NumberOrText::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(NumberOrText::Text(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| D::Error::custom(format!("invalid number '{}': {}", text, e))),
    }
}

fn parse_date(value: &str, field: &str, record: usize) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|e| {
        DomainError::storage(format!(
            "Record {}: invalid {} '{}': {}",
            record, field, value, e
        ))
    })
}

impl MemberRecord {
    pub fn from_member(member: &Member) -> Self {
        let mut record = Self {
            id: member.id(),
            nombre: member.first_name().to_string(),
            apellidos: member.last_name().to_string(),
            fecha_nacimiento: member.birth_date().format(DATE_FORMAT).to_string(),
            fecha_incorporacion: member.joined_on().format(DATE_FORMAT).to_string(),
            salario: member.salary(),
            pais: member.country().to_string(),
            rol: member.kind().as_str().to_string(),
            especialidad: None,
            posicion: None,
            dorsal: None,
            altura: None,
            peso: None,
            goles: None,
            partidos_jugados: None,
            minutos_jugados: None,
            imagen: Some(member.image().to_string()),
        };

        match member.role() {
            MemberRole::Player(stats) => {
                record.posicion = Some(stats.position.as_str().to_string());
                record.dorsal = Some(stats.number);
                record.altura = Some(stats.height);
                record.peso = Some(stats.weight);
                record.goles = Some(stats.goals);
                record.partidos_jugados = Some(stats.matches_played);
                record.minutos_jugados = Some(stats.minutes_played);
            }
            MemberRole::Coach(specialty) => {
                record.especialidad = Some(specialty.as_str().to_string());
            }
        }

        record
    }

    /// Builds the domain member. `record` is the 1-based position used in error messages.
    /// Missing minutes default to 0 and a missing image to the default picture.
    pub fn into_member(self, record: usize) -> Result<Member, DomainError> {
        let wrap = |e: DomainError| DomainError::storage(format!("Record {}: {}", record, e));
        let missing = |field: &str| {
            DomainError::storage(format!("Record {}: missing {}", record, field))
        };

        let role = match MemberKind::parse(&self.rol).map_err(wrap)? {
            MemberKind::Player => MemberRole::Player(PlayerStats {
                position: Position::parse(self.posicion.as_deref().ok_or_else(|| missing("posicion"))?)
                    .map_err(wrap)?,
                number: self.dorsal.ok_or_else(|| missing("dorsal"))?,
                height: self.altura.ok_or_else(|| missing("altura"))?,
                weight: self.peso.ok_or_else(|| missing("peso"))?,
                goals: self.goles.ok_or_else(|| missing("goles"))?,
                matches_played: self.partidos_jugados.ok_or_else(|| missing("partidos_jugados"))?,
                minutes_played: self.minutos_jugados.unwrap_or(0),
            }),
            MemberKind::Coach => MemberRole::Coach(
                Specialty::parse(
                    self.especialidad
                        .as_deref()
                        .ok_or_else(|| missing("especialidad"))?,
                )
                .map_err(wrap)?,
            ),
        };

        Ok(Member::new(
            self.nombre,
            self.apellidos,
            parse_date(&self.fecha_nacimiento, "fecha_nacimiento", record)?,
            parse_date(&self.fecha_incorporacion, "fecha_incorporacion", record)?,
            self.salario,
            self.pais,
            role,
        )
        .with_id(self.id)
        .with_image(self.imagen.unwrap_or_else(|| DEFAULT_IMAGE.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coach_record() -> MemberRecord {
        MemberRecord {
            id: 3,
            nombre: "Ana".into(),
            apellidos: "Ruiz".into(),
            fecha_nacimiento: "1980-02-29".into(),
            fecha_incorporacion: "2015-07-01".into(),
            salario: 4200.5,
            pais: "México".into(),
            rol: "Entrenador".into(),
            especialidad: Some("ENTRENADOR_PORTEROS".into()),
            posicion: None,
            dorsal: None,
            altura: None,
            peso: None,
            goles: None,
            partidos_jugados: None,
            minutos_jugados: None,
            imagen: None,
        }
    }

    #[test]
    fn test_coach_record_defaults_image() {
        let member = coach_record().into_member(1).unwrap();
        assert_eq!(member.id(), 3);
        assert_eq!(member.specialty(), Some(Specialty::GoalkeeperCoach));
        assert_eq!(member.image(), DEFAULT_IMAGE);
    }

    #[test]
    fn test_unknown_role_names_the_record() {
        let record = MemberRecord {
            rol: "Utillero".into(),
            ..coach_record()
        };
        let err = record.into_member(4).unwrap_err();
        assert!(err.is_storage_error());
        assert!(err.to_string().contains("Record 4"));
    }

    #[test]
    fn test_player_without_stats_is_rejected() {
        let record = MemberRecord {
            rol: "Jugador".into(),
            posicion: Some("DEFENSA".into()),
            ..coach_record()
        };
        let err = record.into_member(2).unwrap_err();
        assert!(err.to_string().contains("missing dorsal"));
    }

    #[test]
    fn test_numeric_fields_accept_text_and_blank() {
        let json = r#"{
            "nombre": "Lamine", "apellidos": "Yamal",
            "fecha_nacimiento": "2007-07-13", "fecha_incorporacion": "2023-04-29",
            "salario": 1000.0, "pais": "España", "rol": "Jugador",
            "posicion": "DELANTERO", "dorsal": "19", "altura": 1.8, "peso": "72.5",
            "goles": 9, "partidos_jugados": "", "minutos_jugados": null
        }"#;
        let record: MemberRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.dorsal, Some(19));
        assert_eq!(record.altura, Some(1.8));
        assert_eq!(record.peso, Some(72.5));
        assert_eq!(record.goles, Some(9));
        assert_eq!(record.partidos_jugados, None);
        assert_eq!(record.minutos_jugados, None);

        let bad = json.replace(r#""dorsal": "19""#, r#""dorsal": "diecinueve""#);
        assert!(serde_json::from_str::<MemberRecord>(&bad).is_err());
    }

    #[test]
    fn test_bad_date_is_a_storage_error() {
        let record = MemberRecord {
            fecha_nacimiento: "29/02/1980".into(),
            ..coach_record()
        };
        assert!(record.into_member(1).unwrap_err().is_storage_error());
    }
}
