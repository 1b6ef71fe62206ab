use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, SubsecRound};
use duckdb::{params, Connection, Row};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::application::MemberRepository;
use crate::domain::{
    current_timestamp, DomainError, Member, MemberKind, MemberRole, PlayerStats, Position,
    Specialty,
};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

const SELECT_COLUMNS: &str = r#"
    SELECT id, nombre, apellidos,
           CAST(fecha_nacimiento AS VARCHAR), CAST(fecha_incorporacion AS VARCHAR),
           salario, pais, rol, especialidad, posicion, dorsal, altura, peso, goles,
           partidos_jugados, minutos_jugados,
           CAST(created_at AS VARCHAR), CAST(updated_at AS VARCHAR), imagen
    FROM integrantes
"#;

/// Raw `integrantes` row; turned into a [`Member`] outside the driver callback
/// so parse failures surface as domain errors.
struct MemberRow {
    id: i64,
    first_name: String,
    last_name: String,
    birth_date: String,
    joined_on: String,
    salary: f64,
    country: String,
    role: String,
    specialty: Option<String>,
    position: Option<String>,
    number: Option<i32>,
    height: Option<f64>,
    weight: Option<f64>,
    goals: Option<i32>,
    matches_played: Option<i32>,
    minutes_played: Option<i32>,
    created_at: String,
    updated_at: String,
    image: Option<String>,
}

impl MemberRow {
    fn from_row(row: &Row<'_>) -> duckdb::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            first_name: row.get(1)?,
            last_name: row.get(2)?,
            birth_date: row.get(3)?,
            joined_on: row.get(4)?,
            salary: row.get(5)?,
            country: row.get(6)?,
            role: row.get(7)?,
            specialty: row.get(8)?,
            position: row.get(9)?,
            number: row.get(10)?,
            height: row.get(11)?,
            weight: row.get(12)?,
            goals: row.get(13)?,
            matches_played: row.get(14)?,
            minutes_played: row.get(15)?,
            created_at: row.get(16)?,
            updated_at: row.get(17)?,
            image: row.get(18)?,
        })
    }

    fn into_member(self) -> Result<Member, DomainError> {
        let id = self.id;
        let missing =
            |column: &str| DomainError::storage(format!("Member {} has no {}", id, column));

        let role = match MemberKind::parse(&self.role)? {
            MemberKind::Player => MemberRole::Player(PlayerStats {
                position: Position::parse(
                    self.position.as_deref().ok_or_else(|| missing("posicion"))?,
                )?,
                number: self.number.ok_or_else(|| missing("dorsal"))?,
                height: self.height.ok_or_else(|| missing("altura"))?,
                weight: self.weight.ok_or_else(|| missing("peso"))?,
                goals: self.goals.ok_or_else(|| missing("goles"))?,
                matches_played: self.matches_played.ok_or_else(|| missing("partidos_jugados"))?,
                minutes_played: self.minutes_played.unwrap_or(0),
            }),
            MemberKind::Coach => MemberRole::Coach(Specialty::parse(
                self.specialty.as_deref().ok_or_else(|| missing("especialidad"))?,
            )?),
        };

        let mut member = Member::new(
            self.first_name,
            self.last_name,
            parse_date(&self.birth_date)?,
            parse_date(&self.joined_on)?,
            self.salary,
            self.country,
            role,
        )
        .with_id(id)
        .with_timestamps(
            parse_timestamp(&self.created_at)?,
            parse_timestamp(&self.updated_at)?,
        );

        if let Some(image) = self.image.filter(|i| !i.is_empty()) {
            member = member.with_image(image);
        }

        Ok(member)
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|e| DomainError::storage(format!("Invalid stored date '{}': {}", value, e)))
}

fn parse_timestamp(value: &str) -> Result<NaiveDateTime, DomainError> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .map_err(|e| DomainError::storage(format!("Invalid stored timestamp '{}': {}", value, e)))
}

fn format_timestamp(value: NaiveDateTime) -> String {
    value.format("%Y-%m-%d %H:%M:%S%.6f").to_string()
}

/// Column values for the role-dependent part of a row.
struct RoleColumns {
    specialty: Option<&'static str>,
    position: Option<&'static str>,
    number: Option<i32>,
    height: Option<f64>,
    weight: Option<f64>,
    goals: Option<i32>,
    matches_played: Option<i32>,
    minutes_played: Option<i32>,
}

impl RoleColumns {
    fn of(member: &Member) -> Self {
        match member.role() {
            MemberRole::Player(stats) => Self {
                specialty: None,
                position: Some(stats.position.as_str()),
                number: Some(stats.number),
                height: Some(stats.height),
                weight: Some(stats.weight),
                goals: Some(stats.goals),
                matches_played: Some(stats.matches_played),
                minutes_played: Some(stats.minutes_played),
            },
            MemberRole::Coach(specialty) => Self {
                specialty: Some(specialty.as_str()),
                position: None,
                number: None,
                height: None,
                weight: None,
                goals: None,
                matches_played: None,
                minutes_played: None,
            },
        }
    }
}

pub struct DuckdbMemberRepository {
    conn: Arc<Mutex<Connection>>,
}

impl DuckdbMemberRepository {
    pub fn new(db_path: &Path, init_tables: bool) -> Result<Self, DomainError> {
        let conn = Connection::open(db_path)
            .map_err(|e| DomainError::storage(format!("Failed to open DuckDB database: {}", e)))?;
        if init_tables {
            Self::initialize_schema(&conn)?;
        }

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn in_memory() -> Result<Self, DomainError> {
        let conn = Connection::open_in_memory().map_err(|e| {
            DomainError::storage(format!("Failed to open DuckDB in-memory DB: {}", e))
        })?;
        Self::initialize_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Returns a clone of the shared connection Arc.
    /// The user repository shares it, since DuckDB allows a single writer per file.
    pub fn shared_connection(&self) -> Arc<Mutex<Connection>> {
        Arc::clone(&self.conn)
    }

    fn initialize_schema(conn: &Connection) -> Result<(), DomainError> {
        conn.execute_batch(
            r#"
            CREATE SEQUENCE IF NOT EXISTS seq_integrantes_id START 1;

            CREATE TABLE IF NOT EXISTS integrantes (
                id BIGINT PRIMARY KEY DEFAULT nextval('seq_integrantes_id'),
                nombre TEXT NOT NULL,
                apellidos TEXT NOT NULL,
                fecha_nacimiento DATE NOT NULL,
                fecha_incorporacion DATE NOT NULL,
                salario DOUBLE NOT NULL,
                pais TEXT NOT NULL,
                rol TEXT NOT NULL,
                especialidad TEXT,
                posicion TEXT,
                dorsal INTEGER,
                altura DOUBLE,
                peso DOUBLE,
                goles INTEGER,
                partidos_jugados INTEGER,
                minutos_jugados INTEGER,
                created_at TIMESTAMP NOT NULL,
                updated_at TIMESTAMP NOT NULL,
                imagen TEXT
            );
            "#,
        )
        .map_err(|e| DomainError::storage(format!("Failed to initialize schema: {}", e)))?;

        debug!("DuckDB integrantes schema initialized");
        Ok(())
    }

    fn insert(conn: &Connection, member: &Member) -> Result<Member, DomainError> {
        // DuckDB timestamps hold microseconds
        let now = current_timestamp().trunc_subsecs(6);
        let stamp = format_timestamp(now);
        let role = RoleColumns::of(member);

        let id: i64 = conn
            .query_row(
                r#"
                INSERT INTO integrantes (
                    nombre, apellidos, fecha_nacimiento, fecha_incorporacion, salario, pais,
                    rol, especialidad, posicion, dorsal, altura, peso, goles,
                    partidos_jugados, minutos_jugados, created_at, updated_at, imagen
                )
                VALUES (?, ?, CAST(? AS DATE), CAST(? AS DATE), ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?,
                        CAST(? AS TIMESTAMP), CAST(? AS TIMESTAMP), ?)
                RETURNING id
                "#,
                params![
                    member.first_name(),
                    member.last_name(),
                    member.birth_date().format(DATE_FORMAT).to_string(),
                    member.joined_on().format(DATE_FORMAT).to_string(),
                    member.salary(),
                    member.country(),
                    member.kind().as_str(),
                    role.specialty,
                    role.position,
                    role.number,
                    role.height,
                    role.weight,
                    role.goals,
                    role.matches_played,
                    role.minutes_played,
                    stamp,
                    stamp,
                    member.image(),
                ],
                |row| row.get(0),
            )
            .map_err(|e| DomainError::storage(format!("Failed to save member: {}", e)))?;

        let mut stored = member.clone().with_id(id);
        stored.stamp_created(now);
        Ok(stored)
    }

    fn select_by_id(conn: &Connection, id: i64) -> Result<Option<Member>, DomainError> {
        let sql = format!("{} WHERE id = ?", SELECT_COLUMNS);
        match conn.query_row(&sql, params![id], MemberRow::from_row) {
            Ok(row) => row.into_member().map(Some),
            Err(duckdb::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(DomainError::storage(format!(
                "Failed to query member {}: {}",
                id, e
            ))),
        }
    }
}

#[async_trait]
impl MemberRepository for DuckdbMemberRepository {
    async fn find_all(&self) -> Result<Vec<Member>, DomainError> {
        let conn = self.conn.lock().await;
        let sql = format!("{} ORDER BY id", SELECT_COLUMNS);
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| DomainError::storage(format!("Failed to prepare statement: {}", e)))?;

        let rows = stmt
            .query_map([], MemberRow::from_row)
            .map_err(|e| DomainError::storage(format!("Failed to query members: {}", e)))?;

        let mut members = Vec::new();
        for row in rows {
            let row =
                row.map_err(|e| DomainError::storage(format!("Failed to read member row: {}", e)))?;
            members.push(row.into_member()?);
        }

        debug!("Loaded {} members", members.len());
        Ok(members)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Member>, DomainError> {
        let conn = self.conn.lock().await;
        Self::select_by_id(&conn, id)
    }

    async fn save(&self, member: &Member) -> Result<Member, DomainError> {
        let conn = self.conn.lock().await;
        let stored = Self::insert(&conn, member)?;
        info!("Saved member {} with id {}", stored.full_name(), stored.id());
        Ok(stored)
    }

    async fn save_batch(&self, members: &[Member]) -> Result<Vec<Member>, DomainError> {
        if members.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.conn.lock().await;
        let tx = conn
            .transaction()
            .map_err(|e| DomainError::storage(format!("Failed to begin transaction: {}", e)))?;

        let mut stored = Vec::with_capacity(members.len());
        for member in members {
            stored.push(Self::insert(&tx, member)?);
        }

        tx.commit()
            .map_err(|e| DomainError::storage(format!("Failed to commit: {}", e)))?;

        info!("Saved batch of {} members", stored.len());
        Ok(stored)
    }

    async fn update(&self, id: i64, member: &Member) -> Result<Option<Member>, DomainError> {
        let conn = self.conn.lock().await;
        // DuckDB timestamps hold microseconds
        let now = current_timestamp().trunc_subsecs(6);
        let role = RoleColumns::of(member);

        let changed = conn
            .execute(
                r#"
                UPDATE integrantes SET
                    nombre = ?, apellidos = ?,
                    fecha_nacimiento = CAST(? AS DATE), fecha_incorporacion = CAST(? AS DATE),
                    salario = ?, pais = ?, rol = ?, especialidad = ?, posicion = ?,
                    dorsal = ?, altura = ?, peso = ?, goles = ?, partidos_jugados = ?,
                    minutos_jugados = ?, updated_at = CAST(? AS TIMESTAMP), imagen = ?
                WHERE id = ?
                "#,
                params![
                    member.first_name(),
                    member.last_name(),
                    member.birth_date().format(DATE_FORMAT).to_string(),
                    member.joined_on().format(DATE_FORMAT).to_string(),
                    member.salary(),
                    member.country(),
                    member.kind().as_str(),
                    role.specialty,
                    role.position,
                    role.number,
                    role.height,
                    role.weight,
                    role.goals,
                    role.matches_played,
                    role.minutes_played,
                    format_timestamp(now),
                    member.image(),
                    id,
                ],
            )
            .map_err(|e| DomainError::storage(format!("Failed to update member {}: {}", id, e)))?;

        if changed == 0 {
            debug!("No member with id {} to update", id);
            return Ok(None);
        }

        info!("Updated member {}", id);
        Self::select_by_id(&conn, id)
    }

    async fn delete(&self, id: i64) -> Result<Option<Member>, DomainError> {
        let conn = self.conn.lock().await;
        let Some(existing) = Self::select_by_id(&conn, id)? else {
            return Ok(None);
        };

        conn.execute("DELETE FROM integrantes WHERE id = ?", params![id])
            .map_err(|e| DomainError::storage(format!("Failed to delete member {}: {}", id, e)))?;

        info!("Deleted member {}", id);
        Ok(Some(existing))
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let conn = self.conn.lock().await;
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM integrantes", [], |row| row.get(0))
            .map_err(|e| DomainError::storage(format!("Failed to count members: {}", e)))?;
        Ok(count as u64)
    }
}
