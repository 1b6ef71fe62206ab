use std::sync::Arc;

use async_trait::async_trait;
use duckdb::{params, Connection};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::application::UserRepository;
use crate::domain::{DomainError, User, UserRole};

pub struct DuckdbUserRepository {
    conn: Arc<Mutex<Connection>>,
}

impl DuckdbUserRepository {
    /// Create a new adapter using an existing shared connection.
    pub async fn with_connection(
        conn: Arc<Mutex<Connection>>,
        init_tables: bool,
    ) -> Result<Self, DomainError> {
        if init_tables {
            let conn_guard = conn.lock().await;
            Self::initialize_schema(&conn_guard)?;
            drop(conn_guard);
        }

        Ok(Self { conn })
    }

    fn initialize_schema(conn: &Connection) -> Result<(), DomainError> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS usuarios (
                username TEXT PRIMARY KEY,
                password_hash TEXT NOT NULL,
                role TEXT NOT NULL
            );
            "#,
        )
        .map_err(|e| DomainError::storage(format!("Failed to initialize usuarios schema: {}", e)))?;

        debug!("DuckDB usuarios table initialized");
        Ok(())
    }
}

#[async_trait]
impl UserRepository for DuckdbUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let conn = self.conn.lock().await;
        let found = conn.query_row(
            "SELECT username, password_hash, role FROM usuarios WHERE username = ?",
            params![username],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            },
        );

        match found {
            Ok((name, hash, role)) => Ok(Some(User::new(name, hash, UserRole::parse(&role)?))),
            Err(duckdb::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(DomainError::storage(format!("Failed to query user: {}", e))),
        }
    }

    async fn save(&self, user: &User) -> Result<User, DomainError> {
        let conn = self.conn.lock().await;

        let existing: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM usuarios WHERE username = ?",
                params![user.username()],
                |row| row.get(0),
            )
            .map_err(|e| DomainError::storage(format!("Failed to query user: {}", e)))?;
        if existing > 0 {
            return Err(DomainError::already_exists(format!(
                "User '{}' already exists",
                user.username()
            )));
        }

        conn.execute(
            "INSERT INTO usuarios (username, password_hash, role) VALUES (?, ?, ?)",
            params![user.username(), user.password_hash(), user.role().as_str()],
        )
        .map_err(|e| DomainError::storage(format!("Failed to save user: {}", e)))?;

        info!("Registered user {} ({})", user.username(), user.role());
        Ok(user.clone())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let conn = self.conn.lock().await;
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM usuarios", [], |row| row.get(0))
            .map_err(|e| DomainError::storage(format!("Failed to count users: {}", e)))?;
        Ok(count as u64)
    }
}
