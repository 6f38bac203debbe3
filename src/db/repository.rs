//! Database repository for game sessions.

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument};

use crate::db::{DbError, DbErrorKind, GameChanges, GameRow, NewGameRow, schema};
use crate::games::hangman::GameStatus;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// How long a connection waits on a locked database before failing.
const BUSY_TIMEOUT_MS: u32 = 5000;

/// Database repository for game sessions.
///
/// Each call opens its own connection, so the repository is cheap to clone
/// and share across threads. The database must be a file path; `":memory:"`
/// would give every call a fresh, empty database.
///
/// The database runs in WAL mode and every connection waits up to
/// [`BUSY_TIMEOUT_MS`] for a competing writer, so calls on different games
/// may overlap.
#[derive(Debug, Clone)]
pub struct GameRepository {
    db_path: String,
}

impl GameRepository {
    /// Opens the database at `db_path`, creating it and applying pending
    /// migrations if needed.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the database cannot be opened or migrated.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn open(db_path: String) -> Result<Self, DbError> {
        info!(path = %db_path, "Opening GameRepository");
        let repo = Self { db_path };

        let mut conn = repo.connection()?;
        conn.batch_execute("PRAGMA journal_mode = WAL;")
            .map_err(|e| {
                DbError::new(
                    DbErrorKind::Connection,
                    format!("Failed to enable WAL: {}", e),
                )
            })?;
        debug!("WAL journal mode enabled");

        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| DbError::new(DbErrorKind::Migration, e.to_string()))?;

        info!(applied = applied.len(), "Migrations up to date");
        Ok(repo)
    }

    /// Path of the underlying database file.
    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.db_path, "Establishing connection");
        let mut conn = SqliteConnection::establish(&self.db_path).map_err(|e| {
            DbError::new(
                DbErrorKind::Connection,
                format!("Failed to connect to '{}': {}", self.db_path, e),
            )
        })?;

        conn.batch_execute(&format!("PRAGMA busy_timeout = {};", BUSY_TIMEOUT_MS))
            .map_err(|e| {
                DbError::new(
                    DbErrorKind::Connection,
                    format!("Failed to set busy timeout: {}", e),
                )
            })?;

        Ok(conn)
    }

    /// Inserts a new game row.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self, game), fields(max_incorrect_guesses = game.max_incorrect_guesses()))]
    pub fn insert_game(&self, game: NewGameRow) -> Result<GameRow, DbError> {
        debug!("Inserting game");
        let mut conn = self.connection()?;

        let row = diesel::insert_into(schema::games::table)
            .values(&game)
            .returning(GameRow::as_returning())
            .get_result(&mut conn)?;

        info!(game_id = row.id(), "Game inserted");
        Ok(row)
    }

    /// Gets a game by id. Returns `None` if not found.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn find_game(&self, id: i32) -> Result<Option<GameRow>, DbError> {
        debug!(game_id = id, "Looking up game");
        let mut conn = self.connection()?;

        let row = schema::games::table
            .find(id)
            .select(GameRow::as_select())
            .first(&mut conn)
            .optional()?;

        if row.is_none() {
            debug!(game_id = id, "Game not found");
        }

        Ok(row)
    }

    /// Writes the mutable columns of a game. Returns the number of rows touched.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self, changes), fields(status = %changes.status()))]
    pub fn update_game(&self, id: i32, changes: &GameChanges) -> Result<usize, DbError> {
        debug!(game_id = id, "Updating game");
        let mut conn = self.connection()?;

        let updated = diesel::update(schema::games::table.find(id))
            .set(changes)
            .execute(&mut conn)?;

        debug!(game_id = id, updated, "Game updated");
        Ok(updated)
    }

    /// Lists games newest first, optionally filtered by status.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn list_games(&self, status: Option<GameStatus>) -> Result<Vec<GameRow>, DbError> {
        debug!(?status, "Listing games");
        let mut conn = self.connection()?;

        let mut query = schema::games::table
            .select(GameRow::as_select())
            .order((schema::games::created_at.desc(), schema::games::id.desc()))
            .into_boxed();

        if let Some(status) = status {
            query = query.filter(schema::games::status.eq(status.as_ref().to_string()));
        }

        let rows = query.load(&mut conn)?;
        info!(count = rows.len(), "Games loaded");
        Ok(rows)
    }
}
