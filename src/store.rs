//! Session storage behind a single trait.
//!
//! The game engine never touches storage; the service loads a session from a
//! [`SessionStore`], runs the rules and saves the result.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use tracing::{debug, info, instrument, warn};

use crate::db::{DbError, GameChanges, GameRepository, NewGameRow};
use crate::games::hangman::{GameStatus, NewSession, Session, SessionId};

/// Error returned by a session store.
#[derive(Debug, Clone, derive_more::Display)]
pub enum StoreError {
    /// No session with that id.
    #[display("Game {} not found", _0)]
    NotFound(SessionId),

    /// The backing database failed.
    #[display("{}", _0)]
    Db(DbError),

    /// The store cannot be used right now.
    #[display("Store unavailable: {}", _0)]
    Unavailable(String),
}

impl std::error::Error for StoreError {}

impl From<DbError> for StoreError {
    fn from(err: DbError) -> Self {
        Self::Db(err)
    }
}

/// Durable mapping from session id to session.
pub trait SessionStore: Send + Sync + std::fmt::Debug {
    /// Persists a new session, assigning its id and creation time.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if nothing could be persisted.
    fn create(&self, new: NewSession) -> Result<Session, StoreError>;

    /// Loads a session.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the id is unknown.
    fn get(&self, id: SessionId) -> Result<Session, StoreError>;

    /// Overwrites a stored session.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the session was never created.
    fn save(&self, session: &Session) -> Result<(), StoreError>;

    /// Lists sessions newest first, optionally filtered by status.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the listing fails.
    fn list(&self, status: Option<GameStatus>) -> Result<Vec<Session>, StoreError>;
}

impl SessionStore for GameRepository {
    #[instrument(skip(self, new))]
    fn create(&self, new: NewSession) -> Result<Session, StoreError> {
        let row = self.insert_game(NewGameRow::from(&new))?;
        Ok(row.into_session()?)
    }

    #[instrument(skip(self))]
    fn get(&self, id: SessionId) -> Result<Session, StoreError> {
        let row = self
            .find_game(id.value())?
            .ok_or(StoreError::NotFound(id))?;
        Ok(row.into_session()?)
    }

    #[instrument(skip(self, session), fields(session_id = %session.id()))]
    fn save(&self, session: &Session) -> Result<(), StoreError> {
        let updated = self.update_game(session.id().value(), &GameChanges::from(session))?;
        if updated == 0 {
            warn!("Save for unknown game");
            return Err(StoreError::NotFound(*session.id()));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    fn list(&self, status: Option<GameStatus>) -> Result<Vec<Session>, StoreError> {
        self.list_games(status)?
            .into_iter()
            .map(|row| row.into_session().map_err(StoreError::from))
            .collect()
    }
}

/// Session store held in process memory.
///
/// Cloning shares the same underlying map.
#[derive(Debug, Clone)]
pub struct InMemorySessionStore {
    sessions: Arc<Mutex<HashMap<SessionId, Session>>>,
    next_id: Arc<AtomicI32>,
}

impl InMemorySessionStore {
    /// Creates an empty store.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating in-memory session store");
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            next_id: Arc::new(AtomicI32::new(1)),
        }
    }

    fn sessions(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<SessionId, Session>>, StoreError> {
        self.sessions
            .lock()
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for InMemorySessionStore {
    #[instrument(skip(self, new))]
    fn create(&self, new: NewSession) -> Result<Session, StoreError> {
        let mut sessions = self.sessions()?;
        let id = SessionId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        let session = Session::from_new(id, new, Utc::now().naive_utc());
        sessions.insert(id, session.clone());
        info!(session_id = %id, "Created session");
        Ok(session)
    }

    #[instrument(skip(self))]
    fn get(&self, id: SessionId) -> Result<Session, StoreError> {
        let session = self.sessions()?.get(&id).cloned();
        session.ok_or_else(|| {
            debug!(session_id = %id, "Session not found");
            StoreError::NotFound(id)
        })
    }

    #[instrument(skip(self, session), fields(session_id = %session.id()))]
    fn save(&self, session: &Session) -> Result<(), StoreError> {
        let mut sessions = self.sessions()?;
        match sessions.get_mut(session.id()) {
            Some(stored) => {
                *stored = session.clone();
                debug!("Session updated");
                Ok(())
            }
            None => Err(StoreError::NotFound(*session.id())),
        }
    }

    #[instrument(skip(self))]
    fn list(&self, status: Option<GameStatus>) -> Result<Vec<Session>, StoreError> {
        let mut listed: Vec<Session> = self
            .sessions()?
            .values()
            .filter(|s| status.is_none_or(|wanted| *s.status() == wanted))
            .cloned()
            .collect();
        listed.sort_by(|a, b| b.id().cmp(a.id()));
        info!(count = listed.len(), "Listed sessions");
        Ok(listed)
    }
}
