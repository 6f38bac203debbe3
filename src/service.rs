//! Game service: ties word source, rules and store together.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::{debug, error, info, instrument, warn};

use crate::games::hangman::{
    GameStatus, GuessError, GuessOutcome, Session, SessionId, WordSource, apply_guess,
    new_session,
};
use crate::store::{SessionStore, StoreError};

/// Error returned by [`GameService`].
#[derive(Debug, Clone, derive_more::Display)]
pub enum ServiceError {
    /// No session with that id.
    #[display("Game {} not found", _0)]
    NotFound(SessionId),

    /// A new session could not be created; nothing was persisted.
    #[display("Could not create game: {}", _0)]
    CreationFailed(String),

    /// The guess was rejected. `session` is the unchanged stored state.
    #[display("{}", error)]
    Rejected {
        /// Why the guess was rejected.
        error: GuessError,
        /// The session as it was before the guess.
        session: Box<Session>,
    },

    /// The store failed while loading or saving.
    #[display("{}", _0)]
    Store(StoreError),
}

impl std::error::Error for ServiceError {}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => Self::NotFound(id),
            other => Self::Store(other),
        }
    }
}

/// One lock per session id, so guesses on the same session run one at a time
/// while different sessions proceed in parallel.
///
/// Entries are only created for sessions that exist and are never removed;
/// sessions are never deleted either.
#[derive(Debug, Clone, Default)]
struct SessionLocks {
    locks: Arc<Mutex<HashMap<SessionId, Arc<Mutex<()>>>>>,
}

impl SessionLocks {
    fn lock_for(&self, id: SessionId) -> Result<Arc<Mutex<()>>, ServiceError> {
        let mut locks = self
            .locks
            .lock()
            .map_err(|e| ServiceError::Store(StoreError::Unavailable(e.to_string())))?;
        Ok(Arc::clone(locks.entry(id).or_default()))
    }
}

/// Service layer for hangman sessions.
///
/// Cheap to clone; clones share the store, word source and per-session locks.
#[derive(Debug, Clone)]
pub struct GameService {
    store: Arc<dyn SessionStore>,
    words: Arc<dyn WordSource>,
    locks: SessionLocks,
}

impl GameService {
    /// Creates a service over the given store and word source.
    #[instrument(skip_all)]
    pub fn new(store: Arc<dyn SessionStore>, words: Arc<dyn WordSource>) -> Self {
        info!(?store, "Creating GameService");
        Self {
            store,
            words,
            locks: SessionLocks::default(),
        }
    }

    /// Starts a new session with a word from the word source.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::CreationFailed`] if the word source or store fails.
    #[instrument(skip(self))]
    pub fn create_game(&self) -> Result<Session, ServiceError> {
        let word = self.words.next_word().map_err(|e| {
            error!(error = %e, "Word source failed");
            ServiceError::CreationFailed(e.to_string())
        })?;

        let session = self.store.create(new_session(&word)).map_err(|e| {
            error!(error = %e, "Store failed to create session");
            ServiceError::CreationFailed(e.to_string())
        })?;

        info!(
            session_id = %session.id(),
            max_wrong_allowed = session.max_wrong_allowed(),
            "Game created"
        );
        Ok(session)
    }

    /// Loads a session.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] if the id is unknown.
    #[instrument(skip(self))]
    pub fn game(&self, id: SessionId) -> Result<Session, ServiceError> {
        debug!("Loading game");
        Ok(self.store.get(id)?)
    }

    /// Applies a guess to a session and saves the result.
    ///
    /// The load, rules and save run under the session's lock, so concurrent
    /// guesses on one session never lose or double-apply an update.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] for an unknown id,
    /// [`ServiceError::Rejected`] when the rules reject the guess, and
    /// [`ServiceError::Store`] when saving fails.
    #[instrument(skip(self))]
    pub fn make_guess(&self, id: SessionId, raw: &str) -> Result<GuessOutcome, ServiceError> {
        // Unknown ids must not leave a lock behind.
        self.store.get(id)?;

        let lock = self.locks.lock_for(id)?;
        let _guard = lock
            .lock()
            .map_err(|e| ServiceError::Store(StoreError::Unavailable(e.to_string())))?;

        let session = self.store.get(id)?;

        match apply_guess(&session, raw) {
            Ok(outcome) => {
                self.store.save(outcome.session())?;
                debug!(correct = outcome.correct(), "Guess saved");
                Ok(outcome)
            }
            Err(error) => {
                warn!(%error, "Guess rejected");
                Err(ServiceError::Rejected {
                    error,
                    session: Box::new(session),
                })
            }
        }
    }

    /// Lists sessions newest first, optionally filtered by status.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Store`] if the store fails.
    #[instrument(skip(self))]
    pub fn list_games(&self, status: Option<GameStatus>) -> Result<Vec<Session>, ServiceError> {
        Ok(self.store.list(status)?)
    }
}
