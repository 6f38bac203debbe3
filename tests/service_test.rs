//! Tests for the game service over both stores.

use std::sync::Arc;
use std::thread;

use tempfile::NamedTempFile;

use strictly_hangman::{
    FixedWordSource, GameRepository, GameService, GameStatus, GuessError, InMemorySessionStore,
    NewSession, Session, SessionId, SessionStore, ServiceError, StoreError, WordSource,
    WordSourceError,
};

fn memory_service(words: &[&str]) -> GameService {
    GameService::new(
        Arc::new(InMemorySessionStore::new()),
        Arc::new(FixedWordSource::new(words.iter().copied()).expect("Valid words")),
    )
}

#[derive(Debug)]
struct BrokenWords;

impl WordSource for BrokenWords {
    fn next_word(&self) -> Result<String, WordSourceError> {
        Err(WordSourceError::Unavailable("offline".to_string()))
    }
}

#[derive(Debug, Default)]
struct BrokenStore {
    inner: InMemorySessionStore,
}

impl SessionStore for BrokenStore {
    fn create(&self, _new: NewSession) -> Result<Session, StoreError> {
        Err(StoreError::Unavailable("disk full".to_string()))
    }

    fn get(&self, id: SessionId) -> Result<Session, StoreError> {
        self.inner.get(id)
    }

    fn save(&self, session: &Session) -> Result<(), StoreError> {
        self.inner.save(session)
    }

    fn list(&self, status: Option<GameStatus>) -> Result<Vec<Session>, StoreError> {
        self.inner.list(status)
    }
}

#[test]
fn test_create_uses_word_source() {
    let service = memory_service(&["Bottle", "Pen"]);

    let first = service.create_game().expect("Create failed");
    let second = service.create_game().expect("Create failed");

    assert_eq!(first.secret_word(), "BOTTLE");
    assert_eq!(*first.max_wrong_allowed(), 3);
    assert_eq!(second.secret_word(), "PEN");
    assert_ne!(first.id(), second.id());
}

#[test]
fn test_create_fails_when_word_source_unavailable() {
    let store = Arc::new(InMemorySessionStore::new());
    let service = GameService::new(store.clone(), Arc::new(BrokenWords));

    let result = service.create_game();
    assert!(matches!(result, Err(ServiceError::CreationFailed(_))));
    assert!(store.list(None).expect("List failed").is_empty());
}

#[test]
fn test_create_fails_when_store_unavailable() {
    let service = GameService::new(
        Arc::new(BrokenStore::default()),
        Arc::new(FixedWordSource::new(["Pen"]).expect("Valid words")),
    );
    assert!(matches!(
        service.create_game(),
        Err(ServiceError::CreationFailed(_))
    ));
}

#[test]
fn test_unknown_game_not_found() {
    let service = memory_service(&["Pen"]);
    let id = SessionId::new(404);

    assert!(matches!(service.game(id), Err(ServiceError::NotFound(missing)) if missing == id));
    assert!(matches!(
        service.make_guess(id, "A"),
        Err(ServiceError::NotFound(_))
    ));
}

#[test]
fn test_guess_is_persisted() {
    let service = memory_service(&["Bottle"]);
    let game = service.create_game().expect("Create failed");

    let outcome = service.make_guess(*game.id(), "t").expect("Guess failed");
    assert!(outcome.correct());
    assert_eq!(outcome.message(), "Correct Guess!");

    let stored = service.game(*game.id()).expect("Load failed");
    assert_eq!(stored.guessed_string(), "T");
    assert_eq!(&stored, outcome.session());
}

#[test]
fn test_rejected_guess_returns_unchanged_state() {
    let service = memory_service(&["Bottle"]);
    let game = service.create_game().expect("Create failed");
    service.make_guess(*game.id(), "Z").expect("Guess failed");

    let before = service.game(*game.id()).expect("Load failed");
    match service.make_guess(*game.id(), "Z") {
        Err(ServiceError::Rejected { error, session }) => {
            assert!(matches!(error, GuessError::DuplicateGuess(_)));
            assert_eq!(*session, before);
        }
        other => panic!("Expected rejection, got {other:?}"),
    }
    assert_eq!(service.game(*game.id()).expect("Load failed"), before);
}

#[test]
fn test_finished_game_rejects_with_status() {
    let service = memory_service(&["Pen"]);
    let game = service.create_game().expect("Create failed");
    for letter in ["P", "E", "N"] {
        service.make_guess(*game.id(), letter).expect("Guess failed");
    }

    let result = service.make_guess(*game.id(), "Q");
    assert!(matches!(
        result,
        Err(ServiceError::Rejected {
            error: GuessError::GameAlreadyOver(GameStatus::Won),
            ..
        })
    ));
}

#[test]
fn test_list_games_by_status() {
    let service = memory_service(&["Pen"]);
    let won = service.create_game().expect("Create failed");
    let open = service.create_game().expect("Create failed");
    for letter in ["P", "E", "N"] {
        service.make_guess(*won.id(), letter).expect("Guess failed");
    }

    let all = service.list_games(None).expect("List failed");
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id(), open.id());

    let finished = service.list_games(Some(GameStatus::Won)).expect("List failed");
    assert_eq!(finished.len(), 1);
    assert_eq!(finished[0].id(), won.id());
}

#[test]
fn test_concurrent_wrong_guesses_are_not_lost() {
    let service = memory_service(&["Audacix"]);
    let game = service.create_game().expect("Create failed");
    let id = *game.id();

    let handles: Vec<_> = ["Q", "W", "Z"]
        .into_iter()
        .map(|letter| {
            let service = service.clone();
            thread::spawn(move || service.make_guess(id, letter))
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked").expect("Guess failed");
    }

    let stored = service.game(id).expect("Load failed");
    assert_eq!(*stored.wrong_count(), 3);
    assert_eq!(stored.guessed_letters().len(), 3);
    assert_eq!(*stored.status(), GameStatus::InProgress);
}

#[test]
fn test_concurrent_duplicate_guess_applied_once() {
    let service = memory_service(&["Bottle"]);
    let game = service.create_game().expect("Create failed");
    let id = *game.id();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let service = service.clone();
            thread::spawn(move || service.make_guess(id, "Z").is_ok())
        })
        .collect();

    let accepted = handles
        .into_iter()
        .map(|h| h.join().expect("Thread panicked"))
        .filter(|ok| *ok)
        .count();

    assert_eq!(accepted, 1);
    assert_eq!(*service.game(id).expect("Load failed").wrong_count(), 1);
}

#[test]
fn test_parallel_sessions_over_sqlite() {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let repo = GameRepository::open(db_file.path().to_str().expect("Invalid path").to_string())
        .expect("Failed to open repository");
    let service = GameService::new(
        Arc::new(repo),
        Arc::new(FixedWordSource::new(["Audacix"]).expect("Valid words")),
    );

    let ids: Vec<SessionId> = (0..16)
        .map(|_| *service.create_game().expect("Create failed").id())
        .collect();

    let handles: Vec<_> = ids
        .iter()
        .map(|&id| {
            let service = service.clone();
            thread::spawn(move || {
                ["A", "U", "D", "C", "I", "X"]
                    .into_iter()
                    .map(|letter| service.make_guess(id, letter))
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in handles {
        for result in handle.join().expect("Thread panicked") {
            result.expect("Guess failed");
        }
    }

    for id in ids {
        let stored = service.game(id).expect("Load failed");
        assert_eq!(*stored.status(), GameStatus::Won);
        assert_eq!(stored.guessed_string(), "AUDCIX");
    }
}

#[test]
fn test_service_over_sqlite() {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let repo = GameRepository::open(db_file.path().to_str().expect("Invalid path").to_string())
        .expect("Failed to open repository");
    let service = GameService::new(
        Arc::new(repo),
        Arc::new(FixedWordSource::new(["Bottle"]).expect("Valid words")),
    );

    let game = service.create_game().expect("Create failed");
    for letter in ["Z", "X"] {
        service.make_guess(*game.id(), letter).expect("Guess failed");
    }
    let outcome = service.make_guess(*game.id(), "Q").expect("Guess failed");
    assert_eq!(outcome.message(), "Game Over! The correct word was BOTTLE.");

    let stored = service.game(*game.id()).expect("Load failed");
    assert_eq!(*stored.status(), GameStatus::Lost);
    assert_eq!(*stored.wrong_count(), 3);
}
