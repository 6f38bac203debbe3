//! Tests for the SQLite game repository and its session store implementation.

use diesel::prelude::*;
use diesel::sql_types::{Integer, Text};
use tempfile::NamedTempFile;

use strictly_hangman::{
    DbErrorKind, GameRepository, GameStatus, NewGameRow, SessionId, SessionStore, StoreError,
    apply_guess, new_session,
};

/// Creates a temporary database file with schema applied, returns the file
/// handle (must stay in scope to keep the file alive) and a ready repository.
fn setup_test_db() -> (NamedTempFile, GameRepository) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();
    let repo = GameRepository::open(db_path).expect("Failed to open repository");
    (db_file, repo)
}

#[test]
fn test_insert_game() {
    let (_db, repo) = setup_test_db();
    let row = repo
        .insert_game(NewGameRow::new("BOTTLE".to_string(), 3))
        .expect("Insert failed");

    assert!(*row.id() > 0);
    assert_eq!(row.word_to_guess(), "BOTTLE");
    assert_eq!(row.guessed_letters(), "");
    assert_eq!(*row.incorrect_guesses(), 0);
    assert_eq!(*row.max_incorrect_guesses(), 3);
    assert_eq!(row.status(), "InProgress");
}

#[test]
fn test_find_game_missing() {
    let (_db, repo) = setup_test_db();
    assert!(repo.find_game(42).expect("Query failed").is_none());
}

#[test]
fn test_reopen_keeps_games() {
    let (db, repo) = setup_test_db();
    let created = repo.create(new_session("Pen")).expect("Create failed");

    let reopened = GameRepository::open(db.path().to_str().expect("Invalid path").to_string())
        .expect("Reopen failed");
    let loaded = reopened.get(*created.id()).expect("Get failed");
    assert_eq!(loaded, created);
}

#[test]
fn test_store_create_and_get() {
    let (_db, repo) = setup_test_db();
    let created = repo.create(new_session("Hangman")).expect("Create failed");

    assert_eq!(created.secret_word(), "HANGMAN");
    assert_eq!(*created.max_wrong_allowed(), 4);
    assert_eq!(*created.status(), GameStatus::InProgress);
    assert!(created.guessed_letters().is_empty());

    let loaded = repo.get(*created.id()).expect("Get failed");
    assert_eq!(loaded, created);
}

#[test]
fn test_store_get_missing_is_not_found() {
    let (_db, repo) = setup_test_db();
    let result = repo.get(SessionId::new(999));
    assert!(matches!(result, Err(StoreError::NotFound(id)) if id == SessionId::new(999)));
}

#[test]
fn test_store_save_round_trips_guesses() {
    let (_db, repo) = setup_test_db();
    let created = repo.create(new_session("Bottle")).expect("Create failed");

    let mut session = created;
    for letter in ["T", "Z", "B"] {
        session = apply_guess(&session, letter).expect("Guess failed").into_session();
        repo.save(&session).expect("Save failed");
    }

    let loaded = repo.get(*session.id()).expect("Get failed");
    assert_eq!(loaded.guessed_string(), "TZB");
    assert_eq!(*loaded.wrong_count(), 1);
    assert_eq!(loaded, session);
}

#[test]
fn test_store_save_unknown_is_not_found() {
    let (db_a, repo_a) = setup_test_db();
    let (_db_b, repo_b) = setup_test_db();
    let session = repo_a.create(new_session("Pen")).expect("Create failed");
    drop(db_a);

    let result = repo_b.save(&session);
    assert!(matches!(result, Err(StoreError::NotFound(_))));
}

#[test]
fn test_list_filters_by_status_newest_first() {
    let (_db, repo) = setup_test_db();

    let first = repo.create(new_session("Pen")).expect("Create failed");
    let second = repo.create(new_session("Pen")).expect("Create failed");
    let third = repo.create(new_session("Bottle")).expect("Create failed");

    let mut won = first.clone();
    for letter in ["P", "E", "N"] {
        won = apply_guess(&won, letter).expect("Guess failed").into_session();
    }
    repo.save(&won).expect("Save failed");

    let all = repo.list(None).expect("List failed");
    let ids: Vec<_> = all.iter().map(|s| *s.id()).collect();
    assert_eq!(ids, vec![*third.id(), *second.id(), *first.id()]);

    let won_only = repo.list(Some(GameStatus::Won)).expect("List failed");
    assert_eq!(won_only.len(), 1);
    assert_eq!(*won_only[0].id(), *first.id());

    let lost_only = repo.list(Some(GameStatus::Lost)).expect("List failed");
    assert!(lost_only.is_empty());
}

#[test]
fn test_open_invalid_path_fails() {
    let result = GameRepository::open("/nonexistent/dir/games.db".to_string());
    let err = result.expect_err("Opening under a missing directory should fail");
    assert_eq!(err.kind, DbErrorKind::Connection);
}

/// Overwrites one column of a stored game with raw SQL.
fn corrupt(repo: &GameRepository, id: SessionId, column: &str, value: &str) {
    let mut conn = SqliteConnection::establish(repo.db_path()).expect("Failed to connect");
    diesel::sql_query(format!("UPDATE games SET {column} = ? WHERE id = ?"))
        .bind::<Text, _>(value)
        .bind::<Integer, _>(id.value())
        .execute(&mut conn)
        .expect("Raw update failed");
}

#[test]
fn test_unknown_status_is_corrupt_row() {
    let (_db, repo) = setup_test_db();
    let created = repo.create(new_session("Pen")).expect("Create failed");
    corrupt(&repo, *created.id(), "status", "Bogus");

    match repo.get(*created.id()) {
        Err(StoreError::Db(err)) => {
            assert_eq!(err.kind, DbErrorKind::CorruptRow);
            assert!(err.message.contains("Bogus"));
        }
        other => panic!("Expected a corrupt row error, got {other:?}"),
    }
}

#[test]
fn test_malformed_letters_are_corrupt_row() {
    let (_db, repo) = setup_test_db();
    let created = repo.create(new_session("Pen")).expect("Create failed");
    corrupt(&repo, *created.id(), "guessed_letters", "a1");

    assert!(matches!(
        repo.get(*created.id()),
        Err(StoreError::Db(ref err)) if err.kind == DbErrorKind::CorruptRow
    ));
    assert!(matches!(repo.list(None), Err(StoreError::Db(_))));
}
