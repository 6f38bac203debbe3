//! First-class invariants for hangman sessions.
//!
//! Each invariant is a logical property every stored session must satisfy.
//! They are checked after each accepted guess in debug builds and can be
//! tested independently.

use super::Session;
use super::types::GameStatus;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

impl<S, I1, I2, I3, I4> InvariantSet<S> for (I1, I2, I3, I4)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
    I4: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = match <(I1, I2)>::check_all(state) {
            Ok(()) => Vec::new(),
            Err(v) => v,
        };

        if let Err(more) = <(I3, I4)>::check_all(state) {
            violations.extend(more);
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Invariant: the wrong-guess counter never exceeds the cap.
pub struct WrongCountCapped;

impl Invariant<Session> for WrongCountCapped {
    fn holds(session: &Session) -> bool {
        (0..=*session.max_wrong_allowed()).contains(session.wrong_count())
    }

    fn description() -> &'static str {
        "Wrong guesses stay within 0..=max_wrong_allowed"
    }
}

/// Invariant: guessed letters are unique, and wrong guesses match the counter.
pub struct GuessHistoryConsistent;

impl Invariant<Session> for GuessHistoryConsistent {
    fn holds(session: &Session) -> bool {
        let letters = session.guessed_letters();
        let unique = letters
            .iter()
            .enumerate()
            .all(|(i, l)| !letters[..i].contains(l));

        let wrong = letters
            .iter()
            .filter(|l| !session.secret_word().contains(l.as_char()))
            .count() as i32;

        unique && wrong == *session.wrong_count()
    }

    fn description() -> &'static str {
        "Guessed letters are unique and wrong guesses match the counter"
    }
}

/// Invariant: a won session has every letter of the word guessed.
pub struct WonImpliesSolved;

impl Invariant<Session> for WonImpliesSolved {
    fn holds(session: &Session) -> bool {
        *session.status() != GameStatus::Won || session.is_solved()
    }

    fn description() -> &'static str {
        "Won sessions have every letter guessed"
    }
}

/// Invariant: a lost session hit the cap exactly and is not solved.
pub struct LostImpliesCapped;

impl Invariant<Session> for LostImpliesCapped {
    fn holds(session: &Session) -> bool {
        *session.status() != GameStatus::Lost
            || (session.wrong_count() == session.max_wrong_allowed() && !session.is_solved())
    }

    fn description() -> &'static str {
        "Lost sessions reached the wrong-guess cap without solving the word"
    }
}

/// All hangman session invariants as a composable set.
pub type SessionInvariants = (
    WrongCountCapped,
    GuessHistoryConsistent,
    WonImpliesSolved,
    LostImpliesCapped,
);
