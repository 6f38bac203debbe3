//! HTTP client for the hangman REST API.

use anyhow::{Context, Result, bail};
use reqwest::StatusCode;
use tracing::{debug, info, instrument, warn};

use crate::api::{CreatedGame, ErrorBody, GuessRequest, GuessResponse};
use crate::games::hangman::{GameView, SessionId};

/// Server reply to a guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessReply {
    /// The guess was applied.
    Accepted(GuessResponse),
    /// The server rejected the guess; the game did not change.
    Rejected(ErrorBody),
}

/// REST client for a hangman server.
#[derive(Debug, Clone)]
pub struct HangmanClient {
    base_url: String,
    client: reqwest::Client,
}

impl HangmanClient {
    /// Creates a client for the server at `base_url`, e.g. `http://127.0.0.1:8000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    /// Starts a new game and returns its id.
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn create_game(&self) -> Result<SessionId> {
        let response = self
            .client
            .post(format!("{}/games", self.base_url))
            .send()
            .await
            .context("Failed to reach server")?;

        if response.status() != StatusCode::CREATED {
            let status = response.status();
            let body: ErrorBody = response.json().await.context("Unreadable error body")?;
            bail!("Server refused to create a game ({}): {}", status, body.error);
        }

        let created: CreatedGame = response.json().await.context("Unreadable create response")?;
        info!(game_id = %created.id, "Game created");
        Ok(created.id)
    }

    /// Fetches the public state of a game.
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn game_state(&self, id: SessionId) -> Result<GameView> {
        let response = self
            .client
            .get(format!("{}/games/{}", self.base_url, id))
            .send()
            .await
            .context("Failed to reach server")?;

        if !response.status().is_success() {
            let status = response.status();
            let body: ErrorBody = response.json().await.context("Unreadable error body")?;
            bail!("Could not load game {} ({}): {}", id, status, body.error);
        }

        let view = response.json().await.context("Unreadable game state")?;
        debug!(?view, "Game state fetched");
        Ok(view)
    }

    /// Submits a guess.
    ///
    /// Client errors from the server come back as [`GuessReply::Rejected`];
    /// anything else unexpected is an error.
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn guess(&self, id: SessionId, guess: &str) -> Result<GuessReply> {
        let response = self
            .client
            .post(format!("{}/games/{}/guess", self.base_url, id))
            .json(&GuessRequest {
                guess: guess.to_string(),
            })
            .send()
            .await
            .context("Failed to reach server")?;

        let status = response.status();
        if status.is_success() {
            let accepted: GuessResponse = response.json().await.context("Unreadable guess response")?;
            debug!(correct = accepted.correct, "Guess accepted");
            Ok(GuessReply::Accepted(accepted))
        } else if status == StatusCode::BAD_REQUEST {
            let rejected: ErrorBody = response.json().await.context("Unreadable error body")?;
            warn!(error = %rejected.error, "Guess rejected");
            Ok(GuessReply::Rejected(rejected))
        } else {
            let body: ErrorBody = response.json().await.context("Unreadable error body")?;
            bail!("Guess failed ({}): {}", status, body.error)
        }
    }
}

/// Formats a game view for a terminal, e.g.
///
/// ```text
/// B _ T T _ E
/// Wrong guesses: 1 / 3   Used: T, B, E, Z   [InProgress]
/// ```
pub fn render_view(view: &GameView) -> String {
    let word = view
        .masked_word
        .chars()
        .map(String::from)
        .collect::<Vec<_>>()
        .join(" ");

    let used = if view.guessed_letters.is_empty() {
        "None".to_string()
    } else {
        view.guessed_letters
            .chars()
            .map(String::from)
            .collect::<Vec<_>>()
            .join(", ")
    };

    format!(
        "{}\nWrong guesses: {} / {}   Used: {}   [{}]",
        word,
        view.wrong_guesses_made,
        view.max_wrong_guesses(),
        used,
        view.status
    )
}
