//! HTTP server: REST endpoints over the game service.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, instrument, warn};

use crate::api::{CreatedGame, ErrorBody, GuessRequest, GuessResponse, Health};
use crate::config::ServerConfig;
use crate::games::hangman::{GameView, GuessError, SessionId};
use crate::service::{GameService, ServiceError};

/// Error surfaced by an HTTP handler.
#[derive(Debug, derive_more::Display, derive_more::From)]
pub enum ApiError {
    /// The service rejected or failed the request.
    #[display("{}", _0)]
    Service(ServiceError),

    /// The path segment is not a game id.
    #[display("Malformed game id '{}'", _0)]
    MalformedId(String),

    /// The blocking task running the request panicked or was cancelled.
    #[display("Request task failed: {}", _0)]
    Task(tokio::task::JoinError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Service(ServiceError::NotFound(id)) => {
                debug!(game_id = %id, "Game not found");
                (StatusCode::NOT_FOUND, ErrorBody::message("Game not Found."))
            }
            ApiError::MalformedId(raw) => {
                debug!(%raw, "Malformed game id");
                (StatusCode::NOT_FOUND, ErrorBody::message("Game not Found."))
            }
            ApiError::Service(ServiceError::CreationFailed(reason)) => {
                error!(%reason, "Game creation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::message("Could not create game."),
                )
            }
            ApiError::Service(ServiceError::Rejected { error, session }) => {
                let body = match &error {
                    // Input-level rejection: nothing about the session to echo.
                    GuessError::InvalidGuess(reason) => ErrorBody::message(reason.to_string()),
                    GuessError::GameAlreadyOver(_) | GuessError::DuplicateGuess(_) => {
                        ErrorBody::with_state(error.to_string(), GameView::project(&session))
                    }
                };
                (StatusCode::BAD_REQUEST, body)
            }
            ApiError::Service(ServiceError::Store(err)) => {
                error!(error = %err, "Store failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::message("Internal server error."),
                )
            }
            ApiError::Task(err) => {
                error!(error = %err, "Request task failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::message("Internal server error."),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Parses a game id path segment. Only plain decimal digits name a game.
fn parse_id(raw: &str) -> Result<SessionId, ApiError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ApiError::MalformedId(raw.to_string()));
    }
    raw.parse::<i32>()
        .map(SessionId::new)
        .map_err(|_| ApiError::MalformedId(raw.to_string()))
}

/// Runs a blocking service call off the async runtime.
async fn blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, ServiceError> + Send + 'static,
    T: Send + 'static,
{
    Ok(tokio::task::spawn_blocking(f).await??)
}

/// Builds the application router.
///
/// Routes:
/// - `POST /games` creates a game and returns its id
/// - `GET /games/{id}` returns the public view of a game
/// - `POST /games/{id}/guess` submits a guess
/// - `GET /health` liveness probe
#[instrument(skip(service))]
pub fn router(service: GameService, cors_permissive: bool) -> Router {
    let router = Router::new()
        .route("/health", get(health))
        .route("/games", post(create_game))
        .route("/games/{id}", get(game_state))
        .route("/games/{id}/guess", post(make_guess))
        .layer(TraceLayer::new_for_http())
        .with_state(service);

    if cors_permissive {
        debug!("Permissive CORS enabled");
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

/// Binds to the configured address and serves until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
#[instrument(skip_all, fields(host = %config.host(), port = config.port()))]
pub async fn serve(config: &ServerConfig, service: GameService) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind((config.host().as_str(), *config.port())).await?;
    info!(addr = %listener.local_addr()?, "Hangman server listening");

    axum::serve(listener, router(service, *config.cors_permissive()))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            warn!(error = %e, "Cannot listen for Ctrl-C; serving until killed");
            std::future::pending::<()>().await;
        }
    }
}

async fn health() -> Json<Health> {
    Json(Health {
        status: "ok".to_string(),
    })
}

async fn create_game(
    State(service): State<GameService>,
) -> Result<(StatusCode, Json<CreatedGame>), ApiError> {
    let session = blocking(move || service.create_game()).await?;
    Ok((StatusCode::CREATED, Json(CreatedGame { id: *session.id() })))
}

async fn game_state(
    State(service): State<GameService>,
    Path(id): Path<String>,
) -> Result<Json<GameView>, ApiError> {
    let id = parse_id(&id)?;
    let session = blocking(move || service.game(id)).await?;
    Ok(Json(GameView::project(&session)))
}

async fn make_guess(
    State(service): State<GameService>,
    Path(id): Path<String>,
    body: Result<Json<GuessRequest>, JsonRejection>,
) -> Result<Json<GuessResponse>, ApiError> {
    let id = parse_id(&id)?;
    let guess = match body {
        Ok(Json(req)) => req.guess,
        Err(rejection) => {
            warn!(%rejection, "Unreadable guess body, treating as empty guess");
            String::new()
        }
    };

    let outcome = blocking(move || service.make_guess(id, &guess)).await?;
    Ok(Json(GuessResponse {
        correct: *outcome.correct(),
        message: outcome.message().clone(),
        game_state: GameView::project(outcome.session()),
    }))
}
