//! Interactive terminal game against a running server.

use anyhow::Result;
use strictly_hangman::{GameStatus, GuessReply, HangmanClient, SessionId, render_view};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, instrument};

/// Plays one game, reading one guess per line from stdin until the game ends.
#[instrument]
pub async fn run_play(server_url: String, game_id: Option<i32>) -> Result<()> {
    let client = HangmanClient::new(server_url);

    let id = match game_id {
        Some(raw) => SessionId::new(raw),
        None => client.create_game().await?,
    };
    println!("Game #{} - good luck!", id);

    let mut view = client.game_state(id).await?;
    println!("{}", render_view(&view));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while view.status == GameStatus::InProgress {
        println!("Guess a letter:");
        let Some(line) = lines.next_line().await? else {
            debug!("stdin closed");
            println!("Bye! Resume with --game-id {}", id);
            return Ok(());
        };

        match client.guess(id, &line).await? {
            GuessReply::Accepted(reply) => {
                println!("{}", reply.message);
                view = reply.game_state;
            }
            GuessReply::Rejected(body) => {
                println!("{}", body.error);
                if let Some(state) = body.game_state {
                    view = state;
                }
            }
        }
        println!("{}", render_view(&view));
    }

    Ok(())
}
