use std::error::Error;
use std::fs;
use std::sync::Arc;

use game_core::Config;
use proto::{PaddleAction, C2S, S2C};
use session_server::{event_message, handle_bytes, ids, SessionRegistry};
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_SESSIONS: usize = 2;

/// Runs a few quick-play sessions to completion and logs their progress.
///
/// Usage: `pong-sessions [config.json]`. `PONG_SESSIONS` sets how many
/// sessions to run; `RUST_LOG` controls log output.
#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = load_config(std::env::args().nth(1).as_deref())?;
    let session_count = std::env::var("PONG_SESSIONS")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(DEFAULT_SESSIONS);
    info!(session_count, tick_ms = config.tick_interval_ms, "starting demo");

    let registry = Arc::new(SessionRegistry::new(config));
    let mut games = Vec::with_capacity(session_count);
    for _ in 0..session_count {
        let player_id = ids::player_id();
        let request = C2S::QuickPlay.to_bytes()?;
        let reply = S2C::from_bytes(&handle_bytes(&registry, &player_id, &request).await?)?;
        let S2C::SessionCreated { session_id, .. } = reply else {
            warn!(?reply, "quick play failed");
            continue;
        };
        games.push(tokio::spawn(play(Arc::clone(&registry), session_id, player_id)));
    }

    for game in games {
        game.await?;
    }
    let reaped = registry.reap().await;
    info!(reaped, remaining = registry.session_count().await, "demo finished");
    Ok(())
}

fn load_config(path: Option<&str>) -> Result<Config, Box<dyn Error>> {
    match path {
        Some(path) => {
            let config = serde_json::from_str(&fs::read_to_string(path)?)?;
            info!(path, "loaded config");
            Ok(config)
        }
        None => Ok(Config::default()),
    }
}

/// Follow one session, steering the human paddle after every point
async fn play(registry: Arc<SessionRegistry>, session_id: String, player_id: String) {
    let mut events = match registry.subscribe(&session_id).await {
        Ok(events) => events,
        Err(err) => {
            warn!(session = %session_id, %err, "cannot follow session");
            return;
        }
    };

    let mut action = PaddleAction::Right;
    loop {
        match events.recv().await {
            Ok(event) => match event_message(&event) {
                S2C::PointScored { player_num } => {
                    info!(session = %session_id, player_num, "point");
                    action = match action {
                        PaddleAction::Right => PaddleAction::Left,
                        _ => PaddleAction::Right,
                    };
                    let msg = C2S::SetAction {
                        session_id: session_id.clone(),
                        action,
                    };
                    if let Ok(bytes) = msg.to_bytes() {
                        let _ = handle_bytes(&registry, &player_id, &bytes).await;
                    }
                }
                S2C::GameOver { winner } => {
                    info!(session = %session_id, ?winner, "game over");
                    return;
                }
                _ => {}
            },
            Err(RecvError::Lagged(skipped)) => {
                warn!(session = %session_id, skipped, "event receiver lagged");
            }
            Err(RecvError::Closed) => return,
        }
    }
}
