use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use game_core::Action;
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tracing::{debug, error, info, warn};

use crate::error::SessionError;
use crate::session::{Session, SessionEvent, SessionInfo, SessionStatus, SlotInfo};
use crate::ticker::Ticker;

const COMMAND_BUFFER: usize = 64;
const EVENT_BUFFER: usize = 256;

type Reply<T> = oneshot::Sender<Result<T, SessionError>>;

/// Requests handled between ticks by a session's actor
#[derive(Debug)]
pub enum Command {
    Join {
        player_id: String,
        is_computer: bool,
        reply: Reply<SlotInfo>,
    },
    Leave {
        player_id: String,
        reply: Reply<u8>,
    },
    Start {
        reply: Reply<()>,
    },
    SetAction {
        player_id: String,
        action: Action,
        reply: Reply<()>,
    },
    Info {
        reply: oneshot::Sender<SessionInfo>,
    },
    Shutdown,
}

/// Cloneable front door to one running session actor
#[derive(Debug, Clone)]
pub struct SessionHandle {
    id: String,
    commands: mpsc::Sender<Command>,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionHandle {
    /// Move `session` into its own task
    pub fn spawn(session: Session) -> (Self, JoinHandle<()>) {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
        let (event_tx, _) = broadcast::channel(EVENT_BUFFER);
        let handle = Self {
            id: session.id().to_string(),
            commands: command_tx,
            events: event_tx.clone(),
        };
        let task = tokio::spawn(run_session(session, command_rx, event_tx));
        (handle, task)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Events emitted from now on. A slow receiver lags rather than
    /// stalling the session.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    async fn request<T>(&self, command: Command, reply: oneshot::Receiver<T>) -> Result<T, SessionError> {
        // A closed channel means the actor has stopped
        self.commands
            .send(command)
            .await
            .map_err(|_| SessionError::Ended)?;
        reply.await.map_err(|_| SessionError::Ended)
    }

    pub async fn join(&self, player_id: &str) -> Result<SlotInfo, SessionError> {
        self.seat(player_id, false).await
    }

    pub async fn add_computer(&self, computer_id: &str) -> Result<SlotInfo, SessionError> {
        self.seat(computer_id, true).await
    }

    async fn seat(&self, player_id: &str, is_computer: bool) -> Result<SlotInfo, SessionError> {
        let (reply, rx) = oneshot::channel();
        let command = Command::Join {
            player_id: player_id.to_string(),
            is_computer,
            reply,
        };
        self.request(command, rx).await?
    }

    pub async fn leave(&self, player_id: &str) -> Result<u8, SessionError> {
        let (reply, rx) = oneshot::channel();
        let command = Command::Leave {
            player_id: player_id.to_string(),
            reply,
        };
        self.request(command, rx).await?
    }

    pub async fn start(&self) -> Result<(), SessionError> {
        let (reply, rx) = oneshot::channel();
        self.request(Command::Start { reply }, rx).await?
    }

    pub async fn set_action(&self, player_id: &str, action: Action) -> Result<(), SessionError> {
        let (reply, rx) = oneshot::channel();
        let command = Command::SetAction {
            player_id: player_id.to_string(),
            action,
            reply,
        };
        self.request(command, rx).await?
    }

    pub async fn info(&self) -> Result<SessionInfo, SessionError> {
        let (reply, rx) = oneshot::channel();
        self.request(Command::Info { reply }, rx).await
    }

    pub async fn shutdown(&self) -> Result<(), SessionError> {
        self.commands
            .send(Command::Shutdown)
            .await
            .map_err(|_| SessionError::Ended)
    }
}

/// Actor loop: commands and ticks for one session, never both at once.
///
/// Commands win ties with a due tick, so an action that arrives before a
/// tick starts is applied in that tick.
async fn run_session(
    mut session: Session,
    mut commands: mpsc::Receiver<Command>,
    events: broadcast::Sender<SessionEvent>,
) {
    let id = session.id().to_string();
    info!(session = %id, "session actor started");
    let mut ticker: Option<Ticker> = None;

    while session.status() != SessionStatus::Ended {
        let deadline = ticker.as_ref().map(Ticker::deadline);

        tokio::select! {
            biased;

            command = commands.recv() => match command {
                Some(Command::Shutdown) | None => {
                    info!(session = %id, "session shut down");
                    break;
                }
                Some(command) => handle_command(&mut session, &mut ticker, command),
            },

            _ = time::sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                if let Some(ticker) = ticker.as_mut() {
                    run_tick(&mut session, ticker, &events);
                }
            }
        }
    }

    info!(
        session = %id,
        status = ?session.status(),
        ticks = session.tick_count(),
        "session actor stopped"
    );
}

fn handle_command(session: &mut Session, ticker: &mut Option<Ticker>, command: Command) {
    match command {
        Command::Join {
            player_id,
            is_computer,
            reply,
        } => {
            let result = if is_computer {
                session.add_computer(&player_id)
            } else {
                session.add_player(&player_id)
            };
            let _ = reply.send(result);
        }
        Command::Leave { player_id, reply } => {
            let _ = reply.send(session.remove_player(&player_id));
        }
        Command::Start { reply } => {
            let result = session.start();
            if result.is_ok() && ticker.is_none() {
                let started = Ticker::from_config(session.config());
                debug!(
                    session = %session.id(),
                    grace_ms = session.config().start_grace_ms,
                    "tick loop scheduled"
                );
                *ticker = Some(started);
            }
            let _ = reply.send(result);
        }
        Command::SetAction {
            player_id,
            action,
            reply,
        } => {
            let _ = reply.send(session.update_player_action(&player_id, action));
        }
        Command::Info { reply } => {
            let _ = reply.send(session.info());
        }
        // Handled by the loop
        Command::Shutdown => {}
    }
}

/// One tick. A panic skips the tick; corrupted state ends the session.
fn run_tick(session: &mut Session, ticker: &mut Ticker, events: &broadcast::Sender<SessionEvent>) {
    let (started, dt) = ticker.begin();

    match panic::catch_unwind(AssertUnwindSafe(|| session.tick(dt))) {
        Ok(emitted) => {
            for event in emitted {
                // No subscribers is not an error
                let _ = events.send(event);
            }
        }
        Err(payload) => {
            error!(
                session = %session.id(),
                tick = session.tick_count(),
                panic = panic_message(payload.as_ref()),
                "tick panicked, skipping"
            );
            if session.is_corrupted() {
                error!(session = %session.id(), "session state corrupted, ending");
                session.end();
            }
        }
    }

    let spent = ticker.finish(started);
    if ticker.is_overloaded(spent) {
        warn!(
            session = %session.id(),
            tick = session.tick_count(),
            spent_ms = spent.as_millis() as u64,
            "tick overran, engine overloaded"
        );
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "unknown panic"
    }
}
