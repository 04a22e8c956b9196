use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use game_core::{Action, Config};
use tokio::sync::{broadcast, RwLock};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::actor::SessionHandle;
use crate::error::SessionError;
use crate::ids;
use crate::session::{Session, SessionEvent, SessionInfo, SlotInfo};

type SessionMap = HashMap<String, SessionEntry>;

struct SessionEntry {
    handle: SessionHandle,
    task: JoinHandle<()>,
}

impl SessionEntry {
    fn is_live(&self) -> bool {
        !self.task.is_finished()
    }
}

/// Directory of live sessions.
///
/// The lock guards only the map of handles. Session state lives in each
/// actor, so no lock is ever held across a session's tick.
pub struct SessionRegistry {
    config: Config,
    sessions: RwLock<SessionMap>,
    computers: AtomicU64,
}

impl SessionRegistry {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            sessions: RwLock::new(HashMap::new()),
            computers: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    async fn handle(&self, session_id: &str) -> Result<SessionHandle, SessionError> {
        self.sessions
            .read()
            .await
            .get(session_id)
            .filter(|entry| entry.is_live())
            .map(|entry| entry.handle.clone())
            .ok_or_else(|| SessionError::SessionNotFound(session_id.to_string()))
    }

    /// New session with `player_id` seated in slot 1. Stopped sessions are
    /// reaped first, so the map only holds live sessions plus whatever ended
    /// since the last creation.
    pub async fn create_session(&self, player_id: &str) -> Result<SlotInfo, SessionError> {
        let mut sessions = self.sessions.write().await;
        prune(&mut sessions);
        let mut session_id = ids::session_id();
        while sessions.contains_key(&session_id) {
            session_id = ids::session_id();
        }

        let session = Session::setup(session_id.clone(), player_id, self.config.clone(), rand::random());
        let (handle, task) = SessionHandle::spawn(session);
        sessions.insert(session_id.clone(), SessionEntry { handle, task });

        Ok(SlotInfo {
            session_id,
            player_num: 1,
        })
    }

    /// New session: creator in slot 1, computers in the rest, started
    pub async fn create_quick_session(&self, player_id: &str) -> Result<SlotInfo, SessionError> {
        let slot = self.create_session(player_id).await?;
        let handle = self.handle(&slot.session_id).await?;
        for _ in 0..3 {
            handle.add_computer(&self.next_computer_id()).await?;
        }
        handle.start().await?;
        info!(session = %slot.session_id, player = player_id, "quick session started");
        Ok(slot)
    }

    fn next_computer_id(&self) -> String {
        ids::computer_id(self.computers.fetch_add(1, Ordering::Relaxed) + 1)
    }

    pub async fn join_session(&self, session_id: &str, player_id: &str) -> Result<SlotInfo, SessionError> {
        self.handle(session_id).await?.join(player_id).await
    }

    pub async fn add_computer(&self, session_id: &str) -> Result<SlotInfo, SessionError> {
        let computer_id = self.next_computer_id();
        self.handle(session_id).await?.add_computer(&computer_id).await
    }

    pub async fn leave_session(&self, session_id: &str, player_id: &str) -> Result<u8, SessionError> {
        self.handle(session_id).await?.leave(player_id).await
    }

    pub async fn start_session(&self, session_id: &str) -> Result<(), SessionError> {
        self.handle(session_id).await?.start().await
    }

    pub async fn set_action(&self, session_id: &str, player_id: &str, action: Action) -> Result<(), SessionError> {
        self.handle(session_id).await?.set_action(player_id, action).await
    }

    pub async fn subscribe(&self, session_id: &str) -> Result<broadcast::Receiver<SessionEvent>, SessionError> {
        Ok(self.handle(session_id).await?.subscribe())
    }

    /// Live sessions, ordered by id
    pub async fn list_sessions(&self) -> Vec<SessionInfo> {
        let handles: Vec<SessionHandle> = {
            let sessions = self.sessions.read().await;
            sessions
                .values()
                .filter(|entry| entry.is_live())
                .map(|entry| entry.handle.clone())
                .collect()
        };

        let mut listed = Vec::with_capacity(handles.len());
        for handle in handles {
            // The actor may stop between the snapshot and the query
            if let Ok(info) = handle.info().await {
                listed.push(info);
            }
        }
        listed.sort_by(|a, b| a.session_id.cmp(&b.session_id));
        listed
    }

    /// Stop a session's actor and forget it
    pub async fn shutdown_session(&self, session_id: &str) -> Result<(), SessionError> {
        let entry = self
            .sessions
            .write()
            .await
            .remove(session_id)
            .ok_or_else(|| SessionError::SessionNotFound(session_id.to_string()))?;

        if entry.handle.shutdown().await.is_err() {
            warn!(session = session_id, "session already stopped");
        }
        info!(session = session_id, "session removed");
        Ok(())
    }

    /// Forget sessions whose actor has stopped. Returns how many went.
    pub async fn reap(&self) -> usize {
        prune(&mut *self.sessions.write().await)
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

fn prune(sessions: &mut SessionMap) -> usize {
    let before = sessions.len();
    sessions.retain(|_id, entry| entry.is_live());
    let reaped = before - sessions.len();
    if reaped > 0 {
        info!(reaped, remaining = sessions.len(), "reaped ended sessions");
    }
    reaped
}
