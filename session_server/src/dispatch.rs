use game_core::Action;
use proto::{BallMsg, ErrorKind, PaddleAction, PaddleMsg, SessionSummary, SnapshotMsg, C2S, S2C};
use tracing::{debug, warn};

use crate::error::SessionError;
use crate::registry::SessionRegistry;
use crate::session::{SessionEvent, SessionInfo, Snapshot};

/// Handle one decoded client message on behalf of `player_id`
pub async fn dispatch(registry: &SessionRegistry, player_id: &str, msg: C2S) -> S2C {
    debug!(player = player_id, ?msg, "dispatching");

    let result = match msg {
        C2S::CreateSession => registry
            .create_session(player_id)
            .await
            .map(|slot| S2C::SessionCreated {
                session_id: slot.session_id,
                player_num: slot.player_num,
            }),
        C2S::QuickPlay => registry
            .create_quick_session(player_id)
            .await
            .map(|slot| S2C::SessionCreated {
                session_id: slot.session_id,
                player_num: slot.player_num,
            }),
        C2S::JoinSession { session_id } => registry
            .join_session(&session_id, player_id)
            .await
            .map(|slot| S2C::Joined {
                session_id: slot.session_id,
                player_num: slot.player_num,
            }),
        C2S::AddComputer { session_id } => registry
            .add_computer(&session_id)
            .await
            .map(|slot| S2C::Joined {
                session_id: slot.session_id,
                player_num: slot.player_num,
            }),
        C2S::LeaveSession { session_id } => registry
            .leave_session(&session_id, player_id)
            .await
            .map(|_| S2C::Left { session_id }),
        C2S::StartSession { session_id } => registry
            .start_session(&session_id)
            .await
            .map(|()| S2C::Started { session_id }),
        C2S::SetAction { session_id, action } => registry
            .set_action(&session_id, player_id, action_from_wire(action))
            .await
            .map(|()| S2C::ActionAccepted),
        C2S::ListSessions => Ok(S2C::Sessions(
            registry
                .list_sessions()
                .await
                .iter()
                .map(summary_message)
                .collect(),
        )),
    };

    result.unwrap_or_else(|err| error_message(&err))
}

/// Decode, dispatch and encode. Undecodable input gets a `Malformed` error
/// reply rather than failing the connection.
pub async fn handle_bytes(
    registry: &SessionRegistry,
    player_id: &str,
    bytes: &[u8],
) -> Result<Vec<u8>, postcard::Error> {
    let reply = match C2S::from_bytes(bytes) {
        Ok(msg) => dispatch(registry, player_id, msg).await,
        Err(err) => {
            warn!(player = player_id, len = bytes.len(), %err, "malformed message");
            S2C::Error {
                kind: ErrorKind::Malformed,
                message: err.to_string(),
            }
        }
    };
    reply.to_bytes()
}

pub fn action_from_wire(action: PaddleAction) -> Action {
    match action {
        PaddleAction::Left => Action::Left,
        PaddleAction::Right => Action::Right,
        PaddleAction::None => Action::None,
    }
}

pub fn error_message(err: &SessionError) -> S2C {
    S2C::Error {
        kind: err.kind(),
        message: err.to_string(),
    }
}

fn summary_message(info: &SessionInfo) -> SessionSummary {
    SessionSummary {
        session_id: info.session_id.clone(),
        open_slots: info.open_slots as u8,
    }
}

/// Wire form of a session event
pub fn event_message(event: &SessionEvent) -> S2C {
    match event {
        SessionEvent::Snapshot(snapshot) => S2C::Snapshot(snapshot_message(snapshot)),
        SessionEvent::PointScored { player_num } => S2C::PointScored {
            player_num: *player_num,
        },
        SessionEvent::GameOver { winner } => S2C::GameOver { winner: *winner },
    }
}

fn snapshot_message(snapshot: &Snapshot) -> SnapshotMsg {
    SnapshotMsg {
        tick: snapshot.tick,
        elapsed_ms: snapshot.elapsed_ms,
        ball: BallMsg {
            x: snapshot.ball.position.x,
            y: snapshot.ball.position.y,
            vx: snapshot.ball.velocity.x,
            vy: snapshot.ball.velocity.y,
        },
        paddles: snapshot
            .paddles
            .iter()
            .map(|paddle| PaddleMsg {
                player_num: paddle.player_num,
                x: paddle.position.x,
                y: paddle.position.y,
                width: paddle.width,
                life: paddle.life,
                active: paddle.active,
                is_computer: paddle.is_computer,
            })
            .collect(),
        hit_paddle: snapshot.hit_paddle,
        hit_wall: snapshot.hit_wall,
    }
}
