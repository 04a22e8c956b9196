use std::fmt;

use proto::ErrorKind;

/// Recoverable failures of session commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Every slot is taken
    Capacity,
    /// Start requested before all four slots were filled
    NotReady { open_slots: usize },
    /// Action submitted while the session is not running
    NotStarted,
    /// The session has ended or its loop is gone
    Ended,
    SessionNotFound(String),
    PlayerNotFound(String),
}

impl SessionError {
    /// Wire category for clients
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Capacity => ErrorKind::Capacity,
            Self::NotReady { .. } => ErrorKind::NotReady,
            Self::NotStarted => ErrorKind::NotStarted,
            Self::Ended => ErrorKind::Ended,
            Self::SessionNotFound(_) | Self::PlayerNotFound(_) => ErrorKind::NotFound,
        }
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Capacity => write!(f, "Session is full"),
            Self::NotReady { open_slots } => {
                write!(f, "Not enough players: {open_slots} slot(s) still open")
            }
            Self::NotStarted => write!(f, "Session has not started yet"),
            Self::Ended => write!(f, "Session has ended"),
            Self::SessionNotFound(id) => write!(f, "Unknown session: {id}"),
            Self::PlayerNotFound(id) => write!(f, "Unknown player: {id}"),
        }
    }
}

impl std::error::Error for SessionError {}
