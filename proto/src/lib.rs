//! Network protocol for four-sided Pong sessions
//!
//! Uses postcard for efficient binary serialization

use postcard::{from_bytes, to_allocvec};
use serde::{Deserialize, Serialize};

/// Paddle movement requested by a client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaddleAction {
    Left,
    Right,
    None,
}

// ============================================================================
// C2S Messages (Client to Server)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum C2S {
    /// Open a new session and take slot 1
    CreateSession,

    /// Open a session, take slot 1, fill the rest with computers and start
    QuickPlay,

    /// Take the lowest free slot in an existing session
    JoinSession { session_id: String },

    /// Seat a computer player in the lowest free slot
    AddComputer { session_id: String },

    /// Give up this player's slot
    LeaveSession { session_id: String },

    /// Start a full session
    StartSession { session_id: String },

    /// Set this player's paddle action for the next tick
    SetAction {
        session_id: String,
        action: PaddleAction,
    },

    /// List sessions and their open slots
    ListSessions,
}

// ============================================================================
// S2C Messages (Server to Client)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallMsg {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaddleMsg {
    pub player_num: u8,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub life: u32,
    pub active: bool,
    pub is_computer: bool,
}

/// Per-tick state of one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotMsg {
    pub tick: u32,
    pub elapsed_ms: f32,
    pub ball: BallMsg,
    pub paddles: Vec<PaddleMsg>, // occupied slots only, in player order
    pub hit_paddle: bool,        // sound cues
    pub hit_wall: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: String,
    pub open_slots: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    Capacity,
    NotReady,
    NotStarted,
    NotFound,
    Ended,
    Malformed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum S2C {
    /// Session opened, sender seated
    SessionCreated { session_id: String, player_num: u8 },

    /// Sender seated in an existing session
    Joined { session_id: String, player_num: u8 },

    /// Session is running; the ball launches after the grace delay
    Started { session_id: String },

    /// Sender's slot has been freed
    Left { session_id: String },

    /// Action will apply on the next tick
    ActionAccepted,

    /// Open sessions
    Sessions(Vec<SessionSummary>),

    /// Game state snapshot
    Snapshot(SnapshotMsg),

    /// Ball got past `player_num`'s paddle
    PointScored { player_num: u8 },

    /// Game over message; `None` when nobody survived
    GameOver { winner: Option<u8> },

    /// A command failed
    Error { kind: ErrorKind, message: String },
}

// ============================================================================
// Serialization Helpers
// ============================================================================

impl C2S {
    /// Serialize C2S message to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, postcard::Error> {
        to_allocvec(self)
    }

    /// Deserialize C2S message from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, postcard::Error> {
        from_bytes(bytes)
    }
}

impl S2C {
    /// Serialize S2C message to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, postcard::Error> {
        to_allocvec(self)
    }

    /// Deserialize S2C message from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, postcard::Error> {
        from_bytes(bytes)
    }
}
