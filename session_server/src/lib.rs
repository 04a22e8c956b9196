//! Session runtime for four-sided Pong.
//!
//! Each session runs as its own tokio task that owns the game world and
//! serializes player commands with its tick loop. The registry maps session
//! ids to those tasks and `dispatch` turns wire messages into registry calls.

pub mod actor;
pub mod dispatch;
pub mod error;
pub mod ids;
pub mod registry;
pub mod session;
pub mod ticker;

pub use actor::{Command, SessionHandle};
pub use dispatch::{dispatch, event_message, handle_bytes};
pub use error::SessionError;
pub use registry::SessionRegistry;
pub use session::{Session, SessionEvent, SessionInfo, SessionStatus, SlotInfo, Snapshot};
pub use ticker::Ticker;
