use serde::Deserialize;

use crate::params::Params;

/// Game configuration
///
/// Every field falls back to its `Params` default when missing from a
/// deserialized source.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tick_interval_ms: u64,
    pub overload_warn_ms: u64,
    pub start_grace_ms: u64,
    pub ball_size: f32,
    pub ball_speed: f32,
    pub reset_delay_ms: f32,
    pub paddle_width: f32,
    pub paddle_depth: f32,
    pub paddle_speed: f32,
    pub paddle_control: f32,
    pub player_max_life: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_interval_ms: Params::TICK_INTERVAL_MS,
            overload_warn_ms: Params::OVERLOAD_WARN_MS,
            start_grace_ms: Params::START_GRACE_MS,
            ball_size: Params::BALL_SIZE,
            ball_speed: Params::BALL_SPEED,
            reset_delay_ms: Params::RESET_DELAY_MS,
            paddle_width: Params::PADDLE_WIDTH,
            paddle_depth: Params::PADDLE_DEPTH,
            paddle_speed: Params::PADDLE_SPEED,
            paddle_control: Params::PADDLE_CONTROL,
            player_max_life: Params::PLAYER_MAX_LIFE,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }
}
