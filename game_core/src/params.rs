/// Game tuning parameters for four-sided Pong
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Arena: a fixed square spanning [-ARENA_HALF, ARENA_HALF] on both axes
    pub const ARENA_HALF: f32 = 50.0;

    // Paddle
    pub const PADDLE_WIDTH: f32 = 20.0;
    pub const PADDLE_DEPTH: f32 = 2.0;
    pub const PADDLE_SPEED: f32 = 60.0; // units per second
    pub const PLAYER_MAX_LIFE: u32 = 5;

    // Ball
    pub const BALL_SIZE: f32 = 2.0;
    pub const BALL_SPEED: f32 = 50.0; // units per second
    pub const RESET_DELAY_MS: f32 = 1000.0;
    pub const PADDLE_CONTROL: f32 = 1.5; // hit offset / paddle momentum blend
    pub const LAUNCH_EXCLUSION_DEG: f32 = 5.0;

    // Loop
    pub const TICK_INTERVAL_MS: u64 = 15;
    pub const OVERLOAD_WARN_MS: u64 = 30;
    pub const START_GRACE_MS: u64 = 3000;
}
