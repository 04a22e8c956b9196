use hecs::Entity;

/// Time resource for tracking simulation time
#[derive(Debug, Clone, Copy)]
pub struct Time {
    pub dt: f32,  // Delta time for this step, in milliseconds
    pub now: f32, // Total simulated time, in milliseconds
}

impl Time {
    pub fn new(dt: f32, now: f32) -> Self {
        Self { dt, now }
    }
}

impl Default for Time {
    fn default() -> Self {
        Self { dt: 15.0, now: 0.0 }
    }
}

pub const SLOT_COUNT: usize = 4;

/// Paddle slots, indexed by player number 1..=4.
///
/// A player keeps their number for the whole session; freeing a slot never
/// renumbers anyone else.
#[derive(Debug, Clone, Copy, Default)]
pub struct Slots([Option<Entity>; SLOT_COUNT]);

impl Slots {
    pub fn new() -> Self {
        Self::default()
    }

    fn index(player_num: u8) -> Option<usize> {
        (1..=SLOT_COUNT as u8)
            .contains(&player_num)
            .then(|| player_num as usize - 1)
    }

    pub fn get(&self, player_num: u8) -> Option<Entity> {
        Self::index(player_num).and_then(|i| self.0[i])
    }

    pub fn occupy(&mut self, player_num: u8, entity: Entity) {
        if let Some(i) = Self::index(player_num) {
            self.0[i] = Some(entity);
        }
    }

    pub fn clear(&mut self, player_num: u8) -> Option<Entity> {
        Self::index(player_num).and_then(|i| self.0[i].take())
    }

    /// Lowest free player number
    pub fn first_free(&self) -> Option<u8> {
        self.0
            .iter()
            .position(Option::is_none)
            .map(|i| i as u8 + 1)
    }

    pub fn open_count(&self) -> usize {
        self.0.iter().filter(|slot| slot.is_none()).count()
    }

    pub fn is_full(&self) -> bool {
        self.open_count() == 0
    }

    /// Occupied slots in player-number order
    pub fn iter(&self) -> impl Iterator<Item = (u8, Entity)> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.map(|entity| (i as u8 + 1, entity)))
    }
}

/// Random number generator
pub struct GameRng(pub rand::rngs::StdRng);

impl GameRng {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::seed_from_u64(seed))
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(12345)
    }
}

/// Events that occurred during this step
#[derive(Debug, Clone, Default)]
pub struct Events {
    pub point_scored: Option<u8>, // player number whose wall was breached
    pub ball_hit_paddle: bool,
    pub ball_hit_wall: bool,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.point_scored = None;
        self.ball_hit_paddle = false;
        self.ball_hit_wall = false;
    }
}

/// Relaunch timer for the ball after a reset
#[derive(Debug, Clone, Copy, Default)]
pub struct RespawnState {
    pub timer: f32, // Milliseconds remaining before the ball relaunches
    pub pending: bool,
}

impl RespawnState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_delay(&mut self, delay: f32) {
        self.timer = delay;
        self.pending = true;
    }

    /// Count down by `dt`. Returns true on the step the delay runs out.
    pub fn update(&mut self, dt: f32) -> bool {
        if !self.pending {
            return false;
        }
        self.timer = (self.timer - dt).max(0.0);
        if self.timer <= 0.0 {
            self.pending = false;
            return true;
        }
        false
    }

    pub fn can_respawn(&self) -> bool {
        !self.pending
    }
}
