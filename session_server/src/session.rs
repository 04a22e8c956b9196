use game_core::*;
use hecs::{Entity, World};
use tracing::{debug, info};

use crate::error::SessionError;

/// Session lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// Created, waiting for all four slots to fill
    Setup,
    /// Full and ticking
    Running,
    /// One or zero paddles left with life; never ticks again
    Ended,
}

/// Where a player was seated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotInfo {
    pub session_id: String,
    pub player_num: u8,
}

/// Listing entry for a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInfo {
    pub session_id: String,
    pub status: SessionStatus,
    pub open_slots: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BallState {
    pub position: Vector2,
    pub velocity: Vector2,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaddleState {
    pub player_num: u8,
    pub position: Vector2,
    pub width: f32,
    pub life: u32,
    pub active: bool,
    pub is_computer: bool,
}

/// Ball and every seated paddle after one tick
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub tick: u32,
    pub elapsed_ms: f32, // simulated time since the session started
    pub ball: BallState,
    pub paddles: Vec<PaddleState>,
    pub hit_paddle: bool, // ball bounced off a paddle this tick
    pub hit_wall: bool,   // ball bounced off an empty wall this tick
}

/// Outbound events, in the order a tick emits them
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Snapshot(Snapshot),
    PointScored { player_num: u8 },
    GameOver { winner: Option<u8> },
}

/// One four-player game: its world, its slots and its tick resources.
///
/// Nothing here is shared with any other session. Callers serialize access;
/// the actor in `crate::actor` owns each `Session` outright.
pub struct Session {
    id: String,
    status: SessionStatus,
    world: World,
    slots: Slots,
    ball: Entity,
    config: Config,
    time: Time,
    events: Events,
    respawn: RespawnState,
    rng: GameRng,
    tick: u32,
}

impl Session {
    /// Create a session with its ball at rest and `first_player_id` in slot 1
    pub fn setup(id: impl Into<String>, first_player_id: &str, config: Config, seed: u64) -> Self {
        let mut world = World::new();
        let ball = create_ball(&mut world, &config);
        let first = create_paddle(&mut world, first_player_id, 1, false, &config);
        let mut slots = Slots::new();
        slots.occupy(1, first);

        let id = id.into();
        info!(session = %id, player = first_player_id, "session created");

        Self {
            id,
            status: SessionStatus::Setup,
            world,
            slots,
            ball,
            time: Time::new(config.tick_interval_ms as f32, 0.0),
            config,
            events: Events::new(),
            respawn: RespawnState::new(),
            rng: GameRng::new(seed),
            tick: 0,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn tick_count(&self) -> u32 {
        self.tick
    }

    pub fn open_slots(&self) -> usize {
        self.slots.open_count()
    }

    pub fn info(&self) -> SessionInfo {
        SessionInfo {
            session_id: self.id.clone(),
            status: self.status,
            open_slots: self.open_slots(),
        }
    }

    fn find_player(&self, player_id: &str) -> Option<(u8, Entity)> {
        self.slots.iter().find(|(_num, entity)| {
            self.world
                .get::<&Paddle>(*entity)
                .map(|paddle| paddle.player_id == player_id)
                .unwrap_or(false)
        })
    }

    /// Seat a human player in the lowest free slot
    pub fn add_player(&mut self, player_id: &str) -> Result<SlotInfo, SessionError> {
        self.seat(player_id, false)
    }

    /// Seat a computer player in the lowest free slot
    pub fn add_computer(&mut self, computer_id: &str) -> Result<SlotInfo, SessionError> {
        self.seat(computer_id, true)
    }

    fn seat(&mut self, player_id: &str, is_computer: bool) -> Result<SlotInfo, SessionError> {
        if self.status == SessionStatus::Ended {
            return Err(SessionError::Ended);
        }

        // Rejoining keeps the original slot
        if let Some((player_num, _)) = self.find_player(player_id) {
            return Ok(self.slot_info(player_num));
        }

        let player_num = self.slots.first_free().ok_or(SessionError::Capacity)?;
        let entity = create_paddle(&mut self.world, player_id, player_num, is_computer, &self.config);
        self.slots.occupy(player_num, entity);

        info!(
            session = %self.id,
            player = player_id,
            player_num,
            is_computer,
            open_slots = self.open_slots(),
            "player seated"
        );
        Ok(self.slot_info(player_num))
    }

    fn slot_info(&self, player_num: u8) -> SlotInfo {
        SlotInfo {
            session_id: self.id.clone(),
            player_num,
        }
    }

    /// Free the player's slot. Nobody else is renumbered.
    pub fn remove_player(&mut self, player_id: &str) -> Result<u8, SessionError> {
        let (player_num, entity) = self
            .find_player(player_id)
            .ok_or_else(|| SessionError::PlayerNotFound(player_id.to_string()))?;
        self.slots.clear(player_num);
        if let Err(err) = self.world.despawn(entity) {
            debug!(session = %self.id, player_num, %err, "paddle already despawned");
        }

        info!(session = %self.id, player = player_id, player_num, "player left");
        Ok(player_num)
    }

    /// Move to `Running`. The first tick launches the ball.
    pub fn start(&mut self) -> Result<(), SessionError> {
        match self.status {
            SessionStatus::Ended => Err(SessionError::Ended),
            SessionStatus::Running => Ok(()),
            SessionStatus::Setup => {
                if !self.slots.is_full() {
                    return Err(SessionError::NotReady {
                        open_slots: self.open_slots(),
                    });
                }
                self.status = SessionStatus::Running;
                self.respawn.start_delay(0.0);
                info!(session = %self.id, "session running");
                Ok(())
            }
        }
    }

    /// Set a player's action; it applies from the next tick on
    pub fn update_player_action(&mut self, player_id: &str, action: Action) -> Result<(), SessionError> {
        if self.status != SessionStatus::Running {
            return Err(SessionError::NotStarted);
        }
        let not_found = || SessionError::PlayerNotFound(player_id.to_string());
        let (_, entity) = self.find_player(player_id).ok_or_else(not_found)?;
        let mut paddle = self.world.get::<&mut Paddle>(entity).map_err(|_| not_found())?;
        paddle.action = action;
        Ok(())
    }

    /// Run one tick of `dt_ms` milliseconds and return what it emitted.
    ///
    /// The snapshot always comes first. A point is applied after the
    /// snapshot is taken, so the snapshot shows the reset ball with the
    /// old life total.
    pub fn tick(&mut self, dt_ms: f32) -> Vec<SessionEvent> {
        if self.status != SessionStatus::Running {
            return Vec::new();
        }

        self.time.dt = dt_ms;
        step(
            &mut self.world,
            &mut self.time,
            &self.slots,
            &self.config,
            &mut self.respawn,
            &mut self.rng,
            &mut self.events,
        );
        self.tick += 1;

        let mut emitted = vec![SessionEvent::Snapshot(self.snapshot())];

        if let Some(player_num) = self.events.point_scored {
            if apply_point(&mut self.world, &self.slots, player_num) {
                debug!(session = %self.id, player_num, tick = self.tick, "point scored");
                emitted.push(SessionEvent::PointScored { player_num });
            }
        }

        let alive = survivors(&self.world, &self.slots);
        if alive.len() <= 1 {
            let winner = alive.first().copied();
            info!(session = %self.id, ?winner, tick = self.tick, "game over");
            emitted.push(SessionEvent::GameOver { winner });
            self.status = SessionStatus::Ended;
        }

        emitted
    }

    pub fn snapshot(&self) -> Snapshot {
        let ball = self
            .world
            .get::<&Body>(self.ball)
            .map(|body| BallState {
                position: body.position(),
                velocity: body.velocity,
            })
            .unwrap_or_default();

        let paddles = self
            .slots
            .iter()
            .filter_map(|(player_num, entity)| {
                let body = self.world.get::<&Body>(entity).ok()?;
                let paddle = self.world.get::<&Paddle>(entity).ok()?;
                Some(PaddleState {
                    player_num,
                    position: body.position(),
                    width: paddle.width(),
                    life: paddle.life,
                    active: paddle.active,
                    is_computer: paddle.is_computer,
                })
            })
            .collect();

        Snapshot {
            tick: self.tick,
            elapsed_ms: self.time.now,
            ball,
            paddles,
            hit_paddle: self.events.ball_hit_paddle,
            hit_wall: self.events.ball_hit_wall,
        }
    }

    /// Non-finite coordinates anywhere mean the world can't be trusted
    pub fn is_corrupted(&self) -> bool {
        self.world
            .query::<&Body>()
            .iter()
            .any(|(_entity, body)| !body.is_finite())
    }

    pub fn end(&mut self) {
        self.status = SessionStatus::Ended;
    }
}

#[cfg(test)]
impl Session {
    pub(crate) fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub(crate) fn ball_entity(&self) -> Entity {
        self.ball
    }

    pub(crate) fn paddle_entity(&self, player_num: u8) -> Option<Entity> {
        self.slots.get(player_num)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_session(config: Config) -> Session {
        let mut session = Session::setup("game1", "host", config, 7);
        for n in 1..=3 {
            session.add_computer(&format!("comp{n}")).unwrap();
        }
        session
    }

    fn set_life(session: &mut Session, player_num: u8, life: u32) {
        let entity = session.slots.get(player_num).unwrap();
        let (body, paddle) = session
            .world
            .query_one_mut::<(&mut Body, &mut Paddle)>(entity)
            .unwrap();
        paddle.life = life;
        paddle.update_width(body);
    }

    fn place_ball(session: &mut Session, position: Vector2, velocity: Vector2) {
        let mut body = session.world.get::<&mut Body>(session.ball).unwrap();
        body.set_position(position);
        body.velocity = velocity;
    }

    #[test]
    fn test_setup_seats_creator_in_slot_one() {
        let session = Session::setup("game1", "host", Config::new(), 1);
        assert_eq!(session.status(), SessionStatus::Setup);
        assert_eq!(session.open_slots(), 3);
        assert_eq!(session.find_player("host").map(|(num, _)| num), Some(1));
        assert_eq!(session.snapshot().ball, BallState::default());
    }

    #[test]
    fn test_fifth_player_hits_capacity() {
        let mut session = full_session(Config::new());
        assert_eq!(session.add_player("late"), Err(SessionError::Capacity));
    }

    #[test]
    fn test_rejoin_keeps_slot() {
        let mut session = Session::setup("game1", "host", Config::new(), 1);
        let guest = session.add_player("guest").unwrap();
        assert_eq!(guest.player_num, 2);
        assert_eq!(session.add_player("guest").unwrap().player_num, 2);
        assert_eq!(session.open_slots(), 2);
    }

    #[test]
    fn test_remove_frees_slot_without_renumbering() {
        let mut session = full_session(Config::new());
        assert_eq!(session.remove_player("comp1"), Ok(2));
        assert_eq!(session.find_player("comp2").map(|(num, _)| num), Some(3));
        assert_eq!(session.add_player("guest").unwrap().player_num, 2);
        assert_eq!(
            session.remove_player("nobody"),
            Err(SessionError::PlayerNotFound("nobody".into()))
        );
    }

    #[test]
    fn test_start_requires_full_session() {
        let mut session = Session::setup("game1", "host", Config::new(), 1);
        session.add_player("guest").unwrap();
        assert_eq!(session.start(), Err(SessionError::NotReady { open_slots: 2 }));
        assert_eq!(session.status(), SessionStatus::Setup);
    }

    #[test]
    fn test_action_before_start_is_rejected() {
        let mut session = full_session(Config::new());
        assert_eq!(
            session.update_player_action("host", Action::Left),
            Err(SessionError::NotStarted)
        );
    }

    #[test]
    fn test_action_applies_on_next_tick() {
        let mut session = full_session(Config::new());
        session.start().unwrap();
        session.update_player_action("host", Action::Right).unwrap();

        session.tick(500.0);

        let host = &session.snapshot().paddles[0];
        assert_eq!(host.player_num, 1);
        assert_eq!(host.position, Vector2::new(30.0, -50.0));
    }

    #[test]
    fn test_unknown_player_action() {
        let mut session = full_session(Config::new());
        session.start().unwrap();
        assert_eq!(
            session.update_player_action("ghost", Action::Left),
            Err(SessionError::PlayerNotFound("ghost".into()))
        );
    }

    #[test]
    fn test_first_tick_launches_ball() {
        let mut session = full_session(Config::new());
        assert!(session.tick(15.0).is_empty(), "Setup sessions do not tick");
        session.start().unwrap();

        let events = session.tick(15.0);

        let SessionEvent::Snapshot(snapshot) = &events[0] else {
            panic!("Snapshot must come first: {events:?}");
        };
        assert_eq!(snapshot.tick, 1);
        let speed = snapshot.ball.velocity.magnitude();
        assert!((speed - Params::BALL_SPEED).abs() <= 0.02, "Launched at {speed}");
    }

    #[test]
    fn test_point_reduces_life_after_snapshot() {
        let mut config = Config::new();
        config.player_max_life = 3;
        let mut session = full_session(config);
        session.start().unwrap();
        session.tick(15.0);
        place_ball(&mut session, Vector2::new(51.0, 0.0), Vector2::new(5.0, 0.0));

        let events = session.tick(15.0);

        assert_eq!(events.len(), 2);
        let SessionEvent::Snapshot(snapshot) = &events[0] else {
            panic!("Snapshot must come first");
        };
        assert_eq!(snapshot.ball, BallState::default(), "Ball parked in the center");
        assert_eq!(snapshot.paddles[1].life, 3);
        assert_eq!(events[1], SessionEvent::PointScored { player_num: 2 });
        assert_eq!(session.snapshot().paddles[1].life, 2);
        assert_eq!(session.status(), SessionStatus::Running);
    }

    #[test]
    fn test_game_over_names_survivor_and_stops() {
        let mut session = full_session(Config::new());
        session.start().unwrap();
        set_life(&mut session, 2, 0);
        set_life(&mut session, 3, 0);
        set_life(&mut session, 4, 1);
        session.tick(15.0);

        // Past P4's wall, well away from its paddle
        place_ball(&mut session, Vector2::new(-51.0, 30.0), Vector2::new(-5.0, 0.0));
        let events = session.tick(0.0);

        let game_overs: Vec<_> = events
            .iter()
            .filter(|event| matches!(event, SessionEvent::GameOver { .. }))
            .collect();
        assert_eq!(game_overs, vec![&SessionEvent::GameOver { winner: Some(1) }]);
        assert_eq!(session.status(), SessionStatus::Ended);

        assert!(session.tick(15.0).is_empty(), "No snapshots after game over");
        assert_eq!(session.add_player("late"), Err(SessionError::Ended));
    }

    #[test]
    fn test_snapshot_reports_clock_and_bounces() {
        let mut session = full_session(Config::new());
        session.start().unwrap();
        session.tick(15.0);
        session.remove_player("comp1").unwrap();
        place_ball(&mut session, Vector2::new(51.0, 0.0), Vector2::new(5.0, 0.0));

        let events = session.tick(15.0);

        let SessionEvent::Snapshot(snapshot) = &events[0] else {
            panic!("Snapshot must come first");
        };
        assert_eq!(snapshot.elapsed_ms, 30.0);
        assert!(snapshot.hit_wall, "P2's wall is empty and bounces");
        assert!(!snapshot.hit_paddle);
        assert_eq!(events.len(), 1, "No point against an empty slot");
    }

    #[test]
    fn test_corruption_detected() {
        let mut session = full_session(Config::new());
        assert!(!session.is_corrupted());
        place_ball(&mut session, Vector2::new(f32::NAN, 0.0), Vector2::ZERO);
        assert!(session.is_corrupted());
    }
}
