use game_core::*;
use hecs::{Entity, World};

struct Sim {
    world: World,
    time: Time,
    slots: Slots,
    config: Config,
    respawn: RespawnState,
    rng: GameRng,
    events: Events,
    ball: Entity,
}

impl Sim {
    fn new(config: Config) -> Self {
        let mut world = World::new();
        let ball = create_ball(&mut world, &config);
        Self {
            world,
            time: Time::default(),
            slots: Slots::new(),
            config,
            respawn: RespawnState::new(),
            rng: GameRng::new(99),
            events: Events::new(),
            ball,
        }
    }

    fn seat(&mut self, num: u8, is_computer: bool) -> Entity {
        let entity = create_paddle(
            &mut self.world,
            format!("player{num}"),
            num,
            is_computer,
            &self.config,
        );
        self.slots.occupy(num, entity);
        entity
    }

    fn step(&mut self, dt: f32) {
        self.time.dt = dt;
        step(
            &mut self.world,
            &mut self.time,
            &self.slots,
            &self.config,
            &mut self.respawn,
            &mut self.rng,
            &mut self.events,
        );
    }

    fn ball_body(&self) -> Body {
        *self.world.get::<&Body>(self.ball).unwrap()
    }

    fn place_ball(&mut self, pos: Vector2, vel: Vector2) {
        let mut body = self.world.get::<&mut Body>(self.ball).unwrap();
        body.set_position(pos);
        body.velocity = vel;
    }
}

#[test]
fn test_score_against_active_player_two() {
    let mut config = Config::new();
    config.player_max_life = 3;
    let mut sim = Sim::new(config);
    let p2 = sim.seat(2, false);
    // Past the wall line but still inside the back half of P2's box
    sim.place_ball(Vector2::new(51.0, 0.0), Vector2::new(5.0, 0.0));

    sim.step(15.0);

    assert_eq!(sim.events.point_scored, Some(2), "Exactly one point against P2");
    assert!(apply_point(&mut sim.world, &sim.slots, 2));
    assert_eq!(sim.world.get::<&Paddle>(p2).unwrap().life, 2);
    assert_eq!(sim.ball_body().position(), Vector2::ZERO);
    assert_eq!(sim.ball_body().velocity, Vector2::ZERO);

    // Parked until the relaunch delay elapses, and no repeat point meanwhile
    let ticks = (sim.config.reset_delay_ms / 15.0) as usize - 1;
    for _ in 0..ticks {
        sim.step(15.0);
        assert!(sim.events.point_scored.is_none());
        assert_eq!(sim.ball_body().velocity, Vector2::ZERO);
    }

    sim.step(15.0);
    sim.step(15.0);
    let speed = sim.ball_body().velocity.magnitude();
    assert!((speed - sim.config.ball_speed).abs() <= 0.02, "Relaunched at {speed}");
}

#[test]
fn test_empty_slot_wall_bounces() {
    let mut sim = Sim::new(Config::new());
    sim.seat(1, false);
    sim.place_ball(Vector2::new(51.0, 0.0), Vector2::new(5.0, 0.0));

    sim.step(0.0);

    assert!(sim.events.point_scored.is_none());
    assert_eq!(sim.ball_body().velocity, Vector2::new(-5.0, 0.0));
    assert_eq!(sim.ball_body().position(), Vector2::new(51.0, 0.0));
}

#[test]
fn test_time_accumulates() {
    let mut sim = Sim::new(Config::new());
    sim.step(15.0);
    sim.step(17.0);
    assert_eq!(sim.time.now, 32.0);
}

#[test]
fn test_computer_match_keeps_entities_in_arena() {
    let mut sim = Sim::new(Config::new());
    let paddles: Vec<Entity> = (1..=4).map(|num| sim.seat(num, true)).collect();
    sim.respawn.start_delay(0.0);

    let mut points = 0;
    for tick in 0..20_000 {
        sim.step(if tick % 5 == 0 { 31.0 } else { 15.0 });
        if let Some(num) = sim.events.point_scored {
            apply_point(&mut sim.world, &sim.slots, num);
            points += 1;
        }

        let ball = sim.ball_body();
        assert!(ball.is_finite());
        assert!(ball.position().x.abs() < 60.0 && ball.position().y.abs() < 60.0);

        for &entity in &paddles {
            let body = *sim.world.get::<&Body>(entity).unwrap();
            let paddle = sim.world.get::<&Paddle>(entity).unwrap();
            let half = paddle.width() / 2.0;
            let along = if paddle.moves_along_x() {
                body.position().x
            } else {
                body.position().y
            };
            assert!(along >= -50.0 + half && along <= 50.0 - half);
        }

        if survivors(&sim.world, &sim.slots).len() <= 1 {
            break;
        }
    }

    assert!(points > 0, "A long computer match should see points scored");
}
