pub mod arena;
pub mod ball;
pub mod bbox;
pub mod components;
pub mod config;
pub mod paddle;
pub mod params;
pub mod resources;
pub mod systems;
pub mod vector;

pub use arena::*;
pub use ball::*;
pub use bbox::*;
pub use components::*;
pub use config::*;
pub use paddle::*;
pub use params::*;
pub use resources::*;
pub use systems::*;
pub use vector::*;

use hecs::{Entity, World};

/// Advance the simulation by one tick of `time.dt` milliseconds.
///
/// Every entity sees the same `dt`. Life loss and end-of-game checks are
/// left to the caller, which reads `events.point_scored` afterwards.
#[allow(clippy::too_many_arguments)]
pub fn step(
    world: &mut World,
    time: &mut Time,
    slots: &Slots,
    config: &Config,
    respawn: &mut RespawnState,
    rng: &mut GameRng,
    events: &mut Events,
) {
    // Clear events at start of tick
    events.clear();

    // 1. Move paddles, then refresh computer actions
    move_paddles(world, time, config);

    // 2. Move ball
    move_ball(world, time);

    // 3. Relaunch a parked ball once its delay has passed
    relaunch_ball(world, time, respawn, rng, config);

    // 4. Ball vs paddles
    check_collisions(world, slots, config, events);

    // 5. Ball vs arena edges (score or empty-wall bounce)
    check_bounds(world, slots, config, respawn, events);

    time.now += time.dt;
}

/// Helper to create a paddle entity for `player_num`
pub fn create_paddle(
    world: &mut World,
    player_id: impl Into<String>,
    player_num: u8,
    is_computer: bool,
    config: &Config,
) -> Entity {
    let (body, paddle) = Paddle::new(player_id, player_num, is_computer, config);
    world.spawn((body, paddle))
}

/// Helper to create the ball entity, at rest in the center
pub fn create_ball(world: &mut World, config: &Config) -> Entity {
    world.spawn((Ball::body(config), Ball::new()))
}

/// The ball entity and a copy of its body
pub fn find_ball(world: &World) -> Option<(Entity, Body)> {
    world
        .query::<(&Body, &Ball)>()
        .iter()
        .next()
        .map(|(entity, (body, _ball))| (entity, *body))
}
