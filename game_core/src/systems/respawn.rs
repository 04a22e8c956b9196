use hecs::World;

use crate::{Ball, Body, Config, GameRng, RespawnState, Time};

/// Count down the relaunch delay and give the parked ball a fresh velocity
/// when it runs out
pub fn relaunch_ball(
    world: &mut World,
    time: &Time,
    respawn: &mut RespawnState,
    rng: &mut GameRng,
    config: &Config,
) {
    if !respawn.update(time.dt) {
        return;
    }

    for (_entity, (body, _ball)) in world.query_mut::<(&mut Body, &Ball)>() {
        Ball::start_velocity(body, rng, config.ball_speed);
    }
}
