use crate::{find_ball, Arena, Ball, Body, Config, Events, Paddle, RespawnState, Slots};
use hecs::World;

/// Check if the ball left the arena.
///
/// Crossing a wall guarded by an active paddle is a point against that
/// player and resets the ball. An empty or eliminated wall just bounces.
pub fn check_bounds(
    world: &mut World,
    slots: &Slots,
    config: &Config,
    respawn: &mut RespawnState,
    events: &mut Events,
) {
    let (ball_entity, ball_body) = match find_ball(world) {
        Some(data) => data,
        None => return,
    };

    let wall = match Arena::crossed_wall(ball_body.position(), ball_body.velocity) {
        Some(wall) => wall,
        None => return,
    };
    let owner_active = slot_is_active(world, slots, wall.owner());

    let Ok((body, _ball)) = world.query_one_mut::<(&mut Body, &Ball)>(ball_entity) else {
        return;
    };

    if owner_active {
        events.point_scored = Some(wall.owner());
        Ball::reset(body, respawn, config.reset_delay_ms);
    } else {
        if wall.is_vertical() {
            Ball::bounce_x(body);
        } else {
            Ball::bounce_y(body);
        }
        events.ball_hit_wall = true;
    }
}

/// True if the slot holds a paddle that still has life
pub fn slot_is_active(world: &World, slots: &Slots, player_num: u8) -> bool {
    slots
        .get(player_num)
        .and_then(|entity| world.get::<&Paddle>(entity).ok().map(|paddle| paddle.active))
        .unwrap_or(false)
}

/// Take one life from the player whose wall was breached.
/// Returns false if that slot is empty or already out.
pub fn apply_point(world: &mut World, slots: &Slots, player_num: u8) -> bool {
    let Some(entity) = slots.get(player_num) else {
        return false;
    };
    let Ok((body, paddle)) = world.query_one_mut::<(&mut Body, &mut Paddle)>(entity) else {
        return false;
    };
    if !paddle.active {
        return false;
    }
    paddle.apply_hit(body);
    true
}

/// Player numbers of the paddles that still have life
pub fn survivors(world: &World, slots: &Slots) -> Vec<u8> {
    slots
        .iter()
        .filter(|(_num, entity)| {
            world
                .get::<&Paddle>(*entity)
                .map(|paddle| paddle.life > 0)
                .unwrap_or(false)
        })
        .map(|(num, _entity)| num)
        .collect()
}
