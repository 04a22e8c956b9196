use crate::{find_ball, Arena, Ball, Body, Config, Events, Paddle, Slots, Vector2};
use hecs::{Entity, World};

/// Bounce the ball off the first active paddle it overlaps.
///
/// A ball already past a paddle's wall line and still heading out is left
/// to the bounds check: the back half of the paddle box sits outside the
/// arena and must not save a point that was already lost.
pub fn check_collisions(world: &mut World, slots: &Slots, config: &Config, events: &mut Events) {
    // First, collect ball and paddle data without holding borrows
    let (ball_entity, ball_body) = match find_ball(world) {
        Some(data) => data,
        None => return, // No ball in world
    };
    let escaping_past = Arena::crossed_wall(ball_body.position(), ball_body.velocity)
        .map(|wall| wall.owner());

    let contacts: Vec<(Entity, Body, Vector2)> = slots
        .iter()
        .filter(|(num, _entity)| escaping_past != Some(*num))
        .filter_map(|(_num, entity)| {
            let body = world.get::<&Body>(entity).ok()?;
            let paddle = world.get::<&Paddle>(entity).ok()?;
            (paddle.active && body.intersects(&ball_body))
                .then(|| (entity, *body, paddle.normal_axis))
        })
        .collect();

    for (paddle_entity, paddle_body, normal) in contacts {
        if let Ok((body, ball)) = world.query_one_mut::<(&mut Body, &mut Ball)>(ball_entity) {
            if ball.bounce_against(body, paddle_entity, &paddle_body, normal, config.paddle_control)
            {
                events.ball_hit_paddle = true;
            }
        }
    }
}
