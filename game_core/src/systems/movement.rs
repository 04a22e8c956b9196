use crate::{find_ball, Ball, Body, Config, Paddle, Time};
use hecs::World;

/// Move every paddle by its action, then let computer paddles react to
/// where the ball is now
pub fn move_paddles(world: &mut World, time: &Time, config: &Config) {
    let ball_position = find_ball(world).map(|(_e, body)| body.position());

    for (_entity, (body, paddle)) in world.query_mut::<(&mut Body, &mut Paddle)>() {
        paddle.update_position(body, time.dt, config.paddle_speed);
        if paddle.is_computer {
            if let Some(ball_position) = ball_position {
                paddle.computer_action(body, ball_position);
            }
        }
    }
}

/// Move ball based on velocity and release a finished collision
pub fn move_ball(world: &mut World, time: &Time) {
    // Collect the contact box first so no borrow is held while mutating
    let ball_data = world
        .query::<&Ball>()
        .iter()
        .next()
        .map(|(entity, ball)| (entity, ball.colliding_with));

    let (ball_entity, colliding_with) = match ball_data {
        Some(data) => data,
        None => return, // No ball in world
    };

    let contact = colliding_with
        .and_then(|other| world.get::<&Body>(other).ok().map(|body| *body.bounds()));

    if let Ok((body, ball)) = world.query_one_mut::<(&mut Body, &mut Ball)>(ball_entity) {
        ball.update_position(body, time.dt, contact.as_ref());
    }
}
