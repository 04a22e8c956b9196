use hecs::Entity;
use rand::Rng;

use crate::{Arena, Body, BoundingBox, Config, GameRng, Params, RespawnState, Vector2};

/// Ball component - the single ball in a session
///
/// `colliding` debounces paddle contact: it stays set while the ball still
/// overlaps `colliding_with`, so one contact yields one bounce.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ball {
    pub colliding: bool,
    pub colliding_with: Option<Entity>,
}

impl Ball {
    pub fn new() -> Self {
        Self::default()
    }

    /// Body for a fresh ball at rest in the arena center
    pub fn body(config: &Config) -> Body {
        Body::new(Arena::center(), config.ball_size, config.ball_size)
    }

    /// Advance by `dt_ms` milliseconds. `contact` is the current bounding
    /// box of `colliding_with`, or `None` if that entity no longer exists.
    pub fn update_position(&mut self, body: &mut Body, dt_ms: f32, contact: Option<&BoundingBox>) {
        body.translate(body.velocity.scale_to(dt_ms / 1000.0));

        if self.colliding {
            let still_touching = contact.is_some_and(|other| body.bounds().intersects(other));
            if !still_touching {
                self.colliding = false;
                self.colliding_with = None;
            }
        }
    }

    pub fn bounce_x(body: &mut Body) {
        body.velocity.x = -body.velocity.x;
    }

    pub fn bounce_y(body: &mut Body) {
        body.velocity.y = -body.velocity.y;
    }

    /// Bounce off `other`. Returns false when still debounced from the
    /// previous contact.
    ///
    /// The incoming velocity is reflected across the other entity's normal,
    /// then nudged by where on the paddle the ball hit and by the paddle's
    /// own movement, and finally scaled back to the incoming speed.
    pub fn bounce_against(
        &mut self,
        body: &mut Body,
        other: Entity,
        other_body: &Body,
        other_normal: Vector2,
        control: f32,
    ) -> bool {
        if self.colliding {
            return false;
        }
        self.colliding = true;
        self.colliding_with = Some(other);

        let speed = body.velocity.magnitude();
        let mut normal = other_normal;
        normal.normalize();

        let mut reflected = body.velocity;
        reflected.reflect(normal);

        let mut offset = body.position();
        offset
            .subtract(other_body.position())
            .scalar_multiply(control);
        let momentum = other_body.velocity.scale_to(control);

        let mut rebound = reflected;
        rebound.add(offset).add(momentum);

        // Offset and momentum can cancel the reflection exactly
        body.velocity = if rebound.magnitude() == 0.0 {
            reflected
        } else {
            *rebound.normalize().set_magnitude(speed)
        };
        true
    }

    /// Park the ball in the center and arm the relaunch timer
    pub fn reset(body: &mut Body, respawn: &mut RespawnState, delay_ms: f32) {
        body.set_position(Arena::center());
        body.velocity = Vector2::ZERO;
        respawn.start_delay(delay_ms);
    }

    /// Launch at `speed` in a random direction away from the four axes
    pub fn start_velocity(body: &mut Body, rng: &mut GameRng, speed: f32) {
        body.velocity = Vector2::from_direction(random_valid_direction(rng), speed);
    }
}

/// Uniform direction in `[0, 360)` that is not within
/// `LAUNCH_EXCLUSION_DEG` of 0, 90, 180, 270 or 360.
///
/// A launch parallel to a wall would bounce forever between two empty walls.
pub fn random_valid_direction(rng: &mut GameRng) -> f32 {
    loop {
        let direction: f32 = rng.0.gen_range(0.0..360.0);
        if !is_near_axis(direction) {
            return direction;
        }
    }
}

fn is_near_axis(direction: f32) -> bool {
    (0..=4).any(|quarter| (direction - 90.0 * quarter as f32).abs() < Params::LAUNCH_EXCLUSION_DEG)
}
