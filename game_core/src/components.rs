use crate::{BoundingBox, Vector2};

/// Physical state shared by every entity: position, velocity and the
/// bounding box that follows the position.
#[derive(Debug, Clone, Copy)]
pub struct Body {
    position: Vector2,
    pub velocity: Vector2, // units per second for the ball, units per tick for paddles
    bounds: BoundingBox,
}

impl Body {
    pub fn new(position: Vector2, width: f32, height: f32) -> Self {
        Self {
            position,
            velocity: Vector2::ZERO,
            bounds: BoundingBox::new(position, width, height),
        }
    }

    pub fn position(&self) -> Vector2 {
        self.position
    }

    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    /// Move to `position`, regenerating the bounding box
    pub fn set_position(&mut self, position: Vector2) {
        self.position = position;
        self.bounds.update(position);
    }

    pub fn translate(&mut self, delta: Vector2) {
        let mut position = self.position;
        position.add(delta);
        self.set_position(position);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.bounds.resize(width, height);
    }

    pub fn intersects(&self, other: &Body) -> bool {
        self.bounds.intersects(&other.bounds)
    }

    /// False once any coordinate has become NaN or infinite
    pub fn is_finite(&self) -> bool {
        self.position.x.is_finite()
            && self.position.y.is_finite()
            && self.velocity.x.is_finite()
            && self.velocity.y.is_finite()
    }
}

/// Requested paddle movement, relative to the player's own view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Action {
    Left,
    Right,
    #[default]
    None,
}
