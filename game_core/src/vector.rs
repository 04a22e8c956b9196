use glam::Vec2;

/// Decimal places kept on vector components and magnitudes
pub const COMPONENT_PLACES: i32 = 2;
/// Decimal places kept on directions (whole degrees)
pub const DIRECTION_PLACES: i32 = 0;

/// Round `value` to `place` decimal places
pub fn round_to_place(value: f32, place: i32) -> f32 {
    let factor = 10f32.powi(place);
    (value * factor).round() / factor
}

/// Build a vector from a direction in degrees and a magnitude.
/// Components are rounded to two decimal places.
pub fn vector_from_direction(direction: f32, magnitude: f32) -> Vector2 {
    let radians = direction.to_radians();
    Vector2::new(
        round_to_place(magnitude * radians.cos(), COMPONENT_PLACES),
        round_to_place(magnitude * radians.sin(), COMPONENT_PLACES),
    )
}

/// Direction of `v` in whole degrees, in `[0, 360)`.
///
/// Resolved with an explicit quadrant table over `|atan(y/x)|`. The zero
/// vector has no direction and reports 0.
pub fn direction_from_vector(v: Vector2) -> f32 {
    if v.x == 0.0 && v.y == 0.0 {
        return 0.0;
    }

    let theta = (v.y / v.x).atan().to_degrees().abs();
    let degrees = if v.x > 0.0 && v.y >= 0.0 {
        theta
    } else if v.x <= 0.0 && v.y >= 0.0 {
        180.0 - theta
    } else if v.x <= 0.0 {
        180.0 + theta
    } else {
        360.0 - theta
    };

    round_to_place(degrees, DIRECTION_PLACES) % 360.0
}

/// Euclidean norm of `v`, rounded to two decimal places
pub fn magnitude_from_vector(v: Vector2) -> f32 {
    round_to_place(Vec2::from(v).length(), COMPONENT_PLACES)
}

/// 2-D vector in arena units.
///
/// The type is `Copy`, so a plain `let mut w = v;` is the copy-then-mutate
/// form. Methods returning `&mut Self` mutate the receiver in place and can
/// be chained; methods returning `Vector2` leave the receiver untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn from_direction(direction: f32, magnitude: f32) -> Self {
        vector_from_direction(direction, magnitude)
    }

    pub fn magnitude(&self) -> f32 {
        magnitude_from_vector(*self)
    }

    pub fn direction(&self) -> f32 {
        direction_from_vector(*self)
    }

    pub fn add(&mut self, other: Vector2) -> &mut Self {
        self.x += other.x;
        self.y += other.y;
        self
    }

    pub fn subtract(&mut self, other: Vector2) -> &mut Self {
        self.x -= other.x;
        self.y -= other.y;
        self
    }

    pub fn scalar_multiply(&mut self, multiplier: f32) -> &mut Self {
        self.x *= multiplier;
        self.y *= multiplier;
        self
    }

    /// New vector scaled by `factor`; the receiver is not modified
    pub fn scale_to(&self, factor: f32) -> Vector2 {
        Vector2::new(self.x * factor, self.y * factor)
    }

    pub fn flip(&mut self) -> &mut Self {
        self.x = -self.x;
        self.y = -self.y;
        self
    }

    pub fn absolute_value(&mut self) -> &mut Self {
        self.x = self.x.abs();
        self.y = self.y.abs();
        self
    }

    /// Component-wise product, used with a `{0,1}` mask to zero out one axis
    pub fn multiply_mask(&mut self, mask: Vector2) -> &mut Self {
        self.x *= mask.x;
        self.y *= mask.y;
        self
    }

    /// Scale to unit length, rounding components to two places.
    ///
    /// # Panics
    ///
    /// Panics if the (rounded) magnitude is zero. Normalizing a zero vector
    /// is a caller bug, never a runtime condition to recover from.
    pub fn normalize(&mut self) -> &mut Self {
        let magnitude = self.magnitude();
        assert!(
            magnitude != 0.0,
            "cannot normalize zero-length vector ({}, {})",
            self.x,
            self.y
        );
        self.x = round_to_place(self.x / magnitude, COMPONENT_PLACES);
        self.y = round_to_place(self.y / magnitude, COMPONENT_PLACES);
        self
    }

    pub fn copy(&self) -> Vector2 {
        *self
    }

    pub fn equals(&self, other: &Vector2) -> bool {
        self == other
    }

    /// True when both components are within `tolerance` of `other`
    pub fn approx_eq(&self, other: Vector2, tolerance: f32) -> bool {
        Vec2::from(*self).abs_diff_eq(Vec2::from(other), tolerance)
    }

    /// Keep the direction, replace the magnitude
    pub fn set_magnitude(&mut self, magnitude: f32) -> &mut Self {
        *self = vector_from_direction(self.direction(), magnitude);
        self
    }

    /// Keep the magnitude, replace the direction
    pub fn set_direction(&mut self, direction: f32) -> &mut Self {
        *self = vector_from_direction(direction, self.magnitude());
        self
    }

    /// New vector at the same magnitude with the direction advanced by `degrees`
    pub fn rotate_degrees(&self, degrees: f32) -> Vector2 {
        vector_from_direction((self.direction() + degrees) % 360.0, self.magnitude())
    }

    /// Flip the sign of each component whose matching `normal` component is
    /// negative. Axes where the normal is zero or positive are left alone.
    ///
    /// This is an axis-wise sign flip, not `v - 2(v.n)n`. Paddles on the
    /// bottom and left walls have all-non-negative normals and therefore do
    /// not flip the incoming velocity here; their rebound comes from the
    /// offset and momentum terms added in `Ball::bounce_against`.
    pub fn reflect(&mut self, normal: Vector2) -> &mut Self {
        if normal.x < 0.0 {
            self.x = -self.x;
        }
        if normal.y < 0.0 {
            self.y = -self.y;
        }
        self
    }
}

impl From<Vec2> for Vector2 {
    fn from(v: Vec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Vector2> for Vec2 {
    fn from(v: Vector2) -> Self {
        Vec2::new(v.x, v.y)
    }
}
