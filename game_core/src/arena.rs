use crate::params::Params;
use crate::Vector2;

/// One of the four arena edges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wall {
    Bottom,
    Right,
    Top,
    Left,
}

impl Wall {
    /// Player number whose paddle guards this wall
    pub fn owner(self) -> u8 {
        match self {
            Wall::Bottom => 1,
            Wall::Right => 2,
            Wall::Top => 3,
            Wall::Left => 4,
        }
    }

    /// Left and right walls reverse x; top and bottom reverse y
    pub fn is_vertical(self) -> bool {
        matches!(self, Wall::Left | Wall::Right)
    }
}

/// Fixed square arena spanning `[-50, 50]` on both axes
#[derive(Debug, Clone, Copy)]
pub struct Arena;

impl Arena {
    pub const HALF: f32 = Params::ARENA_HALF;

    pub fn center() -> Vector2 {
        Vector2::ZERO
    }

    /// Paddle starting location: the middle of the player's wall
    pub fn paddle_spawn(player_num: u8) -> Vector2 {
        match player_num {
            1 => Vector2::new(0.0, -Self::HALF),
            2 => Vector2::new(Self::HALF, 0.0),
            3 => Vector2::new(0.0, Self::HALF),
            _ => Vector2::new(-Self::HALF, 0.0),
        }
    }

    /// Unit vector of "rightward" movement as seen by the player
    pub fn positive_axis(player_num: u8) -> Vector2 {
        match player_num {
            1 => Vector2::new(1.0, 0.0),
            2 => Vector2::new(0.0, 1.0),
            3 => Vector2::new(-1.0, 0.0),
            _ => Vector2::new(0.0, -1.0),
        }
    }

    /// Clamp a paddle coordinate so a paddle of `width` stays on its wall
    pub fn clamp_along(value: f32, width: f32) -> f32 {
        let min = -Self::HALF + width / 2.0;
        let max = Self::HALF - width / 2.0;
        if value <= min {
            min
        } else if value >= max {
            max
        } else {
            value
        }
    }

    /// Wall the ball is leaving through, if any.
    ///
    /// The ball must be past the edge *and* moving outward, so a ball
    /// drifting along a boundary does not trigger again every tick.
    pub fn crossed_wall(position: Vector2, velocity: Vector2) -> Option<Wall> {
        if position.x < -Self::HALF && velocity.x < 0.0 {
            Some(Wall::Left)
        } else if position.x > Self::HALF && velocity.x > 0.0 {
            Some(Wall::Right)
        } else if position.y < -Self::HALF && velocity.y < 0.0 {
            Some(Wall::Bottom)
        } else if position.y > Self::HALF && velocity.y > 0.0 {
            Some(Wall::Top)
        } else {
            None
        }
    }
}
