use crate::{Action, Arena, Body, Config, Vector2};

/// Paddle component - one player's paddle on their own wall
#[derive(Debug, Clone)]
pub struct Paddle {
    pub player_id: String,
    pub player_num: u8, // 1 = bottom, 2 = right, 3 = top, 4 = left
    pub life: u32,
    pub max_life: u32,
    pub max_width: f32,
    pub depth: f32,
    pub action: Action,
    pub is_computer: bool,
    pub positive_axis: Vector2,
    pub normal_axis: Vector2,
    pub active: bool,
}

impl Paddle {
    /// Build the paddle and its body at the middle of the player's wall
    pub fn new(
        player_id: impl Into<String>,
        player_num: u8,
        is_computer: bool,
        config: &Config,
    ) -> (Body, Paddle) {
        let positive_axis = Arena::positive_axis(player_num);
        let paddle = Paddle {
            player_id: player_id.into(),
            player_num,
            life: config.player_max_life,
            max_life: config.player_max_life,
            max_width: config.paddle_width,
            depth: config.paddle_depth,
            action: Action::None,
            is_computer,
            positive_axis,
            normal_axis: positive_axis.rotate_degrees(90.0),
            active: config.player_max_life > 0,
        };
        let (width, height) = paddle.box_size();
        let body = Body::new(Arena::paddle_spawn(player_num), width, height);
        (body, paddle)
    }

    /// Current width, shrinking linearly with remaining life
    pub fn width(&self) -> f32 {
        if self.max_life == 0 {
            return 0.0;
        }
        self.max_width * self.life as f32 / self.max_life as f32
    }

    /// Bottom and top paddles slide along x, left and right along y
    pub fn moves_along_x(&self) -> bool {
        matches!(self.player_num, 1 | 3)
    }

    fn box_size(&self) -> (f32, f32) {
        if self.moves_along_x() {
            (self.width(), self.depth)
        } else {
            (self.depth, self.width())
        }
    }

    /// Move along the paddle's axis for `dt_ms` milliseconds at `speed`
    /// units per second, then clamp to the wall.
    ///
    /// The signed displacement of this tick becomes the body's velocity and
    /// feeds momentum transfer when the ball bounces off the paddle.
    pub fn update_position(&self, body: &mut Body, dt_ms: f32, speed: f32) {
        let distance = speed * dt_ms / 1000.0;
        let movement = match self.action {
            Action::Right => self.positive_axis.scale_to(distance),
            Action::Left => *self.positive_axis.scale_to(distance).flip(),
            Action::None => Vector2::ZERO,
        };
        body.velocity = movement;

        let mut position = body.position();
        position.add(movement);
        let width = self.width();
        if self.moves_along_x() {
            position.x = Arena::clamp_along(position.x, width);
        } else {
            position.y = Arena::clamp_along(position.y, width);
        }
        body.set_position(position);
    }

    /// Resize the body from the remaining life; deactivate at zero
    pub fn update_width(&mut self, body: &mut Body) {
        let (width, height) = self.box_size();
        body.resize(width, height);
        if self.life == 0 {
            self.active = false;
        }
    }

    /// The ball got past this paddle
    pub fn apply_hit(&mut self, body: &mut Body) {
        self.life = self.life.saturating_sub(1);
        self.update_width(body);
    }

    /// Greedy tracker: step toward the ball's position projected on the
    /// paddle's axis.
    pub fn computer_action(&mut self, body: &Body, ball_position: Vector2) {
        let mut mask = self.positive_axis;
        mask.absolute_value();

        let mut toward = ball_position;
        toward.subtract(body.position()).multiply_mask(mask);

        // Already lined up with the ball
        if toward.magnitude() == 0.0 {
            self.action = Action::None;
            return;
        }
        toward.normalize();

        let heading = toward.direction();
        let positive = self.positive_axis.direction();
        self.action = if heading == positive {
            Action::Right
        } else if (heading - positive).abs() == 180.0 {
            Action::Left
        } else {
            Action::None
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paddle(player_num: u8) -> (Body, Paddle) {
        Paddle::new(format!("player{player_num}"), player_num, false, &Config::new())
    }

    #[test]
    fn test_paddle_axes_per_player() {
        let expected = [
            (1, Vector2::new(1.0, 0.0), Vector2::new(0.0, 1.0)),
            (2, Vector2::new(0.0, 1.0), Vector2::new(-1.0, 0.0)),
            (3, Vector2::new(-1.0, 0.0), Vector2::new(0.0, -1.0)),
            (4, Vector2::new(0.0, -1.0), Vector2::new(1.0, 0.0)),
        ];
        for (num, positive, normal) in expected {
            let (_, p) = paddle(num);
            assert_eq!(p.positive_axis, positive, "positive axis of P{num}");
            assert!(p.normal_axis.approx_eq(normal, 1e-6), "normal of P{num}");
        }
    }

    #[test]
    fn test_paddle_spawns_on_its_wall() {
        let (body, p) = paddle(2);
        assert_eq!(body.position(), Vector2::new(50.0, 0.0));
        assert_eq!(body.bounds().width(), p.depth, "Side paddles are deep along x");
        assert_eq!(body.bounds().height(), p.max_width);
    }

    #[test]
    fn test_update_position_moves_along_positive_axis() {
        let (mut body, mut p) = paddle(1);
        p.action = Action::Right;
        p.update_position(&mut body, 500.0, 60.0);
        assert_eq!(body.position(), Vector2::new(30.0, -50.0));
        assert_eq!(body.velocity, Vector2::new(30.0, 0.0));

        p.action = Action::Left;
        p.update_position(&mut body, 250.0, 60.0);
        assert_eq!(body.position(), Vector2::new(15.0, -50.0));
        assert_eq!(body.velocity, Vector2::new(-15.0, 0.0));
    }

    #[test]
    fn test_update_position_holds_when_idle() {
        let (mut body, p) = paddle(3);
        p.update_position(&mut body, 1000.0, 60.0);
        assert_eq!(body.position(), Vector2::new(0.0, 50.0));
        assert_eq!(body.velocity, Vector2::ZERO);
    }

    #[test]
    fn test_update_position_clamps_to_wall() {
        let (mut body, mut p) = paddle(4);
        p.action = Action::Right; // P4 positive axis is -y
        p.update_position(&mut body, 10_000.0, 60.0);
        assert_eq!(body.position().y, -40.0);
        assert_eq!(body.position().x, -50.0, "Cross axis never moves");
    }

    #[test]
    fn test_controlled_coordinate_stays_in_range() {
        let (mut body, mut p) = paddle(2);
        let actions = [Action::Right, Action::Left, Action::None];
        for step in 0..2_000 {
            p.action = actions[(step * 7 + step / 13) % 3];
            p.update_position(&mut body, (step % 40) as f32 * 5.0, 60.0);
            if step % 400 == 399 && p.life > 0 {
                p.apply_hit(&mut body);
            }
            let half = p.width() / 2.0;
            let y = body.position().y;
            assert!(y >= -50.0 + half && y <= 50.0 - half, "y={y} width={}", p.width());
        }
    }

    #[test]
    fn test_apply_hit_shrinks_and_deactivates() {
        let (mut body, mut p) = paddle(1);
        let max_life = p.max_life;
        p.apply_hit(&mut body);
        assert_eq!(p.life, max_life - 1);
        let expected = p.max_width * (max_life - 1) as f32 / max_life as f32;
        assert!((body.bounds().width() - expected).abs() < 1e-4);
        assert!(p.active);

        for _ in 0..max_life + 2 {
            p.apply_hit(&mut body);
        }
        assert_eq!(p.life, 0, "Life never goes negative");
        assert!(!p.active);
        assert_eq!(body.bounds().width(), 0.0);
    }

    #[test]
    fn test_computer_action_tracks_ball() {
        let (body, mut p) = paddle(1);
        p.is_computer = true;

        p.computer_action(&body, Vector2::new(20.0, 10.0));
        assert_eq!(p.action, Action::Right);

        p.computer_action(&body, Vector2::new(-20.0, 10.0));
        assert_eq!(p.action, Action::Left);

        p.computer_action(&body, Vector2::new(0.0, 10.0));
        assert_eq!(p.action, Action::None, "Lined up with the ball");
    }

    #[test]
    fn test_computer_action_uses_player_perspective() {
        // P3 looks down the arena: +x is its left
        let (body, mut p) = paddle(3);
        p.computer_action(&body, Vector2::new(20.0, 0.0));
        assert_eq!(p.action, Action::Left);

        let (body, mut p) = paddle(2);
        p.computer_action(&body, Vector2::new(0.0, 30.0));
        assert_eq!(p.action, Action::Right);
    }
}
