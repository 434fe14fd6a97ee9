// Player movement: just the velocity contract plus a clamp to the room interior.
// No wall collision; the player glides over the inner maze row.

use crate::config::WorldConfig;
use crate::light::FrameInput;
use crate::types::{Aabb, Vec2};

/// Velocity in px/sec for this frame's axes. Diagonals are normalized so they
/// are no faster than straight lines.
pub fn velocity(input: &FrameInput, cfg: &WorldConfig) -> Vec2 {
    let speed = if input.sprint { cfg.sprint_speed } else { cfg.walk_speed };
    let (vx, vy) = (input.axis_x, input.axis_y);
    let len = vx.hypot(vy);
    if !len.is_finite() || len == 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(vx / len * speed, vy / len * speed)
}

pub struct Player {
    pub position: Vec2,
}

impl Player {
    pub const SIZE: f32 = 8.0;
    pub const START: Vec2 = Vec2 { x: 100.0, y: 100.0 };

    pub fn new() -> Self {
        Self { position: Self::START }
    }

    /// Integrate one frame of movement and keep the player off the border walls.
    pub fn step(&mut self, dt: f32, input: &FrameInput, cfg: &WorldConfig) {
        let v = velocity(input, cfg);
        let (min, max) = interior(cfg);
        self.position.x = (self.position.x + v.x * dt).clamp(min.x, max.x);
        self.position.y = (self.position.y + v.y * dt).clamp(min.y, max.y);
    }

    pub fn hitbox(&self) -> Aabb {
        let h = Self::SIZE / 2.0;
        Aabb { center: self.position, half: Vec2::new(h, h) }
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

/// Range of valid player centers: inside the border wall ring.
fn interior(cfg: &WorldConfig) -> (Vec2, Vec2) {
    let (w, h) = cfg.pixel_size();
    let inset = cfg.tile_size as f32 + Player::SIZE / 2.0;
    (
        Vec2::new(inset, inset),
        Vec2::new(w as f32 - inset, h as f32 - inset),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(x: f32, y: f32, sprint: bool) -> FrameInput {
        FrameInput { axis_x: x, axis_y: y, sprint, toggle_focus: false }
    }

    #[test]
    fn diagonal_is_not_faster() {
        let cfg = WorldConfig::default();
        let v = velocity(&input(1.0, 1.0, false), &cfg);
        assert!((v.x.hypot(v.y) - 110.0).abs() < 1e-3);
    }

    #[test]
    fn sprint_uses_sprint_speed() {
        let cfg = WorldConfig::default();
        assert_eq!(velocity(&input(-1.0, 0.0, true), &cfg), Vec2::new(-160.0, 0.0));
        assert_eq!(velocity(&input(0.0, 0.0, true), &cfg), Vec2::ZERO);
    }

    #[test]
    fn step_moves_and_clamps_to_interior() {
        let cfg = WorldConfig::default();
        let mut p = Player::new();
        p.step(0.5, &input(1.0, 0.0, false), &cfg);
        assert_eq!(p.position, Vec2::new(155.0, 100.0));

        p.step(100.0, &input(-1.0, -1.0, true), &cfg);
        assert_eq!(p.position, Vec2::new(20.0, 20.0));
    }
}
