//! One play session: the single owner of all per-frame state.
//!
//! `tick` runs the whole frame in a fixed order (move, pick up fuel, update the
//! light, redraw the darkness, advance the shake) so that the darkness is always
//! drawn with the radius the sanity rule just used.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::config::GameConfig;
use crate::fx::DistressShake;
use crate::light::{Focus, FrameInput, LightSanityState};
use crate::mask::{OcclusionBuffer, VisionMaskRenderer};
use crate::movement::Player;
use crate::pickups::FuelPickups;

/// Everything the presentation side needs after a tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameReport {
    pub radius: f32,
    pub in_darkness: bool,
    pub fuel: f32,
    pub sanity: f32,
    pub focus: Focus,
    pub collected: usize,
    pub shake: (i32, i32),
}

pub struct Session {
    cfg: GameConfig,
    light: LightSanityState,
    renderer: VisionMaskRenderer,
    player: Player,
    pickups: FuelPickups,
    shake: DistressShake,
    rng: Pcg32,
    distressed: bool,
}

impl Session {
    pub fn new(cfg: GameConfig) -> Self {
        let (w, h) = cfg.world.pixel_size();
        let mut rng = Pcg32::seed_from_u64(cfg.world.seed);
        let pickups = FuelPickups::scatter(&cfg.world, &mut rng);
        tracing::info!(width = w, height = h, pickups = pickups.len(), "session started");
        Self {
            light: LightSanityState::new(cfg.light.clone()),
            renderer: VisionMaskRenderer::new(w, h, cfg.mask.clone()),
            player: Player::new(),
            pickups,
            shake: DistressShake::new(cfg.world.seed.rotate_left(17)),
            rng,
            distressed: false,
            cfg,
        }
    }

    /// Full fuel and sanity, fresh cans, player back at the start.
    pub fn restart(&mut self) {
        self.light.reset();
        self.player = Player::new();
        self.pickups = FuelPickups::scatter(&self.cfg.world, &mut self.rng);
        self.shake.stop();
        self.distressed = false;
        tracing::info!(pickups = self.pickups.len(), "session restarted");
    }

    /// Advance one frame.
    pub fn tick(&mut self, dt: f32, input: &FrameInput) -> FrameReport {
        let move_dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };
        self.player.step(move_dt, input, &self.cfg.world);

        let collected = self.pickups.collect(&self.player.hitbox());
        for _ in 0..collected {
            self.light.refuel(self.cfg.light.refuel_amount);
        }
        if collected > 0 {
            tracing::info!(collected, fuel = self.light.fuel(), left = self.pickups.len(), "fuel picked up");
        }

        let reading = self.light.update(dt, input);
        self.renderer.render(reading.radius, self.player.position);

        let distressed = self.light.is_distressed();
        if distressed != self.distressed {
            if distressed {
                tracing::info!(sanity = self.light.sanity(), "sanity low");
            } else {
                tracing::info!(sanity = self.light.sanity(), "sanity recovered");
            }
            self.distressed = distressed;
        }
        let shake = self.shake.update(move_dt, distressed, self.renderer.occlusion().width);

        FrameReport {
            radius: reading.radius,
            in_darkness: reading.in_darkness,
            fuel: self.light.fuel(),
            sanity: self.light.sanity(),
            focus: self.light.focus(),
            collected,
            shake,
        }
    }

    pub fn light(&self) -> &LightSanityState {
        &self.light
    }

    pub fn occlusion(&self) -> &OcclusionBuffer {
        self.renderer.occlusion()
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn pickups(&self) -> &FuelPickups {
        &self.pickups
    }

    pub fn config(&self) -> &GameConfig {
        &self.cfg
    }

    #[cfg(test)]
    pub(crate) fn light_mut(&mut self) -> &mut LightSanityState {
        &mut self.light
    }

    #[cfg(test)]
    pub(crate) fn set_pickups(&mut self, pickups: FuelPickups) {
        self.pickups = pickups;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Vec2;

    fn session() -> Session {
        let mut s = Session::new(GameConfig::default());
        s.set_pickups(FuelPickups::default());
        s
    }

    #[test]
    fn darkness_uses_the_same_radius_as_the_sanity_rule() {
        let mut s = session();
        let report = s.tick(1.0, &FrameInput::default());
        assert_eq!(report.radius, s.light().radius());

        let occ = s.occlusion();
        let (px, py) = (s.player().position.x as usize, s.player().position.y as usize);
        assert_eq!(occ.alpha_at(px, py), 0.0);
        // just past the outermost ring
        let edge = px + (report.radius + 3.0 * 12.0).ceil() as usize + 2;
        assert_eq!(occ.alpha_at(edge, py), 1.0);
        // just inside the core
        let inside = px + report.radius.floor() as usize - 2;
        assert_eq!(occ.alpha_at(inside, py), 0.0);
    }

    #[test]
    fn walking_over_a_can_refuels() {
        let mut s = session();
        s.light_mut().set_meters(50.0, 100.0);
        s.set_pickups(FuelPickups::from_positions([Vec2::new(100.0, 100.0)]));
        let report = s.tick(0.0, &FrameInput::default());
        assert_eq!(report.collected, 1);
        assert_eq!(report.fuel, 70.0);
        assert!(s.pickups().is_empty());
    }

    #[test]
    fn two_cans_at_once_still_cap_at_max() {
        let mut s = session();
        s.light_mut().set_meters(90.0, 100.0);
        s.set_pickups(FuelPickups::from_positions([Vec2::new(100.0, 100.0), Vec2::new(101.0, 101.0)]));
        let report = s.tick(0.0, &FrameInput::default());
        assert_eq!(report.collected, 2);
        assert_eq!(report.fuel, 100.0);
    }

    #[test]
    fn focus_toggle_flows_through_tick() {
        let mut s = session();
        let toggle = FrameInput { toggle_focus: true, ..FrameInput::default() };
        assert_eq!(s.tick(0.016, &toggle).focus, Focus::Narrow);
        assert_eq!(s.tick(0.016, &FrameInput::default()).focus, Focus::Narrow);
        assert_eq!(s.tick(0.016, &toggle).focus, Focus::Wide);
    }

    #[test]
    fn restart_restores_everything() {
        let mut s = session();
        let walk = FrameInput { axis_x: 1.0, ..FrameInput::default() };
        for _ in 0..120 {
            s.tick(0.5, &walk);
        }
        assert!(s.light().fuel() < 100.0);
        s.restart();
        assert_eq!(s.light().fuel(), 100.0);
        assert_eq!(s.light().sanity(), 100.0);
        assert_eq!(s.player().position, Player::START);
        assert_eq!(s.pickups().len(), s.config().world.fuel_pickups);
    }

    #[test]
    fn empty_fuel_is_darkness() {
        let mut s = session();
        s.light_mut().set_meters(0.0, 50.0);
        let report = s.tick(1.0, &FrameInput::default());
        assert!(report.in_darkness);
        assert!((report.sanity - 49.333).abs() < 0.01);
    }
}
