// Light + sanity simulation.
// One `update` per frame burns fuel, derives the light radius from what is left,
// and drains or restores sanity depending on how dark it is around the player.
// Visual expectation: the hole in the darkness shrinks as fuel runs out, and the
// SANITY readout falls once the hole gets small.

use crate::config::LightConfig;

/// Light mode. Narrow burns fuel faster and casts a tighter circle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Wide,
    Narrow,
}

impl Focus {
    pub fn toggled(self) -> Self {
        match self {
            Focus::Wide => Focus::Narrow,
            Focus::Narrow => Focus::Wide,
        }
    }

    pub fn drain_multiplier(self, cfg: &LightConfig) -> f32 {
        match self {
            Focus::Wide => 1.0,
            Focus::Narrow => cfg.narrow_drain_multiplier,
        }
    }

    pub fn radius_multiplier(self, cfg: &LightConfig) -> f32 {
        match self {
            Focus::Wide => 1.0,
            Focus::Narrow => cfg.narrow_radius_multiplier,
        }
    }
}

/// What the input side reports for one frame.
/// `toggle_focus` is an edge: true only on the frame the key went down.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInput {
    pub axis_x: f32, // -1 left, +1 right
    pub axis_y: f32, // -1 up, +1 down
    pub sprint: bool,
    pub toggle_focus: bool,
}

/// Result of one update; the renderer must draw with this exact radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightReading {
    pub radius: f32,
    pub in_darkness: bool,
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Radius for a fuel ratio in [0,1] and a focus mode.
pub fn light_radius(cfg: &LightConfig, fuel_ratio: f32, focus: Focus) -> f32 {
    lerp(cfg.min_radius, cfg.max_radius, fuel_ratio) * focus.radius_multiplier(cfg)
}

/// Signed sanity drain per second at `radius`. Negative means recovery.
pub fn sanity_drain(cfg: &LightConfig, radius: f32) -> f32 {
    if radius < cfg.darkness_threshold {
        cfg.base_sanity_drain + (cfg.darkness_threshold - radius) / cfg.darkness_spread
    } else {
        -cfg.sanity_recovery_rate
    }
}

pub struct LightSanityState {
    cfg: LightConfig,
    fuel: f32,
    focus: Focus,
    sanity: f32,
}

impl LightSanityState {
    /// Full fuel, wide focus, full sanity.
    pub fn new(cfg: LightConfig) -> Self {
        let fuel = cfg.max_fuel;
        let sanity = cfg.max_sanity;
        Self { cfg, fuel, focus: Focus::Wide, sanity }
    }

    /// Back to the session-start values; config is kept.
    pub fn reset(&mut self) {
        self.fuel = self.cfg.max_fuel;
        self.focus = Focus::Wide;
        self.sanity = self.cfg.max_sanity;
    }

    /// Advance by `dt` seconds.
    ///
    /// A negative or non-finite `dt` is treated as zero: the focus toggle still
    /// applies but nothing drains or recovers.
    pub fn update(&mut self, dt: f32, input: &FrameInput) -> LightReading {
        let dt = if dt.is_finite() && dt >= 0.0 {
            dt
        } else {
            tracing::warn!(dt, "rejected timestep, using 0");
            0.0
        };

        if input.toggle_focus {
            self.toggle_focus();
        }

        let burn = self.cfg.base_drain_rate * self.focus.drain_multiplier(&self.cfg) * dt;
        self.fuel = clamp_meter(self.fuel - burn, self.cfg.max_fuel);

        let radius = self.radius();
        let in_darkness = radius < self.cfg.darkness_threshold;
        let drain = sanity_drain(&self.cfg, radius);
        self.sanity = clamp_meter(self.sanity - drain * dt, self.cfg.max_sanity);

        LightReading { radius, in_darkness }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = self.focus.toggled();
        tracing::debug!(focus = ?self.focus, "focus toggled");
    }

    /// Add fuel from a pickup; never goes past the cap.
    pub fn refuel(&mut self, amount: f32) {
        if !amount.is_finite() {
            return;
        }
        self.fuel = clamp_meter(self.fuel + amount, self.cfg.max_fuel);
    }

    /// Current radius from current fuel and focus.
    pub fn radius(&self) -> f32 {
        light_radius(&self.cfg, self.fuel / self.cfg.max_fuel, self.focus)
    }

    pub fn fuel(&self) -> f32 { self.fuel }
    pub fn sanity(&self) -> f32 { self.sanity }
    pub fn focus(&self) -> Focus { self.focus }
    pub fn config(&self) -> &LightConfig { &self.cfg }

    /// True when a low-sanity presentation effect may trigger.
    pub fn is_distressed(&self) -> bool {
        self.sanity < self.cfg.distress_sanity
    }

    #[cfg(test)]
    pub(crate) fn set_meters(&mut self, fuel: f32, sanity: f32) {
        self.fuel = fuel;
        self.sanity = sanity;
    }
}

#[inline]
fn clamp_meter(v: f32, max: f32) -> f32 {
    v.clamp(0.0, max)
}
