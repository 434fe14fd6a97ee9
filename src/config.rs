//! Tunables for the light, the vision mask and the little test room.
//!
//! Every struct has reference defaults, and all of them can be overridden from
//! a JSON file. Missing keys keep their default, so a config file only needs to
//! name what it changes:
//!
//! ```json
//! { "light": { "base_drain_rate": 3.0 }, "mask": { "falloff_steps": 4 } }
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::Error;

/// Numbers that drive fuel, radius and sanity.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LightConfig {
    /// Fuel at session start and the refuel cap.
    pub max_fuel: f32,
    /// Fuel units burned per second in wide focus.
    pub base_drain_rate: f32,
    /// Drain multiplier applied while focus is narrow.
    pub narrow_drain_multiplier: f32,
    /// Radius at empty fuel.
    pub min_radius: f32,
    /// Radius at full fuel.
    pub max_radius: f32,
    /// Radius multiplier applied while focus is narrow.
    pub narrow_radius_multiplier: f32,
    /// Below this radius the player is "in darkness".
    pub darkness_threshold: f32,
    /// Sanity lost per second just for being in darkness.
    pub base_sanity_drain: f32,
    /// Extra drain grows by 1/s for every `darkness_spread` pixels below the threshold.
    pub darkness_spread: f32,
    /// Sanity regained per second in good light.
    pub sanity_recovery_rate: f32,
    pub max_sanity: f32,
    /// Fuel restored by one pickup.
    pub refuel_amount: f32,
    /// Sanity under which the distress shake may fire.
    pub distress_sanity: f32,
}

impl LightConfig {
    pub const DEFAULT_MAX_FUEL: f32 = 100.0;
    pub const DEFAULT_BASE_DRAIN_RATE: f32 = 2.0;
    pub const DEFAULT_NARROW_DRAIN_MULTIPLIER: f32 = 1.6;
    pub const DEFAULT_MIN_RADIUS: f32 = 60.0;
    pub const DEFAULT_MAX_RADIUS: f32 = 170.0;
    pub const DEFAULT_NARROW_RADIUS_MULTIPLIER: f32 = 0.8;
    pub const DEFAULT_DARKNESS_THRESHOLD: f32 = 90.0;
    pub const DEFAULT_BASE_SANITY_DRAIN: f32 = 0.5;
    pub const DEFAULT_DARKNESS_SPREAD: f32 = 180.0;
    pub const DEFAULT_SANITY_RECOVERY_RATE: f32 = 0.2;
    pub const DEFAULT_MAX_SANITY: f32 = 100.0;
    pub const DEFAULT_REFUEL_AMOUNT: f32 = 20.0;
    pub const DEFAULT_DISTRESS_SANITY: f32 = 30.0;

    fn validate(&self) -> Result<(), Error> {
        let fields = [
            ("max_fuel", self.max_fuel),
            ("base_drain_rate", self.base_drain_rate),
            ("narrow_drain_multiplier", self.narrow_drain_multiplier),
            ("min_radius", self.min_radius),
            ("max_radius", self.max_radius),
            ("narrow_radius_multiplier", self.narrow_radius_multiplier),
            ("darkness_threshold", self.darkness_threshold),
            ("base_sanity_drain", self.base_sanity_drain),
            ("darkness_spread", self.darkness_spread),
            ("sanity_recovery_rate", self.sanity_recovery_rate),
            ("max_sanity", self.max_sanity),
            ("refuel_amount", self.refuel_amount),
            ("distress_sanity", self.distress_sanity),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(Error::InvalidConfig(format!("light.{name} must be finite")));
            }
            if value < 0.0 {
                return Err(Error::InvalidConfig(format!("light.{name} must not be negative")));
            }
        }
        if self.max_fuel == 0.0 || self.max_sanity == 0.0 {
            return Err(Error::InvalidConfig("light maxima must be positive".into()));
        }
        if self.min_radius > self.max_radius {
            return Err(Error::InvalidConfig(format!(
                "light.min_radius ({}) exceeds light.max_radius ({})",
                self.min_radius, self.max_radius
            )));
        }
        if self.darkness_spread == 0.0 {
            return Err(Error::InvalidConfig("light.darkness_spread must be positive".into()));
        }
        Ok(())
    }
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            max_fuel: Self::DEFAULT_MAX_FUEL,
            base_drain_rate: Self::DEFAULT_BASE_DRAIN_RATE,
            narrow_drain_multiplier: Self::DEFAULT_NARROW_DRAIN_MULTIPLIER,
            min_radius: Self::DEFAULT_MIN_RADIUS,
            max_radius: Self::DEFAULT_MAX_RADIUS,
            narrow_radius_multiplier: Self::DEFAULT_NARROW_RADIUS_MULTIPLIER,
            darkness_threshold: Self::DEFAULT_DARKNESS_THRESHOLD,
            base_sanity_drain: Self::DEFAULT_BASE_SANITY_DRAIN,
            darkness_spread: Self::DEFAULT_DARKNESS_SPREAD,
            sanity_recovery_rate: Self::DEFAULT_SANITY_RECOVERY_RATE,
            max_sanity: Self::DEFAULT_MAX_SANITY,
            refuel_amount: Self::DEFAULT_REFUEL_AMOUNT,
            distress_sanity: Self::DEFAULT_DISTRESS_SANITY,
        }
    }
}

/// Shape and color of the darkness layer.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct MaskConfig {
    /// Number of soft rings outside the fully lit core.
    pub falloff_steps: u32,
    /// Width of each ring in pixels.
    pub falloff_step_width: f32,
    /// Opacity added per ring, counted from the outermost ring inward.
    pub falloff_step_opacity: f32,
    /// 0x00RRGGBB
    pub darkness_color: u32,
}

impl MaskConfig {
    pub const DEFAULT_FALLOFF_STEPS: u32 = 3;
    pub const DEFAULT_FALLOFF_STEP_WIDTH: f32 = 12.0;
    pub const DEFAULT_FALLOFF_STEP_OPACITY: f32 = 0.12;
    pub const DEFAULT_DARKNESS_COLOR: u32 = 0x00_0b_0d_12;

    fn validate(&self) -> Result<(), Error> {
        if !self.falloff_step_width.is_finite() || self.falloff_step_width < 0.0 {
            return Err(Error::InvalidConfig(
                "mask.falloff_step_width must be finite and non-negative".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.falloff_step_opacity) {
            return Err(Error::InvalidConfig("mask.falloff_step_opacity must be in [0, 1]".into()));
        }
        if self.darkness_color > 0x00FF_FFFF {
            return Err(Error::InvalidConfig("mask.darkness_color must be 0x00RRGGBB".into()));
        }
        Ok(())
    }
}

impl Default for MaskConfig {
    fn default() -> Self {
        Self {
            falloff_steps: Self::DEFAULT_FALLOFF_STEPS,
            falloff_step_width: Self::DEFAULT_FALLOFF_STEP_WIDTH,
            falloff_step_opacity: Self::DEFAULT_FALLOFF_STEP_OPACITY,
            darkness_color: Self::DEFAULT_DARKNESS_COLOR,
        }
    }
}

/// The room, the pickups in it and how fast the player crosses it.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub tile_size: usize,
    pub cols: usize,
    pub rows: usize,
    pub fuel_pickups: usize,
    /// Pickups never spawn closer than this to the map edge.
    pub spawn_margin: i32,
    pub walk_speed: f32,
    pub sprint_speed: f32,
    pub seed: u64,
}

impl WorldConfig {
    pub const DEFAULT_TILE_SIZE: usize = 16;
    pub const DEFAULT_COLS: usize = 60;
    pub const DEFAULT_ROWS: usize = 40;
    pub const DEFAULT_FUEL_PICKUPS: usize = 10;
    pub const DEFAULT_SPAWN_MARGIN: i32 = 100;
    pub const DEFAULT_WALK_SPEED: f32 = 110.0;
    pub const DEFAULT_SPRINT_SPEED: f32 = 160.0;
    pub const DEFAULT_SEED: u64 = 0x4c49_4748_54;

    /// Map size in pixels; the occlusion buffer has exactly this size.
    pub fn pixel_size(&self) -> (usize, usize) {
        (self.cols * self.tile_size, self.rows * self.tile_size)
    }

    fn validate(&self) -> Result<(), Error> {
        if self.tile_size == 0 || self.cols < 3 || self.rows < 3 {
            return Err(Error::InvalidConfig(
                "world must be at least 3x3 tiles of non-zero size".into(),
            ));
        }
        for (name, speed) in [("walk_speed", self.walk_speed), ("sprint_speed", self.sprint_speed)] {
            if !speed.is_finite() || speed < 0.0 {
                return Err(Error::InvalidConfig(format!("world.{name} must be finite and non-negative")));
            }
        }
        if self.spawn_margin < 0 {
            return Err(Error::InvalidConfig("world.spawn_margin must not be negative".into()));
        }
        Ok(())
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            tile_size: Self::DEFAULT_TILE_SIZE,
            cols: Self::DEFAULT_COLS,
            rows: Self::DEFAULT_ROWS,
            fuel_pickups: Self::DEFAULT_FUEL_PICKUPS,
            spawn_margin: Self::DEFAULT_SPAWN_MARGIN,
            walk_speed: Self::DEFAULT_WALK_SPEED,
            sprint_speed: Self::DEFAULT_SPRINT_SPEED,
            seed: Self::DEFAULT_SEED,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub light: LightConfig,
    pub mask: MaskConfig,
    pub world: WorldConfig,
}

impl GameConfig {
    /// Read a JSON config file and validate it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, Error> {
        let config: GameConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), Error> {
        self.light.validate()?;
        self.mask.validate()?;
        self.world.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_values() {
        let c = GameConfig::default();
        assert_eq!(c.light.min_radius, 60.0);
        assert_eq!(c.light.max_radius, 170.0);
        assert_eq!(c.light.darkness_threshold, 90.0);
        assert_eq!(c.mask.falloff_steps, 3);
        assert_eq!(c.world.pixel_size(), (960, 640));
        assert!(c.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let c = GameConfig::from_json(r#"{ "light": { "base_drain_rate": 3.5 } }"#).unwrap();
        assert_eq!(c.light.base_drain_rate, 3.5);
        assert_eq!(c.light.max_radius, LightConfig::DEFAULT_MAX_RADIUS);
        assert_eq!(c.mask, MaskConfig::default());
    }

    #[test]
    fn inverted_radius_range_is_rejected() {
        let err = GameConfig::from_json(r#"{ "light": { "min_radius": 200.0 } }"#).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn zero_spread_is_rejected() {
        let err = GameConfig::from_json(r#"{ "light": { "darkness_spread": 0.0 } }"#).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = GameConfig::from_json("{ light: ").unwrap_err();
        assert!(matches!(err, Error::ConfigParse(_)));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = GameConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, Error::ConfigRead { .. }));
    }
}
