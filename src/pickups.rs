// Fuel cans scattered around the room. Walking over one refuels the light
// and removes the can.

use rand::Rng;

use crate::config::WorldConfig;
use crate::types::{Aabb, Vec2};

/// A 6x10 can drawn at 1.5x scale.
pub const PICKUP_SIZE: Vec2 = Vec2 { x: 9.0, y: 15.0 };

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FuelPickup {
    pub position: Vec2,
}

impl FuelPickup {
    pub fn hitbox(&self) -> Aabb {
        Aabb {
            center: self.position,
            half: Vec2::new(PICKUP_SIZE.x / 2.0, PICKUP_SIZE.y / 2.0),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct FuelPickups {
    items: Vec<FuelPickup>,
}

impl FuelPickups {
    /// Place `cfg.fuel_pickups` cans at whole-pixel spots at least
    /// `spawn_margin` away from every map edge.
    pub fn scatter<R: Rng>(cfg: &WorldConfig, rng: &mut R) -> Self {
        let (w, h) = cfg.pixel_size();
        let (xs, xe) = spawn_span(cfg.spawn_margin, w);
        let (ys, ye) = spawn_span(cfg.spawn_margin, h);
        let items = (0..cfg.fuel_pickups)
            .map(|_| FuelPickup {
                position: Vec2::new(rng.gen_range(xs..=xe) as f32, rng.gen_range(ys..=ye) as f32),
            })
            .collect();
        Self { items }
    }

    pub fn from_positions(positions: impl IntoIterator<Item = Vec2>) -> Self {
        Self { items: positions.into_iter().map(|position| FuelPickup { position }).collect() }
    }

    /// Remove every can touching `player` and return how many were taken.
    pub fn collect(&mut self, player: &Aabb) -> usize {
        let before = self.items.len();
        self.items.retain(|p| !p.hitbox().overlaps(player));
        before - self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FuelPickup> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// Inclusive spawn range along one axis; collapses to the middle on tiny maps.
fn spawn_span(margin: i32, size: usize) -> (i32, i32) {
    let size = size as i32;
    let (lo, hi) = (margin, size - margin);
    if lo <= hi { (lo, hi) } else { (size / 2, size / 2) }
}
