// FX: the low-sanity "distress" shake, applied to the finished frame.
// Visual outcome: when SANITY is low, the whole picture now and then jitters
// by a pixel or two for about a tenth of a second.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::types::FrameBuffer;

/// Chance per frame that a shake starts while distressed.
pub const SHAKE_CHANCE: f64 = 0.003;
/// Seconds a shake lasts.
pub const SHAKE_DURATION: f32 = 0.12;
/// Max offset as a fraction of the viewport width.
pub const SHAKE_INTENSITY: f32 = 0.002;

pub struct DistressShake {
    rng: Pcg32,
    remaining: f32,
}

impl DistressShake {
    pub fn new(seed: u64) -> Self {
        Self { rng: Pcg32::seed_from_u64(seed), remaining: 0.0 }
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }

    /// Start a shake now unless one is already running.
    pub fn trigger(&mut self) {
        if !self.is_active() {
            self.remaining = SHAKE_DURATION;
            tracing::debug!("distress shake");
        }
    }

    /// Advance the shake clock and return this frame's pixel offset.
    pub fn update(&mut self, dt: f32, distressed: bool, viewport_width: usize) -> (i32, i32) {
        if distressed && !self.is_active() && self.rng.gen_bool(SHAKE_CHANCE) {
            self.trigger();
        }
        if !self.is_active() {
            return (0, 0);
        }
        self.remaining -= dt.max(0.0);

        let amp = SHAKE_INTENSITY * viewport_width as f32;
        let dx = self.rng.gen_range(-amp..=amp).round() as i32;
        let dy = self.rng.gen_range(-amp..=amp).round() as i32;
        (dx, dy)
    }

    pub fn stop(&mut self) {
        self.remaining = 0.0;
    }
}

/// Copy `src` into `dst` moved by `offset`; uncovered pixels get `fill`.
pub fn blit_shaken(src: &FrameBuffer, dst: &mut FrameBuffer, offset: (i32, i32), fill: u32) {
    let (ox, oy) = offset;
    if ox == 0 && oy == 0 && src.pixels.len() == dst.pixels.len() {
        dst.pixels.copy_from_slice(&src.pixels);
        return;
    }
    let (w, h) = (dst.width as i32, dst.height as i32);
    for y in 0..h {
        for x in 0..w {
            let (sx, sy) = (x - ox, y - oy);
            let inside = sx >= 0 && sy >= 0 && sx < src.width as i32 && sy < src.height as i32;
            dst.pixels[(y * w + x) as usize] = if inside {
                src.pixels[sy as usize * src.width + sx as usize]
            } else {
                fill
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calm_player_never_shakes() {
        let mut fx = DistressShake::new(1);
        for _ in 0..10_000 {
            assert_eq!(fx.update(1.0 / 60.0, false, 960), (0, 0));
        }
    }

    #[test]
    fn shake_is_small_and_ends() {
        let mut fx = DistressShake::new(1);
        fx.trigger();
        let mut frames = 0;
        while fx.is_active() {
            let (dx, dy) = fx.update(1.0 / 60.0, false, 960);
            assert!(dx.abs() <= 2 && dy.abs() <= 2);
            frames += 1;
        }
        assert!((7..=9).contains(&frames), "frames = {frames}");
    }

    #[test]
    fn distress_eventually_shakes() {
        let mut fx = DistressShake::new(3);
        let started = (0..50_000).any(|_| {
            fx.update(1.0 / 60.0, true, 960);
            fx.is_active()
        });
        assert!(started);
    }

    #[test]
    fn blit_moves_pixels_and_fills_the_gap() {
        let mut src = FrameBuffer::new(4, 2);
        src.pixels = vec![1, 2, 3, 4, 5, 6, 7, 8];
        let mut dst = FrameBuffer::new(4, 2);
        blit_shaken(&src, &mut dst, (1, 0), 0);
        assert_eq!(dst.pixels, vec![0, 1, 2, 3, 0, 5, 6, 7]);
        blit_shaken(&src, &mut dst, (0, 0), 0);
        assert_eq!(dst.pixels, src.pixels);
    }
}
