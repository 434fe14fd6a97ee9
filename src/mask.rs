// Dynamic vision mask.
// Every frame the whole map goes dark, then a soft-edged hole is erased around
// the player. Visual expectation: a crisp lit circle of `radius` pixels, ringed
// by a few fainter bands that fade into full darkness.
use crate::config::MaskConfig;
use crate::error::Error;
use crate::gamma::GammaLut;
use crate::types::{FrameBuffer, Mask, Vec2};

/// Darkness layer the size of the map. `alpha` is the darkness opacity per pixel:
/// 1 = opaque darkness, 0 = fully lit.
pub struct OcclusionBuffer {
    pub width: usize,
    pub height: usize,
    pub color: u32, // 0x00RRGGBB of the darkness
    pub alpha: Vec<f32>,
}

impl OcclusionBuffer {
    pub fn new(width: usize, height: usize, color: u32) -> Self {
        Self { width, height, color, alpha: vec![1.0; width * height] }
    }

    /// Darkness opacity at (x,y). Panics when out of bounds, like slice indexing.
    pub fn alpha_at(&self, x: usize, y: usize) -> f32 {
        self.alpha[y * self.width + x]
    }

    pub fn is_fully_dark(&self) -> bool {
        self.alpha.iter().all(|&a| a >= 1.0)
    }

    /// Lay the darkness over `scene` (same size). Lit pixels keep the scene color.
    pub fn composite_onto(&self, scene: &mut FrameBuffer, lut: &GammaLut) -> Result<(), Error> {
        if scene.width != self.width || scene.height != self.height {
            return Err(Error::SizeMismatch {
                expected: (self.width, self.height),
                actual: (scene.width, scene.height),
            });
        }
        for (px, &a) in scene.pixels.iter_mut().zip(&self.alpha) {
            *px = lut.mix(*px, self.color, a);
        }
        Ok(())
    }
}

/// Owns the occlusion buffer plus a reusable coverage mask.
pub struct VisionMaskRenderer {
    cfg: MaskConfig,
    occlusion: OcclusionBuffer,
    mask: Mask, // scratch: accumulated light coverage for this frame
}

impl VisionMaskRenderer {
    pub fn new(width: usize, height: usize, cfg: MaskConfig) -> Self {
        let occlusion = OcclusionBuffer::new(width, height, cfg.darkness_color);
        let mask = Mask::new(width, height);
        Self { cfg, occlusion, mask }
    }

    /// Rebuild the darkness for this frame around `center`.
    ///
    /// A radius of zero (or anything not a positive number) cuts no hole at all,
    /// falloff rings included. `center` may lie off the map.
    pub fn render(&mut self, radius: f32, center: Vec2) -> &OcclusionBuffer {
        // 1) Darkness everywhere
        self.occlusion.alpha.fill(1.0);
        self.mask.clear();

        if radius.is_finite() && radius > 0.0 {
            // 2) Falloff rings, outermost first; each inner ring adds more opacity
            let n = self.cfg.falloff_steps;
            for i in (1..=n).rev() {
                let ring = radius + i as f32 * self.cfg.falloff_step_width;
                let opacity = (self.cfg.falloff_step_opacity * (n - i + 1) as f32).min(1.0);
                stamp_disc(&mut self.mask, center, ring, opacity);
            }
            // 3) Fully lit core
            stamp_disc(&mut self.mask, center, radius, 1.0);
        }

        // 4) Erase the mask out of the darkness
        for (dark, &lit) in self.occlusion.alpha.iter_mut().zip(&self.mask.alpha) {
            *dark *= 1.0 - lit;
        }

        &self.occlusion
    }

    pub fn occlusion(&self) -> &OcclusionBuffer {
        &self.occlusion
    }
}

/// Composite a filled disc of constant `opacity` into the mask (source-over).
/// Pixels count as inside when their center lies within `r` of `center`.
fn stamp_disc(mask: &mut Mask, center: Vec2, r: f32, opacity: f32) {
    if r <= 0.0 || opacity <= 0.0 || !center.x.is_finite() || !center.y.is_finite() {
        return;
    }
    let r2 = r * r;

    // Scan only the bounding box, clipped to the mask
    let x0 = ((center.x - r).floor().max(0.0)) as usize;
    let y0 = ((center.y - r).floor().max(0.0)) as usize;
    let x1 = ((center.x + r).ceil().min(mask.width as f32)).max(0.0) as usize;
    let y1 = ((center.y + r).ceil().min(mask.height as f32)).max(0.0) as usize;

    for y in y0..y1 {
        let dy = y as f32 + 0.5 - center.y;
        let row = y * mask.width;
        for x in x0..x1 {
            let dx = x as f32 + 0.5 - center.x;
            if dx * dx + dy * dy > r2 {
                continue; // outside the circle
            }
            let a = &mut mask.alpha[row + x];
            *a = if opacity >= 1.0 { 1.0 } else { (*a + opacity * (1.0 - *a)).min(1.0) };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: usize = 320;
    const H: usize = 200;

    fn renderer() -> VisionMaskRenderer {
        VisionMaskRenderer::new(W, H, MaskConfig::default())
    }

    // pixel (100,100) sits exactly on the center
    const C: Vec2 = Vec2 { x: 100.5, y: 100.5 };

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn zero_radius_is_fully_dark() {
        let mut r = renderer();
        assert!(r.render(0.0, C).is_fully_dark());
    }

    #[test]
    fn nan_radius_is_fully_dark() {
        let mut r = renderer();
        assert!(r.render(f32::NAN, C).is_fully_dark());
    }

    #[test]
    fn core_is_clear_and_far_pixels_are_dark() {
        let mut r = renderer();
        let occ = r.render(50.0, C);
        assert_eq!(occ.alpha_at(100, 100), 0.0);
        assert_eq!(occ.alpha_at(150, 100), 0.0); // exactly on the core edge
        assert_eq!(occ.alpha_at(0, 0), 1.0);
        assert_eq!(occ.alpha_at(W - 1, H - 1), 1.0);
    }

    #[test]
    fn falloff_bands_get_darker_outward() {
        let mut r = renderer();
        let occ = r.render(50.0, C);
        // ring opacities 0.12 (outer), 0.24, 0.36 stacked with source-over
        assert!(approx(occ.alpha_at(156, 100), 0.88 * 0.76 * 0.64));
        assert!(approx(occ.alpha_at(168, 100), 0.88 * 0.76));
        assert!(approx(occ.alpha_at(180, 100), 0.88));
        assert_eq!(occ.alpha_at(190, 100), 1.0);
    }

    #[test]
    fn second_render_leaves_no_residue() {
        let mut r = renderer();
        r.render(90.0, C);
        let occ = r.render(20.0, Vec2::new(250.5, 150.5));
        // inside the first hole, outside the second one's falloff
        assert_eq!(occ.alpha_at(100, 100), 1.0);
        assert_eq!(occ.alpha_at(250, 150), 0.0);

        let occ = r.render(0.0, C);
        assert!(occ.is_fully_dark());
    }

    #[test]
    fn center_off_the_map_is_allowed() {
        let mut r = renderer();
        assert!(r.render(60.0, Vec2::new(-500.0, -500.0)).is_fully_dark());

        let occ = r.render(60.0, Vec2::new(-10.0, -10.0));
        assert_eq!(occ.alpha_at(0, 0), 0.0);
        assert_eq!(occ.alpha_at(W - 1, H - 1), 1.0);
    }

    #[test]
    fn composite_keeps_lit_pixels_and_darkens_the_rest() {
        let mut r = renderer();
        r.render(30.0, C);
        let mut scene = FrameBuffer::new(W, H);
        scene.fill(0x00_30_40_50);
        r.occlusion().composite_onto(&mut scene, &GammaLut::new()).unwrap();
        assert_eq!(scene.pixels[100 * W + 100], 0x00_30_40_50);
        assert_eq!(scene.pixels[0], MaskConfig::DEFAULT_DARKNESS_COLOR);
    }

    #[test]
    fn composite_rejects_wrong_size() {
        let r = renderer();
        let mut scene = FrameBuffer::new(W - 1, H);
        let err = r.occlusion().composite_onto(&mut scene, &GammaLut::new()).unwrap_err();
        assert!(matches!(err, Error::SizeMismatch { .. }));
    }
}
