// Lookup tables for mixing colors in linear light instead of raw sRGB.
// Visual: the darkness fades into the lit floor without a muddy gray ring.

pub struct GammaLut {
    // sRGB(0..255) -> linear (0..1)
    to_linear: [f32; 256],
    // linear(0..1) quantized to 4096 steps -> sRGB(0..255)
    to_srgb: [u8; 4096],
}

impl GammaLut {
    /// Build both tables once at startup.
    pub fn new() -> Self {
        let mut to_linear = [0.0f32; 256];
        for (v, slot) in to_linear.iter_mut().enumerate() {
            let c = v as f32 / 255.0;
            *slot = if c <= 0.04045 { c / 12.92 } else { ((c + 0.055) / 1.055).powf(2.4) };
        }

        let mut to_srgb = [0u8; 4096];
        for (i, slot) in to_srgb.iter_mut().enumerate() {
            let l = i as f32 / 4095.0;
            let s = if l <= 0.003_130_8 { 12.92 * l } else { 1.055 * l.powf(1.0 / 2.4) - 0.055 };
            *slot = (s * 255.0).round().clamp(0.0, 255.0) as u8;
        }

        Self { to_linear, to_srgb }
    }

    #[inline]
    fn linear(&self, v: u32) -> f32 {
        self.to_linear[(v & 0xFF) as usize]
    }

    #[inline]
    fn srgb(&self, l: f32) -> u32 {
        self.to_srgb[(l.clamp(0.0, 1.0) * 4095.0).round() as usize] as u32
    }

    /// Lay `over` on top of `under` with coverage `a` in [0,1]. Both are 0x00RRGGBB.
    #[inline]
    pub fn mix(&self, under: u32, over: u32, a: f32) -> u32 {
        if a <= 0.0 {
            return under;
        }
        if a >= 1.0 {
            return over;
        }
        let inv = 1.0 - a;
        let mut out = 0u32;
        for shift in [16u32, 8, 0] {
            let u = self.linear(under >> shift);
            let o = self.linear(over >> shift);
            out |= self.srgb(a * o + inv * u) << shift;
        }
        out
    }
}

impl Default for GammaLut {
    fn default() -> Self {
        Self::new()
    }
}
