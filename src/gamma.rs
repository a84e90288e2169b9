// Lookup tables for mixing fog over the map in linear light.
// Darkening in sRGB space makes half-alpha fog look far too heavy.

const LINEAR_STEPS: usize = 4096;

pub struct GammaLut {
    to_linear: [f32; 256],         // sRGB byte -> linear 0..1
    to_srgb: [u8; LINEAR_STEPS],   // quantized linear -> sRGB byte
}

impl GammaLut {
    pub fn new() -> Self {
        let to_linear = std::array::from_fn(|v| decode(v as f32 / 255.0));
        let to_srgb = std::array::from_fn(|i| {
            let s = encode(i as f32 / (LINEAR_STEPS - 1) as f32);
            (s * 255.0).round().clamp(0.0, 255.0) as u8
        });
        Self { to_linear, to_srgb }
    }

    #[inline]
    pub fn linear(&self, v: u8) -> f32 {
        self.to_linear[v as usize]
    }

    #[inline]
    pub fn srgb(&self, l: f32) -> u8 {
        let idx = (l.clamp(0.0, 1.0) * (LINEAR_STEPS - 1) as f32).round() as usize;
        self.to_srgb[idx]
    }

    /// `over` laid on top of `base` with coverage `alpha`, both 0x00RRGGBB.
    #[inline]
    pub fn mix(&self, base: u32, over: u32, alpha: f32) -> u32 {
        if alpha <= 0.0 {
            return base;
        }
        if alpha >= 1.0 {
            return over;
        }
        let channel = |shift: u32| {
            let b = self.linear(((base >> shift) & 0xFF) as u8);
            let o = self.linear(((over >> shift) & 0xFF) as u8);
            (self.srgb(b + (o - b) * alpha) as u32) << shift
        };
        channel(16) | channel(8) | channel(0)
    }
}

impl Default for GammaLut {
    fn default() -> Self {
        Self::new()
    }
}

fn decode(c: f32) -> f32 {
    if c <= 0.04045 { c / 12.92 } else { ((c + 0.055) / 1.055).powf(2.4) }
}

fn encode(l: f32) -> f32 {
    if l <= 0.003_130_8 { 12.92 * l } else { 1.055 * l.powf(1.0 / 2.4) - 0.055 }
}
