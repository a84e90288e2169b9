// Builds what each window shows: the map fitted into the window with the fog
// laid over it. The GM view uses see-through fog, the player view solid fog.

use crate::buffer::OcclusionBuffer;
use crate::gamma::GammaLut;
use crate::types::{DisplayRegion, FrameBuffer};

/// How fog is drawn in one viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FogStyle {
    pub color: u32,  // 0x00RRGGBB
    pub alpha: f32,  // multiplier on cell opacity; 1.0 hides fogged cells completely
}

pub const LETTERBOX: u32 = 0x00_10_10_10;

/// Fills `out` with `map` scaled into `region` (nearest neighbour) and fog
/// from `fog` blended over it. Pixels outside `region` get the letterbox color.
pub fn render_view(
    out: &mut FrameBuffer,
    map: &FrameBuffer,
    fog: &OcclusionBuffer,
    region: &DisplayRegion,
    style: FogStyle,
    lut: &GammaLut,
) {
    out.pixels.iter_mut().for_each(|p| *p = LETTERBOX);
    if map.width == 0 || map.height == 0 || region.width <= 0.0 || region.height <= 0.0 {
        return;
    }

    let x_start = region.x_min.max(0.0).floor() as usize;
    let y_start = region.y_min.max(0.0).floor() as usize;
    let x_end = (region.x_max().ceil() as usize).min(out.width);
    let y_end = (region.y_max().ceil() as usize).min(out.height);
    let (fog_w, fog_h) = fog.dimensions();
    let opacity = fog.as_slice();

    for sy in y_start..y_end {
        // Sample at pixel centers so edges don't smear.
        let v = ((sy as f32 + 0.5 - region.y_min) / region.height).clamp(0.0, 1.0);
        let map_row = sample(v, map.height) * map.width;
        let fog_row = sample(v, fog_h as usize) * fog_w as usize;
        let out_row = sy * out.width;

        for sx in x_start..x_end {
            let u = ((sx as f32 + 0.5 - region.x_min) / region.width).clamp(0.0, 1.0);
            let base = map.pixels[map_row + sample(u, map.width)];
            let a = opacity[fog_row + sample(u, fog_w as usize)] * style.alpha;
            out.pixels[out_row + sx] = lut.mix(base, style.color, a);
        }
    }
}

/// Brush radius in fog cells -> radius in screen pixels for `region`.
pub fn screen_radius(radius_cells: f32, fog: &OcclusionBuffer, region: &DisplayRegion) -> f32 {
    radius_cells * region.width / fog.width() as f32
}

#[inline]
fn sample(t: f32, len: usize) -> usize {
    ((t * len as f32) as usize).min(len - 1)
}
