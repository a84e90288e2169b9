// Screen pointer -> fog buffer coordinates.
// The fog grid rarely matches the on-screen size of the map, so everything
// goes through normalized [0,1] coordinates first.

use serde::Deserialize;

use crate::types::{DisplayRegion, Pointer};

/// What to do with pointer samples that land outside the display region.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MappingPolicy {
    /// Pin the sample to the nearest edge of the region.
    #[default]
    Clamp,
    /// Drop the sample.
    Skip,
}

/// Maps `pointer` inside `region` onto a `buffer_width`×`buffer_height` grid.
/// Points outside the region clamp to its edge.
pub fn to_buffer_coord(pointer: Pointer, region: &DisplayRegion, buffer_width: u32, buffer_height: u32) -> (f32, f32) {
    let u = normalized(pointer.x, region.x_min, region.width);
    let v = normalized(pointer.y, region.y_min, region.height);
    (u * buffer_width as f32, v * buffer_height as f32)
}

/// [`to_buffer_coord`] behind the region check `policy` asks for.
pub fn map_pointer(
    policy: MappingPolicy,
    pointer: Pointer,
    region: &DisplayRegion,
    buffer_width: u32,
    buffer_height: u32,
) -> Option<(f32, f32)> {
    if policy == MappingPolicy::Skip && !region.contains(pointer) {
        return None;
    }
    Some(to_buffer_coord(pointer, region, buffer_width, buffer_height))
}

#[inline]
fn normalized(pos: f32, min: f32, extent: f32) -> f32 {
    if extent.is_nan() || extent <= 0.0 {
        return 0.0;
    }
    let t = (pos - min) / extent;
    // NaN pointer coordinates pin to the origin.
    if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region() -> DisplayRegion {
        DisplayRegion::new(100.0, 50.0, 200.0, 100.0)
    }

    #[test]
    fn maps_center_to_buffer_center() {
        let (bx, by) = to_buffer_coord(Pointer::new(200.0, 100.0), &region(), 1920, 1080);
        assert_eq!((bx, by), (960.0, 540.0));
    }

    #[test]
    fn independent_of_buffer_resolution() {
        let p = Pointer::new(150.0, 75.0);
        assert_eq!(to_buffer_coord(p, &region(), 4, 4), (1.0, 1.0));
        assert_eq!(to_buffer_coord(p, &region(), 400, 40), (100.0, 10.0));
    }

    #[test]
    fn outside_points_clamp_to_edges() {
        assert_eq!(to_buffer_coord(Pointer::new(0.0, 0.0), &region(), 10, 10), (0.0, 0.0));
        assert_eq!(to_buffer_coord(Pointer::new(999.0, 999.0), &region(), 10, 10), (10.0, 10.0));
    }

    #[test]
    fn degenerate_region_maps_to_origin() {
        let flat = DisplayRegion::new(0.0, 0.0, 0.0, 10.0);
        assert_eq!(to_buffer_coord(Pointer::new(5.0, 5.0), &flat, 10, 10), (0.0, 5.0));
    }

    #[test]
    fn skip_policy_drops_outside_samples() {
        let outside = Pointer::new(10.0, 10.0);
        assert_eq!(map_pointer(MappingPolicy::Skip, outside, &region(), 10, 10), None);
        assert_eq!(map_pointer(MappingPolicy::Clamp, outside, &region(), 10, 10), Some((0.0, 0.0)));
    }
}
