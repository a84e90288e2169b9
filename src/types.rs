// Plain data shared by the engine and the windows around it.

/// A 0x00RRGGBB image the size of whatever it is shown in.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameBuffer {
    pub width: usize,      // pixels across
    pub height: usize,     // pixels down
    pub pixels: Vec<u32>,  // row-major, each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    /// A frame filled with a single color.
    pub fn solid(width: usize, height: usize, color: u32) -> Self {
        Self { width, height, pixels: vec![color; width * height] }
    }
}

/// Pointer position in screen (window) pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pointer {
    pub x: f32,
    pub y: f32,
}

impl Pointer {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Screen rectangle a buffer is drawn into. Owned by the presentation side;
/// the engine only ever borrows it to map pointers.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DisplayRegion {
    pub x_min: f32,
    pub y_min: f32,
    pub width: f32,
    pub height: f32,
}

impl DisplayRegion {
    pub fn new(x_min: f32, y_min: f32, width: f32, height: f32) -> Self {
        Self { x_min, y_min, width, height }
    }

    pub fn x_max(&self) -> f32 {
        self.x_min + self.width
    }

    pub fn y_max(&self) -> f32 {
        self.y_min + self.height
    }

    /// Edge-inclusive containment test.
    pub fn contains(&self, p: Pointer) -> bool {
        p.x >= self.x_min && p.x <= self.x_max() && p.y >= self.y_min && p.y <= self.y_max()
    }

    /// Largest rectangle with the content's aspect ratio that fits inside
    /// `outer_w`×`outer_h`, centered.
    pub fn fit(content_w: usize, content_h: usize, outer_w: usize, outer_h: usize) -> Self {
        if content_w == 0 || content_h == 0 || outer_w == 0 || outer_h == 0 {
            return Self::default();
        }
        let scale = (outer_w as f32 / content_w as f32).min(outer_h as f32 / content_h as f32);
        let width = content_w as f32 * scale;
        let height = content_h as f32 * scale;
        Self {
            x_min: (outer_w as f32 - width) * 0.5,
            y_min: (outer_h as f32 - height) * 0.5,
            width,
            height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_letterboxes_wide_content() {
        let r = DisplayRegion::fit(200, 100, 400, 400);
        assert_eq!(r.width, 400.0);
        assert_eq!(r.height, 200.0);
        assert_eq!(r.x_min, 0.0);
        assert_eq!(r.y_min, 100.0);
    }

    #[test]
    fn fit_pillarboxes_tall_content() {
        let r = DisplayRegion::fit(100, 200, 400, 200);
        assert_eq!((r.width, r.height), (100.0, 200.0));
        assert_eq!((r.x_min, r.y_min), (150.0, 0.0));
    }

    #[test]
    fn fit_of_empty_content_is_empty() {
        assert_eq!(DisplayRegion::fit(0, 10, 100, 100), DisplayRegion::default());
    }

    #[test]
    fn contains_is_edge_inclusive() {
        let r = DisplayRegion::new(10.0, 10.0, 20.0, 20.0);
        assert!(r.contains(Pointer::new(10.0, 30.0)));
        assert!(!r.contains(Pointer::new(9.9, 15.0)));
        assert!(!r.contains(Pointer::new(15.0, 30.1)));
    }
}
