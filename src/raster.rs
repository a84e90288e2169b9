//! Circular brush rasterization.
//!
//! [`affected_cells`] walks the bounding square of the brush, already clipped
//! to the grid, and yields the cells whose integer offset from the rounded
//! center is within `radius` (edge inclusive). Nothing is collected up front.

/// Lazy sequence of `(x, y)` cells under a round brush.
#[derive(Clone, Debug)]
pub struct AffectedCells {
    cx: i64,
    cy: i64,
    radius: f32,
    x0: i64,
    x1: i64,
    y1: i64,
    x: i64,
    y: i64,
    done: bool,
}

/// Cells of a `width`×`height` grid covered by a brush centered at
/// (`center_x`, `center_y`) in buffer coordinates.
pub fn affected_cells(center_x: f32, center_y: f32, radius: f32, width: u32, height: u32) -> AffectedCells {
    // NaN radius fails this too.
    let usable = radius >= 0.0 && center_x.is_finite() && center_y.is_finite() && width > 0 && height > 0;
    if !usable {
        return AffectedCells::empty();
    }

    let cx = center_x.round() as i64;
    let cy = center_y.round() as i64;
    let reach = radius.floor() as i64;

    let x0 = cx.saturating_sub(reach).max(0);
    let x1 = cx.saturating_add(reach).min(width as i64 - 1);
    let y0 = cy.saturating_sub(reach).max(0);
    let y1 = cy.saturating_add(reach).min(height as i64 - 1);

    AffectedCells {
        cx,
        cy,
        radius,
        x0,
        x1,
        y1,
        x: x0,
        y: y0,
        done: x0 > x1 || y0 > y1,
    }
}

impl AffectedCells {
    fn empty() -> Self {
        Self { cx: 0, cy: 0, radius: 0.0, x0: 0, x1: 0, y1: 0, x: 0, y: 0, done: true }
    }

    #[inline]
    fn covers(&self, x: i64, y: i64) -> bool {
        let dx = (x - self.cx) as f64;
        let dy = (y - self.cy) as f64;
        (dx * dx + dy * dy).sqrt() <= self.radius as f64
    }
}

impl Iterator for AffectedCells {
    type Item = (u32, u32);

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            let (x, y) = (self.x, self.y);

            // Advance in row-major order before testing the current cell.
            if self.x < self.x1 {
                self.x += 1;
            } else if self.y < self.y1 {
                self.x = self.x0;
                self.y += 1;
            } else {
                self.done = true;
            }

            if self.covers(x, y) {
                return Some((x as u32, y as u32));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        let cols = (self.x1 - self.x0 + 1) as usize;
        let remaining_rows = (self.y1 - self.y) as usize;
        let this_row = (self.x1 - self.x + 1) as usize;
        (0, Some(remaining_rows * cols + this_row))
    }
}

impl std::iter::FusedIterator for AffectedCells {}
