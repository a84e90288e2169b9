//! Owns the GM's editable fog and the player's mirror of it.
//!
//! Painting only ever touches the primary buffer. The mirror is refreshed in
//! one copy when the last open stroke ends, so the player view never shows a
//! half-finished stroke.

use tracing::{debug, info, warn};

use crate::brush::BrushSize;
use crate::buffer::OcclusionBuffer;
use crate::error::{Error, Result};
use crate::mapping::{self, MappingPolicy};
use crate::raster;
use crate::stroke::{StrokeMode, StrokeSessions};
use crate::types::{DisplayRegion, Pointer};

#[derive(Debug)]
pub struct OcclusionController {
    primary: OcclusionBuffer,
    mirror: OcclusionBuffer,
    brush: BrushSize,
    sessions: StrokeSessions,
    mapping: MappingPolicy,
    primary_dirty: bool,
    mirror_dirty: bool,
}

impl OcclusionController {
    /// Both buffers start fully fogged.
    pub fn new(width: u32, height: u32, brush: BrushSize) -> Result<Self> {
        let primary = OcclusionBuffer::new(width, height)?;
        let mirror = primary.clone();
        info!(width, height, radius = brush.radius(), "fog initialized");
        Ok(Self {
            primary,
            mirror,
            brush,
            sessions: StrokeSessions::default(),
            mapping: MappingPolicy::default(),
            primary_dirty: true,
            mirror_dirty: true,
        })
    }

    pub fn with_mapping_policy(mut self, policy: MappingPolicy) -> Self {
        self.mapping = policy;
        self
    }

    pub fn set_mapping_policy(&mut self, policy: MappingPolicy) {
        self.mapping = policy;
    }

    /// Button down. Repeated calls for an open mode do nothing.
    pub fn begin_stroke(&mut self, mode: StrokeMode) {
        if self.sessions.open(mode) {
            debug!(?mode, "stroke started");
        }
    }

    /// Stamps the brush at `pointer`. With both strokes open Conceal wins,
    /// and each cell is written at most once. Returns how many cells changed.
    /// Without an open stroke this does nothing.
    pub fn paint_at(&mut self, pointer: Pointer, region: &DisplayRegion) -> Result<usize> {
        let Some(mode) = self.painting_mode() else {
            return Ok(0);
        };
        let (w, h) = self.primary.dimensions();
        let Some((bx, by)) = mapping::map_pointer(self.mapping, pointer, region, w, h) else {
            return Ok(0);
        };

        let target = mode.target_opacity();
        let mut changed = 0;
        for (x, y) in raster::affected_cells(bx, by, self.brush.radius(), w, h) {
            if self.primary.get(x, y)? != target {
                self.primary.set(x, y, target)?;
                changed += 1;
            }
        }

        if changed > 0 {
            self.primary_dirty = true;
        }
        Ok(changed)
    }

    /// Button up. When this closes the last open stroke the mirror catches
    /// up with the primary. Returns whether the mirror was synced.
    pub fn end_stroke(&mut self, mode: StrokeMode) -> Result<bool> {
        if !self.sessions.close(mode) {
            return Ok(false);
        }
        debug!(?mode, "stroke finished");
        if self.sessions.any_open() {
            return Ok(false);
        }
        self.sync_mirror()?;
        Ok(true)
    }

    /// Ends whatever is still open, e.g. after the window lost focus.
    pub fn cancel_strokes(&mut self) -> Result<bool> {
        let mut synced = false;
        for mode in StrokeMode::ALL {
            synced |= self.end_stroke(mode)?;
        }
        Ok(synced)
    }

    /// New map loaded or rotated: fog everything again at the given size.
    /// Open strokes are dropped without syncing; both views get fresh fog anyway.
    pub fn reset_on_new_content(&mut self, width: u32, height: u32) -> Result<()> {
        if self.primary.dimensions() != (width, height) {
            self.primary = OcclusionBuffer::new(width, height)?;
            self.mirror = self.primary.clone();
            info!(width, height, "fog reallocated for new content");
        } else {
            self.primary.reset();
            self.mirror.reset();
            info!(width, height, "fog reset for new content");
        }
        self.sessions.clear();
        self.primary_dirty = true;
        self.mirror_dirty = true;
        Ok(())
    }

    pub fn adjust_brush(&mut self, delta: f32) -> f32 {
        let radius = self.brush.adjust(delta);
        debug!(radius, "brush resized");
        radius
    }

    pub fn primary(&self) -> &OcclusionBuffer {
        &self.primary
    }

    pub fn mirror(&self) -> &OcclusionBuffer {
        &self.mirror
    }

    pub fn brush(&self) -> &BrushSize {
        &self.brush
    }

    pub fn is_stroke_active(&self, mode: StrokeMode) -> bool {
        self.sessions.is_open(mode)
    }

    pub fn any_stroke_active(&self) -> bool {
        self.sessions.any_open()
    }

    /// True once after the primary changed.
    pub fn take_primary_dirty(&mut self) -> bool {
        std::mem::take(&mut self.primary_dirty)
    }

    /// True once after the mirror changed.
    pub fn take_mirror_dirty(&mut self) -> bool {
        std::mem::take(&mut self.mirror_dirty)
    }

    /// The one mode a paint sample applies, Conceal first.
    fn painting_mode(&self) -> Option<StrokeMode> {
        [StrokeMode::Conceal, StrokeMode::Reveal]
            .into_iter()
            .find(|m| self.sessions.is_open(*m))
    }

    fn sync_mirror(&mut self) -> Result<()> {
        match self.primary.clone_into(&mut self.mirror) {
            Ok(()) => {}
            Err(Error::DimensionMismatch { expected, found }) => {
                warn!(?expected, ?found, "mirror out of step with primary, rebuilding");
                self.mirror = self.primary.clone();
            }
            Err(e) => return Err(e),
        }
        self.mirror_dirty = true;
        info!(revealed = self.mirror.revealed_fraction(), "player view synced");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller(w: u32, h: u32, radius: f32) -> OcclusionController {
        let brush = BrushSize::new(radius, 0.0, 100.0, 1.0).expect("brush");
        OcclusionController::new(w, h, brush).expect("controller")
    }

    // Region the same size as the buffer, so pointer == cell.
    fn region(w: u32, h: u32) -> DisplayRegion {
        DisplayRegion::new(0.0, 0.0, w as f32, h as f32)
    }

    #[test]
    fn paint_without_stroke_is_ignored() {
        let mut c = controller(4, 4, 1.0);
        assert_eq!(c.paint_at(Pointer::new(2.0, 2.0), &region(4, 4)).expect("paint"), 0);
        assert_eq!(c.primary().revealed_fraction(), 0.0);
    }

    #[test]
    fn paint_touches_primary_only() {
        let mut c = controller(4, 4, 1.0);
        c.begin_stroke(StrokeMode::Reveal);
        assert_eq!(c.paint_at(Pointer::new(2.0, 2.0), &region(4, 4)).expect("paint"), 5);
        assert_eq!(c.primary().get(2, 2).expect("cell"), 0.0);
        assert_eq!(c.mirror().get(2, 2).expect("cell"), 1.0);
    }

    #[test]
    fn last_end_syncs_mirror() {
        let mut c = controller(8, 8, 2.0);
        c.begin_stroke(StrokeMode::Reveal);
        c.paint_at(Pointer::new(4.0, 4.0), &region(8, 8)).expect("paint");
        c.begin_stroke(StrokeMode::Conceal);
        assert!(!c.end_stroke(StrokeMode::Reveal).expect("end"));
        assert_ne!(c.primary(), c.mirror());
        assert!(c.end_stroke(StrokeMode::Conceal).expect("end"));
        assert_eq!(c.primary(), c.mirror());
    }

    #[test]
    fn stray_end_does_not_sync() {
        let mut c = controller(4, 4, 1.0);
        c.take_mirror_dirty();
        assert!(!c.end_stroke(StrokeMode::Reveal).expect("end"));
        assert!(!c.take_mirror_dirty());
    }

    #[test]
    fn conceal_wins_when_both_buttons_are_held() {
        let mut c = controller(4, 4, 1.0);
        c.take_primary_dirty();
        c.begin_stroke(StrokeMode::Reveal);
        c.begin_stroke(StrokeMode::Conceal);
        // Board is already fogged, so nothing changes and nothing is redrawn.
        assert_eq!(c.paint_at(Pointer::new(2.0, 2.0), &region(4, 4)).expect("paint"), 0);
        assert!(!c.take_primary_dirty());
        assert_eq!(c.paint_at(Pointer::new(2.0, 2.0), &region(4, 4)).expect("paint"), 0);
        assert_eq!(c.primary().revealed_fraction(), 0.0);
    }

    #[test]
    fn both_buttons_on_revealed_board_refog_each_cell_once() {
        let mut c = controller(4, 4, 1.0);
        c.begin_stroke(StrokeMode::Reveal);
        assert_eq!(c.paint_at(Pointer::new(2.0, 2.0), &region(4, 4)).expect("paint"), 5);
        c.begin_stroke(StrokeMode::Conceal);
        assert_eq!(c.paint_at(Pointer::new(2.0, 2.0), &region(4, 4)).expect("paint"), 5);
        assert_eq!(c.primary().revealed_fraction(), 0.0);
    }

    #[test]
    fn mirror_of_wrong_size_is_rebuilt_on_sync() {
        let mut c = controller(6, 4, 1.0);
        c.mirror = OcclusionBuffer::new(3, 3).expect("buffer");
        c.begin_stroke(StrokeMode::Reveal);
        c.paint_at(Pointer::new(3.0, 2.0), &region(6, 4)).expect("paint");
        assert!(c.end_stroke(StrokeMode::Reveal).expect("end"));
        assert_eq!(c.mirror(), c.primary());
        assert_eq!(c.mirror().dimensions(), (6, 4));
        assert!(c.take_mirror_dirty());
    }

    #[test]
    fn skip_policy_ignores_outside_samples() {
        let mut c = controller(4, 4, 1.0).with_mapping_policy(MappingPolicy::Skip);
        c.begin_stroke(StrokeMode::Reveal);
        assert_eq!(c.paint_at(Pointer::new(-3.0, 2.0), &region(4, 4)).expect("paint"), 0);
        c.set_mapping_policy(MappingPolicy::Clamp);
        assert!(c.paint_at(Pointer::new(-3.0, 2.0), &region(4, 4)).expect("paint") > 0);
        assert_eq!(c.primary().get(0, 2).expect("cell"), 0.0);
    }

    #[test]
    fn cancel_strokes_brings_mirror_up_to_date() {
        let mut c = controller(6, 6, 1.0);
        c.begin_stroke(StrokeMode::Reveal);
        c.paint_at(Pointer::new(3.0, 3.0), &region(6, 6)).expect("paint");
        assert!(c.cancel_strokes().expect("cancel"));
        assert!(!c.any_stroke_active());
        assert_eq!(c.primary(), c.mirror());
    }

    #[test]
    fn reset_same_size_refogs_in_place() {
        let mut c = controller(4, 4, 1.0);
        c.begin_stroke(StrokeMode::Reveal);
        c.paint_at(Pointer::new(2.0, 2.0), &region(4, 4)).expect("paint");
        c.end_stroke(StrokeMode::Reveal).expect("end");
        c.begin_stroke(StrokeMode::Conceal);
        c.reset_on_new_content(4, 4).expect("reset");
        assert!(!c.is_stroke_active(StrokeMode::Conceal));
        assert_eq!(c.primary().revealed_fraction(), 0.0);
        assert_eq!(c.mirror().revealed_fraction(), 0.0);
    }

    #[test]
    fn dirty_flags_are_read_once() {
        let mut c = controller(4, 4, 1.0);
        assert!(c.take_primary_dirty());
        assert!(!c.take_primary_dirty());
        c.begin_stroke(StrokeMode::Reveal);
        c.paint_at(Pointer::new(1.0, 1.0), &region(4, 4)).expect("paint");
        assert!(c.take_primary_dirty());
        // Repainting the same spot changes nothing.
        c.paint_at(Pointer::new(1.0, 1.0), &region(4, 4)).expect("paint");
        assert!(!c.take_primary_dirty());
    }

    #[test]
    fn adjust_brush_goes_through_brush_size() {
        let mut c = controller(4, 4, 5.0);
        assert_eq!(c.adjust_brush(3.0), 8.0);
        assert_eq!(c.brush().radius(), 8.0);
    }
}
