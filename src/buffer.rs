//! The occlusion grid: one opacity per cell, 1.0 = fogged, 0.0 = revealed.

use crate::error::{Error, Result};

pub const FOGGED: f32 = 1.0;
pub const REVEALED: f32 = 0.0;

/// Dense row-major grid of fog opacity in [0,1].
/// Size is fixed at construction; build a new buffer to change it.
#[derive(Clone, Debug, PartialEq)]
pub struct OcclusionBuffer {
    width: u32,
    height: u32,
    opacity: Vec<f32>, // length = width * height
}

impl OcclusionBuffer {
    /// A fully fogged `width`×`height` grid.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        let len = width as usize * height as usize;
        Ok(Self { width, height, opacity: vec![FOGGED; len] })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Fog everything again.
    pub fn reset(&mut self) {
        self.fill(FOGGED);
    }

    pub fn fill(&mut self, opacity: f32) {
        let v = opacity.clamp(0.0, 1.0);
        self.opacity.iter_mut().for_each(|a| *a = v);
    }

    pub fn get(&self, x: u32, y: u32) -> Result<f32> {
        let idx = self.index(x, y)?;
        Ok(self.opacity[idx])
    }

    /// Writes one cell; the value is clamped into [0,1].
    pub fn set(&mut self, x: u32, y: u32, opacity: f32) -> Result<()> {
        let idx = self.index(x, y)?;
        self.opacity[idx] = opacity.clamp(0.0, 1.0);
        Ok(())
    }

    /// Copies every cell into `dest`, which must be the same size.
    pub fn clone_into(&self, dest: &mut OcclusionBuffer) -> Result<()> {
        if dest.dimensions() != self.dimensions() {
            return Err(Error::DimensionMismatch {
                expected: self.dimensions(),
                found: dest.dimensions(),
            });
        }
        dest.opacity.copy_from_slice(&self.opacity);
        Ok(())
    }

    /// Whole grid, row-major. This is what the presentation layer uploads.
    pub fn as_slice(&self) -> &[f32] {
        &self.opacity
    }

    /// Share of cells that are more revealed than fogged.
    pub fn revealed_fraction(&self) -> f32 {
        let open = self.opacity.iter().filter(|&&a| a < 0.5).count();
        open as f32 / self.opacity.len() as f32
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> Result<usize> {
        if x >= self.width || y >= self.height {
            return Err(Error::OutOfBounds { x, y, width: self.width, height: self.height });
        }
        Ok(y as usize * self.width as usize + x as usize)
    }
}
