// Brush radius driven by the scroll wheel.

use crate::error::{Error, Result};

/// Brush radius in fog cells, kept inside `[min, max]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BrushSize {
    radius: f32,
    min: f32,
    max: f32,
    sensitivity: f32, // radius change per unit of adjustment signal
}

impl BrushSize {
    pub fn new(radius: f32, min: f32, max: f32, sensitivity: f32) -> Result<Self> {
        let sane = min.is_finite()
            && max.is_finite()
            && min >= 0.0
            && min <= max
            && sensitivity.is_finite();
        if !sane {
            return Err(Error::InvalidBrushRange { min, max });
        }
        let radius = if radius.is_finite() { radius.clamp(min, max) } else { min };
        Ok(Self { radius, min, max, sensitivity })
    }

    /// `radius + delta * sensitivity`, clamped. Non-finite input is ignored.
    pub fn adjust(&mut self, delta: f32) -> f32 {
        let next = self.radius + delta * self.sensitivity;
        if next.is_finite() {
            self.radius = next.clamp(self.min, self.max);
        }
        self.radius
    }

    pub fn set_radius(&mut self, radius: f32) {
        if radius.is_finite() {
            self.radius = radius.clamp(self.min, self.max);
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }
}

impl Default for BrushSize {
    fn default() -> Self {
        Self { radius: 20.0, min: 5.0, max: 50.0, sensitivity: 50.0 }
    }
}
