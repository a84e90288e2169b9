// Stroke sessions: one independent Idle/Active flag per brush mode, so a
// reveal drag and a conceal drag never stomp on each other's state.

/// What a stroke does to the cells under the brush.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StrokeMode {
    /// Clear fog (left button).
    Reveal,
    /// Put fog back (right button).
    Conceal,
}

impl StrokeMode {
    pub const ALL: [StrokeMode; 2] = [StrokeMode::Reveal, StrokeMode::Conceal];

    /// Opacity written into every cell the brush covers.
    pub fn target_opacity(self) -> f32 {
        match self {
            StrokeMode::Reveal => crate::buffer::REVEALED,
            StrokeMode::Conceal => crate::buffer::FOGGED,
        }
    }

    fn slot(self) -> usize {
        match self {
            StrokeMode::Reveal => 0,
            StrokeMode::Conceal => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StrokeSessions {
    active: [bool; 2],
}

impl StrokeSessions {
    /// Idle -> Active. Returns false if the session was already open.
    pub fn open(&mut self, mode: StrokeMode) -> bool {
        !std::mem::replace(&mut self.active[mode.slot()], true)
    }

    /// Active -> Idle. Returns false if there was nothing to close.
    pub fn close(&mut self, mode: StrokeMode) -> bool {
        std::mem::replace(&mut self.active[mode.slot()], false)
    }

    pub fn is_open(&self, mode: StrokeMode) -> bool {
        self.active[mode.slot()]
    }

    pub fn any_open(&self) -> bool {
        self.active.iter().any(|&a| a)
    }

    /// Open sessions, Reveal first.
    pub fn open_modes(&self) -> impl Iterator<Item = StrokeMode> + '_ {
        StrokeMode::ALL.into_iter().filter(|m| self.is_open(*m))
    }

    pub fn clear(&mut self) {
        self.active = [false; 2];
    }
}
