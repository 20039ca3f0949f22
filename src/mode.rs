//! Scene mode state machine.

/// The two discrete display states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Particles spread through the scatter sphere.
    #[default]
    Scattered,
    /// Particles assembled into the tree formation.
    Formed,
}

/// Holds the current mode and exposes the external toggle.
///
/// The animator polls the controller once per frame rather than receiving
/// events; a toggle takes visual effect on the next frame evaluated after it
/// and is expressed entirely through blend convergence.
#[derive(Debug, Default)]
pub struct ModeController {
    mode: Mode,
}

impl ModeController {
    /// Create a controller in the initial `Scattered` state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current mode.
    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Flip the current mode unconditionally. Safe mid-transition; it simply
    /// redirects the damping target.
    pub fn toggle(&mut self) {
        self.mode = match self.mode {
            Mode::Scattered => Mode::Formed,
            Mode::Formed => Mode::Scattered,
        };
    }

    /// Blend target for the current mode.
    #[inline]
    pub fn target(&self) -> f32 {
        match self.mode {
            Mode::Scattered => 0.0,
            Mode::Formed => 1.0,
        }
    }
}
