//! Sample-accurate DSP building blocks for the tremolo.
//!
//! Everything here is allocation-free once constructed and raises no errors:
//! out-of-range inputs are clamped to the nearest valid value.

/// Waveform shapes for the modulation oscillator.
pub mod lfo;
/// One-pole parameter smoothing.
pub mod smoother;
/// The amplitude-modulation engine.
pub mod tremolo;

pub use lfo::LfoShape;
pub use smoother::OnePoleSmoother;
pub use tremolo::{ChannelLayout, Tremolo};

/// Tiny offset mixed into recursive state so it never decays into subnormals.
pub(crate) const DENORMAL_GUARD: f32 = 1e-20;
