//! Unipolar LFO waveforms.
//!
//! Every shape maps a phase in `[0, 1)` to a modulation value in `[0, 1]`.
//! The tremolo reads that value as "how far down to pull the gain", so 0 is
//! full volume and 1 is the deepest point of the cycle.

use std::f32::consts::TAU;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LfoShape {
    #[default]
    Sine,
    Triangle,
    Square,
    /// Square with rounded edges, `tanh(3 * sin)`.
    SquareSoft,
}

impl LfoShape {
    pub const ALL: [LfoShape; 4] = [
        LfoShape::Sine,
        LfoShape::Triangle,
        LfoShape::Square,
        LfoShape::SquareSoft,
    ];

    /// Case-insensitive lookup. Unknown names fall back to [`LfoShape::Sine`].
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "sine" => LfoShape::Sine,
            "triangle" => LfoShape::Triangle,
            "square" => LfoShape::Square,
            "square-soft" => LfoShape::SquareSoft,
            _ => LfoShape::Sine,
        }
    }

    /// True when `name` is one of the recognized shape names.
    pub fn is_known(name: &str) -> bool {
        Self::ALL
            .iter()
            .any(|shape| shape.name().eq_ignore_ascii_case(name.trim()))
    }

    pub fn name(self) -> &'static str {
        match self {
            LfoShape::Sine => "sine",
            LfoShape::Triangle => "triangle",
            LfoShape::Square => "square",
            LfoShape::SquareSoft => "square-soft",
        }
    }

    /// Evaluate the waveform at `phase` (cycles, pre-wrapped into `[0, 1)`).
    #[inline]
    pub fn value(self, phase: f32) -> f32 {
        match self {
            LfoShape::Sine => sine(phase),
            LfoShape::Triangle => triangle(phase),
            LfoShape::Square => square(phase),
            LfoShape::SquareSoft => square_soft(phase),
        }
    }
}

impl fmt::Display for LfoShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[inline]
fn sine(phase: f32) -> f32 {
    0.5 * (1.0 + (TAU * phase).sin())
}

#[inline]
fn triangle(phase: f32) -> f32 {
    let t = phase % 1.0;
    // -1 at t=0, +1 at t=0.5, back to -1 at t=1
    let tri = if t < 0.5 { t * 4.0 - 1.0 } else { 3.0 - t * 4.0 };
    0.5 * (tri + 1.0)
}

#[inline]
fn square(phase: f32) -> f32 {
    if (TAU * phase).sin() >= 0.0 {
        1.0
    } else {
        0.0
    }
}

#[inline]
fn square_soft(phase: f32) -> f32 {
    let y = (3.0 * (TAU * phase).sin()).tanh();
    0.5 * (y + 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phases(steps: usize) -> impl Iterator<Item = f32> {
        (0..steps).map(move |i| i as f32 / steps as f32)
    }

    #[test]
    fn every_shape_stays_unipolar() {
        for shape in LfoShape::ALL {
            for ph in phases(10_000) {
                let v = shape.value(ph);
                assert!(
                    (0.0..=1.0).contains(&v),
                    "{} out of range at phase {}: {}",
                    shape,
                    ph,
                    v
                );
            }
        }
    }

    #[test]
    fn sine_landmarks() {
        assert!((LfoShape::Sine.value(0.0) - 0.5).abs() < 1e-6);
        assert!((LfoShape::Sine.value(0.25) - 1.0).abs() < 1e-6);
        assert!((LfoShape::Sine.value(0.75) - 0.0).abs() < 1e-6);
    }

    #[test]
    fn triangle_is_piecewise_linear() {
        let tri = LfoShape::Triangle;
        assert!((tri.value(0.0) - 0.0).abs() < 1e-6);
        assert!((tri.value(0.25) - 0.5).abs() < 1e-6);
        assert!((tri.value(0.5) - 1.0).abs() < 1e-6);
        assert!((tri.value(0.75) - 0.5).abs() < 1e-6);
        assert!(tri.value(0.999) < 0.01);
    }

    #[test]
    fn square_is_hard_edged() {
        let sq = LfoShape::Square;
        assert_eq!(sq.value(0.0), 1.0);
        assert_eq!(sq.value(0.1), 1.0);
        assert_eq!(sq.value(0.4), 1.0);
        assert_eq!(sq.value(0.6), 0.0);
        assert_eq!(sq.value(0.9), 0.0);
    }

    #[test]
    fn soft_square_is_rounded_but_saturates() {
        let soft = LfoShape::SquareSoft;
        assert!((soft.value(0.0) - 0.5).abs() < 1e-6);
        assert!(soft.value(0.25) > 0.99);
        assert!(soft.value(0.75) < 0.01);
        let edge = soft.value(0.01);
        assert!(edge > 0.5 && edge < 0.9, "edge should be rounded: {}", edge);
    }

    #[test]
    fn half_cycle_offset_sine_is_complementary() {
        for ph in phases(1_000) {
            let right = (ph + 0.5) % 1.0;
            let sum = LfoShape::Sine.value(ph) + LfoShape::Sine.value(right);
            assert!((sum - 1.0).abs() < 1e-5, "phase {}: {}", ph, sum);
        }
    }

    #[test]
    fn names_parse_case_insensitively() {
        assert_eq!(LfoShape::from_name("SINE"), LfoShape::Sine);
        assert_eq!(LfoShape::from_name("Triangle"), LfoShape::Triangle);
        assert_eq!(LfoShape::from_name("square"), LfoShape::Square);
        assert_eq!(LfoShape::from_name("Square-Soft"), LfoShape::SquareSoft);
    }

    #[test]
    fn unknown_names_fall_back_to_sine() {
        assert_eq!(LfoShape::from_name("sawtooth"), LfoShape::Sine);
        assert_eq!(LfoShape::from_name(""), LfoShape::Sine);
        assert!(!LfoShape::is_known("sawtooth"));
        assert!(LfoShape::is_known("SQUARE-soft"));
    }

    #[test]
    fn display_roundtrips_through_from_name() {
        for shape in LfoShape::ALL {
            assert_eq!(LfoShape::from_name(&shape.to_string()), shape);
        }
    }
}
