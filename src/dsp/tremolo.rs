//! Stereo tremolo: amplitude modulation driven by a smoothed LFO.

/*
Tremolo
=======

Per sample:

    rate   = rate_smoother(rate_target)          phase increment = rate / fs
    depth  = depth_smoother(depth_target)
    lfo_l  = shape(phase)
    lfo_r  = shape((phase + stereo_offset) mod 1)
    gain   = 1 - depth * lfo
    out    = (1 - wet) * dry + wet * (dry + guard) * gain,   clamped to [-1, 1]
    phase += increment, wrapped into [0, 1)

Rate and depth targets only ever reach the audio through their smoothers, so a
controller can move them in steps without clicks. The oscillator phase and
both smoothers carry across calls, which makes one call over N frames
identical to N calls over one frame each.

A stereo offset of 0.5 cycles (180 degrees) turns the tremolo into an
auto-panner for the sine shape: whenever one side dips the other swells.
*/

use super::lfo::LfoShape;
use super::smoother::OnePoleSmoother;
use super::DENORMAL_GUARD;

const DEFAULT_SAMPLE_RATE: f64 = 48_000.0;
const DEFAULT_RATE_HZ: f32 = 5.0;
const DEFAULT_DEPTH: f32 = 0.6;
const DEFAULT_SMOOTHING_SECS: f32 = 0.01;
const MIN_RATE_HZ: f32 = 1e-4;
const MAX_RATE_HZ: f32 = 1e6;
const MIN_PHASE_INC: f32 = 1e-9;
const MAX_STEREO_PHASE_DEG: f32 = 180.0;

/// Interleaving of an audio buffer. Only mono and stereo are supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelLayout {
    Mono,
    Stereo,
}

impl ChannelLayout {
    pub fn from_count(channels: usize) -> Option<Self> {
        match channels {
            1 => Some(ChannelLayout::Mono),
            2 => Some(ChannelLayout::Stereo),
            _ => None,
        }
    }

    pub fn count(self) -> usize {
        match self {
            ChannelLayout::Mono => 1,
            ChannelLayout::Stereo => 2,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Tremolo {
    sample_rate: f64,
    rate_hz: f32,
    depth: f32,
    wet: f32,
    /// Right-channel offset in cycles, `[0, 0.5]`.
    stereo_offset: f32,
    shape: LfoShape,
    /// Oscillator position in cycles, always in `[0, 1)`.
    phase: f32,
    rate_smoother: OnePoleSmoother,
    depth_smoother: OnePoleSmoother,
}

impl Default for Tremolo {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_RATE)
    }
}

impl Tremolo {
    pub fn new(sample_rate: f64) -> Self {
        let mut trem = Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            rate_hz: DEFAULT_RATE_HZ,
            depth: DEFAULT_DEPTH,
            wet: 1.0,
            stereo_offset: 0.0,
            shape: LfoShape::Sine,
            phase: 0.0,
            rate_smoother: OnePoleSmoother::default(),
            depth_smoother: OnePoleSmoother::default(),
        };
        trem.rate_smoother.reset(DEFAULT_RATE_HZ);
        trem.depth_smoother.reset(DEFAULT_DEPTH);
        trem.set_smoothing_time(DEFAULT_SMOOTHING_SECS);
        trem.set_sample_rate(sample_rate);
        trem
    }

    /// Changes the rate both smoothers run at. Their current outputs are kept,
    /// so the change is seamless.
    pub fn set_sample_rate(&mut self, sample_rate: f64) {
        self.sample_rate = if sample_rate.is_finite() && sample_rate > 0.0 {
            sample_rate
        } else {
            DEFAULT_SAMPLE_RATE
        };
        for smoother in [&mut self.rate_smoother, &mut self.depth_smoother] {
            let current = smoother.value();
            smoother.set_sample_rate(self.sample_rate);
            smoother.reset(current);
        }
    }

    /// Glide time for rate and depth changes.
    pub fn set_smoothing_time(&mut self, tau_seconds: f32) {
        self.rate_smoother.set_time_constant(tau_seconds);
        self.depth_smoother.set_time_constant(tau_seconds);
    }

    /// NaN is ignored; everything else is clamped to `[0, 1]`.
    pub fn set_depth(&mut self, depth: f32) {
        if !depth.is_nan() {
            self.depth = clamp01(depth);
        }
    }

    /// NaN is ignored; infinities clamp to the finite rate range.
    pub fn set_rate_hz(&mut self, rate_hz: f32) {
        if !rate_hz.is_nan() {
            self.rate_hz = rate_hz.clamp(MIN_RATE_HZ, MAX_RATE_HZ);
        }
    }

    pub fn set_wet(&mut self, wet: f32) {
        if !wet.is_nan() {
            self.wet = clamp01(wet);
        }
    }

    /// Right-channel lag in degrees, clamped to `[0, 180]`. NaN is ignored.
    pub fn set_stereo_phase_deg(&mut self, degrees: f32) {
        if degrees.is_nan() {
            return;
        }
        let deg = degrees.clamp(0.0, MAX_STEREO_PHASE_DEG);
        self.stereo_offset = deg / 360.0;
    }

    pub fn set_shape(&mut self, shape: LfoShape) {
        self.shape = shape;
    }

    /// Jump both smoothers to the current targets, skipping the glide.
    pub fn snap_to_targets(&mut self) {
        self.rate_smoother.reset(self.rate_hz);
        self.depth_smoother.reset(self.depth);
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn rate_hz(&self) -> f32 {
        self.rate_hz
    }

    pub fn depth(&self) -> f32 {
        self.depth
    }

    pub fn wet(&self) -> f32 {
        self.wet
    }

    pub fn stereo_offset(&self) -> f32 {
        self.stereo_offset
    }

    pub fn shape(&self) -> LfoShape {
        self.shape
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn smoothed_depth(&self) -> f32 {
        self.depth_smoother.value()
    }

    pub fn smoothed_rate(&self) -> f32 {
        self.rate_smoother.value()
    }

    /// Modulate an interleaved buffer in place. A trailing partial frame is
    /// left untouched.
    pub fn process(&mut self, interleaved: &mut [f32], layout: ChannelLayout) {
        match layout {
            ChannelLayout::Mono => {
                for sample in interleaved.iter_mut() {
                    let (gain_l, _) = self.tick();
                    *sample = self.mix(*sample, gain_l);
                }
            }
            ChannelLayout::Stereo => {
                for frame in interleaved.chunks_exact_mut(2) {
                    let (gain_l, gain_r) = self.tick();
                    frame[0] = self.mix(frame[0], gain_l);
                    frame[1] = self.mix(frame[1], gain_r);
                }
            }
        }
    }

    /// Advance the smoothers and oscillator by one frame, returning the
    /// left and right gains for it.
    #[inline]
    fn tick(&mut self) -> (f32, f32) {
        let rate_now = self.rate_smoother.process(self.rate_hz);
        let inc = ((rate_now as f64 / self.sample_rate) as f32).max(MIN_PHASE_INC);
        let depth_now = self.depth_smoother.process(self.depth);

        let phase_l = self.phase;
        let phase_r = wrap_phase(self.phase + self.stereo_offset);

        let gain_l = 1.0 - depth_now * self.shape.value(phase_l);
        let gain_r = 1.0 - depth_now * self.shape.value(phase_r);

        self.phase = wrap_phase(self.phase + inc);
        (gain_l, gain_r)
    }

    #[inline]
    fn mix(&self, dry: f32, gain: f32) -> f32 {
        let wet_signal = (dry + DENORMAL_GUARD) * gain;
        ((1.0 - self.wet) * dry + self.wet * wet_signal).clamp(-1.0, 1.0)
    }
}

#[inline]
fn clamp01(x: f32) -> f32 {
    x.clamp(0.0, 1.0)
}

/// Fold a non-negative phase back into `[0, 1)`.
#[inline]
fn wrap_phase(phase: f32) -> f32 {
    if !phase.is_finite() {
        0.0
    } else if phase >= 1.0 {
        phase - phase.floor()
    } else {
        phase
    }
}
