//! One-pole exponential parameter smoother.

/*
Parameter Smoothing
===================

Changing a gain or rate parameter in one step produces an audible click.
A one-pole low-pass on the parameter turns the step into an exponential glide:

    y[n] = a * y[n-1] + (1 - a) * x[n]        a = exp(-1 / (tau * fs))

After one time constant the output has covered ~63% of the distance to the
target, after five ~99.3%. Typical click-free values of tau are 5..20 ms.

The recursive state gets a tiny additive offset each step so a signal that
settles toward zero never lands in the subnormal range, where some CPUs slow
down by orders of magnitude.
*/

use super::DENORMAL_GUARD;

const DEFAULT_SAMPLE_RATE: f64 = 48_000.0;
const DEFAULT_TIME_CONSTANT: f32 = 0.01;
const MIN_TIME_CONSTANT: f32 = 1e-6;

#[derive(Debug, Clone, Copy)]
pub struct OnePoleSmoother {
    sample_rate: f64,
    tau: f32,
    coeff: f32,
    state: f32,
}

impl Default for OnePoleSmoother {
    fn default() -> Self {
        let mut smoother = Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            tau: DEFAULT_TIME_CONSTANT,
            coeff: 0.0,
            state: 0.0,
        };
        smoother.update_coeff();
        smoother
    }
}

impl OnePoleSmoother {
    pub fn new(sample_rate: f64, tau_seconds: f32) -> Self {
        let mut smoother = Self::default();
        smoother.sample_rate = sanitize_rate(sample_rate);
        smoother.tau = tau_seconds.max(MIN_TIME_CONSTANT);
        smoother.update_coeff();
        smoother
    }

    /// Non-positive or non-finite rates fall back to 48 kHz.
    pub fn set_sample_rate(&mut self, sample_rate: f64) {
        self.sample_rate = sanitize_rate(sample_rate);
        self.update_coeff();
    }

    /// Clamped to at least one microsecond.
    pub fn set_time_constant(&mut self, tau_seconds: f32) {
        self.tau = if tau_seconds > MIN_TIME_CONSTANT {
            tau_seconds
        } else {
            MIN_TIME_CONSTANT
        };
        self.update_coeff();
    }

    /// Jump straight to `value` with no glide.
    pub fn reset(&mut self, value: f32) {
        self.state = value;
    }

    /// Advance one sample toward `target` and return the smoothed value.
    #[inline]
    pub fn process(&mut self, target: f32) -> f32 {
        if !target.is_finite() {
            return self.state;
        }
        self.state = self.coeff * (self.state + DENORMAL_GUARD) + (1.0 - self.coeff) * target;
        self.state
    }

    pub fn value(&self) -> f32 {
        self.state
    }

    pub fn time_constant(&self) -> f32 {
        self.tau
    }

    pub fn coeff(&self) -> f32 {
        self.coeff
    }

    fn update_coeff(&mut self) {
        self.coeff = (-1.0 / (self.tau as f64 * self.sample_rate)).exp() as f32;
    }
}

fn sanitize_rate(sample_rate: f64) -> f64 {
    if sample_rate.is_finite() && sample_rate > 0.0 {
        sample_rate
    } else {
        DEFAULT_SAMPLE_RATE
    }
}
