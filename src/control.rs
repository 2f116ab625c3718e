//! Feedback controllers that steer the tremolo from measured features.
//!
//! A controller is called synchronously on the processing path once per
//! completed feature window, so implementations must stay cheap and must not
//! block.

use crate::audio::features::ControllerFeedback;

/// Rate and depth targets handed to the engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModTargets {
    pub rate_hz: f32,
    pub depth: f32,
}

pub trait Controller {
    /// Decide new targets from the latest window. `targets` are the run's base
    /// targets; returning them unchanged leaves the effect as configured.
    fn update(
        &mut self,
        time_secs: f64,
        feedback: ControllerFeedback,
        targets: ModTargets,
    ) -> ModTargets;
}

impl<C: Controller + ?Sized> Controller for Box<C> {
    fn update(
        &mut self,
        time_secs: f64,
        feedback: ControllerFeedback,
        targets: ModTargets,
    ) -> ModTargets {
        (**self).update(time_secs, feedback, targets)
    }
}

/// Leaves every target as it is.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpController;

impl Controller for NoOpController {
    fn update(&mut self, _: f64, _: ControllerFeedback, targets: ModTargets) -> ModTargets {
        targets
    }
}

/// Louder passages get a deeper tremolo; busier (higher-ZCR) passages can
/// optionally speed it up.
///
/// ```text
/// depth = clamp(depth_floor + depth_gain * rms, 0, 1)
/// rate  = base_rate * (1 + rate_zcr_gain * zcr)
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FeatureFollower {
    pub depth_floor: f32,
    pub depth_gain: f32,
    pub rate_zcr_gain: f32,
}

impl Default for FeatureFollower {
    fn default() -> Self {
        Self {
            depth_floor: 0.2,
            depth_gain: 1.5,
            rate_zcr_gain: 0.0,
        }
    }
}

impl Controller for FeatureFollower {
    fn update(
        &mut self,
        time_secs: f64,
        feedback: ControllerFeedback,
        targets: ModTargets,
    ) -> ModTargets {
        let depth = (self.depth_floor + self.depth_gain * feedback.rms).clamp(0.0, 1.0);
        let rate_hz = targets.rate_hz * (1.0 + self.rate_zcr_gain * feedback.zcr).max(0.0);
        log::debug!(
            "t={:.3}s rms={:.4} zcr={:.4} -> rate={:.3}Hz depth={:.3}",
            time_secs,
            feedback.rms,
            feedback.zcr,
            rate_hz,
            depth
        );
        ModTargets { rate_hz, depth }
    }
}
