//! Block-wise driver tying features, controller and engine together.

/*
Each block is handled in two passes:

  1. scan    walk the block frame by frame, feed the feature window, ask the
             controller for new targets whenever a window completes, and apply
             the scripted demo ramp;
  2. process hand the whole block to the tremolo, which iterates per sample
             internally.

Targets set during the scan take effect from the start of that block's
processing pass. Phase and smoothers live inside the engine, so splitting the
signal into blocks never changes the modulation itself.
*/

use indicatif::ProgressBar;

use crate::audio::analysis::{AnalysisLog, AnalysisReport};
use crate::audio::decode::AudioData;
use crate::audio::features::FeatureExtractor;
use crate::control::{Controller, ModTargets};
use crate::dsp::tremolo::{ChannelLayout, Tremolo};

/// Frames per processing block.
pub const BLOCK_FRAMES: usize = 512;

/// Scripted depth sweep used by `--demo`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DemoRamp {
    pub start_secs: f64,
    pub end_secs: f64,
    pub base_depth: f32,
}

impl DemoRamp {
    /// Sweep from 20% to 100% of `base_depth` between 5 s and 8 s.
    pub fn new(base_depth: f32) -> Self {
        Self {
            start_secs: 5.0,
            end_secs: 8.0,
            base_depth,
        }
    }

    pub fn depth_at(&self, time_secs: f64) -> Option<f32> {
        if time_secs < self.start_secs || time_secs > self.end_secs {
            return None;
        }
        let span = (self.end_secs - self.start_secs).max(f64::EPSILON);
        let t = ((time_secs - self.start_secs) / span) as f32;
        Some(self.base_depth * (0.2 + 0.8 * t))
    }
}

#[derive(Clone, Copy, Debug)]
pub struct StreamOptions {
    /// Targets handed to the controller on every window.
    pub base: ModTargets,
    pub demo: Option<DemoRamp>,
    pub analyze: bool,
}

impl StreamOptions {
    pub fn new(base: ModTargets) -> Self {
        Self {
            base,
            demo: None,
            analyze: false,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct StreamReport {
    pub frames: usize,
    /// Feature windows handed to the controller.
    pub windows: usize,
    pub elapsed_secs: f64,
    pub analysis: Vec<AnalysisReport>,
}

pub struct StreamProcessor<C: Controller> {
    engine: Tremolo,
    controller: C,
    features: FeatureExtractor,
    options: StreamOptions,
    analysis: Option<AnalysisLog>,
    current: ModTargets,
    position: u64,
    windows: usize,
    ramp_released: bool,
}

impl<C: Controller> StreamProcessor<C> {
    pub fn new(mut engine: Tremolo, controller: C, options: StreamOptions) -> Self {
        engine.set_rate_hz(options.base.rate_hz);
        engine.set_depth(options.base.depth);
        Self {
            engine,
            controller,
            features: FeatureExtractor::new(),
            analysis: options.analyze.then(AnalysisLog::new),
            current: options.base,
            options,
            position: 0,
            windows: 0,
            ramp_released: false,
        }
    }

    pub fn engine(&self) -> &Tremolo {
        &self.engine
    }

    pub fn controller(&self) -> &C {
        &self.controller
    }

    /// Most recent targets returned by the controller.
    pub fn current_targets(&self) -> ModTargets {
        self.current
    }

    /// Run the whole buffer through the effect in place.
    pub fn run(&mut self, audio: &mut AudioData, progress: &ProgressBar) -> StreamReport {
        let layout = audio.channels;
        let sample_rate = audio.sample_rate.max(1) as f64;
        if self.engine.sample_rate() != sample_rate {
            self.engine.set_sample_rate(sample_rate);
        }

        let mut frames = 0usize;
        for block in audio.samples.chunks_mut(BLOCK_FRAMES * layout.count()) {
            self.scan(block, layout, sample_rate);
            self.engine.process(block, layout);

            let done = block.len() / layout.count();
            frames += done;
            progress.inc(done as u64);

            if let Some(log) = self.analysis.as_mut() {
                log.tick(self.position as f64 / sample_rate);
            }
        }

        let elapsed_secs = self.position as f64 / sample_rate;
        let analysis = match self.analysis.as_mut() {
            Some(log) => {
                log.finish(elapsed_secs);
                log.reports().to_vec()
            }
            None => Vec::new(),
        };

        StreamReport {
            frames,
            windows: self.windows,
            elapsed_secs,
            analysis,
        }
    }

    fn scan(&mut self, block: &[f32], layout: ChannelLayout, sample_rate: f64) {
        for frame in block.chunks_exact(layout.count()) {
            let time_secs = self.position as f64 / sample_rate;
            let (left, right) = match layout {
                ChannelLayout::Mono => (frame[0], frame[0]),
                ChannelLayout::Stereo => (frame[0], frame[1]),
            };
            self.features.push_sample(left, right);

            if let Some(feedback) = self.features.take_feedback() {
                let targets = self.controller.update(time_secs, feedback, self.options.base);
                self.engine.set_rate_hz(targets.rate_hz);
                self.engine.set_depth(targets.depth);
                self.current = targets;
                self.windows += 1;
                if let Some(log) = self.analysis.as_mut() {
                    log.record(feedback);
                }
            }

            if let Some(ramp) = self.options.demo {
                if let Some(depth) = ramp.depth_at(time_secs) {
                    self.engine.set_depth(depth);
                } else if time_secs > ramp.end_secs && !self.ramp_released {
                    self.engine.set_depth(self.current.depth);
                    self.ramp_released = true;
                }
            }

            self.position += 1;
        }
    }
}
