use std::f32::consts::TAU;

use super::decode::AudioData;
use crate::dsp::tremolo::ChannelLayout;

const LEFT_HZ: f32 = 220.0;
const RIGHT_HZ: f32 = 330.0;
const LEVEL: f32 = 0.2;

/// A quiet stereo fifth (220 Hz / 330 Hz) under a raised-cosine swell,
/// used when no input file exists yet.
pub fn make_test_pad(seconds: f32, sample_rate: u32) -> AudioData {
    let frames = ((seconds * sample_rate as f32) as usize).max(1);
    let len = seconds.max(f32::EPSILON);
    let mut samples = Vec::with_capacity(frames * 2);

    for i in 0..frames {
        let t = i as f32 / sample_rate as f32;
        let env = 0.5 * (1.0 - (TAU * (t / len).min(1.0)).cos());
        samples.push(LEVEL * env * (TAU * LEFT_HZ * t).sin());
        samples.push(LEVEL * env * (TAU * RIGHT_HZ * t).sin());
    }

    AudioData {
        samples,
        sample_rate,
        channels: ChannelLayout::Stereo,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_and_level() {
        let pad = make_test_pad(2.0, 8_000);
        assert_eq!(pad.channels, ChannelLayout::Stereo);
        assert_eq!(pad.frames(), 16_000);
        assert!((pad.duration_secs() - 2.0).abs() < 1e-9);
        assert!(pad.samples.iter().all(|s| s.abs() <= LEVEL + 1e-6));
        // silent at the start, loudest mid-way
        assert_eq!(pad.samples[0], 0.0);
        let mid_peak = pad.samples[15_000..17_000]
            .iter()
            .fold(0.0f32, |m, s| m.max(s.abs()));
        assert!(mid_peak > 0.15);
    }

    #[test]
    fn always_at_least_one_frame() {
        let pad = make_test_pad(0.0, 44_100);
        assert_eq!(pad.frames(), 1);
    }
}
