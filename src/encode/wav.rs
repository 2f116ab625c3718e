use std::path::Path;

use crate::audio::decode::AudioData;
use crate::audio::error::AudioIoResult;

/// Write 16-bit PCM, creating the parent directory if needed.
pub fn write_wav(path: &Path, audio: &AudioData) -> AudioIoResult<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }

    let spec = hound::WavSpec {
        channels: audio.channels.count() as u16,
        sample_rate: audio.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec)?;
    for &x in &audio.samples {
        writer.write_sample(quantize(x))?;
    }
    writer.finalize()?;

    log::debug!("Wrote {} frames to {}", audio.frames(), path.display());
    Ok(())
}

#[inline]
fn quantize(x: f32) -> i16 {
    (x.clamp(-1.0, 1.0) * 32767.0).round() as i16
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::tremolo::ChannelLayout;

    #[test]
    fn quantize_clamps_and_rounds() {
        assert_eq!(quantize(0.0), 0);
        assert_eq!(quantize(1.0), 32767);
        assert_eq!(quantize(-1.0), -32767);
        assert_eq!(quantize(3.0), 32767);
        assert_eq!(quantize(-3.0), -32767);
        assert_eq!(quantize(0.5), 16384);
    }

    #[test]
    fn creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("out.wav");
        let audio = AudioData {
            samples: vec![0.0, 0.5, -0.5],
            sample_rate: 8_000,
            channels: ChannelLayout::Mono,
        };
        write_wav(&path, &audio).unwrap();

        let reader = hound::WavReader::open(&path).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.bits_per_sample, 16);
        assert_eq!(spec.sample_rate, 8_000);
        let samples: Vec<i16> = reader.into_samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(samples, vec![0, 16384, -16384]);
    }
}
