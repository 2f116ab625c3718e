use std::path::Path;
use symphonia::core::audio::{Channels, SampleBuffer};
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL, CODEC_TYPE_PCM_S16LE};
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use super::error::{AudioIoError, AudioIoResult};
use crate::dsp::tremolo::ChannelLayout;

/// Interleaved samples normalized to `[-1, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioData {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
    pub channels: ChannelLayout,
}

impl AudioData {
    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels.count()
    }

    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frames() as f64 / self.sample_rate as f64
    }
}

/// Read a 16-bit PCM WAV file, mono or stereo.
pub fn read_wav(path: &Path) -> AudioIoResult<AudioData> {
    let file = std::fs::File::open(path).map_err(|source| AudioIoError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
        .map_err(AudioIoError::Probe)?;

    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or(AudioIoError::NoTrack)?;

    let params = &track.codec_params;
    if params.codec != CODEC_TYPE_PCM_S16LE || params.bits_per_sample.is_some_and(|b| b != 16) {
        let name = symphonia::default::get_codecs()
            .get_codec(params.codec)
            .map(|d| d.short_name.to_string())
            .unwrap_or_else(|| format!("{:?}", params.codec));
        let bits = params
            .bits_per_sample
            .map_or_else(|| "unknown".to_string(), |b| b.to_string());
        return Err(AudioIoError::UnsupportedEncoding(format!("{}, {} bits", name, bits)));
    }

    let channels = channel_layout(params.channels)?;
    let sample_rate = params.sample_rate.ok_or(AudioIoError::MissingSampleRate)?;
    let track_id = track.id;

    let mut decoder = symphonia::default::get_codecs()
        .make(params, &DecoderOptions::default())
        .map_err(AudioIoError::Decode)?;

    let mut samples: Vec<f32> = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(symphonia::core::errors::Error::IoError(ref e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(e) => return Err(AudioIoError::Decode(e)),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(d) => d,
            Err(symphonia::core::errors::Error::DecodeError(msg)) => {
                log::warn!("Skipping corrupt packet: {}", msg);
                continue;
            }
            Err(e) => return Err(AudioIoError::Decode(e)),
        };

        let spec = *decoded.spec();
        let num_frames = decoded.frames();

        let mut sample_buf = SampleBuffer::<f32>::new(num_frames as u64, spec);
        sample_buf.copy_interleaved_ref(decoded);
        samples.extend_from_slice(sample_buf.samples());
    }

    let audio = AudioData {
        samples,
        sample_rate,
        channels,
    };

    log::info!(
        "Decoded audio: {} frames, {}Hz, {} ch, {:.1}s",
        audio.frames(),
        sample_rate,
        channels.count(),
        audio.duration_secs()
    );

    Ok(audio)
}

/// Only mono and stereo tracks are accepted; an undeclared layout is an error.
fn channel_layout(channels: Option<Channels>) -> AudioIoResult<ChannelLayout> {
    let count = channels.ok_or(AudioIoError::MissingChannelLayout)?.count();
    ChannelLayout::from_count(count).ok_or(AudioIoError::UnsupportedChannels(count))
}
