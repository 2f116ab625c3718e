pub mod audio;
pub mod config;
pub mod control;
pub mod dsp;
pub mod encode;
pub mod stream;
pub mod tempo;

pub use audio::decode::AudioData;
pub use control::{Controller, ModTargets};
pub use dsp::tremolo::{ChannelLayout, Tremolo};
pub use stream::{StreamOptions, StreamProcessor};
