pub mod analysis;
pub mod decode;
pub mod error;
pub mod features;
pub mod testpad;

pub use decode::AudioData;
pub use error::AudioIoError;
pub use features::{ControllerFeedback, FeatureExtractor};
