use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const LOCAL_CONFIG: &str = "smart_tremolo.toml";

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tremolo: TremoloConfig,
    #[serde(default)]
    pub controller: ControllerConfig,
}

#[derive(Debug, Deserialize)]
pub struct TremoloConfig {
    #[serde(default = "default_rate")]
    pub rate: f32,
    #[serde(default = "default_depth")]
    pub depth: f32,
    #[serde(default = "default_wet")]
    pub wet: f32,
    /// Degrees, 0-180
    #[serde(default)]
    pub stereo_phase: f32,
    #[serde(default = "default_shape")]
    pub shape: String,
    /// Rate/depth glide time in milliseconds
    #[serde(default = "default_smoothing_ms")]
    pub smoothing_ms: f32,
}

#[derive(Debug, Deserialize)]
pub struct ControllerConfig {
    #[serde(default)]
    pub kind: ControllerKind,
    #[serde(default = "default_depth_floor")]
    pub depth_floor: f32,
    #[serde(default = "default_depth_gain")]
    pub depth_gain: f32,
    #[serde(default)]
    pub rate_zcr_gain: f32,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ControllerKind {
    /// Keep rate and depth as configured
    #[default]
    None,
    /// Follow loudness (and optionally zero crossings)
    Follow,
}

impl Default for TremoloConfig {
    fn default() -> Self {
        Self {
            rate: default_rate(),
            depth: default_depth(),
            wet: default_wet(),
            stereo_phase: 0.0,
            shape: default_shape(),
            smoothing_ms: default_smoothing_ms(),
        }
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            kind: ControllerKind::None,
            depth_floor: default_depth_floor(),
            depth_gain: default_depth_gain(),
            rate_zcr_gain: 0.0,
        }
    }
}

pub fn default_rate() -> f32 { 5.0 }
pub fn default_depth() -> f32 { 0.6 }
pub fn default_wet() -> f32 { 1.0 }
pub fn default_shape() -> String { "sine".into() }
pub fn default_smoothing_ms() -> f32 { 10.0 }
fn default_depth_floor() -> f32 { 0.2 }
fn default_depth_gain() -> f32 { 1.5 }

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Invalid config {}", path.display()))
}

pub fn parse_config(content: &str) -> Result<Config> {
    Ok(toml::from_str(content)?)
}

/// `--config` if given, else `./smart_tremolo.toml`, else the platform config dir.
pub fn find_config(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let local = PathBuf::from(LOCAL_CONFIG);
    if local.exists() {
        return Some(local);
    }
    let global = dirs::config_dir()?.join("smart-tremolo").join("config.toml");
    global.exists().then_some(global)
}
