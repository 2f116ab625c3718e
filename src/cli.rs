use clap::Parser;
use std::path::PathBuf;

use smart_tremolo::config::ControllerKind;

pub const DEFAULT_INPUT: &str = "assets/input.wav";
pub const DEFAULT_OUTPUT: &str = "assets/output.wav";

#[derive(Parser, Debug)]
#[command(
    name = "smart-tremolo",
    about = "Tremolo for 16-bit PCM WAV files with a feature-driven controller hook"
)]
pub struct Cli {
    /// Input WAV (16-bit PCM, mono or stereo). A test pad is generated if missing.
    #[arg(long = "in", default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// Output WAV
    #[arg(long = "out", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// LFO rate in Hz (> 0)
    #[arg(long, default_value_t = 5.0, value_parser = parse_rate)]
    pub rate: f32,

    /// Modulation depth (0-1)
    #[arg(long, default_value_t = 0.6, value_parser = parse_unit)]
    pub depth: f32,

    /// Wet/dry mix (0-1)
    #[arg(long, default_value_t = 1.0, value_parser = parse_unit)]
    pub wet: f32,

    /// Right-channel LFO offset in degrees (0-180)
    #[arg(long, default_value_t = 0.0, value_parser = parse_stereo_phase)]
    pub stereophase: f32,

    /// LFO shape: sine, triangle, square, square-soft
    #[arg(long, default_value = "sine")]
    pub shape: String,

    /// Tempo-synced rate, e.g. bpm:120,div:1/8 (overrides --rate)
    #[arg(long)]
    pub rate_sync: Option<String>,

    /// Feedback controller driven by loudness and zero crossings
    #[arg(long, value_enum, default_value_t = ControllerKind::None)]
    pub controller: ControllerKind,

    /// Log average RMS/ZCR once per second of audio
    #[arg(long)]
    pub analyze: bool,

    /// Sweep depth from 20% to 100% between 5s and 8s
    #[arg(long)]
    pub demo: bool,

    /// Config file (defaults to ./smart_tremolo.toml or the user config dir)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

fn parse_f32(s: &str) -> Result<f32, String> {
    let v: f32 = s.trim().parse().map_err(|_| format!("not a number: {}", s))?;
    if v.is_finite() {
        Ok(v)
    } else {
        Err(format!("not a finite number: {}", s))
    }
}

pub fn check_rate(v: f32) -> Result<f32, String> {
    if v > 0.0 {
        Ok(v)
    } else {
        Err(format!("rate must be > 0, got {}", v))
    }
}

pub fn check_unit(v: f32) -> Result<f32, String> {
    if (0.0..=1.0).contains(&v) {
        Ok(v)
    } else {
        Err(format!("must be within [0, 1], got {}", v))
    }
}

pub fn check_stereo_phase(v: f32) -> Result<f32, String> {
    if (0.0..=180.0).contains(&v) {
        Ok(v)
    } else {
        Err(format!("stereo phase must be within [0, 180], got {}", v))
    }
}

fn parse_rate(s: &str) -> Result<f32, String> {
    parse_f32(s).and_then(check_rate)
}

fn parse_unit(s: &str) -> Result<f32, String> {
    parse_f32(s).and_then(check_unit)
}

fn parse_stereo_phase(s: &str) -> Result<f32, String> {
    parse_f32(s).and_then(check_stereo_phase)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("smart-tremolo").chain(args.iter().copied()))
    }

    #[test]
    fn defaults() {
        let cli = parse(&[]).unwrap();
        assert_eq!(cli.input, PathBuf::from(DEFAULT_INPUT));
        assert_eq!(cli.output, PathBuf::from(DEFAULT_OUTPUT));
        assert_eq!(cli.rate, 5.0);
        assert_eq!(cli.depth, 0.6);
        assert_eq!(cli.wet, 1.0);
        assert_eq!(cli.stereophase, 0.0);
        assert_eq!(cli.shape, "sine");
        assert_eq!(cli.controller, ControllerKind::None);
        assert!(!cli.analyze && !cli.demo);
    }

    #[test]
    fn full_flag_set() {
        let cli = parse(&[
            "--in",
            "a.wav",
            "--out",
            "b.wav",
            "--rate",
            "7.5",
            "--depth",
            "1",
            "--wet",
            "0.25",
            "--stereophase",
            "180",
            "--shape",
            "Triangle",
            "--rate-sync",
            "bpm:100,div:1/4",
            "--controller",
            "follow",
            "--analyze",
            "--demo",
        ])
        .unwrap();
        assert_eq!(cli.input, PathBuf::from("a.wav"));
        assert_eq!(cli.rate, 7.5);
        assert_eq!(cli.stereophase, 180.0);
        assert_eq!(cli.rate_sync.as_deref(), Some("bpm:100,div:1/4"));
        assert_eq!(cli.controller, ControllerKind::Follow);
        assert!(cli.analyze && cli.demo);
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!(parse(&["--rate", "0"]).is_err());
        assert!(parse(&["--rate", "-1"]).is_err());
        assert!(parse(&["--depth", "1.5"]).is_err());
        assert!(parse(&["--wet", "-0.1"]).is_err());
        assert!(parse(&["--stereophase", "181"]).is_err());
        assert!(parse(&["--depth", "NaN"]).is_err());
        assert!(parse(&["--rate", "fast"]).is_err());
    }
}
