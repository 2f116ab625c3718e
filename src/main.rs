mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use cli::Cli;
use smart_tremolo::audio::decode::read_wav;
use smart_tremolo::audio::testpad::make_test_pad;
use smart_tremolo::config::{self, Config, ControllerKind};
use smart_tremolo::control::{Controller, FeatureFollower, NoOpController};
use smart_tremolo::dsp::LfoShape;
use smart_tremolo::encode::wav::write_wav;
use smart_tremolo::stream::DemoRamp;
use smart_tremolo::{tempo, ModTargets, StreamOptions, StreamProcessor, Tremolo};

const TEST_PAD_SECONDS: f32 = 10.0;
const TEST_PAD_RATE: u32 = 44_100;
const PROGRESS_TEMPLATE: &str =
    "[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} frames ({eta} remaining)";

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let mut cli = Cli::parse();

    let cfg = match config::find_config(cli.config.as_deref()) {
        Some(path) => match config::load_config(&path) {
            Ok(cfg) => {
                log::info!("Loaded config from {}", path.display());
                cfg
            }
            Err(err) => {
                log::warn!("{:#}", err);
                Config::default()
            }
        },
        None => Config::default(),
    };
    merge_config(&mut cli, &cfg);

    if !cli.input.exists() {
        log::info!(
            "Input file not found: {} -> generating a test pad",
            cli.input.display()
        );
        let pad = make_test_pad(TEST_PAD_SECONDS, TEST_PAD_RATE);
        write_wav(&cli.input, &pad).with_context(|| {
            format!("Failed to write generated input to {}", cli.input.display())
        })?;
    }

    let mut audio = read_wav(&cli.input)
        .with_context(|| format!("Failed to read input WAV {}", cli.input.display()))?;

    if !LfoShape::is_known(&cli.shape) {
        log::warn!("Unknown shape {:?}, using sine", cli.shape);
    }
    let shape = LfoShape::from_name(&cli.shape);

    let mut rate = cli.rate;
    if let Some(ref sync) = cli.rate_sync {
        match tempo::rate_from_sync(sync) {
            Ok(hz) => {
                log::info!("rate-sync: {} -> rate={:.3} Hz", sync, hz);
                rate = hz;
            }
            Err(err) => log::warn!("Ignoring --rate-sync: {}", err),
        }
    }

    log::info!("smart-tremolo");
    log::info!("Input: {}", cli.input.display());
    log::info!("Output: {}", cli.output.display());
    log::info!(
        "Audio: {}Hz, {} ch, {:.2}s",
        audio.sample_rate,
        audio.channels.count(),
        audio.duration_secs()
    );
    log::info!(
        "Params: rate={:.3} depth={} shape={} stereophase={} wet={} controller={:?}",
        rate,
        cli.depth,
        shape,
        cli.stereophase,
        cli.wet,
        cli.controller
    );

    let mut engine = Tremolo::new(audio.sample_rate as f64);
    engine.set_smoothing_time(cfg.tremolo.smoothing_ms.max(0.0) / 1000.0);
    engine.set_rate_hz(rate);
    engine.set_depth(cli.depth);
    engine.set_wet(cli.wet);
    engine.set_stereo_phase_deg(cli.stereophase);
    engine.set_shape(shape);
    engine.snap_to_targets();

    let controller: Box<dyn Controller> = match cli.controller {
        ControllerKind::None => Box::new(NoOpController),
        ControllerKind::Follow => Box::new(FeatureFollower {
            depth_floor: cfg.controller.depth_floor,
            depth_gain: cfg.controller.depth_gain,
            rate_zcr_gain: cfg.controller.rate_zcr_gain,
        }),
    };

    let base = ModTargets {
        rate_hz: rate,
        depth: cli.depth,
    };
    let options = StreamOptions {
        base,
        demo: cli.demo.then(|| DemoRamp::new(cli.depth)),
        analyze: cli.analyze,
    };

    let pb = if cli.no_progress {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(audio.frames() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(PROGRESS_TEMPLATE)
                .unwrap()
                .progress_chars("=>-"),
        );
        pb
    };

    let mut stream = StreamProcessor::new(engine, controller, options);
    let report = stream.run(&mut audio, &pb);
    pb.finish_with_message("Processing complete");

    log::info!(
        "Processed {} frames ({:.2}s), {} feature windows",
        report.frames,
        report.elapsed_secs,
        report.windows
    );

    write_wav(&cli.output, &audio)
        .with_context(|| format!("Failed to write output WAV {}", cli.output.display()))?;

    log::info!(
        "Done! Output: {} (stereo phase offset {} deg)",
        cli.output.display(),
        cli.stereophase
    );
    Ok(())
}

/// Config values apply only where the CLI is still at its default.
fn merge_config(cli: &mut Cli, cfg: &Config) {
    let t = &cfg.tremolo;
    if cli.rate == config::default_rate() {
        apply_checked(&mut cli.rate, t.rate, "tremolo.rate", cli::check_rate);
    }
    if cli.depth == config::default_depth() {
        apply_checked(&mut cli.depth, t.depth, "tremolo.depth", cli::check_unit);
    }
    if cli.wet == config::default_wet() {
        apply_checked(&mut cli.wet, t.wet, "tremolo.wet", cli::check_unit);
    }
    if cli.stereophase == 0.0 {
        apply_checked(
            &mut cli.stereophase,
            t.stereo_phase,
            "tremolo.stereo_phase",
            cli::check_stereo_phase,
        );
    }
    if cli.shape == config::default_shape() {
        cli.shape = t.shape.clone();
    }
    if cli.controller == ControllerKind::None {
        cli.controller = cfg.controller.kind;
    }
}

fn apply_checked(slot: &mut f32, value: f32, name: &str, check: fn(f32) -> Result<f32, String>) {
    match check(value) {
        Ok(v) => *slot = v,
        Err(err) => log::warn!("Ignoring config {}: {}", name, err),
    }
}
