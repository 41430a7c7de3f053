mod config;
mod cycle;
mod pacer;
mod prompt;
mod render;
mod terminal;

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::info;
use std::io;
use std::path::PathBuf;

use crate::config::Config;
use crate::cycle::{BreathCycleEngine, Easing, PhaseJitter};
use crate::pacer::Pacer;
use crate::prompt::prompt_durations;
use crate::render::{Color, FillStyle, ShapeStyle, get_shape};
use crate::terminal::{KeyboardWaiter, TerminalSurface};

/// Pace your breathing with a shape that grows while you inhale and shrinks while you exhale.
///
/// Press `r` to restart the cycle, `q` or `Esc` to quit.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// The configuration file to use instead of the default one.
    #[arg(short, long, env = "EXHALE_CONFIG")]
    config: Option<PathBuf>,

    /// Ask for the phase durations before starting.
    #[arg(short, long)]
    prompt: bool,

    /// Inhale duration in seconds.
    #[arg(short, long, env = "EXHALE_INHALE")]
    inhale: Option<f64>,

    /// Hold after inhaling, in seconds.
    #[arg(long, env = "EXHALE_POST_INHALE_HOLD")]
    post_inhale_hold: Option<f64>,

    /// Exhale duration in seconds.
    #[arg(short, long, env = "EXHALE_EXHALE")]
    exhale: Option<f64>,

    /// Hold after exhaling, in seconds.
    #[arg(long, env = "EXHALE_POST_EXHALE_HOLD")]
    post_exhale_hold: Option<f64>,

    /// Frames drawn per second.
    #[arg(short, long, env = "EXHALE_FRAME_RATE")]
    frame_rate: Option<f64>,

    /// How progress through a phase is eased.
    #[arg(long, env = "EXHALE_EASING")]
    easing: Option<Easing>,

    /// Factor applied to every duration after each cycle.
    #[arg(long, env = "EXHALE_DRIFT")]
    drift: Option<f64>,

    /// Maximum random change applied to every phase, in seconds.
    #[arg(long, env = "EXHALE_JITTER")]
    jitter: Option<f64>,

    /// Maximum random change applied to the inhale, in seconds. Takes precedence over --jitter.
    #[arg(long, env = "EXHALE_INHALE_JITTER")]
    inhale_jitter: Option<f64>,

    /// Maximum random change applied to the hold after inhaling, in seconds.
    #[arg(long, env = "EXHALE_POST_INHALE_HOLD_JITTER")]
    post_inhale_hold_jitter: Option<f64>,

    /// Maximum random change applied to the exhale, in seconds.
    #[arg(long, env = "EXHALE_EXHALE_JITTER")]
    exhale_jitter: Option<f64>,

    /// Maximum random change applied to the hold after exhaling, in seconds.
    #[arg(long, env = "EXHALE_POST_EXHALE_HOLD_JITTER")]
    post_exhale_hold_jitter: Option<f64>,

    /// Seed for the random timing changes.
    #[arg(long, env = "EXHALE_SEED")]
    seed: Option<u64>,

    /// The shape to draw.
    #[arg(short, long, env = "EXHALE_SHAPE")]
    shape: Option<ShapeStyle>,

    /// Width of each side bar, in columns.
    #[arg(long, env = "EXHALE_SIDE_WIDTH")]
    side_width: Option<u16>,

    /// Color used while inhaling, as #rrggbb.
    #[arg(long, env = "EXHALE_INHALE_COLOR", value_parser = Color::from_hex)]
    inhale_color: Option<Color>,

    /// Color used while exhaling, as #rrggbb.
    #[arg(long, env = "EXHALE_EXHALE_COLOR", value_parser = Color::from_hex)]
    exhale_color: Option<Color>,

    /// Color painted behind the shape. Defaults to the terminal's background.
    #[arg(long, env = "EXHALE_BACKDROP", value_parser = Color::from_hex)]
    backdrop: Option<Color>,

    /// Opacity of the shape, between 0 and 1.
    #[arg(long, env = "EXHALE_OPACITY")]
    opacity: Option<f64>,

    /// How the shape is filled.
    #[arg(long, env = "EXHALE_FILL")]
    fill: Option<FillStyle>,

    /// Stop after this many cycles.
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    cycles: Option<u64>,
}

impl Cli {
    fn apply(&self, config: &mut Config) {
        let breathing = &mut config.breathing;
        override_with(&mut breathing.inhale, self.inhale);
        override_with(&mut breathing.post_inhale_hold, self.post_inhale_hold);
        override_with(&mut breathing.exhale, self.exhale);
        override_with(&mut breathing.post_exhale_hold, self.post_exhale_hold);
        override_with(&mut breathing.frame_rate, self.frame_rate);
        override_with(&mut breathing.easing, self.easing);
        override_with(&mut breathing.drift, self.drift);
        override_with(&mut breathing.jitter, self.jitter.map(PhaseJitter::uniform));
        let jitter = &mut breathing.jitter;
        override_with(&mut jitter.inhale, self.inhale_jitter);
        override_with(&mut jitter.post_inhale_hold, self.post_inhale_hold_jitter);
        override_with(&mut jitter.exhale, self.exhale_jitter);
        override_with(&mut jitter.post_exhale_hold, self.post_exhale_hold_jitter);
        if self.seed.is_some() {
            breathing.seed = self.seed;
        }

        let display = &mut config.display;
        override_with(&mut display.shape, self.shape);
        override_with(&mut display.side_width, self.side_width);
        override_with(&mut display.inhale_color, self.inhale_color);
        override_with(&mut display.exhale_color, self.exhale_color);
        override_with(&mut display.opacity, self.opacity);
        override_with(&mut display.fill, self.fill);
        if self.backdrop.is_some() {
            display.backdrop = self.backdrop;
        }
    }
}

fn override_with<T>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_default()?,
    };
    cli.apply(&mut config);
    if cli.prompt {
        prompt_durations(&mut io::stdin().lock(), &mut io::stdout(), &mut config.breathing)?;
    }
    Ok(config)
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(&cli)?;
    let cycle = config.breathing.cycle_config()?;
    let palette = config.display.palette()?;
    let shape = get_shape(config.display.shape, config.display.side_width()?);

    info!(
        "breathing in {}s, holding {}s, out {}s, holding {}s at {} fps",
        cycle.inhale(),
        cycle.post_inhale_hold(),
        cycle.exhale(),
        cycle.post_exhale_hold(),
        cycle.frame_rate()
    );
    info!("drawing {} from {} to {}", config.display.shape, palette.inhale, palette.exhale);

    let mut engine = BreathCycleEngine::new(cycle);
    let summary = {
        let mut surface = TerminalSurface::open(shape, palette).context("opening terminal")?;
        Pacer::new(cli.cycles).run(&mut engine, &mut surface, &mut KeyboardWaiter)?
    };
    info!(
        "drew {} frames and {} holds over {} cycles at {} fps",
        summary.frames,
        summary.holds,
        summary.cycles,
        engine.config().frame_rate()
    );
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error running exhale: {e:#}");
        std::process::exit(1);
    }
}
