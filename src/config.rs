use crate::cycle::{CycleConfig, CycleError, Easing, PhaseJitter, TimingVariation};
use crate::render::{Color, FillStyle, Palette, ShapeStyle};
use directories::ProjectDirs;
use log::debug;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// The contents of a configuration file.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Config {
    #[serde(default)]
    pub(crate) breathing: BreathingConfig,

    #[serde(default)]
    pub(crate) display: DisplayConfig,
}

impl Config {
    /// Load a configuration file.
    pub(crate) fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            fs::read_to_string(path).map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(&contents)?)
    }

    /// Load the configuration file in the user's config directory, if there's one.
    pub(crate) fn load_default() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            Some(path) => {
                debug!("no configuration file at {}, using defaults", path.display());
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    pub(crate) fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "exhale").map(|dirs| dirs.config_dir().join("config.yaml"))
    }
}

/// Timing of the breathing cycle. Durations are in seconds.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub(crate) struct BreathingConfig {
    pub(crate) inhale: f64,
    pub(crate) post_inhale_hold: f64,
    pub(crate) exhale: f64,
    pub(crate) post_exhale_hold: f64,

    /// Frames per second.
    pub(crate) frame_rate: f64,
    pub(crate) easing: Easing,

    /// Factor applied to every duration after each cycle.
    pub(crate) drift: f64,

    /// Maximum random change applied to each phase, in seconds.
    pub(crate) jitter: PhaseJitter,
    pub(crate) seed: Option<u64>,
}

impl Default for BreathingConfig {
    fn default() -> Self {
        Self {
            inhale: 5.0,
            post_inhale_hold: 0.0,
            exhale: 10.0,
            post_exhale_hold: 0.0,
            frame_rate: 30.0,
            easing: Easing::default(),
            drift: 1.0,
            jitter: PhaseJitter::default(),
            seed: None,
        }
    }
}

impl BreathingConfig {
    pub(crate) fn cycle_config(&self) -> Result<CycleConfig, CycleError> {
        let variation = TimingVariation { drift: self.drift, jitter: self.jitter, seed: self.seed };
        CycleConfig::new(self.inhale, self.post_inhale_hold, self.exhale, self.post_exhale_hold, self.frame_rate)?
            .with_easing(self.easing)
            .with_variation(variation)
    }
}

/// How the breathing cycle is drawn.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub(crate) struct DisplayConfig {
    pub(crate) shape: ShapeStyle,

    /// Width of each side bar, in columns.
    pub(crate) side_width: u16,
    pub(crate) inhale_color: Color,
    pub(crate) exhale_color: Color,
    pub(crate) backdrop: Option<Color>,
    pub(crate) opacity: f64,
    pub(crate) fill: FillStyle,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        let palette = Palette::default();
        Self {
            shape: ShapeStyle::default(),
            side_width: 2,
            inhale_color: palette.inhale,
            exhale_color: palette.exhale,
            backdrop: palette.backdrop,
            opacity: palette.opacity,
            fill: palette.fill,
        }
    }
}

impl DisplayConfig {
    pub(crate) fn palette(&self) -> Result<Palette, ConfigError> {
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(ConfigError::InvalidOpacity(self.opacity));
        }
        Ok(Palette {
            inhale: self.inhale_color,
            exhale: self.exhale_color,
            backdrop: self.backdrop,
            opacity: self.opacity,
            fill: self.fill,
        })
    }

    pub(crate) fn side_width(&self) -> Result<u16, ConfigError> {
        match self.side_width {
            0 => Err(ConfigError::InvalidSideWidth),
            width => Ok(width),
        }
    }
}

/// Errors that can occur while loading a configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("reading {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },

    #[error("invalid configuration file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("opacity must be between 0 and 1 (got {0})")]
    InvalidOpacity(f64),

    #[error("side width must be at least one column")]
    InvalidSideWidth,

    #[error(transparent)]
    Cycle(#[from] CycleError),
}
