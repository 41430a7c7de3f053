mod config;
mod easing;
mod engine;
mod phase;

pub(crate) use config::{CycleConfig, CycleError, PhaseJitter, TimingVariation};
pub(crate) use easing::Easing;
pub(crate) use engine::{BreathCycleEngine, Sample, Step};
pub(crate) use phase::Phase;
