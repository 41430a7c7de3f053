use super::easing::{Easing, exact_frame_count};
use super::phase::Phase;
use serde::Deserialize;

/// The immutable timing parameters of a breathing cycle.
///
/// Durations are expressed in seconds and the frame rate in Hz. Use [CycleConfig::new] to build
/// one so that invalid values are rejected before an engine ever sees them.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct CycleConfig {
    inhale: f64,
    post_inhale_hold: f64,
    exhale: f64,
    post_exhale_hold: f64,
    frame_rate: f64,
    easing: Easing,
    variation: TimingVariation,
}

/// Cycle-over-cycle changes applied to every phase duration.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct TimingVariation {
    /// Every duration is multiplied by `drift ^ cycle_index`.
    pub(crate) drift: f64,

    /// Maximum random offset, in seconds, added to each phase.
    pub(crate) jitter: PhaseJitter,

    /// Seed for the jitter generator.
    pub(crate) seed: Option<u64>,
}

impl Default for TimingVariation {
    fn default() -> Self {
        Self { drift: 1.0, jitter: PhaseJitter::default(), seed: None }
    }
}

impl TimingVariation {
    pub(crate) fn is_identity(&self) -> bool {
        self.drift == 1.0 && self.jitter.is_zero()
    }
}

/// Maximum random offset, in seconds, for each phase of the cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub(crate) struct PhaseJitter {
    pub(crate) inhale: f64,
    pub(crate) post_inhale_hold: f64,
    pub(crate) exhale: f64,
    pub(crate) post_exhale_hold: f64,
}

impl PhaseJitter {
    /// The same offset for every phase.
    pub(crate) fn uniform(amount: f64) -> Self {
        Self { inhale: amount, post_inhale_hold: amount, exhale: amount, post_exhale_hold: amount }
    }

    pub(crate) fn for_phase(&self, phase: Phase) -> f64 {
        match phase {
            Phase::Inhale => self.inhale,
            Phase::PostInhaleHold => self.post_inhale_hold,
            Phase::Exhale => self.exhale,
            Phase::PostExhaleHold => self.post_exhale_hold,
        }
    }

    fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

impl CycleConfig {
    pub(crate) fn new(
        inhale: f64,
        post_inhale_hold: f64,
        exhale: f64,
        post_exhale_hold: f64,
        frame_rate: f64,
    ) -> Result<Self, CycleError> {
        ensure_positive("inhale", inhale)?;
        ensure_non_negative("post inhale hold", post_inhale_hold)?;
        ensure_positive("exhale", exhale)?;
        ensure_non_negative("post exhale hold", post_exhale_hold)?;
        ensure_positive("frame rate", frame_rate)?;
        ensure_frame_count("inhale", inhale, frame_rate)?;
        ensure_frame_count("exhale", exhale, frame_rate)?;
        Ok(Self {
            inhale,
            post_inhale_hold,
            exhale,
            post_exhale_hold,
            frame_rate,
            easing: Easing::default(),
            variation: TimingVariation::default(),
        })
    }

    pub(crate) fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub(crate) fn with_variation(mut self, variation: TimingVariation) -> Result<Self, CycleError> {
        ensure_positive("drift", variation.drift)?;
        let jitter = variation.jitter;
        ensure_non_negative("inhale jitter", jitter.inhale)?;
        ensure_non_negative("post inhale hold jitter", jitter.post_inhale_hold)?;
        ensure_non_negative("exhale jitter", jitter.exhale)?;
        ensure_non_negative("post exhale hold jitter", jitter.post_exhale_hold)?;
        self.variation = variation;
        Ok(self)
    }

    pub(crate) fn inhale(&self) -> f64 {
        self.inhale
    }

    pub(crate) fn post_inhale_hold(&self) -> f64 {
        self.post_inhale_hold
    }

    pub(crate) fn exhale(&self) -> f64 {
        self.exhale
    }

    pub(crate) fn post_exhale_hold(&self) -> f64 {
        self.post_exhale_hold
    }

    pub(crate) fn frame_rate(&self) -> f64 {
        self.frame_rate
    }

    pub(crate) fn easing(&self) -> Easing {
        self.easing
    }

    pub(crate) fn variation(&self) -> &TimingVariation {
        &self.variation
    }
}

fn ensure_positive(field: &'static str, value: f64) -> Result<(), CycleError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CycleError::InvalidConfiguration { field, value, reason: "must be greater than zero" });
    }
    Ok(())
}

fn ensure_non_negative(field: &'static str, value: f64) -> Result<(), CycleError> {
    if !value.is_finite() || value < 0.0 {
        return Err(CycleError::InvalidConfiguration { field, value, reason: "must not be negative" });
    }
    Ok(())
}

fn ensure_frame_count(field: &'static str, duration: f64, frame_rate: f64) -> Result<(), CycleError> {
    if exact_frame_count(duration, frame_rate).is_none() {
        return Err(CycleError::InvalidConfiguration {
            field,
            value: duration,
            reason: "does not span a representable number of frames at this frame rate",
        });
    }
    Ok(())
}

/// Errors raised while building a cycle configuration.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum CycleError {
    #[error("invalid configuration: {field} {reason} (got {value})")]
    InvalidConfiguration { field: &'static str, value: f64, reason: &'static str },
}
