use super::config::CycleConfig;
use super::easing::{angular_increment, frame_count};
use super::phase::Phase;
use log::{debug, trace};
use std::time::Duration;

/// Shortest an inhale or exhale can become once drift and jitter are applied.
const MINIMUM_ACTIVE_DURATION: f64 = 0.1;

/// The eased position within an inhale or exhale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Sample {
    pub(crate) phase: Phase,

    /// 0 at the start of the phase, rising towards (but never reaching) 1.
    pub(crate) progress: f64,
}

/// A single item of the breathing sequence.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Step {
    /// Render this sample, then wait `interval` before pulling the next step.
    Frame { sample: Sample, interval: Duration },

    /// Keep whatever is on screen for `duration`.
    Hold { phase: Phase, duration: Duration },
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct PhaseBudget {
    duration: f64,
    frames: u32,
}

/// Produces an infinite, restartable sequence of [Step]s for a breathing cycle.
///
/// The engine always sits on the phase and frame that the next call to [Iterator::next] will
/// emit: once the last frame of a phase has been handed out the engine moves on immediately,
/// so after a full cycle its state is `(Inhale, 0)` again.
pub(crate) struct BreathCycleEngine {
    config: CycleConfig,
    rng: fastrand::Rng,
    phase: Phase,
    frame: u32,
    budget: PhaseBudget,
    cycles: u64,
}

impl BreathCycleEngine {
    pub(crate) fn new(config: CycleConfig) -> Self {
        let rng = Self::build_rng(&config);
        let budget = PhaseBudget { duration: 0.0, frames: 0 };
        let mut engine = Self { config, rng, phase: Phase::Inhale, frame: 0, budget, cycles: 0 };
        let duration = engine.phase_duration(Phase::Inhale);
        engine.enter(Phase::Inhale, duration);
        engine
    }

    /// Number of frames emitted for a phase lasting `duration` seconds.
    pub(crate) fn frame_count(&self, duration: f64) -> u32 {
        frame_count(duration, self.config.frame_rate())
    }

    /// Quarter sine step used to ease a phase of `frames` frames.
    pub(crate) fn angular_increment(&self, frames: u32) -> f64 {
        angular_increment(frames)
    }

    pub(crate) fn config(&self) -> &CycleConfig {
        &self.config
    }

    pub(crate) fn phase(&self) -> Phase {
        self.phase
    }

    /// Index of the next frame within the current phase.
    pub(crate) fn frame_index(&self) -> u32 {
        self.frame
    }

    /// Total frames in the current phase, 0 for holds.
    pub(crate) fn frames_in_phase(&self) -> u32 {
        self.budget.frames
    }

    pub(crate) fn cycles_completed(&self) -> u64 {
        self.cycles
    }

    /// Go back to the first frame of the first inhale.
    pub(crate) fn reset(&mut self) {
        self.rng = Self::build_rng(&self.config);
        self.cycles = 0;
        let duration = self.phase_duration(Phase::Inhale);
        self.enter(Phase::Inhale, duration);
    }

    fn build_rng(config: &CycleConfig) -> fastrand::Rng {
        match config.variation().seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        }
    }

    fn base_duration(&self, phase: Phase) -> f64 {
        match phase {
            Phase::Inhale => self.config.inhale(),
            Phase::PostInhaleHold => self.config.post_inhale_hold(),
            Phase::Exhale => self.config.exhale(),
            Phase::PostExhaleHold => self.config.post_exhale_hold(),
        }
    }

    fn phase_duration(&mut self, phase: Phase) -> f64 {
        let base = self.base_duration(phase);
        let variation = self.config.variation();
        if variation.is_identity() || base == 0.0 {
            return base;
        }
        let (drift, jitter) = (variation.drift, variation.jitter.for_phase(phase));
        let mut duration = base * drift.powf(self.cycles as f64);
        if jitter > 0.0 {
            duration += (self.rng.f64() * 2.0 - 1.0) * jitter;
        }
        if phase.is_hold() { duration.max(0.0) } else { duration.max(MINIMUM_ACTIVE_DURATION) }
    }

    fn enter(&mut self, phase: Phase, duration: f64) {
        let frames = if phase.is_hold() { 0 } else { self.frame_count(duration) };
        if frames == 0 {
            debug!("entering {phase} phase for {duration:.3}s (cycle {})", self.cycles);
        } else {
            debug!(
                "entering {phase} phase for {duration:.3}s ({frames} frames, {:.5} rad per frame, cycle {})",
                self.angular_increment(frames),
                self.cycles
            );
        }
        self.phase = phase;
        self.frame = 0;
        self.budget = PhaseBudget { duration, frames };
    }

    fn advance(&mut self) {
        let mut phase = self.phase.next();
        loop {
            if phase == Phase::Inhale {
                self.cycles += 1;
            }
            let duration = self.phase_duration(phase);
            if phase.is_hold() && duration == 0.0 {
                phase = phase.next();
                continue;
            }
            self.enter(phase, duration);
            return;
        }
    }
}

impl Iterator for BreathCycleEngine {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        let step = if self.phase.is_hold() {
            Step::Hold { phase: self.phase, duration: seconds(self.budget.duration) }
        } else {
            let PhaseBudget { duration, frames } = self.budget;
            let progress = self.config.easing().progress(self.frame, frames);
            trace!("{} frame {}/{frames}: {progress:.5}", self.phase, self.frame);
            self.frame += 1;
            Step::Frame { sample: Sample { phase: self.phase, progress }, interval: seconds(duration / frames as f64) }
        };
        if self.phase.is_hold() || self.frame >= self.budget.frames {
            self.advance();
        }
        Some(step)
    }
}

fn seconds(value: f64) -> Duration {
    Duration::try_from_secs_f64(value).unwrap_or(Duration::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cycle::{Easing, PhaseJitter, TimingVariation};
    use rstest::rstest;

    fn engine(inhale: f64, post_inhale_hold: f64, exhale: f64, post_exhale_hold: f64, rate: f64) -> BreathCycleEngine {
        let config =
            CycleConfig::new(inhale, post_inhale_hold, exhale, post_exhale_hold, rate).expect("invalid config");
        BreathCycleEngine::new(config)
    }

    fn frame(step: Step) -> Sample {
        match step {
            Step::Frame { sample, .. } => sample,
            Step::Hold { .. } => panic!("expected a frame, got {step:?}"),
        }
    }

    #[test]
    fn four_eight_at_thirty_hertz() {
        let mut engine = engine(4.0, 0.0, 8.0, 0.0, 30.0);
        assert_eq!(engine.frame_count(4.0), 120);
        assert_eq!(engine.frame_count(8.0), 240);
        assert!((engine.angular_increment(120) - 0.01309).abs() < 1e-5);
        assert_eq!(engine.frames_in_phase(), 120);

        let first: Vec<_> = engine.by_ref().take(3).map(frame).collect();
        assert!(first.iter().all(|s| s.phase == Phase::Inhale));
        assert_eq!(first[0].progress, 0.0);
        assert!((first[1].progress - 0.01309).abs() < 1e-5);
        assert!((first[2].progress - 0.02618).abs() < 1e-5);
        assert_eq!(engine.frame_index(), 3);
    }

    #[test]
    fn exhale_follows_inhale() {
        let mut engine = engine(4.0, 0.0, 8.0, 0.0, 30.0);
        let samples: Vec<_> = engine.by_ref().take(121).map(frame).collect();
        assert!(samples[..120].iter().all(|s| s.phase == Phase::Inhale));
        assert!(samples[119].progress < 1.0);
        assert_eq!(samples[120], Sample { phase: Phase::Exhale, progress: 0.0 });
        assert_eq!(engine.frames_in_phase(), 240);
    }

    #[test]
    fn single_frame_phase_never_advances() {
        let mut engine = engine(1.0, 0.0, 1.0, 0.0, 1.0);
        let inhale = frame(engine.next().unwrap());
        let exhale = frame(engine.next().unwrap());
        assert_eq!(inhale, Sample { phase: Phase::Inhale, progress: 0.0 });
        assert_eq!(exhale, Sample { phase: Phase::Exhale, progress: 0.0 });
        assert_eq!((engine.phase(), engine.frame_index()), (Phase::Inhale, 0));
    }

    #[test]
    fn frame_interval() {
        let mut engine = engine(4.0, 0.0, 8.0, 0.0, 30.0);
        let Some(Step::Frame { interval, .. }) = engine.next() else {
            panic!("expected a frame");
        };
        assert_eq!(interval, Duration::from_secs_f64(4.0 / 120.0));
    }

    #[test]
    fn post_inhale_hold_is_a_single_pause() {
        let mut engine = engine(1.0, 2.0, 1.0, 0.0, 10.0);
        let steps: Vec<_> = engine.by_ref().take(12).collect();
        assert!(steps[..10].iter().all(|s| matches!(s, Step::Frame { sample, .. } if sample.phase == Phase::Inhale)));
        assert_eq!(steps[10], Step::Hold { phase: Phase::PostInhaleHold, duration: Duration::from_secs(2) });
        assert_eq!(frame(steps[11]), Sample { phase: Phase::Exhale, progress: 0.0 });
    }

    #[test]
    fn post_exhale_hold_precedes_next_inhale() {
        let mut engine = engine(0.1, 0.0, 0.1, 1.5, 10.0);
        let steps: Vec<_> = engine.by_ref().take(3).collect();
        assert!(matches!(steps[0], Step::Frame { sample, .. } if sample.phase == Phase::Inhale));
        assert!(matches!(steps[1], Step::Frame { sample, .. } if sample.phase == Phase::Exhale));
        assert_eq!(steps[2], Step::Hold { phase: Phase::PostExhaleHold, duration: Duration::from_secs_f64(1.5) });
        assert_eq!((engine.phase(), engine.frame_index(), engine.cycles_completed()), (Phase::Inhale, 0, 1));
    }

    #[test]
    fn zero_holds_are_skipped() {
        let engine = engine(1.0, 0.0, 1.0, 0.0, 30.0);
        assert!(engine.take(600).all(|step| matches!(step, Step::Frame { .. })));
    }

    #[rstest]
    #[case::no_holds(4.0, 0.0, 8.0, 0.0, 30.0, 360)]
    #[case::both_holds(4.0, 1.0, 8.0, 2.0, 30.0, 362)]
    #[case::inhale_hold(1.0, 3.0, 2.0, 0.0, 1.0, 4)]
    #[case::fractional(0.5, 0.0, 0.75, 0.0, 7.0, 10)]
    fn cycle_is_restartable(
        #[case] inhale: f64,
        #[case] post_inhale_hold: f64,
        #[case] exhale: f64,
        #[case] post_exhale_hold: f64,
        #[case] rate: f64,
        #[case] steps_per_cycle: usize,
    ) {
        let mut engine = engine(inhale, post_inhale_hold, exhale, post_exhale_hold, rate);
        let first: Vec<_> = engine.by_ref().take(steps_per_cycle).collect();
        assert_eq!((engine.phase(), engine.frame_index(), engine.cycles_completed()), (Phase::Inhale, 0, 1));

        let second: Vec<_> = engine.by_ref().take(steps_per_cycle).collect();
        assert_eq!(first, second);
        assert_eq!(engine.cycles_completed(), 2);
    }

    #[test]
    fn identical_configs_produce_identical_sequences() {
        let left: Vec<_> = engine(3.0, 1.0, 5.0, 0.5, 24.0).take(1000).collect();
        let right: Vec<_> = engine(3.0, 1.0, 5.0, 0.5, 24.0).take(1000).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn reset_restarts_sequence() {
        let mut engine = engine(2.0, 1.0, 3.0, 0.0, 30.0);
        let first: Vec<_> = engine.by_ref().take(50).collect();
        engine.by_ref().take(77).for_each(drop);
        engine.reset();
        assert_eq!((engine.phase(), engine.frame_index(), engine.cycles_completed()), (Phase::Inhale, 0, 0));
        let again: Vec<_> = engine.take(50).collect();
        assert_eq!(first, again);
    }

    #[test]
    fn linear_easing() {
        let config = CycleConfig::new(1.0, 0.0, 1.0, 0.0, 4.0).unwrap().with_easing(Easing::Linear);
        let progress: Vec<_> = BreathCycleEngine::new(config).take(4).map(|s| frame(s).progress).collect();
        assert_eq!(progress, &[0.0, 0.25, 0.5, 0.75]);
    }

    #[test]
    fn drift_stretches_later_cycles() {
        let variation = TimingVariation { drift: 2.0, ..Default::default() };
        let config = CycleConfig::new(1.0, 0.0, 1.0, 0.0, 10.0).unwrap().with_variation(variation).unwrap();
        let mut engine = BreathCycleEngine::new(config);
        assert_eq!(engine.frames_in_phase(), 10);
        engine.by_ref().take(20).for_each(drop);
        assert_eq!(engine.cycles_completed(), 1);
        assert_eq!(engine.frames_in_phase(), 20);
    }

    #[test]
    fn seeded_jitter_is_reproducible() {
        let build = || {
            let variation = TimingVariation { drift: 1.0, jitter: PhaseJitter::uniform(0.5), seed: Some(42) };
            let config = CycleConfig::new(2.0, 1.0, 3.0, 1.0, 30.0).unwrap().with_variation(variation).unwrap();
            BreathCycleEngine::new(config)
        };
        let left: Vec<_> = build().take(2000).collect();
        let right: Vec<_> = build().take(2000).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn jitter_keeps_active_phases_positive() {
        let variation = TimingVariation { drift: 1.0, jitter: PhaseJitter::uniform(5.0), seed: Some(7) };
        let config = CycleConfig::new(0.2, 0.0, 0.2, 0.0, 30.0).unwrap().with_variation(variation).unwrap();
        let mut engine = BreathCycleEngine::new(config);
        for _ in 0..500 {
            assert!(engine.phase().is_hold() || engine.frames_in_phase() >= 3);
            engine.next();
        }
    }

    #[test]
    fn jitter_only_touches_its_phase() {
        let jitter = PhaseJitter { exhale: 0.5, ..Default::default() };
        let variation = TimingVariation { drift: 1.0, jitter, seed: Some(11) };
        let config = CycleConfig::new(1.0, 0.0, 1.0, 0.0, 30.0).unwrap().with_variation(variation).unwrap();
        let mut engine = BreathCycleEngine::new(config);
        for _ in 0..20 {
            assert_eq!((engine.phase(), engine.frames_in_phase()), (Phase::Inhale, 30));
            engine.by_ref().take(30).for_each(drop);
            assert_eq!(engine.phase(), Phase::Exhale);
            let frames = engine.frames_in_phase();
            assert!((15..=45).contains(&frames), "{frames} exhale frames");
            engine.by_ref().take(frames as usize).for_each(drop);
        }
    }
}
