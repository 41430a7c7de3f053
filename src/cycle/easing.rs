use serde::Deserialize;
use std::f64::consts::FRAC_PI_2;

/// Number of frames emitted for a phase lasting `duration` seconds.
///
/// Always at least one. Products too large for a `u32` saturate at `u32::MAX`; use
/// [exact_frame_count] to reject them instead.
pub(crate) fn frame_count(duration: f64, frame_rate: f64) -> u32 {
    ((duration * frame_rate).ceil() as u32).max(1)
}

/// `ceil(duration * frame_rate)`, if that is a frame count between 1 and `u32::MAX`.
pub(crate) fn exact_frame_count(duration: f64, frame_rate: f64) -> Option<u32> {
    let frames = (duration * frame_rate).ceil();
    (frames >= 1.0 && frames <= f64::from(u32::MAX)).then_some(frames as u32)
}

/// Step, in radians, that samples a quarter sine wave over `frames` samples.
pub(crate) fn angular_increment(frames: u32) -> f64 {
    FRAC_PI_2 / frames as f64
}

/// How a frame index within a phase maps to progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub(crate) enum Easing {
    /// `sin(increment * i)`: fast at the start of a phase, settling towards its end.
    #[default]
    Sinusoidal,

    /// `i / frames`.
    Linear,
}

impl Easing {
    /// Progress at frame `index` of a phase spanning `frames` frames.
    ///
    /// Neither curve reaches 1: the last sample sits at `frames - 1`.
    pub(crate) fn progress(self, index: u32, frames: u32) -> f64 {
        match self {
            Self::Sinusoidal => (angular_increment(frames) * index as f64).sin(),
            Self::Linear => index as f64 / frames as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(4.0, 30.0, 120)]
    #[case(8.0, 30.0, 240)]
    #[case(1.0, 1.0, 1)]
    #[case(0.01, 30.0, 1)]
    #[case(2.5, 60.0, 150)]
    #[case(1.05, 10.0, 11)]
    fn frames_per_phase(#[case] duration: f64, #[case] frame_rate: f64, #[case] expected: u32) {
        let frames = frame_count(duration, frame_rate);
        assert_eq!(frames, expected);
        assert_eq!(frames as f64, (duration * frame_rate).ceil());
    }

    #[rstest]
    #[case(1e-9, 1.0)]
    #[case(1e-200, 1e-200)]
    #[case(f64::MIN_POSITIVE, 0.5)]
    fn tiny_durations_still_get_a_frame(#[case] duration: f64, #[case] frame_rate: f64) {
        assert_eq!(frame_count(duration, frame_rate), 1);
    }

    #[test]
    fn huge_products_saturate() {
        assert_eq!(frame_count(1e6, 1e4), u32::MAX);
    }

    #[rstest]
    #[case(4.0, 30.0, Some(120))]
    #[case(0.01, 30.0, Some(1))]
    #[case(1e-200, 1e-200, None)]
    #[case(1e6, 1e4, None)]
    #[case(f64::MAX, 2.0, None)]
    fn exact_frames(#[case] duration: f64, #[case] frame_rate: f64, #[case] expected: Option<u32>) {
        assert_eq!(exact_frame_count(duration, frame_rate), expected);
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(120)]
    #[case(240)]
    fn increment(#[case] frames: u32) {
        assert_eq!(angular_increment(frames), FRAC_PI_2 / frames as f64);
    }

    #[test]
    fn inhale_increment_at_thirty_hertz() {
        let increment = angular_increment(120);
        assert!((increment - 0.01309).abs() < 1e-5);
    }

    #[rstest]
    #[case(Easing::Sinusoidal, 1)]
    #[case(Easing::Sinusoidal, 7)]
    #[case(Easing::Sinusoidal, 240)]
    #[case(Easing::Linear, 1)]
    #[case(Easing::Linear, 240)]
    fn curve_is_monotonic_and_below_one(#[case] easing: Easing, #[case] frames: u32) {
        let samples: Vec<_> = (0..frames).map(|i| easing.progress(i, frames)).collect();
        assert_eq!(samples[0], 0.0);
        assert!(samples.windows(2).all(|w| w[0] <= w[1]));
        assert!(samples.iter().all(|p| *p < 1.0));
    }

    #[test]
    fn sine_of_small_angles() {
        let samples: Vec<_> = (0..3).map(|i| Easing::Sinusoidal.progress(i, 120)).collect();
        assert_eq!(samples[0], 0.0);
        assert!((samples[1] - 0.01309).abs() < 1e-5);
        assert!((samples[2] - 0.02618).abs() < 1e-5);
    }
}
