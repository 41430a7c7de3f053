use strum::{Display, EnumIter};

/// A segment of the breathing cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
pub(crate) enum Phase {
    #[strum(to_string = "inhale")]
    Inhale,

    #[strum(to_string = "hold")]
    PostInhaleHold,

    #[strum(to_string = "exhale")]
    Exhale,

    #[strum(to_string = "hold")]
    PostExhaleHold,
}

impl Phase {
    /// The phase that follows this one, ignoring whether it is skipped.
    pub(crate) fn next(self) -> Self {
        match self {
            Self::Inhale => Self::PostInhaleHold,
            Self::PostInhaleHold => Self::Exhale,
            Self::Exhale => Self::PostExhaleHold,
            Self::PostExhaleHold => Self::Inhale,
        }
    }

    pub(crate) fn is_hold(self) -> bool {
        matches!(self, Self::PostInhaleHold | Self::PostExhaleHold)
    }
}
