use crate::cycle::{BreathCycleEngine, Sample, Step};
use crate::render::RenderError;
use log::{debug, info};
use std::time::Duration;

/// Anything that can draw a sample.
pub(crate) trait SampleSink {
    fn render(&mut self, sample: &Sample) -> Result<(), RenderError>;
}

/// Whether the pacing loop should keep going after a wait.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,

    /// Start over from the first inhale.
    Restart,
    Stop,
}

/// Blocks between frames and during holds.
pub(crate) trait Waiter {
    fn wait(&mut self, duration: Duration) -> Result<Flow, RenderError>;
}

/// What happened during a run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct RunSummary {
    pub(crate) frames: u64,
    pub(crate) holds: u64,
    pub(crate) cycles: u64,
}

/// Drives an engine in real time, handing every frame to a sink.
///
/// Waits are best effort: the time spent rendering is not subtracted from the frame interval, so
/// a slow sink stretches the cycle.
#[derive(Debug, Default)]
pub(crate) struct Pacer {
    cycle_limit: Option<u64>,
}

impl Pacer {
    pub(crate) fn new(cycle_limit: Option<u64>) -> Self {
        Self { cycle_limit }
    }

    pub(crate) fn run<S, W>(
        &self,
        engine: &mut BreathCycleEngine,
        sink: &mut S,
        waiter: &mut W,
    ) -> Result<RunSummary, RenderError>
    where
        S: SampleSink + ?Sized,
        W: Waiter + ?Sized,
    {
        let mut summary = RunSummary::default();
        loop {
            if self.cycle_limit.is_some_and(|limit| engine.cycles_completed() >= limit) {
                info!("completed {} cycles", summary.cycles);
                break;
            }
            let Some(step) = engine.next() else {
                break;
            };
            let flow = match step {
                Step::Frame { sample, interval } => {
                    sink.render(&sample)?;
                    summary.frames += 1;
                    waiter.wait(interval)?
                }
                Step::Hold { phase, duration } => {
                    debug!("holding after {phase} for {duration:?}");
                    summary.holds += 1;
                    waiter.wait(duration)?
                }
            };
            summary.cycles = engine.cycles_completed();
            match flow {
                Flow::Continue => (),
                Flow::Restart => {
                    engine.reset();
                    info!(
                        "restarting from {} frame {}/{}",
                        engine.phase(),
                        engine.frame_index(),
                        engine.frames_in_phase()
                    );
                }
                Flow::Stop => {
                    info!("stopped after {} frames", summary.frames);
                    break;
                }
            }
        }
        Ok(summary)
    }
}
