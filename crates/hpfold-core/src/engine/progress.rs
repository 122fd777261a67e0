//! Progress events for front ends. The core never draws anything itself; it only hands
//! events to an optional callback.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    PhaseStart { name: &'static str },
    PhaseFinish,

    /// A counted task begins; folding counts one step per trial.
    TaskStart { total_steps: u64 },
    TaskIncrement,
    TaskFinish,

    /// Trial `trial` is done. `energy` is `None` when it ran out of construction attempts.
    TrialFinished { trial: usize, energy: Option<i32> },

    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

/// Forwards [`Progress`] events to a callback, or drops them when there is none.
///
/// Trials may report from several threads at once, so the callback must be `Sync`.
#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }

    /// Reports a finished trial and advances the task counter by one.
    pub fn trial_finished(&self, trial: usize, energy: Option<i32>) {
        self.report(Progress::TrialFinished { trial, energy });
        self.report(Progress::TaskIncrement);
    }
}
