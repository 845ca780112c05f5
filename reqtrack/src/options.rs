/// How a tracker publishes results of overlapping trigger calls.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub enum OverlapPolicy {
    /// Only the most recently started call may publish its terminal state.
    /// Results of calls superseded by a newer trigger are still returned to
    /// their caller but never overwrite the observable state.
    #[default]
    LatestOnly,
    /// Every settlement is published as it happens, so a slow earlier call
    /// can overwrite the state of a later one.
    LastWriteWins,
}

/// Tracker configuration.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub struct TrackerOptions {
    pub overlap: OverlapPolicy,
}

impl TrackerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_overlap(self, overlap: OverlapPolicy) -> Self {
        TrackerOptions { overlap, ..self }
    }
}
