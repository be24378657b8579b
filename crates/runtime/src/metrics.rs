use serde::Serialize;

/// Running totals for the refresh cycle.
///
/// Updated once per refresh by the cycle that owns it; readers get copies
/// through published map states.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleStats {
    pub refreshes: u64,
    pub successes: u64,
    pub failures: u64,
    /// Failures since the last success.
    pub consecutive_failures: u64,
    /// Markers drawn by the latest refresh (zero after a failure).
    pub markers: usize,
    pub last_error: Option<String>,
}

impl CycleStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_success(&mut self, markers: usize) {
        self.refreshes += 1;
        self.successes += 1;
        self.consecutive_failures = 0;
        self.markers = markers;
        self.last_error = None;
    }

    pub fn record_failure(&mut self, error: impl Into<String>) {
        self.refreshes += 1;
        self.failures += 1;
        self.consecutive_failures += 1;
        self.markers = 0;
        self.last_error = Some(error.into());
    }
}
