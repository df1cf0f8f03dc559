use crate::foundation::error::{PigmentError, PigmentResult};

/// Execution hints passed by value into every pixel operation.
///
/// These are hints: an operation may ignore any of them and run serially on the calling thread.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PerformanceOptions {
    /// Allow the lane-batched fast path for canonical 8-bit RGBA blocks.
    pub use_sse_if_available: bool,
    /// Allow whole-buffer memory operations (bulk copy/fill) instead of per-pixel writes.
    pub use_mem_if_available: bool,
    /// Number of workers the caller would like to use. `0` and `1` both mean serial.
    pub desired_workers: usize,
}

impl Default for PerformanceOptions {
    fn default() -> Self {
        Self {
            use_sse_if_available: true,
            use_mem_if_available: true,
            desired_workers: 1,
        }
    }
}

impl PerformanceOptions {
    /// Serial execution without any fast path.
    pub fn scalar() -> Self {
        Self {
            use_sse_if_available: false,
            use_mem_if_available: false,
            desired_workers: 1,
        }
    }

    /// Override [`PerformanceOptions::use_sse_if_available`].
    pub fn with_sse(mut self, enabled: bool) -> Self {
        self.use_sse_if_available = enabled;
        self
    }

    /// Override [`PerformanceOptions::use_mem_if_available`].
    pub fn with_mem(mut self, enabled: bool) -> Self {
        self.use_mem_if_available = enabled;
        self
    }

    /// Override [`PerformanceOptions::desired_workers`].
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.desired_workers = workers;
        self
    }

    /// True when the caller asked for more than one worker.
    pub fn is_parallel(self) -> bool {
        self.desired_workers > 1
    }

    /// Parse options from a JSON document. Missing fields keep their defaults.
    pub fn from_json_str(s: &str) -> PigmentResult<Self> {
        serde_json::from_str(s).map_err(|e| PigmentError::serde(e.to_string()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/options.rs"]
mod tests;
