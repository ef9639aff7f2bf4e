//! Per-operation resource limits.

/// Limits on the work a single boolean operation may do.
///
/// Adversarial inputs can make the sweep generate a huge number of split
/// events. Exceeding any limit aborts the operation with
/// [`Error::LimitExceeded`](crate::Error::LimitExceeded) instead of running
/// out of memory. The defaults are far beyond what realistic inputs need.
///
/// `Config` can be deserialized, with missing fields taking their defaults:
///
/// ```
/// let config: sweepclip::Config = serde_yaml::from_str("max_queue_size: 10").unwrap();
/// assert_eq!(config.max_queue_size, 10);
/// assert_eq!(config.max_sweep_line_segments, 1_000_000);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    /// The largest number of pending events the sweep may hold.
    pub max_queue_size: usize,
    /// The largest number of segments that may cross the sweep line at once.
    pub max_sweep_line_segments: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_queue_size: 1_000_000,
            max_sweep_line_segments: 1_000_000,
        }
    }
}
