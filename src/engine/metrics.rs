//! Timing for a single size computation.
//!
//! Only the verbose entry point collects these; `size` and `size_with` skip
//! the clock reads entirely.

use std::time::Duration;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunMetrics {
    /// Total elapsed time for the lookup.
    pub total: Duration,
    /// Time spent parsing rules. `None` on a cache hit.
    pub parse: Option<Duration>,
    /// Time spent selecting breakpoints and interpolating.
    pub interpolate: Duration,
}
