//! Rule parsing, memoization and interpolation.
//!
//! ## How the parts work together
//!
//! ```text
//! RuleSpec ──┐
//!            │  BreakpointCache::get_or_parse   (cache.rs)
//!            │     └─ miss: parse_rules         (parser.rs, number.rs)
//!            v
//!      Arc<[Breakpoint]>
//!            │
//! width ─────┼─ interpolate                     (interpolate.rs)
//!            v
//!        Evaluation { value, start, end, resolution }
//! ```
//!
//! The parser and interpolator only share the [`Breakpoint`](crate::Breakpoint)
//! shape. The cache sits in front of the parser and never sees a width.
//!
//! ## Responsibilities by module
//!
//! - `number.rs`: lenient numeric-prefix parsing (`"1000px"` -> 1000).
//! - `parser.rs`: `RuleSpec` -> breakpoints, including raw CSS text decoding.
//! - `cache.rs`: keyed, thread-safe memo of parsed breakpoints.
//! - `interpolate.rs`: bounding-breakpoint selection, locks, interpolation.
//! - `metrics.rs`: optional timing for the verbose entry point.
//!
//! ## Debugging
//!
//! Everything logs through `tracing`: cache hits and misses at `debug`, the
//! chosen branch at `trace`, skipped rule entries at `warn`.

#[path = "engine/cache.rs"]
mod cache;
#[path = "engine/interpolate.rs"]
mod interpolate;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/number.rs"]
mod number;
#[path = "engine/parser.rs"]
mod parser;

pub use cache::BreakpointCache;
pub use interpolate::{Evaluation, Resolution};
pub use metrics::RunMetrics;

pub(crate) use interpolate::{evaluate, interpolate};
pub(crate) use number::parse_float_prefix;
pub(crate) use parser::{parse_rules, spec_from_json};
