use crate::engine::{self, BreakpointCache, Evaluation, RunMetrics};
use crate::{Breakpoint, FlexError, RuleSpec};
use once_cell::sync::Lazy;
use std::sync::Arc;
use std::time::Instant;

static GLOBAL_CACHE: Lazy<BreakpointCache> = Lazy::new(BreakpointCache::new);

/// The process-wide cache used by [`size`].
///
/// It lives for the whole process and is never evicted. Call
/// [`BreakpointCache::clear`] on it to reset between tests.
pub fn global_cache() -> &'static BreakpointCache {
    &GLOBAL_CACHE
}

/// Detailed result from [`size_verbose_with`].
#[derive(Debug, Clone)]
pub struct SizeDetails {
    /// The computed size.
    pub value: f64,
    /// Breakpoints the size was computed from (cached or freshly parsed).
    pub breakpoints: Arc<[Breakpoint]>,
    /// Bounding breakpoints and the branch taken.
    pub evaluation: Evaluation,
    /// Whether the breakpoints came from the cache.
    pub cache_hit: bool,
    pub metrics: RunMetrics,
}

/// Compute the size for `rules` at `width`, memoizing through the global cache.
///
/// When `cache_key` is already cached, `rules` is not looked at: the stored
/// breakpoints are used as they are. Keep key and rules in lockstep.
///
/// # Example
/// ```
/// use flextype::{RuleSpec, size};
///
/// let rules: RuleSpec = [("500", 12), ("1000", 14), ("1200", 18)].into_iter().collect();
/// assert_eq!(size(&rules, 750.0, None).unwrap(), 13.0);
/// ```
pub fn size(rules: &RuleSpec, width: f64, cache_key: Option<&str>) -> Result<f64, FlexError> {
    size_with(global_cache(), rules, width, cache_key)
}

/// Like [`size`], with an explicit cache.
pub fn size_with(
    cache: &BreakpointCache,
    rules: &RuleSpec,
    width: f64,
    cache_key: Option<&str>,
) -> Result<f64, FlexError> {
    let value = match cache_key {
        Some(key) => {
            let (breakpoints, _) = cache.get_or_parse(key, || engine::parse_rules(rules))?;
            engine::evaluate(&breakpoints, width)
        }
        None => engine::evaluate(&engine::parse_rules(rules)?, width),
    };
    Ok(value)
}

/// Like [`size_with`], but also returns the breakpoints, the interpolation
/// details and timings. Meant for debugging and the CLI report.
pub fn size_verbose_with(
    cache: &BreakpointCache,
    rules: &RuleSpec,
    width: f64,
    cache_key: Option<&str>,
) -> Result<SizeDetails, FlexError> {
    let t0 = Instant::now();

    let (breakpoints, cache_hit) = match cache_key {
        Some(key) => cache.get_or_parse(key, || engine::parse_rules(rules))?,
        None => (engine::parse_rules(rules)?.into(), false),
    };
    let parsed_at = Instant::now();

    let evaluation = engine::interpolate(&breakpoints, width);
    let done = Instant::now();

    let metrics = RunMetrics {
        total: done - t0,
        parse: (!cache_hit).then(|| parsed_at - t0),
        interpolate: done - parsed_at,
    };

    Ok(SizeDetails { value: evaluation.value, breakpoints, evaluation, cache_hit, metrics })
}

/// Parse `rules` into breakpoints without touching any cache.
pub fn parse_rules(rules: &RuleSpec) -> Result<Vec<Breakpoint>, FlexError> {
    engine::parse_rules(rules)
}

/// Interpolate a size from already-parsed breakpoints.
pub fn evaluate(breakpoints: &[Breakpoint], width: f64) -> f64 {
    engine::evaluate(breakpoints, width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Lock, Resolution};

    #[test]
    fn size_with_without_key_leaves_cache_untouched() {
        let cache = BreakpointCache::new();
        assert_eq!(size_with(&cache, &RuleSpec::Percent(6.0), 200.0, None).unwrap(), 12.0);
        assert!(cache.is_empty());
    }

    #[test]
    fn cache_hit_ignores_changed_rules() {
        let cache = BreakpointCache::new();
        assert_eq!(size_with(&cache, &RuleSpec::Percent(45.0), 100.0, Some("k")).unwrap(), 45.0);
        assert_eq!(size_with(&cache, &RuleSpec::Percent(75.0), 100.0, Some("k")).unwrap(), 45.0);
        assert_eq!(&*cache.get("k").unwrap(), &[Breakpoint::new(100.0, 45.0, Lock::empty())]);
    }

    #[test]
    fn cache_hit_skips_parsing_malformed_rules() {
        let cache = BreakpointCache::new();
        size_with(&cache, &RuleSpec::Percent(10.0), 100.0, Some("k")).unwrap();
        let res = size_with(&cache, &RuleSpec::from("not valid json"), 100.0, Some("k"));
        assert_eq!(res.unwrap(), 10.0);
    }

    #[test]
    fn malformed_rules_surface_and_are_not_cached() {
        let cache = BreakpointCache::new();
        let res = size_with(&cache, &RuleSpec::from("not valid json"), 100.0, Some("not valid json"));
        assert!(matches!(res, Err(FlexError::MalformedRule { .. })));
        assert!(cache.is_empty());
    }

    #[test]
    fn verbose_reports_cache_state_and_branch() {
        let cache = BreakpointCache::new();
        let rules: RuleSpec = [("500", 12), ("1000", 14)].into_iter().collect();

        let first = size_verbose_with(&cache, &rules, 750.0, Some("rules")).unwrap();
        assert_eq!(first.value, 13.0);
        assert!(!first.cache_hit);
        assert!(first.metrics.parse.is_some());
        assert_eq!(first.evaluation.resolution, Resolution::Interpolated);
        assert_eq!(first.breakpoints.len(), 2);
        assert!(first.metrics.total >= first.metrics.interpolate);

        let second = size_verbose_with(&cache, &rules, 2000.0, Some("rules")).unwrap();
        assert_eq!(second.value, 28.0);
        assert!(second.cache_hit);
        assert_eq!(second.metrics.parse, None);
        assert_eq!(second.evaluation.resolution, Resolution::Scaled);
    }

    #[test]
    fn global_cache_is_shared() {
        let key = "api::tests::global_cache_is_shared";
        assert_eq!(size(&RuleSpec::Percent(3.0), 100.0, Some(key)).unwrap(), 3.0);
        assert!(global_cache().contains(key));
        assert_eq!(size(&RuleSpec::Percent(9.0), 200.0, Some(key)).unwrap(), 6.0);
    }
}
