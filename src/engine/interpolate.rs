//! Piecewise-linear interpolation with directional locks.
//!
//! Given a set of breakpoints and a target width, the interpolator picks the
//! two breakpoints bounding the target and derives a size from them:
//!
//! ```text
//!  size
//!   │             end ●
//!   │               ╱
//!   │    start ●──╱        (UP lock on start: flat to the right)
//!   │          ╱
//!   │        ╱             (no breakpoint above: scale through origin)
//!   └──────────────────── width
//! ```
//!
//! `start` is the breakpoint with the greatest width `<=` target, `end` the one
//! with the smallest width `>` target. When either side has no breakpoint a
//! sentinel stands in (`{0, 0}` below, `{inf, inf}` above).

use crate::{Breakpoint, Lock};

const START_SENTINEL: Breakpoint = Breakpoint::new(0.0, 0.0, Lock::empty());
const END_SENTINEL: Breakpoint = Breakpoint::new(f64::INFINITY, f64::INFINITY, Lock::empty());

/// Which branch of the decision produced the size.
///
/// Branches are tried in declaration order; the first that applies wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resolution {
    /// Target sits exactly on `start` (or on the origin sentinel).
    AtStart,
    /// `start` is locked upwards; its size holds until `end`.
    LockedUp,
    /// `end` is locked downwards; its size holds back to `start`.
    LockedDown,
    /// Nothing above the target: scaled through the origin using `start`.
    Scaled,
    /// Linear interpolation between `start` and `end`.
    Interpolated,
    /// No breakpoint bounds the target at all.
    Empty,
}

/// Full result of one interpolation, including the bounding breakpoints.
///
/// `start`/`end` are `None` where the sentinel was used.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub value: f64,
    pub start: Option<Breakpoint>,
    pub end: Option<Breakpoint>,
    pub resolution: Resolution,
}

/// Compute the size at `target`.
pub(crate) fn evaluate(breakpoints: &[Breakpoint], target: f64) -> f64 {
    interpolate(breakpoints, target).value
}

/// Compute the size at `target` and report how it was derived.
///
/// Tie-breaking on equal widths follows the scan order: the last breakpoint
/// wins for `start`, the first wins for `end`.
pub(crate) fn interpolate(breakpoints: &[Breakpoint], target: f64) -> Evaluation {
    let mut start: Option<&Breakpoint> = None;
    let mut end: Option<&Breakpoint> = None;

    for bp in breakpoints {
        if bp.width <= target && bp.width >= start.map_or(START_SENTINEL.width, |s| s.width) {
            start = Some(bp);
        }
        if bp.width > target && bp.width < end.map_or(END_SENTINEL.width, |e| e.width) {
            end = Some(bp);
        }
    }

    let s = start.unwrap_or(&START_SENTINEL);
    let e = end.unwrap_or(&END_SENTINEL);

    let (value, resolution) = if start.is_none() && end.is_none() {
        (0.0, Resolution::Empty)
    } else if target == s.width {
        (s.value, Resolution::AtStart)
    } else if s.lock.contains(Lock::UP) {
        (s.value, Resolution::LockedUp)
    } else if e.lock.contains(Lock::DOWN) {
        (e.value, Resolution::LockedDown)
    } else if end.is_none() {
        // A breakpoint at width 0 has no slope through the origin.
        let value = if s.width == 0.0 { s.value } else { target * s.value / s.width };
        (value, Resolution::Scaled)
    } else {
        (s.value + (e.value - s.value) * (target - s.width) / (e.width - s.width), Resolution::Interpolated)
    };

    tracing::trace!(target_width = target, value, ?resolution, "interpolated");

    Evaluation { value, start: start.copied(), end: end.copied(), resolution }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bp(width: f64, value: f64) -> Breakpoint {
        Breakpoint::new(width, value, Lock::empty())
    }

    fn locked(width: f64, value: f64, lock: Lock) -> Breakpoint {
        Breakpoint::new(width, value, lock)
    }

    #[test]
    fn exact_hit_returns_breakpoint_value() {
        let set = [bp(500.0, 12.0), bp(1000.0, 14.0), bp(1200.0, 18.0)];
        for b in &set {
            let eval = interpolate(&set, b.width);
            assert_eq!(eval.value, b.value);
            assert_eq!(eval.resolution, Resolution::AtStart);
        }
    }

    #[test]
    fn interpolates_between_neighbours() {
        let set = [bp(500.0, 12.0), bp(1000.0, 14.0), bp(1200.0, 18.0)];
        assert_eq!(evaluate(&set, 750.0), 13.0);
        assert_eq!(evaluate(&set, 1100.0), 16.0);

        let eval = interpolate(&set, 750.0);
        assert_eq!(eval.resolution, Resolution::Interpolated);
        assert_eq!(eval.start, Some(bp(500.0, 12.0)));
        assert_eq!(eval.end, Some(bp(1000.0, 14.0)));
    }

    #[test]
    fn interpolation_is_affine_between_breakpoints() {
        let set = [bp(200.0, 10.0), bp(600.0, 30.0)];
        for t in [200.0, 250.0, 300.0, 450.0, 599.0, 600.0] {
            let expected = 10.0 + (t - 200.0) * 20.0 / 400.0;
            assert!((evaluate(&set, t) - expected).abs() < 1e-9, "t = {t}");
        }
    }

    #[test]
    fn scales_through_origin_beyond_last_breakpoint() {
        let set = [bp(1000.0, 14.0)];
        assert_eq!(evaluate(&set, 2000.0), 28.0);
        assert_eq!(interpolate(&set, 2000.0).resolution, Resolution::Scaled);
    }

    #[test]
    fn scales_from_zero_sentinel_below_first_breakpoint() {
        let set = [bp(1000.0, 14.0)];
        let eval = interpolate(&set, 500.0);
        assert_eq!(eval.value, 7.0);
        assert_eq!(eval.start, None);
        assert_eq!(eval.resolution, Resolution::Interpolated);
    }

    #[test]
    fn lock_up_holds_until_next_breakpoint() {
        let set = [locked(1000.0, 14.0, Lock::UP), bp(1500.0, 30.0)];
        for t in [1000.0, 1001.0, 1200.0, 1499.0] {
            assert_eq!(evaluate(&set, t), 14.0, "t = {t}");
        }
        assert_eq!(evaluate(&set, 1500.0), 30.0);
        assert_eq!(evaluate(&set, 3000.0), 60.0);
        assert_eq!(interpolate(&set, 1200.0).resolution, Resolution::LockedUp);
    }

    #[test]
    fn lock_down_holds_back_to_previous_breakpoint() {
        let set = [bp(200.0, 12.0), locked(1000.0, 14.0, Lock::DOWN)];
        assert_eq!(evaluate(&set, 150.0), 9.0);
        assert_eq!(evaluate(&set, 200.0), 12.0);
        for t in [201.0, 500.0, 999.0, 1000.0] {
            assert_eq!(evaluate(&set, t), 14.0, "t = {t}");
        }
        assert_eq!(interpolate(&set, 500.0).resolution, Resolution::LockedDown);
    }

    #[test]
    fn lock_down_alone_holds_to_zero() {
        let set = [locked(1000.0, 14.0, Lock::DOWN)];
        assert_eq!(evaluate(&set, 750.0), 14.0);
        assert_eq!(evaluate(&set, 0.5), 14.0);
    }

    #[test]
    fn lock_both_holds_in_both_directions() {
        let set = [bp(200.0, 12.0), locked(1000.0, 14.0, Lock::BOTH), bp(1500.0, 30.0)];
        assert_eq!(evaluate(&set, 200.0), 12.0);
        assert_eq!(evaluate(&set, 201.0), 14.0);
        assert_eq!(evaluate(&set, 1000.0), 14.0);
        assert_eq!(evaluate(&set, 1499.0), 14.0);
        assert_eq!(evaluate(&set, 1500.0), 30.0);
        assert_eq!(evaluate(&set, 3000.0), 60.0);
    }

    #[test]
    fn empty_set_degenerates_to_zero() {
        for t in [0.0, 1.0, 500.0, -20.0] {
            assert_eq!(evaluate(&[], t), 0.0, "t = {t}");
            assert_eq!(interpolate(&[], t).resolution, Resolution::Empty);
        }
    }

    #[test]
    fn zero_width_breakpoint_never_divides_by_zero() {
        let set = [bp(0.0, 5.0)];
        assert_eq!(evaluate(&set, 0.0), 5.0);
        assert_eq!(evaluate(&set, 10.0), 5.0);

        let set = [bp(0.0, 5.0), bp(100.0, 15.0)];
        assert_eq!(evaluate(&set, 50.0), 10.0);
    }

    #[test]
    fn target_at_origin_below_all_breakpoints_is_zero() {
        let set = [locked(1000.0, 14.0, Lock::DOWN)];
        assert_eq!(evaluate(&set, 0.0), 0.0);
        assert_eq!(interpolate(&set, 0.0).resolution, Resolution::AtStart);
    }

    #[test]
    fn duplicate_widths_last_wins_for_start_first_wins_for_end() {
        let set = [bp(500.0, 10.0), bp(500.0, 20.0), bp(1000.0, 30.0), bp(1000.0, 40.0)];
        assert_eq!(evaluate(&set, 500.0), 20.0);

        let eval = interpolate(&set, 750.0);
        assert_eq!(eval.start, Some(bp(500.0, 20.0)));
        assert_eq!(eval.end, Some(bp(1000.0, 30.0)));
        assert_eq!(eval.value, 25.0);
    }

    #[test]
    fn order_does_not_change_results() {
        let a = [bp(500.0, 12.0), bp(1000.0, 14.0), locked(1200.0, 18.0, Lock::UP), bp(1600.0, 22.0)];
        let b = [a[2], a[0], a[3], a[1]];
        let c = [a[3], a[2], a[1], a[0]];
        for t in [0.0, 100.0, 500.0, 750.0, 1100.0, 1200.0, 1400.0, 1600.0, 2400.0] {
            let expected = evaluate(&a, t);
            assert_eq!(evaluate(&b, t), expected, "t = {t}");
            assert_eq!(evaluate(&c, t), expected, "t = {t}");
        }
    }
}
