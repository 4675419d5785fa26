//! Value-level helpers for hosts that read rules from CSS.
//!
//! A host typically stores rules in a custom property or a pseudo-element's
//! `content`, e.g.
//!
//! ```css
//! .headline { --flextype: '{ "500": 12, "1000+": 14 }'; }
//! ```
//!
//! and feeds the computed value back into the engine together with the
//! element's content width. These helpers cover the string handling around
//! that; reading computed style and applying the result stay with the host.

use crate::engine::{self, BreakpointCache};
use crate::{FlexError, RuleSpec};

/// Computed `content` values that mean "no rules".
const EMPTY_CONTENT: &[&str] = &["", "''", "\"\"", "none", "normal", "initial", "unset"];

/// Turn a computed CSS value into a rule spec.
///
/// Returns `None` when the value declares no rules.
pub fn decode_css_value(value: &str) -> Option<RuleSpec> {
    let trimmed = value.trim();
    if EMPTY_CONTENT.contains(&trimmed) {
        return None;
    }
    Some(RuleSpec::RawText(trimmed.to_string()))
}

/// Compute the size for a computed CSS value at `width`.
///
/// The verbatim value is the cache key, so elements sharing a declaration
/// share one parse. `Ok(None)` means the value declares no rules.
pub fn size_from_css(cache: &BreakpointCache, value: &str, width: f64) -> Result<Option<f64>, FlexError> {
    let Some(rules) = decode_css_value(value) else {
        return Ok(None);
    };
    crate::size_with(cache, &rules, width, Some(value)).map(Some)
}

/// Content-box width from computed `width` and border widths.
///
/// Lengths are read up to their unit (`"55px"` -> 55). A length without a
/// number counts as zero.
pub fn content_width(width: &str, border_left: &str, border_right: &str) -> f64 {
    let px = |s: &str| engine::parse_float_prefix(s).filter(|v| v.is_finite()).unwrap_or(0.0);
    px(width) - px(border_left) - px(border_right)
}

/// Format a size as a CSS pixel length.
pub fn format_px(size: f64) -> String {
    format!("{size}px")
}
