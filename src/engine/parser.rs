//! Rule parsing.
//!
//! Normalizes a [`RuleSpec`] into a flat list of [`Breakpoint`]s. The three
//! input shapes collapse into one code path:
//!
//! ```text
//! RawText ──decode_raw_text──┬─▶ Percent ──▶ [{w:100, s:n}]
//!                            └─▶ RuleMap ──▶ one breakpoint per key
//! ```
//!
//! Width specifiers carry their lock as `+`/`-` suffixes (`"1000+-"`). The
//! suffixes are read once into a [`Lock`] and never kept as text.
//!
//! The output preserves declaration order. Nothing here sorts or deduplicates:
//! the interpolator compares widths numerically and owns tie-breaking.

use super::number::parse_finite_prefix;
use crate::{Breakpoint, FlexError, Lock, RuleSpec, RuleValue};
use serde_json::Value;

/// Width used for the bare-number shorthand (`6` means 6px at 100px wide).
pub(crate) const PERCENT_BASE_WIDTH: f64 = 100.0;

/// Normalize `spec` into breakpoints.
pub(crate) fn parse_rules(spec: &RuleSpec) -> Result<Vec<Breakpoint>, FlexError> {
    match spec {
        RuleSpec::Percent(n) => percent_rule(*n),
        RuleSpec::RawText(text) => parse_rules(&decode_raw_text(text)?),
        RuleSpec::RuleMap(entries) => {
            let mut out = Vec::with_capacity(entries.len());
            for (key, value) in entries {
                if let Some(bp) = parse_entry(key, value)? {
                    out.push(bp);
                }
            }
            tracing::debug!(entries = entries.len(), breakpoints = out.len(), "parsed rule map");
            Ok(out)
        }
    }
}

fn percent_rule(n: f64) -> Result<Vec<Breakpoint>, FlexError> {
    if !n.is_finite() {
        return Err(FlexError::malformed(n.to_string(), "shorthand size must be finite"));
    }
    Ok(vec![Breakpoint::new(PERCENT_BASE_WIDTH, n, Lock::empty())])
}

/// Parse one `key: value` pair.
///
/// A key without a numeric width can never bound any target width, so it is
/// dropped. A value without a number is an error.
fn parse_entry(key: &str, value: &RuleValue) -> Result<Option<Breakpoint>, FlexError> {
    let stripped = regex!(r"[+\-\s]").replace_all(key, "");
    let Some(width) = parse_finite_prefix(&stripped) else {
        tracing::warn!(key, "ignoring rule without a numeric width");
        return Ok(None);
    };

    let value = match value {
        RuleValue::Number(n) if n.is_finite() => *n,
        RuleValue::Number(n) => {
            return Err(FlexError::malformed(key, format!("size {n} is not finite")));
        }
        RuleValue::Text(text) => parse_finite_prefix(text)
            .ok_or_else(|| FlexError::malformed(key, format!("size \"{text}\" is not a number")))?,
    };

    Ok(Some(Breakpoint::new(width, value, lock_of(key))))
}

fn lock_of(key: &str) -> Lock {
    let mut lock = Lock::empty();
    if key.contains('-') {
        lock |= Lock::DOWN;
    }
    if key.contains('+') {
        lock |= Lock::UP;
    }
    lock
}

/// Decode unparsed rule text into a structured spec.
///
/// CSS hands the rules over quoted and escaped (`'{ \"10\": 4 }'`, `'12.12%'`).
/// Quotes at either end, backslashes and percent signs are dropped before the
/// text is read as a number or as a JSON object.
pub(crate) fn decode_raw_text(text: &str) -> Result<RuleSpec, FlexError> {
    let cleaned = regex!(r#"^['"]|\\|%|['"]$"#).replace_all(text.trim(), "");

    if let Some(n) = parse_finite_prefix(&cleaned) {
        return Ok(RuleSpec::Percent(n));
    }

    let json: Value =
        serde_json::from_str(&cleaned).map_err(|err| FlexError::malformed(text, err.to_string()))?;
    spec_from_json(json).map_err(|err| match err {
        FlexError::MalformedRule { reason, .. } => FlexError::malformed(text, reason),
    })
}

/// Interpret an already-decoded JSON value as a rule spec.
pub(crate) fn spec_from_json(json: Value) -> Result<RuleSpec, FlexError> {
    match json {
        Value::Number(n) => n
            .as_f64()
            .map(RuleSpec::Percent)
            .ok_or_else(|| FlexError::malformed(n.to_string(), "number out of range")),
        Value::String(s) => match parse_finite_prefix(&s) {
            Some(n) => Ok(RuleSpec::Percent(n)),
            None => Err(FlexError::malformed(s, "expected a number")),
        },
        Value::Object(map) => {
            let mut entries = Vec::with_capacity(map.len());
            for (key, value) in map {
                let value = match value {
                    Value::Number(n) => RuleValue::Number(
                        n.as_f64().ok_or_else(|| FlexError::malformed(key.as_str(), "size out of range"))?,
                    ),
                    Value::String(s) => RuleValue::Text(s),
                    other => {
                        return Err(FlexError::malformed(
                            key,
                            format!("size must be a number or string, got {other}"),
                        ));
                    }
                };
                entries.push((key, value));
            }
            Ok(RuleSpec::RuleMap(entries))
        }
        other => Err(FlexError::malformed(other.to_string(), "expected a number or an object of rules")),
    }
}
