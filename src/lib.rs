#[macro_use]
mod macros;
mod api;
pub mod css;
mod engine;

pub use api::{SizeDetails, evaluate, global_cache, parse_rules, size, size_verbose_with, size_with};
pub use engine::{BreakpointCache, Evaluation, Resolution, RunMetrics};

// --- Core types -------------------------------------------------------------

bitflags::bitflags! {
    /// Directional lock carried by a breakpoint.
    ///
    /// A rule key suffixed with `-` locks the size below the breakpoint (down
    /// to the previous breakpoint), a `+` suffix locks it above (up to the next
    /// breakpoint). Both suffixes may appear on the same key.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Lock: u8 {
        const DOWN = 1 << 0;
        const UP   = 1 << 1;
        const BOTH = Self::DOWN.bits() | Self::UP.bits();
    }
}

/// One point of the piecewise scaling function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Breakpoint {
    /// Width at which this rule applies.
    pub width: f64,
    /// Size at this width.
    pub value: f64,
    pub lock: Lock,
}

impl Breakpoint {
    pub const fn new(width: f64, value: f64, lock: Lock) -> Self {
        Breakpoint { width, value, lock }
    }
}

/// Value side of a rule map entry.
///
/// Values coming from CSS are usually numbers, but strings with a unit suffix
/// (`"14px"`) are accepted and read up to the first non-numeric character.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleValue {
    Number(f64),
    Text(String),
}

impl From<f64> for RuleValue {
    fn from(value: f64) -> Self {
        RuleValue::Number(value)
    }
}

impl From<i32> for RuleValue {
    fn from(value: i32) -> Self {
        RuleValue::Number(value.into())
    }
}

impl From<&str> for RuleValue {
    fn from(value: &str) -> Self {
        RuleValue::Text(value.to_string())
    }
}

impl From<String> for RuleValue {
    fn from(value: String) -> Self {
        RuleValue::Text(value)
    }
}

/// A rule specification as handed over by the host.
///
/// ```text
/// Percent(6.0)                       -> [{w:100, s:6}]
/// RawText("'{ \"10\": 4, \"11+\": 6 }'") -> decoded, then as RuleMap
/// RuleMap([("1000-", 14)])           -> [{w:1000, s:14, lock:DOWN}]
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum RuleSpec {
    /// Bare-number shorthand: a single breakpoint at width 100.
    Percent(f64),
    /// Unparsed rule text, typically the verbatim CSS value.
    RawText(String),
    /// Width-specifier / value pairs in declaration order.
    RuleMap(Vec<(String, RuleValue)>),
}

impl From<f64> for RuleSpec {
    fn from(value: f64) -> Self {
        RuleSpec::Percent(value)
    }
}

impl From<i32> for RuleSpec {
    fn from(value: i32) -> Self {
        RuleSpec::Percent(value.into())
    }
}

impl From<&str> for RuleSpec {
    fn from(text: &str) -> Self {
        RuleSpec::RawText(text.to_string())
    }
}

impl From<String> for RuleSpec {
    fn from(text: String) -> Self {
        RuleSpec::RawText(text)
    }
}

impl<K, V> FromIterator<(K, V)> for RuleSpec
where
    K: Into<String>,
    V: Into<RuleValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        RuleSpec::RuleMap(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl TryFrom<serde_json::Value> for RuleSpec {
    type Error = FlexError;

    fn try_from(json: serde_json::Value) -> Result<Self, Self::Error> {
        engine::spec_from_json(json)
    }
}

/// The single error kind raised by the engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FlexError {
    /// The rule specification is neither numeric nor a well-formed mapping.
    #[error("malformed rule \"{input}\": {reason}")]
    MalformedRule { input: String, reason: String },
}

impl FlexError {
    pub(crate) fn malformed(input: impl Into<String>, reason: impl Into<String>) -> Self {
        FlexError::MalformedRule { input: input.into(), reason: reason.into() }
    }
}
