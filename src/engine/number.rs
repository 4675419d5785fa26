//! Lenient numeric parsing for CSS-flavoured input.
//!
//! Rule keys and values arrive as strings such as `"1000px"`, `" 12.5 "` or
//! `"14px"`. They are read like a browser reads a float attribute: skip
//! leading whitespace, take the longest numeric prefix, ignore whatever
//! follows.
//!
//! ```text
//! "1000px"  -> 1000
//! "  .5em"  -> 0.5
//! "1e3"     -> 1000
//! "-2"      -> -2
//! "px"      -> None
//! ```

/// Parse the longest numeric prefix of `s`.
///
/// Returns `None` when `s` does not start (after whitespace) with a number.
/// `Infinity` is recognized, so callers that need a finite value should use
/// [`parse_finite_prefix`].
pub(crate) fn parse_float_prefix(s: &str) -> Option<f64> {
    let re = regex!(r"^[+-]?(?:Infinity|(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)");
    let m = re.find(s.trim_start())?;
    m.as_str().parse::<f64>().ok()
}

/// Like [`parse_float_prefix`], but rejects infinities.
pub(crate) fn parse_finite_prefix(s: &str) -> Option<f64> {
    parse_float_prefix(s).filter(|v| v.is_finite())
}
