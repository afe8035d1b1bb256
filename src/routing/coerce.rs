//! Syntactic coercion of raw parameter strings.
//!
//! # Grammar
//! ```text
//! integer := sign? ( "0" | [1-9] [0-9]* )                 → ParamValue::Int (if it fits in i64)
//! float   := sign? ( "0" | [1-9] [0-9]* ) "." [0-9]+      → ParamValue::Float
//! sign    := "+" | "-"
//! ```
//! Anything else is kept as a string: leading zeros (`"007"`), exponents,
//! bare fractions (`".5"`, `"5."`), surrounding whitespace, overflow.
//!
//! # Design Decisions
//! - ASCII digits only; Unicode digits never coerce
//! - Never fails; unmatched input passes through unchanged

use std::sync::LazyLock;

use regex::Regex;

use crate::routing::types::ParamValue;

static INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?(?:0|[1-9][0-9]*)$").expect("integer grammar"));

static FLOAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?(?:0|[1-9][0-9]*)\.[0-9]+$").expect("float grammar"));

/// Coerce a raw parameter. Numeric values are kept as they are.
pub fn coerce_param(value: ParamValue) -> ParamValue {
    match value {
        ParamValue::Str(raw) => coerce_str(raw),
        numeric => numeric,
    }
}

/// Coerce a raw string according to the integer and float grammars.
pub fn coerce_str(raw: String) -> ParamValue {
    if INTEGER.is_match(&raw) {
        return match raw.parse::<i64>() {
            Ok(n) => ParamValue::Int(n),
            Err(_) => {
                tracing::trace!(raw = %raw, "Integer parameter out of range, kept as string");
                ParamValue::Str(raw)
            }
        };
    }

    if FLOAT.is_match(&raw) {
        if let Ok(n) = raw.parse::<f64>() {
            if n.is_finite() {
                return ParamValue::Float(n);
            }
        }
        tracing::trace!(raw = %raw, "Float parameter out of range, kept as string");
    }

    ParamValue::Str(raw)
}
