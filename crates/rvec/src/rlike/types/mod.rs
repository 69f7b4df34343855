//! The `rlike::types` module provides the restricted set of data types
//! accepted by R-like vector functions.
//! - RNumeric: `Option<f64>`
//! - RInteger: `Option<i32>`
//! - RLogical: `Option<bool>`
//! - RValue:   a tagged element that is one of Numeric, Logical or NA
//!
//! Option-wrapped types use `None` to represent R-like NA values, i.e.,
//! missing/null values per element. A Numeric value holding NaN is treated
//! exactly like NA everywhere, so that the many ways a value can be missing
//! collapse to a single concept.
//!
//! The bare primitives `f64`, `i32` and `bool` are also accepted wherever an
//! R-like type is expected, since a vector without missing values is simply
//! a vector that is never NA.
//!
//! All of these types implement trait `RLike`, which converts any supported
//! element into an `RValue` so that functions like `Agg::sum()` can be written
//! once and used as `Agg::sum(&[1.0, 2.0], false)`, `Agg::sum(&[Some(true), None], true)`
//! or `Agg::sum(&[RValue::Numeric(1.0), RValue::NA], false)`.

// modules
mod agg;
mod parse;
mod reduce;

// dependencies
use std::fmt;
use paste::paste;
pub use agg::Agg;
pub use parse::{json_values, parse_values};
pub use reduce::SumCount;

/* -----------------------------------------------------------------------------
RValue, the tagged element type
----------------------------------------------------------------------------- */
/// An RValue is a single element of an R-like vector of mixed type.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum RValue {
    Numeric(f64),
    Logical(bool),
    #[default]
    NA,
}
impl RValue {
    /// Return true if the value is missing, i.e., NA or a NaN Numeric.
    pub fn is_na(&self) -> bool {
        match self {
            RValue::Numeric(x) => x.is_nan(),
            RValue::Logical(_) => false,
            RValue::NA         => true,
        }
    }
    /// Return the value as f64, with TRUE as 1 and FALSE as 0, or None if missing.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            RValue::Numeric(x) if x.is_nan() => None,
            RValue::Numeric(x) => Some(x),
            RValue::Logical(b) => Some(if b { 1.0 } else { 0.0 }),
            RValue::NA         => None,
        }
    }
    /// Return the value coerced to bool, with any non-zero Numeric as TRUE,
    /// or None if missing.
    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            RValue::Numeric(x) if x.is_nan() => None,
            RValue::Numeric(x) => Some(x != 0.0),
            RValue::Logical(b) => Some(b),
            RValue::NA         => None,
        }
    }
}
impl fmt::Display for RValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            RValue::Logical(b) => f.write_str(if b { "TRUE" } else { "FALSE" }),
            RValue::Numeric(x) => f.write_str(&format_numeric(x)),
            RValue::NA         => f.write_str("NA"),
        }
    }
}

/// Format an f64 the way R prints it in a data stream: NaN as NA, infinite
/// values as Inf/-Inf, and scientific notation such as `1e+21` or `1.5e-07`
/// whenever it is strictly shorter than the fixed notation.
pub fn format_numeric(x: f64) -> String {
    if x.is_nan() {
        "NA".to_string()
    } else if x.is_infinite() {
        if x > 0.0 { "Inf".to_string() } else { "-Inf".to_string() }
    } else {
        let fixed = x.to_string();
        let scientific = format_scientific(x);
        if scientific.len() < fixed.len() { scientific } else { fixed }
    }
}

// R writes the exponent with an explicit sign and at least two digits
fn format_scientific(x: f64) -> String {
    let rust = format!("{:e}", x);
    match rust.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        },
        None => rust,
    }
}

/// Format an RLogical as TRUE, FALSE or NA.
pub fn format_logical(x: RLogical) -> String {
    x.map_or(RValue::NA, RValue::Logical).to_string()
}

/* -----------------------------------------------------------------------------
RLike and associated trait definitions
----------------------------------------------------------------------------- */
/// Trait RLike is implemented for all element types accepted by R-like vector functions.
pub trait RLike: Copy + Send + Sync {
    fn to_rvalue(self) -> RValue;
    fn is_na(&self) -> bool {
        self.to_rvalue().is_na()
    }
}
impl RLike for RValue {
    fn to_rvalue(self) -> RValue { self }
}

/// Trait ToRL converts T into Option<T>.
/// Example usage: `(15).to_rl()`, equivalent to `Some(15)`.
pub trait ToRL {
    type Inner; // an R-like type
    fn to_rl(self) -> Self::Inner;
}

/// Trait ToRLVec converts a Vec<T> to a Vec<Option<T>>.
/// Example usage: `vec![1.0, 2.0, 3.0].to_rl()`.
pub trait ToRLVec {
    type Inner; // an R-like type
    fn to_rl(&self) -> Vec<Self::Inner>;
}

/* -----------------------------------------------------------------------------
RLike trait implementation for Rust primitive types and their Option wrappers
----------------------------------------------------------------------------- */
macro_rules! impl_rlike_primitive {
    ($rlike_type:ident, $primitive:ty, $variant:ident, $convert:expr) => {
        paste!{
            /// [<$rlike_type Prim>] data type is $primitive.
            pub type [<$rlike_type Prim>] = $primitive;
            /// $rlike_type data type is Option<$primitive>, i.e., Option<[<$rlike_type Prim>]>.
            pub type $rlike_type = Option<$primitive>;
        }
        impl RLike for $primitive {
            fn to_rvalue(self) -> RValue { RValue::$variant($convert(self)) }
        }
        impl RLike for $rlike_type {
            fn to_rvalue(self) -> RValue { self.map_or(RValue::NA, |x| x.to_rvalue()) }
        }
        impl ToRL for $primitive {
            type Inner = $rlike_type;
            fn to_rl(self) -> Self::Inner { Some(self) }
        }
        impl ToRLVec for Vec<$primitive> {
            type Inner = $rlike_type;
            fn to_rl(&self) -> Vec<Self::Inner> {
                self.iter().map(|&x| Some(x)).collect() // execute vectorized option wrapping
            }
        }
    };
}
impl_rlike_primitive!(RNumeric, f64,  Numeric, |x: f64| x);
impl_rlike_primitive!(RInteger, i32,  Numeric, f64::from);
impl_rlike_primitive!(RLogical, bool, Logical, |x: bool| x);
