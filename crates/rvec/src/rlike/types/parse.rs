//! Conversion of untyped text and JSON values into RValue elements.
//!
//! Strict parsers reject anything that is not numeric, logical or NA with
//! `RError::InvalidArgument`. Lenient parsers quietly convert such values
//! to NA, so that `na_rm = true` skips them during aggregation.

// dependencies
use std::str::FromStr;
use serde_json::Value;
use super::RValue;
use crate::error::RError;

/* -----------------------------------------------------------------------------
text fields, e.g., from tab-delimited records
----------------------------------------------------------------------------- */
impl FromStr for RValue {
    type Err = RError;
    /// Parse a text field strictly.
    ///
    /// `NA`, `NaN`, `null` and the empty string are NA; `TRUE`, `true`, `T`,
    /// `FALSE`, `false` and `F` are logical; `Inf`, `-Inf` and anything else
    /// that parses as f64 is numeric.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "NA" | "NaN" | "null" => Ok(RValue::NA),
            "TRUE"  | "true"  | "T"    => Ok(RValue::Logical(true)),
            "FALSE" | "false" | "F"    => Ok(RValue::Logical(false)),
            "Inf"                      => Ok(RValue::Numeric(f64::INFINITY)),
            "-Inf"                     => Ok(RValue::Numeric(f64::NEG_INFINITY)),
            field => field.parse::<f64>().map(RValue::Numeric).map_err(|_| {
                RError::invalid_argument(format!("'{}' is not numeric, logical or NA", field))
            }),
        }
    }
}
impl RValue {
    /// Parse a text field, returning NA for any value that is not
    /// numeric, logical or NA.
    pub fn parse_lenient(s: &str) -> RValue {
        s.parse().unwrap_or(RValue::NA)
    }
}

/// Parse a sequence of text fields into RValues.
///
/// In strict mode, the first field that is not numeric, logical or NA
/// fails the whole sequence.
pub fn parse_values<S: AsRef<str>>(fields: &[S], strict: bool) -> Result<Vec<RValue>, RError> {
    if strict {
        fields.iter().map(|s| s.as_ref().parse::<RValue>()).collect()
    } else {
        Ok(fields.iter().map(|s| RValue::parse_lenient(s.as_ref())).collect())
    }
}

/* -----------------------------------------------------------------------------
JSON values
----------------------------------------------------------------------------- */
impl TryFrom<&Value> for RValue {
    type Error = RError;
    /// Convert a JSON scalar strictly: number is numeric, bool is logical
    /// and null is NA. Strings, arrays and objects are rejected.
    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Null      => Ok(RValue::NA),
            Value::Bool(b)   => Ok(RValue::Logical(*b)),
            Value::Number(n) => n.as_f64().map(RValue::Numeric).ok_or_else(|| {
                RError::invalid_argument(format!("JSON number {} cannot be represented as f64", n))
            }),
            other => Err(RError::invalid_argument(format!(
                "JSON value {} is not numeric, logical or null", other
            ))),
        }
    }
}
impl RValue {
    /// Convert a JSON value, returning NA for anything that is not a
    /// number, bool or null.
    pub fn from_json_lenient(value: &Value) -> RValue {
        RValue::try_from(value).unwrap_or(RValue::NA)
    }
}

/// Convert a JSON value into RValues. An array yields one element per
/// array item; any other value is treated as a vector of length one.
pub fn json_values(value: &Value, strict: bool) -> Result<Vec<RValue>, RError> {
    let items = match value {
        Value::Array(items) => items.as_slice(),
        other => std::slice::from_ref(other),
    };
    if strict {
        items.iter().map(|v| RValue::try_from(v)).collect()
    } else {
        Ok(items.iter().map(RValue::from_json_lenient).collect())
    }
}
