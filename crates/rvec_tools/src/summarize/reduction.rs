//! The reductions applied to each group of values, and the kinds of result
//! they produce.

// dependencies
use rvec::rlike::types::{format_logical, format_numeric};
use rvec::{Agg, RError, RValue};

/// The R function applied to the values of each group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reduction {
    Sum,
    Mean,
    Any,
}

/// Options shared by all groups in one stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    pub na_rm:  bool,
    pub trim:   f64,
    pub strict: bool,
}

/// Classification of a reduced value, for keyed counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultKind {
    Numeric,
    True,
    False,
    NA,
}
impl ResultKind {
    pub const ALL: [ResultKind; 4] = [
        ResultKind::Numeric,
        ResultKind::True,
        ResultKind::False,
        ResultKind::NA,
    ];
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultKind::Numeric => "numeric",
            ResultKind::True    => "TRUE",
            ResultKind::False   => "FALSE",
            ResultKind::NA      => "NA",
        }
    }
}

impl Reduction {
    /// Tool name used in log and counter lines.
    pub fn tool(&self) -> &'static str {
        match self {
            Reduction::Sum  => "rvec_sum",
            Reduction::Mean => "rvec_mean",
            Reduction::Any  => "rvec_any",
        }
    }

    /// Check stream-wide settings before any record is read.
    pub fn validate(&self, settings: &Settings) -> Result<(), RError> {
        match self {
            Reduction::Mean => Agg::check_trim(settings.trim),
            _ => Ok(()),
        }
    }

    /// Reduce one group of values to its formatted result and result kind.
    pub fn reduce(&self, values: &[RValue], settings: &Settings) -> Result<(String, ResultKind), RError> {
        match self {
            Reduction::Sum  => Ok(numeric_result(Agg::sum(values, settings.na_rm))),
            Reduction::Mean => Ok(numeric_result(Agg::mean(values, settings.trim, settings.na_rm)?)),
            Reduction::Any  => {
                let x = Agg::any(values, settings.na_rm);
                let kind = match x {
                    Some(true)  => ResultKind::True,
                    Some(false) => ResultKind::False,
                    None        => ResultKind::NA,
                };
                Ok((format_logical(x), kind))
            },
        }
    }
}

fn numeric_result(x: f64) -> (String, ResultKind) {
    let kind = if x.is_nan() { ResultKind::NA } else { ResultKind::Numeric };
    (format_numeric(x), kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rvec::RValue::{Logical, Numeric, NA};

    const DEFAULTS: Settings = Settings { na_rm: false, trim: 0.0, strict: true };

    #[test]
    fn sum_formats_numbers_and_na() {
        let x = [Numeric(1.5), Logical(true), Numeric(2.0)];
        assert_eq!(Reduction::Sum.reduce(&x, &DEFAULTS).unwrap(), ("4.5".to_string(), ResultKind::Numeric));
        let x = [Numeric(1.0), NA];
        assert_eq!(Reduction::Sum.reduce(&x, &DEFAULTS).unwrap(), ("NA".to_string(), ResultKind::NA));
        let na_rm = Settings { na_rm: true, ..DEFAULTS };
        assert_eq!(Reduction::Sum.reduce(&x, &na_rm).unwrap().0, "1");
    }

    #[test]
    fn mean_applies_trim() {
        let x: Vec<RValue> = [1.0, 2.0, 3.0, 4.0, 50.0].into_iter().map(Numeric).collect();
        let trimmed = Settings { trim: 0.2, ..DEFAULTS };
        assert_eq!(Reduction::Mean.reduce(&x, &trimmed).unwrap().0, "3");
        assert_eq!(Reduction::Mean.reduce(&x, &DEFAULTS).unwrap().0, "12");
        assert_eq!(Reduction::Mean.reduce(&[], &DEFAULTS).unwrap().1, ResultKind::NA);
    }

    #[test]
    fn any_formats_logicals() {
        let x = [Logical(false), NA];
        assert_eq!(Reduction::Any.reduce(&x, &DEFAULTS).unwrap(), ("NA".to_string(), ResultKind::NA));
        let na_rm = Settings { na_rm: true, ..DEFAULTS };
        assert_eq!(Reduction::Any.reduce(&x, &na_rm).unwrap(), ("FALSE".to_string(), ResultKind::False));
        let x = [NA, Numeric(3.0)];
        assert_eq!(Reduction::Any.reduce(&x, &DEFAULTS).unwrap(), ("TRUE".to_string(), ResultKind::True));
    }

    #[test]
    fn only_mean_validates_trim() {
        let bad = Settings { trim: 0.6, ..DEFAULTS };
        assert!(Reduction::Mean.validate(&bad).unwrap_err().is_invalid_argument());
        assert!(Reduction::Sum.validate(&bad).is_ok());
        assert!(Reduction::Any.validate(&bad).is_ok());
    }
}
