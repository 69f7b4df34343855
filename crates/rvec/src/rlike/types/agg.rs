/* -----------------------------------------------------------------------------
Aggregation functions for RLike element sequences
----------------------------------------------------------------------------- */

// dependencies
use super::reduce::{fold_unrolled, SumCount, UNROLL};
use super::{RLike, RLogical};
use crate::error::RError;

/// The `Agg` struct provides R-like aggregation functions over slices of
/// any RLike type, i.e., numbers, logicals and their Option-wrapped forms.
///
/// Functions follow R conventions for missing values. When `na_rm` is false,
/// any NA (or NaN) element makes the result undefined, reported as NaN for
/// numeric results and None for logical results. When `na_rm` is true,
/// missing elements are removed before the aggregation is calculated.
///
/// Input slices are never modified.
pub struct Agg {}
impl Agg {
    /* -----------------------------------------------------------------------------
    helper functions
    ----------------------------------------------------------------------------- */
    /// Return the non-missing elements of the input as f64 values,
    /// with TRUE as 1 and FALSE as 0.
    pub fn na_rm<T: RLike>(x: &[T]) -> Vec<f64> {
        x.iter().filter_map(|v| v.to_rvalue().as_f64()).collect()
    }
    /// Return all elements as f64 values, or None if any element is missing.
    fn all_f64<T: RLike>(x: &[T]) -> Option<Vec<f64>> {
        x.iter().map(|v| v.to_rvalue().as_f64()).collect()
    }

    /* -----------------------------------------------------------------------------
    sum
    ----------------------------------------------------------------------------- */
    /// Return the sum of all elements, with TRUE as 1 and FALSE as 0.
    ///
    /// If `na_rm` is false and any element is NA or NaN, the result is NaN.
    /// If `na_rm` is true, NA and NaN elements are removed before summing.
    /// The sum of an empty input is 0.
    ///
    /// ```
    /// use rvec::rlike::types::Agg;
    /// assert_eq!(Agg::sum(&[1.0, 2.0, 3.0, 4.0, 5.0], false), 15.0);
    /// assert_eq!(Agg::sum(&[true, false, true], false), 2.0);
    /// assert!(Agg::sum(&[1.0, 2.0, f64::NAN, 4.0, 5.0], false).is_nan());
    /// assert_eq!(Agg::sum(&[1.0, 2.0, f64::NAN, 4.0, 5.0], true), 12.0);
    /// ```
    pub fn sum<T: RLike>(x: &[T], na_rm: bool) -> f64 {
        Self::sum_counted(x, na_rm).sum
    }
    /// Return the sum of all elements together with the number of elements
    /// that contributed to it.
    ///
    /// If `na_rm` is false, scanning stops at the first missing element and
    /// the result is `SumCount { sum: NaN, count }`, where count is the number
    /// of elements added before it. If `na_rm` is true, count is the number of
    /// non-missing elements.
    pub fn sum_counted<T: RLike>(x: &[T], na_rm: bool) -> SumCount {
        if na_rm {
            fold_unrolled::<f64, UNROLL>(&Self::na_rm(x))
        } else {
            fold_unrolled::<T, UNROLL>(x)
        }
    }

    /* -----------------------------------------------------------------------------
    mean
    ----------------------------------------------------------------------------- */
    /// Return the arithmetic mean of all elements, with TRUE as 1 and FALSE as 0.
    ///
    /// `trim` is the fraction (0 to 0.5) of elements dropped from each end of
    /// the sorted values before the mean is computed, i.e., `floor(n * trim)`
    /// elements from each end. A trim value outside [0, 0.5] is an error.
    ///
    /// If `na_rm` is false and any element is NA or NaN, the result is NaN.
    /// If no elements remain after NA removal and trimming, the result is NaN.
    ///
    /// ```
    /// use rvec::rlike::types::Agg;
    /// assert_eq!(Agg::mean(&[1.0, 2.0, 3.0, 4.0, 50.0], 0.2, false).unwrap(), 3.0);
    /// assert!(Agg::mean(&[1.0, 2.0], 0.5, false).unwrap().is_nan());
    /// assert!(Agg::mean(&[1.0, 2.0, 3.0], 0.6, false).is_err());
    /// ```
    pub fn mean<T: RLike>(x: &[T], trim: f64, na_rm: bool) -> Result<f64, RError> {
        Self::check_trim(trim)?;
        let values = if na_rm {
            Self::na_rm(x)
        } else {
            match Self::all_f64(x) {
                Some(values) => values,
                None => return Ok(f64::NAN),
            }
        };
        Ok(Self::trimmed_mean(values, trim))
    }
    /// Return an InvalidArgument error unless `trim` is a number in [0, 0.5].
    pub fn check_trim(trim: f64) -> Result<(), RError> {
        if (0.0..=0.5).contains(&trim) {
            Ok(())
        } else {
            Err(RError::invalid_argument("'trim' must be a number between 0 and 0.5"))
        }
    }
    /// Return the untrimmed mean of all elements without NA removal,
    /// i.e., `mean(x)` in R with default arguments.
    pub fn mean_default<T: RLike>(x: &[T]) -> f64 {
        match Self::all_f64(x) {
            Some(values) => Self::trimmed_mean(values, 0.0),
            None => f64::NAN,
        }
    }
    // trim is already validated and values have no missing elements
    fn trimmed_mean(mut values: Vec<f64>, trim: f64) -> f64 {
        let n = values.len();
        let kept: &[f64] = if trim > 0.0 {
            values.sort_unstable_by(f64::total_cmp);
            let lo = (n as f64 * trim).floor() as usize; // <= n / 2 since trim <= 0.5
            &values[lo..n - lo]
        } else {
            &values
        };
        if kept.is_empty() {
            return f64::NAN;
        }
        Self::sum(kept, false) / kept.len() as f64
    }

    /* -----------------------------------------------------------------------------
    any
    ----------------------------------------------------------------------------- */
    /// Return whether any element is TRUE, with non-zero numbers coerced to TRUE.
    ///
    /// The result is Some(true) if at least one element is TRUE, even when NA
    /// elements are present. Otherwise, the result is None (NA) if `na_rm` is
    /// false and at least one element is NA, and Some(false) in all other cases,
    /// including an empty input.
    pub fn any<T: RLike>(x: &[T], na_rm: bool) -> RLogical {
        let mut has_na = false;
        for v in x {
            match v.to_rvalue().as_bool() {
                Some(true)  => return Some(true),
                Some(false) => {},
                None        => has_na = true,
            }
        }
        if has_na && !na_rm { None } else { Some(false) }
    }
}
