/* -----------------------------------------------------------------------------
Summation folds over RLike element sequences
----------------------------------------------------------------------------- */

// dependencies
use super::RLike;

/// Number of elements accumulated per unrolled block in `Agg::sum()`.
pub(crate) const UNROLL: usize = 5;

/// The SumCount struct carries a sum together with the number of elements
/// that contributed to it.
///
/// When a missing value poisons a sum, `sum` is NaN and `count` is the number
/// of elements that had been added before the missing value was reached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SumCount {
    pub sum:   f64,
    pub count: usize,
}
impl SumCount {
    const EMPTY: SumCount = SumCount { sum: 0.0, count: 0 };
}

// add one element to a running sum; return false if the element is missing
#[inline(always)]
fn accumulate<T: RLike>(v: T, acc: &mut SumCount) -> bool {
    match v.to_rvalue().as_f64() {
        Some(v) => {
            acc.sum += v;
            acc.count += 1;
            true
        },
        None => false,
    }
}

/// Sum a sequence one element at a time, stopping at the first missing value.
#[cfg(test)]
pub(crate) fn fold_naive<T: RLike>(x: &[T]) -> SumCount {
    let mut acc = SumCount::EMPTY;
    for &v in x {
        if !accumulate(v, &mut acc) {
            return SumCount { sum: f64::NAN, count: acc.count };
        }
    }
    acc
}

/// Sum a sequence in fixed blocks of N elements, stopping at the first missing value.
///
/// Block length N is a compile-time constant, so the inner loop is unrolled
/// by the compiler. Elements are still added strictly left to right into a
/// single accumulator, so results are bit-identical to `fold_naive()`.
pub(crate) fn fold_unrolled<T: RLike, const N: usize>(x: &[T]) -> SumCount {
    let mut acc = SumCount::EMPTY;
    let (blocks, tail) = x.as_chunks::<N>();
    for block in blocks {
        for &v in block {
            if !accumulate(v, &mut acc) {
                return SumCount { sum: f64::NAN, count: acc.count };
            }
        }
    }
    for &v in tail {
        if !accumulate(v, &mut acc) {
            return SumCount { sum: f64::NAN, count: acc.count };
        }
    }
    acc
}
