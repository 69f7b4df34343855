//! `rlike` provides vector functions that follow R's semantics for
//! heterogeneous elements and missing (NA) values.
//!
//! The primary structure of interest in `rlike` is `types::Agg`, whose
//! `sum()`, `mean()` and `any()` functions accept slices of numbers,
//! logicals, their Option-wrapped forms, or tagged `RValue` elements.

pub mod types;
