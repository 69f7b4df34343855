// modules
pub mod error;    // error type shared by all modules
pub mod workflow; // support for MDI-style workflows, environment variables, etc.
pub mod rlike;    // R-like vector reductions with NA semantics
pub mod record;   // helpers for streaming data in Unix pipes

// re-exports
pub use error::RError;
pub use rlike::types::{Agg, RLike, RValue, SumCount};
pub use record::streamer::{RecordStreamer, StreamSummary};
