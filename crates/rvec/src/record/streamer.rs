//! RecordStreamer supports R-like aggregation in Unix pipes by providing
//! a structure to reduce keyed groups of tabular records in data streams.
//! Data are read from STDIN and written to STDOUT, or from/to any reader
//! and writer using `group_by_io()`.
//!
//! # Usage Overview
//!
//! Create a new RecordStreamer instance with default settings using
//! `RecordStreamer::new()`.
//!
//! Input records are handled in groups of consecutive records that share the
//! same value in one or more grouping fields, i.e., input is expected to be
//! sorted by those fields. Each group is passed to a `record_parser` closure
//! that returns zero, one or many output records replacing the input group.
//!
//! Group parsing can be done either:
//! - serially (the default), or
//! - in parallel by calling `parallelize(n_cpu, buffer_size)`, which buffers
//!   `buffer_size` groups at a time and parses them on `n_cpu` threads
//! Output records are always written in the same order as the input groups.
//!
//! Input and output records are assumed to be:
//! - without headers, unless `has_headers()` is called on the RecordStreamer
//! - tab-delimited, unless `delimiter(b'<delimiter>')` is called on the RecordStreamer
//! - of a fixed number of columns, unless `flexible()` is called on the RecordStreamer
//!
//! Fields in input records will be trimmed of leading and trailing whitespace
//! unless `no_trim()` is called on the RecordStreamer.
//!
//! # Errors
//!
//! Deserialization, grouping, parsing and writing failures stop the stream
//! and are returned as `RError::Stream` carrying the input line at or near
//! which the failure occurred.

// dependencies
use std::io::{self, Read, Write};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::{de::DeserializeOwned, Serialize};
use crate::error::RError;

// constants
const DESERIALIZING: &str = "deserializing";
const GROUPING:      &str = "getting grouping key";
const PROCESSING:    &str = "processing";
const WRITING:       &str = "writing";

/// Tallies of the work done by one call to `group_by()`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamSummary {
    pub n_records: usize,
    pub n_groups:  usize,
    pub n_output:  usize,
}

// a group of input records with the line number of its first record
struct RecordGroup<I> {
    first_line: usize,
    records:    Vec<I>,
}

/// Initialize a record streamer.
pub struct RecordStreamer {
    has_headers: bool,
    delimiter:   u8,
    trim:        csv::Trim,
    flexible:    bool,
    n_cpu:       Option<usize>,
    buffer_size: usize,
}
impl Default for RecordStreamer {
    fn default() -> RecordStreamer {
        RecordStreamer {
            has_headers: false,
            delimiter:   b'\t',
            trim:        csv::Trim::Fields,
            flexible:    false,
            n_cpu:       None,
            buffer_size: 1,
        }
    }
}
impl RecordStreamer {
    /// Create a new RecordStreamer instance with default settings.
    pub fn new() -> RecordStreamer {
        RecordStreamer::default()
    }

    /// Set the csv has_headers option to true for the input and output streams.
    pub fn has_headers(&mut self) -> &mut Self {
        self.has_headers = true;
        self
    }

    /// Set the csv delimiter for the input and output streams if not tab-delimited.
    pub fn delimiter(&mut self, delimiter: u8) -> &mut Self {
        self.delimiter = delimiter;
        self
    }

    /// Disable whitespace trimming of input fields.
    pub fn no_trim(&mut self) -> &mut Self {
        self.trim = csv::Trim::None;
        self
    }

    /// Allow records with a variable number of fields.
    pub fn flexible(&mut self) -> &mut Self {
        self.flexible = true;
        self
    }

    /// Set the options to process record groups in parallel.
    ///
    /// Parameter `n_cpu` specifies the number of threads used for parsing.
    /// Parameter `buffer_size` specifies the number of groups parsed per parallel batch.
    pub fn parallelize(&mut self, n_cpu: usize, buffer_size: usize) -> &mut Self {
        self.n_cpu = Some(n_cpu.max(1));
        self.buffer_size = buffer_size.max(1);
        self
    }

    /// Stream keyed groups of records from STDIN to STDOUT.
    pub fn group_by<I, O, F>(
        &self,
        record_parser: F,
        grouping_fields: &[&str],
    ) -> Result<StreamSummary, RError>
    where
        I: DeserializeOwned + Serialize + Send + Sync,
        O: Serialize + Send,
        F: Fn(&[I]) -> Result<Vec<O>, RError> + Send + Sync,
    {
        self.group_by_io(io::stdin().lock(), io::stdout().lock(), record_parser, grouping_fields)
    }

    /// Stream keyed groups of records from `reader` to `writer`.
    ///
    /// Consecutive records with the same composite key in `grouping_fields`
    /// are passed together to `record_parser`, whose output records are
    /// written in input order.
    pub fn group_by_io<R, W, I, O, F>(
        &self,
        reader: R,
        writer: W,
        record_parser: F,
        grouping_fields: &[&str],
    ) -> Result<StreamSummary, RError>
    where
        R: Read,
        W: Write,
        I: DeserializeOwned + Serialize + Send + Sync,
        O: Serialize + Send,
        F: Fn(&[I]) -> Result<Vec<O>, RError> + Send + Sync,
    {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(self.has_headers)
            .delimiter(self.delimiter)
            .trim(self.trim)
            .flexible(self.flexible)
            .from_reader(reader);
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(self.has_headers)
            .delimiter(self.delimiter)
            .flexible(self.flexible)
            .from_writer(writer);
        let pool = self.init_pool()?;
        let header_lines = usize::from(self.has_headers);

        let mut summary = StreamSummary::default();
        let mut group_buffer: Vec<RecordGroup<I>> = Vec::new();
        let mut group = RecordGroup { first_line: 1, records: Vec::new() };
        let mut previous_key: Option<String> = None;
        for (i0, line) in rdr.deserialize().enumerate() {
            let i1 = i0 + 1 + header_lines;
            let record: I = line.map_err(|e| line_error(DESERIALIZING, Some(i1), e))?;
            let this_key = get_composite_key(&record, grouping_fields)
                .map_err(|e| line_error(GROUPING, Some(i1), e))?;
            if previous_key.as_ref().is_some_and(|k| k != &this_key) {
                group_buffer.push(std::mem::replace(&mut group, RecordGroup { first_line: i1, records: Vec::new() }));
                if group_buffer.len() >= self.buffer_size {
                    self.do_group_buffer(&mut wtr, &mut group_buffer, &record_parser, pool.as_ref(), &mut summary)?;
                }
            }
            if group.records.is_empty() {
                group.first_line = i1;
            }
            previous_key = Some(this_key);
            group.records.push(record);
            summary.n_records += 1;
        }
        if !group.records.is_empty() {
            group_buffer.push(group);
        }
        self.do_group_buffer(&mut wtr, &mut group_buffer, &record_parser, pool.as_ref(), &mut summary)?;
        wtr.flush().map_err(|e| line_error("flushing final output", None, e))?;
        Ok(summary)
    }

    /*  ------------------------------------------------------------------
    private stream and record methods
    ------------------------------------------------------------------ */

    // build a thread pool for parallel parsing, if requested
    // a local pool is used so that repeated streams in one process do not conflict
    fn init_pool(&self) -> Result<Option<ThreadPool>, RError> {
        match self.n_cpu {
            Some(n_cpu) => ThreadPoolBuilder::new()
                .num_threads(n_cpu)
                .build()
                .map(Some)
                .map_err(|e| line_error("initializing parallel processing", None, e)),
            None => Ok(None),
        }
    }

    // parse a buffer of record groups, serially or in parallel, and write
    // the output records in input order; the buffer is empty on success
    fn do_group_buffer<W, I, O, F>(
        &self,
        wtr: &mut csv::Writer<W>,
        group_buffer: &mut Vec<RecordGroup<I>>,
        record_parser: &F,
        pool: Option<&ThreadPool>,
        summary: &mut StreamSummary,
    ) -> Result<(), RError>
    where
        W: Write,
        I: Send + Sync,
        O: Serialize + Send,
        F: Fn(&[I]) -> Result<Vec<O>, RError> + Send + Sync,
    {
        let results: Vec<Result<Vec<O>, RError>> = match pool {
            Some(pool) => pool.install(|| {
                group_buffer
                    .par_iter()
                    .map(|group| record_parser(&group.records))
                    .collect()
            }),
            None => group_buffer
                .iter()
                .map(|group| record_parser(&group.records))
                .collect(),
        };
        for (group, result) in group_buffer.iter().zip(results) {
            let output_records = result.map_err(|e| line_error(PROCESSING, Some(group.first_line), e))?;
            for output_record in output_records {
                wtr.serialize(output_record)
                    .map_err(|e| line_error(WRITING, Some(group.first_line), e))?;
                summary.n_output += 1;
            }
            summary.n_groups += 1;
        }
        group_buffer.clear();
        Ok(())
    }
}

/*  ------------------------------------------------------------------
grouping methods for keyed batch processing
------------------------------------------------------------------ */
// define a composite key for grouping based on potentially multiple fields
fn get_composite_key<T: Serialize>(record: &T, grouping_fields: &[&str]) -> Result<String, String> {
    let value = serde_json::to_value(record).map_err(|e| e.to_string())?;
    let keys = grouping_fields
        .iter()
        .map(|&grouping_field| match value.get(grouping_field) {
            Some(v) => Ok(v.to_string().trim_matches('"').to_string()),
            None => Err(format!("field '{}' not found in record", grouping_field)),
        })
        .collect::<Result<Vec<String>, String>>()?;
    Ok(keys.join("__"))
}

// format a handling error on a data line
fn line_error<E: std::fmt::Display>(doing: &str, i1: Option<usize>, e: E) -> RError {
    RError::stream(i1, format!("failed while {}: {}", doing, e))
}
