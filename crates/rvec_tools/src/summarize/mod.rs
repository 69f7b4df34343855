//! Summarize the values of each group of records with an R-like reduction.
//!
//! The tool is called as `rvec_tools <sum|mean|any>` and reads headerless,
//! tab-delimited `group<TAB>value` records from STDIN, sorted by group. One
//! `group<TAB>n<TAB>result` record is written to STDOUT per group, where `n`
//! is the number of input records in the group.
//!
//! Values may be numbers, `TRUE`/`FALSE`, `Inf`/`-Inf` or a missing value
//! (`NA`, `NaN`, `null` or an empty field). Undefined results are written
//! as `NA` and logical results as `TRUE`/`FALSE`.
//!
//! Options are taken from environment variables:
//! - `NA_RM`: remove missing values before reducing (default false)
//! - `TRIM`: fraction trimmed from each end by `mean` (default 0)
//! - `STRICT`: fail on unparseable values instead of treating them as NA (default true)
//! - `N_CPU`: threads used to reduce groups, parallel when >1 (default 1)
//! - `BUFFER_SIZE`: groups per parallel batch (default 1000)

// modules
mod reduction;

// dependencies
use std::error::Error;
use std::io::{self, Read, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use serde::{Deserialize, Serialize};
use rvec::pub_key_constants;
use rvec::rlike::types::parse_values;
use rvec::workflow::{Config, Counters, Workflow, COUNTER_SEPARATOR};
use rvec::{RError, RecordStreamer, StreamSummary};
pub use reduction::{Reduction, ResultKind, Settings};

// constants for environment variable and counter keys
pub_key_constants!(
    // from environment variables
    NA_RM
    TRIM
    STRICT
    N_CPU
    BUFFER_SIZE
    // counter keys
    N_RECORDS
    N_GROUPS
    N_OUTPUT
    N_UNDEFINED
    N_BY_RESULT
);
const GROUPING_FIELD: &str = "group";

// structures
#[derive(Serialize, Deserialize)]
struct InputRecord {
    group: String,
    value: String,
}
#[derive(Serialize, Deserialize)]
struct OutputRecord {
    group:  String,
    n:      usize,
    result: String,
}

// per-kind result tallies, shared by group parsers running in parallel
#[derive(Default)]
struct ResultTallies([AtomicUsize; 4]);
impl ResultTallies {
    fn increment(&self, kind: ResultKind) {
        self.0[kind as usize].fetch_add(1, Ordering::Relaxed);
    }
    fn get(&self, kind: ResultKind) -> usize {
        self.0[kind as usize].load(Ordering::Relaxed)
    }
}

// main function called by rvec_tools main()
pub fn stream(reduction: Reduction) -> Result<(), Box<dyn Error>> {

    // get config from environment variables
    let mut cfg = Config::new();
    cfg.set_bool_env_or(NA_RM, false);
    cfg.set_f64_env_or(TRIM, 0.0);
    cfg.set_bool_env_or(STRICT, true);
    cfg.set_usize_env_or(N_CPU, 1);
    cfg.set_usize_env_or(BUFFER_SIZE, 1000);

    // initialize counters
    let mut ctrs = Counters::new(reduction.tool(), &[
        (N_RECORDS,   "input records read"),
        (N_GROUPS,    "record groups reduced"),
        (N_OUTPUT,    "output records written"),
        (COUNTER_SEPARATOR, ""),
        (N_UNDEFINED, "groups with an undefined (NA) result"),
    ]);
    ctrs.add_keyed_counters(&[
        (N_BY_RESULT, "groups by result kind"),
    ]);

    // initialize the tool
    let mut w = Workflow::new(reduction.tool(), cfg, ctrs);
    w.log.initializing();
    w.log.options(&[
        (NA_RM,       w.cfg.get_bool(NA_RM).to_string()),
        (TRIM,        w.cfg.get_f64(TRIM).to_string()),
        (STRICT,      w.cfg.get_bool(STRICT).to_string()),
        (N_CPU,       w.cfg.get_usize(N_CPU).to_string()),
        (BUFFER_SIZE, w.cfg.get_usize(BUFFER_SIZE).to_string()),
    ]);
    let settings = Settings {
        na_rm:  w.cfg.get_bool(NA_RM),
        trim:   w.cfg.get_f64(TRIM),
        strict: w.cfg.get_bool(STRICT),
    };
    reduction.validate(&settings)?;

    // process record groups in a stream
    w.log.print("reducing streamed record groups");
    let mut rs = RecordStreamer::new();
    if w.cfg.get_usize(N_CPU) > 1 {
        rs.parallelize(w.cfg.get_usize(N_CPU), w.cfg.get_usize(BUFFER_SIZE));
    }
    let tallies = ResultTallies::default();
    let summary = summarize(&rs, reduction, &settings, &tallies, io::stdin().lock(), io::stdout().lock())?;

    // report counter values
    w.ctrs.add_to(N_RECORDS, summary.n_records);
    w.ctrs.add_to(N_GROUPS,  summary.n_groups);
    w.ctrs.add_to(N_OUTPUT,  summary.n_output);
    w.ctrs.add_to(N_UNDEFINED, tallies.get(ResultKind::NA));
    for kind in ResultKind::ALL {
        let n = tallies.get(kind);
        if n > 0 {
            w.ctrs.add_to_keyed(N_BY_RESULT, kind.as_str(), n);
        }
    }
    w.log.print("done");
    w.ctrs.print_all();
    Ok(())
}

// stream all record groups from reader to writer
fn summarize<R: Read, W: Write>(
    rs:        &RecordStreamer,
    reduction: Reduction,
    settings:  &Settings,
    tallies:   &ResultTallies,
    reader:    R,
    writer:    W,
) -> Result<StreamSummary, RError> {
    rs.group_by_io(
        reader,
        writer,
        |records: &[InputRecord]| group_parser(records, reduction, settings, tallies),
        &[GROUPING_FIELD],
    )
}

// reduce the values of one group of records to a single output record
fn group_parser(
    records:   &[InputRecord],
    reduction: Reduction,
    settings:  &Settings,
    tallies:   &ResultTallies,
) -> Result<Vec<OutputRecord>, RError> {
    let fields: Vec<&str> = records.iter().map(|record| record.value.as_str()).collect();
    let values = parse_values(&fields, settings.strict)?;
    let (result, kind) = reduction.reduce(&values, settings)?;
    tallies.increment(kind);
    Ok(vec![OutputRecord {
        group: records[0].group.clone(),
        n:     records.len(),
        result,
    }])
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULTS: Settings = Settings { na_rm: false, trim: 0.0, strict: true };

    fn run(rs: &RecordStreamer, reduction: Reduction, settings: &Settings, input: &str) -> (String, ResultTallies) {
        let tallies = ResultTallies::default();
        let mut output = Vec::new();
        summarize(rs, reduction, settings, &tallies, input.as_bytes(), &mut output).unwrap();
        (String::from_utf8(output).unwrap(), tallies)
    }

    const VALUES: &str = "\
x\t1
x\t2
x\tNA
y\tTRUE
y\tFALSE
y\t5
z\t
";

    #[test]
    fn sum_by_group() {
        let (output, tallies) = run(&RecordStreamer::new(), Reduction::Sum, &DEFAULTS, VALUES);
        assert_eq!(output, "x\t3\tNA\ny\t3\t6\nz\t1\tNA\n");
        assert_eq!(tallies.get(ResultKind::NA), 2);
        assert_eq!(tallies.get(ResultKind::Numeric), 1);
    }

    #[test]
    fn mean_by_group_with_na_rm() {
        let settings = Settings { na_rm: true, ..DEFAULTS };
        let (output, tallies) = run(&RecordStreamer::new(), Reduction::Mean, &settings, VALUES);
        assert_eq!(output, "x\t3\t1.5\ny\t3\t2\nz\t1\tNA\n");
        assert_eq!(tallies.get(ResultKind::NA), 1);
    }

    #[test]
    fn any_by_group() {
        let (output, tallies) = run(&RecordStreamer::new(), Reduction::Any, &DEFAULTS, VALUES);
        assert_eq!(output, "x\t3\tTRUE\ny\t3\tTRUE\nz\t1\tNA\n");
        assert_eq!(tallies.get(ResultKind::True), 2);
        assert_eq!(tallies.get(ResultKind::False), 0);
    }

    #[test]
    fn parallel_output_matches_serial() {
        let input: String = (0..500)
            .flat_map(|i| (0..(i % 4 + 1)).map(move |j| format!("g{:03}\t{}\n", i, i * j)))
            .collect();
        let (serial, _) = run(&RecordStreamer::new(), Reduction::Mean, &DEFAULTS, &input);
        let (parallel, tallies) = run(RecordStreamer::new().parallelize(3, 7), Reduction::Mean, &DEFAULTS, &input);
        assert_eq!(serial, parallel);
        assert_eq!(tallies.get(ResultKind::Numeric), 500);
    }

    #[test]
    fn strict_parsing_fails_on_text() {
        let tallies = ResultTallies::default();
        let mut output = Vec::new();
        let err = summarize(&RecordStreamer::new(), Reduction::Sum, &DEFAULTS, &tallies, "x\tabc\n".as_bytes(), &mut output)
            .unwrap_err();
        assert!(matches!(err, RError::Stream { line: Some(1), .. }));

        let lenient = Settings { strict: false, na_rm: true, ..DEFAULTS };
        let (output, _) = run(&RecordStreamer::new(), Reduction::Sum, &lenient, "x\tabc\nx\t4\n");
        assert_eq!(output, "x\t2\t4\n");
    }
}
