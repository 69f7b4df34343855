//! Tests for grouped record streaming with R-like reductions.

use serde::{Deserialize, Serialize};

use rvec::rlike::types::{format_numeric, parse_values, Agg};
use rvec::{RError, RecordStreamer, StreamSummary};

#[derive(Serialize, Deserialize)]
struct InputRecord {
    group: String,
    value: String,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct OutputRecord {
    group: String,
    n:     usize,
    sum:   String,
}

fn sum_group(strict: bool, na_rm: bool) -> impl Fn(&[InputRecord]) -> Result<Vec<OutputRecord>, RError> + Send + Sync {
    move |records: &[InputRecord]| {
        let fields: Vec<&str> = records.iter().map(|r| r.value.as_str()).collect();
        let values = parse_values(&fields, strict)?;
        Ok(vec![OutputRecord {
            group: records[0].group.clone(),
            n:     records.len(),
            sum:   format_numeric(Agg::sum(&values, na_rm)),
        }])
    }
}

fn run(rs: &RecordStreamer, input: &str, strict: bool, na_rm: bool) -> Result<(String, StreamSummary), RError> {
    let mut output: Vec<u8> = Vec::new();
    let summary = rs.group_by_io(input.as_bytes(), &mut output, sum_group(strict, na_rm), &["group"])?;
    Ok((String::from_utf8(output).unwrap(), summary))
}

const INPUT: &str = "a\t1\na\t2\na\t3\nb\tNA\nb\t4\nc\tTRUE\nc\tTRUE\nc\t0.5\n";

#[test]
fn test_serial_group_sums() {
    let (output, summary) = run(&RecordStreamer::new(), INPUT, true, false).unwrap();
    assert_eq!(output, "a\t3\t6\nb\t2\tNA\nc\t3\t2.5\n");
    assert_eq!(summary, StreamSummary { n_records: 8, n_groups: 3, n_output: 3 });
}

#[test]
fn test_na_rm_group_sums() {
    let (output, _) = run(&RecordStreamer::new(), INPUT, true, true).unwrap();
    assert_eq!(output, "a\t3\t6\nb\t2\t4\nc\t3\t2.5\n");
}

#[test]
fn test_parallel_matches_serial() {
    let mut input = String::new();
    for g in 0..200 {
        for v in 0..(g % 7 + 1) {
            input.push_str(&format!("g{}\t{}\n", g, v * g));
        }
    }
    let (serial, serial_summary) = run(&RecordStreamer::new(), &input, true, false).unwrap();
    let (parallel, parallel_summary) = run(RecordStreamer::new().parallelize(4, 16), &input, true, false).unwrap();
    assert_eq!(serial, parallel);
    assert_eq!(serial_summary, parallel_summary);
    assert_eq!(parallel_summary.n_groups, 200);
}

#[test]
fn test_empty_input() {
    let (output, summary) = run(&RecordStreamer::new(), "", true, false).unwrap();
    assert_eq!(output, "");
    assert_eq!(summary, StreamSummary::default());
}

#[test]
fn test_strict_parse_error_reports_group_line() {
    let input = "a\t1\nb\t2\nb\toops\n";
    let err = run(&RecordStreamer::new(), input, true, false).unwrap_err();
    match err {
        RError::Stream { line, message } => {
            assert_eq!(line, Some(2));
            assert!(message.contains("'oops' is not numeric"), "{message}");
        },
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn test_lenient_parse_treats_text_as_na() {
    let input = "a\t1\na\toops\na\t2\n";
    let (output, _) = run(&RecordStreamer::new(), input, false, true).unwrap();
    assert_eq!(output, "a\t3\t3\n");
}

#[test]
fn test_headers_and_delimiter() {
    let input = "group,value\na,1\na,2\n";
    let mut rs = RecordStreamer::new();
    rs.has_headers().delimiter(b',');
    let (output, summary) = run(&rs, input, true, false).unwrap();
    assert_eq!(output, "group,n,sum\na,2,3\n");
    assert_eq!(summary.n_records, 2);
}

#[test]
fn test_malformed_record_is_an_error() {
    let input = "a\t1\na\n";
    let err = run(&RecordStreamer::new(), input, true, false).unwrap_err();
    assert!(matches!(err, RError::Stream { line: Some(2), .. }), "{err}");
}
