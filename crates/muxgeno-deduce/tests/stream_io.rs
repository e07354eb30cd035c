//! End-to-end stream tests over files

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};

use muxgeno_deduce::{
    ExperimentReader, ResolveOptions, RunSummary, UnknownStatePolicy, resolve_stream,
};
use tempfile::TempDir;

const REFERENCE_INPUT: &str = "\
NORM,0,1
NORM,1,2
NORM,0,2

NORM,100,110
MUT,110,12

NORM,0,1
MUT,1,2
NORM,1,3
NORM,2,3

MUT,0,1
MUT,1,2
";

const REFERENCE_OUTPUT: &str = "\
MUT COUNT: 0
NORM COUNT: 3
0,NORM
1,NORM
2,NORM

MUT COUNT: 1
NORM COUNT: 2
12,MUT
100,NORM
110,NORM

INCONSISTENT

NONUNIQUE

";

fn resolve_file(input: &str, options: ResolveOptions) -> (String, RunSummary) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let input_path = dir.path().join("pools.csv");
    let output_path = dir.path().join("calls.txt");
    fs::write(&input_path, input).unwrap();

    let reader = BufReader::new(File::open(&input_path).unwrap());
    let mut writer = BufWriter::new(File::create(&output_path).unwrap());
    let summary = resolve_stream(reader, &mut writer, options).unwrap();
    drop(writer);

    (fs::read_to_string(&output_path).unwrap(), summary)
}

#[test]
fn test_reference_file() {
    let (output, summary) = resolve_file(REFERENCE_INPUT, ResolveOptions::default());

    assert_eq!(output, REFERENCE_OUTPUT);
    assert_eq!(summary.experiments, 4);
    assert_eq!(summary.resolved, 2);
    assert_eq!(summary.inconsistent, 1);
    assert_eq!(summary.nonunique, 1);
}

#[test]
fn test_reference_file_parallel() {
    let options = ResolveOptions::default().with_parallel(true);
    let (output, _) = resolve_file(REFERENCE_INPUT, options);
    assert_eq!(output, REFERENCE_OUTPUT);
}

#[test]
fn test_unknown_state_dropped_from_universe() {
    // without skipping, sample 9 would be unresolved
    let (output, summary) = resolve_file("NORM,1\nMUT,1,2\nUNK,9\n", ResolveOptions::default());

    assert_eq!(output, "MUT COUNT: 1\nNORM COUNT: 1\n1,NORM\n2,MUT\n\n");
    assert_eq!(summary.skipped_records, 1);
}

#[test]
fn test_reader_counts_experiments_lazily() {
    let mut reader = ExperimentReader::new(REFERENCE_INPUT.as_bytes())
        .with_policy(UnknownStatePolicy::Reject);

    assert_eq!(reader.next().unwrap().unwrap().len(), 3);
    assert_eq!(reader.line_number(), 4);
    assert_eq!(reader.by_ref().count(), 3);
}
