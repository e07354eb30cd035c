//! Experiment stream reader
//!
//! Groups a line stream into experiments. Each non-blank line is one record;
//! a blank line or the end of input closes the current experiment. Only one
//! experiment is held in memory at a time.

use crate::domain::record::{Experiment, RecordError, TestRecord, UnknownStatePolicy};
use std::io::{self, BufRead, Lines};
use thiserror::Error;

/// Errors raised while reading an experiment stream
#[derive(Debug, Error)]
pub enum ReadError {
    /// Underlying reader failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// A record could not be parsed
    #[error("line {line}: {source}")]
    Record {
        /// 1-based line number
        line: usize,
        #[source]
        source: RecordError,
    },
}

/// Lazy iterator over the experiments of a record stream
///
/// Iteration stops after the first error.
pub struct ExperimentReader<R> {
    lines: Lines<R>,
    policy: UnknownStatePolicy,
    line_number: usize,
    skipped_records: usize,
    finished: bool,
}

impl<R: BufRead> ExperimentReader<R> {
    /// Create a reader that skips records with unknown state tokens
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            policy: UnknownStatePolicy::default(),
            line_number: 0,
            skipped_records: 0,
            finished: false,
        }
    }

    /// Set the unknown state policy
    pub fn with_policy(mut self, policy: UnknownStatePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Number of lines consumed so far
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Number of records dropped for an unknown state token
    pub fn skipped_records(&self) -> usize {
        self.skipped_records
    }
}

impl<R: BufRead> Iterator for ExperimentReader<R> {
    type Item = Result<Experiment, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let mut experiment = Experiment::new();
        let mut has_lines = false;

        loop {
            let line = match self.lines.next() {
                Some(Ok(line)) => line,
                Some(Err(e)) => {
                    self.finished = true;
                    return Some(Err(e.into()));
                }
                None => {
                    self.finished = true;
                    return has_lines.then_some(Ok(experiment));
                }
            };
            self.line_number += 1;

            let line = line.trim();
            if line.is_empty() {
                if has_lines {
                    return Some(Ok(experiment));
                }
                continue;
            }
            has_lines = true;

            match TestRecord::parse_line(line, self.policy) {
                Ok(Some(record)) => experiment.push(record),
                Ok(None) => self.skipped_records += 1,
                Err(source) => {
                    self.finished = true;
                    return Some(Err(ReadError::Record {
                        line: self.line_number,
                        source,
                    }));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::CallState;
    use std::io::Cursor;

    fn read_all(input: &str) -> Vec<Experiment> {
        ExperimentReader::new(Cursor::new(input))
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    #[test]
    fn test_blank_lines_separate_experiments() {
        let experiments = read_all("NORM,0,1\nMUT,1,2\n\nMUT,3\n");
        assert_eq!(experiments.len(), 2);
        assert_eq!(experiments[0].len(), 2);
        assert_eq!(experiments[1], vec![TestRecord::mutant(["3"])]);
    }

    #[test]
    fn test_final_experiment_without_trailing_blank() {
        let experiments = read_all("NORM,1\n\nNORM,2");
        assert_eq!(experiments.len(), 2);
        assert_eq!(experiments[1][0].state(), CallState::Normal);
    }

    #[test]
    fn test_repeated_blank_lines_yield_no_empty_experiments() {
        let experiments = read_all("\n\nNORM,1\n\n\n  \nNORM,2\n\n\n");
        assert_eq!(experiments.len(), 2);
    }

    #[test]
    fn test_empty_input() {
        assert!(read_all("").is_empty());
        assert!(read_all("\n\n").is_empty());
    }

    #[test]
    fn test_crlf_line_endings() {
        let experiments = read_all("NORM,1,2\r\n\r\nMUT,3\r\n");
        assert_eq!(experiments.len(), 2);
        assert_eq!(experiments[0][0].samples()[1].as_str(), "2");
    }

    #[test]
    fn test_unknown_state_skipped_and_counted() {
        let mut reader = ExperimentReader::new(Cursor::new("HET,1\nNORM,2\n\nXX,3\n"));

        let first = reader.next().unwrap().unwrap();
        assert_eq!(first, vec![TestRecord::normal(["2"])]);

        // a group of only skipped records is still an experiment
        let second = reader.next().unwrap().unwrap();
        assert!(second.is_empty());

        assert!(reader.next().is_none());
        assert_eq!(reader.skipped_records(), 2);
        assert_eq!(reader.line_number(), 4);
    }

    #[test]
    fn test_empty_state_field_skipped_between_records() {
        let mut reader = ExperimentReader::new(Cursor::new("NORM,1\n\n,9\nNORM,2\n"));

        assert_eq!(reader.next().unwrap().unwrap(), vec![TestRecord::normal(["1"])]);
        assert_eq!(reader.next().unwrap().unwrap(), vec![TestRecord::normal(["2"])]);
        assert!(reader.next().is_none());
        assert_eq!(reader.skipped_records(), 1);
    }

    #[test]
    fn test_padded_state_token_skipped() {
        let mut reader = ExperimentReader::new(Cursor::new("NORM,1\n MUT ,1, 2\n"));

        assert_eq!(reader.next().unwrap().unwrap(), vec![TestRecord::normal(["1"])]);
        assert_eq!(reader.skipped_records(), 1);
    }

    #[test]
    fn test_unknown_state_rejected_with_line_number() {
        let mut reader = ExperimentReader::new(Cursor::new("NORM,1\n\nNORM,2\nHET,3\n"))
            .with_policy(UnknownStatePolicy::Reject);

        assert!(reader.next().unwrap().is_ok());
        match reader.next() {
            Some(Err(ReadError::Record { line, source })) => {
                assert_eq!(line, 4);
                assert_eq!(source, RecordError::UnknownState("HET".to_string()));
            }
            other => panic!("expected record error, got {:?}", other),
        }
        assert!(reader.next().is_none());
    }
}
