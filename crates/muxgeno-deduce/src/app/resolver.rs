//! Stream resolution workflow
//!
//! This module reads every experiment from an input stream, resolves it, and
//! writes its report block. Experiments share no state, so they can also be
//! resolved in parallel with rayon; reports are always written in input order.

use crate::domain::deduction::process_experiment;
use crate::domain::record::{Experiment, UnknownStatePolicy};
use crate::domain::resolution::{FailureReason, Resolution};
use crate::infra::experiment_reader::{ExperimentReader, ReadError};
use crate::infra::report_writer::write_resolution;
use rayon::prelude::*;
use std::io::{self, BufRead, Write};
use thiserror::Error;

/// Stream resolution errors
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Read(#[from] ReadError),
    #[error("failed to write report: {0}")]
    Write(#[source] io::Error),
}

/// Counts collected over one stream
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Experiments read
    pub experiments: usize,
    /// Experiments fully resolved
    pub resolved: usize,
    /// Experiments rejected as NONUNIQUE
    pub nonunique: usize,
    /// Experiments rejected as INCONSISTENT
    pub inconsistent: usize,
    /// Records dropped for an unknown state token
    pub skipped_records: usize,
}

impl RunSummary {
    fn record(&mut self, resolution: &Resolution) {
        self.experiments += 1;
        match resolution.failure() {
            None => self.resolved += 1,
            Some(FailureReason::NonUnique) => self.nonunique += 1,
            Some(FailureReason::Inconsistent) => self.inconsistent += 1,
        }
    }

    /// Experiments rejected for any reason
    pub fn rejected(&self) -> usize {
        self.nonunique + self.inconsistent
    }
}

/// Options for stream resolution
#[derive(Clone)]
pub struct ResolveOptions<F = fn(usize)> {
    /// Handling of records with an unknown state token
    pub policy: UnknownStatePolicy,
    /// Resolve experiments with rayon (reads the whole stream first)
    pub parallel: bool,
    /// Progress callback (experiments written so far)
    pub on_progress: Option<F>,
}

impl Default for ResolveOptions<fn(usize)> {
    fn default() -> Self {
        Self {
            policy: UnknownStatePolicy::default(),
            parallel: false,
            on_progress: None,
        }
    }
}

impl<F> ResolveOptions<F> {
    /// Set the unknown state policy
    pub fn with_policy(mut self, policy: UnknownStatePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Enable or disable parallel resolution
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the progress callback
    pub fn with_progress<G>(self, callback: G) -> ResolveOptions<G> {
        ResolveOptions {
            policy: self.policy,
            parallel: self.parallel,
            on_progress: Some(callback),
        }
    }
}

/// Resolve a batch of experiments in parallel
///
/// Results are in the same order as `experiments`.
pub fn resolve_experiments(experiments: &[Experiment]) -> Vec<Resolution> {
    experiments
        .par_iter()
        .map(|experiment| process_experiment(experiment))
        .collect()
}

/// Resolve every experiment of `input` and write the reports to `output`
///
/// Rejected experiments are reported in the output and counted in the
/// summary; only read, parse and write failures are errors. `output` is
/// flushed on every path, so reports written before a failure are kept.
pub fn resolve_stream<R, W, F>(
    input: R,
    output: &mut W,
    options: ResolveOptions<F>,
) -> Result<RunSummary, ResolveError>
where
    R: BufRead,
    W: Write,
    F: FnMut(usize),
{
    let ResolveOptions {
        policy,
        parallel,
        on_progress,
    } = options;

    let mut reader = ExperimentReader::new(input).with_policy(policy);
    let result = write_reports(&mut reader, output, parallel, on_progress);
    let flushed = output.flush().map_err(ResolveError::Write);

    let mut summary = result?;
    flushed?;
    summary.skipped_records = reader.skipped_records();
    Ok(summary)
}

fn write_reports<R, W, F>(
    reader: &mut ExperimentReader<R>,
    output: &mut W,
    parallel: bool,
    mut on_progress: Option<F>,
) -> Result<RunSummary, ResolveError>
where
    R: BufRead,
    W: Write,
    F: FnMut(usize),
{
    let mut summary = RunSummary::default();

    let mut emit = |resolution: &Resolution, summary: &mut RunSummary| -> io::Result<()> {
        write_resolution(output, resolution)?;
        summary.record(resolution);
        if let Some(ref mut callback) = on_progress {
            callback(summary.experiments);
        }
        Ok(())
    };

    if parallel {
        let experiments = reader.collect::<Result<Vec<_>, _>>()?;
        for resolution in resolve_experiments(&experiments) {
            emit(&resolution, &mut summary).map_err(ResolveError::Write)?;
        }
    } else {
        for experiment in reader {
            let resolution = process_experiment(&experiment?);
            emit(&resolution, &mut summary).map_err(ResolveError::Write)?;
        }
    }

    Ok(summary)
}
