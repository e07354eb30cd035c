//! muxgeno-deduce - Genotype deduction for multiplexed pooled-testing experiments
//!
//! This crate provides functionality to:
//! - Parse pooled test records (`MUT` / `NORM` calls over sets of samples)
//! - Group a record stream into independent experiments
//! - Resolve each experiment into uniquely-mutant and normal samples
//! - Render resolutions in the line-based report format

pub mod constants;
pub mod domain;
pub mod infra;
pub mod app;

// Re-export commonly used types
pub use app::resolver::{
    ResolveError, ResolveOptions, RunSummary, resolve_experiments, resolve_stream,
};
pub use domain::deduction::process_experiment;
pub use domain::record::{CallState, Experiment, RecordError, TestRecord, UnknownStatePolicy};
pub use domain::resolution::{FailureReason, Resolution};
pub use domain::sample::{SampleId, SampleSet};
pub use infra::experiment_reader::{ExperimentReader, ReadError};
pub use infra::report_writer::{ReportBlock, format_resolution, write_resolution};
