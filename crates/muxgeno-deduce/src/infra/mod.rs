//! Infrastructure layer - Record stream I/O
//!
//! This module handles reading experiment streams and writing reports.

pub mod experiment_reader;
pub mod report_writer;
