//! Resolution report rendering
//!
//! Block layout per experiment:
//!
//! ```text
//! MUT COUNT: 1
//! NORM COUNT: 2
//! 12,MUT
//! 100,NORM
//! 110,NORM
//!
//! ```
//!
//! A rejected experiment is its reason token (`NONUNIQUE` / `INCONSISTENT`)
//! followed by the blank line.

use crate::constants::{FIELD_DELIMITER, MUT_COUNT_LABEL, NORM_COUNT_LABEL};
use crate::domain::resolution::Resolution;
use std::fmt;
use std::io::{self, Write};

/// One experiment's report block, including its terminating blank line
pub struct ReportBlock<'a>(pub &'a Resolution);

impl fmt::Display for ReportBlock<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let resolution = self.0;
        if let Some(reason) = resolution.failure() {
            writeln!(f, "{}", reason)?;
        } else {
            writeln!(f, "{}: {}", MUT_COUNT_LABEL, resolution.mutant_count())?;
            writeln!(f, "{}: {}", NORM_COUNT_LABEL, resolution.normal_count())?;
            for (sample, call) in resolution.calls() {
                writeln!(f, "{}{}{}", sample, FIELD_DELIMITER, call)?;
            }
        }
        writeln!(f)
    }
}

/// Write one experiment's report block
pub fn write_resolution<W: Write>(writer: &mut W, resolution: &Resolution) -> io::Result<()> {
    write!(writer, "{}", ReportBlock(resolution))
}

/// Render one experiment's report block to a string
pub fn format_resolution(resolution: &Resolution) -> String {
    ReportBlock(resolution).to_string()
}
