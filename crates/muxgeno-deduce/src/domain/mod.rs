//! Domain layer - Pure deduction logic
//!
//! This module contains pure functions and types without I/O dependencies.

pub mod deduction;
pub mod record;
pub mod resolution;
pub mod sample;
