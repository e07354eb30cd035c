//! Application layer - Use case implementations
//!
//! This module coordinates domain and infrastructure layers to resolve whole streams.

pub mod resolver;
