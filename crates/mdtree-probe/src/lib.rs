//! mdtree-probe: Does an empty span change the rendered output?
//!
//! This crate provides:
//! - Byte comparison of two renderings with a unified diff on mismatch
//! - The span probe: render a document with and without empty span
//!   wrappers and report, per target format, whether the output changed
//! - Optional artifact output into a caller-chosen directory
//!
//! This crate is designed to be used by various interfaces (CLI, tests, etc.)

pub mod compare;
pub mod experiment;

pub use compare::{Comparison, compare};
pub use experiment::{
    ProbeError, ProbeOptions, ProbeReport, Result, SAMPLE_MARKDOWN, TargetReport, run_probe,
};
