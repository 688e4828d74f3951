//! # darkfill-simcore
//!
//! **Pure deterministic execution simulator for darkfill.**
//!
//! Simcore is the compute plane -- it takes a validated order and produces
//! an execution-quality report. It has:
//!
//! - **Zero side effects**: no I/O, no shared state, no signature logic
//! - **Deterministic output**: same order and parameters -> same report
//! - **Explicit parameters**: reference price and penalty rate are passed in

pub mod simulator;

pub use simulator::{round_for_report, simulate, simulate_with};
