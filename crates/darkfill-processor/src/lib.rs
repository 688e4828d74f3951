//! # darkfill-processor
//!
//! **Orchestration Plane**: the single entry point that takes a signed
//! order submission through the security envelope and the simulator.
//!
//! ## Architecture
//!
//! [`OrderProcessor::process`] runs a strictly linear pipeline:
//! 1. Checks that every authentication field and the payload are present
//! 2. Recovers the signer and rejects a mismatch (403)
//! 3. Decodes the rotation-coded payload
//! 4. Validates the order, itemizing every defect
//! 5. Simulates ideal vs. penalized execution
//!
//! The [`adapter`] module maps raw JSON bodies onto this pipeline and maps
//! every outcome onto a status code and a response body.

pub mod adapter;
pub mod pipeline;

pub use adapter::health;
pub use pipeline::{OrderProcessor, PipelineStage};
