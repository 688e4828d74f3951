//! # darkfill-types
//!
//! Shared types, errors, and configuration for the **darkfill** order
//! pipeline.
//!
//! This crate is the leaf dependency of the workspace; every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`Address`]
//! - **Authentication**: [`SignedEnvelope`], [`EncodedOrder`]
//! - **Order model**: [`Order`], [`ValidatedOrder`]
//! - **Report model**: [`ExecutionReport`]
//! - **Wire shapes**: [`OrderRequest`], [`ProcessResponse`], [`HealthStatus`]
//! - **Configuration**: [`SimulationConfig`], [`ProcessorConfig`]
//! - **Errors**: [`DarkfillError`] with `DF_ERR_` prefix codes
//! - **Constants**: shared limits and defaults

pub mod config;
pub mod constants;
pub mod envelope;
pub mod error;
pub mod ids;
pub mod order;
pub mod report;
pub mod wire;

// Re-export all primary types at crate root for ergonomic imports:
//   use darkfill_types::{Order, SignedEnvelope, ExecutionReport, ...};

pub use config::*;
pub use envelope::*;
pub use error::*;
pub use ids::*;
pub use order::*;
pub use report::*;
pub use wire::*;

// Constants are accessed via `darkfill_types::constants::FOO`
// (not re-exported to avoid name collisions).
