//! # Engine Module
//!
//! This module implements the combinatorial design engine: it turns modification
//! requests into a constrained core library and searches leader arrangements that
//! present every required recognition site at a favourable distance.
//!
//! ## Overview
//!
//! The engine coordinates the stateful parts of a design run. Given a registry of
//! enzymes and a set of modification requests, it derives per-position residue
//! constraints for the core, enumerates and filters concrete cores, scores every
//! joint placement of recognition sites in the leader, and resolves a chosen
//! placement into one leader sequence.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Design parameters, builders and TOML loading
//! - **Context** ([`context`]) - Registry and progress reporter shared by tasks
//! - **State** ([`state`]) - Tiling records and resolved leaders produced by a run
//! - **Progress Monitoring** ([`progress`]) - Progress events and callback reporting
//! - **Error Handling** ([`error`]) - Engine-specific error types
//! - **Tasks** ([`tasks`]) - One module per stage of the design pipeline
//!
//! ## Key Capabilities
//!
//! - **Exact constraint intersection** across any number of enzymes and positions
//! - **Parallel enumeration** of core and tiling spaces with deterministic output order
//! - **Explosion control** through candidate-space reporting, warnings and an optional cap
//! - **Reproducible randomness** through explicitly seeded generators

pub mod config;
pub mod context;
pub mod error;
pub mod progress;
pub mod state;
pub mod tasks;
pub(crate) mod utils;
