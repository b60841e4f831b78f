//! # rippforge
//!
//! A combinatorial design library for ribosomally synthesized, post-translationally
//! modified peptides whose cores must be recognised by several modification enzymes
//! at once.
//!
//! ## Architectural Philosophy
//!
//! The library follows a strict three-layer architecture separating data, logic and
//! entry points.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`AminoAcid`, `ResidueSet`,
//!   `Enzyme`, `Placement`), the enzyme registry with its bracket-motif parser, and the
//!   pure scoring functions (spring potential, overlap score, position score).
//!
//! - **[`engine`]: The Logic Core.** Configuration, progress reporting and the tasks
//!   that resolve motif constraints, build core schematics, enumerate and filter
//!   cores, search leader tilings, and resolve a tiling into a concrete leader.
//!
//! - **[`workflows`]: The Public API.** End-to-end design runs tying the `engine` and
//!   `core` together, from modification requests to a precursor peptide library.

pub mod core;
pub mod engine;
pub mod workflows;
