//! # Core Module
//!
//! The stateless foundation of the design engine: residue and enzyme models,
//! the enzyme registry, and the scoring functions used to rank leader tilings.
//!
//! ## Architecture
//!
//! - **Data Models** ([`models`]) - Residues, residue sets, enzymes, requests, schematics and placements
//! - **Enzyme Registry** ([`enzymes`]) - Loading and validating enzyme definitions
//! - **Scoring** ([`scoring`]) - Overlap and spacing-energy scores
//!
//! Nothing in this layer holds mutable state; every function is safe to call
//! from several threads at once.

pub mod enzymes;
pub mod models;
pub mod scoring;
