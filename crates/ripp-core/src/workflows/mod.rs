//! # Workflows Module
//!
//! High-level entry points that chain the engine's tasks into complete design runs.
//!
//! ## Overview
//!
//! Workflows are the user-facing layer of the library. They validate configuration
//! against the enzyme registry up front, run every stage in order, report phase
//! progress, and gather each stage's output into a single result.
//!
//! ## Architecture
//!
//! - **Design Workflow** ([`design`]) - From modification requests to a precursor
//!   library: schematic, core enumeration, leader tiling, leader resolution.
//! - **Precursor Assembly** ([`precursor`]) - Joins a resolved leader with each core.

pub mod design;
pub mod precursor;
