//! Tasks implementing each stage of a peptide design run.
//!
//! Each submodule is one computational unit with a `run` entry point taking
//! the shared [`Context`](crate::engine::context::Context). Constraint
//! resolution and schematic building derive per-position residue sets from
//! modification requests; enumeration turns a schematic into concrete cores;
//! tiling searches recognition-site placements in the leader; leader
//! resolution merges one tiling into a concrete sequence.

pub mod constraint;
pub mod enumeration;
pub mod leader;
pub mod schematic;
pub mod tiling;
