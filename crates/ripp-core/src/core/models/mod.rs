//! Stateless data models shared by every layer of the engine.
//!
//! - [`residue`] - The 20-residue alphabet and residue sets
//! - [`enzyme`] - Enzyme motifs, spacing rules, recognition sites and flanks
//! - [`request`] - Modification requests targeting core positions
//! - [`schematic`] - Per-position allowed-residue sets of a core
//! - [`placement`] - Recognition-site placements inside a leader

pub mod enzyme;
pub mod placement;
pub mod request;
pub mod residue;
pub mod schematic;
