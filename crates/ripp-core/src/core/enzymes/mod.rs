//! # Enzymes Module
//!
//! Loading and lookup of enzyme definitions: core motifs, spacing rules,
//! recognition sites and wild-type leader flanks.
//!
//! ## Key Components
//!
//! - [`registry`] - Immutable enzyme registry loaded from TOML, plus the built-in table
//! - [`motif`] - Parser turning bracket-notation motifs into ordered residue sets
//!
//! ## Usage
//!
//! ```ignore
//! use rippforge::core::enzymes::registry::EnzymeRegistry;
//!
//! let registry = EnzymeRegistry::builtin();
//! let lynd = registry.require("lynd")?;
//! ```

pub mod motif;
pub mod registry;
