//! Utility functions for the engine module.
//!
//! Seedable sampling helpers used by leader resolution, and mixed-radix
//! indexing that lets Cartesian-product enumerations be partitioned by index.

pub mod product;
pub mod sampling;
