//! # Scoring Module
//!
//! Pure scoring functions for leader tilings.
//!
//! - [`potentials`] - The asymmetric spring potential of the spacing-energy model
//! - [`overlap`] - Recognition-site packing conflicts between placements
//! - [`position`] - Spacing-energy score of a set of placements
//!
//! Both scores lie in [0, 1]; a tiling's combined score is their product.

pub mod overlap;
pub mod position;
pub mod potentials;
