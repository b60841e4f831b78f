use super::residue::ResidueSet;
use itertools::Itertools;
use std::fmt;

/// Allowed residues per core position.
///
/// A position whose set is empty is infeasible. That is a valid state: it
/// simply means no concrete core can be enumerated from the schematic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreSchematic {
    positions: Vec<ResidueSet>,
}

impl CoreSchematic {
    pub fn new(positions: Vec<ResidueSet>) -> Self {
        Self { positions }
    }

    pub fn unconstrained(length: usize) -> Self {
        Self::new(vec![ResidueSet::full(); length])
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[ResidueSet] {
        &self.positions
    }

    pub fn is_feasible(&self) -> bool {
        self.positions.iter().all(|set| !set.is_empty())
    }

    /// Size of the Cartesian product of all positions, saturating at `u128::MAX`.
    pub fn candidate_space(&self) -> u128 {
        self.positions
            .iter()
            .fold(1u128, |acc, set| acc.saturating_mul(set.len() as u128))
    }
}

impl fmt::Display for CoreSchematic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.positions.iter().join(""))
    }
}
