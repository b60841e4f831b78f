use super::potentials::spring;
use crate::core::models::enzyme::SpringConstants;
use crate::core::models::placement::Placement;

/// One spacing requirement evaluated against a placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionTerm {
    /// Spacer length of the placement being scored.
    pub spacer: usize,
    pub optimal: i64,
    /// Added to the spacer to obtain the actual spacing.
    pub core_adjustment: i64,
    pub springs: SpringConstants,
}

impl PositionTerm {
    pub fn new(
        placement: &Placement,
        optimal: i64,
        core_adjustment: i64,
        springs: SpringConstants,
    ) -> Self {
        Self {
            spacer: placement.spacer(),
            optimal,
            core_adjustment,
            springs,
        }
    }

    #[inline]
    pub fn delta(&self) -> i64 {
        self.spacer as i64 + self.core_adjustment - self.optimal
    }

    #[inline]
    pub fn score(&self) -> f64 {
        spring(
            self.delta() as f64,
            self.springs.insertion,
            self.springs.deletion,
        )
    }
}

/// Product of the spring scores of every term, clamped below at zero.
pub fn position_score(terms: &[PositionTerm]) -> f64 {
    terms
        .iter()
        .map(PositionTerm::score)
        .product::<f64>()
        .max(0.0)
}
