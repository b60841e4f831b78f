use crate::core::enzymes::registry::EnzymeRegistry;
use crate::core::models::enzyme::Enzyme;
use crate::core::models::residue::ResidueSet;
use crate::engine::error::EngineError;

/// Allowed residues at `query_position` when `enzyme` is to modify the core at
/// `modification_position`.
///
/// The query is shifted into motif coordinates so that the motif's
/// modification offset lands on `modification_position`. Positions the motif
/// does not reach are unconstrained.
pub fn resolve(
    registry: &EnzymeRegistry,
    enzyme: &str,
    modification_position: usize,
    query_position: usize,
) -> Result<ResidueSet, EngineError> {
    let enzyme = registry.require(enzyme)?;
    Ok(allowed_residues(enzyme, modification_position, query_position))
}

pub(crate) fn allowed_residues(
    enzyme: &Enzyme,
    modification_position: usize,
    query_position: usize,
) -> ResidueSet {
    let shift = modification_position as i64 - enzyme.spacing.modification_offset as i64;
    usize::try_from(query_position as i64 - shift)
        .ok()
        .and_then(|motif_index| enzyme.motif.get(motif_index).copied())
        .unwrap_or_else(ResidueSet::full)
}
