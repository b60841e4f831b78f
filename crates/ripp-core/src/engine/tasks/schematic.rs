use super::constraint::allowed_residues;
use crate::core::models::enzyme::Enzyme;
use crate::core::models::request::ModificationRequest;
use crate::core::models::residue::ResidueSet;
use crate::core::models::schematic::CoreSchematic;
use crate::engine::context::Context;
use crate::engine::error::EngineError;
use std::collections::BTreeSet;
use tracing::{debug, info, instrument, warn};

#[instrument(skip_all, name = "core_schematic_task", fields(core_length = core_length))]
pub fn run(
    context: &Context,
    requests: &[ModificationRequest],
    core_length: usize,
) -> Result<CoreSchematic, EngineError> {
    let targets: Vec<(&Enzyme, &BTreeSet<usize>)> = requests
        .iter()
        .map(|request| -> Result<_, EngineError> {
            Ok((context.enzyme(&request.enzyme)?, &request.positions))
        })
        .collect::<Result<_, EngineError>>()?;

    let positions: Vec<ResidueSet> = (0..core_length)
        .map(|query| {
            targets
                .iter()
                .flat_map(|(enzyme, positions)| {
                    positions
                        .iter()
                        .map(move |&target| allowed_residues(enzyme, target, query))
                })
                .fold(ResidueSet::full(), ResidueSet::intersection)
        })
        .collect();
    let schematic = CoreSchematic::new(positions);

    debug!(schematic = %schematic, "Built core schematic.");
    if schematic.is_feasible() {
        info!(
            candidates = %schematic.candidate_space(),
            "Core schematic admits candidates."
        );
    } else {
        warn!(
            schematic = %schematic,
            "Core schematic has a position allowing no residue; the design is infeasible."
        );
    }
    Ok(schematic)
}
