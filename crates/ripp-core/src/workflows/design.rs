use super::precursor;
use crate::core::enzymes::registry::EnzymeRegistry;
use crate::core::models::schematic::CoreSchematic;
use crate::engine::config::{DesignConfig, TilingSelection};
use crate::engine::context::Context;
use crate::engine::error::EngineError;
use crate::engine::progress::ProgressReporter;
use crate::engine::state::{LeaderTiling, ResolvedLeader};
use crate::engine::tasks::enumeration::{self, CoreFilters};
use crate::engine::tasks::leader::{self, FillPolicy, PriorityPolicy};
use crate::engine::tasks::{schematic, tiling};
use crate::engine::utils::sampling::seeded_rng;
use rand::Rng;
use std::path::Path;
use tracing::{info, instrument, warn};

#[derive(Debug, Clone)]
pub struct DesignResult {
    pub schematic: CoreSchematic,
    pub cores: Vec<String>,
    /// Every retained tiling, in enumeration order.
    pub tilings: Vec<LeaderTiling>,
    pub chosen_tiling: Option<LeaderTiling>,
    pub leader: Option<ResolvedLeader>,
    pub precursors: Vec<String>,
}

/// Runs a complete design with a generator seeded from `config.leader.seed`.
#[instrument(skip_all, name = "design_workflow")]
pub fn run(
    registry: &EnzymeRegistry,
    config: &DesignConfig,
    reporter: &ProgressReporter,
) -> Result<DesignResult, EngineError> {
    let mut rng = seeded_rng(config.leader.seed);
    run_with_rng(registry, config, reporter, &mut rng)
}

/// Loads a design from a TOML file and runs it against the built-in enzymes,
/// or against the registry file at `registry_path` when one is given.
pub fn run_from_files(
    config_path: &Path,
    registry_path: Option<&Path>,
    reporter: &ProgressReporter,
) -> Result<DesignResult, EngineError> {
    let config = DesignConfig::load(config_path)?;
    let loaded;
    let registry = match registry_path {
        Some(path) => {
            loaded = EnzymeRegistry::load(path)?;
            &loaded
        }
        None => EnzymeRegistry::builtin(),
    };
    run(registry, &config, reporter)
}

pub fn run_with_rng<R: Rng + ?Sized>(
    registry: &EnzymeRegistry,
    config: &DesignConfig,
    reporter: &ProgressReporter,
    rng: &mut R,
) -> Result<DesignResult, EngineError> {
    let context = Context::new(registry, reporter);

    let (fill, priority, filters) = reporter.phase("Validation", || -> Result<_, EngineError> {
        let fill = FillPolicy::resolve(&config.leader.fill, registry)?;
        let priority = PriorityPolicy::resolve(&config.leader.priority, registry)?;
        let filters = CoreFilters::new(&config.required_patterns, &config.forbidden_patterns)?;
        for request in &config.modifications {
            context.enzyme(&request.enzyme)?;
        }
        Ok((fill, priority, filters))
    })?;

    let schematic = reporter.phase("Core Schematic", || {
        schematic::run(&context, &config.modifications, config.core_length)
    })?;

    let cores = reporter.phase("Core Enumeration", || {
        enumeration::run(
            &context,
            &schematic,
            &filters,
            &config.modifications,
            &config.enumeration,
        )
    })?;

    let tilings = reporter.phase("Leader Tiling", || {
        tiling::run(&context, &config.modifications, &config.tiling)
    })?;

    let (chosen_tiling, leader) =
        reporter.phase("Leader Resolution", || -> Result<_, EngineError> {
            let chosen = choose_tiling(&tilings, config.leader.selection)?;
            let leader = chosen
                .as_ref()
                .map(|tiling| leader::run(&context, &tiling.placements, &fill, &priority, rng))
                .transpose()?;
            Ok((chosen, leader))
        })?;

    let precursors = reporter.phase("Precursor Assembly", || match &leader {
        Some(leader) => precursor::assemble(&leader.sequence(), &cores),
        None => Vec::new(),
    });

    info!(
        cores = cores.len(),
        tilings = tilings.len(),
        precursors = precursors.len(),
        "Design workflow complete."
    );

    Ok(DesignResult {
        schematic,
        cores,
        tilings,
        chosen_tiling,
        leader,
        precursors,
    })
}

fn choose_tiling(
    tilings: &[LeaderTiling],
    selection: TilingSelection,
) -> Result<Option<LeaderTiling>, EngineError> {
    if tilings.is_empty() {
        warn!("No leader tiling was retained; no leader will be built.");
        return Ok(None);
    }
    match tiling::select(tilings, selection) {
        Some(chosen) => {
            info!(
                id = chosen.id,
                score = chosen.score,
                length = chosen.length,
                "Selected leader tiling."
            );
            Ok(Some(chosen.clone()))
        }
        None => Err(EngineError::InvalidArgument(format!(
            "no retained tiling matches selection {:?}",
            selection
        ))),
    }
}
