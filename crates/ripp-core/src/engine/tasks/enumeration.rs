use crate::core::models::enzyme::Enzyme;
use crate::core::models::request::{ModificationRequest, group_by_enzyme};
use crate::core::models::residue::AminoAcid;
use crate::core::models::schematic::CoreSchematic;
use crate::engine::config::EnumerationConfig;
use crate::engine::context::Context;
use crate::engine::error::EngineError;
use crate::engine::progress::Progress;
use crate::engine::utils::product::ProductSpace;
use regex::Regex;
use std::collections::HashSet;
use tracing::{debug, info, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Required and forbidden sequence patterns, compiled once per run.
#[derive(Debug, Clone, Default)]
pub struct CoreFilters {
    required: Vec<Regex>,
    forbidden: Vec<Regex>,
}

impl CoreFilters {
    /// Compiles both pattern lists with the `regex` crate's syntax. That
    /// dialect has no lookaround and no backreferences, so patterns such as
    /// `(?<!C)C` or `(C)\1` fail with [`EngineError::InvalidPattern`].
    pub fn new<S: AsRef<str>>(required: &[S], forbidden: &[S]) -> Result<Self, EngineError> {
        Ok(Self {
            required: compile(required)?,
            forbidden: compile(forbidden)?,
        })
    }

    /// Every required pattern matches somewhere and no forbidden pattern matches anywhere.
    pub fn accepts(&self, sequence: &str) -> bool {
        self.required.iter().all(|re| re.is_match(sequence))
            && !self.forbidden.iter().any(|re| re.is_match(sequence))
    }
}

fn compile<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<Regex>, EngineError> {
    patterns
        .iter()
        .map(|pattern| {
            Regex::new(pattern.as_ref()).map_err(|source| EngineError::InvalidPattern {
                pattern: pattern.as_ref().to_string(),
                source,
            })
        })
        .collect()
}

/// Motif occurrences of one enzyme are only tolerated at the requested starts.
struct OffTargetScan<'a> {
    enzyme: &'a Enzyme,
    allowed_starts: HashSet<usize>,
}

impl OffTargetScan<'_> {
    fn accepts(&self, residues: &[AminoAcid]) -> bool {
        self.enzyme
            .motif_occurrences(residues)
            .all(|start| self.allowed_starts.contains(&start))
    }
}

fn off_target_scans<'a>(
    context: &Context<'a>,
    requests: &[ModificationRequest],
) -> Result<Vec<OffTargetScan<'a>>, EngineError> {
    let mut scans = Vec::new();
    for (name, positions) in group_by_enzyme(requests) {
        let enzyme = context.enzyme(name)?;
        if enzyme.is_protease() {
            debug!(enzyme = name, "Skipping off-target scan for protease.");
            continue;
        }
        let offset = enzyme.spacing.modification_offset;
        scans.push(OffTargetScan {
            enzyme,
            allowed_starts: positions
                .iter()
                .filter_map(|position| position.checked_sub(offset))
                .collect(),
        });
    }
    Ok(scans)
}

/// Enumerates every concrete core admitted by `schematic`, in lexicographic
/// alphabet order, keeping those that pass `filters` and carry no unintended
/// motif occurrence of any enzyme in `off_target`.
#[instrument(skip_all, name = "core_enumeration_task")]
pub fn run(
    context: &Context,
    schematic: &CoreSchematic,
    filters: &CoreFilters,
    off_target: &[ModificationRequest],
    config: &EnumerationConfig,
) -> Result<Vec<String>, EngineError> {
    let scans = off_target_scans(context, off_target)?;

    let size = schematic.candidate_space();
    context.reporter.report(Progress::CandidateSpace {
        name: "core",
        size,
    });
    info!(candidates = %size, "Enumerating core sequences.");

    if size > u128::from(config.warn_threshold) {
        warn!(
            candidates = %size,
            threshold = config.warn_threshold,
            "Core candidate space exceeds the warning threshold; enumeration may be slow."
        );
        context.reporter.report(Progress::Message(format!(
            "Caution: {} core candidates to enumerate",
            size
        )));
    }
    if let Some(limit) = config.hard_limit {
        if size > u128::from(limit) {
            return Err(EngineError::EnumerationLimit {
                size,
                limit: u128::from(limit),
            });
        }
    }
    if size == 0 {
        info!("No core candidates to enumerate.");
        return Ok(Vec::new());
    }

    let choices: Vec<Vec<AminoAcid>> = schematic
        .positions()
        .iter()
        .map(|set| set.iter().collect())
        .collect();
    let space = ProductSpace::new(choices.iter().map(Vec::len).collect()).ok_or(
        EngineError::EnumerationLimit {
            size,
            limit: usize::MAX as u128,
        },
    )?;

    context.reporter.report(Progress::TaskStart {
        total_steps: space.len() as u64,
    });

    #[cfg(not(feature = "parallel"))]
    let iterator = 0..space.len();

    #[cfg(feature = "parallel")]
    let iterator = (0..space.len()).into_par_iter();

    let cores: Vec<String> = iterator
        .filter_map(|index| {
            let residues: Vec<AminoAcid> = space
                .decode(index)
                .into_iter()
                .zip(&choices)
                .map(|(digit, options)| options[digit])
                .collect();
            context.reporter.report(Progress::TaskIncrement);

            if !scans.iter().all(|scan| scan.accepts(&residues)) {
                return None;
            }
            let sequence: String = residues.iter().map(|r| r.one_letter_code()).collect();
            filters.accepts(&sequence).then_some(sequence)
        })
        .collect();

    context.reporter.report(Progress::TaskFinish);
    info!(
        retained = cores.len(),
        enumerated = space.len(),
        "Core enumeration complete."
    );
    Ok(cores)
}
