use crate::core::models::enzyme::SpringConstants;
use crate::core::models::placement::Placement;
use crate::core::models::request::{ModificationRequest, group_by_enzyme};
use crate::core::scoring::overlap::overlap_score;
use crate::core::scoring::position::{PositionTerm, position_score};
use crate::engine::config::{TilingConfig, TilingSelection};
use crate::engine::context::Context;
use crate::engine::error::EngineError;
use crate::engine::progress::Progress;
use crate::engine::state::LeaderTiling;
use crate::engine::utils::product::ProductSpace;
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, info, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// An enzyme taking part in tiling search with its candidate placements.
struct TilingEnzyme<'a> {
    name: &'a str,
    options: Vec<Placement>,
    /// Optimal spacing measured from the modification site.
    optimal: i64,
    /// One adjustment per requested core position.
    adjustments: Vec<i64>,
    springs: SpringConstants,
}

fn tiling_enzymes<'a>(
    context: &Context,
    requests: &'a [ModificationRequest],
    max_length: usize,
) -> Result<Vec<TilingEnzyme<'a>>, EngineError> {
    let mut participants = Vec::new();
    for (name, positions) in group_by_enzyme(requests) {
        let enzyme = context.enzyme(name)?;
        let Some((optimal_distance, springs)) = enzyme.tiling_parameters() else {
            debug!(
                enzyme = name,
                "Enzyme has no optimal spacing; it constrains the core only."
            );
            continue;
        };
        let site = enzyme
            .recognition_site
            .as_ref()
            .ok_or_else(|| EngineError::MissingRecognitionSite {
                enzyme: name.to_string(),
            })?;

        let options: Vec<Placement> = match max_length.checked_sub(site.len()) {
            Some(max_spacer) => (0..=max_spacer)
                .map(|spacer| Placement::new(site.clone(), spacer))
                .collect(),
            None => {
                warn!(
                    enzyme = name,
                    site_length = site.len(),
                    max_length,
                    "Recognition site does not fit in the leader."
                );
                Vec::new()
            }
        };
        let offset = enzyme.spacing.modification_offset as i64;
        debug!(enzyme = name, options = options.len(), "Generated placements.");

        participants.push(TilingEnzyme {
            name,
            options,
            optimal: optimal_distance - offset,
            adjustments: positions.iter().map(|&p| p as i64 - offset).collect(),
            springs,
        });
    }
    participants.sort_by(|a, b| a.name.cmp(b.name));
    Ok(participants)
}

/// Enumerates every joint placement of the requested enzymes' recognition
/// sites within `config.max_length` and keeps those scoring above
/// `config.score_threshold`.
///
/// Enzymes without an optimal spacing are left out of the search. Retained
/// tilings are numbered in enumeration order: enzymes sorted by name, the last
/// enzyme's spacer varying fastest.
#[instrument(skip_all, name = "leader_tiling_task", fields(max_length = config.max_length))]
pub fn run(
    context: &Context,
    requests: &[ModificationRequest],
    config: &TilingConfig,
) -> Result<Vec<LeaderTiling>, EngineError> {
    let participants = tiling_enzymes(context, requests, config.max_length)?;
    if participants.is_empty() {
        warn!("No requested enzyme defines an optimal spacing; there is nothing to tile.");
        return Ok(Vec::new());
    }

    let radices: Vec<usize> = participants.iter().map(|p| p.options.len()).collect();
    let size = radices
        .iter()
        .fold(1u128, |acc, &r| acc.saturating_mul(r as u128));
    context.reporter.report(Progress::CandidateSpace {
        name: "leader tiling",
        size,
    });
    info!(
        enzymes = participants.len(),
        candidates = %size,
        "Enumerating leader tilings."
    );
    let space = ProductSpace::new(radices).ok_or(EngineError::EnumerationLimit {
        size,
        limit: usize::MAX as u128,
    })?;

    context.reporter.report(Progress::TaskStart {
        total_steps: space.len() as u64,
    });

    #[cfg(not(feature = "parallel"))]
    let iterator = 0..space.len();

    #[cfg(feature = "parallel")]
    let iterator = (0..space.len()).into_par_iter();

    let retained: Vec<LeaderTiling> = iterator
        .filter_map(|index| {
            let digits = space.decode(index);
            context.reporter.report(Progress::TaskIncrement);
            let tiling = score_tiling(&participants, &digits);
            (tiling.score > config.score_threshold).then_some(tiling)
        })
        .collect();

    let tilings: Vec<LeaderTiling> = retained
        .into_iter()
        .enumerate()
        .map(|(id, tiling)| LeaderTiling { id, ..tiling })
        .collect();

    context.reporter.report(Progress::TaskFinish);
    info!(
        retained = tilings.len(),
        threshold = config.score_threshold,
        "Leader tiling complete."
    );
    Ok(tilings)
}

fn score_tiling(participants: &[TilingEnzyme], digits: &[usize]) -> LeaderTiling {
    let chosen: Vec<&Placement> = participants
        .iter()
        .zip(digits)
        .map(|(enzyme, &digit)| &enzyme.options[digit])
        .collect();

    let terms: Vec<PositionTerm> = participants
        .iter()
        .zip(&chosen)
        .flat_map(|(enzyme, placement)| {
            enzyme.adjustments.iter().map(move |&adjustment| {
                PositionTerm::new(placement, enzyme.optimal, adjustment, enzyme.springs)
            })
        })
        .collect();

    let overlap = overlap_score(&chosen);
    let position = position_score(&terms);
    LeaderTiling {
        id: 0,
        placements: participants
            .iter()
            .zip(&chosen)
            .map(|(enzyme, &placement)| (enzyme.name.to_string(), placement.clone()))
            .collect(),
        overlap_score: overlap,
        position_score: position,
        score: overlap * position,
        length: chosen.iter().map(|p| p.len()).max().unwrap_or(0),
    }
}

/// Highest combined score, then shortest length, then lowest id.
pub fn best(tilings: &[LeaderTiling]) -> Option<&LeaderTiling> {
    tilings.iter().min_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then(a.length.cmp(&b.length))
            .then(a.id.cmp(&b.id))
    })
}

pub fn select(tilings: &[LeaderTiling], selection: TilingSelection) -> Option<&LeaderTiling> {
    match selection {
        TilingSelection::Best => best(tilings),
        TilingSelection::Id(id) => tilings.iter().find(|t| t.id == id),
    }
}

/// Score/length trade-off curve of the retained tilings.
///
/// Scores are compared at two-decimal resolution. For each length the best
/// scoring tiling is kept; of those, only the shortest tiling per score
/// survives. The result is ordered by ascending length.
pub fn frontier(tilings: &[LeaderTiling]) -> Vec<&LeaderTiling> {
    let mut by_length: BTreeMap<usize, &LeaderTiling> = BTreeMap::new();
    for tiling in tilings {
        by_length
            .entry(tiling.length)
            .and_modify(|current| {
                let (new, old) = (tiling.rounded_score(), current.rounded_score());
                if new > old || (new == old && tiling.id < current.id) {
                    *current = tiling;
                }
            })
            .or_insert(tiling);
    }

    let mut seen_scores = HashSet::new();
    by_length
        .into_values()
        .filter(|tiling| seen_scores.insert(tiling.rounded_score()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::enzymes::registry::EnzymeRegistry;
    use crate::engine::progress::ProgressReporter;

    fn tile_with(
        registry: &EnzymeRegistry,
        requests: &[ModificationRequest],
        config: &TilingConfig,
    ) -> Result<Vec<LeaderTiling>, EngineError> {
        let reporter = ProgressReporter::new();
        let context = Context::new(registry, &reporter);
        run(&context, requests, config)
    }

    fn tile(requests: &[ModificationRequest]) -> Vec<LeaderTiling> {
        tile_with(EnzymeRegistry::builtin(), requests, &TilingConfig::default()).unwrap()
    }

    fn lynd_and_paap() -> Vec<ModificationRequest> {
        vec![
            ModificationRequest::new("lynd", [3]),
            ModificationRequest::new("paap", [0]),
        ]
    }

    #[test]
    fn single_enzyme_keeps_every_spacer_within_the_threshold() {
        let tilings = tile(&[ModificationRequest::new("lynd", [0])]);
        assert_eq!(tilings.len(), 32);
        assert!(tilings.iter().all(|t| t.overlap_score == 1.0));

        let top = best(&tilings).unwrap();
        assert_eq!(top.placements["lynd"].spacer(), 8);
        assert_eq!(top.score, 1.0);
        assert_eq!(top.length, 17);
    }

    #[test]
    fn ids_follow_enumeration_order() {
        let tilings = tile(&[ModificationRequest::new("lynd", [0])]);
        for (expected, tiling) in tilings.iter().enumerate() {
            assert_eq!(tiling.id, expected);
            assert_eq!(tiling.placements["lynd"].spacer(), expected);
        }
    }

    #[test]
    fn two_enzymes_pack_without_conflicting_residues() {
        let tilings = tile(&lynd_and_paap());
        assert_eq!(tilings.len(), 695);
        assert!(tilings.iter().all(|t| t.score > 0.1));
        assert!(tilings.iter().all(|t| t.placements.len() == 2));

        let top = best(&tilings).unwrap();
        assert_eq!(top.id, 267);
        assert_eq!(top.placements["lynd"].to_string(), "LAELSEEALxxxxxxxxxxxx");
        assert_eq!(top.placements["paap"].to_string(), "FSTLSQRISAIT");
        assert_eq!(top.overlap_score, 1.0);
        assert_eq!(top.length, 21);
        assert!((top.score - top.overlap_score * top.position_score).abs() < 1e-12);
    }

    #[test]
    fn enzymes_without_spacing_are_left_out() {
        let tilings = tile(&[
            ModificationRequest::new("padek", [5]),
            ModificationRequest::new("lynd", [0]),
        ]);
        assert_eq!(tilings.len(), 32);
        assert!(tilings.iter().all(|t| !t.placements.contains_key("padek")));
    }

    #[test]
    fn only_non_spacing_enzymes_yield_no_tilings() {
        assert!(tile(&[ModificationRequest::new("padek", [5])]).is_empty());
    }

    #[test]
    fn duplicate_requests_are_merged() {
        let tilings = tile(&[
            ModificationRequest::new("lynd", [0]),
            ModificationRequest::new("lynd", [0]),
        ]);
        assert_eq!(tilings.len(), 32);
    }

    #[test]
    fn stiff_springs_keep_only_the_optimal_spacer() {
        let tilings = tile(&[ModificationRequest::new("tevp", [0])]);
        assert_eq!(tilings.len(), 1);
        assert_eq!(tilings[0].placements["tevp"].spacer(), 0);
        assert_eq!(tilings[0].score, 1.0);
    }

    #[test]
    fn score_threshold_is_configurable() {
        let config = TilingConfig {
            score_threshold: 0.999,
            ..TilingConfig::default()
        };
        let tilings = tile_with(
            EnzymeRegistry::builtin(),
            &[ModificationRequest::new("lynd", [0])],
            &config,
        )
        .unwrap();
        assert!(tilings.len() < 32);
        assert!(tilings.iter().all(|t| t.score > 0.999));
        assert!(tilings.iter().any(|t| t.placements["lynd"].spacer() == 8));
    }

    #[test]
    fn site_longer_than_the_leader_gives_no_tilings() {
        let config = TilingConfig {
            max_length: 5,
            ..TilingConfig::default()
        };
        let tilings = tile_with(
            EnzymeRegistry::builtin(),
            &[ModificationRequest::new("lynd", [0])],
            &config,
        )
        .unwrap();
        assert!(tilings.is_empty());
    }

    #[test]
    fn spacing_enzyme_without_site_is_rejected() {
        let registry = EnzymeRegistry::from_toml_str(
            r#"
            [bare]
            motif = "[C]"
            modification-offset = 0
            optimal-spacing = 4
            insertion-constant = 10.0
            deletion-constant = 10.0
            "#,
        )
        .unwrap();
        let result = tile_with(
            &registry,
            &[ModificationRequest::new("bare", [0])],
            &TilingConfig::default(),
        );
        assert!(matches!(
            result,
            Err(EngineError::MissingRecognitionSite { enzyme }) if enzyme == "bare"
        ));
    }

    #[test]
    fn unknown_enzyme_is_rejected() {
        let result = tile_with(
            EnzymeRegistry::builtin(),
            &[ModificationRequest::new("nope", [0])],
            &TilingConfig::default(),
        );
        assert!(matches!(result, Err(EngineError::UnknownEnzyme(_))));
    }

    #[test]
    fn select_finds_tilings_by_id() {
        let tilings = tile(&lynd_and_paap());
        assert_eq!(select(&tilings, TilingSelection::Id(267)).unwrap().length, 21);
        assert_eq!(select(&tilings, TilingSelection::Best).unwrap().id, 267);
        assert!(select(&tilings, TilingSelection::Id(10_000)).is_none());
        assert!(select(&[], TilingSelection::Best).is_none());
    }

    #[test]
    fn frontier_keeps_shortest_tiling_per_rounded_score() {
        let tilings = tile(&lynd_and_paap());
        let curve = frontier(&tilings);
        let points: Vec<(usize, i64)> = curve
            .iter()
            .map(|t| (t.length, t.rounded_score()))
            .collect();
        assert_eq!(points, vec![(15, 26), (17, 50), (19, 65), (20, 81), (21, 100)]);
    }
}
