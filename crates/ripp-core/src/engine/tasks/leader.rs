use crate::core::enzymes::registry::EnzymeRegistry;
use crate::core::models::placement::Placement;
use crate::core::models::residue::{AminoAcid, parse_sequence};
use crate::engine::config::{PolicyValue, RANDOM_POLICY};
use crate::engine::context::Context;
use crate::engine::error::EngineError;
use crate::engine::state::{LeaderResidue, ResidueOrigin, ResolvedLeader};
use crate::engine::utils::sampling::{random_residue, tiebreak_order};
use rand::Rng;
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Parses a tiling written as `(enzyme, "xxSITExxxx")` pairs.
pub fn parse_placements<'a>(
    entries: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> Result<BTreeMap<String, Placement>, EngineError> {
    entries
        .into_iter()
        .map(|(enzyme, text)| -> Result<_, EngineError> {
            Ok((enzyme.to_string(), text.parse::<Placement>()?))
        })
        .collect()
}

/// How wildcard runs around each recognition site are filled before merging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FillPolicy {
    /// Leave every gap for random substitution.
    Random,
    /// Fill the named enzymes' gaps from their wild-type leader flanks.
    WildType(Vec<String>),
    /// Tile a literal motif outwards from every recognition site.
    Motif(Vec<AminoAcid>),
}

impl FillPolicy {
    /// Interprets a caller-supplied value. A string naming a registered
    /// enzyme takes precedence over reading it as a residue motif.
    pub fn resolve(value: &PolicyValue, registry: &EnzymeRegistry) -> Result<Self, EngineError> {
        match value {
            PolicyValue::One(text) if text == RANDOM_POLICY => Ok(Self::Random),
            PolicyValue::One(name) if registry.contains(name) => {
                Ok(Self::WildType(vec![name.clone()]))
            }
            PolicyValue::One(text) => match parse_sequence(text) {
                Ok(motif) if !motif.is_empty() => Ok(Self::Motif(motif)),
                _ => Err(EngineError::InvalidArgument(format!(
                    "fill policy '{}' is not \"{}\", a registered enzyme or a residue motif",
                    text, RANDOM_POLICY
                ))),
            },
            PolicyValue::Many(names) => {
                for name in names {
                    registry.require(name)?;
                }
                Ok(Self::WildType(names.clone()))
            }
        }
    }
}

/// Which enzyme's residue wins where placements disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriorityPolicy {
    /// Conflicts are settled by the random tie-break alone.
    Random,
    /// Earlier enzymes win; unlisted enzymes rank after every listed one.
    Ordered(Vec<String>),
}

impl PriorityPolicy {
    pub fn resolve(value: &PolicyValue, registry: &EnzymeRegistry) -> Result<Self, EngineError> {
        let names = match value {
            PolicyValue::One(text) if text == RANDOM_POLICY => return Ok(Self::Random),
            PolicyValue::One(name) => std::slice::from_ref(name),
            PolicyValue::Many(names) => names.as_slice(),
        };
        for name in names {
            registry.require(name)?;
        }
        Ok(Self::Ordered(names.to_vec()))
    }

    fn rank(&self, enzyme: &str) -> usize {
        match self {
            Self::Random => 0,
            Self::Ordered(names) => names
                .iter()
                .position(|name| name == enzyme)
                .unwrap_or(names.len()),
        }
    }
}

/// One character of a padded placement during merging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Site(AminoAcid),
    Fill(AminoAcid),
    Wildcard,
}

impl Slot {
    /// Sites outrank fills, which outrank wildcards.
    fn rank(self) -> u8 {
        match self {
            Slot::Site(_) => 0,
            Slot::Fill(_) => 1,
            Slot::Wildcard => 2,
        }
    }
}

struct Row<'a> {
    enzyme: &'a str,
    placement: Placement,
    slots: Vec<Slot>,
}

impl Row<'_> {
    /// Writes `pre(j)` at the j-th gap position walking left from the site and
    /// `post(j)` at the j-th spacer position walking right from it. `None`
    /// leaves the wildcard in place.
    fn fill_gaps(
        &mut self,
        pre: impl Fn(usize) -> Option<AminoAcid>,
        post: impl Fn(usize) -> Option<AminoAcid>,
    ) {
        let start = self.placement.leading();
        let end = start + self.placement.site().len();
        for j in 0..start {
            if let Some(residue) = pre(j) {
                self.slots[start - 1 - j] = Slot::Fill(residue);
            }
        }
        for j in 0..self.placement.spacer() {
            if let Some(residue) = post(j) {
                self.slots[end + j] = Slot::Fill(residue);
            }
        }
    }
}

/// Merges one tiling's placements into a concrete leader.
///
/// Placements are left-padded to the longest one, gaps are filled according
/// to `fill`, and each position takes the best-ranked character across
/// enzymes: site residues over filled residues over wildcards, then by
/// `priority`, then by a random tie-break drawn once from `rng`. Positions
/// still holding a wildcard receive a uniformly drawn residue.
#[instrument(skip_all, name = "leader_resolution_task")]
pub fn run<R: Rng + ?Sized>(
    context: &Context,
    placements: &BTreeMap<String, Placement>,
    fill: &FillPolicy,
    priority: &PriorityPolicy,
    rng: &mut R,
) -> Result<ResolvedLeader, EngineError> {
    let length = placements
        .values()
        .map(Placement::len)
        .max()
        .ok_or_else(|| {
            EngineError::InvalidArgument("cannot resolve a leader without placements".to_string())
        })?;

    let mut rows: Vec<Row> = placements
        .iter()
        .map(|(enzyme, placement)| -> Result<_, EngineError> {
            context.enzyme(enzyme)?;
            let placement = placement.padded_to(length);
            let slots = (0..length)
                .map(|index| placement.slot(index).map_or(Slot::Wildcard, Slot::Site))
                .collect();
            Ok(Row {
                enzyme: enzyme.as_str(),
                placement,
                slots,
            })
        })
        .collect::<Result<_, EngineError>>()?;

    match fill {
        FillPolicy::Random => {}
        FillPolicy::WildType(names) => {
            for name in names {
                let row = rows
                    .iter_mut()
                    .find(|row| row.enzyme == name)
                    .ok_or_else(|| {
                        EngineError::InvalidArgument(format!(
                            "fill enzyme '{}' is not part of the tiling",
                            name
                        ))
                    })?;
                let flanks = context.enzyme(name)?.flanks.as_ref().ok_or_else(|| {
                    EngineError::InvalidArgument(format!(
                        "enzyme '{}' has no wild-type leader flanks",
                        name
                    ))
                })?;
                let (pre, post) = (&flanks.pre_site, &flanks.post_site);
                row.fill_gaps(
                    |j| pre.len().checked_sub(j + 1).map(|i| pre[i]),
                    |j| post.get(j).copied(),
                );
                debug!(enzyme = %name, "Filled gaps from wild-type flanks.");
            }
        }
        FillPolicy::Motif(motif) if !motif.is_empty() => {
            let m = motif.len();
            for row in &mut rows {
                row.fill_gaps(|j| Some(motif[m - 1 - j % m]), |j| Some(motif[j % m]));
            }
        }
        FillPolicy::Motif(_) => {}
    }

    let ranks: Vec<usize> = rows.iter().map(|row| priority.rank(row.enzyme)).collect();
    let tiebreak = tiebreak_order(rows.len() * length, rng);

    let mut residues = Vec::with_capacity(length);
    for position in 0..length {
        let winner = (0..rows.len())
            .map(|r| rows[r].slots[position])
            .zip(&ranks)
            .zip(tiebreak.iter().skip(position).step_by(length))
            .min_by_key(|&((slot, rank), tie)| (slot.rank(), *rank, *tie))
            .map_or(Slot::Wildcard, |((slot, _), _)| slot);

        residues.push(match winner {
            Slot::Site(residue) => LeaderResidue {
                residue,
                origin: ResidueOrigin::RecognitionSite,
            },
            Slot::Fill(residue) => LeaderResidue {
                residue,
                origin: ResidueOrigin::Fill,
            },
            Slot::Wildcard => LeaderResidue {
                residue: random_residue(rng),
                origin: ResidueOrigin::Random,
            },
        });
    }

    let leader = ResolvedLeader::new(residues);
    debug!(leader = %leader.annotated(), "Resolved leader.");
    Ok(leader)
}
