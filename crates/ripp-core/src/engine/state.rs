use crate::core::models::placement::Placement;
use crate::core::models::residue::AminoAcid;
use std::collections::BTreeMap;
use std::fmt;

/// One retained joint placement of every tiling enzyme's recognition site.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderTiling {
    /// Position of the tiling in enumeration order.
    pub id: usize,
    pub placements: BTreeMap<String, Placement>,
    pub overlap_score: f64,
    pub position_score: f64,
    /// Product of the overlap and position scores.
    pub score: f64,
    /// Length of the longest placement.
    pub length: usize,
}

impl LeaderTiling {
    /// Score rounded to two decimals, the resolution at which tilings are compared
    /// when building the score/length frontier.
    pub fn rounded_score(&self) -> i64 {
        (self.score * 100.0).round() as i64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResidueOrigin {
    RecognitionSite,
    /// Supplied by a wild-type flank or motif fill policy.
    Fill,
    /// Drawn uniformly for a position nothing else constrained.
    Random,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LeaderResidue {
    pub residue: AminoAcid,
    pub origin: ResidueOrigin,
}

/// A concrete leader sequence with per-residue provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLeader {
    residues: Vec<LeaderResidue>,
}

impl ResolvedLeader {
    pub fn new(residues: Vec<LeaderResidue>) -> Self {
        Self { residues }
    }

    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    pub fn residues(&self) -> &[LeaderResidue] {
        &self.residues
    }

    /// The leader as plain uppercase one-letter codes.
    pub fn sequence(&self) -> String {
        self.residues
            .iter()
            .map(|r| r.residue.one_letter_code())
            .collect()
    }

    /// Recognition-site residues in uppercase, everything else in lowercase.
    pub fn annotated(&self) -> String {
        self.residues
            .iter()
            .map(|r| match r.origin {
                ResidueOrigin::RecognitionSite => r.residue.one_letter_code(),
                _ => r.residue.one_letter_code().to_ascii_lowercase(),
            })
            .collect()
    }
}

impl fmt::Display for ResolvedLeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sequence())
    }
}
