use super::residue::{AminoAcid, ResidueSet};

/// Where a core motif is allowed to occur inside a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MotifAnchor {
    /// The motif may occur at any offset.
    #[default]
    Anywhere,
    /// The motif is pinned to the trailing (C-terminal) end of the sequence.
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnzymeRole {
    #[default]
    Modifying,
    /// Used only for in-vitro excision; never subject to off-target filtering.
    Protease,
}

/// Asymmetric spring constants of the spacing-energy model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringConstants {
    /// Penalises spacers longer than optimal.
    pub insertion: f64,
    /// Penalises spacers shorter than optimal.
    pub deletion: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpacingRule {
    /// Optimal distance from the recognition site to the motif anchor residue.
    pub optimal_distance: Option<i64>,
    /// Offset of the primary modification site inside the motif.
    pub modification_offset: usize,
    pub springs: Option<SpringConstants>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WildTypeFlanks {
    pub pre_site: Vec<AminoAcid>,
    pub post_site: Vec<AminoAcid>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Enzyme {
    pub name: String,
    pub motif: Vec<ResidueSet>,
    pub anchor: MotifAnchor,
    pub role: EnzymeRole,
    pub spacing: SpacingRule,
    pub recognition_site: Option<Vec<AminoAcid>>,
    pub flanks: Option<WildTypeFlanks>,
}

impl Enzyme {
    /// Returns the optimal spacing and spring constants when the enzyme
    /// participates in leader tiling.
    pub fn tiling_parameters(&self) -> Option<(i64, SpringConstants)> {
        self.spacing
            .optimal_distance
            .zip(self.spacing.springs)
    }

    pub fn is_protease(&self) -> bool {
        self.role == EnzymeRole::Protease
    }

    /// Start offsets of every (overlapping) occurrence of the core motif.
    pub fn motif_occurrences<'a>(
        &'a self,
        sequence: &'a [AminoAcid],
    ) -> impl Iterator<Item = usize> + 'a {
        let motif_len = self.motif.len();
        let last_start = sequence.len().checked_sub(motif_len);
        let starts = match (last_start, self.anchor) {
            (None, _) => 0..0,
            (Some(last), MotifAnchor::Anywhere) => 0..last + 1,
            (Some(last), MotifAnchor::End) => last..last + 1,
        };
        starts.filter(move |&start| {
            self.motif
                .iter()
                .zip(&sequence[start..start + motif_len])
                .all(|(allowed, &residue)| allowed.contains(residue))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::residue::parse_sequence;

    fn enzyme_with_motif(codes: &[&str], anchor: MotifAnchor) -> Enzyme {
        Enzyme {
            name: "test".to_string(),
            motif: codes
                .iter()
                .map(|c| ResidueSet::from_codes(c).unwrap())
                .collect(),
            anchor,
            role: EnzymeRole::Modifying,
            spacing: SpacingRule {
                optimal_distance: None,
                modification_offset: 0,
                springs: None,
            },
            recognition_site: None,
            flanks: None,
        }
    }

    #[test]
    fn floating_motif_reports_overlapping_occurrences() {
        let enzyme = enzyme_with_motif(&["A", "A"], MotifAnchor::Anywhere);
        let seq = parse_sequence("AAAG").unwrap();
        let hits: Vec<_> = enzyme.motif_occurrences(&seq).collect();
        assert_eq!(hits, vec![0, 1]);
    }

    #[test]
    fn end_anchored_motif_only_matches_at_the_tail() {
        let enzyme = enzyme_with_motif(&["YW", "S"], MotifAnchor::End);
        let tail = parse_sequence("YSGGYS").unwrap();
        let hits: Vec<_> = enzyme.motif_occurrences(&tail).collect();
        assert_eq!(hits, vec![4]);

        let no_tail = parse_sequence("YSGGGG").unwrap();
        assert_eq!(enzyme.motif_occurrences(&no_tail).count(), 0);
    }

    #[test]
    fn motif_longer_than_sequence_never_matches() {
        let enzyme = enzyme_with_motif(&["A", "A", "A"], MotifAnchor::Anywhere);
        let seq = parse_sequence("AA").unwrap();
        assert_eq!(enzyme.motif_occurrences(&seq).count(), 0);
    }

    #[test]
    fn tiling_parameters_require_both_spacing_and_springs() {
        let mut enzyme = enzyme_with_motif(&["A"], MotifAnchor::Anywhere);
        assert!(enzyme.tiling_parameters().is_none());

        enzyme.spacing.optimal_distance = Some(8);
        assert!(enzyme.tiling_parameters().is_none());

        enzyme.spacing.springs = Some(SpringConstants {
            insertion: 10.0,
            deletion: 300.0,
        });
        let (optimal, springs) = enzyme.tiling_parameters().unwrap();
        assert_eq!(optimal, 8);
        assert_eq!(springs.deletion, 300.0);
    }
}
