use crate::core::models::placement::Placement;
use crate::core::models::residue::AminoAcid;

/// Packing compatibility of several recognition-site placements.
///
/// Placements are aligned on their right (core-proximal) ends. In every column
/// each literal residue counts as a mismatch for its own site when any other
/// placement holds a different literal there. Each site scores
/// `(site length - mismatches) / site length`; the result is the product over
/// all sites, in [0, 1].
pub fn overlap_score(placements: &[&Placement]) -> f64 {
    let width = placements.iter().map(|p| p.len()).max().unwrap_or(0);
    let mut mismatches = vec![0usize; placements.len()];

    let mut column: Vec<Option<AminoAcid>> = Vec::with_capacity(placements.len());
    for offset in 0..width {
        column.clear();
        column.extend(placements.iter().map(|p| slot_from_right(p, offset)));

        for (i, residue) in column.iter().enumerate() {
            let Some(residue) = residue else {
                continue;
            };
            let conflicting = column
                .iter()
                .enumerate()
                .any(|(j, other)| j != i && matches!(other, Some(o) if o != residue));
            if conflicting {
                mismatches[i] += 1;
            }
        }
    }

    placements
        .iter()
        .zip(mismatches)
        .map(|(placement, mismatch_count)| {
            let site_len = placement.site().len();
            if site_len == 0 {
                1.0
            } else {
                (site_len - mismatch_count) as f64 / site_len as f64
            }
        })
        .product()
}

#[inline]
fn slot_from_right(placement: &Placement, offset: usize) -> Option<AminoAcid> {
    placement
        .len()
        .checked_sub(offset + 1)
        .and_then(|index| placement.slot(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placement(text: &str) -> Placement {
        text.parse().unwrap()
    }

    #[test]
    fn single_placement_scores_one() {
        let p = placement("LAELSEEALxxxx");
        assert_eq!(overlap_score(&[&p]), 1.0);
    }

    #[test]
    fn placement_compared_with_itself_scores_one() {
        let p = placement("ENLYFQxx");
        assert_eq!(overlap_score(&[&p, &p]), 1.0);
    }

    #[test]
    fn no_placements_score_one() {
        assert_eq!(overlap_score(&[]), 1.0);
    }

    #[test]
    fn non_overlapping_sites_score_one() {
        let far = placement("LAELSEEALxxxxxxxx");
        let near = placement("ENLYFQxx");
        assert_eq!(overlap_score(&[&far, &near]), 1.0);
    }

    #[test]
    fn fully_conflicting_sites_score_zero() {
        let a = placement("AAAA");
        let b = placement("CCCC");
        assert_eq!(overlap_score(&[&a, &b]), 0.0);
    }

    #[test]
    fn partial_conflicts_are_scored_per_site() {
        let a = placement("GSGS");
        let b = placement("GAx");
        // Columns from the right: (S, x), (G, A), (S, G), (G, -).
        // a mismatches at 2 of 4 columns, b at both of its 2 literal columns.
        let score = overlap_score(&[&a, &b]);
        assert!((score - 0.5 * 0.0).abs() < 1e-12);

        let c = placement("GSxx");
        let d = placement("GAxx");
        let score = overlap_score(&[&c, &d]);
        assert!((score - 0.5 * 0.5).abs() < 1e-12);
    }

    #[test]
    fn shared_identical_residues_do_not_conflict() {
        let a = placement("EEAL");
        let b = placement("EEALxxxx");
        let c = placement("xxxxEEAL");
        assert_eq!(overlap_score(&[&b, &c]), 1.0);
        assert_eq!(overlap_score(&[&a, &c]), 1.0);
    }
}
