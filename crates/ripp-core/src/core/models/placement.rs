use super::residue::{AminoAcid, WILDCARD};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One enzyme's recognition site positioned inside a leader.
///
/// Textually a placement reads `xxSITExxxx`: leading wildcard padding, the
/// literal recognition site, then the spacer run separating the site from the
/// core. Placements are aligned on their right (core-proximal) ends.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Placement {
    leading: usize,
    site: Vec<AminoAcid>,
    spacer: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParsePlacementError {
    #[error("Placement '{0}' contains no recognition-site residues")]
    MissingSite(String),
    #[error("Unexpected character '{ch}' at index {index} in placement '{text}'")]
    UnexpectedCharacter {
        text: String,
        index: usize,
        ch: char,
    },
}

impl Placement {
    pub fn new(site: Vec<AminoAcid>, spacer: usize) -> Self {
        Self {
            leading: 0,
            site,
            spacer,
        }
    }

    pub fn leading(&self) -> usize {
        self.leading
    }

    pub fn site(&self) -> &[AminoAcid] {
        &self.site
    }

    /// Length of the wildcard run between the site and the core.
    pub fn spacer(&self) -> usize {
        self.spacer
    }

    pub fn len(&self) -> usize {
        self.leading + self.site.len() + self.spacer
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Left-pads with wildcards up to `length`. Longer placements are unchanged.
    pub fn padded_to(&self, length: usize) -> Self {
        let mut padded = self.clone();
        padded.leading += length.saturating_sub(self.len());
        padded
    }

    /// The residue at `index`, or `None` for a wildcard.
    pub fn slot(&self, index: usize) -> Option<AminoAcid> {
        index
            .checked_sub(self.leading)
            .and_then(|offset| self.site.get(offset).copied())
    }
}

impl FromStr for Placement {
    type Err = ParsePlacementError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let is_wildcard = |c: char| c.eq_ignore_ascii_case(&WILDCARD);
        let unexpected = |index: usize, ch: char| ParsePlacementError::UnexpectedCharacter {
            text: text.to_string(),
            index,
            ch,
        };

        let mut chars = text.chars().enumerate().peekable();
        let mut leading = 0;
        while chars.next_if(|&(_, c)| is_wildcard(c)).is_some() {
            leading += 1;
        }

        let mut site = Vec::new();
        while let Some((index, c)) = chars.next_if(|&(_, c)| !is_wildcard(c)) {
            if !c.is_ascii_uppercase() {
                return Err(unexpected(index, c));
            }
            site.push(AminoAcid::try_from(c).map_err(|_| unexpected(index, c))?);
        }
        if site.is_empty() {
            return Err(ParsePlacementError::MissingSite(text.to_string()));
        }

        let mut spacer = 0;
        for (index, c) in chars {
            if !is_wildcard(c) {
                return Err(unexpected(index, c));
            }
            spacer += 1;
        }

        Ok(Self {
            leading,
            site,
            spacer,
        })
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for index in 0..self.len() {
            match self.slot(index) {
                Some(residue) => write!(f, "{}", residue)?,
                None => write!(f, "{}", WILDCARD)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::residue::parse_sequence;

    #[test]
    fn parse_splits_leading_site_and_spacer() {
        let placement: Placement = "xxLAELSEEALxxxxx".parse().unwrap();
        assert_eq!(placement.leading(), 2);
        assert_eq!(placement.site(), parse_sequence("LAELSEEAL").unwrap());
        assert_eq!(placement.spacer(), 5);
        assert_eq!(placement.len(), 16);
    }

    #[test]
    fn display_is_the_inverse_of_parse() {
        let text = "xENLYFQxxx";
        let placement: Placement = text.parse().unwrap();
        assert_eq!(placement.to_string(), text);
    }

    #[test]
    fn parse_rejects_placements_without_a_site() {
        assert!(matches!(
            "xxxx".parse::<Placement>(),
            Err(ParsePlacementError::MissingSite(_))
        ));
        assert!(matches!(
            "".parse::<Placement>(),
            Err(ParsePlacementError::MissingSite(_))
        ));
    }

    #[test]
    fn parse_rejects_split_sites_and_lowercase_residues() {
        assert!(matches!(
            "ENLxYFQ".parse::<Placement>(),
            Err(ParsePlacementError::UnexpectedCharacter { index: 4, ch: 'Y', .. })
        ));
        assert!(matches!(
            "ENlYFQ".parse::<Placement>(),
            Err(ParsePlacementError::UnexpectedCharacter { index: 2, ch: 'l', .. })
        ));
        assert!(matches!(
            "ENBYFQ".parse::<Placement>(),
            Err(ParsePlacementError::UnexpectedCharacter { ch: 'B', .. })
        ));
    }

    #[test]
    fn padded_to_adds_leading_wildcards_only() {
        let placement = Placement::new(parse_sequence("ENLYFQ").unwrap(), 2);
        let padded = placement.padded_to(12);
        assert_eq!(padded.to_string(), "xxxxENLYFQxx");
        assert_eq!(placement.padded_to(4), placement);
    }

    #[test]
    fn slot_is_none_outside_the_site() {
        let placement: Placement = "xGSxx".parse().unwrap();
        let slots: Vec<_> = (0..placement.len()).map(|i| placement.slot(i)).collect();
        assert_eq!(
            slots,
            vec![None, Some(AminoAcid::Glycine), Some(AminoAcid::Serine), None, None]
        );
        assert_eq!(placement.slot(10), None);
    }
}
