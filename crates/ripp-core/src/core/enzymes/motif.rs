use crate::core::models::enzyme::MotifAnchor;
use crate::core::models::residue::{AminoAcid, ResidueSet};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MotifParseError {
    #[error("Motif is empty")]
    Empty,
    #[error("Unclosed '[' opened at index {0}")]
    UnclosedBracket(usize),
    #[error("Unexpected '{ch}' at index {index}")]
    UnexpectedCharacter { index: usize, ch: char },
    #[error("Unknown residue '{ch}' at index {index}")]
    UnknownResidue { index: usize, ch: char },
    #[error("Motif position {0} allows no residues")]
    EmptyPosition(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedMotif {
    pub positions: Vec<ResidueSet>,
    pub anchor: MotifAnchor,
}

/// Parses bracket notation such as `[HYF][YLC]DS$`.
///
/// Bracketed groups list the residues allowed at one position, bare letters
/// are single-residue positions, and a trailing `$` anchors the motif to the
/// end of the sequence.
pub fn parse_motif(text: &str) -> Result<ParsedMotif, MotifParseError> {
    let text = text.trim();
    let (body, anchor) = match text.strip_suffix('$') {
        Some(body) => (body, MotifAnchor::End),
        None => (text, MotifAnchor::Anywhere),
    };

    let mut positions = Vec::new();
    let mut chars = body.char_indices();
    while let Some((index, ch)) = chars.next() {
        match ch {
            '[' => {
                let mut set = ResidueSet::empty();
                let mut closed = false;
                for (inner_index, inner) in chars.by_ref() {
                    match inner {
                        ']' => {
                            closed = true;
                            break;
                        }
                        '[' | '$' => {
                            return Err(MotifParseError::UnexpectedCharacter {
                                index: inner_index,
                                ch: inner,
                            });
                        }
                        _ => set.insert(residue_at(inner_index, inner)?),
                    }
                }
                if !closed {
                    return Err(MotifParseError::UnclosedBracket(index));
                }
                if set.is_empty() {
                    return Err(MotifParseError::EmptyPosition(positions.len()));
                }
                positions.push(set);
            }
            ']' | '$' => return Err(MotifParseError::UnexpectedCharacter { index, ch }),
            _ => positions.push(std::iter::once(residue_at(index, ch)?).collect()),
        }
    }

    if positions.is_empty() {
        return Err(MotifParseError::Empty);
    }
    Ok(ParsedMotif { positions, anchor })
}

fn residue_at(index: usize, ch: char) -> Result<AminoAcid, MotifParseError> {
    AminoAcid::from_code(ch).ok_or(MotifParseError::UnknownResidue { index, ch })
}
