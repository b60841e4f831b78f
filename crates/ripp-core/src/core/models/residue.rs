use phf::{Map, phf_map};
use std::fmt;
use std::ops::BitAnd;
use thiserror::Error;

/// The wildcard filler used in textual placements. Never a residue.
pub const WILDCARD: char = 'x';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AminoAcid {
    Alanine,       // A
    Cysteine,      // C
    AsparticAcid,  // D
    GlutamicAcid,  // E
    Phenylalanine, // F
    Glycine,       // G
    Histidine,     // H
    Isoleucine,    // I
    Lysine,        // K
    Leucine,       // L
    Methionine,    // M
    Asparagine,    // N
    Proline,       // P
    Glutamine,     // Q
    Arginine,      // R
    Serine,        // S
    Threonine,     // T
    Valine,        // V
    Tryptophan,    // W
    Tyrosine,      // Y
}

static ONE_LETTER_CODES: Map<char, AminoAcid> = phf_map! {
    'A' => AminoAcid::Alanine,
    'C' => AminoAcid::Cysteine,
    'D' => AminoAcid::AsparticAcid,
    'E' => AminoAcid::GlutamicAcid,
    'F' => AminoAcid::Phenylalanine,
    'G' => AminoAcid::Glycine,
    'H' => AminoAcid::Histidine,
    'I' => AminoAcid::Isoleucine,
    'K' => AminoAcid::Lysine,
    'L' => AminoAcid::Leucine,
    'M' => AminoAcid::Methionine,
    'N' => AminoAcid::Asparagine,
    'P' => AminoAcid::Proline,
    'Q' => AminoAcid::Glutamine,
    'R' => AminoAcid::Arginine,
    'S' => AminoAcid::Serine,
    'T' => AminoAcid::Threonine,
    'V' => AminoAcid::Valine,
    'W' => AminoAcid::Tryptophan,
    'Y' => AminoAcid::Tyrosine,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("'{0}' is not a canonical amino-acid code")]
pub struct ParseResidueError(pub char);

impl AminoAcid {
    /// All 20 canonical residues in one-letter-code order.
    pub const ALL: [AminoAcid; 20] = [
        AminoAcid::Alanine,
        AminoAcid::Cysteine,
        AminoAcid::AsparticAcid,
        AminoAcid::GlutamicAcid,
        AminoAcid::Phenylalanine,
        AminoAcid::Glycine,
        AminoAcid::Histidine,
        AminoAcid::Isoleucine,
        AminoAcid::Lysine,
        AminoAcid::Leucine,
        AminoAcid::Methionine,
        AminoAcid::Asparagine,
        AminoAcid::Proline,
        AminoAcid::Glutamine,
        AminoAcid::Arginine,
        AminoAcid::Serine,
        AminoAcid::Threonine,
        AminoAcid::Valine,
        AminoAcid::Tryptophan,
        AminoAcid::Tyrosine,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn one_letter_code(self) -> char {
        match self {
            AminoAcid::Alanine => 'A',
            AminoAcid::Cysteine => 'C',
            AminoAcid::AsparticAcid => 'D',
            AminoAcid::GlutamicAcid => 'E',
            AminoAcid::Phenylalanine => 'F',
            AminoAcid::Glycine => 'G',
            AminoAcid::Histidine => 'H',
            AminoAcid::Isoleucine => 'I',
            AminoAcid::Lysine => 'K',
            AminoAcid::Leucine => 'L',
            AminoAcid::Methionine => 'M',
            AminoAcid::Asparagine => 'N',
            AminoAcid::Proline => 'P',
            AminoAcid::Glutamine => 'Q',
            AminoAcid::Arginine => 'R',
            AminoAcid::Serine => 'S',
            AminoAcid::Threonine => 'T',
            AminoAcid::Valine => 'V',
            AminoAcid::Tryptophan => 'W',
            AminoAcid::Tyrosine => 'Y',
        }
    }

    /// Case-insensitive lookup of a one-letter code.
    pub fn from_code(code: char) -> Option<Self> {
        ONE_LETTER_CODES.get(&code.to_ascii_uppercase()).copied()
    }
}

impl TryFrom<char> for AminoAcid {
    type Error = ParseResidueError;

    fn try_from(code: char) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or(ParseResidueError(code))
    }
}

impl fmt::Display for AminoAcid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.one_letter_code())
    }
}

/// Parses a literal residue string such as a recognition site or flank.
pub fn parse_sequence(sequence: &str) -> Result<Vec<AminoAcid>, ParseResidueError> {
    sequence.chars().map(AminoAcid::try_from).collect()
}

const FULL_MASK: u32 = (1 << 20) - 1;

/// A subset of the 20-residue alphabet, stored as a bit mask.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ResidueSet(u32);

impl ResidueSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn full() -> Self {
        Self(FULL_MASK)
    }

    pub fn from_codes(codes: &str) -> Result<Self, ParseResidueError> {
        codes
            .chars()
            .map(AminoAcid::try_from)
            .collect::<Result<Self, _>>()
    }

    #[inline]
    pub fn insert(&mut self, residue: AminoAcid) {
        self.0 |= 1 << residue.index();
    }

    #[inline]
    pub fn contains(self, residue: AminoAcid) -> bool {
        self.0 & (1 << residue.index()) != 0
    }

    #[inline]
    pub fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    #[inline]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn is_full(self) -> bool {
        self.0 == FULL_MASK
    }

    /// Members in alphabet order.
    pub fn iter(self) -> impl Iterator<Item = AminoAcid> {
        AminoAcid::ALL
            .into_iter()
            .filter(move |&residue| self.contains(residue))
    }
}

impl BitAnd for ResidueSet {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.intersection(rhs)
    }
}

impl FromIterator<AminoAcid> for ResidueSet {
    fn from_iter<I: IntoIterator<Item = AminoAcid>>(iter: I) -> Self {
        let mut set = Self::empty();
        for residue in iter {
            set.insert(residue);
        }
        set
    }
}

impl fmt::Display for ResidueSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for residue in self.iter() {
            write!(f, "{}", residue)?;
        }
        write!(f, "]")
    }
}

impl fmt::Debug for ResidueSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ResidueSet{}", self)
    }
}
