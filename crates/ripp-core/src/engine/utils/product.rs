/// Flat indexing of a Cartesian product of finite dimensions.
///
/// Index `0` is the first choice in every dimension and the last dimension
/// varies fastest, so iterating `0..len()` visits combinations in
/// lexicographic order. Independent index ranges can be evaluated in parallel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSpace {
    radices: Vec<usize>,
    len: usize,
}

impl ProductSpace {
    /// Returns `None` when the number of combinations overflows `usize`.
    pub fn new(radices: Vec<usize>) -> Option<Self> {
        let len = radices
            .iter()
            .try_fold(1usize, |acc, &radix| acc.checked_mul(radix))?;
        Some(Self { radices, len })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Writes the per-dimension choice of combination `index` into `digits`.
    pub fn decode_into(&self, mut index: usize, digits: &mut [usize]) {
        debug_assert!(index < self.len);
        debug_assert_eq!(digits.len(), self.radices.len());
        for (digit, &radix) in digits.iter_mut().zip(&self.radices).rev() {
            *digit = index % radix;
            index /= radix;
        }
    }

    pub fn decode(&self, index: usize) -> Vec<usize> {
        let mut digits = vec![0; self.radices.len()];
        self.decode_into(index, &mut digits);
        digits
    }
}
