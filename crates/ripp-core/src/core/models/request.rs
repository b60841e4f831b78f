use serde::Deserialize;
use std::collections::BTreeSet;

/// Core positions at which one enzyme's modification is desired.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModificationRequest {
    pub enzyme: String,
    pub positions: BTreeSet<usize>,
}

impl ModificationRequest {
    pub fn new(enzyme: impl Into<String>, positions: impl IntoIterator<Item = usize>) -> Self {
        Self {
            enzyme: enzyme.into(),
            positions: positions.into_iter().collect(),
        }
    }
}

/// Merges requests naming the same enzyme, keeping first-seen enzyme order.
pub fn group_by_enzyme(requests: &[ModificationRequest]) -> Vec<(&str, BTreeSet<usize>)> {
    let mut grouped: Vec<(&str, BTreeSet<usize>)> = Vec::new();
    for request in requests {
        match grouped
            .iter_mut()
            .find(|(name, _)| *name == request.enzyme.as_str())
        {
            Some((_, positions)) => positions.extend(request.positions.iter().copied()),
            None => grouped.push((request.enzyme.as_str(), request.positions.clone())),
        }
    }
    grouped
}
