use std::collections::HashSet;

use sdnwatch_core::{AddressPair, PairKey};

/// Read-only snapshot of the pairs a previous run published.
#[derive(Debug, Clone, Default)]
pub struct ExistingDataset {
    keys: HashSet<PairKey>,
}

impl ExistingDataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = &'a AddressPair>) -> Self {
        Self { keys: pairs.into_iter().map(AddressPair::key).collect() }
    }

    pub fn contains(&self, key: &PairKey) -> bool {
        self.keys.contains(key)
    }

    pub fn contains_pair(&self, pair: &AddressPair) -> bool {
        self.contains(&pair.key())
    }

    pub fn keys(&self) -> impl Iterator<Item = &PairKey> {
        self.keys.iter()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl FromIterator<AddressPair> for ExistingDataset {
    fn from_iter<I: IntoIterator<Item = AddressPair>>(iter: I) -> Self {
        Self { keys: iter.into_iter().map(|p| p.key()).collect() }
    }
}
