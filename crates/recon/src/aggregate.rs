use std::collections::BTreeMap;

use sdnwatch_core::AddressPair;

use crate::model::EntityCount;

/// Count pairs per entity name, sorted by name (byte order).
///
/// Pairs are expected to be unique by key already, so the count is the
/// number of distinct addresses per name.
pub fn count_by_entity(pairs: &[AddressPair]) -> Vec<EntityCount> {
    let mut groups: BTreeMap<&str, usize> = BTreeMap::new();
    for pair in pairs {
        *groups.entry(pair.name.as_str()).or_insert(0) += 1;
    }

    groups
        .into_iter()
        .map(|(name, count)| EntityCount { name: name.to_string(), count })
        .collect()
}
