use std::collections::HashSet;

use sdnwatch_core::PairKey;

use crate::aggregate::count_by_entity;
use crate::dataset::ExistingDataset;
use crate::model::{Reconciliation, ReconMeta, ResultSet};

/// Diff a run's result set against the prior snapshot.
pub fn reconcile(results: ResultSet, existing: &ExistingDataset) -> Reconciliation {
    let ResultSet { pairs, stats } = results;

    let new_pairs: Vec<_> = pairs
        .iter()
        .filter(|p| !existing.contains_pair(p))
        .cloned()
        .collect();

    let current: HashSet<PairKey> = pairs.iter().map(|p| p.key()).collect();
    let mut removed: Vec<PairKey> = existing
        .keys()
        .filter(|k| !current.contains(*k))
        .cloned()
        .collect();
    removed.sort();

    let counts = count_by_entity(&pairs);
    let total = pairs.len();

    Reconciliation {
        meta: ReconMeta {
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
            export_hash: None,
        },
        stats,
        pairs,
        new_pairs,
        removed,
        counts,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use sdnwatch_core::AddressPair;

    fn result_set(pairs: Vec<AddressPair>) -> ResultSet {
        ResultSet { pairs, ..Default::default() }
    }

    #[test]
    fn only_unseen_keys_are_new() {
        let prior: ExistingDataset = vec![AddressPair::new("0xabc", "Jane Doe")].into_iter().collect();
        let run = result_set(vec![
            AddressPair::new("0xABC", "Jane Doe"),
            AddressPair::new("0xabc", "John Roe"),
        ]);

        let recon = reconcile(run, &prior);
        assert_eq!(recon.new_pairs, vec![AddressPair::new("0xabc", "John Roe")]);
        assert!(recon.removed.is_empty());
        assert_eq!(recon.total, 2);
        assert_eq!(recon.pairs.len(), 2);
        assert!(recon.has_changes());
    }

    #[test]
    fn removed_keys_are_reported_sorted() {
        let prior: ExistingDataset = vec![
            AddressPair::new("0x2", "B"),
            AddressPair::new("0x1", "A"),
            AddressPair::new("0x3", "C"),
        ]
        .into_iter()
        .collect();
        let recon = reconcile(result_set(vec![AddressPair::new("0x3", "C")]), &prior);
        assert!(recon.new_pairs.is_empty());
        assert_eq!(recon.removed, vec![PairKey::new("0x1", "A"), PairKey::new("0x2", "B")]);
    }

    #[test]
    fn counts_and_total() {
        let run = result_set(vec![
            AddressPair::new("0x1", "B"),
            AddressPair::new("0x2", "A"),
            AddressPair::new("0x3", "B"),
        ]);
        let recon = reconcile(run, &ExistingDataset::new());
        assert_eq!(recon.total, 3);
        assert_eq!(recon.counts[0].name, "A");
        assert_eq!(recon.counts[1].count, 2);
        assert_eq!(recon.new_pairs.len(), 3);
    }

    #[test]
    fn unchanged_run_has_no_changes() {
        let pairs = vec![AddressPair::new("0x1", "A")];
        let prior = ExistingDataset::from_pairs(&pairs);
        let recon = reconcile(result_set(pairs), &prior).with_export_hash("blake3:00");
        assert!(!recon.has_changes());
        assert_eq!(recon.meta.export_hash.as_deref(), Some("blake3:00"));
    }

    #[test]
    fn serializes_for_json_output() {
        let recon = reconcile(result_set(vec![AddressPair::new("0x1", "A")]), &ExistingDataset::new());
        let json = serde_json::to_value(&recon).unwrap();
        assert_eq!(json["total"], 1);
        assert_eq!(json["new_pairs"][0]["address"], "0x1");
        assert_eq!(json["counts"][0]["name"], "A");
        assert!(json["meta"]["run_at"].is_string());
        assert!(json["meta"].get("export_hash").is_none());
    }

    fn pair_strategy() -> impl Strategy<Value = AddressPair> {
        ("0x[0-9a-fA-F]{1,3}", "[A-C]").prop_map(|(a, n)| AddressPair::new(a, n))
    }

    proptest! {
        #[test]
        fn prior_pairs_never_reported_new(
            prior in proptest::collection::vec(pair_strategy(), 0..12),
            run in proptest::collection::vec(pair_strategy(), 0..12),
            flip in any::<bool>(),
        ) {
            let existing = ExistingDataset::from_pairs(&prior);
            let run: Vec<AddressPair> = run
                .into_iter()
                .map(|p| if flip { AddressPair::new(p.address.to_uppercase().replacen("0X", "0x", 1), p.name) } else { p })
                .collect();
            let recon = reconcile(result_set(run), &existing);
            for pair in &recon.new_pairs {
                prop_assert!(!existing.contains_pair(pair));
                prop_assert!(!prior.iter().any(|p| p.key() == pair.key()));
            }
        }
    }
}
