//! Per-record processing: local extraction, remote recovery for truncated
//! remarks, and global deduplication.

use std::collections::HashSet;

use sdnwatch_core::{extract_addresses, AddressLookup, AddressPair, PairKey, RawRecord, TruncationRule};

use crate::model::{ProcessStats, ResultSet};

/// What happened to one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    /// Too few fields; ignored.
    Skipped,
    Processed {
        /// Remarks looked truncated and a lookup ran.
        truncated: bool,
        /// Candidate addresses after merging local and recovered ones.
        candidates: usize,
        /// Pairs that were new to the result set.
        added: usize,
    },
}

/// Owns the dedup set and the growing result list for one run.
pub struct RecordProcessor<L> {
    lookup: L,
    rule: TruncationRule,
    seen: HashSet<PairKey>,
    pairs: Vec<AddressPair>,
    stats: ProcessStats,
}

impl<L: AddressLookup> RecordProcessor<L> {
    pub fn new(lookup: L) -> Self {
        Self::with_rule(lookup, TruncationRule::default())
    }

    pub fn with_rule(lookup: L, rule: TruncationRule) -> Self {
        Self {
            lookup,
            rule,
            seen: HashSet::new(),
            pairs: Vec::new(),
            stats: ProcessStats::default(),
        }
    }

    pub fn process(&mut self, record: &RawRecord) -> RecordOutcome {
        self.stats.rows += 1;

        let (true, Some(name), Some(remarks)) = (record.is_valid(), record.name(), record.remarks()) else {
            self.stats.skipped_rows += 1;
            return RecordOutcome::Skipped;
        };

        let mut candidates = extract_addresses(remarks);

        let truncated = self.rule.is_truncated(remarks);
        if truncated {
            self.stats.truncated_rows += 1;
            self.stats.lookups += 1;
            log::info!("row {}: truncated remarks for {name}, looking up remaining addresses", record.row);

            let recovered = self.lookup.lookup_addresses(name);
            let merged = merge_recovered(&mut candidates, recovered);
            if merged > 0 {
                log::info!("row {}: recovered {merged} address(es) for {name}", record.row);
            } else {
                log::info!("row {}: no additional addresses found for {name}", record.row);
            }
            self.stats.recovered_addresses += merged;
        }

        let total = candidates.len();
        let mut added = 0;
        for address in candidates {
            if self.push(AddressPair::new(address, name)) {
                added += 1;
            }
        }

        RecordOutcome::Processed { truncated, candidates: total, added }
    }

    pub fn process_all<'a>(&mut self, records: impl IntoIterator<Item = &'a RawRecord>) {
        for record in records {
            self.process(record);
        }
    }

    /// Hand over the result set; the dedup set goes with the processor.
    pub fn finish(self) -> ResultSet {
        ResultSet { pairs: self.pairs, stats: self.stats }
    }

    fn push(&mut self, pair: AddressPair) -> bool {
        if self.seen.insert(pair.key()) {
            self.pairs.push(pair);
            true
        } else {
            self.stats.duplicate_pairs += 1;
            false
        }
    }
}

/// Append recovered addresses that are not already candidates (address case
/// ignored). Local addresses stay first. Returns how many were appended.
pub fn merge_recovered(candidates: &mut Vec<String>, recovered: Vec<String>) -> usize {
    let mut known: HashSet<String> = candidates.iter().map(|a| a.to_lowercase()).collect();
    let before = candidates.len();
    for address in recovered {
        if known.insert(address.to_lowercase()) {
            candidates.push(address);
        }
    }
    candidates.len() - before
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    use sdnwatch_core::NoLookup;

    /// Canned lookup that records which names were queried.
    #[derive(Default)]
    struct FakeLookup {
        answers: HashMap<String, Vec<String>>,
        calls: RefCell<Vec<String>>,
    }

    impl FakeLookup {
        fn with(name: &str, addresses: &[&str]) -> Self {
            let mut answers = HashMap::new();
            answers.insert(name.to_string(), addresses.iter().map(|s| s.to_string()).collect());
            Self { answers, calls: RefCell::new(Vec::new()) }
        }
    }

    impl AddressLookup for FakeLookup {
        fn lookup_addresses(&self, name: &str) -> Vec<String> {
            self.calls.borrow_mut().push(name.to_string());
            self.answers.get(name).cloned().unwrap_or_default()
        }
    }

    fn record(row: usize, name: &str, remarks: &str) -> RawRecord {
        let mut fields = vec!["-0- ".to_string(); 12];
        fields[0] = row.to_string();
        fields[1] = format!("\"{name}\"");
        fields[11] = format!("\"{remarks}\"");
        RawRecord::new(row, fields)
    }

    fn truncated_remarks(visible: &str) -> String {
        let head = format!("Digital Currency Address - ETH {visible}; ");
        format!("{head}{}Digital Currency Address - ETH 0x99", "x".repeat(1000 - head.len() - 34))
    }

    #[test]
    fn short_rows_are_skipped() {
        let mut p = RecordProcessor::new(NoLookup);
        let r = RawRecord::new(1, vec!["a".into(), "b".into()]);
        assert_eq!(p.process(&r), RecordOutcome::Skipped);
        let set = p.finish();
        assert!(set.is_empty());
        assert_eq!(set.stats.skipped_rows, 1);
    }

    #[test]
    fn local_extraction_without_lookup() {
        let lookup = FakeLookup::default();
        let mut p = RecordProcessor::new(&lookup);
        let outcome = p.process(&record(1, "Jane Doe", "Digital Currency Address - ETH 0xabc; alt. Digital Currency Address - ETH 0xdef."));
        assert_eq!(outcome, RecordOutcome::Processed { truncated: false, candidates: 2, added: 2 });
        assert!(lookup.calls.borrow().is_empty());
        let set = p.finish();
        assert_eq!(set.pairs, vec![AddressPair::new("0xabc", "Jane Doe"), AddressPair::new("0xdef", "Jane Doe")]);
    }

    #[test]
    fn truncated_remarks_merge_recovered_after_local() {
        let lookup = FakeLookup::with("GARANTEX", &["0xAAA", "0xBBB", "0xccc"]);
        let mut p = RecordProcessor::new(&lookup);
        let remarks = truncated_remarks("0xaaa");
        assert!(remarks.chars().count() >= 990);

        let outcome = p.process(&record(7, "GARANTEX", &remarks));
        assert_eq!(outcome, RecordOutcome::Processed { truncated: true, candidates: 4, added: 4 });
        assert_eq!(*lookup.calls.borrow(), vec!["GARANTEX"]);

        let set = p.finish();
        let addresses: Vec<&str> = set.pairs.iter().map(|p| p.address.as_str()).collect();
        // 0xAAA collapses into the locally found 0xaaa.
        assert_eq!(addresses, vec!["0xaaa", "0x99", "0xBBB", "0xccc"]);
        assert_eq!(set.stats.truncated_rows, 1);
        assert_eq!(set.stats.lookups, 1);
        assert_eq!(set.stats.recovered_addresses, 2);
    }

    #[test]
    fn lookup_returning_nothing_keeps_local() {
        let mut p = RecordProcessor::new(NoLookup);
        let outcome = p.process(&record(1, "X", &truncated_remarks("0x01")));
        assert_eq!(outcome, RecordOutcome::Processed { truncated: true, candidates: 2, added: 2 });
    }

    #[test]
    fn dedup_is_global_across_records() {
        let mut p = RecordProcessor::new(NoLookup);
        p.process(&record(1, "X", "Digital Currency Address - ETH 0xABC;"));
        let outcome = p.process(&record(2, "X", "Digital Currency Address - ETH 0xabc;"));
        assert_eq!(outcome, RecordOutcome::Processed { truncated: false, candidates: 1, added: 0 });
        p.process(&record(3, "x", "Digital Currency Address - ETH 0xabc;"));

        let set = p.finish();
        assert_eq!(set.pairs, vec![AddressPair::new("0xABC", "X"), AddressPair::new("0xabc", "x")]);
        assert_eq!(set.stats.duplicate_pairs, 1);
    }

    #[test]
    fn duplicates_within_one_record_collapse() {
        let mut p = RecordProcessor::new(NoLookup);
        p.process(&record(1, "X", "Digital Currency Address - ETH 0x1; alt. Digital Currency Address - ETH 0x1;"));
        assert_eq!(p.finish().len(), 1);
    }

    #[test]
    fn merge_keeps_local_order_and_folds_case() {
        let mut candidates = vec!["0xAb".to_string()];
        let merged = merge_recovered(&mut candidates, vec!["0xab".into(), "0xCD".into(), "0xcd".into()]);
        assert_eq!(merged, 1);
        assert_eq!(candidates, vec!["0xAb", "0xCD"]);
    }
}
