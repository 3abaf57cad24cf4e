use serde::Serialize;

use sdnwatch_core::{AddressPair, PairKey};

// ---------------------------------------------------------------------------
// Processing output
// ---------------------------------------------------------------------------

/// Counters collected while processing one export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProcessStats {
    /// Rows handed to the processor.
    pub rows: usize,
    /// Rows skipped for having too few fields.
    pub skipped_rows: usize,
    /// Rows whose remarks looked truncated.
    pub truncated_rows: usize,
    /// Remote lookups performed.
    pub lookups: usize,
    /// Addresses contributed by remote lookups after per-record merging.
    pub recovered_addresses: usize,
    /// Pairs dropped because an equal key was already in the result set.
    pub duplicate_pairs: usize,
}

/// Unique address pairs of one run, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResultSet {
    pub pairs: Vec<AddressPair>,
    pub stats: ProcessStats,
}

impl ResultSet {
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Reconciliation output
// ---------------------------------------------------------------------------

/// Number of distinct addresses attributed to one entity name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityCount {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconMeta {
    pub engine_version: String,
    pub run_at: String,
    /// Content hash of the export the run was computed from, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_hash: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Reconciliation {
    pub meta: ReconMeta,
    pub stats: ProcessStats,
    /// Every pair of this run, for persistence.
    pub pairs: Vec<AddressPair>,
    /// Pairs whose key is absent from the prior snapshot, in run order.
    pub new_pairs: Vec<AddressPair>,
    /// Prior keys that this run no longer produces, sorted.
    pub removed: Vec<PairKey>,
    /// Per-entity counts, sorted by name.
    pub counts: Vec<EntityCount>,
    pub total: usize,
}

impl Reconciliation {
    pub fn with_export_hash(mut self, hash: impl Into<String>) -> Self {
        self.meta.export_hash = Some(hash.into());
        self
    }

    pub fn has_changes(&self) -> bool {
        !self.new_pairs.is_empty() || !self.removed.is_empty()
    }
}
