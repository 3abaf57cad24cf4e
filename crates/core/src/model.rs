use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Export rows
// ---------------------------------------------------------------------------

/// Rows with fewer fields than this are not records.
pub const MIN_FIELDS: usize = 12;

/// Zero-based index of the entity name field.
pub const NAME_FIELD: usize = 1;

/// Zero-based index of the free-text remarks field.
pub const REMARKS_FIELD: usize = 11;

/// One row of the bulk export, fields as read (not yet cleaned).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// 1-based row number in the export, for diagnostics.
    pub row: usize,
    pub fields: Vec<String>,
}

impl RawRecord {
    pub fn new(row: usize, fields: Vec<String>) -> Self {
        Self { row, fields }
    }

    pub fn is_valid(&self) -> bool {
        self.fields.len() >= MIN_FIELDS
    }

    /// Entity name with surrounding whitespace and quotes removed.
    pub fn name(&self) -> Option<&str> {
        self.fields.get(NAME_FIELD).map(|f| clean_field(f))
    }

    /// Remarks text with surrounding whitespace and quotes removed.
    pub fn remarks(&self) -> Option<&str> {
        self.fields.get(REMARKS_FIELD).map(|f| clean_field(f))
    }
}

/// Strip whitespace, then any run of quote characters at either end.
pub fn clean_field(field: &str) -> &str {
    field.trim().trim_matches('"')
}

// ---------------------------------------------------------------------------
// Address pairs
// ---------------------------------------------------------------------------

/// An address attributed to a sanctioned entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressPair {
    pub address: String,
    pub name: String,
}

impl AddressPair {
    pub fn new(address: impl Into<String>, name: impl Into<String>) -> Self {
        Self { address: address.into(), name: name.into() }
    }

    pub fn key(&self) -> PairKey {
        PairKey::new(&self.address, &self.name)
    }
}

/// Dedup identity of a pair: address compared case-insensitively, name exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PairKey {
    pub address: String,
    pub name: String,
}

impl PairKey {
    pub fn new(address: &str, name: &str) -> Self {
        Self { address: address.to_lowercase(), name: name.to_string() }
    }
}

impl From<&AddressPair> for PairKey {
    fn from(pair: &AddressPair) -> Self {
        pair.key()
    }
}
