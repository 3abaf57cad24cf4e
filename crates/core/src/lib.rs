//! `sdnwatch-core`: shared types and the pure text heuristics.
//!
//! No network, no file I/O. Everything here is deterministic and safe to
//! call from any thread.

pub mod extract;
pub mod lookup;
pub mod model;
pub mod truncation;

pub use extract::{extract_addresses, has_target_prefix, ADDRESS_PREFIX, CITATION_MARKER, PLACEHOLDER};
pub use lookup::{AddressLookup, NoLookup};
pub use model::{AddressPair, PairKey, RawRecord, MIN_FIELDS};
pub use truncation::{is_truncated, TruncationRule};
