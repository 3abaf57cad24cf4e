//! `sdnwatch-recon`: record processing and reconciliation.
//!
//! Pure engine crate: receives parsed export rows and a prior snapshot,
//! returns the deduplicated result set and what changed. No CLI or IO
//! dependencies; remote lookups come in through [`AddressLookup`].
//!
//! [`AddressLookup`]: sdnwatch_core::AddressLookup

pub mod aggregate;
pub mod dataset;
pub mod engine;
pub mod model;
pub mod processor;

pub use dataset::ExistingDataset;
pub use engine::reconcile;
pub use model::{EntityCount, ProcessStats, Reconciliation, ReconMeta, ResultSet};
pub use processor::{RecordOutcome, RecordProcessor};
