//! Sanctions search service client.
//!
//! Recovers wallet addresses for an entity name when the bulk export cut them
//! off. Two stages: a stateful search form session, then one plain GET per
//! matching result's detail page.
//!
//! Blocking reqwest, one attempt per request, no retries.

mod client;
mod error;
mod form;
mod parse;

pub use client::{SearchClient, SearchSession, DEFAULT_SEARCH_URL, DEFAULT_TIMEOUT};
pub use error::{LookupError, Stage};
pub use form::{FormState, NAME_FIELD};
pub use parse::{
    addresses_from_identifications, name_matches, parse_identifications, parse_search_results,
    Identification, SearchResult,
};
