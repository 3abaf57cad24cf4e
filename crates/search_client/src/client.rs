//! Search service HTTP client.
//!
//! Blocking reqwest client (no Tokio runtime required).
//! Stage A: GET search page → harvest form state → POST name query.
//! Stage B: GET each matching result's detail page.

use std::collections::HashSet;
use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use url::Url;

use sdnwatch_core::AddressLookup;

use crate::error::{LookupError, Stage};
use crate::form::FormState;
use crate::parse::{
    addresses_from_identifications, name_matches, parse_identifications, parse_search_results,
    Identification, SearchResult,
};

pub const DEFAULT_SEARCH_URL: &str = "https://sanctionssearch.ofac.treas.gov/";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!("sdnwatch/", env!("CARGO_PKG_VERSION"));

/// Search service client. Cheap to clone; holds no form state itself.
#[derive(Clone)]
pub struct SearchClient {
    search_url: Url,
    timeout: Duration,
    /// Cookie-less client for detail pages.
    detail_http: Client,
}

impl SearchClient {
    pub fn new(search_url: &str, timeout: Duration) -> Result<Self, LookupError> {
        let search_url = Url::parse(search_url).map_err(|e| LookupError::InvalidUrl {
            url: search_url.to_string(),
            reason: e.to_string(),
        })?;
        let detail_http = build_http(timeout, false)?;
        Ok(Self { search_url, timeout, detail_http })
    }

    /// Stage A in a fresh session.
    pub fn search(&self, name: &str) -> Result<Vec<SearchResult>, LookupError> {
        SearchSession::open(&self.search_url, self.timeout)?.submit(name)
    }

    /// Stage B for one result.
    pub fn identifications(&self, detail_url: &Url) -> Result<Vec<Identification>, LookupError> {
        let resp = send(self.detail_http.get(detail_url.clone()), Stage::Detail)?;
        let html = read_body(resp, Stage::Detail)?;
        Ok(parse_identifications(&html))
    }

    /// Both stages for one name. Failures are logged and yield what was
    /// recovered so far.
    pub fn query_addresses(&self, name: &str) -> Vec<String> {
        log::info!("querying search service for: {name}");

        let results = match self.search(name) {
            Ok(results) => results,
            Err(e) => {
                log::warn!("search for '{name}' failed: {e}");
                return Vec::new();
            }
        };
        log::debug!("search for '{name}' returned {} row(s)", results.len());

        self.recover_addresses(name, &results)
    }

    /// Stage B over the results of a search for `name`: follow every result
    /// whose name contains the query and collect its target addresses, first
    /// occurrence kept (address case ignored). A failed detail page is logged
    /// and skipped.
    pub fn recover_addresses(&self, name: &str, results: &[SearchResult]) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut addresses = Vec::new();
        for result in results {
            if !name_matches(name, &result.name) {
                log::debug!("skipping result '{}': does not contain '{name}'", result.name);
                continue;
            }
            let Some(detail_url) = &result.detail_url else {
                continue;
            };
            match self.identifications(detail_url) {
                Ok(idents) => {
                    for address in addresses_from_identifications(&idents) {
                        if seen.insert(address.to_lowercase()) {
                            addresses.push(address);
                        }
                    }
                }
                Err(e) => log::warn!("detail page for '{}' failed: {e}", result.name),
            }
        }
        addresses
    }
}

impl AddressLookup for SearchClient {
    fn lookup_addresses(&self, name: &str) -> Vec<String> {
        self.query_addresses(name)
    }
}

/// One search form session: cookies plus the hidden state harvested from
/// the search page. Consumed by [`SearchSession::submit`]; never reused
/// across names.
pub struct SearchSession {
    http: Client,
    search_url: Url,
    form: FormState,
}

impl SearchSession {
    /// GET the search page and harvest its hidden form state.
    pub fn open(search_url: &Url, timeout: Duration) -> Result<Self, LookupError> {
        let http = build_http(timeout, true)?;
        let resp = send(http.get(search_url.clone()), Stage::SearchPage)?;
        let html = read_body(resp, Stage::SearchPage)?;
        let form = FormState::harvest(&html);
        log::debug!("harvested {} hidden field(s) from {search_url}", form.len());
        Ok(Self { http, search_url: search_url.clone(), form })
    }

    /// POST the name query with the harvested state, in the same session.
    pub fn submit(self, name: &str) -> Result<Vec<SearchResult>, LookupError> {
        let form = self.form.name_query(name);
        let req = self.http.post(self.search_url.clone()).form(form.fields());
        let resp = send(req, Stage::SearchSubmit)?;
        let html = read_body(resp, Stage::SearchSubmit)?;
        Ok(parse_search_results(&html, &self.search_url))
    }
}

// ── Internal helpers ────────────────────────────────────────────────

fn build_http(timeout: Duration, cookies: bool) -> Result<Client, LookupError> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .cookie_store(cookies)
        .build()
        .map_err(|e| LookupError::Client(e.to_string()))
}

fn send(req: RequestBuilder, stage: Stage) -> Result<Response, LookupError> {
    let response = req
        .send()
        .map_err(|e| LookupError::Network { stage, message: e.to_string() })?;

    if !response.status().is_success() {
        return Err(LookupError::Http { stage, status: response.status().as_u16() });
    }
    Ok(response)
}

fn read_body(response: Response, stage: Stage) -> Result<String, LookupError> {
    response
        .text()
        .map_err(|e| LookupError::Network { stage, message: e.to_string() })
}
