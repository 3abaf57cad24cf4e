//! `sdnwatch lookup`: one name against the search service, for diagnosing
//! what `update` would recover for a truncated row.

use serde::Serialize;

use sdnwatch_config::Settings;
use sdnwatch_search_client::{name_matches, SearchClient, SearchResult};

use crate::CliError;

#[derive(Serialize)]
struct LookupReport<'a> {
    name: &'a str,
    results: Vec<SearchResult>,
    addresses: Vec<String>,
}

pub(crate) fn cmd_lookup(settings: &Settings, name: &str, json: bool) -> Result<(), CliError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CliError::usage("name must not be empty"));
    }

    let client = SearchClient::new(&settings.search_url, settings.request_timeout()).map_err(CliError::lookup)?;

    // The search stage is the one failure that is fatal here.
    let results = client.search(name).map_err(CliError::lookup)?;

    let addresses = client.recover_addresses(name, &results);

    if json {
        let report = LookupReport { name, results, addresses };
        let out = serde_json::to_string_pretty(&report).map_err(|e| CliError::general(e.to_string()))?;
        println!("{out}");
        return Ok(());
    }

    println!("{} result(s) for '{name}'", results.len());
    for r in &results {
        let marker = if name_matches(name, &r.name) { "*" } else { " " };
        println!("{marker} {} [{}] {} {}", r.name, r.entity_type, r.program, r.score);
    }
    if addresses.is_empty() {
        println!("\nNo addresses found");
    } else {
        println!("\n{} address(es):", addresses.len());
        for address in &addresses {
            println!("  {address}");
        }
    }
    Ok(())
}
