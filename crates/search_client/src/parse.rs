//! HTML parsing for search responses and detail pages.
//!
//! Missing structure is "no data", never an error: the service renders no
//! results table for an empty search and no identification panel for
//! entities without identifiers.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use serde::Serialize;
use url::Url;

use sdnwatch_core::{has_target_prefix, CITATION_MARKER};

static RESULTS_TABLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("table#gvSearchResults").expect("valid selector"));

static IDENT_PANEL: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div#ctl00_MainContent_pnlIdentification").expect("valid selector"));

static IDENT_TABLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("table#ctl00_MainContent_gvIdentification").expect("valid selector"));

static ROW: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").expect("valid selector"));
static CELL: Lazy<Selector> = Lazy::new(|| Selector::parse("td").expect("valid selector"));
static LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("a").expect("valid selector"));

/// Cells a search result row needs: name, address, type, program, list, score.
const RESULT_CELLS: usize = 6;

/// One row of the search results table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub name: String,
    pub address: String,
    pub entity_type: String,
    pub program: String,
    pub list_type: String,
    pub score: String,
    pub detail_url: Option<Url>,
}

/// One row of a detail page's identification table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identification {
    pub id_type: String,
    pub id_number: String,
}

impl Identification {
    pub fn new(id_type: impl Into<String>, id_number: impl Into<String>) -> Self {
        Self { id_type: id_type.into(), id_number: id_number.into() }
    }
}

fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Rows of `table#gvSearchResults`, detail links resolved against `base`.
pub fn parse_search_results(html: &str, base: &Url) -> Vec<SearchResult> {
    let document = Html::parse_document(html);
    let Some(table) = document.select(&RESULTS_TABLE).next() else {
        return Vec::new();
    };

    let mut results = Vec::new();
    for row in table.select(&ROW) {
        let cells: Vec<ElementRef<'_>> = row.select(&CELL).collect();
        if cells.len() < RESULT_CELLS {
            continue;
        }

        let link = cells[0].select(&LINK).next();
        let name = match link {
            Some(a) => text_of(a),
            None => text_of(cells[0]),
        };
        let detail_url = link
            .and_then(|a| a.value().attr("href"))
            .filter(|href| !href.trim().is_empty())
            .and_then(|href| match base.join(href.trim()) {
                Ok(url) => Some(url),
                Err(e) => {
                    log::debug!("unresolvable detail link '{href}': {e}");
                    None
                }
            });

        results.push(SearchResult {
            name,
            address: text_of(cells[1]),
            entity_type: text_of(cells[2]),
            program: text_of(cells[3]),
            list_type: text_of(cells[4]),
            score: text_of(cells[5]),
            detail_url,
        });
    }
    results
}

/// Identification rows of a detail page, header row skipped.
pub fn parse_identifications(html: &str) -> Vec<Identification> {
    let document = Html::parse_document(html);
    let Some(panel) = document.select(&IDENT_PANEL).next() else {
        return Vec::new();
    };
    let Some(table) = panel.select(&IDENT_TABLE).next() else {
        return Vec::new();
    };

    table
        .select(&ROW)
        .skip(1)
        .filter_map(|row| {
            let cells: Vec<ElementRef<'_>> = row.select(&CELL).collect();
            if cells.len() < 2 {
                return None;
            }
            let ident = Identification::new(text_of(cells[0]), text_of(cells[1]));
            if ident.id_type.is_empty() && ident.id_number.is_empty() {
                return None;
            }
            Some(ident)
        })
        .collect()
}

/// Wallet identifiers of the target family.
pub fn addresses_from_identifications(identifications: &[Identification]) -> Vec<String> {
    identifications
        .iter()
        .filter(|i| i.id_type.trim().starts_with(CITATION_MARKER))
        .map(|i| i.id_number.trim())
        .filter(|n| has_target_prefix(n))
        .map(str::to_string)
        .collect()
}

/// Confidence filter: the result name must contain the query, ignoring case.
pub fn name_matches(query: &str, found: &str) -> bool {
    found.trim().to_lowercase().contains(&query.trim().to_lowercase())
}
