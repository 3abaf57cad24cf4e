//! Search form state.
//!
//! The service is an ASP.NET WebForms page: every POST must echo the hidden
//! inputs (`__VIEWSTATE`, `__EVENTVALIDATION`, …) from the GET that preceded
//! it, or the submission is rejected.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};

/// Form field carrying the queried name.
pub const NAME_FIELD: &str = "ctl00$MainContent$txtLastName";

const SCORE_FIELD: &str = "ctl00$MainContent$Slider1";
const SCORE_BOUND_FIELD: &str = "ctl00$MainContent$Slider1_Boundcontrol";
const SUBMIT_FIELD: &str = "ctl00$MainContent$btnSearch";

/// Filters left unset so the name is the only criterion.
const EMPTY_FILTERS: [&str; 7] = [
    "ctl00$MainContent$ddlType",
    "ctl00$MainContent$txtID",
    "ctl00$MainContent$txtAddress",
    "ctl00$MainContent$txtCity",
    "ctl00$MainContent$txtState",
    "ctl00$MainContent$ddlCountry",
    "ctl00$MainContent$ddlList",
];

/// Minimum match score; 100 means exact matching only.
const MAX_SCORE: &str = "100";

static HIDDEN_INPUT: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"input[type="hidden"]"#).expect("valid selector"));

/// Ordered form fields. Setting an existing field keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    fields: Vec<(String, String)>,
}

impl FormState {
    /// Collect every named hidden input of the page, values verbatim.
    pub fn harvest(html: &str) -> Self {
        let document = Html::parse_document(html);
        let mut state = Self::default();
        for input in document.select(&HIDDEN_INPUT) {
            let Some(name) = input.value().attr("name") else {
                continue;
            };
            if name.is_empty() {
                continue;
            }
            state.set(name, input.value().attr("value").unwrap_or(""));
        }
        state
    }

    pub fn set(&mut self, name: &str, value: &str) {
        match self.fields.iter_mut().find(|(k, _)| k == name) {
            Some(field) => field.1 = value.to_string(),
            None => self.fields.push((name.to_string(), value.to_string())),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The submission for a name search: harvested state plus the query.
    pub fn name_query(&self, name: &str) -> Self {
        let mut form = self.clone();
        form.set(NAME_FIELD, name);
        for field in EMPTY_FILTERS {
            form.set(field, "");
        }
        form.set(SCORE_FIELD, MAX_SCORE);
        form.set(SCORE_BOUND_FIELD, MAX_SCORE);
        form.set(SUBMIT_FIELD, "Search");
        form
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }
}
