//! Address extraction from export remarks.
//!
//! Remarks cite wallets as `[alt.] Digital Currency Address - <CODE> <TOKEN>`.
//! Every citation is matched regardless of currency; only tokens carrying the
//! target prefix survive the second step.

use once_cell::sync::Lazy;
use regex::Regex;

/// Value the export uses for "no data".
pub const PLACEHOLDER: &str = "-0-";

/// Literal label every wallet citation carries.
pub const CITATION_MARKER: &str = "Digital Currency Address";

/// Prefix of the address family we keep (ETH-style).
pub const ADDRESS_PREFIX: &str = "0x";

static CITATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:alt\.\s*)?Digital Currency Address\s*-\s*\w+\s+([A-Za-z0-9]+)")
        .expect("citation pattern is valid")
});

/// True for text that cannot contain a citation at all.
pub(crate) fn is_blank(text: &str) -> bool {
    text.is_empty() || text == PLACEHOLDER
}

/// Raw citation tokens in order of appearance, any currency.
pub fn citation_tokens(text: &str) -> Vec<&str> {
    if is_blank(text) {
        return Vec::new();
    }
    CITATION_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect()
}

pub fn has_target_prefix(token: &str) -> bool {
    token.starts_with(ADDRESS_PREFIX)
}

/// Target-family addresses cited in `text`, in order, duplicates kept.
pub fn extract_addresses(text: &str) -> Vec<String> {
    citation_tokens(text)
        .into_iter()
        .filter(|t| has_target_prefix(t))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn keeps_only_target_prefix() {
        let text = "Website x.io; alt. Digital Currency Address - ETH 0xAbC123; \
                    Digital Currency Address - BTC 1xyz; Secondary sanctions risk.";
        assert_eq!(extract_addresses(text), vec!["0xAbC123"]);
        assert_eq!(citation_tokens(text), vec!["0xAbC123", "1xyz"]);
    }

    #[test]
    fn placeholder_and_empty_short_circuit() {
        assert!(extract_addresses(PLACEHOLDER).is_empty());
        assert!(extract_addresses("").is_empty());
    }

    #[test]
    fn multiple_citations_in_order_with_duplicates() {
        let text = "Digital Currency Address - ETH 0x01; \
                    Digital Currency Address - USDT 0x02; \
                    alt. Digital Currency Address - ETH 0x01;";
        assert_eq!(extract_addresses(text), vec!["0x01", "0x02", "0x01"]);
    }

    #[test]
    fn other_chains_with_hex_like_tokens_are_matched_by_prefix_only() {
        // Tokens are filtered by prefix, not by currency code.
        let text = "Digital Currency Address - TRX TXyz; Digital Currency Address - ARB 0xfeed";
        assert_eq!(extract_addresses(text), vec!["0xfeed"]);
    }

    #[test]
    fn token_stops_at_punctuation() {
        let text = "Digital Currency Address - ETH 0x7F367cC41522cE07553e823bf3be79A889DEbe1B;";
        assert_eq!(extract_addresses(text), vec!["0x7F367cC41522cE07553e823bf3be79A889DEbe1B"]);
    }

    #[test]
    fn prefix_is_case_sensitive() {
        assert!(has_target_prefix("0xabc"));
        assert!(!has_target_prefix("0Xabc"));
        assert!(!has_target_prefix("bc1q"));
    }

    proptest! {
        #[test]
        fn no_marker_means_no_addresses(text in "[a-zA-Z0-9 .;,-]{0,200}") {
            prop_assume!(!text.contains(CITATION_MARKER));
            prop_assert!(extract_addresses(&text).is_empty());
        }

        #[test]
        fn extraction_is_idempotent(hexes in proptest::collection::vec("[0-9a-fA-F]{4,40}", 0..6)) {
            let text: String = hexes
                .iter()
                .map(|h| format!("Digital Currency Address - ETH 0x{h}; "))
                .collect();
            let first = extract_addresses(&text);
            let rejoined: String = first
                .iter()
                .map(|a| format!("alt. Digital Currency Address - ETH {a}; "))
                .collect();
            prop_assert_eq!(extract_addresses(&rejoined), first);
        }
    }
}
