// Result CSV: `address,name` with header

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Deserialize;

use sdnwatch_core::AddressPair;
use sdnwatch_recon::ExistingDataset;

use crate::error::IoError;
use crate::text::read_file_as_utf8;

pub const HEADER: &str = "address,name";

#[derive(Debug, Deserialize)]
struct PairRow {
    address: String,
    name: String,
}

/// Read a previously written result file. Rows that do not deserialize are
/// skipped with a warning.
pub fn read_pairs(path: &Path) -> Result<Vec<AddressPair>, IoError> {
    let content = read_file_as_utf8(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut pairs = Vec::new();
    for (idx, row) in reader.deserialize::<PairRow>().enumerate() {
        match row {
            Ok(row) => pairs.push(AddressPair::new(row.address, row.name)),
            Err(e) => log::warn!("{}: skipping row {}: {e}", path.display(), idx + 2),
        }
    }
    Ok(pairs)
}

/// Prior snapshot for diffing. A missing or unreadable file is an empty
/// snapshot, never an error.
pub fn load_existing(path: &Path) -> ExistingDataset {
    if !path.exists() {
        log::info!("no prior results at {}, every pair will be new", path.display());
        return ExistingDataset::new();
    }
    match read_pairs(path) {
        Ok(pairs) => {
            let dataset = ExistingDataset::from_pairs(&pairs);
            log::debug!("loaded {} prior pair(s) from {}", dataset.len(), path.display());
            dataset
        }
        Err(e) => {
            log::warn!("ignoring prior results: {e}");
            ExistingDataset::new()
        }
    }
}

/// Write the result file. Names are always quoted, embedded quotes doubled.
pub fn write_pairs(path: &Path, pairs: &[AddressPair]) -> Result<(), IoError> {
    let write_err = |source| IoError::Write { path: path.to_path_buf(), source };

    let file = File::create(path).map_err(write_err)?;
    let mut out = BufWriter::new(file);
    writeln!(out, "{HEADER}").map_err(write_err)?;
    for pair in pairs {
        writeln!(out, "{},\"{}\"", pair.address, pair.name.replace('"', "\"\"")).map_err(write_err)?;
    }
    out.flush().map_err(write_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_then_load_as_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        let pairs = vec![
            AddressPair::new("0xAbC", "Jane Doe"),
            AddressPair::new("0xdef", "ACME \"CRYPTO\", LTD"),
        ];
        write_pairs(&path, &pairs).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            written,
            "address,name\n0xAbC,\"Jane Doe\"\n0xdef,\"ACME \"\"CRYPTO\"\", LTD\"\n"
        );

        assert_eq!(read_pairs(&path).unwrap(), pairs);
        let prior = load_existing(&path);
        assert_eq!(prior.len(), 2);
        assert!(prior.contains_pair(&AddressPair::new("0xabc", "Jane Doe")));
    }

    #[test]
    fn missing_prior_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_existing(&dir.path().join("data.csv")).is_empty());
    }

    #[test]
    fn malformed_rows_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        std::fs::write(&path, "address,name\n0x1,\"A\"\nlonely\n0x2,B\n").unwrap();
        let pairs = read_pairs(&path).unwrap();
        assert_eq!(pairs, vec![AddressPair::new("0x1", "A"), AddressPair::new("0x2", "B")]);
    }

    #[test]
    fn wrong_header_yields_empty_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        std::fs::write(&path, "wallet,owner\n0x1,A\n").unwrap();
        assert!(load_existing(&path).is_empty());
    }
}
