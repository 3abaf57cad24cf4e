// Bulk export parsing

use std::path::Path;

use sdnwatch_core::RawRecord;

use crate::error::IoError;
use crate::text::read_file_as_utf8;

/// Read and parse the export at `path`. Any failure here is fatal to a run.
pub fn read_export(path: &Path) -> Result<Vec<RawRecord>, IoError> {
    let content = read_file_as_utf8(path)?;
    parse_export(&content).map_err(|source| IoError::Csv { path: path.to_path_buf(), source })
}

/// Split export text into records. No header row; rows may differ in width.
/// Short rows are kept here and skipped by the processor.
pub fn parse_export(content: &str) -> Result<Vec<RawRecord>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut records = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result?;
        records.push(RawRecord::new(idx + 1, record.iter().map(str::to_string).collect()));
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = concat!(
        "36,\"AEROCARIBBEAN AIRLINES\",-0- ,\"CUBA\",-0- ,-0- ,-0- ,-0- ,-0- ,-0- ,-0- ,-0- \n",
        "30518,\"SUEX OTC, S.R.O.\",\"-0- \",\"CYBER2\",-0- ,-0- ,-0- ,-0- ,-0- ,-0- ,-0- ,",
        "\"Digital Currency Address - XBT 12HQDsicffSBaYdJ6BhnE22sfjTESmmzKx; alt. Digital Currency Address - ETH 0x2f389ce8bd8ff92de3402ffce4691d17fc4f6535; Website suex.io.\"\n",
        "\n",
        "short,row\n",
    );

    #[test]
    fn parses_quoted_remarks_with_commas() {
        let records = parse_export(SAMPLE).unwrap();
        assert_eq!(records.len(), 3);

        let suex = &records[1];
        assert_eq!(suex.row, 2);
        assert!(suex.is_valid());
        assert_eq!(suex.name(), Some("SUEX OTC, S.R.O."));
        assert!(suex.remarks().unwrap().ends_with("Website suex.io."));

        assert_eq!(records[0].remarks(), Some("-0-"));
        assert!(!records[2].is_valid());
    }

    #[test]
    fn reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let records = read_export(file.path()).unwrap();
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn missing_export_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_export(&dir.path().join("sdn.csv")).unwrap_err();
        assert!(matches!(err, IoError::Read { .. }));
    }
}
