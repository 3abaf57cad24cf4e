//! `sdnwatch extract`: local extraction only.

use std::path::Path;

use sdnwatch_config::Settings;
use sdnwatch_core::{NoLookup, TruncationRule};
use sdnwatch_io::read_export;
use sdnwatch_recon::{RecordOutcome, RecordProcessor};

use crate::CliError;

pub(crate) fn cmd_extract(settings: &Settings, path: &Path) -> Result<(), CliError> {
    let records = read_export(path).map_err(CliError::input)?;

    let mut processor =
        RecordProcessor::with_rule(NoLookup, TruncationRule::with_threshold(settings.truncation_threshold));
    let mut truncated = 0;
    for record in &records {
        if let RecordOutcome::Processed { truncated: true, .. } = processor.process(record) {
            truncated += 1;
        }
    }
    let results = processor.finish();

    for pair in &results.pairs {
        println!("{},\"{}\"", pair.address, pair.name.replace('"', "\"\""));
    }

    if truncated > 0 {
        log::warn!("{truncated} row(s) have truncated remarks; `sdnwatch update` recovers their addresses");
    }
    log::info!("{} address entries from {}", results.len(), path.display());
    Ok(())
}
