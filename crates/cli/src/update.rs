//! `sdnwatch update`: download the export, recover truncated rows, reconcile, publish.

use std::path::{Path, PathBuf};

use sdnwatch_config::Settings;
use sdnwatch_core::{AddressLookup, NoLookup, RawRecord, TruncationRule};
use sdnwatch_io::{load_existing, read_export, stats_table, update_report, write_pairs};
use sdnwatch_recon::{reconcile, Reconciliation, RecordProcessor, ResultSet};
use sdnwatch_search_client::SearchClient;

use crate::fetch::{download_export, hash_file};
use crate::CliError;

pub(crate) struct UpdateOptions {
    /// Local export to use instead of downloading
    pub input: Option<PathBuf>,
    pub no_lookup: bool,
    pub json: bool,
}

pub(crate) fn cmd_update(settings: &Settings, opts: UpdateOptions) -> Result<(), CliError> {
    let (export_path, export_hash) = match opts.input {
        Some(path) => {
            let hash = hash_file(&path)?;
            (path, hash)
        }
        None => {
            let dl = download_export(&settings.export_url, &settings.export_path, settings.download_timeout())?;
            (dl.path, dl.hash)
        }
    };

    let records = read_export(&export_path).map_err(CliError::input)?;
    log::info!("read {} row(s) from {}", records.len(), export_path.display());

    let existing = load_existing(&settings.data_path);
    let rule = TruncationRule::with_threshold(settings.truncation_threshold);

    let results = if opts.no_lookup || !settings.lookup_enabled {
        log::info!("remote lookup disabled, truncated rows keep local addresses only");
        process_records(NoLookup, rule, &records)
    } else {
        let client = SearchClient::new(&settings.search_url, settings.request_timeout())
            .map_err(CliError::lookup)?;
        process_records(client, rule, &records)
    };

    let recon = reconcile(results, &existing).with_export_hash(export_hash);

    write_pairs(&settings.data_path, &recon.pairs).map_err(CliError::output)?;
    update_report(&settings.report_path, &stats_table(&recon.counts, recon.total)).map_err(CliError::output)?;

    if opts.json {
        let json = serde_json::to_string_pretty(&recon).map_err(|e| CliError::general(e.to_string()))?;
        println!("{json}");
    } else {
        print_summary(&recon, &export_path, settings);
    }
    Ok(())
}

fn process_records<L: AddressLookup>(lookup: L, rule: TruncationRule, records: &[RawRecord]) -> ResultSet {
    let mut processor = RecordProcessor::with_rule(lookup, rule);
    processor.process_all(records);
    let results = processor.finish();

    let stats = &results.stats;
    log::info!(
        "{} row(s), {} skipped, {} truncated, {} address(es) recovered remotely",
        stats.rows,
        stats.skipped_rows,
        stats.truncated_rows,
        stats.recovered_addresses,
    );
    results
}

fn print_summary(recon: &Reconciliation, export_path: &Path, settings: &Settings) {
    let data_path = settings.data_path.display();

    if recon.new_pairs.is_empty() {
        println!("\nNo updates - all addresses already in {data_path}");
    } else {
        println!("\nUpdates detected: {} new address(es)", recon.new_pairs.len());
        for pair in &recon.new_pairs {
            println!("  {} - {}", pair.address, pair.name);
        }
    }

    if !recon.removed.is_empty() {
        println!("\nNo longer listed: {} address(es)", recon.removed.len());
        for key in &recon.removed {
            println!("  {} - {}", key.address, key.name);
        }
    }

    println!("\nExtracted {} address entries from {}", recon.total, export_path.display());
    println!("Results written to {data_path}");
    println!("Updated {} with stats table", settings.report_path.display());
}
