//! Bulk export download.
//!
//! One blocking GET, no retries: a run without a fresh export is aborted.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::exit_codes;
use crate::CliError;

const USER_AGENT: &str = concat!("sdnwatch/", env!("CARGO_PKG_VERSION"));

#[derive(Debug)]
pub(crate) struct ExportDownload {
    pub path: PathBuf,
    pub hash: String,
}

/// Download the export to `dest`, replacing any previous copy.
pub(crate) fn download_export(url: &str, dest: &Path, timeout: Duration) -> Result<ExportDownload, CliError> {
    log::info!("downloading export from {url}");

    let http = reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .map_err(|e| CliError::fetch(format!("failed to build HTTP client: {e}")))?;

    let response = http
        .get(url)
        .send()
        .map_err(|e| CliError::fetch(format!("export download failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(CliError::fetch(format!("export download failed: HTTP {}", status.as_u16()))
            .with_hint("check export_url in settings or pass --input with a local copy"));
    }

    let body = response
        .bytes()
        .map_err(|e| CliError::fetch(format!("export download interrupted: {e}")))?;

    std::fs::write(dest, &body).map_err(|e| CliError {
        code: exit_codes::EXIT_OUTPUT,
        message: format!("cannot write {}: {e}", dest.display()),
        hint: None,
    })?;

    log::info!("downloaded {} bytes to {}", body.len(), dest.display());
    Ok(ExportDownload { path: dest.to_path_buf(), hash: hash_bytes(&body) })
}

/// blake3 hash of bytes (with algorithm prefix).
pub(crate) fn hash_bytes(data: &[u8]) -> String {
    format!("blake3:{}", blake3::hash(data).to_hex())
}

/// blake3 hash of a file (with algorithm prefix).
pub(crate) fn hash_file(path: &Path) -> Result<String, CliError> {
    let contents = std::fs::read(path).map_err(|e| CliError {
        code: exit_codes::EXIT_INPUT,
        message: format!("cannot read {}: {e}", path.display()),
        hint: None,
    })?;
    Ok(hash_bytes(&contents))
}
