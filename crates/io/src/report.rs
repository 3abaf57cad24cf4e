// Markdown report: the `## stats` section is regenerated each run

use std::path::Path;

use sdnwatch_recon::EntityCount;

use crate::error::IoError;
use crate::text::read_file_as_utf8;

pub const STATS_HEADING: &str = "## stats";

/// Markdown table of per-entity counts plus a total row.
pub fn stats_table(counts: &[EntityCount], total: usize) -> String {
    let mut lines = vec![
        "| sanctioned entity | count |".to_string(),
        "| :- | -: |".to_string(),
    ];
    for c in counts {
        lines.push(format!("| {} | {} |", c.name, c.count));
    }
    lines.push(format!("| **total** | **{total}** |"));
    lines.join("\n")
}

/// Replace the stats section of `document` with `table`, or append a new
/// section at the end when there is none.
///
/// The section runs from the `## stats` line to the next `## ` heading
/// (searched from the second line after it) or to the end of the document.
/// Everything outside the section is preserved byte for byte.
pub fn splice_stats_section(document: &str, table: &str) -> String {
    let lines: Vec<&str> = document.split_inclusive('\n').collect();

    let mut section = format!("{STATS_HEADING}\n\n");
    for line in table.split('\n') {
        section.push_str(line);
        section.push('\n');
    }

    match lines.iter().position(|l| l.trim() == STATS_HEADING) {
        None => {
            let mut out = document.to_string();
            if !out.is_empty() && !out.ends_with('\n') {
                out.push('\n');
            }
            out.push_str(&section);
            out
        }
        Some(start) => {
            let end = lines
                .iter()
                .enumerate()
                .skip(start + 2)
                .find(|(_, l)| l.starts_with("## "))
                .map(|(i, _)| i)
                .unwrap_or(lines.len());

            let mut out = lines[..start].concat();
            out.push_str(&section);
            out.push_str(&lines[end..].concat());
            out
        }
    }
}

/// Rewrite the stats section of the report at `path`, creating the file if
/// it does not exist.
pub fn update_report(path: &Path, table: &str) -> Result<(), IoError> {
    let document = if path.exists() { read_file_as_utf8(path)? } else { String::new() };
    let updated = splice_stats_section(&document, table);
    std::fs::write(path, updated).map_err(|source| IoError::Write { path: path.to_path_buf(), source })
}
