//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract; scheduled jobs rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain           | Description                              |
//! |---------|------------------|------------------------------------------|
//! | 0       | Universal        | Success                                  |
//! | 1       | Universal        | General error (unspecified)              |
//! | 2       | Universal        | CLI usage error (bad args)               |
//! | 3-9     | files            | Input, output and settings files         |
//! | 50-59   | network          | Export download and search service       |
//!
//! Per-record lookup failures during `update` never produce a non-zero exit;
//! they are logged and the run continues.

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Files (3-9)
// =============================================================================

/// Export file missing, unreadable, or not parseable.
pub const EXIT_INPUT: u8 = 3;

/// Result file or report could not be written.
pub const EXIT_OUTPUT: u8 = 4;

/// Settings file missing (when given explicitly), unreadable, or invalid.
pub const EXIT_CONFIG: u8 = 5;

// =============================================================================
// Network (50-59)
// =============================================================================

/// Bulk export could not be downloaded (network failure or non-2xx).
pub const EXIT_FETCH_EXPORT: u8 = 50;

/// Search service unreachable or rejected the query (`lookup` command), or
/// the search URL is unusable (any command that needs it).
pub const EXIT_LOOKUP: u8 = 51;
