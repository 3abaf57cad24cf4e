// sdnwatch - tracks digital currency addresses in the SDN export
// Scheduled runs use `sdnwatch update`; exit codes are in exit_codes.rs

mod exit_codes;
mod extract;
mod fetch;
mod lookup;
mod update;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use sdnwatch_config::Settings;
use sdnwatch_io::IoError;
use sdnwatch_search_client::LookupError;

use exit_codes::{
    EXIT_CONFIG, EXIT_ERROR, EXIT_FETCH_EXPORT, EXIT_INPUT, EXIT_LOOKUP, EXIT_OUTPUT, EXIT_SUCCESS, EXIT_USAGE,
};

#[derive(Parser)]
#[command(name = "sdnwatch")]
#[command(about = "Extract and track sanctioned digital currency addresses")]
#[command(long_version = long_version())]
#[command(version)]
#[command(subcommand_required = false)]
struct Cli {
    /// Settings file (default: ~/.config/sdnwatch/settings.toml)
    #[arg(long, global = true, env = "SDNWATCH_CONFIG")]
    config: Option<PathBuf>,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Download the export, recover truncated addresses, and publish results
    #[command(after_help = "\
Examples:
  sdnwatch update
  sdnwatch update --input sdn.csv --no-lookup
  sdnwatch update --data out/data.csv --report out/README.md --json")]
    Update {
        /// Use a local export instead of downloading
        #[arg(long, short)]
        input: Option<PathBuf>,

        /// Export download URL
        #[arg(long, env = "SDNWATCH_EXPORT_URL")]
        export_url: Option<String>,

        /// Search page of the lookup service
        #[arg(long, env = "SDNWATCH_SEARCH_URL")]
        search_url: Option<String>,

        /// Result file (also the prior snapshot)
        #[arg(long)]
        data: Option<PathBuf>,

        /// Markdown report to update
        #[arg(long)]
        report: Option<PathBuf>,

        /// Skip remote lookups for truncated rows
        #[arg(long)]
        no_lookup: bool,

        /// Print the reconciliation as JSON
        #[arg(long)]
        json: bool,
    },

    /// Query the search service for one name
    Lookup {
        /// Name to search for
        name: String,

        /// Search page of the lookup service
        #[arg(long, env = "SDNWATCH_SEARCH_URL")]
        search_url: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// Print addresses found in a local export, without network access
    Extract {
        /// Export file (default: export_path from settings)
        input: Option<PathBuf>,
    },
}

fn long_version() -> &'static str {
    if cfg!(debug_assertions) {
        concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_COMMIT_HASH"), ")", "\nbuild:   debug")
    } else {
        concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_COMMIT_HASH"), ")", "\nbuild:   release")
    }
}

fn init_logging(quiet: bool) {
    let default = if quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.quiet);

    let result = match cli.command {
        None => {
            eprintln!("Usage: sdnwatch <command> [options]");
            eprintln!("       sdnwatch --help for more information");
            Ok(())
        }
        Some(command) => run(command, cli.config),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

fn run(command: Commands, config: Option<PathBuf>) -> Result<(), CliError> {
    let mut settings = Settings::load(config.as_deref()).map_err(CliError::config)?;

    match command {
        Commands::Update { input, export_url, search_url, data, report, no_lookup, json } => {
            if let Some(url) = export_url {
                settings.export_url = url;
            }
            if let Some(url) = search_url {
                settings.search_url = url;
            }
            if let Some(path) = data {
                settings.data_path = path;
            }
            if let Some(path) = report {
                settings.report_path = path;
            }
            update::cmd_update(&settings, update::UpdateOptions { input, no_lookup, json })
        }
        Commands::Lookup { name, search_url, json } => {
            if let Some(url) = search_url {
                settings.search_url = url;
            }
            lookup::cmd_lookup(&settings, &name, json)
        }
        Commands::Extract { input } => {
            let path = input.unwrap_or_else(|| settings.export_path.clone());
            extract::cmd_extract(&settings, &path)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn general(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    pub fn usage(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn input(err: IoError) -> Self {
        Self { code: EXIT_INPUT, message: err.to_string(), hint: None }
    }

    pub fn output(err: IoError) -> Self {
        Self { code: EXIT_OUTPUT, message: err.to_string(), hint: None }
    }

    pub fn config(err: impl std::fmt::Display) -> Self {
        let hint = Settings::config_path().map(|p| format!("default settings location is {}", p.display()));
        Self { code: EXIT_CONFIG, message: err.to_string(), hint }
    }

    pub fn fetch(msg: impl Into<String>) -> Self {
        Self { code: EXIT_FETCH_EXPORT, message: msg.into(), hint: None }
    }

    /// Create error from a lookup failure, with a hint for the common causes.
    pub fn lookup(err: LookupError) -> Self {
        let hint = match &err {
            LookupError::InvalidUrl { .. } => Some("check search_url in settings or --search-url".to_string()),
            LookupError::Network { .. } => Some("is the search service reachable from this host?".to_string()),
            LookupError::Http { status, .. } if *status >= 500 => {
                Some("the search service is failing; retry later".to_string())
            }
            _ => None,
        };
        Self { code: EXIT_LOOKUP, message: err.to_string(), hint }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

