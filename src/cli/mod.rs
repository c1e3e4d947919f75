//! CLI command definitions and handlers

mod discover;
mod init;
mod keywords;
mod scan;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use gitcollab::config::{load_config_file, load_scan_config, ScanConfig};
use std::path::{Path, PathBuf};

/// Parse and validate workers count (1-64)
fn parse_workers(s: &str) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if n == 0 {
        Err("workers must be at least 1".to_string())
    } else if n > 64 {
        Err("workers cannot exceed 64".to_string())
    } else {
        Ok(n)
    }
}

/// gitcollab - how hard is it to make two languages work together?
#[derive(Parser, Debug)]
#[command(name = "gitcollab")]
#[command(
    version,
    about = "Measure cross-language integration difficulty in GitHub repositories",
    long_about = "gitcollab finds GitHub repositories that use two languages with a low \
collaboration score, scans their README, pull requests and issues for interoperability \
keywords (FFI, JNI, bindings, wrappers, ...) and summarizes the results per language pair.\n\n\
A GitHub token is read from GITHUB_TOKEN_GITCOLLABCOLLECTOR (or GITHUB_TOKEN).",
    after_help = "\
Examples:
  gitcollab init                                   Write an example gitcollab.toml
  gitcollab keywords                               List the keyword catalog
  gitcollab discover --pairs scores.csv            Find candidate repositories
  gitcollab scan --repos repos_to_analyze.csv      Scan candidates and summarize
  gitcollab run --pairs scores.csv --workers 8     Discover, then scan"
)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "info", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Number of parallel workers (1-64)
    #[arg(long, global = true, default_value = "4", value_parser = parse_workers)]
    pub workers: usize,

    /// Config file (default: gitcollab.toml or .gitcollabrc.json in the current directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write an example gitcollab.toml to the current directory
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// List the effective keyword catalog
    Keywords,

    /// Find repositories using both languages of each low-collaboration pair
    Discover {
        /// Collaboration-score table (Language1;Language2;CollaborationScore)
        #[arg(long)]
        pairs: PathBuf,

        /// Candidate list to write
        #[arg(long, short = 'o', default_value = "repos_to_analyze.csv")]
        output: PathBuf,
    },

    /// Scan candidate repositories and summarize difficulty per language pair
    Scan(ScanArgs),

    /// Discover candidates, then scan them
    Run {
        /// Collaboration-score table (Language1;Language2;CollaborationScore)
        #[arg(long)]
        pairs: PathBuf,

        #[command(flatten)]
        scan: ScanArgs,
    },

    /// Show version information
    Version,
}

#[derive(Args, Debug, Clone)]
pub struct ScanArgs {
    /// Candidate list (FullName,Lang1,Lang2)
    #[arg(long, default_value = "repos_to_analyze.csv")]
    pub repos: PathBuf,

    /// Per-repository detail table
    #[arg(long, default_value = "repo_difficulty_detail.csv")]
    pub detail: PathBuf,

    /// Per-pair summary table
    #[arg(long, default_value = "lang_pair_difficulty_summary.csv")]
    pub summary: PathBuf,

    /// Minimum pull requests for a repository to count (overrides config)
    #[arg(long)]
    pub min_prs: Option<i64>,

    /// Minimum issues for a repository to count (overrides config)
    #[arg(long)]
    pub min_issues: Option<i64>,

    /// Disable the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

/// Resolve configuration: explicit --config, else the working directory
fn resolve_config(explicit: Option<&Path>) -> Result<ScanConfig> {
    match explicit {
        Some(path) => load_config_file(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => {
            let cwd = std::env::current_dir().context("Cannot read current directory")?;
            Ok(load_scan_config(&cwd))
        }
    }
}

/// Run the CLI command
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init { force } => {
            let cwd = std::env::current_dir().context("Cannot read current directory")?;
            init::run(&cwd, force)
        }

        Commands::Keywords => {
            let config = resolve_config(cli.config.as_deref())?;
            keywords::run(&config)
        }

        Commands::Discover { pairs, output } => {
            let config = resolve_config(cli.config.as_deref())?;
            discover::run(&config, &pairs, &output).map(|_| ())
        }

        Commands::Scan(args) => {
            let config = resolve_config(cli.config.as_deref())?;
            scan::run(&config, &args, cli.workers)
        }

        Commands::Run { pairs, scan: args } => {
            let config = resolve_config(cli.config.as_deref())?;
            let candidates = discover::run(&config, &pairs, &args.repos)?;
            scan::run_candidates(&config, &candidates, &args, cli.workers)
        }

        Commands::Version => {
            println!("gitcollab {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
