//! Scan command - fetch, score and summarize candidate repositories

use super::ScanArgs;
use anyhow::{Context, Result};
use console::{style, Term};
use gitcollab::config::ScanConfig;
use gitcollab::filter::RepositoryFilter;
use gitcollab::github::{GitHubClient, RepoSource};
use gitcollab::inputs::read_candidates_csv;
use gitcollab::models::RepoCandidate;
use gitcollab::pipeline::{ScanReport, Scanner};
use gitcollab::reporters::{render_summaries, write_detail_csv, write_summary_csv};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

pub fn run(config: &ScanConfig, args: &ScanArgs, workers: usize) -> Result<()> {
    let candidates = read_candidates_csv(&args.repos)?;
    run_candidates(config, &candidates, args, workers)
}

pub fn run_candidates(
    config: &ScanConfig,
    candidates: &[RepoCandidate],
    args: &ScanArgs,
    workers: usize,
) -> Result<()> {
    if candidates.is_empty() {
        warn!("No candidate repositories to scan");
    }
    let client = GitHubClient::from_config(config).context("Cannot create GitHub client")?;
    let report = execute(config, candidates, &client, args, workers)?;
    write_outputs(&report, args)
}

/// Effective thresholds: CLI flags over config
fn effective_filter(config: &ScanConfig, args: &ScanArgs) -> RepositoryFilter {
    RepositoryFilter::new(
        args.min_prs.unwrap_or(config.filter.min_pull_requests),
        args.min_issues.unwrap_or(config.filter.min_issues),
    )
}

/// Create bar progress style
fn create_bar_style() -> Result<ProgressStyle> {
    Ok(ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
        .progress_chars("█▓▒░  "))
}

fn execute(
    config: &ScanConfig,
    candidates: &[RepoCandidate],
    source: &dyn RepoSource,
    args: &ScanArgs,
    workers: usize,
) -> Result<ScanReport> {
    println!(
        "\n{} Scanning {} repositories\n",
        style("🔬").bold(),
        candidates.len()
    );

    let bar = if args.no_progress || !Term::stderr().is_term() {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(candidates.len() as u64)
    };
    bar.set_style(create_bar_style()?);

    let progress = bar.clone();
    let scanner = Scanner::new(config)
        .with_workers(workers)
        .with_filter(effective_filter(config, args))
        .with_progress(Box::new(move |name: &str, done: usize, _total: usize| {
            progress.set_position(done as u64);
            progress.set_message(name.to_string());
        }));

    let report = scanner.scan(candidates, source)?;
    bar.finish_and_clear();
    Ok(report)
}

fn write_outputs(report: &ScanReport, args: &ScanArgs) -> Result<()> {
    write_detail_csv(&args.detail, &report.records)?;
    write_summary_csv(&args.summary, &report.summaries)?;

    print!("{}", render_summaries(&report.summaries));
    println!(
        "\n{} {} analyzed, {} below threshold, {} failed",
        style("✓").green(),
        style(report.records.len()).bold(),
        report.skipped,
        report.failed
    );
    println!(
        "  Details: {}\n  Summary: {}",
        style(args.detail.display()).cyan(),
        style(args.summary.display()).cyan()
    );
    Ok(())
}
