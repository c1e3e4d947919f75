//! Init command - write an example configuration file

use anyhow::{Context, Result};
use console::style;
use gitcollab::config::{CONFIG_FILE_NAME, EXAMPLE_CONFIG};
use std::path::Path;

/// Run the init command
pub fn run(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.exists() && !force {
        println!(
            "{} {} already exists (use --force to overwrite)",
            style("!").yellow(),
            style(config_path.display()).cyan()
        );
        return Ok(());
    }

    std::fs::write(&config_path, EXAMPLE_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!(
        "{} Created {}",
        style("✓").green(),
        style(config_path.display()).cyan()
    );
    println!(
        "\nSet {} before running {}",
        style("GITHUB_TOKEN_GITCOLLABCOLLECTOR").bold(),
        style("gitcollab run --pairs <table.csv>").cyan()
    );
    Ok(())
}
