//! Input tables
//!
//! - Collaboration-score table: `;`-separated,
//!   `Language1;Language2;CollaborationScore`
//! - Candidate repositories: `,`-separated, `FullName,Lang1,Lang2`
//!
//! Rows that fail to parse are logged and skipped.

use crate::models::{PairCandidate, RepoCandidate};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct PairRow {
    #[serde(rename = "Language1")]
    language1: String,
    #[serde(rename = "Language2")]
    language2: String,
    #[serde(rename = "CollaborationScore")]
    collaboration_score: f64,
}

#[derive(Debug, Serialize, Deserialize)]
struct CandidateRow {
    #[serde(rename = "FullName")]
    full_name: String,
    #[serde(rename = "Lang1")]
    lang1: String,
    #[serde(rename = "Lang2")]
    lang2: String,
}

/// Parse the collaboration-score table
pub fn read_pairs<R: Read>(input: R) -> Result<Vec<PairCandidate>> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b';')
        .trim(csv::Trim::All)
        .from_reader(input);

    let mut pairs = Vec::new();
    for (line, row) in rdr.deserialize::<PairRow>().enumerate() {
        match row {
            Ok(row) => pairs.push(PairCandidate {
                lang1: row.language1,
                lang2: row.language2,
                collaboration_score: row.collaboration_score,
            }),
            Err(e) => warn!("Skipping pair row {}: {}", line + 2, e),
        }
    }
    debug!("Read {} language pairs", pairs.len());
    Ok(pairs)
}

pub fn read_pairs_csv(path: &Path) -> Result<Vec<PairCandidate>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open pairs table {}", path.display()))?;
    read_pairs(file).with_context(|| format!("failed to read {}", path.display()))
}

/// Parse a candidate repository list
pub fn read_candidates<R: Read>(input: R) -> Result<Vec<RepoCandidate>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(input);

    let mut candidates = Vec::new();
    for (line, row) in rdr.deserialize::<CandidateRow>().enumerate() {
        match row {
            Ok(row) if row.full_name.contains('/') => candidates.push(RepoCandidate {
                full_name: row.full_name,
                lang1: row.lang1,
                lang2: row.lang2,
            }),
            Ok(row) => warn!(
                "Skipping candidate row {}: {:?} is not owner/name",
                line + 2,
                row.full_name
            ),
            Err(e) => warn!("Skipping candidate row {}: {}", line + 2, e),
        }
    }
    debug!("Read {} candidate repositories", candidates.len());
    Ok(candidates)
}

pub fn read_candidates_csv(path: &Path) -> Result<Vec<RepoCandidate>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open candidate list {}", path.display()))?;
    read_candidates(file).with_context(|| format!("failed to read {}", path.display()))
}

/// Write a candidate repository list
pub fn write_candidates<W: Write>(out: W, candidates: &[RepoCandidate]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(out);
    wtr.write_record(["FullName", "Lang1", "Lang2"])?;
    for c in candidates {
        wtr.serialize(CandidateRow {
            full_name: c.full_name.clone(),
            lang1: c.lang1.clone(),
            lang2: c.lang2.clone(),
        })?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_candidates_csv(path: &Path, candidates: &[RepoCandidate]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    write_candidates(file, candidates)
        .with_context(|| format!("failed to write candidates to {}", path.display()))
}
