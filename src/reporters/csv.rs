//! CSV reporter
//!
//! Both tables are `;`-separated. Null values (unknown population, rarity)
//! are written as empty cells.

use super::round4;
use crate::models::{LangPairSummary, RepoDifficultyRecord};
use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

pub const DETAIL_HEADERS: [&str; 8] = [
    "Lang1",
    "Lang2",
    "FullName",
    "artifacts_analyzed",
    "difficulty_keywords_found",
    "difficulty_density",
    "repo_has_difficulty",
    "keywords_detected",
];

pub const SUMMARY_HEADERS: [&str; 9] = [
    "Lang1",
    "Lang2",
    "total_repos",
    "repos_with_difficulty",
    "avg_difficulty_density",
    "avg_artifacts_analyzed",
    "difficulty_rate",
    "true_total_available",
    "rarity_score",
];

#[derive(Serialize)]
struct DetailRow<'a> {
    lang1: &'a str,
    lang2: &'a str,
    full_name: &'a str,
    artifacts_analyzed: usize,
    keywords_found: usize,
    difficulty_density: f64,
    has_difficulty: &'static str,
    keywords_detected: String,
}

impl<'a> From<&'a RepoDifficultyRecord> for DetailRow<'a> {
    fn from(r: &'a RepoDifficultyRecord) -> Self {
        Self {
            lang1: &r.lang1,
            lang2: &r.lang2,
            full_name: &r.full_name,
            artifacts_analyzed: r.artifacts_analyzed,
            keywords_found: r.keywords_found,
            difficulty_density: round4(r.difficulty_density),
            has_difficulty: if r.has_difficulty { "True" } else { "False" },
            keywords_detected: r.keywords_detected.join("; "),
        }
    }
}

#[derive(Serialize)]
struct SummaryRow<'a> {
    lang1: &'a str,
    lang2: &'a str,
    total_repos: usize,
    repos_with_difficulty: usize,
    avg_difficulty_density: f64,
    avg_artifacts_analyzed: f64,
    difficulty_rate: f64,
    true_total_available: Option<u64>,
    rarity_score: Option<f64>,
}

impl<'a> From<&'a LangPairSummary> for SummaryRow<'a> {
    fn from(s: &'a LangPairSummary) -> Self {
        Self {
            lang1: &s.lang1,
            lang2: &s.lang2,
            total_repos: s.total_repos,
            repos_with_difficulty: s.repos_with_difficulty,
            avg_difficulty_density: round4(s.avg_difficulty_density),
            avg_artifacts_analyzed: round4(s.avg_artifacts_analyzed),
            difficulty_rate: round4(s.difficulty_rate),
            true_total_available: s.true_total_available,
            rarity_score: s.rarity_score.map(round4),
        }
    }
}

fn table_writer<W: Write>(out: W) -> csv::Writer<W> {
    // Headers are written explicitly so empty tables still get them
    csv::WriterBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .from_writer(out)
}

/// Write the per-repository detail table
pub fn write_detail<W: Write>(out: W, records: &[RepoDifficultyRecord]) -> Result<()> {
    let mut wtr = table_writer(out);
    wtr.write_record(DETAIL_HEADERS)?;
    for record in records {
        wtr.serialize(DetailRow::from(record))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the per-pair summary table
pub fn write_summary<W: Write>(out: W, summaries: &[LangPairSummary]) -> Result<()> {
    let mut wtr = table_writer(out);
    wtr.write_record(SUMMARY_HEADERS)?;
    for summary in summaries {
        wtr.serialize(SummaryRow::from(summary))?;
    }
    wtr.flush()?;
    Ok(())
}

fn create_file(path: &Path) -> Result<std::fs::File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    std::fs::File::create(path).with_context(|| format!("failed to create {}", path.display()))
}

pub fn write_detail_csv(path: &Path, records: &[RepoDifficultyRecord]) -> Result<()> {
    let file = create_file(path)?;
    write_detail(file, records)
        .with_context(|| format!("failed to write details to {}", path.display()))
}

pub fn write_summary_csv(path: &Path, summaries: &[LangPairSummary]) -> Result<()> {
    let file = create_file(path)?;
    write_summary(file, summaries)
        .with_context(|| format!("failed to write summary to {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> RepoDifficultyRecord {
        RepoDifficultyRecord {
            lang1: "C".to_string(),
            lang2: "Java".to_string(),
            full_name: "acme/bridge".to_string(),
            artifacts_analyzed: 3,
            keywords_found: 2,
            difficulty_density: 2.0 / 3.0,
            has_difficulty: true,
            keywords_detected: vec!["JNI".to_string(), "wrapper".to_string()],
            keyword_counts: vec![1, 1],
            pull_requests: 1,
            issues: 1,
        }
    }

    fn summary(rarity: Option<f64>, total: Option<u64>) -> LangPairSummary {
        LangPairSummary {
            lang1: "C".to_string(),
            lang2: "Java".to_string(),
            total_repos: 3,
            repos_with_difficulty: 1,
            avg_difficulty_density: 0.25,
            avg_artifacts_analyzed: 40.0 / 3.0,
            difficulty_rate: 1.0 / 3.0,
            true_total_available: total,
            rarity_score: rarity,
        }
    }

    fn render<F: FnOnce(&mut Vec<u8>) -> Result<()>>(f: F) -> String {
        let mut buf = Vec::new();
        f(&mut buf).expect("write csv");
        String::from_utf8(buf).expect("utf8")
    }

    #[test]
    fn test_detail_table() {
        let out = render(|b| write_detail(b, &[record()]));
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[0], DETAIL_HEADERS.join(";"));
        // The joined keyword list contains the delimiter, so it is quoted
        assert_eq!(lines[1], "C;Java;acme/bridge;3;2;0.6667;True;\"JNI; wrapper\"");
    }

    #[test]
    fn test_detail_table_empty_keywords() {
        let mut r = record();
        r.keywords_found = 0;
        r.difficulty_density = 0.0;
        r.has_difficulty = false;
        r.keywords_detected.clear();
        let out = render(|b| write_detail(b, &[r]));
        assert_eq!(out.lines().nth(1), Some("C;Java;acme/bridge;3;0;0.0;False;"));
    }

    #[test]
    fn test_summary_null_rarity_is_empty_cell() {
        let out = render(|b| write_summary(b, &[summary(None, Some(0))]));
        assert_eq!(out.lines().nth(1), Some("C;Java;3;1;0.25;13.3333;0.3333;0;"));

        let out = render(|b| write_summary(b, &[summary(None, None)]));
        assert_eq!(out.lines().nth(1), Some("C;Java;3;1;0.25;13.3333;0.3333;;"));
    }

    #[test]
    fn test_summary_with_rarity() {
        let out = render(|b| write_summary(b, &[summary(Some(0.987654), Some(250))]));
        assert_eq!(out.lines().nth(1), Some("C;Java;3;1;0.25;13.3333;0.3333;250;0.9877"));
    }

    #[test]
    fn test_empty_tables_have_headers() {
        let out = render(|b| write_summary(b, &[]));
        assert_eq!(out.trim_end(), SUMMARY_HEADERS.join(";"));
    }

    #[test]
    fn test_write_to_nested_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out").join("detail.csv");
        write_detail_csv(&path, &[record()]).expect("write detail");
        let content = std::fs::read_to_string(&path).expect("read back");
        assert!(content.contains("acme/bridge"));
    }
}
