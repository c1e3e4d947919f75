//! Text (terminal) reporter for pair summaries

use super::round4;
use crate::models::LangPairSummary;
use console::style;

fn format_rarity(rarity: Option<f64>) -> String {
    match rarity {
        Some(r) => format!("{:.4}", round4(r)),
        None => "-".to_string(),
    }
}

fn format_total(total: Option<u64>) -> String {
    total.map_or_else(|| "-".to_string(), |t| t.to_string())
}

/// Render summaries as an aligned terminal table
pub fn render_summaries(summaries: &[LangPairSummary]) -> String {
    let mut out = String::new();
    out.push_str(&format!("\n{}\n", style("Difficulty by language pair").bold()));
    out.push_str(&format!(
        "{}\n",
        style("──────────────────────────────────────────────────────────────────────").dim()
    ));

    if summaries.is_empty() {
        out.push_str(&format!(
            "{}\n",
            style("No language pair had a repository passing the filter").yellow()
        ));
        return out;
    }

    let pair_width = summaries
        .iter()
        .map(|s| s.lang1.len() + s.lang2.len() + 1)
        .max()
        .unwrap_or(4)
        .max(4);

    out.push_str(&format!(
        "{:<pair_width$}  {:>5}  {:>8}  {:>8}  {:>9}  {:>7}  {:>7}\n",
        "Pair", "Repos", "Rate", "Density", "Artifacts", "Total", "Rarity"
    ));
    for s in summaries {
        let pair = format!("{}-{}", s.lang1, s.lang2);
        let rate = format!("{:>8.4}", round4(s.difficulty_rate));
        let rate = if s.repos_with_difficulty > 0 {
            style(rate).red().to_string()
        } else {
            style(rate).green().to_string()
        };
        out.push_str(&format!(
            "{:<pair_width$}  {:>5}  {}  {:>8.4}  {:>9.1}  {:>7}  {:>7}\n",
            pair,
            s.total_repos,
            rate,
            round4(s.avg_difficulty_density),
            s.avg_artifacts_analyzed,
            format_total(s.true_total_available),
            format_rarity(s.rarity_score),
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> LangPairSummary {
        LangPairSummary {
            lang1: "C".to_string(),
            lang2: "Java".to_string(),
            total_repos: 3,
            repos_with_difficulty: 1,
            avg_difficulty_density: 0.25,
            avg_artifacts_analyzed: 12.5,
            difficulty_rate: 1.0 / 3.0,
            true_total_available: None,
            rarity_score: None,
        }
    }

    #[test]
    fn test_render_contains_pair_row() {
        let out = console::strip_ansi_codes(&render_summaries(&[summary()])).to_string();
        let row = out
            .lines()
            .find(|l| l.starts_with("C-Java"))
            .expect("pair row");
        assert!(row.contains("0.3333"));
        assert!(row.contains("12.5"));
        assert!(row.trim_end().ends_with('-'));
    }

    #[test]
    fn test_render_empty() {
        let out = console::strip_ansi_codes(&render_summaries(&[])).to_string();
        assert!(out.contains("No language pair"));
    }

    #[test]
    fn test_format_rarity() {
        assert_eq!(format_rarity(Some(0.98765)), "0.9877");
        assert_eq!(format_rarity(None), "-");
    }
}
