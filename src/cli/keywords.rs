//! Keywords command - list the effective keyword catalog

use anyhow::Result;
use console::style;
use gitcollab::config::ScanConfig;
use gitcollab::keywords::{KeywordCatalog, MatchMode};

pub fn run(config: &ScanConfig) -> Result<()> {
    print!("{}", render(&config.catalog()));
    Ok(())
}

fn render(catalog: &KeywordCatalog) -> String {
    let mut out = format!(
        "{} ({} entries)\n",
        style("Keyword catalog").bold(),
        catalog.len()
    );
    for (i, entry) in catalog.iter().enumerate() {
        let mode = match entry.mode {
            MatchMode::Substring => String::new(),
            MatchMode::Token => format!(" {}", style("[token]").dim()),
        };
        let label = match &entry.label {
            Some(label) if label != &entry.literal => format!(" ({})", label),
            _ => String::new(),
        };
        out.push_str(&format!("{:>4}  {}{}{}\n", i + 1, entry.literal, label, mode));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use gitcollab::keywords::KeywordEntry;

    #[test]
    fn test_render_lists_entries_in_order() {
        let catalog = KeywordCatalog::from_entries([
            KeywordEntry::new("JNI"),
            KeywordEntry::new("nan").with_mode(MatchMode::Token),
            KeywordEntry::new("uniffi").with_label("UniFFI"),
        ]);
        let out = console::strip_ansi_codes(&render(&catalog)).to_string();
        let lines: Vec<_> = out.lines().collect();
        assert!(lines[0].contains("3 entries"));
        assert_eq!(lines[1].trim(), "1  JNI");
        assert_eq!(lines[2].trim(), "2  nan [token]");
        assert_eq!(lines[3].trim(), "3  uniffi (UniFFI)");
    }
}
