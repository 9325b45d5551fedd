//! Markdown export of the board.
//!
//! The plugin thread flattens the partition into a [`BoardExport`] (plain
//! titles, no geometry) and posts it to the worker, which renders Markdown and
//! writes `tierlist-<UTC timestamp>.md` into the export directory.

use crate::board::Partition;
use crate::domain::{Result, TierboardError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// One tier as exported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportTier {
    pub label: String,
    pub titles: Vec<String>,
}

/// Serializable snapshot of the board for export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardExport {
    pub tiers: Vec<ExportTier>,
    pub pool: Vec<String>,
}

impl BoardExport {
    #[must_use]
    pub fn from_partition(partition: &Partition) -> Self {
        Self {
            tiers: partition
                .tiers()
                .iter()
                .map(|tier| ExportTier {
                    label: tier.label().to_string(),
                    titles: tier.items().iter().map(|item| item.title.clone()).collect(),
                })
                .collect(),
            pool: partition.pool().iter().map(|item| item.title.clone()).collect(),
        }
    }

    /// Renders the board as Markdown.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use tierboard::worker::{BoardExport, ExportTier};
    ///
    /// let board = BoardExport {
    ///     tiers: vec![ExportTier { label: "S".into(), titles: vec!["Alien".into()] }],
    ///     pool: vec![],
    /// };
    /// let md = board.to_markdown(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap());
    /// assert!(md.contains("## S\n\n1. Alien\n"));
    /// ```
    #[must_use]
    pub fn to_markdown(&self, generated_at: DateTime<Utc>) -> String {
        let mut out = String::from("# Movie Tier List\n\n");
        out.push_str(&format!("_Generated {}_\n\n", generated_at.format("%Y-%m-%d %H:%M UTC")));

        for tier in &self.tiers {
            out.push_str(&format!("## {}\n\n", escape_markdown(&tier.label)));
            if tier.titles.is_empty() {
                out.push_str("_empty_\n\n");
                continue;
            }
            for (rank, title) in tier.titles.iter().enumerate() {
                out.push_str(&format!("{}. {}\n", rank + 1, escape_markdown(title)));
            }
            out.push('\n');
        }

        if !self.pool.is_empty() {
            out.push_str("## Unranked\n\n");
            for title in &self.pool {
                out.push_str(&format!("- {}\n", escape_markdown(title)));
            }
        }

        out
    }
}

/// Escapes `text` so it renders as plain inline text on one line.
///
/// Inline emphasis, code and link characters are escaped everywhere; heading,
/// quote and list markers only at the start.
fn escape_markdown(text: &str) -> String {
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '*' | '_' | '`' | '[' | ']' | '<') {
            out.push('\\');
        }
        out.push(c);
    }

    let digits = out.chars().take_while(char::is_ascii_digit).count();
    if out.starts_with(&['#', '-', '+', '>'][..]) {
        out.insert(0, '\\');
    } else if digits > 0 && out[digits..].starts_with(&['.', ')'][..]) {
        out.insert(digits, '\\');
    }
    out
}

/// File name for an export created at `at`.
#[must_use]
pub fn export_file_name(at: DateTime<Utc>) -> String {
    format!("tierlist-{}.md", at.format("%Y%m%dT%H%M%SZ"))
}

/// Writes `board` into `dir`, creating the directory if needed.
///
/// # Errors
///
/// Returns [`TierboardError::Export`] if the directory cannot be created or the
/// file cannot be written.
pub fn write_export(dir: &Path, board: &BoardExport, at: DateTime<Utc>) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .map_err(|e| TierboardError::Export(format!("cannot create {}: {e}", dir.display())))?;

    let path = dir.join(export_file_name(at));
    fs::write(&path, board.to_markdown(at))
        .map_err(|e| TierboardError::Export(format!("cannot write {}: {e}", path.display())))?;

    tracing::debug!(path = %path.display(), tiers = board.tiers.len(), "board exported");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Tier;
    use crate::domain::{Item, TierId};
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap()
    }

    fn board() -> BoardExport {
        let mut p = Partition::new(vec![Tier::new("S", "S", "#f00"), Tier::new("A", "A", "#0f0")]);
        p.assign_to_tier(Item::new(1, "Heat", "h"), &TierId::from("S"));
        p.assign_to_tier(Item::new(2, "Alien", "a"), &TierId::from("S"));
        p.add_to_pool(Item::new(3, "Cats", "c"));
        BoardExport::from_partition(&p)
    }

    #[test]
    fn markdown_lists_tiers_in_rank_order_then_pool() {
        let md = board().to_markdown(at());
        let expected = "# Movie Tier List\n\n\
            _Generated 2024-03-09 07:05 UTC_\n\n\
            ## S\n\n1. Heat\n2. Alien\n\n\
            ## A\n\n_empty_\n\n\
            ## Unranked\n\n- Cats\n";
        assert_eq!(md, expected);
    }

    #[test]
    fn titles_cannot_break_the_document_structure() {
        let board = BoardExport {
            tiers: vec![ExportTier {
                label: "S".to_string(),
                titles: vec!["# Heat".to_string(), "1. Alien".to_string(), "9) Cats".to_string()],
            }],
            pool: vec!["- Arrival\n## Dune".to_string(), "*Batteries* [not] `included`".to_string()],
        };
        let md = board.to_markdown(at());

        assert!(md.contains("## S\n\n1. \\# Heat\n2. 1\\. Alien\n3. 9\\) Cats\n"));
        assert!(md.contains("- \\- Arrival ## Dune\n"));
        assert!(md.contains("- \\*Batteries\\* \\[not\\] \\`included\\`\n"));
        assert_eq!(md.matches("\n## ").count(), 2);
    }

    #[test]
    fn plain_titles_are_left_alone() {
        assert_eq!(escape_markdown("Blade Runner 2049"), "Blade Runner 2049");
        assert_eq!(escape_markdown("2001: A Space Odyssey"), "2001: A Space Odyssey");
        assert_eq!(escape_markdown("  Heat  "), "Heat");
    }

    #[test]
    fn write_export_creates_directory_and_file() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested/exports");

        let path = write_export(&dir, &board(), at()).unwrap();

        assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("tierlist-20240309T070501Z.md"));
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("# Movie Tier List"));
    }

    #[test]
    fn write_export_reports_unwritable_targets() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("file");
        fs::write(&blocker, "x").unwrap();

        let err = write_export(&blocker, &board(), at()).unwrap_err();
        assert!(matches!(err, TierboardError::Export(_)));
    }
}
