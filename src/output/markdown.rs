// src/output/markdown.rs
// =============================================================================
// This module writes harvested case studies as Markdown.
//
// Two outputs:
// - One combined document: a title, then one section per case study, each
//   ending with a source link and a horizontal rule
// - Optionally one file per case study, named after its title
// =============================================================================

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use super::timestamp;
use crate::crawl::CaseStudyRecord;

pub const DOCUMENT_TITLE: &str = "Kinaxis Case Studies";
pub const DOCUMENT_PREFIX: &str = "kinaxis_case_studies";

// Per-case file stem limits, in bytes; leaves room for ".md" under NAME_MAX
const MAX_STEM_BYTES: usize = 200;
const FALLBACK_STEM: &str = "case_study";

// Renders the combined document
pub fn render_case_studies(records: &[CaseStudyRecord]) -> String {
    let mut doc = format!("# {}\n\n", DOCUMENT_TITLE);

    for case in records {
        doc.push_str(&format!("## {}\n\n", case.title));
        doc.push_str(&format!("{}\n\n", case.content));
        doc.push_str(&format!("[Source]({})\n\n", case.url));
        doc.push_str("---\n\n");
    }

    doc
}

// Writes the combined document to `<dir>/kinaxis_case_studies_<timestamp>.md`
//
// An existing file with the same name is overwritten
pub fn write_case_studies(dir: &Path, records: &[CaseStudyRecord]) -> Result<PathBuf> {
    let path = dir.join(format!("{}_{}.md", DOCUMENT_PREFIX, timestamp()));

    fs::write(&path, render_case_studies(records))
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(path)
}

// Writes one case study to its own file, named after its title
pub fn save_case_page(dir: &Path, case: &CaseStudyRecord) -> Result<PathBuf> {
    let path = dir.join(format!("{}.md", sanitize_filename(&case.title)));
    let body = format!("# {}\n\n{}\n\n[Source]({})\n", case.title, case.content, case.url);

    fs::write(&path, body).with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(path)
}

// Saves every case study to its own file
//
// A failed write is logged and skipped; the paths written are returned
pub fn save_case_pages(dir: &Path, records: &[CaseStudyRecord]) -> Vec<PathBuf> {
    let mut saved = Vec::new();

    for case in records {
        match save_case_page(dir, case) {
            Ok(path) => saved.push(path),
            Err(e) => warn!(url = %case.url, error = %e, "Error saving case study page"),
        }
    }

    saved
}

// Drops characters that are not allowed in file names on common platforms
//
// The result is cut to MAX_STEM_BYTES on a char boundary; a title with
// nothing usable left becomes FALLBACK_STEM
fn sanitize_filename(title: &str) -> String {
    let mut stem = String::new();

    for c in title.chars() {
        if matches!(c, '\\' | '/' | '*' | '?' | ':' | '"' | '<' | '>' | '|') || c.is_control() {
            continue;
        }
        if stem.len() + c.len_utf8() > MAX_STEM_BYTES {
            break;
        }
        stem.push(c);
    }

    let stem = stem.trim();
    if stem.is_empty() || stem.chars().all(|c| c == '.') {
        FALLBACK_STEM.to_string()
    } else {
        stem.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, content: &str, url: &str) -> CaseStudyRecord {
        CaseStudyRecord {
            url: url.into(),
            title: title.into(),
            content: content.into(),
        }
    }

    #[test]
    fn test_render_document_layout() {
        let doc = render_case_studies(&[
            record("Acme", "Body A", "https://x.com/a"),
            record("Globex", "Body G", "https://x.com/g"),
        ]);
        assert_eq!(
            doc,
            "# Kinaxis Case Studies\n\n\
             ## Acme\n\nBody A\n\n[Source](https://x.com/a)\n\n---\n\n\
             ## Globex\n\nBody G\n\n[Source](https://x.com/g)\n\n---\n\n"
        );
    }

    #[test]
    fn test_render_empty_document_has_title_only() {
        assert_eq!(render_case_studies(&[]), "# Kinaxis Case Studies\n\n");
    }

    #[test]
    fn test_write_case_studies_uses_timestamped_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_case_studies(dir.path(), &[record("T", "C", "https://x.com")]).unwrap();

        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("kinaxis_case_studies_"));
        assert!(name.ends_with(".md"));
        // kinaxis_case_studies_ + YYYYmmdd_HHMMSS + .md
        assert_eq!(name.len(), "kinaxis_case_studies_".len() + 15 + 3);
        assert!(fs::read_to_string(&path).unwrap().contains("## T"));
    }

    #[test]
    fn test_save_case_page_sanitizes_title() {
        let dir = tempfile::tempdir().unwrap();
        let case = record("Acme: 30% faster/better?", "Body", "https://x.com/a");
        let path = save_case_page(dir.path(), &case).unwrap();

        assert_eq!(path.file_name().unwrap(), "Acme 30% fasterbetter.md");
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "# Acme: 30% faster/better?\n\nBody\n\n[Source](https://x.com/a)\n"
        );
    }

    #[test]
    fn test_sanitize_caps_long_titles() {
        let stem = sanitize_filename(&"A".repeat(300));
        assert_eq!(stem.len(), MAX_STEM_BYTES);

        // Multi-byte chars are never split
        let stem = sanitize_filename(&"é".repeat(150));
        assert!(stem.len() <= MAX_STEM_BYTES);
        assert_eq!(stem.chars().count(), MAX_STEM_BYTES / 2);
    }

    #[test]
    fn test_sanitize_falls_back_for_empty_titles() {
        assert_eq!(sanitize_filename("???"), FALLBACK_STEM);
        assert_eq!(sanitize_filename("  /  "), FALLBACK_STEM);
        assert_eq!(sanitize_filename(".."), FALLBACK_STEM);
    }

    #[test]
    fn test_save_case_page_with_long_title() {
        let dir = tempfile::tempdir().unwrap();
        let case = record(&"A".repeat(300), "Body", "https://x.com/a");
        let path = save_case_page(dir.path(), &case).unwrap();

        assert_eq!(path.file_name().unwrap().len(), MAX_STEM_BYTES + 3);
        assert!(fs::read_to_string(&path).unwrap().starts_with(&format!("# {}", case.title)));
    }

    #[test]
    fn test_save_case_pages_skips_failed_writes() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should go makes that write fail
        fs::create_dir(dir.path().join("Globex.md")).unwrap();

        let saved = save_case_pages(
            dir.path(),
            &[
                record("Acme", "A", "https://x.com/a"),
                record("Globex", "G", "https://x.com/g"),
                record("Initech", "I", "https://x.com/i"),
            ],
        );

        assert_eq!(
            saved,
            vec![dir.path().join("Acme.md"), dir.path().join("Initech.md")]
        );
    }
}
