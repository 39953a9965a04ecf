//! Content directory scanning.
//!
//! The projects pages are driven by a directory of markdown files, one per
//! project. Scanning enumerates the directory (I/O) and hands each file's
//! text to [`parse_document`] (pure), so the parsing step is testable
//! without a filesystem. Any unreadable or malformed file fails the whole
//! load; a broken content directory is fatal for the page render.

use anyhow::{bail, Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use walkdir::WalkDir;

use crate::config::{Config, ContentConfig};
use crate::frontmatter::{self, FrontMatterError};

/// A content unit: one project file, parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Filename minus its markdown extension; identity within the directory.
    pub slug: String,
    pub title: String,
    pub summary: String,
    /// Markdown body after the front-matter block.
    pub body: String,
}

/// Derive the slug from a filename by stripping a trailing `.md`/`.mdx`
/// extension. Filenames without one are used as-is.
pub fn slug_from_filename(filename: &str) -> String {
    filename
        .strip_suffix(".mdx")
        .or_else(|| filename.strip_suffix(".md"))
        .unwrap_or(filename)
        .to_string()
}

/// Parse raw file text into a [`Document`]. Pure; no filesystem access.
pub fn parse_document(slug: &str, raw: &str) -> Result<Document, FrontMatterError> {
    let (yaml, body) = frontmatter::split_front_matter(raw)?;
    let meta = frontmatter::parse_front_matter(yaml)?;

    Ok(Document {
        slug: slug.to_string(),
        title: meta.title,
        summary: meta.summary,
        body: body.to_string(),
    })
}

/// Scan the content directory and parse every matching file.
///
/// Results are sorted by slug; raw directory order is filesystem-dependent
/// and not stable across platforms. Duplicate slugs (e.g. `a.md` next to
/// `a.mdx`) are not deduplicated; both documents are returned.
pub fn scan_content(content: &ContentConfig) -> Result<Vec<Document>> {
    let dir = &content.dir;
    if !dir.is_dir() {
        bail!("Content directory does not exist: {}", dir.display());
    }

    let include_set = build_globset(&content.include_globs)?;

    let mut documents = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let filename = entry.file_name().to_string_lossy().to_string();
        if !include_set.is_match(&filename) {
            continue;
        }

        let raw = std::fs::read_to_string(entry.path())
            .with_context(|| format!("Failed to read content file: {}", entry.path().display()))?;
        let slug = slug_from_filename(&filename);
        let document = parse_document(&slug, &raw)
            .with_context(|| format!("Malformed content file: {}", entry.path().display()))?;
        documents.push(document);
    }

    documents.sort_by(|a, b| a.slug.cmp(&b.slug));

    Ok(documents)
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}

/// `folio content list` — print the parsed project table.
pub fn run_list(config: &Config) -> Result<()> {
    let documents = scan_content(&config.content)?;

    if documents.is_empty() {
        println!("No content found in {}", config.content.dir.display());
        return Ok(());
    }

    println!("{:<24} {:<32} SUMMARY", "SLUG", "TITLE");
    for document in &documents {
        println!(
            "{:<24} {:<32} {}",
            document.slug, document.title, document.summary
        );
    }

    Ok(())
}

/// `folio content check` — parse the whole directory, failing on the first
/// malformed file.
pub fn run_check(config: &Config) -> Result<()> {
    let documents = scan_content(&config.content)?;
    println!(
        "ok: {} documents parsed from {}",
        documents.len(),
        config.content.dir.display()
    );
    Ok(())
}
