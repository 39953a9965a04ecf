//! YAML front-matter splitting and parsing.
//!
//! Each content file starts with a `---`-delimited YAML block holding the
//! document's metadata, followed by a free-form markdown body. Both steps
//! here are pure functions over strings so they can be tested without a
//! filesystem; the I/O half of the pipeline lives in [`crate::content`].

use serde::Deserialize;
use thiserror::Error;

/// Metadata block at the top of a content file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FrontMatter {
    pub title: String,
    pub summary: String,
}

/// Front-matter parse error. The whole content load fails on the first one;
/// there is no per-file isolation.
#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("content must start with a '---' front-matter delimiter")]
    MissingOpeningDelimiter,
    #[error("missing closing '---' front-matter delimiter")]
    MissingClosingDelimiter,
    #[error("invalid front-matter YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

/// Split raw file content into `(yaml, body)`.
///
/// Content must start with `---\n`, and a closing `\n---\n` (or `\n---` at
/// EOF) separates the YAML from the body. The body is returned with leading
/// newlines trimmed.
pub fn split_front_matter(content: &str) -> Result<(&str, &str), FrontMatterError> {
    let after_open = content
        .strip_prefix("---")
        .ok_or(FrontMatterError::MissingOpeningDelimiter)?;
    let after_open = after_open.strip_prefix('\n').unwrap_or(after_open);

    let closing_pos = after_open
        .find("\n---")
        .ok_or(FrontMatterError::MissingClosingDelimiter)?;

    let yaml = &after_open[..closing_pos];
    let remainder = &after_open[closing_pos + 4..];

    let body = remainder
        .strip_prefix('\n')
        .unwrap_or(remainder)
        .trim_start_matches('\n');

    Ok((yaml, body))
}

/// Deserialize a YAML front-matter block. `title` and `summary` are both
/// required; a missing key is a parse error.
pub fn parse_front_matter(yaml: &str) -> Result<FrontMatter, FrontMatterError> {
    Ok(serde_yaml_ng::from_str(yaml)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_yaml_and_body() {
        let raw = "---\ntitle: Alpha\nsummary: First\n---\n\nBody text here.";
        let (yaml, body) = split_front_matter(raw).unwrap();
        assert_eq!(yaml, "title: Alpha\nsummary: First");
        assert_eq!(body, "Body text here.");
    }

    #[test]
    fn test_split_closing_delimiter_at_eof() {
        let raw = "---\ntitle: Alpha\nsummary: First\n---";
        let (yaml, body) = split_front_matter(raw).unwrap();
        assert_eq!(yaml, "title: Alpha\nsummary: First");
        assert_eq!(body, "");
    }

    #[test]
    fn test_missing_opening_delimiter() {
        let err = split_front_matter("title: Alpha\n").unwrap_err();
        assert!(matches!(err, FrontMatterError::MissingOpeningDelimiter));
    }

    #[test]
    fn test_missing_closing_delimiter() {
        let err = split_front_matter("---\ntitle: Alpha\n").unwrap_err();
        assert!(matches!(err, FrontMatterError::MissingClosingDelimiter));
    }

    #[test]
    fn test_parse_required_fields() {
        let meta = parse_front_matter("title: Alpha\nsummary: First").unwrap();
        assert_eq!(meta.title, "Alpha");
        assert_eq!(meta.summary, "First");
    }

    #[test]
    fn test_parse_missing_summary_fails() {
        let err = parse_front_matter("title: Alpha").unwrap_err();
        assert!(matches!(err, FrontMatterError::Yaml(_)));
    }

    #[test]
    fn test_parse_non_mapping_fails() {
        assert!(parse_front_matter("- just\n- a\n- list").is_err());
    }
}
