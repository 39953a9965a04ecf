//! HTML shell and page builders.
//!
//! Every page is composed from two pure pieces: a page-specific content
//! fragment and the persistent shell (header, nav, footer) wrapped around
//! it by [`render_shell`]. The footer year is a parameter rather than a
//! clock read so tests can pin it; request handlers pass [`current_year`].

use chrono::{Datelike, Utc};
use pulldown_cmark::{html, Options, Parser};

use crate::config::SiteConfig;
use crate::content::Document;

/// Navigation links rendered in the shell header, in order.
pub const NAV_LINKS: [(&str, &str); 3] = [
    ("Projects", "/projects"),
    ("Case Studies", "/case-studies"),
    ("About", "/about"),
];

/// Year from the system clock, for request-time rendering.
pub fn current_year() -> i32 {
    Utc::now().year()
}

/// Escape text for interpolation into HTML element content or attributes.
pub fn html_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render a markdown body to HTML.
pub fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, Options::empty());
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

/// Wrap a content fragment in the persistent site shell.
pub fn render_shell(site: &SiteConfig, page_title: &str, content: &str, year: i32) -> String {
    let owner = html_escape(&site.owner);
    let nav = NAV_LINKS
        .iter()
        .map(|(label, href)| format!(r#"<a href="{href}">{label}</a>"#))
        .collect::<Vec<_>>()
        .join("\n      ");

    format!(
        r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title} — {owner}</title>
</head>
<body>
  <header>
    <h1>{owner}</h1>
    <nav>
      {nav}
    </nav>
  </header>
  <main>
{content}
  </main>
  <footer>
    <p>© {year} {owner} — {role}.</p>
  </footer>
</body>
</html>
"#,
        title = html_escape(page_title),
        role = html_escape(&site.role),
    )
}

pub fn render_home(site: &SiteConfig) -> String {
    format!(
        r#"    <h2>{owner}</h2>
    <p>{tagline}</p>
    <p><a href="/projects">See highlighted projects →</a></p>"#,
        owner = html_escape(&site.owner),
        tagline = html_escape(&site.tagline),
    )
}

/// The projects listing: one article per document, title and summary, each
/// linking to its detail page by slug.
pub fn render_projects(documents: &[Document]) -> String {
    let mut out = String::from("    <h2>Highlighted Projects</h2>\n");
    for document in documents {
        out.push_str(&format!(
            r#"    <article>
      <h3>{title}</h3>
      <p>{summary}</p>
      <a href="/projects/{slug}">Read more →</a>
    </article>
"#,
            title = html_escape(&document.title),
            summary = html_escape(&document.summary),
            slug = html_escape(&document.slug),
        ));
    }
    out
}

/// A single project page: title, summary, and the markdown body as HTML.
pub fn render_project(document: &Document) -> String {
    format!(
        r#"    <article>
      <h2>{title}</h2>
      <p>{summary}</p>
{body}    </article>"#,
        title = html_escape(&document.title),
        summary = html_escape(&document.summary),
        body = markdown_to_html(&document.body),
    )
}

pub fn render_case_studies() -> String {
    r#"    <h2>Case Studies</h2>
    <p>Longer write-ups of selected work, process, and outcomes.</p>"#
        .to_string()
}

pub fn render_about(site: &SiteConfig) -> String {
    format!(
        r#"    <h2>About</h2>
    <p>{owner} — {role}.</p>
    <p>{tagline}</p>"#,
        owner = html_escape(&site.owner),
        role = html_escape(&site.role),
        tagline = html_escape(&site.tagline),
    )
}
