//! Integration tests for the rendered site pages.
//!
//! The server runs in-process against a tempdir content directory; pages
//! are fetched over HTTP and asserted on as HTML text.

use serde_json::Value;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

use folio::config::{Config, ContentConfig, EmbeddingConfig, ServerConfig, SiteConfig};
use folio::embedding::DisabledProvider;
use folio::render;
use folio::server::run_server_with_provider;

fn find_free_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

fn setup_content(tmp: &TempDir) {
    let content_dir = tmp.path().join("projects");
    fs::create_dir_all(&content_dir).unwrap();
    fs::write(
        content_dir.join("alpha.mdx"),
        "---\ntitle: Alpha\nsummary: First\n---\n\n## Overview\n\nThe alpha project, in *detail*.\n",
    )
    .unwrap();
    fs::write(
        content_dir.join("beta.md"),
        "---\ntitle: Beta\nsummary: Second\n---\n\nThe beta project body.\n",
    )
    .unwrap();
}

fn test_config(tmp: &TempDir, port: u16) -> Config {
    Config {
        site: SiteConfig {
            owner: "Jane Doe".to_string(),
            role: "Lead Software Engineer".to_string(),
            tagline: "Systems and the web.".to_string(),
        },
        content: ContentConfig {
            dir: tmp.path().join("projects"),
            include_globs: vec!["*.md".to_string(), "*.mdx".to_string()],
        },
        server: ServerConfig {
            bind: format!("127.0.0.1:{}", port),
        },
        embedding: EmbeddingConfig::default(),
    }
}

async fn wait_for_server(port: u16) {
    let client = reqwest::Client::new();
    let url = format!("http://127.0.0.1:{}/health", port);
    for _ in 0..50 {
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        if let Ok(resp) = client.get(&url).send().await {
            if resp.status().is_success() {
                return;
            }
        }
    }
    panic!("Server did not become ready within 5 seconds");
}

async fn spawn_site(cfg: Config) -> (u16, tokio::task::JoinHandle<()>) {
    let port = cfg
        .server
        .bind
        .rsplit(':')
        .next()
        .unwrap()
        .parse::<u16>()
        .unwrap();

    let handle = tokio::spawn(async move {
        run_server_with_provider(&cfg, Arc::new(DisabledProvider))
            .await
            .ok();
    });

    wait_for_server(port).await;
    (port, handle)
}

fn page_url(port: u16, path: &str) -> String {
    format!("http://127.0.0.1:{}{}", port, path)
}

#[tokio::test]
async fn test_projects_page_lists_documents_sorted() {
    let tmp = TempDir::new().unwrap();
    setup_content(&tmp);
    let port = find_free_port();
    let (port, handle) = spawn_site(test_config(&tmp, port)).await;

    let body = reqwest::get(page_url(port, "/projects"))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(body.contains("Highlighted Projects"));
    assert!(body.contains("<h3>Alpha</h3>"));
    assert!(body.contains("<p>First</p>"));
    assert!(body.contains(r#"<a href="/projects/alpha">"#));
    assert!(body.contains("<h3>Beta</h3>"));
    assert!(
        body.find("<h3>Alpha</h3>").unwrap() < body.find("<h3>Beta</h3>").unwrap(),
        "Documents should be listed in slug order"
    );

    handle.abort();
}

#[tokio::test]
async fn test_project_detail_renders_markdown_body() {
    let tmp = TempDir::new().unwrap();
    setup_content(&tmp);
    let port = find_free_port();
    let (port, handle) = spawn_site(test_config(&tmp, port)).await;

    let body = reqwest::get(page_url(port, "/projects/alpha"))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(body.contains("<h2>Alpha</h2>"));
    assert!(body.contains("<h2>Overview</h2>"));
    assert!(body.contains("<em>detail</em>"));

    handle.abort();
}

#[tokio::test]
async fn test_unknown_slug_is_not_found() {
    let tmp = TempDir::new().unwrap();
    setup_content(&tmp);
    let port = find_free_port();
    let (port, handle) = spawn_site(test_config(&tmp, port)).await;

    let resp = reqwest::get(page_url(port, "/projects/nonexistent"))
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "not_found");

    handle.abort();
}

#[tokio::test]
async fn test_malformed_file_fails_whole_projects_page() {
    let tmp = TempDir::new().unwrap();
    setup_content(&tmp);
    fs::write(
        tmp.path().join("projects").join("broken.md"),
        "no front matter here",
    )
    .unwrap();
    let port = find_free_port();
    let (port, handle) = spawn_site(test_config(&tmp, port)).await;

    let resp = reqwest::get(page_url(port, "/projects")).await.unwrap();
    assert_eq!(resp.status(), 500, "No partial listing on a broken directory");

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "internal");

    handle.abort();
}

#[tokio::test]
async fn test_missing_content_directory_fails_projects_page() {
    let tmp = TempDir::new().unwrap();
    // No content directory created
    let port = find_free_port();
    let (port, handle) = spawn_site(test_config(&tmp, port)).await;

    let resp = reqwest::get(page_url(port, "/projects")).await.unwrap();
    assert_eq!(resp.status(), 500);

    handle.abort();
}

#[tokio::test]
async fn test_shell_nav_and_footer_on_every_page() {
    let tmp = TempDir::new().unwrap();
    setup_content(&tmp);
    let port = find_free_port();
    let (port, handle) = spawn_site(test_config(&tmp, port)).await;

    let year = render::current_year();
    for path in ["/", "/projects", "/case-studies", "/about"] {
        let resp = reqwest::get(page_url(port, path)).await.unwrap();
        assert_eq!(resp.status(), 200, "GET {} failed", path);
        let body = resp.text().await.unwrap();

        for (label, href) in render::NAV_LINKS {
            assert!(
                body.contains(&format!(r#"<a href="{}">{}</a>"#, href, label)),
                "Nav link '{}' missing on {}",
                label,
                path
            );
        }
        assert!(
            body.contains(&format!("© {} Jane Doe — Lead Software Engineer.", year)),
            "Footer missing on {}",
            path
        );
    }

    handle.abort();
}

#[tokio::test]
async fn test_about_page_content() {
    let tmp = TempDir::new().unwrap();
    setup_content(&tmp);
    let port = find_free_port();
    let (port, handle) = spawn_site(test_config(&tmp, port)).await;

    let body = reqwest::get(page_url(port, "/about"))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("About"));
    assert!(body.contains("Systems and the web."));

    handle.abort();
}
