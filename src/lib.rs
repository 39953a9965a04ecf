//! # folio
//!
//! A self-hosted portfolio site: static marketing pages, a markdown-driven
//! project listing, and a single proxy endpoint that forwards text to a
//! third-party embeddings API.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   ┌─────────────┐   ┌──────────┐
//! │ Content dir │──▶│   Content    │──▶│   Page    │
//! │ *.md *.mdx  │   │   Loader     │   │ Renderer  │
//! └─────────────┘   └─────────────┘   └────┬─────┘
//!                                          │
//!                  ┌──────────────┐        ▼
//!                  │  Embeddings  │   ┌──────────┐
//!                  │   provider   │◀──│   HTTP    │
//!                  │  (OpenAI)    │   │  (axum)   │
//!                  └──────────────┘   └──────────┘
//! ```
//!
//! Pages are composed at request time: the projects routes scan the content
//! directory, parse each file's front-matter, and wrap the result in the
//! site shell. The embeddings proxy is an independent request/response
//! endpoint with no relation to page rendering.
//!
//! ## Quick Start
//!
//! ```bash
//! folio content check           # validate the content directory
//! folio content list            # print the parsed project table
//! folio serve                   # start the HTTP server
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`frontmatter`] | YAML front-matter splitting and parsing |
//! | [`content`] | Content directory scanning |
//! | [`render`] | HTML shell and page builders |
//! | [`embedding`] | Embedding provider abstraction |
//! | [`server`] | HTTP server |

pub mod config;
pub mod content;
pub mod embedding;
pub mod frontmatter;
pub mod render;
pub mod server;
