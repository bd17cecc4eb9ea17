//! Post Store - loads markdown posts from disk and answers lookups
//!
//! The store is derived, read-only state: it is rebuilt from the
//! source files on every generation, de-duplicated by id and sorted
//! by date descending.

pub mod frontmatter;
pub mod markdown;
pub mod post;

pub use frontmatter::FrontMatter;
pub use markdown::MarkdownRenderer;
pub use post::{PostContent, PostSummary};

use anyhow::Result;
use chrono::Local;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use thiserror::Error;
use walkdir::WalkDir;

/// Title returned when resolving metadata for an unknown identifier
pub const NOT_FOUND_TITLE: &str = "Post Not Found";

/// Store lookup errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("post not found: {0}")]
    PostNotFound(String),
}

/// In-memory collection of all posts, keyed by identifier
pub struct PostStore {
    /// Sorted (date descending), de-duplicated summaries
    summaries: Vec<PostSummary>,
    contents: HashMap<String, PostContent>,
}

impl PostStore {
    /// Load all posts from a directory. A missing or empty directory
    /// yields an empty store.
    pub fn load(posts_dir: &Path, renderer: &MarkdownRenderer, future: bool) -> Result<Self> {
        let mut posts: Vec<PostContent> = Vec::new();

        if posts_dir.exists() {
            for entry in WalkDir::new(posts_dir)
                .follow_links(true)
                .into_iter()
                .filter_map(|e| e.ok())
            {
                let path = entry.path();
                if path.is_file() && is_markdown_file(path) {
                    match load_post(path, renderer) {
                        Ok(post) => {
                            if future || post.date <= Local::now().date_naive() {
                                posts.push(post);
                            }
                        }
                        Err(e) => {
                            tracing::warn!("Failed to load post {:?}: {}", path, e);
                        }
                    }
                }
            }
        }

        // Sort by date descending (newest first)
        posts.sort_by(|a, b| b.date.cmp(&a.date));

        // De-duplicate by id; after the sort, the first occurrence is
        // the newer post and wins
        let mut seen: HashSet<String> = HashSet::new();
        posts.retain(|p| seen.insert(p.id.clone()));

        let summaries = posts.iter().map(|p| p.summary()).collect();
        let contents = posts.into_iter().map(|p| (p.id.clone(), p)).collect();

        Ok(Self {
            summaries,
            contents,
        })
    }

    /// Ordered identifiers, one per known post. Drives static page
    /// generation; an empty store yields an empty sequence.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.summaries.iter().map(|s| s.id.as_str())
    }

    /// All summaries, newest first
    pub fn summaries(&self) -> &[PostSummary] {
        &self.summaries
    }

    /// Whether an identifier is known
    pub fn contains(&self, id: &str) -> bool {
        self.contents.contains_key(id)
    }

    /// Display title for an identifier, with a fixed fallback for
    /// unknown ids. Pure lookup, no side effects.
    pub fn metadata_title(&self, id: &str) -> String {
        match self.summaries.iter().find(|s| s.id == id) {
            Some(s) => s.title.clone(),
            None => NOT_FOUND_TITLE.to_string(),
        }
    }

    /// Full content for an identifier
    pub fn content(&self, id: &str) -> Result<&PostContent, StoreError> {
        self.contents
            .get(id)
            .ok_or_else(|| StoreError::PostNotFound(id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.summaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }
}

/// Load a single post from a markdown file
fn load_post(path: &Path, renderer: &MarkdownRenderer) -> Result<PostContent> {
    let content = fs::read_to_string(path)?;
    let (fm, body) = FrontMatter::parse(&content);

    // Identifier is the filename stem
    let id = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("untitled")
        .to_string();

    // Title falls back to the filename stem
    let title = fm.title.clone().unwrap_or_else(|| id.clone());

    // Date falls back to the file mtime
    let date = fm.parse_date().unwrap_or_else(|| {
        fs::metadata(path)
            .and_then(|m| m.modified())
            .map(|t| chrono::DateTime::<Local>::from(t).date_naive())
            .unwrap_or_else(|_| Local::now().date_naive())
    });

    let content_html = renderer.render(body)?;

    Ok(PostContent {
        id,
        title,
        date,
        content_html,
    })
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}
