//! List site content

use anyhow::Result;

use crate::store::{MarkdownRenderer, PostStore};
use crate::Blog;

/// Print the post listing, newest first
pub fn run(blog: &Blog) -> Result<()> {
    let renderer = MarkdownRenderer::new();
    let store = PostStore::load(&blog.posts_dir, &renderer, blog.config.future)?;

    println!("Posts ({}):", store.len());
    for post in store.summaries() {
        println!("  {} - {} [{}]", post.date, post.title, post.id);
    }

    Ok(())
}
