//! Create a new post

use anyhow::Result;
use std::fs;

use crate::Blog;

/// Create a new post markdown file with scaffold front-matter
pub fn run(blog: &Blog, title: &str) -> Result<()> {
    let now = chrono::Local::now();

    fs::create_dir_all(&blog.posts_dir)?;

    let slug = slug::slugify(title);
    let filename = blog
        .config
        .new_post_name
        .replace(":title", &slug)
        .replace(":year", &now.format("%Y").to_string())
        .replace(":month", &now.format("%m").to_string())
        .replace(":day", &now.format("%d").to_string());

    let file_path = blog.posts_dir.join(&filename);
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let content = format!(
        "---\ntitle: {}\ndate: {}\n---\n",
        title,
        now.format("%Y-%m-%d")
    );
    fs::write(&file_path, content)?;

    println!("Created: {:?}", file_path);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MarkdownRenderer, PostStore};
    use tempfile::TempDir;

    #[test]
    fn test_new_post_is_loadable() {
        let tmp = TempDir::new().unwrap();
        let blog = Blog::new(tmp.path()).unwrap();

        run(&blog, "Hello World").unwrap();
        assert!(blog.posts_dir.join("hello-world.md").exists());

        let renderer = MarkdownRenderer::new();
        let store = PostStore::load(&blog.posts_dir, &renderer, true).unwrap();
        assert!(store.contains("hello-world"));
        assert_eq!(store.metadata_title("hello-world"), "Hello World");
    }

    #[test]
    fn test_new_post_refuses_overwrite() {
        let tmp = TempDir::new().unwrap();
        let blog = Blog::new(tmp.path()).unwrap();

        run(&blog, "Hello World").unwrap();
        assert!(run(&blog, "Hello World").is_err());
    }
}
