//! Generator module - writes the static HTML tree from a loaded store
//!
//! One listing page, one page per enumerated post id, a not-found
//! page, a search index and an Atom feed. Each page render is an
//! independent, synchronous computation over the immutable store.

use anyhow::Result;
use std::fs;
use tera::Context;
use walkdir::WalkDir;

use crate::store::{PostContent, PostStore};
use crate::templates::{TemplateRenderer, STYLESHEET};
use crate::Blog;

/// Resolution outcome for a single post page.
///
/// Rendering a post id has exactly two states: the id resolves and
/// the page is rendered, or it does not and the not-found page is the
/// terminal result.
#[derive(Debug)]
pub enum PostPage {
    Found(PostContent),
    NotFound,
}

/// Static site generator using embedded Tera templates
pub struct Generator {
    blog: Blog,
    renderer: TemplateRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(blog: &Blog) -> Result<Self> {
        let renderer = TemplateRenderer::new()?;
        Ok(Self {
            blog: blog.clone(),
            renderer,
        })
    }

    /// Resolve a post id to its page view model
    pub fn resolve_post(&self, store: &PostStore, id: &str) -> PostPage {
        match store.content(id) {
            Ok(post) => PostPage::Found(post.clone()),
            Err(_) => PostPage::NotFound,
        }
    }

    /// Render a post page view model to HTML
    pub fn render_post_page(&self, page: &PostPage) -> Result<String> {
        let mut context = self.base_context();
        match page {
            PostPage::Found(post) => {
                context.insert("post", post);
                self.renderer.render("post.html", &context)
            }
            PostPage::NotFound => self.renderer.render("not_found.html", &context),
        }
    }

    /// Generate the entire site
    pub fn generate(&self, store: &PostStore) -> Result<()> {
        fs::create_dir_all(&self.blog.public_dir)?;

        self.write_stylesheet()?;
        self.copy_static_assets()?;

        self.generate_index_page(store)?;
        self.generate_post_pages(store)?;
        self.generate_not_found_page()?;
        self.generate_search_index(store)?;
        self.generate_atom_feed(store)?;

        Ok(())
    }

    /// Base template context shared by all pages
    fn base_context(&self) -> Context {
        let mut context = Context::new();
        context.insert("config", &self.blog.config);
        context
    }

    /// Generate the listing page at /index.html
    fn generate_index_page(&self, store: &PostStore) -> Result<()> {
        let mut context = self.base_context();
        context.insert("posts", store.summaries());

        let html = self.renderer.render("index.html", &context)?;
        fs::write(self.blog.public_dir.join("index.html"), html)?;
        tracing::debug!("Generated index page");

        Ok(())
    }

    /// Generate one static page per enumerated post id
    fn generate_post_pages(&self, store: &PostStore) -> Result<()> {
        for id in store.ids() {
            let page = self.resolve_post(store, id);
            let html = self.render_post_page(&page)?;

            let output_path = self.blog.public_dir.join(id).join("index.html");
            if let Some(parent) = output_path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&output_path, html)?;
            tracing::debug!("Generated post: {:?}", output_path);
        }

        tracing::info!("Generated {} post pages", store.len());
        Ok(())
    }

    /// Generate the not-found page at /404.html
    fn generate_not_found_page(&self) -> Result<()> {
        let html = self.render_post_page(&PostPage::NotFound)?;
        fs::write(self.blog.public_dir.join("404.html"), html)?;
        tracing::debug!("Generated 404 page");

        Ok(())
    }

    /// Generate the client-side search index (JSON)
    fn generate_search_index(&self, store: &PostStore) -> Result<()> {
        let root = &self.blog.config.root;
        let search_data: Vec<serde_json::Value> = store
            .ids()
            .filter_map(|id| store.content(id).ok())
            .map(|p| {
                serde_json::json!({
                    "title": p.title,
                    "url": format!("{}{}/", root, p.id),
                    "content": strip_html(&p.content_html),
                    "date": p.date.to_string(),
                })
            })
            .collect();

        let json = serde_json::to_string_pretty(&search_data)?;
        fs::write(self.blog.public_dir.join("search.json"), json)?;
        tracing::info!("Generated search.json");

        Ok(())
    }

    /// Generate the Atom feed of recent posts
    fn generate_atom_feed(&self, store: &PostStore) -> Result<()> {
        let config = &self.blog.config;
        let base_url = config.url.trim_end_matches('/');

        let mut feed = String::new();
        feed.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
        feed.push_str("<feed xmlns=\"http://www.w3.org/2005/Atom\">\n");
        feed.push_str(&format!("  <title>{}</title>\n", escape_xml(&config.title)));
        feed.push_str(&format!(
            "  <link href=\"{}/atom.xml\" rel=\"self\"/>\n",
            base_url
        ));
        feed.push_str(&format!("  <link href=\"{}/\"/>\n", base_url));
        feed.push_str(&format!(
            "  <updated>{}</updated>\n",
            chrono::Utc::now().to_rfc3339()
        ));
        feed.push_str(&format!("  <id>{}/</id>\n", base_url));
        feed.push_str(&format!(
            "  <author><name>{}</name></author>\n",
            escape_xml(&config.author)
        ));

        for id in store.ids().take(20) {
            let Ok(post) = store.content(id) else { continue };
            let url = format!("{}{}{}/", base_url, config.root, post.id);
            feed.push_str("  <entry>\n");
            feed.push_str(&format!("    <title>{}</title>\n", escape_xml(&post.title)));
            feed.push_str(&format!("    <link href=\"{}\"/>\n", url));
            feed.push_str(&format!("    <id>{}</id>\n", url));
            feed.push_str(&format!(
                "    <published>{}T00:00:00Z</published>\n",
                post.date
            ));
            feed.push_str(&format!(
                "    <content type=\"html\"><![CDATA[{}]]></content>\n",
                post.content_html
            ));
            feed.push_str("  </entry>\n");
        }

        feed.push_str("</feed>\n");

        fs::write(self.blog.public_dir.join("atom.xml"), feed)?;
        tracing::info!("Generated atom.xml");

        Ok(())
    }

    /// Write the embedded stylesheet into the output tree
    fn write_stylesheet(&self) -> Result<()> {
        let css_dir = self.blog.public_dir.join("css");
        fs::create_dir_all(&css_dir)?;
        fs::write(css_dir.join("style.css"), STYLESHEET)?;
        Ok(())
    }

    /// Copy static assets (profile photo, images) to the public directory
    fn copy_static_assets(&self) -> Result<()> {
        let static_dir = &self.blog.static_dir;
        if !static_dir.exists() {
            return Ok(());
        }

        for entry in WalkDir::new(static_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() {
                let relative = path.strip_prefix(static_dir)?;
                let dest = self.blog.public_dir.join(relative);

                if let Some(parent) = dest.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::copy(path, &dest)?;
            }
        }

        Ok(())
    }
}

/// Strip HTML tags from content
fn strip_html(html: &str) -> String {
    let mut result = String::new();
    let mut in_tag = false;

    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }

    result
}

/// Escape XML special characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MarkdownRenderer;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn write_post(dir: &Path, name: &str, title: &str, date: &str) {
        let content = format!("---\ntitle: {}\ndate: {}\n---\n\nBody of {}.\n", title, date, title);
        fs::write(dir.join(name), content).unwrap();
    }

    fn setup_site() -> (TempDir, Blog, PostStore) {
        let tmp = TempDir::new().unwrap();
        let posts_dir = tmp.path().join("posts");
        fs::create_dir_all(&posts_dir).unwrap();
        write_post(&posts_dir, "a.md", "Post A", "2023-01-01");
        write_post(&posts_dir, "b.md", "Post B", "2023-02-01");

        let blog = Blog::new(tmp.path()).unwrap();
        let renderer = MarkdownRenderer::new();
        let store = PostStore::load(&blog.posts_dir, &renderer, blog.config.future).unwrap();
        (tmp, blog, store)
    }

    #[test]
    fn test_generate_site_tree() {
        let (_tmp, blog, store) = setup_site();
        let generator = Generator::new(&blog).unwrap();
        generator.generate(&store).unwrap();

        assert!(blog.public_dir.join("index.html").exists());
        assert!(blog.public_dir.join("a/index.html").exists());
        assert!(blog.public_dir.join("b/index.html").exists());
        assert!(blog.public_dir.join("404.html").exists());
        assert!(blog.public_dir.join("search.json").exists());
        assert!(blog.public_dir.join("atom.xml").exists());
        assert!(blog.public_dir.join("css/style.css").exists());
    }

    #[test]
    fn test_index_lists_newest_first() {
        let (_tmp, blog, store) = setup_site();
        let generator = Generator::new(&blog).unwrap();
        generator.generate(&store).unwrap();

        let index = fs::read_to_string(blog.public_dir.join("index.html")).unwrap();
        let pos_b = index.find("Post B").unwrap();
        let pos_a = index.find("Post A").unwrap();
        assert!(pos_b < pos_a);
    }

    #[test]
    fn test_every_enumerated_id_renders_found() {
        let (_tmp, blog, store) = setup_site();
        let generator = Generator::new(&blog).unwrap();

        for id in store.ids() {
            assert!(matches!(
                generator.resolve_post(&store, id),
                PostPage::Found(_)
            ));
        }
    }

    #[test]
    fn test_nonexistent_id_takes_not_found_path() {
        let (_tmp, blog, store) = setup_site();
        let generator = Generator::new(&blog).unwrap();

        let page = generator.resolve_post(&store, "nonexistent");
        assert!(matches!(page, PostPage::NotFound));

        let html = generator.render_post_page(&page).unwrap();
        assert!(html.contains("Post Not Found"));
        assert!(!html.contains("Body of"));
    }

    #[test]
    fn test_post_page_contains_content_and_back_link() {
        let (_tmp, blog, store) = setup_site();
        let generator = Generator::new(&blog).unwrap();
        generator.generate(&store).unwrap();

        let page = fs::read_to_string(blog.public_dir.join("b/index.html")).unwrap();
        assert!(page.contains("<h1>Post B</h1>"));
        assert!(page.contains("February 1, 2023"));
        assert!(page.contains("Body of Post B"));
        assert!(page.contains("Back to home"));
    }

    #[test]
    fn test_configured_date_format_in_output() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("_config.yml"), "date_format: \"YYYY-MM-DD\"\n").unwrap();
        let posts_dir = tmp.path().join("posts");
        fs::create_dir_all(&posts_dir).unwrap();
        write_post(&posts_dir, "a.md", "Post A", "2023-01-15");

        let blog = Blog::new(tmp.path()).unwrap();
        let renderer = MarkdownRenderer::new();
        let store = PostStore::load(&blog.posts_dir, &renderer, blog.config.future).unwrap();
        let generator = Generator::new(&blog).unwrap();
        generator.generate(&store).unwrap();

        let page = fs::read_to_string(blog.public_dir.join("a/index.html")).unwrap();
        assert!(page.contains("2023-01-15"));
        assert!(!page.contains("January 15, 2023"));
    }

    #[test]
    fn test_search_index_entries() {
        let (_tmp, blog, store) = setup_site();
        let generator = Generator::new(&blog).unwrap();
        generator.generate(&store).unwrap();

        let json = fs::read_to_string(blog.public_dir.join("search.json")).unwrap();
        let entries: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["url"], "/b/");
        assert!(entries[0]["content"]
            .as_str()
            .unwrap()
            .contains("Body of Post B"));
    }

    #[test]
    fn test_static_assets_copied() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("posts")).unwrap();
        let images = tmp.path().join("static/images");
        fs::create_dir_all(&images).unwrap();
        fs::write(images.join("profile-photo.jpg"), b"jpeg").unwrap();

        let blog = Blog::new(tmp.path()).unwrap();
        let renderer = MarkdownRenderer::new();
        let store = PostStore::load(&blog.posts_dir, &renderer, true).unwrap();
        let generator = Generator::new(&blog).unwrap();
        generator.generate(&store).unwrap();

        assert!(blog.public_dir.join("images/profile-photo.jpg").exists());
    }

    #[test]
    fn test_strip_html() {
        assert_eq!(strip_html("<p>Hello <b>world</b></p>"), "Hello world");
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a & <b>"), "a &amp; &lt;b&gt;");
    }
}
