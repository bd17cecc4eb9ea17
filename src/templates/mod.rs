//! Built-in blog theme templates using the Tera template engine
//!
//! All templates are embedded directly in the binary. Autoescaping is
//! off: the only HTML flowing through templates is the site owner's
//! own rendered markdown.

use anyhow::Result;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::helpers::date::format_date;

/// Embedded stylesheet, copied into the output tree on generation
pub const STYLESHEET: &str = include_str!("blog/style.css");

/// Template renderer with the embedded blog theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("blog/layout.html")),
            ("index.html", include_str!("blog/index.html")),
            ("post.html", include_str!("blog/post.html")),
            ("not_found.html", include_str!("blog/not_found.html")),
            ("partials/nav.html", include_str!("blog/partials/nav.html")),
            (
                "partials/profile.html",
                include_str!("blog/partials/profile.html"),
            ),
            (
                "partials/search.html",
                include_str!("blog/partials/search.html"),
            ),
        ])?;

        tera.register_filter("date_format", date_format_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: format an ISO date string using a Moment.js-style
/// pattern; templates pass the site's configured `date_format`
fn date_format_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("date_format", "value", String, value);
    let format = match args.get("format") {
        Some(val) => tera::try_get_value!("date_format", "format", String, val),
        None => "MMMM D, YYYY".to_string(),
    };

    let date = s
        .parse::<chrono::NaiveDate>()
        .map_err(|e| tera::Error::msg(format!("date_format: invalid date {:?}: {}", s, e)))?;
    Ok(tera::Value::String(format_date(&date, &format)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;

    fn post_context(config: &SiteConfig) -> Context {
        let mut context = Context::new();
        context.insert("config", config);
        context.insert(
            "post",
            &serde_json::json!({
                "id": "hello",
                "title": "Hello World",
                "date": "2024-01-15",
                "content_html": "<p>Hi there.</p>",
            }),
        );
        context
    }

    #[test]
    fn test_render_not_found() {
        let renderer = TemplateRenderer::new().unwrap();
        let mut context = Context::new();
        context.insert("config", &SiteConfig::default());

        let html = renderer.render("not_found.html", &context).unwrap();
        assert!(html.contains("Post Not Found"));
        assert!(html.contains("Back to home"));
    }

    #[test]
    fn test_render_post_page() {
        let renderer = TemplateRenderer::new().unwrap();
        let context = post_context(&SiteConfig::default());

        let html = renderer.render("post.html", &context).unwrap();
        assert!(html.contains("<h1>Hello World</h1>"));
        assert!(html.contains("January 15, 2024"));
        // Trusted HTML is injected verbatim
        assert!(html.contains("<p>Hi there.</p>"));
    }

    #[test]
    fn test_configured_date_format_changes_output() {
        let renderer = TemplateRenderer::new().unwrap();
        let config = SiteConfig {
            date_format: "YYYY-MM-DD".to_string(),
            ..Default::default()
        };
        let context = post_context(&config);

        let html = renderer.render("post.html", &context).unwrap();
        assert!(html.contains("2024-01-15"));
        assert!(!html.contains("January 15, 2024"));
    }

    #[test]
    fn test_date_format_filter_rejects_garbage() {
        let value = tera::Value::String("nope".to_string());
        assert!(date_format_filter(&value, &HashMap::new()).is_err());
    }
}
