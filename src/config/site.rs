//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    /// Greeting shown above the post listing
    pub greeting: String,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub posts_dir: String,
    pub static_dir: String,
    pub public_dir: String,

    // Home page chrome
    #[serde(default)]
    pub profile: ProfileConfig,
    #[serde(default)]
    pub social: Vec<SocialLink>,

    // Writing
    pub new_post_name: String,
    /// Include posts dated in the future
    pub future: bool,

    // Display
    pub date_format: String,

    /// Regeneration interval for the dev server, in seconds (0 = off)
    pub revalidate: u64,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "My Blog".to_string(),
            description: String::new(),
            author: "Anonymous".to_string(),
            greeting: "Hello and Welcome 👋".to_string(),
            language: "en".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),

            posts_dir: "posts".to_string(),
            static_dir: "static".to_string(),
            public_dir: "public".to_string(),

            profile: ProfileConfig::default(),
            social: Vec::new(),

            new_post_name: ":title.md".to_string(),
            future: true,

            date_format: "MMMM D, YYYY".to_string(),

            revalidate: 0,

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Profile picture shown on the listing page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    /// Image path relative to the site root
    pub image: String,
    pub alt: String,
    pub width: u32,
    pub height: u32,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            image: "/images/profile-photo.jpg".to_string(),
            alt: "profile photo".to_string(),
            width: 200,
            height: 200,
        }
    }
}

/// A social link rendered in the navbar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialLink {
    pub name: String,
    pub url: String,
}
