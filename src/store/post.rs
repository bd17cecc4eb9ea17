//! Post models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lightweight metadata record for a post, used for listing and lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    /// Unique identifier, derived from the filename stem
    pub id: String,

    /// Display title
    pub title: String,

    /// Publication date (front-matter), used for sorting and display
    pub date: NaiveDate,
}

/// Full post record including the rendered HTML body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostContent {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,

    /// HTML rendered from the markdown body. Trusted content, authored
    /// by the site owner; injected into templates unescaped.
    pub content_html: String,
}

impl PostContent {
    /// The summary view of this post
    pub fn summary(&self) -> PostSummary {
        PostSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            date: self.date,
        }
    }
}
