//! Configuration module

mod site;

pub use site::ProfileConfig;
pub use site::SiteConfig;
pub use site::SocialLink;
