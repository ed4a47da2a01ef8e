//! Configuration module

mod site;

pub use site::CacheConfig;
pub use site::CategoryConfig;
pub use site::PreloadConfig;
pub use site::ReadingConfig;
pub use site::RetryConfig;
pub use site::SiteConfig;
