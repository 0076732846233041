// core/mod.rs
pub mod brand_service;
pub mod social_link_service;
pub mod user_service;
pub mod watch_service;

// Ré-exports pour faciliter l'import
pub use brand_service::BrandService;
pub use social_link_service::SocialLinkService;
pub use user_service::UserService;
pub use watch_service::WatchService;
