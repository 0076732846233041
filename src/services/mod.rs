// services/mod.rs
pub mod cache;
pub mod database;
#[cfg(test)]
pub mod memory;
pub mod repository;

// Ré-exports pour faciliter l'import
pub use cache::{Cache, CacheBackend, MemoryCache, RedisCache};
pub use database::Database;
pub use repository::{
    BrandRepository, HealthCheck, SocialLinkRepository, UserRepository, WatchRepository,
};
