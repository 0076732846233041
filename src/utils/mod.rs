// utils/mod.rs
pub mod config;
pub mod error;
pub mod security;
pub mod validation;

// Ré-exports pour faciliter l'import
pub use config::{CacheBackendKind, Config};
pub use error::{AppError, Result};
pub use security::{
    generate_access_token, generate_refresh_token, hash_password, sha256_hash,
    verify_access_token, verify_password, verify_refresh_token, JwtSettings, TokenClaims,
    TokenType,
};
pub use validation::{
    normalize_phone_number, validate_image_url, validate_not_blank,
    validate_phone_number,
};
