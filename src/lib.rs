#![deny(nonstandard_style)]

// Modules principaux
pub mod api;
pub mod core;
pub mod models;
pub mod services;
pub mod utils;

// Ré-exports pour faciliter l'utilisation
pub use api::{AppState, ENDPOINTS};
pub use utils::{AppError, Config, Result};

// Version de l'application
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = "Montana Swiss Watches API";
