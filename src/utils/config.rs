// utils/config.rs
use crate::utils::error::{AppError, Result};
use dotenv::dotenv;
use jsonwebtoken::Algorithm;
use std::env;
use std::str::FromStr;

/// Origines autorisées par défaut (frontend Next.js en local)
pub const DEFAULT_ALLOWED_HOSTS: [&str; 3] = [
    "http://localhost:3000",
    "http://0.0.0.0:3000",
    "http://127.0.0.1:3000",
];

/// Backend de cache sélectionné au démarrage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheBackendKind {
    Redis,
    Memory,
}

#[derive(Debug, Clone)]
pub struct Config {
    // Environnement et serveur
    pub run_mode: String,
    pub server_host: String,
    pub server_port: u16,
    pub workers: usize,
    pub log_level: String,
    pub logging_format: String,

    // Base de données
    pub db_user: String,
    pub db_password: String,
    pub db_host: String,
    pub db_port: u16,
    pub db_name: String,
    pub database_max_connections: u32,

    // Sécurité
    pub secret_key: String,
    pub jwt_algorithm: Algorithm,
    pub jwt_expire_minute: i64,
    pub jwt_refresh_expire_days: i64,
    pub issuer: String,
    pub audience: String,
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
    pub admin_phone_number: String,

    // Cache
    pub cache_backend: CacheBackendKind,
    pub redis_host: String,
    pub redis_port: u16,
    pub redis_db: i64,
    pub cache_prefix: String,
    pub cache_ttl_seconds: u64,

    // CORS
    pub allowed_hosts: Vec<String>,
}

impl Config {
    /// Charger la configuration depuis les variables d'environnement
    pub fn from_env() -> Result<Self> {
        // Charger le fichier .env si présent
        dotenv().ok();

        Self::from_source(|key| env::var(key).ok())
    }

    /// Construire la configuration depuis une source clé/valeur quelconque
    pub fn from_source<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let source = Source { lookup };

        let run_mode = source.or("RUN_MODE", "development");
        let default_format = if run_mode == "production" { "json" } else { "compact" };

        let jwt_algorithm = parse_algorithm(&source.or("JWT_ALGORITHM", "HS256"))?;

        let cache_backend = match source.or("CACHE_BACKEND", "redis").to_lowercase().as_str() {
            "redis" => CacheBackendKind::Redis,
            "memory" => CacheBackendKind::Memory,
            other => {
                return Err(AppError::Validation(format!(
                    "CACHE_BACKEND must be 'redis' or 'memory', got '{}'",
                    other
                )))
            }
        };

        let allowed_hosts = source
            .get("ALLOWED_HOSTS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|host| !host.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_else(|| DEFAULT_ALLOWED_HOSTS.iter().map(|h| h.to_string()).collect());

        let config = Config {
            // Environnement et serveur
            server_host: source.or("SERVER_HOST", "0.0.0.0"),
            server_port: source.parse("SERVER_PORT", "8000")?,
            workers: source.parse("WORKERS", "4")?,
            log_level: source.or("LOG_LEVEL", "info"),
            logging_format: source.or("LOGGING_FORMAT", default_format),
            run_mode,

            // Base de données
            db_user: source.required("DB_USER")?,
            db_password: source.required("DB_PASSWORD")?,
            db_host: source.required("DB_HOST")?,
            db_port: source.parse("DB_PORT", "5432")?,
            db_name: source.required("DB_NAME")?,
            database_max_connections: source.parse("DATABASE_MAX_CONNECTIONS", "10")?,

            // Sécurité
            secret_key: source.required("SECRET_KEY")?,
            jwt_algorithm,
            jwt_expire_minute: source.parse("JWT_EXPIRE_MINUTE", "30")?,
            jwt_refresh_expire_days: source.parse("JWT_REFRESH_EXPIRE_DAYS", "7")?,
            issuer: source.required("ISSUER")?,
            audience: source.required("AUDIENCE")?,
            admin_email: source.get("ADMIN_EMAIL"),
            admin_password: source.get("ADMIN_PASSWORD"),
            admin_phone_number: source.or("ADMIN_PHONE_NUMBER", "+10000000000"),

            // Cache
            cache_backend,
            redis_host: source.or("REDIS_HOST", "localhost"),
            redis_port: source.parse("REDIS_PORT", "6379")?,
            redis_db: source.parse("REDIS_DB", "0")?,
            cache_prefix: source.or("CACHE_PREFIX", "montana:"),
            cache_ttl_seconds: source.parse("CACHE_TTL_SECONDS", "900")?,

            allowed_hosts,
        };

        if config.jwt_expire_minute <= 0 {
            return Err(AppError::Validation(
                "JWT_EXPIRE_MINUTE must be a positive number".to_string(),
            ));
        }
        if config.jwt_refresh_expire_days <= 0 {
            return Err(AppError::Validation(
                "JWT_REFRESH_EXPIRE_DAYS must be a positive number".to_string(),
            ));
        }
        if config.secret_key.len() < 32 {
            tracing::warn!("⚠️  SECRET_KEY trop court (< 32 caractères) - risque de sécurité");
        }

        Ok(config)
    }

    /// URL de connexion PostgreSQL
    pub fn database_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.db_user, self.db_password, self.db_host, self.db_port, self.db_name
        )
    }

    /// URL de connexion Redis
    pub fn redis_url(&self) -> String {
        format!("redis://{}:{}/{}", self.redis_host, self.redis_port, self.redis_db)
    }

    /// Adresse d'écoute du serveur HTTP
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Vérifier si on est en production
    pub fn is_production(&self) -> bool {
        self.run_mode == "production"
    }
}

/// Seuls les algorithmes HMAC sont acceptés : la clé est un secret partagé
fn parse_algorithm(raw: &str) -> Result<Algorithm> {
    let algorithm = Algorithm::from_str(raw.trim())
        .map_err(|_| AppError::Validation(format!("JWT_ALGORITHM '{}' is not supported", raw)))?;

    match algorithm {
        Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => Ok(algorithm),
        _ => Err(AppError::Validation(format!(
            "JWT_ALGORITHM must be one of HS256, HS384, HS512, got '{}'",
            raw
        ))),
    }
}

struct Source<F> {
    lookup: F,
}

impl<F> Source<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, key: &str) -> Option<String> {
        (self.lookup)(key).filter(|value| !value.is_empty())
    }

    fn or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    fn required(&self, key: &str) -> Result<String> {
        self.get(key).ok_or_else(|| {
            AppError::Validation(format!("Variable d'environnement requise manquante: {}", key))
        })
    }

    fn parse<T: FromStr>(&self, key: &str, default: &str) -> Result<T> {
        self.or(key, default)
            .trim()
            .parse()
            .map_err(|_| AppError::Validation(format!("{} must be a number", key)))
    }
}
