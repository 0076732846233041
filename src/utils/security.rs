// utils/security.rs
use crate::utils::config::Config;
use crate::utils::error::{AppError, Result};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Paramètres de signature et de validation des JWT
#[derive(Debug, Clone)]
pub struct JwtSettings {
    pub secret: String,
    pub algorithm: Algorithm,
    pub access_ttl: chrono::Duration,
    pub refresh_ttl: chrono::Duration,
    pub issuer: String,
    pub audience: String,
}

impl JwtSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            secret: config.secret_key.clone(),
            algorithm: config.jwt_algorithm,
            access_ttl: chrono::Duration::minutes(config.jwt_expire_minute),
            refresh_ttl: chrono::Duration::days(config.jwt_refresh_expire_days),
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
        }
    }
}

/// Type de token, inscrit dans les claims pour empêcher les substitutions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// Claims JWT communs aux tokens d'accès et de rafraîchissement
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,      // User ID
    pub iss: String,
    pub aud: String,
    pub exp: usize,
    pub iat: usize,
    pub nbf: usize,
    pub jti: String,      // Token ID
    pub typ: TokenType,
}

impl TokenClaims {
    /// Identifiant utilisateur porté par le token
    pub fn user_id(&self) -> Result<i64> {
        self.sub
            .parse::<i64>()
            .ok()
            .filter(|id| *id > 0)
            .ok_or(AppError::MissingSubject)
    }
}

/// Générer un token d'accès JWT
pub fn generate_access_token(user_id: i64, settings: &JwtSettings) -> Result<String> {
    generate_token(user_id, TokenType::Access, settings.access_ttl, settings)
}

/// Générer un refresh token JWT
pub fn generate_refresh_token(user_id: i64, settings: &JwtSettings) -> Result<String> {
    generate_token(user_id, TokenType::Refresh, settings.refresh_ttl, settings)
}

fn generate_token(
    user_id: i64,
    typ: TokenType,
    ttl: chrono::Duration,
    settings: &JwtSettings,
) -> Result<String> {
    let now = chrono::Utc::now();
    let expires_at = now + ttl;

    let claims = TokenClaims {
        sub: user_id.to_string(),
        iss: settings.issuer.clone(),
        aud: settings.audience.clone(),
        exp: expires_at.timestamp() as usize,
        iat: now.timestamp() as usize,
        nbf: now.timestamp() as usize,
        jti: Uuid::new_v4().to_string(),
        typ,
    };

    encode(
        &Header::new(settings.algorithm),
        &claims,
        &EncodingKey::from_secret(settings.secret.as_bytes()),
    )
    .map_err(|e| AppError::Token(e.to_string()))
}

/// Vérifier un token d'accès
pub fn verify_access_token(token: &str, settings: &JwtSettings) -> Result<TokenClaims> {
    verify_token(token, TokenType::Access, settings)
}

/// Vérifier un refresh token
pub fn verify_refresh_token(token: &str, settings: &JwtSettings) -> Result<TokenClaims> {
    verify_token(token, TokenType::Refresh, settings)
}

fn verify_token(token: &str, expected: TokenType, settings: &JwtSettings) -> Result<TokenClaims> {
    let mut validation = Validation::new(settings.algorithm);
    validation.set_issuer(&[settings.issuer.as_str()]);
    validation.set_audience(&[settings.audience.as_str()]);
    validation.set_required_spec_claims(&["exp", "nbf", "iss", "aud", "sub"]);
    validation.validate_nbf = true;

    let token_data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(settings.secret.as_bytes()),
        &validation,
    )
    .map_err(|e| {
        tracing::warn!(error = %e, "JWT rejeté");
        AppError::InvalidToken
    })?;

    if token_data.claims.typ != expected {
        tracing::warn!(expected = ?expected, got = ?token_data.claims.typ, "Type de JWT inattendu");
        return Err(AppError::InvalidToken);
    }

    Ok(token_data.claims)
}

/// Générer un hash de mot de passe avec Argon2
pub fn hash_password(password: &str) -> Result<String> {
    use argon2::{
        password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
        Argon2,
    };

    if password.is_empty() {
        return Err(AppError::Validation("Password cannot be empty".to_string()));
    }

    let argon2 = Argon2::default();
    let salt = SaltString::generate(&mut OsRng);

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::PasswordHash(e.to_string()))
}

/// Vérifier un mot de passe contre un hash ; un hash illisible ne correspond à rien
pub fn verify_password(password: &str, hash: &str) -> bool {
    use argon2::{
        password_hash::{PasswordHash, PasswordVerifier},
        Argon2,
    };

    match PasswordHash::new(hash) {
        Ok(parsed_hash) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok(),
        Err(e) => {
            tracing::warn!(error = %e, "Hash de mot de passe invalide en base");
            false
        }
    }
}

/// Calculer un hash SHA256
pub fn sha256_hash(data: &[u8]) -> String {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}
