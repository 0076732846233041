use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::utils::validation::{validate_not_blank, validate_phone_number};

pub const NAME_MAX_LENGTH: u64 = 255;
pub const PHONE_MAX_LENGTH: u64 = 25;
pub const EMAIL_MAX_LENGTH: u64 = 255;
pub const PASSWORD_MIN_LENGTH: u64 = 8;

/// Représente un utilisateur tel que stocké en base
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub email: String,

    /// Hash Argon2, jamais sérialisé
    pub password: String,

    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Données d'insertion d'un utilisateur (mot de passe déjà hashé)
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub email: String,
    pub password_hash: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
}

/// Connexion : email et mot de passe
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UsLgParamSchema {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password cannot be empty"))]
    pub password: String,
}

/// Jeton renvoyé après connexion ou rafraîchissement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsLgRespSchema {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
}

/// Inscription d'un nouvel utilisateur
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UsReParamSchema {
    #[validate(
        email(message = "Invalid email format"),
        length(max = "EMAIL_MAX_LENGTH")
    )]
    pub email: String,

    #[validate(length(
        min = "PASSWORD_MIN_LENGTH",
        message = "Password must be at least 8 characters long"
    ))]
    pub password: String,

    #[validate(length(max = "PHONE_MAX_LENGTH"), custom = "validate_phone_number")]
    pub phone_number: String,

    #[validate(length(min = 1, max = "NAME_MAX_LENGTH"), custom = "validate_not_blank")]
    pub first_name: String,

    #[validate(length(min = 1, max = "NAME_MAX_LENGTH"), custom = "validate_not_blank")]
    pub last_name: String,
}

/// Réponse d'inscription (exclut les données sensibles)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsReRespSchema {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
}

/// Renouvellement d'un token d'accès
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UsRfParamSchema {
    #[validate(length(min = 1, message = "Refresh token cannot be empty"))]
    pub refresh_token: String,
}

/// Recherche d'un utilisateur par clé primaire
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UsPkParamSchema {
    #[validate(range(min = 1, message = "user_id must be greater than 0"))]
    pub user_id: i64,
}

/// Profil public d'un utilisateur, mis en cache
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsPkRespSchema {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub email: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Convertit en profil public
    pub fn to_profile(&self) -> UsPkRespSchema {
        UsPkRespSchema {
            id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            phone_number: self.phone_number.clone(),
            email: self.email.clone(),
            is_active: self.is_active,
            is_staff: self.is_staff,
            is_superuser: self.is_superuser,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl From<User> for UsReRespSchema {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            created_at: user.created_at,
        }
    }
}
