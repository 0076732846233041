// core/user_service.rs
use std::sync::Arc;
use validator::Validate;

use crate::models::{
    NewUser, UsLgParamSchema, UsLgRespSchema, UsPkParamSchema, UsPkRespSchema, UsReParamSchema,
    UsReRespSchema, UsRfParamSchema, User,
};
use crate::services::cache::Cache;
use crate::services::repository::UserRepository;
use crate::utils::error::{AppError, Result};
use crate::utils::security::{
    generate_access_token, generate_refresh_token, hash_password, verify_access_token,
    verify_password, verify_refresh_token, JwtSettings,
};
use crate::utils::validation::normalize_phone_number;

/// Entrées de cache des profils utilisateur
pub const USER_CACHE: &str = "users:pk";

pub const TOKEN_TYPE: &str = "bearer";

pub struct UserService {
    users: Arc<dyn UserRepository>,
    cache: Cache,
    jwt: JwtSettings,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>, cache: Cache, jwt: JwtSettings) -> Self {
        Self { users, cache, jwt }
    }

    /// Inscription d'un nouvel utilisateur
    pub async fn register(&self, mut params: UsReParamSchema) -> Result<UsReRespSchema> {
        params.email = normalize_email(&params.email);
        params.validate()?;

        let email = params.email.clone();
        let phone_number = normalize_phone_number(&params.phone_number);

        // Vérifier si l'utilisateur existe déjà
        if self.users.user_exists(&email, &phone_number).await? {
            return Err(AppError::UserAlreadyExists);
        }

        let new_user = NewUser {
            first_name: params.first_name.trim().to_string(),
            last_name: params.last_name.trim().to_string(),
            phone_number,
            email,
            password_hash: hash_password(&params.password)?,
            is_active: true,
            is_staff: false,
            is_superuser: false,
        };

        let user = self.users.create_user(&new_user).await?;
        tracing::info!(user_id = user.id, "Nouvel utilisateur inscrit");

        Ok(user.into())
    }

    /// Authentification email/mot de passe
    pub async fn login(&self, mut params: UsLgParamSchema) -> Result<UsLgRespSchema> {
        params.email = normalize_email(&params.email);
        params.validate()?;

        let user = self
            .users
            .get_user_by_email(&params.email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !verify_password(&params.password, &user.password) {
            return Err(AppError::InvalidCredentials);
        }

        if !user.is_active {
            return Err(AppError::InactiveAccount);
        }

        self.issue_tokens(user.id)
    }

    /// Rafraîchir un token
    pub async fn refresh(&self, params: UsRfParamSchema) -> Result<UsLgRespSchema> {
        params.validate()?;

        let claims = verify_refresh_token(&params.refresh_token, &self.jwt)?;
        let user = self
            .find_profile(claims.user_id()?)
            .await?
            .ok_or(AppError::UserNotFound)?;

        if !user.is_active {
            return Err(AppError::InactiveUser);
        }

        self.issue_tokens(user.id)
    }

    /// Utilisateur porté par un token d'accès
    pub async fn authenticate(&self, token: &str) -> Result<UsPkRespSchema> {
        let claims = verify_access_token(token, &self.jwt)?;
        let user = self
            .find_profile(claims.user_id()?)
            .await?
            .ok_or(AppError::UserNotFound)?;

        if !user.is_active {
            return Err(AppError::InactiveUser);
        }

        Ok(user)
    }

    /// Obtenir le profil d'un utilisateur par ID
    pub async fn get_user(&self, params: UsPkParamSchema) -> Result<UsPkRespSchema> {
        params.validate()?;

        self.find_profile(params.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User".to_string()))
    }

    /// Profil mis en cache ; un utilisateur absent n'est jamais mis en cache
    pub async fn find_profile(&self, user_id: i64) -> Result<Option<UsPkRespSchema>> {
        let key = Cache::cache_key(USER_CACHE, &UsPkParamSchema { user_id })?;

        if let Some(profile) = self.cache.get::<UsPkRespSchema>(&key).await? {
            return Ok(Some(profile));
        }

        match self.users.get_user_by_id(user_id).await? {
            Some(user) => {
                let profile = user.to_profile();
                self.cache.set(&key, &profile).await?;
                Ok(Some(profile))
            }
            None => Ok(None),
        }
    }

    /// Crée le superutilisateur initial s'il n'existe pas encore
    pub async fn ensure_admin(
        &self,
        email: &str,
        password: &str,
        phone_number: &str,
    ) -> Result<Option<User>> {
        let email = normalize_email(email);

        if self.users.get_user_by_email(&email).await?.is_some() {
            tracing::debug!(email = %email, "Administrateur déjà présent");
            return Ok(None);
        }

        let admin = NewUser {
            first_name: "Admin".to_string(),
            last_name: "Montana".to_string(),
            phone_number: normalize_phone_number(phone_number),
            email,
            password_hash: hash_password(password)?,
            is_active: true,
            is_staff: true,
            is_superuser: true,
        };

        let user = self.users.create_user(&admin).await?;
        tracing::info!(user_id = user.id, "Administrateur initial créé");

        Ok(Some(user))
    }

    fn issue_tokens(&self, user_id: i64) -> Result<UsLgRespSchema> {
        Ok(UsLgRespSchema {
            access_token: generate_access_token(user_id, &self.jwt)?,
            refresh_token: generate_refresh_token(user_id, &self.jwt)?,
            token_type: TOKEN_TYPE.to_string(),
        })
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
