// services/repository.rs
//! Contrats d'accès aux données utilisés par les services métier.
//!
//! `Database` (PostgreSQL) les implémente en production ; les tests
//! utilisent le magasin en mémoire de `services::memory`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::models::{
    BrCrParamSchema, BrCrRespSchema, BrPhRespSchema, BrTpRespSchema, NewUser, SlReRespSchema,
    User, WaCrParamSchema, WaFeRespSchema, WaNaRespSchema, WaTwRespSchema, Watch,
};
use crate::utils::error::Result;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insère un utilisateur ; un email ou téléphone déjà pris donne `UserAlreadyExists`
    async fn create_user(&self, user: &NewUser) -> Result<User>;

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Vrai si l'email ou le numéro de téléphone est déjà utilisé
    async fn user_exists(&self, email: &str, phone_number: &str) -> Result<bool>;
}

#[async_trait]
pub trait WatchRepository: Send + Sync {
    /// Montres actives avec leur image FEATURED, plus récentes d'abord
    async fn featured_watches(&self, limit: i64) -> Result<Vec<WaFeRespSchema>>;

    /// Montres actives classées par likes reçus depuis `since`
    async fn top_weekly_watches(
        &self,
        limit: i64,
        since: DateTime<Utc>,
    ) -> Result<Vec<WaTwRespSchema>>;

    /// Montres actives avec leur image PLACEHOLDER, plus récentes d'abord
    async fn new_arrivals(&self, limit: i64) -> Result<Vec<WaNaRespSchema>>;

    /// Crée la montre, ses descriptions et ses images en une seule transaction
    async fn create_watch(&self, params: &WaCrParamSchema) -> Result<Watch>;

    async fn watch_exists(&self, watch_id: i64) -> Result<bool>;

    /// Retourne `true` si le like vient d'être créé, `false` s'il existait déjà
    async fn add_like(&self, watch_id: i64, user_id: i64) -> Result<bool>;
}

#[async_trait]
pub trait BrandRepository: Send + Sync {
    async fn create_brand(&self, params: &BrCrParamSchema) -> Result<BrCrRespSchema>;

    async fn top_brands(&self, limit: i64) -> Result<Vec<BrTpRespSchema>>;

    async fn placeholder_brands(&self, limit: i64) -> Result<Vec<BrPhRespSchema>>;
}

#[async_trait]
pub trait SocialLinkRepository: Send + Sync {
    /// Liens actifs et non supprimés ; `None` = pas de limite
    async fn active_links(&self, limit: Option<i64>) -> Result<Vec<SlReRespSchema>>;
}

/// Sonde utilisée par `/health`
#[async_trait]
pub trait HealthCheck: Send + Sync {
    async fn ping(&self) -> Result<()>;
}
