// core/watch_service.rs
use chrono::{Duration, Utc};
use std::sync::Arc;
use validator::Validate;

use crate::models::{
    WaCrParamSchema, WaCrRespSchema, WaFeParamSchema, WaFeRespSchema, WaLiParamSchema,
    WaLiRespSchema, WaNaParamSchema, WaNaRespSchema, WaTwParamSchema, WaTwRespSchema,
};
use crate::services::cache::Cache;
use crate::services::repository::WatchRepository;
use crate::utils::error::{AppError, Result};

pub const FEATURED_CACHE: &str = "watches:featured";
pub const TOP_WEEKLY_CACHE: &str = "watches:top-weekly";
pub const NEW_ARRIVALS_CACHE: &str = "watches:new-arrivals";

/// Fenêtre du classement hebdomadaire
const TOP_WEEKLY_WINDOW_DAYS: i64 = 7;

pub struct WatchService {
    watches: Arc<dyn WatchRepository>,
    cache: Cache,
}

impl WatchService {
    pub fn new(watches: Arc<dyn WatchRepository>, cache: Cache) -> Self {
        Self { watches, cache }
    }

    pub async fn featured(&self, params: WaFeParamSchema) -> Result<Vec<WaFeRespSchema>> {
        params.validate()?;

        self.cache
            .cached(FEATURED_CACHE, &params, self.cache.default_ttl(), || {
                self.watches.featured_watches(params.limit)
            })
            .await
    }

    pub async fn top_weekly(&self, params: WaTwParamSchema) -> Result<Vec<WaTwRespSchema>> {
        params.validate()?;

        self.cache
            .cached(TOP_WEEKLY_CACHE, &params, self.cache.default_ttl(), || {
                let since = Utc::now() - Duration::days(TOP_WEEKLY_WINDOW_DAYS);
                self.watches.top_weekly_watches(params.limit, since)
            })
            .await
    }

    pub async fn new_arrivals(&self, params: WaNaParamSchema) -> Result<Vec<WaNaRespSchema>> {
        params.validate()?;

        self.cache
            .cached(NEW_ARRIVALS_CACHE, &params, self.cache.default_ttl(), || {
                self.watches.new_arrivals(params.limit)
            })
            .await
    }

    /// Création d'une montre, de ses descriptions et de ses images
    pub async fn create(&self, params: WaCrParamSchema) -> Result<WaCrRespSchema> {
        params.validate()?;

        let watch = self.watches.create_watch(&params).await?;
        tracing::info!(watch_id = watch.id, name = %watch.name, "Montre créée");

        for name in [FEATURED_CACHE, TOP_WEEKLY_CACHE, NEW_ARRIVALS_CACHE] {
            self.cache.invalidate(name).await?;
        }

        Ok(watch.into())
    }

    /// Like idempotent d'une montre
    pub async fn like(&self, user_id: i64, params: WaLiParamSchema) -> Result<WaLiRespSchema> {
        params.validate()?;

        if !self.watches.watch_exists(params.watch_id).await? {
            return Err(AppError::NotFound("Watch".to_string()));
        }

        let created = self.watches.add_like(params.watch_id, user_id).await?;
        if created {
            self.cache.invalidate(TOP_WEEKLY_CACHE).await?;
        }

        Ok(WaLiRespSchema {
            watch_id: params.watch_id,
            liked: true,
            created,
        })
    }
}
