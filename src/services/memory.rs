// services/memory.rs
//! Magasin en mémoire pour les tests : mêmes règles que les requêtes SQL
//! de `Database`, sans PostgreSQL.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::models::{
    BrCrParamSchema, BrCrRespSchema, BrPhRespSchema, BrTpRespSchema, BrandImageType, NewUser,
    SlReRespSchema, User, WaCrParamSchema, WaFeRespSchema, WaNaRespSchema, WaTwRespSchema, Watch,
    WatchImageType, WatchStatus,
};
use crate::services::repository::{
    BrandRepository, HealthCheck, SocialLinkRepository, UserRepository, WatchRepository,
};
use crate::utils::error::{AppError, Result};

struct StoredImage {
    image_url: String,
    image_type: WatchImageType,
}

struct StoredWatch {
    watch: Watch,
    descriptions: Vec<String>,
    images: Vec<StoredImage>,
}

struct StoredLike {
    watch_id: i64,
    user_id: i64,
    created_at: DateTime<Utc>,
}

struct StoredBrand {
    brand: BrCrRespSchema,
    images: Vec<(BrandImageType, String)>,
    watch_ids: Vec<i64>,
}

struct StoredLink {
    id: i64,
    link: SlReRespSchema,
    is_active: bool,
    is_deleted: bool,
}

#[derive(Default)]
struct Inner {
    next_id: i64,
    users: Vec<User>,
    watches: Vec<StoredWatch>,
    likes: Vec<StoredLike>,
    countries: HashMap<i64, String>,
    brands: Vec<StoredBrand>,
    social_links: Vec<StoredLink>,
}

impl Inner {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn watch_cards(&self, image_type: WatchImageType, limit: i64) -> Vec<WaFeRespSchema> {
        let mut cards: Vec<(&Watch, &str)> = self
            .watches
            .iter()
            .filter(|w| w.watch.status == WatchStatus::Active)
            .filter_map(|w| {
                w.images
                    .iter()
                    .find(|i| i.image_type == image_type)
                    .map(|i| (&w.watch, i.image_url.as_str()))
            })
            .collect();

        cards.sort_by(|(a, _), (b, _)| (b.created_at, b.id).cmp(&(a.created_at, a.id)));

        cards
            .into_iter()
            .take(limit.max(0) as usize)
            .map(|(watch, image_url)| WaFeRespSchema {
                id: watch.id,
                name: watch.name.clone(),
                short_description: watch.short_description.clone(),
                price: watch.price,
                discount_percent: watch.discount_percent,
                watch_image_url: image_url.to_string(),
                special_event: None,
            })
            .collect()
    }
}

#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_country(&self, country_image: &str) -> i64 {
        let mut inner = self.inner.write().await;
        let id = inner.next_id();
        inner.countries.insert(id, country_image.to_string());
        id
    }

    pub async fn set_watch_created_at(&self, watch_id: i64, created_at: DateTime<Utc>) {
        let mut inner = self.inner.write().await;
        if let Some(stored) = inner.watches.iter_mut().find(|w| w.watch.id == watch_id) {
            stored.watch.created_at = created_at;
        }
    }

    pub async fn descriptions_of(&self, watch_id: i64) -> Vec<String> {
        let inner = self.inner.read().await;
        inner
            .watches
            .iter()
            .find(|w| w.watch.id == watch_id)
            .map(|w| w.descriptions.clone())
            .unwrap_or_default()
    }

    /// Like daté, pour simuler des likes anciens
    pub async fn add_like_at(&self, watch_id: i64, user_id: i64, created_at: DateTime<Utc>) {
        let mut inner = self.inner.write().await;
        inner.likes.push(StoredLike {
            watch_id,
            user_id,
            created_at,
        });
    }

    pub async fn like_count(&self, watch_id: i64) -> usize {
        let inner = self.inner.read().await;
        inner.likes.iter().filter(|l| l.watch_id == watch_id).count()
    }

    pub async fn add_brand_image(&self, brand_id: i64, image_type: BrandImageType, image_url: &str) {
        let mut inner = self.inner.write().await;
        if let Some(stored) = inner.brands.iter_mut().find(|b| b.brand.id == brand_id) {
            stored.images.push((image_type, image_url.to_string()));
        }
    }

    pub async fn link_brand_watch(&self, brand_id: i64, watch_id: i64) {
        let mut inner = self.inner.write().await;
        if let Some(stored) = inner.brands.iter_mut().find(|b| b.brand.id == brand_id) {
            stored.watch_ids.push(watch_id);
        }
    }

    pub async fn add_social_link(
        &self,
        platform_name: &str,
        social_link: &str,
        is_active: bool,
        is_deleted: bool,
    ) -> i64 {
        let mut inner = self.inner.write().await;
        let id = inner.next_id();
        inner.social_links.push(StoredLink {
            id,
            link: SlReRespSchema {
                platform_name: platform_name.to_string(),
                social_link: social_link.to_string(),
                social_username: format!("@{}", platform_name.to_lowercase()),
            },
            is_active,
            is_deleted,
        });
        id
    }

    pub async fn set_user_active(&self, user_id: i64, is_active: bool) {
        let mut inner = self.inner.write().await;
        if let Some(user) = inner.users.iter_mut().find(|u| u.id == user_id) {
            user.is_active = is_active;
        }
    }
}

#[async_trait]
impl HealthCheck for MemoryStore {
    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create_user(&self, user: &NewUser) -> Result<User> {
        let mut inner = self.inner.write().await;
        if inner
            .users
            .iter()
            .any(|u| u.email == user.email || u.phone_number == user.phone_number)
        {
            return Err(AppError::UserAlreadyExists);
        }

        let now = Utc::now();
        let created = User {
            id: inner.next_id(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            phone_number: user.phone_number.clone(),
            email: user.email.clone(),
            password: user.password_hash.clone(),
            is_active: user.is_active,
            is_staff: user.is_staff,
            is_superuser: user.is_superuser,
            created_at: now,
            updated_at: now,
        };
        inner.users.push(created.clone());

        Ok(created)
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner.users.iter().find(|u| u.id == id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner.users.iter().find(|u| u.email == email).cloned())
    }

    async fn user_exists(&self, email: &str, phone_number: &str) -> Result<bool> {
        let inner = self.inner.read().await;
        Ok(inner
            .users
            .iter()
            .any(|u| u.email == email || u.phone_number == phone_number))
    }
}

#[async_trait]
impl WatchRepository for MemoryStore {
    async fn featured_watches(&self, limit: i64) -> Result<Vec<WaFeRespSchema>> {
        let inner = self.inner.read().await;
        Ok(inner.watch_cards(WatchImageType::Featured, limit))
    }

    async fn top_weekly_watches(
        &self,
        limit: i64,
        since: DateTime<Utc>,
    ) -> Result<Vec<WaTwRespSchema>> {
        let inner = self.inner.read().await;

        let mut ranked: Vec<(&Watch, &str, i64)> = inner
            .watches
            .iter()
            .filter(|w| w.watch.status == WatchStatus::Active)
            .filter_map(|w| {
                let image = w.images.iter().find(|i| i.image_type == WatchImageType::Featured)?;
                let likes = inner
                    .likes
                    .iter()
                    .filter(|l| l.watch_id == w.watch.id && l.created_at >= since)
                    .count() as i64;
                Some((&w.watch, image.image_url.as_str(), likes))
            })
            .collect();

        ranked.sort_by(|(a, _, a_likes), (b, _, b_likes)| {
            (b_likes, b.created_at, b.id).cmp(&(a_likes, a.created_at, a.id))
        });

        Ok(ranked
            .into_iter()
            .take(limit.max(0) as usize)
            .map(|(watch, image_url, likes)| WaTwRespSchema {
                watch_id: watch.id,
                name: watch.name.clone(),
                watch_image_url: image_url.to_string(),
                likes,
            })
            .collect())
    }

    async fn new_arrivals(&self, limit: i64) -> Result<Vec<WaNaRespSchema>> {
        let inner = self.inner.read().await;
        Ok(inner.watch_cards(WatchImageType::Placeholder, limit))
    }

    async fn create_watch(&self, params: &WaCrParamSchema) -> Result<Watch> {
        let mut inner = self.inner.write().await;
        let name = params.name.trim();
        if inner.watches.iter().any(|w| w.watch.name == name) {
            return Err(AppError::AlreadyExists("Watch".to_string()));
        }

        let now = Utc::now();
        let watch = Watch {
            id: inner.next_id(),
            name: name.to_string(),
            short_description: params.short_description.trim().to_string(),
            price: params.price,
            discount_percent: params.discount_percent,
            status: params.status,
            created_at: now,
            updated_at: now,
        };

        inner.watches.push(StoredWatch {
            watch: watch.clone(),
            descriptions: params
                .descriptions
                .iter()
                .map(|d| d.content.trim().to_string())
                .collect(),
            images: params
                .images
                .iter()
                .map(|i| StoredImage {
                    image_url: i.image_url.clone(),
                    image_type: i.watch_image_type,
                })
                .collect(),
        });

        Ok(watch)
    }

    async fn watch_exists(&self, watch_id: i64) -> Result<bool> {
        let inner = self.inner.read().await;
        Ok(inner.watches.iter().any(|w| w.watch.id == watch_id))
    }

    async fn add_like(&self, watch_id: i64, user_id: i64) -> Result<bool> {
        let mut inner = self.inner.write().await;
        if !inner.watches.iter().any(|w| w.watch.id == watch_id) {
            return Err(AppError::NotFound("Watch".to_string()));
        }
        if inner
            .likes
            .iter()
            .any(|l| l.watch_id == watch_id && l.user_id == user_id)
        {
            return Ok(false);
        }

        inner.likes.push(StoredLike {
            watch_id,
            user_id,
            created_at: Utc::now(),
        });
        Ok(true)
    }
}

#[async_trait]
impl BrandRepository for MemoryStore {
    async fn create_brand(&self, params: &BrCrParamSchema) -> Result<BrCrRespSchema> {
        let mut inner = self.inner.write().await;
        let name = params.name.trim();
        if inner.brands.iter().any(|b| b.brand.name == name) {
            return Err(AppError::AlreadyExists("Brand".to_string()));
        }
        if let Some(country_id) = params.country_id {
            if !inner.countries.contains_key(&country_id) {
                return Err(AppError::NotFound("Country".to_string()));
            }
        }

        let now = Utc::now();
        let brand = BrCrRespSchema {
            id: inner.next_id(),
            name: name.to_string(),
            is_active: params.is_active,
            country_id: params.country_id,
            created_at: now,
            updated_at: now,
        };
        inner.brands.push(StoredBrand {
            brand: brand.clone(),
            images: Vec::new(),
            watch_ids: Vec::new(),
        });

        Ok(brand)
    }

    async fn top_brands(&self, limit: i64) -> Result<Vec<BrTpRespSchema>> {
        let inner = self.inner.read().await;

        let mut brands: Vec<&StoredBrand> =
            inner.brands.iter().filter(|b| b.brand.is_active).collect();
        brands.sort_by(|a, b| {
            b.watch_ids
                .len()
                .cmp(&a.watch_ids.len())
                .then_with(|| a.brand.name.cmp(&b.brand.name))
        });

        Ok(brands
            .into_iter()
            .take(limit.max(0) as usize)
            .map(|b| BrTpRespSchema {
                name: b.brand.name.clone(),
                country_image_url: b
                    .brand
                    .country_id
                    .and_then(|id| inner.countries.get(&id).cloned()),
            })
            .collect())
    }

    async fn placeholder_brands(&self, limit: i64) -> Result<Vec<BrPhRespSchema>> {
        let inner = self.inner.read().await;

        let mut brands: Vec<BrPhRespSchema> = inner
            .brands
            .iter()
            .filter(|b| b.brand.is_active)
            .filter_map(|b| {
                b.images
                    .iter()
                    .find(|(image_type, _)| *image_type == BrandImageType::Placeholder)
                    .map(|(_, url)| BrPhRespSchema {
                        name: b.brand.name.clone(),
                        image_url: url.clone(),
                    })
            })
            .collect();
        brands.sort_by(|a, b| a.name.cmp(&b.name));
        brands.truncate(limit.max(0) as usize);

        Ok(brands)
    }
}

#[async_trait]
impl SocialLinkRepository for MemoryStore {
    async fn active_links(&self, limit: Option<i64>) -> Result<Vec<SlReRespSchema>> {
        let inner = self.inner.read().await;

        let mut links: Vec<&StoredLink> = inner
            .social_links
            .iter()
            .filter(|l| l.is_active && !l.is_deleted)
            .collect();
        links.sort_by_key(|l| l.id);

        let limit = limit.map_or(usize::MAX, |l| l.max(0) as usize);
        Ok(links.into_iter().take(limit).map(|l| l.link.clone()).collect())
    }
}

/// Date relative utilisée par les tests de classement
pub fn days_ago(days: i64) -> DateTime<Utc> {
    Utc::now() - Duration::days(days)
}
