// services/database.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

use crate::models::{
    BrCrParamSchema, BrCrRespSchema, BrPhRespSchema, BrTpRespSchema, BrandImageType, NewUser,
    SlReRespSchema, User, WaCrParamSchema, WaFeRespSchema, WaNaRespSchema, WaTwRespSchema, Watch,
    WatchImageType,
};
use crate::services::repository::{
    BrandRepository, HealthCheck, SocialLinkRepository, UserRepository, WatchRepository,
};
use crate::utils::error::{AppError, Result};

const WATCH_COLUMNS: &str = "id, name, short_description, price::FLOAT8 AS price, \
     discount_percent::FLOAT8 AS discount_percent, status, created_at, updated_at";

/// Carte de montre avec une seule image du type demandé
const WATCH_CARD_QUERY: &str = r#"
    SELECT w.id, w.name, w.short_description,
           w.price::FLOAT8 AS price,
           w.discount_percent::FLOAT8 AS discount_percent,
           i.image_url AS watch_image_url,
           NULL::TEXT AS special_event
    FROM watches w
    JOIN LATERAL (
        SELECT image_url FROM watch_images
        WHERE watch_id = w.id AND watch_image_type = $2
        ORDER BY id
        LIMIT 1
    ) i ON TRUE
    WHERE w.status = 'ACTIVE'
    ORDER BY w.created_at DESC, w.id DESC
    LIMIT $1
"#;

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Créer une nouvelle instance de base de données
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(30))
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Exécuter les migrations
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }

    async fn watch_cards(
        &self,
        image_type: WatchImageType,
        limit: i64,
    ) -> Result<Vec<WaFeRespSchema>> {
        let rows = sqlx::query_as::<_, WaFeRespSchema>(WATCH_CARD_QUERY)
            .bind(limit)
            .bind(image_type)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }
}

/// Traduit les violations de contraintes en erreurs métier
fn constraint_error(err: sqlx::Error, conflict: AppError, missing: &str) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return conflict;
        }
        if db_err.is_foreign_key_violation() {
            return AppError::NotFound(missing.to_string());
        }
    }
    AppError::from(err)
}

#[async_trait]
impl HealthCheck for Database {
    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

// === UTILISATEURS ===

#[async_trait]
impl UserRepository for Database {
    async fn create_user(&self, user: &NewUser) -> Result<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users
                (first_name, last_name, phone_number, email, password,
                 is_active, is_staff, is_superuser)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.phone_number)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.is_active)
        .bind(user.is_staff)
        .bind(user.is_superuser)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| constraint_error(e, AppError::UserAlreadyExists, "User"))
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn user_exists(&self, email: &str, phone_number: &str) -> Result<bool> {
        let exists: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM users WHERE email = $1 OR phone_number = $2)",
        )
        .bind(email)
        .bind(phone_number)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists.0)
    }
}

// === MONTRES ===

#[async_trait]
impl WatchRepository for Database {
    async fn featured_watches(&self, limit: i64) -> Result<Vec<WaFeRespSchema>> {
        self.watch_cards(WatchImageType::Featured, limit).await
    }

    async fn top_weekly_watches(
        &self,
        limit: i64,
        since: DateTime<Utc>,
    ) -> Result<Vec<WaTwRespSchema>> {
        let rows = sqlx::query_as::<_, WaTwRespSchema>(
            r#"
            SELECT w.id AS watch_id, w.name,
                   i.image_url AS watch_image_url,
                   COUNT(l.id) AS likes
            FROM watches w
            JOIN LATERAL (
                SELECT image_url FROM watch_images
                WHERE watch_id = w.id AND watch_image_type = 'FEATURED'
                ORDER BY id
                LIMIT 1
            ) i ON TRUE
            LEFT JOIN likes l ON l.watch_id = w.id AND l.created_at >= $2
            WHERE w.status = 'ACTIVE'
            GROUP BY w.id, w.name, w.created_at, i.image_url
            ORDER BY likes DESC, w.created_at DESC, w.id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .bind(since)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn new_arrivals(&self, limit: i64) -> Result<Vec<WaNaRespSchema>> {
        self.watch_cards(WatchImageType::Placeholder, limit).await
    }

    async fn create_watch(&self, params: &WaCrParamSchema) -> Result<Watch> {
        let mut tx = self.pool.begin().await?;

        let watch = sqlx::query_as::<_, Watch>(&format!(
            r#"
            INSERT INTO watches (name, short_description, price, discount_percent, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            WATCH_COLUMNS
        ))
        .bind(params.name.trim())
        .bind(params.short_description.trim())
        .bind(params.price)
        .bind(params.discount_percent)
        .bind(params.status)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| constraint_error(e, AppError::AlreadyExists("Watch".to_string()), "Watch"))?;

        for description in &params.descriptions {
            sqlx::query("INSERT INTO watch_descriptions (watch_id, content) VALUES ($1, $2)")
                .bind(watch.id)
                .bind(description.content.trim())
                .execute(&mut *tx)
                .await?;
        }

        for image in &params.images {
            sqlx::query(
                "INSERT INTO watch_images (watch_id, image_url, watch_image_type) VALUES ($1, $2, $3)",
            )
            .bind(watch.id)
            .bind(&image.image_url)
            .bind(image.watch_image_type)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(watch)
    }

    async fn watch_exists(&self, watch_id: i64) -> Result<bool> {
        let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM watches WHERE id = $1)")
            .bind(watch_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists.0)
    }

    async fn add_like(&self, watch_id: i64, user_id: i64) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO likes (watch_id, user_id)
            VALUES ($1, $2)
            ON CONFLICT (watch_id, user_id) DO NOTHING
            "#,
        )
        .bind(watch_id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| constraint_error(e, AppError::Internal, "Watch"))?;

        Ok(result.rows_affected() == 1)
    }
}

// === MARQUES ===

#[async_trait]
impl BrandRepository for Database {
    async fn create_brand(&self, params: &BrCrParamSchema) -> Result<BrCrRespSchema> {
        sqlx::query_as::<_, BrCrRespSchema>(
            r#"
            INSERT INTO brands (name, is_active, country_id)
            VALUES ($1, $2, $3)
            RETURNING id, name, is_active, country_id, created_at, updated_at
            "#,
        )
        .bind(params.name.trim())
        .bind(params.is_active)
        .bind(params.country_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| constraint_error(e, AppError::AlreadyExists("Brand".to_string()), "Country"))
    }

    async fn top_brands(&self, limit: i64) -> Result<Vec<BrTpRespSchema>> {
        let rows = sqlx::query_as::<_, BrTpRespSchema>(
            r#"
            SELECT b.name, c.country_image AS country_image_url
            FROM brands b
            LEFT JOIN countries c ON c.id = b.country_id
            LEFT JOIN brands_to_watches bw ON bw.brand_id = b.id
            WHERE b.is_active
            GROUP BY b.id, b.name, c.country_image
            ORDER BY COUNT(bw.watch_id) DESC, b.name
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn placeholder_brands(&self, limit: i64) -> Result<Vec<BrPhRespSchema>> {
        let rows = sqlx::query_as::<_, BrPhRespSchema>(
            r#"
            SELECT b.name, i.image_url
            FROM brands b
            JOIN LATERAL (
                SELECT image_url FROM brand_images
                WHERE brand_id = b.id AND image_type = $2
                ORDER BY id
                LIMIT 1
            ) i ON TRUE
            WHERE b.is_active
            ORDER BY b.name
            LIMIT $1
            "#,
        )
        .bind(limit)
        .bind(BrandImageType::Placeholder)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

// === LIENS SOCIAUX ===

#[async_trait]
impl SocialLinkRepository for Database {
    async fn active_links(&self, limit: Option<i64>) -> Result<Vec<SlReRespSchema>> {
        // LIMIT NULL = pas de limite
        let rows = sqlx::query_as::<_, SlReRespSchema>(
            r#"
            SELECT platform_name, social_link, social_username
            FROM social_links
            WHERE is_active AND NOT is_deleted
            ORDER BY id
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
