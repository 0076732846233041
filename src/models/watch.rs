use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

use crate::utils::validation::{validate_image_url, validate_not_blank};

pub const WATCH_NAME_MAX_LENGTH: u64 = 255;
pub const SHORT_DESCRIPTION_MAX_LENGTH: u64 = 512;
pub const IMAGE_URL_MAX_LENGTH: usize = 2048;
pub const MIN_DESCRIPTIONS: u64 = 2;
pub const MAX_LISTING_LIMIT: i64 = 100;

/// Statut de publication d'une montre
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "watch_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WatchStatus {
    Active,
    #[default]
    Inactive,
}

/// Rôle d'une image dans les listings
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "watch_image_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WatchImageType {
    Placeholder,
    #[default]
    External,
    Featured,
}

/// Une montre du catalogue
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Watch {
    pub id: i64,
    pub name: String,
    pub short_description: String,
    pub price: f64,
    pub discount_percent: f64,
    pub status: WatchStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_featured_limit() -> i64 {
    4
}

fn default_top_weekly_limit() -> i64 {
    1
}

fn default_new_arrivals_limit() -> i64 {
    4
}

/// Montres mises en avant
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct WaFeParamSchema {
    #[serde(default = "default_featured_limit")]
    #[validate(range(min = 1, max = "MAX_LISTING_LIMIT", message = "limit must be greater than 0"))]
    pub limit: i64,
}

/// Carte de montre dans les listings featured et new arrivals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct WaFeRespSchema {
    pub id: i64,
    pub name: String,
    pub short_description: String,
    pub price: f64,
    pub discount_percent: f64,
    pub watch_image_url: String,
    pub special_event: Option<String>,
}

/// Meilleures montres de la semaine
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct WaTwParamSchema {
    #[serde(default = "default_top_weekly_limit")]
    #[validate(range(min = 1, max = "MAX_LISTING_LIMIT", message = "limit must be greater than 0"))]
    pub limit: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct WaTwRespSchema {
    pub watch_id: i64,
    pub name: String,
    pub watch_image_url: String,
    pub likes: i64,
}

/// Nouveautés
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct WaNaParamSchema {
    #[serde(default = "default_new_arrivals_limit")]
    #[validate(range(min = 1, max = "MAX_LISTING_LIMIT", message = "limit must be greater than 0"))]
    pub limit: i64,
}

/// Même forme que les cartes featured, image PLACEHOLDER
pub type WaNaRespSchema = WaFeRespSchema;

/// Paragraphe de description à la création
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaDsContentSchema {
    pub content: String,
}

/// Image attachée à la création
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaImContentSchema {
    pub image_url: String,
    #[serde(default)]
    pub watch_image_type: WatchImageType,
}

/// Création d'une montre (admin)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct WaCrParamSchema {
    #[validate(
        length(min = 1, max = "WATCH_NAME_MAX_LENGTH"),
        custom = "validate_not_blank"
    )]
    pub name: String,

    #[validate(
        length(min = 1, max = "SHORT_DESCRIPTION_MAX_LENGTH"),
        custom = "validate_not_blank"
    )]
    pub short_description: String,

    #[validate(
        length(min = "MIN_DESCRIPTIONS", message = "At least two descriptions are required"),
        custom = "validate_descriptions"
    )]
    pub descriptions: Vec<WaDsContentSchema>,

    #[validate(range(min = 0.01, max = 9999999999999.99, message = "price must be greater than 0"))]
    pub price: f64,

    #[serde(default)]
    #[validate(range(min = 0.0, max = 100.0, message = "discount_percent must be between 0 and 100"))]
    pub discount_percent: f64,

    #[serde(default)]
    pub status: WatchStatus,

    #[serde(default)]
    #[validate(custom = "validate_images")]
    pub images: Vec<WaImContentSchema>,
}

/// Montre créée
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct WaCrRespSchema {
    pub id: i64,
    pub name: String,
    pub short_description: String,
    pub price: f64,
    pub discount_percent: f64,
    pub status: WatchStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Like d'une montre par l'utilisateur courant
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct WaLiParamSchema {
    #[validate(range(min = 1, message = "watch_id must be greater than 0"))]
    pub watch_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaLiRespSchema {
    pub watch_id: i64,
    pub liked: bool,
    pub created: bool,
}

impl From<Watch> for WaCrRespSchema {
    fn from(watch: Watch) -> Self {
        Self {
            id: watch.id,
            name: watch.name,
            short_description: watch.short_description,
            price: watch.price,
            discount_percent: watch.discount_percent,
            status: watch.status,
            created_at: watch.created_at,
            updated_at: watch.updated_at,
        }
    }
}

fn validate_descriptions(descriptions: &[WaDsContentSchema]) -> Result<(), ValidationError> {
    if descriptions.iter().any(|d| d.content.trim().is_empty()) {
        let mut error = ValidationError::new("descriptions");
        error.message = Some("Descriptions cannot be empty".into());
        return Err(error);
    }
    Ok(())
}

fn validate_images(images: &[WaImContentSchema]) -> Result<(), ValidationError> {
    for image in images {
        if image.image_url.len() > IMAGE_URL_MAX_LENGTH {
            let mut error = ValidationError::new("length");
            error.message = Some("image_url is too long".into());
            return Err(error);
        }
        validate_image_url(&image.image_url)?;
    }
    Ok(())
}
