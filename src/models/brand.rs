use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::watch::MAX_LISTING_LIMIT;
use crate::utils::validation::validate_not_blank;

pub const BRAND_NAME_MAX_LENGTH: u64 = 255;

/// Variante d'image d'une marque
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "brand_image_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BrandImageType {
    LightImage,
    DarkImage,
    Placeholder,
}

fn default_top_limit() -> i64 {
    10
}

fn default_placeholder_limit() -> i64 {
    10
}

/// Création d'une marque (admin)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BrCrParamSchema {
    #[validate(
        length(min = 1, max = "BRAND_NAME_MAX_LENGTH"),
        custom = "validate_not_blank"
    )]
    pub name: String,

    #[serde(default)]
    pub is_active: bool,

    #[validate(range(min = 1, message = "country_id must be greater than 0"))]
    pub country_id: Option<i64>,
}

/// Marque créée
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct BrCrRespSchema {
    pub id: i64,
    pub name: String,
    pub is_active: bool,
    pub country_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Marques les plus représentées
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BrTpParamSchema {
    #[serde(default = "default_top_limit")]
    #[validate(range(min = 1, max = "MAX_LISTING_LIMIT", message = "limit must be greater than 0"))]
    pub limit: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct BrTpRespSchema {
    pub name: String,
    pub country_image_url: Option<String>,
}

/// Images placeholder des marques
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BrPhParamSchema {
    #[serde(default = "default_placeholder_limit")]
    #[validate(range(min = 1, max = "MAX_LISTING_LIMIT", message = "limit must be greater than 0"))]
    pub limit: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct BrPhRespSchema {
    pub name: String,
    pub image_url: String,
}
