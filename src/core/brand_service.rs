// core/brand_service.rs
use std::sync::Arc;
use validator::Validate;

use crate::models::{
    BrCrParamSchema, BrCrRespSchema, BrPhParamSchema, BrPhRespSchema, BrTpParamSchema,
    BrTpRespSchema,
};
use crate::services::cache::Cache;
use crate::services::repository::BrandRepository;
use crate::utils::error::Result;

pub const TOP_BRANDS_CACHE: &str = "brands:top";
pub const PLACEHOLDER_BRANDS_CACHE: &str = "brands:placeholders";

pub struct BrandService {
    brands: Arc<dyn BrandRepository>,
    cache: Cache,
}

impl BrandService {
    pub fn new(brands: Arc<dyn BrandRepository>, cache: Cache) -> Self {
        Self { brands, cache }
    }

    pub async fn create(&self, params: BrCrParamSchema) -> Result<BrCrRespSchema> {
        params.validate()?;

        let brand = self.brands.create_brand(&params).await?;
        tracing::info!(brand_id = brand.id, name = %brand.name, "Marque créée");

        self.cache.invalidate(TOP_BRANDS_CACHE).await?;
        self.cache.invalidate(PLACEHOLDER_BRANDS_CACHE).await?;

        Ok(brand)
    }

    pub async fn top(&self, params: BrTpParamSchema) -> Result<Vec<BrTpRespSchema>> {
        params.validate()?;

        self.cache
            .cached(TOP_BRANDS_CACHE, &params, self.cache.default_ttl(), || {
                self.brands.top_brands(params.limit)
            })
            .await
    }

    pub async fn placeholders(&self, params: BrPhParamSchema) -> Result<Vec<BrPhRespSchema>> {
        params.validate()?;

        self.cache
            .cached(PLACEHOLDER_BRANDS_CACHE, &params, self.cache.default_ttl(), || {
                self.brands.placeholder_brands(params.limit)
            })
            .await
    }
}
