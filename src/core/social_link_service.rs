// core/social_link_service.rs
use std::sync::Arc;
use validator::Validate;

use crate::models::{SlReParamSchema, SlReRespSchema};
use crate::services::cache::Cache;
use crate::services::repository::SocialLinkRepository;
use crate::utils::error::Result;

pub const SOCIAL_LINKS_CACHE: &str = "social-links:links";

pub struct SocialLinkService {
    links: Arc<dyn SocialLinkRepository>,
    cache: Cache,
}

impl SocialLinkService {
    pub fn new(links: Arc<dyn SocialLinkRepository>, cache: Cache) -> Self {
        Self { links, cache }
    }

    /// Liens actifs, dans l'ordre de création
    pub async fn links(&self, params: SlReParamSchema) -> Result<Vec<SlReRespSchema>> {
        params.validate()?;

        self.cache
            .cached(SOCIAL_LINKS_CACHE, &params, self.cache.default_ttl(), || {
                self.links.active_links(params.effective_limit())
            })
            .await
    }
}
