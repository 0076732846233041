use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// -1 signifie « tous les liens »
pub const NO_LIMIT: i64 = -1;

fn default_links_limit() -> i64 {
    NO_LIMIT
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SlReParamSchema {
    #[serde(default = "default_links_limit")]
    #[validate(range(min = -1, message = "limit must be -1 or a positive number"))]
    pub limit: i64,
}

impl SlReParamSchema {
    /// Limite effective ; `None` quand aucun plafond n'est demandé
    pub fn effective_limit(&self) -> Option<i64> {
        (self.limit != NO_LIMIT).then_some(self.limit)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct SlReRespSchema {
    pub platform_name: String,
    pub social_link: String,
    pub social_username: String,
}
