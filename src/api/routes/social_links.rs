use actix_web::{get, web, HttpResponse};

use crate::api::AppState;
use crate::models::SlReParamSchema;
use crate::utils::error::Result;

#[get("/links/")]
pub async fn links(
    state: web::Data<AppState>,
    params: web::Query<SlReParamSchema>,
) -> Result<HttpResponse> {
    let links = state.social_links.links(params.into_inner()).await?;
    Ok(HttpResponse::Ok().json(links))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api/social-links/v1").service(links));
}
