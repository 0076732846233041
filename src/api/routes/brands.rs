use actix_web::{get, post, web, HttpResponse};

use crate::api::routes::middleware::AdminUser;
use crate::api::AppState;
use crate::models::{BrCrParamSchema, BrPhParamSchema, BrTpParamSchema};
use crate::utils::error::Result;

/// Création d'une marque (admin)
#[post("/create/")]
pub async fn create(
    state: web::Data<AppState>,
    _admin: AdminUser,
    params: web::Json<BrCrParamSchema>,
) -> Result<HttpResponse> {
    let brand = state.brands.create(params.into_inner()).await?;
    Ok(HttpResponse::Created().json(brand))
}

#[get("/top/")]
pub async fn top(
    state: web::Data<AppState>,
    params: web::Query<BrTpParamSchema>,
) -> Result<HttpResponse> {
    let brands = state.brands.top(params.into_inner()).await?;
    Ok(HttpResponse::Ok().json(brands))
}

#[get("/placeholders/")]
pub async fn placeholders(
    state: web::Data<AppState>,
    params: web::Query<BrPhParamSchema>,
) -> Result<HttpResponse> {
    let brands = state.brands.placeholders(params.into_inner()).await?;
    Ok(HttpResponse::Ok().json(brands))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/brands/v1")
            .service(create)
            .service(top)
            .service(placeholders),
    );
}
