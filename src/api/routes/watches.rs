use actix_web::{get, post, web, HttpResponse};

use crate::api::routes::middleware::{AdminUser, CurrentUser};
use crate::api::AppState;
use crate::models::{
    WaCrParamSchema, WaFeParamSchema, WaLiParamSchema, WaNaParamSchema, WaTwParamSchema,
};
use crate::utils::error::Result;

#[get("/featured/")]
pub async fn featured(
    state: web::Data<AppState>,
    params: web::Query<WaFeParamSchema>,
) -> Result<HttpResponse> {
    let watches = state.watches.featured(params.into_inner()).await?;
    Ok(HttpResponse::Ok().json(watches))
}

#[get("/top-weekly/")]
pub async fn top_weekly(
    state: web::Data<AppState>,
    params: web::Query<WaTwParamSchema>,
) -> Result<HttpResponse> {
    let watches = state.watches.top_weekly(params.into_inner()).await?;
    Ok(HttpResponse::Ok().json(watches))
}

#[get("/new-arrivals/")]
pub async fn new_arrivals(
    state: web::Data<AppState>,
    params: web::Query<WaNaParamSchema>,
) -> Result<HttpResponse> {
    let watches = state.watches.new_arrivals(params.into_inner()).await?;
    Ok(HttpResponse::Ok().json(watches))
}

/// Création d'une montre (admin)
#[post("/create/")]
pub async fn create(
    state: web::Data<AppState>,
    _admin: AdminUser,
    params: web::Json<WaCrParamSchema>,
) -> Result<HttpResponse> {
    let watch = state.watches.create(params.into_inner()).await?;
    Ok(HttpResponse::Created().json(watch))
}

#[post("/like/")]
pub async fn like(
    state: web::Data<AppState>,
    user: CurrentUser,
    params: web::Json<WaLiParamSchema>,
) -> Result<HttpResponse> {
    let like = state.watches.like(user.0.id, params.into_inner()).await?;
    Ok(HttpResponse::Ok().json(like))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/watches/v1")
            .service(featured)
            .service(top_weekly)
            .service(new_arrivals)
            .service(create)
            .service(like),
    );
}
