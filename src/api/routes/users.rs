use actix_web::{get, post, web, HttpResponse};

use crate::api::routes::middleware::{AdminUser, CurrentUser};
use crate::api::AppState;
use crate::models::{UsLgParamSchema, UsPkParamSchema, UsReParamSchema, UsRfParamSchema};
use crate::utils::error::Result;

/// Inscription
#[post("/signup/")]
pub async fn signup(
    state: web::Data<AppState>,
    params: web::Json<UsReParamSchema>,
) -> Result<HttpResponse> {
    let user = state.users.register(params.into_inner()).await?;
    Ok(HttpResponse::Created().json(user))
}

/// Connexion : paire access/refresh token
#[post("/access-token/")]
pub async fn access_token(
    state: web::Data<AppState>,
    params: web::Json<UsLgParamSchema>,
) -> Result<HttpResponse> {
    let tokens = state.users.login(params.into_inner()).await?;
    Ok(HttpResponse::Ok().json(tokens))
}

#[post("/refresh-token/")]
pub async fn refresh_token(
    state: web::Data<AppState>,
    params: web::Json<UsRfParamSchema>,
) -> Result<HttpResponse> {
    let tokens = state.users.refresh(params.into_inner()).await?;
    Ok(HttpResponse::Ok().json(tokens))
}

#[get("/me/")]
pub async fn me(user: CurrentUser) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(user.0))
}

/// Profil d'un utilisateur quelconque (admin)
#[get("/get/")]
pub async fn get_user(
    state: web::Data<AppState>,
    _admin: AdminUser,
    params: web::Query<UsPkParamSchema>,
) -> Result<HttpResponse> {
    let user = state.users.get_user(params.into_inner()).await?;
    Ok(HttpResponse::Ok().json(user))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/users/v1")
            .service(signup)
            .service(access_token)
            .service(refresh_token)
            .service(me)
            .service(get_user),
    );
}
