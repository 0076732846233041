//! # Extracteurs et configuration HTTP
//!
//! - `CurrentUser` : utilisateur authentifié par un token Bearer
//! - `AdminUser` : idem, réservé aux superutilisateurs
//! - `json_config` / `query_config` : erreurs de désérialisation en 422
//! - `cors` : origines autorisées depuis `ALLOWED_HOSTS`

use actix_cors::Cors;
use actix_web::{
    dev::Payload, http::header::AUTHORIZATION, web, Error, FromRequest, HttpRequest,
};
use futures_util::future::LocalBoxFuture;

use crate::api::AppState;
use crate::models::UsPkRespSchema;
use crate::utils::error::AppError;

/// Token Bearer de l'en-tête Authorization, schéma insensible à la casse
pub fn bearer_token(req: &HttpRequest) -> Option<String> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();

    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token.to_string())
    } else {
        None
    }
}

/// Utilisateur courant
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UsPkRespSchema);

impl FromRequest for CurrentUser {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let token = bearer_token(req);

        Box::pin(async move {
            let state = state.ok_or_else(|| {
                tracing::error!("AppState absent de l'application");
                AppError::Internal
            })?;
            let token = token.ok_or(AppError::NotAuthenticated)?;

            let user = state.users.authenticate(&token).await?;
            Ok(CurrentUser(user))
        })
    }
}

/// Utilisateur courant avec droits administrateur
#[derive(Debug, Clone)]
pub struct AdminUser(pub UsPkRespSchema);

impl FromRequest for AdminUser {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let current = CurrentUser::from_request(req, payload);

        Box::pin(async move {
            let CurrentUser(user) = current.await?;

            if !user.is_superuser {
                tracing::warn!(user_id = user.id, "Accès admin refusé");
                return Err(AppError::Forbidden.into());
            }

            Ok(AdminUser(user))
        })
    }
}

/// Corps JSON invalide : 422 avec le format d'erreur de l'API
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(64 * 1024)
        .error_handler(|err, _req| AppError::Validation(err.to_string()).into())
}

/// Paramètres de requête invalides : 422
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| AppError::Validation(err.to_string()).into())
}

/// Origine joker acceptée dans `ALLOWED_HOSTS`
pub const ANY_ORIGIN: &str = "*";

/// CORS : origines listées avec credentials, ou toute origine sans credentials
pub fn cors(allowed_hosts: &[String]) -> Cors {
    let cors = if allowed_hosts.iter().any(|host| host == ANY_ORIGIN) {
        Cors::default().allow_any_origin()
    } else {
        allowed_hosts
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .supports_credentials()
    };

    cors.allow_any_method().allow_any_header().max_age(3600)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{
        get,
        http::header::{ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_ORIGIN, ORIGIN},
        http::StatusCode,
        test, App, HttpResponse,
    };

    use crate::test_utils::{auth_header, memory_state, register_user};

    #[get("/whoami")]
    async fn whoami(user: CurrentUser) -> HttpResponse {
        HttpResponse::Ok().body(user.0.email)
    }

    #[get("/admin-only")]
    async fn admin_only(admin: AdminUser) -> HttpResponse {
        HttpResponse::Ok().body(admin.0.email)
    }

    #[get("/ping")]
    async fn ping() -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    #[actix_web::test]
    async fn test_bearer_token_parsing() {
        let req = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "bearer abc.def"))
            .to_http_request();
        assert_eq!(bearer_token(&req).as_deref(), Some("abc.def"));

        let req = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Basic dXNlcjpwYXNz"))
            .to_http_request();
        assert_eq!(bearer_token(&req), None);

        let req = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer "))
            .to_http_request();
        assert_eq!(bearer_token(&req), None);
    }

    #[actix_web::test]
    async fn test_current_user_errors() {
        let (store, state) = memory_state();
        let app = test::init_service(App::new().app_data(state.clone()).service(whoami)).await;

        // Pas d'en-tête
        let req = test::TestRequest::get().uri("/whoami").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        // Token illisible
        let req = test::TestRequest::get()
            .uri("/whoami")
            .insert_header((AUTHORIZATION, "Bearer garbage"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        // Compte désactivé
        let (user_id, token) = register_user(&state, "inactive@example.ch", false).await;
        store.set_user_active(user_id, false).await;
        let req = test::TestRequest::get()
            .uri("/whoami")
            .insert_header(auth_header(&token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["detail"], "User's account is not active");
    }

    #[actix_web::test]
    async fn test_current_user_success() {
        let (_, state) = memory_state();
        let app = test::init_service(App::new().app_data(state.clone()).service(whoami)).await;
        let (_, token) = register_user(&state, "watchfan@example.ch", false).await;

        let req = test::TestRequest::get()
            .uri("/whoami")
            .insert_header(auth_header(&token))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, "watchfan@example.ch");
    }

    #[actix_web::test]
    async fn test_admin_user() {
        let (_, state) = memory_state();
        let app = test::init_service(App::new().app_data(state.clone()).service(admin_only)).await;
        let (_, user_token) = register_user(&state, "user@example.ch", false).await;
        let (_, admin_token) = register_user(&state, "admin@example.ch", true).await;

        let req = test::TestRequest::get()
            .uri("/admin-only")
            .insert_header(auth_header(&user_token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["detail"], "You do not have permission to access this resource");

        let req = test::TestRequest::get()
            .uri("/admin-only")
            .insert_header(auth_header(&admin_token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_cors_wildcard_origin() {
        let hosts = vec!["*".to_string()];
        let app = test::init_service(App::new().wrap(cors(&hosts)).service(ping)).await;

        let req = test::TestRequest::get()
            .uri("/ping")
            .insert_header((ORIGIN, "https://shop.example.com"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers().contains_key(ACCESS_CONTROL_ALLOW_ORIGIN));
        assert!(!resp.headers().contains_key(ACCESS_CONTROL_ALLOW_CREDENTIALS));
    }

    #[actix_web::test]
    async fn test_cors_listed_origins() {
        let hosts = vec!["https://montana.ch".to_string(), "https://www.montana.ch".to_string()];
        let app = test::init_service(App::new().wrap(cors(&hosts)).service(ping)).await;

        let req = test::TestRequest::get()
            .uri("/ping")
            .insert_header((ORIGIN, "https://www.montana.ch"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "https://www.montana.ch"
        );
        assert_eq!(resp.headers().get(ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(), "true");
    }
}
