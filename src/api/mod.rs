pub mod routes;

use actix_web::{web, HttpResponse};
use serde::Serialize;
use std::sync::Arc;

use crate::core::{BrandService, SocialLinkService, UserService, WatchService};
use crate::services::cache::Cache;
use crate::services::repository::{
    BrandRepository, HealthCheck, SocialLinkRepository, UserRepository, WatchRepository,
};
use crate::utils::security::JwtSettings;

/// Routes exposées : (méthode, chemin)
pub const ENDPOINTS: &[(&str, &str)] = &[
    ("POST", "/api/users/v1/signup/"),
    ("POST", "/api/users/v1/access-token/"),
    ("POST", "/api/users/v1/refresh-token/"),
    ("GET", "/api/users/v1/me/"),
    ("GET", "/api/users/v1/get/"),
    ("GET", "/api/watches/v1/featured/"),
    ("GET", "/api/watches/v1/top-weekly/"),
    ("GET", "/api/watches/v1/new-arrivals/"),
    ("POST", "/api/watches/v1/create/"),
    ("POST", "/api/watches/v1/like/"),
    ("POST", "/api/brands/v1/create/"),
    ("GET", "/api/brands/v1/top/"),
    ("GET", "/api/brands/v1/placeholders/"),
    ("GET", "/api/social-links/v1/links/"),
];

/// État partagé par tous les workers
pub struct AppState {
    pub users: UserService,
    pub watches: WatchService,
    pub brands: BrandService,
    pub social_links: SocialLinkService,
    pub database: Arc<dyn HealthCheck>,
    pub cache: Cache,
}

impl AppState {
    pub fn new<R>(repository: Arc<R>, cache: Cache, jwt: JwtSettings) -> Self
    where
        R: UserRepository
            + WatchRepository
            + BrandRepository
            + SocialLinkRepository
            + HealthCheck
            + 'static,
    {
        Self {
            users: UserService::new(repository.clone(), cache.clone(), jwt),
            watches: WatchService::new(repository.clone(), cache.clone()),
            brands: BrandService::new(repository.clone(), cache.clone()),
            social_links: SocialLinkService::new(repository.clone(), cache.clone()),
            database: repository,
            cache,
        }
    }
}

/// Configure toutes les routes de l'API
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(routes::middleware::json_config())
        .app_data(routes::middleware::query_config())
        .configure(routes::users::config)
        .configure(routes::watches::config)
        .configure(routes::brands::config)
        .configure(routes::social_links::config)
        .service(web::resource("/health").route(web::get().to(health_check)));
}

#[derive(Debug, Serialize)]
struct HealthReport {
    status: &'static str,
    version: &'static str,
    timestamp: String,
    database: &'static str,
    cache: &'static str,
}

fn dependency_status(result: &crate::utils::error::Result<()>, name: &str) -> &'static str {
    match result {
        Ok(()) => "ok",
        Err(e) => {
            tracing::warn!(dependency = name, error = %e, "Dépendance indisponible");
            "unavailable"
        }
    }
}

/// Endpoint de santé pour monitoring
async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let database = dependency_status(&state.database.ping().await, "database");
    let cache = dependency_status(&state.cache.ping().await, "cache");

    let healthy = database == "ok" && cache == "ok";
    let report = HealthReport {
        status: if healthy { "healthy" } else { "degraded" },
        version: crate::VERSION,
        timestamp: chrono::Utc::now().to_rfc3339(),
        database,
        cache,
    };

    if healthy {
        HttpResponse::Ok().json(report)
    } else {
        HttpResponse::ServiceUnavailable().json(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::Method, http::StatusCode, test, App};

    use crate::test_utils::memory_state;

    #[actix_web::test]
    async fn test_health() {
        let (_, state) = memory_state();
        let app = test::init_service(App::new().app_data(state).configure(config)).await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "healthy");
        assert_eq!(body["database"], "ok");
        assert_eq!(body["cache"], "ok");
        assert_eq!(body["version"], crate::VERSION);
    }

    #[actix_web::test]
    async fn test_every_endpoint_is_routed() {
        let (_, state) = memory_state();
        let app = test::init_service(App::new().app_data(state).configure(config)).await;

        for (method, path) in ENDPOINTS {
            let method = Method::from_bytes(method.as_bytes()).unwrap();
            let req = test::TestRequest::default()
                .method(method.clone())
                .uri(path)
                .to_request();
            let resp = test::call_service(&app, req).await;

            assert_ne!(resp.status(), StatusCode::NOT_FOUND, "{} {}", method, path);
            assert_ne!(resp.status(), StatusCode::METHOD_NOT_ALLOWED, "{} {}", method, path);
        }
    }
}
