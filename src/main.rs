#![deny(nonstandard_style)]

use actix_web::{middleware, web, App, HttpServer};
use std::io::{Error, ErrorKind};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use montana_api::api::{self, routes::middleware::cors, AppState};
use montana_api::services::{Cache, CacheBackend, Database, MemoryCache, RedisCache};
use montana_api::utils::{CacheBackendKind, Config, JwtSettings};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Chargement de la configuration
    let config = Config::from_env().map_err(|e| Error::new(ErrorKind::Other, e.to_string()))?;

    // Initialisation du logging
    setup_tracing(&config);
    info!(mode = %config.run_mode, "Démarrage de {}", montana_api::NAME);

    // Base de données
    let db = Database::new(&config.database_url(), config.database_max_connections)
        .await
        .map_err(startup_error("connexion à la base de données"))?;
    db.run_migrations()
        .await
        .map_err(startup_error("migrations"))?;
    info!("✅ Base de données prête");

    // Cache
    let backend: Arc<dyn CacheBackend> = match config.cache_backend {
        CacheBackendKind::Redis => Arc::new(
            RedisCache::new(&config.redis_url())
                .await
                .map_err(startup_error("connexion à Redis"))?,
        ),
        CacheBackendKind::Memory => {
            if config.is_production() {
                warn!("Cache en mémoire en production : non partagé entre instances");
            }
            Arc::new(MemoryCache::new())
        }
    };
    let cache = Cache::new(backend, &config.cache_prefix, config.cache_ttl_seconds);

    // Création de l'état de l'application
    let app_state = web::Data::new(AppState::new(
        Arc::new(db),
        cache,
        JwtSettings::from_config(&config),
    ));

    // Superutilisateur initial
    if let (Some(email), Some(password)) = (&config.admin_email, &config.admin_password) {
        app_state
            .users
            .ensure_admin(email, password, &config.admin_phone_number)
            .await
            .map_err(startup_error("création de l'administrateur"))?;
    }

    let allowed_hosts = config.allowed_hosts.clone();

    // Configuration du serveur Actix-Web
    let server = HttpServer::new(move || {
        App::new()
            .wrap(cors(&allowed_hosts))
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .app_data(app_state.clone())
            .configure(api::config)
    })
    .bind(config.bind_address())?
    .workers(config.workers)
    .shutdown_timeout(10);

    info!("Application run");
    info!("🔗 API disponible sur http://{}", config.bind_address());

    let result = server.run().await;
    info!("Application shut down");

    result
}

/// Journalise une erreur de démarrage et la convertit en erreur d'E/S
fn startup_error<E: std::fmt::Display>(step: &'static str) -> impl Fn(E) -> Error {
    move |e| {
        error!(error = %e, "❌ Échec au démarrage : {}", step);
        Error::new(ErrorKind::Other, format!("{}: {}", step, e))
    }
}

/// Configure le tracing pour le logging structuré
fn setup_tracing(config: &Config) {
    let log_level = config.log_level.parse().unwrap_or(tracing::Level::INFO);

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(if config.logging_format == "json" {
            Box::new(
                tracing_subscriber::fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_current_span(true),
            ) as Box<dyn tracing_subscriber::Layer<_> + Send + Sync>
        } else {
            Box::new(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_line_number(true)
                    .with_file(true),
            ) as Box<dyn tracing_subscriber::Layer<_> + Send + Sync>
        });

    subscriber.init();
}
