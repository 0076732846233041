// services/cache.rs
use async_trait::async_trait;
use redis::{AsyncCommands, Client};
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::utils::error::Result;
use crate::utils::security::sha256_hash;

/// Stockage clé/valeur sous-jacent du cache
#[async_trait]
pub trait CacheBackend: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn set_ex(&self, key: &str, value: String, ttl_seconds: u64) -> Result<()>;

    /// Supprime les clés correspondant à un motif glob (`*` en fin de motif)
    async fn clear_pattern(&self, pattern: &str) -> Result<u64>;

    async fn ping(&self) -> Result<()>;
}

/// Backend Redis
pub struct RedisCache {
    client: Arc<Client>,
}

impl RedisCache {
    /// Créer un nouveau cache Redis
    pub async fn new(redis_url: &str) -> Result<Self> {
        let client = Client::open(redis_url)?;
        let cache = Self {
            client: Arc::new(client),
        };

        // Tester la connexion
        cache.ping().await?;

        Ok(cache)
    }
}

#[async_trait]
impl CacheBackend for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.client.get_async_connection().await?;
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn set_ex(&self, key: &str, value: String, ttl_seconds: u64) -> Result<()> {
        let mut conn = self.client.get_async_connection().await?;
        conn.set_ex::<_, _, ()>(key, value, ttl_seconds as usize).await?;
        Ok(())
    }

    async fn clear_pattern(&self, pattern: &str) -> Result<u64> {
        let mut conn = self.client.get_async_connection().await?;
        let keys: Vec<String> = conn.keys(pattern).await?;

        if keys.is_empty() {
            return Ok(0);
        }

        let deleted: i64 = conn.del(keys).await?;
        Ok(deleted as u64)
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.client.get_async_connection().await?;
        redis::cmd("PING").query_async::<_, String>(&mut conn).await?;
        Ok(())
    }
}

/// Backend en mémoire (un seul processus)
#[derive(Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, (String, Instant)>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches_pattern(pattern: &str, key: &str) -> bool {
    match pattern.strip_suffix('*') {
        Some(prefix) => key.starts_with(prefix),
        None => key == pattern,
    }
}

#[async_trait]
impl CacheBackend for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read().await;
        Ok(entries
            .get(key)
            .filter(|(_, expires_at)| *expires_at > Instant::now())
            .map(|(value, _)| value.clone()))
    }

    async fn set_ex(&self, key: &str, value: String, ttl_seconds: u64) -> Result<()> {
        let mut entries = self.entries.write().await;
        let now = Instant::now();
        entries.retain(|_, (_, expires_at)| *expires_at > now);
        entries.insert(
            key.to_string(),
            (value, now + Duration::from_secs(ttl_seconds)),
        );
        Ok(())
    }

    async fn clear_pattern(&self, pattern: &str) -> Result<u64> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|key, _| !matches_pattern(pattern, key));
        Ok((before - entries.len()) as u64)
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

/// Cache applicatif : préfixe des clés, sérialisation JSON et cache-aside
#[derive(Clone)]
pub struct Cache {
    backend: Arc<dyn CacheBackend>,
    prefix: String,
    default_ttl: Duration,
}

impl Cache {
    pub fn new(backend: Arc<dyn CacheBackend>, prefix: &str, default_ttl_seconds: u64) -> Self {
        Self {
            backend,
            prefix: prefix.to_string(),
            default_ttl: Duration::from_secs(default_ttl_seconds),
        }
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Clé d'une entrée : `<name>:<sha256 des paramètres>`
    pub fn cache_key<P: Serialize>(name: &str, params: &P) -> Result<String> {
        let payload = serde_json::to_vec(params)?;
        Ok(format!("{}:{}", name, sha256_hash(&payload)))
    }

    /// Récupérer une valeur ; un contenu illisible compte comme absent
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let full_key = self.key(key);

        match self.backend.get(&full_key).await? {
            Some(json) => match serde_json::from_str(&json) {
                Ok(value) => Ok(Some(value)),
                Err(e) => {
                    tracing::warn!(key = %full_key, error = %e, "Entrée de cache illisible ignorée");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    /// Stocker une valeur avec le TTL par défaut
    pub async fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        self.set_ex(key, value, self.default_ttl).await
    }

    /// Stocker une valeur avec TTL spécifique
    pub async fn set_ex<T: Serialize>(&self, key: &str, value: &T, ttl: Duration) -> Result<()> {
        let serialized = serde_json::to_string(value)?;
        self.backend
            .set_ex(&self.key(key), serialized, ttl.as_secs().max(1))
            .await
    }

    /// Nettoyer le cache par pattern
    pub async fn clear_pattern(&self, pattern: &str) -> Result<u64> {
        self.backend.clear_pattern(&self.key(pattern)).await
    }

    /// Supprimer toutes les entrées mises en cache sous un nom
    pub async fn invalidate(&self, name: &str) -> Result<u64> {
        let deleted = self.clear_pattern(&format!("{}:*", name)).await?;
        tracing::debug!(name, deleted, "Cache invalidé");
        Ok(deleted)
    }

    /// Cache-aside : lit l'entrée ou exécute `loader` puis stocke son résultat
    pub async fn cached<P, T, F, Fut>(
        &self,
        name: &str,
        params: &P,
        ttl: Duration,
        loader: F,
    ) -> Result<T>
    where
        P: Serialize,
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let key = Self::cache_key(name, params)?;

        if let Some(hit) = self.get::<T>(&key).await? {
            tracing::debug!(key = %key, "Cache hit");
            return Ok(hit);
        }

        let value = loader().await?;
        self.set_ex(&key, &value, ttl).await?;

        Ok(value)
    }

    /// Vérifier la santé du cache
    pub async fn ping(&self) -> Result<()> {
        self.backend.ping().await
    }

    /// Helper pour ajouter le préfixe aux clés
    fn key(&self, name: &str) -> String {
        format!("{}{}", self.prefix, name)
    }
}
