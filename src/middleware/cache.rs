use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::{Body, Bytes, to_bytes},
    extract::{Request, State},
    http::{HeaderMap, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tokio::sync::RwLock;
use tracing::{error, trace, warn};

use crate::config::Config;
use crate::router::UpdaterState;

/// In-process response cache for the page routes, keyed by
/// `method + path + query`. Expiry is time-based only and evaluated lazily
/// on lookup.
#[derive(Clone)]
pub struct ResponseCache {
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
    ttl: Option<Duration>,
}

#[derive(Clone)]
struct CacheEntry {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }
}

impl ResponseCache {
    /// A zero timeout means entries never expire.
    pub fn new(timeout: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            ttl: (!timeout.is_zero()).then_some(timeout),
        }
    }

    /// `simple` keeps entries in-process, `null` disables caching; anything
    /// unknown falls back to `simple`.
    pub fn from_config(config: &Config) -> Option<Self> {
        let timeout = Duration::from_secs(config.cache_default_timeout);
        match config.cache_type.as_str() {
            "null" => None,
            "simple" => Some(Self::new(timeout)),
            other => {
                warn!(cache_type = other, "unknown cache backend, using \"simple\"");
                Some(Self::new(timeout))
            }
        }
    }

    async fn get(&self, key: &str) -> Option<CacheEntry> {
        {
            let entries = self.entries.read().await;
            let entry = entries.get(key)?;
            match entry.expires_at {
                Some(at) if Instant::now() >= at => {}
                _ => return Some(entry.clone()),
            }
        }
        self.entries.write().await.remove(key);
        None
    }

    async fn put(&self, key: String, entry: CacheEntry) {
        self.entries.write().await.insert(key, entry);
    }
}

/// Middleware wrapping the page handlers. Only successful GET responses are
/// stored; everything else passes through untouched.
pub async fn cached_page(State(state): State<UpdaterState>, req: Request, next: Next) -> Response {
    let Some(cache) = state.cache.clone() else {
        return next.run(req).await;
    };
    if req.method() != Method::GET {
        return next.run(req).await;
    }

    let key = format!(
        "{} {}",
        req.method(),
        req.uri()
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or_else(|| req.uri().path())
    );

    if let Some(entry) = cache.get(&key).await {
        trace!(key = %key, "serving cached page");
        return entry.into_response();
    }

    let response = next.run(req).await;
    if response.status() != StatusCode::OK {
        return response;
    }

    let (parts, body) = response.into_parts();
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            error!(key = %key, error = %e, "failed to buffer response for caching");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let entry = CacheEntry {
        status: parts.status,
        headers: parts.headers.clone(),
        body: bytes.clone(),
        expires_at: cache.ttl.map(|ttl| Instant::now() + ttl),
    };
    cache.put(key, entry).await;

    Response::from_parts(parts, Body::from(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(body: &str, expires_at: Option<Instant>) -> CacheEntry {
        CacheEntry {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: Bytes::copy_from_slice(body.as_bytes()),
            expires_at,
        }
    }

    #[tokio::test]
    async fn expired_entries_are_dropped_on_lookup() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        let expired = Instant::now() - Duration::from_secs(1);

        cache.put("GET /bacon".into(), entry("stale", Some(expired))).await;
        assert!(cache.get("GET /bacon").await.is_none());
        assert!(cache.entries.read().await.is_empty());
    }

    #[tokio::test]
    async fn zero_timeout_never_expires() {
        let cache = ResponseCache::new(Duration::ZERO);
        assert!(cache.ttl.is_none());

        cache.put("GET /".into(), entry("index", None)).await;
        assert!(cache.get("GET /").await.is_some());
    }

    #[test]
    fn null_backend_disables_the_cache() {
        let mut config = Config::default();
        config.cache_type = "null".into();
        assert!(ResponseCache::from_config(&config).is_none());

        config.cache_type = "simple".into();
        assert!(ResponseCache::from_config(&config).is_some());
    }
}
