use std::sync::Arc;
use wayfare_booking::LifecycleEngine;
use wayfare_catalog::PackageRepository;
use wayfare_store::app_config::RateLimitConfig;
use wayfare_store::RedisClient;

#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
}

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<LifecycleEngine>,
    pub packages: Arc<dyn PackageRepository>,
    /// Rate limiting is skipped when unset.
    pub redis: Option<Arc<RedisClient>>,
    pub auth: AuthConfig,
    pub rate_limit: RateLimitConfig,
}
