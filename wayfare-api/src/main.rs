use anyhow::Context;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wayfare_api::{
    app, demo,
    state::{AppState, AuthConfig},
};
use wayfare_booking::{GuestAccessPolicy, LifecycleEngine, Stores};
use wayfare_catalog::PackageRepository;
use wayfare_core::{LogNotifier, Notifier};
use wayfare_store::app_config::{Config, StorageBackend};
use wayfare_store::{
    DbClient, EventProducer, KafkaNotifier, PgBookingRepository, PgContactInquiryRepository, PgCustomTourRepository,
    PgPackageRepository, RedisClient,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wayfare_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting Wayfare API on port {}", config.server.port);

    let guest_access = match config.bookings.guest_visibility().context("Invalid [bookings] config")? {
        Some(window) => GuestAccessPolicy::Window(window),
        None => GuestAccessPolicy::Unrestricted,
    };

    let stores = match config.storage.backend {
        StorageBackend::Postgres => {
            let db_config = config
                .database
                .as_ref()
                .context("storage.backend = \"postgres\" requires a [database] section")?;
            let db = DbClient::new(&db_config.url, db_config.max_connections)
                .await
                .context("Failed to connect to Postgres")?;
            db.migrate().await.context("Failed to run migrations")?;

            Stores {
                packages: Arc::new(PgPackageRepository::new(db.pool.clone())),
                bookings: Arc::new(PgBookingRepository::new(db.pool.clone())),
                custom_tours: Arc::new(PgCustomTourRepository::new(db.pool.clone())),
                inquiries: Arc::new(PgContactInquiryRepository::new(db.pool.clone())),
            }
        }
        StorageBackend::Memory => {
            let packages = demo::demo_packages()?;
            for package in &packages {
                tracing::info!("Demo package {} ({}): {}", package.id, package.package_type, package.title);
            }
            demo::in_memory_stores(packages).0
        }
    };

    let notifier: Arc<dyn Notifier> = match &config.kafka {
        Some(kafka) => {
            let producer = EventProducer::new(&kafka.brokers).context("Failed to create Kafka producer")?;
            Arc::new(KafkaNotifier::new(producer))
        }
        None => {
            tracing::info!("No Kafka brokers configured, lifecycle events will only be logged");
            Arc::new(LogNotifier)
        }
    };

    let redis = match &config.redis {
        Some(redis) => Some(Arc::new(
            RedisClient::new(&redis.url).await.context("Failed to connect to Redis")?,
        )),
        None => None,
    };

    let packages: Arc<dyn PackageRepository> = stores.packages.clone();
    let engine = LifecycleEngine::new(stores, notifier).with_guest_access(guest_access);

    let app_state = AppState {
        engine: Arc::new(engine),
        packages,
        redis,
        auth: AuthConfig {
            secret: config.auth.jwt_secret.clone(),
        },
        rate_limit: config.rate_limit.clone(),
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await?;

    Ok(())
}
