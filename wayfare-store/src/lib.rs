pub mod app_config;
pub mod database;
pub mod package_repo;
pub mod booking_repo;
pub mod inquiry_repo;
pub mod redis_repo;
pub mod events;

pub use database::DbClient;
pub use package_repo::PgPackageRepository;
pub use booking_repo::PgBookingRepository;
pub use inquiry_repo::{PgContactInquiryRepository, PgCustomTourRepository};
pub use redis_repo::RedisClient;
pub use events::{EventProducer, KafkaNotifier};

use wayfare_core::RepositoryError;

pub(crate) fn db_error(err: sqlx::Error) -> RepositoryError {
    match err.as_database_error() {
        Some(db) if db.is_unique_violation() => RepositoryError::Conflict(db.message().to_string()),
        _ => RepositoryError::Unavailable(err.to_string()),
    }
}

pub(crate) fn count(value: i32, column: &str) -> Result<u32, RepositoryError> {
    u32::try_from(value).map_err(|_| RepositoryError::Corrupt(format!("negative {}: {}", column, value)))
}

pub(crate) fn as_i32(value: u32, field: &str) -> Result<i32, RepositoryError> {
    i32::try_from(value).map_err(|_| RepositoryError::Corrupt(format!("{} out of range: {}", field, value)))
}

/// Record the account a row will reference. Accounts originate outside this
/// service, so the anchor row is created on first use.
pub(crate) async fn ensure_user(
    conn: &mut sqlx::PgConnection,
    user_id: Option<uuid::Uuid>,
) -> Result<(), RepositoryError> {
    if let Some(id) = user_id {
        sqlx::query("INSERT INTO users (id) VALUES ($1) ON CONFLICT (id) DO NOTHING")
            .bind(id)
            .execute(conn)
            .await
            .map_err(db_error)?;
    }
    Ok(())
}
