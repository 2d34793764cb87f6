use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;
use wayfare_catalog::{Package, PackageRepository, PackageType};
use wayfare_core::RepositoryError;

use crate::db_error;

pub struct PgPackageRepository {
    pool: PgPool,
}

impl PgPackageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal struct for type-safe querying
#[derive(sqlx::FromRow)]
struct PackageRow {
    id: Uuid,
    title: String,
    slug: String,
    description: String,
    price: Decimal,
    duration: String,
    package_type: String,
    featured: bool,
    best_seller: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<PackageRow> for Package {
    type Error = RepositoryError;

    fn try_from(row: PackageRow) -> Result<Self, Self::Error> {
        let package_type: PackageType = row
            .package_type
            .parse()
            .map_err(|e: wayfare_catalog::CatalogError| RepositoryError::Corrupt(e.to_string()))?;

        Ok(Package {
            id: row.id,
            title: row.title,
            slug: row.slug,
            description: row.description,
            price: row.price,
            duration: row.duration,
            package_type,
            featured: row.featured,
            best_seller: row.best_seller,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl PackageRepository for PgPackageRepository {
    async fn get_package(&self, id: Uuid) -> Result<Option<Package>, RepositoryError> {
        let row = sqlx::query_as::<_, PackageRow>(
            r#"
            SELECT id, title, slug, description, price, duration, type AS package_type,
                   featured, best_seller, created_at
            FROM packages
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.map(Package::try_from).transpose()
    }
}
