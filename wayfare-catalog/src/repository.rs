use async_trait::async_trait;
use uuid::Uuid;
use wayfare_core::RepositoryError;
use crate::package::Package;

/// Read access to the package catalog. The lifecycle engine never writes through it.
#[async_trait]
pub trait PackageRepository: Send + Sync {
    async fn get_package(&self, id: Uuid) -> Result<Option<Package>, RepositoryError>;
}
