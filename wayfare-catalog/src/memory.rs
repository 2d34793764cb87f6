use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;
use wayfare_core::RepositoryError;
use crate::package::Package;
use crate::repository::PackageRepository;

/// Catalog held in process memory, seeded by whoever constructs it.
#[derive(Default)]
pub struct InMemoryPackageRepository {
    packages: RwLock<HashMap<Uuid, Package>>,
}

impl InMemoryPackageRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_packages(packages: impl IntoIterator<Item = Package>) -> Self {
        Self {
            packages: RwLock::new(packages.into_iter().map(|p| (p.id, p)).collect()),
        }
    }

    pub async fn insert(&self, package: Package) {
        self.packages.write().await.insert(package.id, package);
    }
}

#[async_trait]
impl PackageRepository for InMemoryPackageRepository {
    async fn get_package(&self, id: Uuid) -> Result<Option<Package>, RepositoryError> {
        Ok(self.packages.read().await.get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package::PackageType;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_lookup_by_id() {
        let package = Package::new("Dubai Delights", dec!(45999), PackageType::International, "5 Days").unwrap();
        let id = package.id;
        let repo = InMemoryPackageRepository::with_packages([package]);

        let found = repo.get_package(id).await.unwrap().unwrap();
        assert_eq!(found.title, "Dubai Delights");
        assert!(repo.get_package(Uuid::new_v4()).await.unwrap().is_none());
    }
}
