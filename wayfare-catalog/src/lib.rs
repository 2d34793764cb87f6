pub mod package;
pub mod pricing;
pub mod repository;
pub mod memory;

pub use package::{CatalogError, Package, PackageType};
pub use pricing::{compute_total_price, CHILD_FARE_RATIO, MAX_TOTAL_PRICE};
pub use repository::PackageRepository;
pub use memory::InMemoryPackageRepository;
