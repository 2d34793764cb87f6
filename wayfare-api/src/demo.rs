//! In-memory wiring for local runs without Postgres.

use rust_decimal::Decimal;
use std::sync::Arc;
use wayfare_booking::{
    InMemoryBookingRepository, InMemoryContactInquiryRepository, InMemoryCustomTourRepository, Stores,
};
use wayfare_catalog::{CatalogError, InMemoryPackageRepository, Package, PackageType};

/// A small catalog so the booking routes have something to book against.
pub fn demo_packages() -> Result<Vec<Package>, CatalogError> {
    let mut rajasthan = Package::new(
        "Royal Rajasthan Circuit",
        Decimal::new(45_000, 0),
        PackageType::National,
        "8 Days / 7 Nights",
    )?;
    rajasthan.description = "Jaipur, Jodhpur and Udaipur with heritage hotel stays.".to_string();
    rajasthan.featured = true;

    let mut kerala = Package::new(
        "Kerala Backwaters Retreat",
        Decimal::new(32_500, 0),
        PackageType::National,
        "5 Days / 4 Nights",
    )?;
    kerala.description = "Houseboat night on Vembanad lake and Munnar tea estates.".to_string();
    kerala.best_seller = true;

    let mut bali = Package::new(
        "Bali Island Escape",
        Decimal::new(68_999, 0),
        PackageType::International,
        "6 Days / 5 Nights",
    )?;
    bali.description = "Ubud rice terraces, Nusa Penida day trip and beach villa.".to_string();

    Ok(vec![rajasthan, kerala, bali])
}

/// Fresh in-memory stores seeded with `packages`.
pub fn in_memory_stores(packages: Vec<Package>) -> (Stores, Arc<InMemoryPackageRepository>) {
    let catalog = Arc::new(InMemoryPackageRepository::with_packages(packages));
    let stores = Stores {
        packages: catalog.clone(),
        bookings: Arc::new(InMemoryBookingRepository::new()),
        custom_tours: Arc::new(InMemoryCustomTourRepository::new()),
        inquiries: Arc::new(InMemoryContactInquiryRepository::new()),
    };
    (stores, catalog)
}
