use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Where a package travels: within the country or abroad.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PackageType {
    National,
    International,
}

impl PackageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageType::National => "national",
            PackageType::International => "international",
        }
    }
}

impl fmt::Display for PackageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageType {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "national" => Ok(PackageType::National),
            "international" => Ok(PackageType::International),
            other => Err(CatalogError::UnknownPackageType(other.to_string())),
        }
    }
}

/// A sellable itinerary with a fixed per-adult price.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Package {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub price: Decimal,
    pub duration: String, // e.g. "7 Days / 6 Nights"
    #[serde(rename = "type")]
    pub package_type: PackageType,
    pub featured: bool,
    pub best_seller: bool,
    pub created_at: DateTime<Utc>,
}

impl Package {
    pub fn new(
        title: impl Into<String>,
        price: Decimal,
        package_type: PackageType,
        duration: impl Into<String>,
    ) -> Result<Self, CatalogError> {
        if price.is_sign_negative() && !price.is_zero() {
            return Err(CatalogError::NegativePrice(price));
        }
        let title = title.into();
        Ok(Self {
            id: Uuid::new_v4(),
            slug: slugify(&title),
            title,
            description: String::new(),
            price,
            duration: duration.into(),
            package_type,
            featured: false,
            best_seller: false,
            created_at: Utc::now(),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Package price cannot be negative: {0}")]
    NegativePrice(Decimal),

    #[error("Unknown package type: {0}")]
    UnknownPackageType(String),
}

/// Lowercase ASCII words joined by single hyphens.
pub fn slugify(title: &str) -> String {
    title
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_negative_price_rejected() {
        let result = Package::new("Goa Getaway", dec!(-1.00), PackageType::National, "3 Days");
        assert!(matches!(result, Err(CatalogError::NegativePrice(_))));

        let free = Package::new("Walking Tour", dec!(0), PackageType::National, "1 Day").unwrap();
        assert_eq!(free.price, dec!(0));
    }

    #[test]
    fn test_slug_from_title() {
        let package = Package::new(
            "Kerala Backwaters & Munnar Hills",
            dec!(24999.00),
            PackageType::National,
            "6 Days / 5 Nights",
        )
        .unwrap();
        assert_eq!(package.slug, "kerala-backwaters-munnar-hills");
    }

    #[test]
    fn test_package_type_round_trip() {
        assert_eq!("international".parse::<PackageType>().unwrap(), PackageType::International);
        assert!("domestic".parse::<PackageType>().is_err());

        let json = serde_json::to_value(PackageType::National).unwrap();
        assert_eq!(json, "national");
    }
}
