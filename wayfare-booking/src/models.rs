use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use wayfare_catalog::{compute_total_price, Package};
use wayfare_core::Identity;
use wayfare_shared::Masked;

/// Booking status in the lifecycle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
        }
    }

    /// Forward path is pending → confirmed → completed; only pending and
    /// confirmed bookings may be cancelled. Cancelled and completed are terminal.
    pub fn can_transition_to(self, next: BookingStatus) -> bool {
        use BookingStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed) | (Confirmed, Completed) | (Pending, Cancelled) | (Confirmed, Cancelled)
        )
    }
}

/// Custom tour request status. Moved forward by the backoffice only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CustomTourStatus {
    Pending,
    Processing,
    Completed,
    Cancelled,
}

impl CustomTourStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomTourStatus::Pending => "pending",
            CustomTourStatus::Processing => "processing",
            CustomTourStatus::Completed => "completed",
            CustomTourStatus::Cancelled => "cancelled",
        }
    }
}

/// Contact inquiry status. Moved forward by the backoffice only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum InquiryStatus {
    Unread,
    Read,
    Replied,
    Spam,
}

impl InquiryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InquiryStatus::Unread => "unread",
            InquiryStatus::Read => "read",
            InquiryStatus::Replied => "replied",
            InquiryStatus::Spam => "spam",
        }
    }
}

macro_rules! status_text {
    ($status:ty, $name:literal, [$($variant:ident),+]) => {
        impl fmt::Display for $status {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $status {
            type Err = UnknownStatus;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $(
                    if s == <$status>::$variant.as_str() {
                        return Ok(<$status>::$variant);
                    }
                )+
                Err(UnknownStatus { kind: $name, value: s.to_string() })
            }
        }
    };
}

status_text!(BookingStatus, "booking", [Pending, Confirmed, Cancelled, Completed]);
status_text!(CustomTourStatus, "custom tour", [Pending, Processing, Completed, Cancelled]);
status_text!(InquiryStatus, "inquiry", [Unread, Read, Replied, Spam]);

#[derive(Debug, thiserror::Error)]
#[error("Unknown {kind} status: {value}")]
pub struct UnknownStatus {
    pub kind: &'static str,
    pub value: String,
}

/// Status guard rejection
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Invalid state transition from {from} to {to}")]
pub struct TransitionRejected {
    pub from: BookingStatus,
    pub to: BookingStatus,
}

/// Who to reach about a record. Email and phone never appear in Debug output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub name: String,
    pub email: Masked<String>,
    pub phone: Option<Masked<String>>,
}

/// Postal address captured for guest checkout. Every part is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub address: Option<String>,
    pub city: Option<String>,
    pub state_province: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
}

impl Address {
    pub fn is_empty(&self) -> bool {
        self.address.is_none()
            && self.city.is_none()
            && self.state_province.is_none()
            && self.zip_code.is_none()
            && self.country.is_none()
    }
}

/// Parsed, validated booking submission.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingDetails {
    pub contact: ContactDetails,
    pub travel_date: NaiveDate,
    pub adults: u32,
    pub children: u32,
    pub special_requirements: Option<String>,
    pub address: Address,
}

/// One customer's request to purchase a package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub package_id: Uuid,
    pub contact: ContactDetails,
    pub travel_date: NaiveDate,
    pub adults: u32,
    pub children: u32,
    pub special_requirements: Option<String>,
    pub status: BookingStatus,
    pub total_price: Decimal,
    pub address: Address,
    pub user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl Booking {
    /// Price is computed here once and never recomputed.
    pub fn new(package: &Package, details: BookingDetails, owner: Option<&Identity>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            package_id: package.id,
            total_price: compute_total_price(package.price, details.adults, details.children),
            contact: details.contact,
            travel_date: details.travel_date,
            adults: details.adults,
            children: details.children,
            special_requirements: details.special_requirements,
            status: BookingStatus::Pending,
            address: details.address,
            user_id: owner.map(|identity| identity.id),
            created_at: now,
            modified_at: now,
        }
    }

    pub fn is_guest(&self) -> bool {
        self.user_id.is_none()
    }

    /// Apply a status change if the lifecycle allows it; returns the previous status.
    pub fn transition(&mut self, next: BookingStatus, at: DateTime<Utc>) -> Result<BookingStatus, TransitionRejected> {
        if !self.status.can_transition_to(next) {
            return Err(TransitionRejected {
                from: self.status,
                to: next,
            });
        }
        let previous = self.status;
        self.status = next;
        self.modified_at = at;
        Ok(previous)
    }
}

/// Free-form trip preferences on a custom tour request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TourPreferences {
    pub accommodation: Option<String>,
    pub transport: Option<String>,
    pub activities: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CustomTourDetails {
    pub contact: ContactDetails,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub adults: u32,
    pub children: u32,
    pub budget: String,
    pub preferences: TourPreferences,
    pub special_requirements: Option<String>,
}

/// A trip inquiry not tied to a cataloged package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomTourRequest {
    pub id: Uuid,
    pub contact: ContactDetails,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub adults: u32,
    pub children: u32,
    pub budget: String,
    pub preferences: TourPreferences,
    pub special_requirements: Option<String>,
    pub status: CustomTourStatus,
    pub user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl CustomTourRequest {
    pub fn new(details: CustomTourDetails, owner: Option<&Identity>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            contact: details.contact,
            destination: details.destination,
            start_date: details.start_date,
            end_date: details.end_date,
            adults: details.adults,
            children: details.children,
            budget: details.budget,
            preferences: details.preferences,
            special_requirements: details.special_requirements,
            status: CustomTourStatus::Pending,
            user_id: owner.map(|identity| identity.id),
            created_at: now,
            modified_at: now,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContactInquiryDetails {
    pub contact: ContactDetails,
    pub subject: String,
    pub message: String,
}

/// A general contact-form message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactInquiry {
    pub id: Uuid,
    pub contact: ContactDetails,
    pub subject: String,
    pub message: String,
    pub status: InquiryStatus,
    pub user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl ContactInquiry {
    pub fn new(details: ContactInquiryDetails, owner: Option<&Identity>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            contact: details.contact,
            subject: details.subject,
            message: details.message,
            status: InquiryStatus::Unread,
            user_id: owner.map(|identity| identity.id),
            created_at: now,
            modified_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use wayfare_catalog::PackageType;

    fn details(adults: u32, children: u32) -> BookingDetails {
        BookingDetails {
            contact: ContactDetails {
                name: "Asha Patil".to_string(),
                email: Masked::from("asha@example.com"),
                phone: Some(Masked::from("9820000000")),
            },
            travel_date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            adults,
            children,
            special_requirements: None,
            address: Address::default(),
        }
    }

    #[test]
    fn test_new_booking_is_pending_and_priced() {
        let package = Package::new("Rajasthan Heritage", dec!(1000), PackageType::National, "8 Days").unwrap();
        let owner = Identity::new(Uuid::new_v4(), "asha@example.com");

        let booking = Booking::new(&package, details(2, 1), Some(&owner));
        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.total_price, dec!(2500.00));
        assert_eq!(booking.user_id, Some(owner.id));
        assert!(!booking.is_guest());

        let guest = Booking::new(&package, details(1, 0), None);
        assert!(guest.is_guest());
    }

    #[test]
    fn test_booking_lifecycle() {
        let package = Package::new("Bali Escape", dec!(500), PackageType::International, "5 Days").unwrap();
        let mut booking = Booking::new(&package, details(1, 0), None);
        let at = Utc::now();

        // Pending → Confirmed → Completed
        assert_eq!(booking.transition(BookingStatus::Confirmed, at), Ok(BookingStatus::Pending));
        assert_eq!(booking.transition(BookingStatus::Completed, at), Ok(BookingStatus::Confirmed));

        // Completed is terminal
        let rejected = booking.transition(BookingStatus::Cancelled, at).unwrap_err();
        assert_eq!(rejected.from, BookingStatus::Completed);
        assert_eq!(booking.status, BookingStatus::Completed);
    }

    #[test]
    fn test_cancel_paths() {
        use BookingStatus::*;
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Confirmed.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Cancelled));
        assert!(!Completed.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Pending));
        assert!(!Pending.can_transition_to(Completed));
    }

    #[test]
    fn test_transition_does_not_touch_price() {
        let package = Package::new("Ladakh Ride", dec!(1999.99), PackageType::National, "9 Days").unwrap();
        let mut booking = Booking::new(&package, details(2, 2), None);
        let price = booking.total_price;

        booking.transition(BookingStatus::Cancelled, Utc::now()).unwrap();
        assert_eq!(booking.total_price, price);
    }

    #[test]
    fn test_status_text() {
        assert_eq!("confirmed".parse::<BookingStatus>().unwrap(), BookingStatus::Confirmed);
        assert_eq!(CustomTourStatus::Processing.to_string(), "processing");
        assert_eq!("spam".parse::<InquiryStatus>().unwrap(), InquiryStatus::Spam);

        let err = "archived".parse::<BookingStatus>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown booking status: archived");
    }

    #[test]
    fn test_debug_masks_contact() {
        let package = Package::new("Andaman Dive", dec!(30000), PackageType::National, "6 Days").unwrap();
        let booking = Booking::new(&package, details(1, 0), None);
        let debug = format!("{:?}", booking);
        assert!(!debug.contains("asha@example.com"));
        assert!(debug.contains("Asha Patil"));
    }
}
