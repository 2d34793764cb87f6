use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;
use wayfare_core::RepositoryError;

use crate::models::{Booking, BookingStatus, ContactInquiry, CustomTourRequest, TransitionRejected};

/// Outcome of a guarded status change.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusChange {
    Applied {
        booking: Booking,
        previous: BookingStatus,
    },
    /// The record is owned by the caller but its current status forbids the change.
    Rejected(TransitionRejected),
    /// No record with that id is owned by the caller.
    Missing,
}

/// Repository for booking records
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn insert(&self, booking: &Booking) -> Result<(), RepositoryError>;

    async fn get(&self, id: Uuid) -> Result<Option<Booking>, RepositoryError>;

    /// Bookings owned by `owner_id`, most recent first.
    async fn list_for_owner(&self, owner_id: Uuid) -> Result<Vec<Booking>, RepositoryError>;

    /// Re-read the current status and apply `next` only if the lifecycle allows
    /// it, all inside one lock or transaction scope. Concurrent callers on the
    /// same record are serialized: the later one observes the earlier result.
    async fn transition_status(
        &self,
        id: Uuid,
        owner_id: Uuid,
        next: BookingStatus,
        at: DateTime<Utc>,
    ) -> Result<StatusChange, RepositoryError>;
}

/// Append-only store for custom tour requests
#[async_trait]
pub trait CustomTourRepository: Send + Sync {
    async fn insert(&self, request: &CustomTourRequest) -> Result<(), RepositoryError>;

    async fn get(&self, id: Uuid) -> Result<Option<CustomTourRequest>, RepositoryError>;
}

/// Append-only store for contact inquiries
#[async_trait]
pub trait ContactInquiryRepository: Send + Sync {
    async fn insert(&self, inquiry: &ContactInquiry) -> Result<(), RepositoryError>;

    async fn get(&self, id: Uuid) -> Result<Option<ContactInquiry>, RepositoryError>;
}
