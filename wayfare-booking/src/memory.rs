use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;
use wayfare_core::RepositoryError;

use crate::models::{Booking, BookingStatus, ContactInquiry, CustomTourRequest};
use crate::repository::{BookingRepository, ContactInquiryRepository, CustomTourRepository, StatusChange};

/// Process-local booking store. The write lock is the per-record guard for
/// status transitions.
#[derive(Default)]
pub struct InMemoryBookingRepository {
    bookings: RwLock<HashMap<Uuid, Booking>>,
}

impl InMemoryBookingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.bookings.read().await.len()
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn insert(&self, booking: &Booking) -> Result<(), RepositoryError> {
        let mut bookings = self.bookings.write().await;
        if bookings.contains_key(&booking.id) {
            return Err(RepositoryError::Conflict(booking.id.to_string()));
        }
        bookings.insert(booking.id, booking.clone());
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Booking>, RepositoryError> {
        Ok(self.bookings.read().await.get(&id).cloned())
    }

    async fn list_for_owner(&self, owner_id: Uuid) -> Result<Vec<Booking>, RepositoryError> {
        let mut owned: Vec<Booking> = self
            .bookings
            .read()
            .await
            .values()
            .filter(|b| b.user_id == Some(owner_id))
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }

    async fn transition_status(
        &self,
        id: Uuid,
        owner_id: Uuid,
        next: BookingStatus,
        at: DateTime<Utc>,
    ) -> Result<StatusChange, RepositoryError> {
        let mut bookings = self.bookings.write().await;
        let booking = match bookings.get_mut(&id) {
            Some(b) if b.user_id == Some(owner_id) => b,
            _ => return Ok(StatusChange::Missing),
        };

        match booking.transition(next, at) {
            Ok(previous) => Ok(StatusChange::Applied {
                booking: booking.clone(),
                previous,
            }),
            Err(rejected) => Ok(StatusChange::Rejected(rejected)),
        }
    }
}

#[derive(Default)]
pub struct InMemoryCustomTourRepository {
    requests: RwLock<HashMap<Uuid, CustomTourRequest>>,
}

impl InMemoryCustomTourRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.requests.read().await.len()
    }
}

#[async_trait]
impl CustomTourRepository for InMemoryCustomTourRepository {
    async fn insert(&self, request: &CustomTourRequest) -> Result<(), RepositoryError> {
        self.requests.write().await.insert(request.id, request.clone());
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<CustomTourRequest>, RepositoryError> {
        Ok(self.requests.read().await.get(&id).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryContactInquiryRepository {
    inquiries: RwLock<HashMap<Uuid, ContactInquiry>>,
}

impl InMemoryContactInquiryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inquiries.read().await.len()
    }
}

#[async_trait]
impl ContactInquiryRepository for InMemoryContactInquiryRepository {
    async fn insert(&self, inquiry: &ContactInquiry) -> Result<(), RepositoryError> {
        self.inquiries.write().await.insert(inquiry.id, inquiry.clone());
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<ContactInquiry>, RepositoryError> {
        Ok(self.inquiries.read().await.get(&id).cloned())
    }
}
