use chrono::{Duration, Utc};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;
use wayfare_catalog::{PackageRepository, MAX_TOTAL_PRICE};
use wayfare_core::{CoreError, CoreResult, Identity, Notifier, ValidationErrors};
use wayfare_shared::models::events::{
    BookingCancelledEvent, BookingSubmittedEvent, ContactInquiryReceivedEvent, CustomTourRequestedEvent,
};
use wayfare_shared::LifecycleEvent;

use crate::forms::{BookingForm, ContactForm, CustomTourForm};
use crate::models::{Booking, BookingStatus, ContactInquiry, CustomTourRequest};
use crate::repository::{BookingRepository, ContactInquiryRepository, CustomTourRepository, StatusChange};

/// How long a booking without an owner stays viewable by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GuestAccessPolicy {
    /// Any caller who knows the id can view the booking, indefinitely.
    #[default]
    Unrestricted,
    /// Guest bookings become private once older than the window.
    Window(Duration),
}

/// Storage collaborators for the engine.
#[derive(Clone)]
pub struct Stores {
    pub packages: Arc<dyn PackageRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    pub custom_tours: Arc<dyn CustomTourRepository>,
    pub inquiries: Arc<dyn ContactInquiryRepository>,
}

/// Creates bookings and inquiries, enforces ownership, and drives booking status changes.
pub struct LifecycleEngine {
    stores: Stores,
    notifier: Arc<dyn Notifier>,
    guest_access: GuestAccessPolicy,
}

impl LifecycleEngine {
    pub fn new(stores: Stores, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            stores,
            notifier,
            guest_access: GuestAccessPolicy::default(),
        }
    }

    pub fn with_guest_access(mut self, policy: GuestAccessPolicy) -> Self {
        if let GuestAccessPolicy::Window(window) = policy {
            info!("Guest bookings visible for {} hours after submission", window.num_hours());
        }
        self.guest_access = policy;
        self
    }

    /// Submit a booking for a package. Returns the new booking id.
    pub async fn submit_booking(
        &self,
        package_id: Uuid,
        form: &BookingForm,
        caller: Option<&Identity>,
    ) -> CoreResult<Uuid> {
        let package = self
            .stores
            .packages
            .get_package(package_id)
            .await?
            .ok_or_else(|| CoreError::not_found("Package", package_id))?;

        let details = form.parse()?;
        let booking = Booking::new(&package, details, caller);
        if booking.total_price > MAX_TOTAL_PRICE {
            let mut errors = ValidationErrors::new();
            errors.add("total_price", format!("Booking total cannot exceed {}.", MAX_TOTAL_PRICE));
            return Err(errors.into());
        }
        self.stores.bookings.insert(&booking).await?;

        info!(
            booking_id = %booking.id,
            package_id = %package.id,
            guest = booking.is_guest(),
            "Booking submitted: total {}",
            booking.total_price
        );

        self.dispatch(LifecycleEvent::BookingSubmitted(BookingSubmittedEvent {
            booking_id: booking.id,
            package_id: package.id,
            package_title: package.title.clone(),
            customer_name: booking.contact.name.clone(),
            customer_email: booking.contact.email.clone(),
            user_id: booking.user_id,
            travel_date: booking.travel_date,
            adults: booking.adults,
            children: booking.children,
            total_price: booking.total_price.to_string(),
            timestamp: booking.created_at.timestamp(),
        }))
        .await;

        Ok(booking.id)
    }

    /// Booking lookup for the post-submission confirmation view.
    ///
    /// Owned bookings are visible to their owner only. Guest bookings are
    /// visible to anyone holding the id, subject to the guest access policy.
    pub async fn get_booking_for_confirmation(
        &self,
        booking_id: Uuid,
        caller: Option<&Identity>,
    ) -> CoreResult<Booking> {
        let booking = self
            .stores
            .bookings
            .get(booking_id)
            .await?
            .ok_or_else(|| CoreError::not_found("Booking", booking_id))?;

        match booking.user_id {
            Some(owner) if caller.is_some_and(|c| c.id == owner) => Ok(booking),
            Some(_) => Err(CoreError::PermissionDenied(
                "You do not have permission to view this booking.".to_string(),
            )),
            None => match self.guest_access {
                GuestAccessPolicy::Unrestricted => Ok(booking),
                GuestAccessPolicy::Window(window) if Utc::now() - booking.created_at <= window => Ok(booking),
                GuestAccessPolicy::Window(_) => Err(CoreError::PermissionDenied(
                    "This booking confirmation has expired.".to_string(),
                )),
            },
        }
    }

    /// The caller's bookings, most recent first.
    pub async fn list_my_bookings(&self, caller: &Identity) -> CoreResult<Vec<Booking>> {
        let mut bookings = self.stores.bookings.list_for_owner(caller.id).await?;
        bookings.retain(|b| caller.owns(b.user_id));
        bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(bookings)
    }

    /// A foreign booking is reported exactly like a missing one.
    pub async fn get_my_booking_detail(&self, booking_id: Uuid, caller: &Identity) -> CoreResult<Booking> {
        self.stores
            .bookings
            .get(booking_id)
            .await?
            .filter(|b| caller.owns(b.user_id))
            .ok_or_else(|| CoreError::not_found("Booking", booking_id))
    }

    /// Transition: Pending | Confirmed → Cancelled
    pub async fn cancel_booking(&self, booking_id: Uuid, caller: &Identity) -> CoreResult<Booking> {
        let change = self
            .stores
            .bookings
            .transition_status(booking_id, caller.id, BookingStatus::Cancelled, Utc::now())
            .await?;

        match change {
            StatusChange::Applied { booking, previous } => {
                info!(booking_id = %booking.id, "Booking cancelled (was {})", previous);
                self.dispatch(LifecycleEvent::BookingCancelled(BookingCancelledEvent {
                    booking_id: booking.id,
                    user_id: caller.id,
                    previous_status: previous.to_string(),
                    timestamp: booking.modified_at.timestamp(),
                }))
                .await;
                Ok(booking)
            }
            StatusChange::Rejected(rejected) => {
                warn!(booking_id = %booking_id, "Cancellation rejected: {}", rejected);
                Err(CoreError::InvalidStateTransition {
                    from: rejected.from.to_string(),
                    to: rejected.to.to_string(),
                })
            }
            StatusChange::Missing => Err(CoreError::not_found("Booking", booking_id)),
        }
    }

    pub async fn submit_custom_tour_request(
        &self,
        form: &CustomTourForm,
        caller: Option<&Identity>,
    ) -> CoreResult<Uuid> {
        let details = form.parse()?;
        let request = CustomTourRequest::new(details, caller);
        self.stores.custom_tours.insert(&request).await?;

        info!(request_id = %request.id, "Custom tour request submitted for {}", request.destination);

        self.dispatch(LifecycleEvent::CustomTourRequested(CustomTourRequestedEvent {
            request_id: request.id,
            customer_name: request.contact.name.clone(),
            customer_email: request.contact.email.clone(),
            user_id: request.user_id,
            destination: request.destination.clone(),
            start_date: request.start_date,
            end_date: request.end_date,
            timestamp: request.created_at.timestamp(),
        }))
        .await;

        Ok(request.id)
    }

    pub async fn submit_contact_inquiry(&self, form: &ContactForm, caller: Option<&Identity>) -> CoreResult<Uuid> {
        let details = form.parse()?;
        let inquiry = ContactInquiry::new(details, caller);
        self.stores.inquiries.insert(&inquiry).await?;

        info!(inquiry_id = %inquiry.id, "Contact inquiry received");

        self.dispatch(LifecycleEvent::ContactInquiryReceived(ContactInquiryReceivedEvent {
            inquiry_id: inquiry.id,
            customer_name: inquiry.contact.name.clone(),
            customer_email: inquiry.contact.email.clone(),
            user_id: inquiry.user_id,
            subject: inquiry.subject.clone(),
            timestamp: inquiry.created_at.timestamp(),
        }))
        .await;

        Ok(inquiry.id)
    }

    /// Notification is best effort: the record is already persisted.
    async fn dispatch(&self, event: LifecycleEvent) {
        if let Err(e) = self.notifier.notify(&event).await {
            warn!(topic = event.topic(), key = %event.key(), "Failed to dispatch lifecycle event: {}", e);
        }
    }
}
