use uuid::Uuid;
use crate::pii::Masked;

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct BookingSubmittedEvent {
    pub booking_id: Uuid,
    pub package_id: Uuid,
    pub package_title: String,
    pub customer_name: String,
    pub customer_email: Masked<String>,
    pub user_id: Option<Uuid>,
    pub travel_date: chrono::NaiveDate,
    pub adults: u32,
    pub children: u32,
    pub total_price: String, // Decimal rendered with 2 places
    pub timestamp: i64,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct BookingCancelledEvent {
    pub booking_id: Uuid,
    pub user_id: Uuid,
    pub previous_status: String,
    pub timestamp: i64,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct CustomTourRequestedEvent {
    pub request_id: Uuid,
    pub customer_name: String,
    pub customer_email: Masked<String>,
    pub user_id: Option<Uuid>,
    pub destination: String,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
    pub timestamp: i64,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct ContactInquiryReceivedEvent {
    pub inquiry_id: Uuid,
    pub customer_name: String,
    pub customer_email: Masked<String>,
    pub user_id: Option<Uuid>,
    pub subject: String,
    pub timestamp: i64,
}

/// Everything the lifecycle engine hands to the notification collaborator.
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LifecycleEvent {
    BookingSubmitted(BookingSubmittedEvent),
    BookingCancelled(BookingCancelledEvent),
    CustomTourRequested(CustomTourRequestedEvent),
    ContactInquiryReceived(ContactInquiryReceivedEvent),
}

impl LifecycleEvent {
    pub fn topic(&self) -> &'static str {
        match self {
            LifecycleEvent::BookingSubmitted(_) => "booking.submitted",
            LifecycleEvent::BookingCancelled(_) => "booking.cancelled",
            LifecycleEvent::CustomTourRequested(_) => "custom_tour.requested",
            LifecycleEvent::ContactInquiryReceived(_) => "contact.received",
        }
    }

    /// Partition key: the id of the record the event is about.
    pub fn key(&self) -> Uuid {
        match self {
            LifecycleEvent::BookingSubmitted(e) => e.booking_id,
            LifecycleEvent::BookingCancelled(e) => e.booking_id,
            LifecycleEvent::CustomTourRequested(e) => e.request_id,
            LifecycleEvent::ContactInquiryReceived(e) => e.inquiry_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancelled_event_routing() {
        let booking_id = Uuid::new_v4();
        let event = LifecycleEvent::BookingCancelled(BookingCancelledEvent {
            booking_id,
            user_id: Uuid::new_v4(),
            previous_status: "pending".to_string(),
            timestamp: 0,
        });

        assert_eq!(event.topic(), "booking.cancelled");
        assert_eq!(event.key(), booking_id);

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "booking_cancelled");
        assert_eq!(json["previous_status"], "pending");
    }
}
