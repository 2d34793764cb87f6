pub mod models;
pub mod forms;
pub mod repository;
pub mod memory;
pub mod engine;

pub use models::{
    Address, Booking, BookingStatus, ContactDetails, ContactInquiry, CustomTourRequest, CustomTourStatus,
    InquiryStatus, TourPreferences, TransitionRejected,
};
pub use forms::{BookingForm, ContactForm, CustomTourForm};
pub use repository::{BookingRepository, ContactInquiryRepository, CustomTourRepository, StatusChange};
pub use memory::{InMemoryBookingRepository, InMemoryContactInquiryRepository, InMemoryCustomTourRepository};
pub use engine::{GuestAccessPolicy, LifecycleEngine, Stores};
