//! Raw form submissions and their one-time parse into typed details.
//!
//! Every field is read as an optional string, exactly as it arrives from the
//! page. `parse` reports all field failures together instead of stopping at
//! the first.

use serde::Deserialize;
use wayfare_core::validation::FieldReader;
use wayfare_core::ValidationErrors;
use wayfare_shared::Masked;

use crate::models::{
    Address, BookingDetails, ContactDetails, ContactInquiryDetails, CustomTourDetails, TourPreferences,
};

const NAME_MAX: usize = 255;
const PHONE_MAX: usize = 20;
const PLACE_MAX: usize = 100;
const ZIP_MAX: usize = 20;
const BUDGET_MAX: usize = 100;
const TEXT_MAX: usize = 5000;
/// Largest party a single form may book.
pub const PARTY_MAX: u32 = 100;

#[derive(Clone, Default, Deserialize)]
pub struct BookingForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub travel_date: Option<String>,
    pub number_of_adults: Option<String>,
    pub number_of_children: Option<String>,
    pub special_requirements: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state_province: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
}

impl BookingForm {
    pub fn parse(&self) -> Result<BookingDetails, ValidationErrors> {
        let mut r = FieldReader::new();

        let name = r.required("name", self.name.as_deref(), NAME_MAX);
        let email = r.email("email", self.email.as_deref());
        let phone = r.required("phone", self.phone.as_deref(), PHONE_MAX);
        let travel_date = r.date("travel_date", self.travel_date.as_deref());
        let adults = r.count("number_of_adults", self.number_of_adults.as_deref(), 1, PARTY_MAX, 1);
        let children = r.count("number_of_children", self.number_of_children.as_deref(), 0, PARTY_MAX, 0);
        let special_requirements = r.optional("special_requirements", self.special_requirements.as_deref(), TEXT_MAX);
        let address = Address {
            address: r.optional("address", self.address.as_deref(), TEXT_MAX),
            city: r.optional("city", self.city.as_deref(), PLACE_MAX),
            state_province: r.optional("state_province", self.state_province.as_deref(), PLACE_MAX),
            zip_code: r.optional("zip_code", self.zip_code.as_deref(), ZIP_MAX),
            country: r.optional("country", self.country.as_deref(), PLACE_MAX),
        };

        let errors = r.finish();
        match (name, email, phone, travel_date, adults, children) {
            (Some(name), Some(email), Some(phone), Some(travel_date), Some(adults), Some(children))
                if errors.is_empty() =>
            {
                Ok(BookingDetails {
                    contact: ContactDetails {
                        name,
                        email: Masked(email),
                        phone: Some(Masked(phone)),
                    },
                    travel_date,
                    adults,
                    children,
                    special_requirements,
                    address,
                })
            }
            _ => Err(errors),
        }
    }
}

#[derive(Clone, Default, Deserialize)]
pub struct CustomTourForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub destination: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub number_of_adults: Option<String>,
    pub number_of_children: Option<String>,
    pub budget: Option<String>,
    pub accommodation_preferences: Option<String>,
    pub transport_preferences: Option<String>,
    pub activities_interests: Option<String>,
    pub special_requirements: Option<String>,
}

impl CustomTourForm {
    pub fn parse(&self) -> Result<CustomTourDetails, ValidationErrors> {
        let mut r = FieldReader::new();

        let name = r.required("name", self.name.as_deref(), NAME_MAX);
        let email = r.email("email", self.email.as_deref());
        let phone = r.required("phone", self.phone.as_deref(), PHONE_MAX);
        let destination = r.required("destination", self.destination.as_deref(), NAME_MAX);
        let start_date = r.date("start_date", self.start_date.as_deref());
        let end_date = r.date("end_date", self.end_date.as_deref());
        let adults = r.count("number_of_adults", self.number_of_adults.as_deref(), 1, PARTY_MAX, 1);
        let children = r.count("number_of_children", self.number_of_children.as_deref(), 0, PARTY_MAX, 0);
        let budget = r.required("budget", self.budget.as_deref(), BUDGET_MAX);
        let preferences = TourPreferences {
            accommodation: r.optional("accommodation_preferences", self.accommodation_preferences.as_deref(), TEXT_MAX),
            transport: r.optional("transport_preferences", self.transport_preferences.as_deref(), TEXT_MAX),
            activities: r.optional("activities_interests", self.activities_interests.as_deref(), TEXT_MAX),
        };
        let special_requirements = r.optional("special_requirements", self.special_requirements.as_deref(), TEXT_MAX);

        if let (Some(start), Some(end)) = (start_date, end_date) {
            if end < start {
                r.reject("end_date", "End date cannot be before the start date.");
            }
        }

        let errors = r.finish();
        match (name, email, phone, destination, start_date, end_date, adults, children, budget) {
            (
                Some(name),
                Some(email),
                Some(phone),
                Some(destination),
                Some(start_date),
                Some(end_date),
                Some(adults),
                Some(children),
                Some(budget),
            ) if errors.is_empty() => Ok(CustomTourDetails {
                contact: ContactDetails {
                    name,
                    email: Masked(email),
                    phone: Some(Masked(phone)),
                },
                destination,
                start_date,
                end_date,
                adults,
                children,
                budget,
                preferences,
                special_requirements,
            }),
            _ => Err(errors),
        }
    }
}

#[derive(Clone, Default, Deserialize)]
pub struct ContactForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

impl ContactForm {
    pub fn parse(&self) -> Result<ContactInquiryDetails, ValidationErrors> {
        let mut r = FieldReader::new();

        let name = r.required("name", self.name.as_deref(), NAME_MAX);
        let email = r.email("email", self.email.as_deref());
        let phone = r.optional("phone", self.phone.as_deref(), PHONE_MAX);
        let subject = r.required("subject", self.subject.as_deref(), NAME_MAX);
        let message = r.required("message", self.message.as_deref(), TEXT_MAX);

        let errors = r.finish();
        match (name, email, subject, message) {
            (Some(name), Some(email), Some(subject), Some(message)) if errors.is_empty() => {
                Ok(ContactInquiryDetails {
                    contact: ContactDetails {
                        name,
                        email: Masked(email),
                        phone: phone.map(Masked),
                    },
                    subject,
                    message,
                })
            }
            _ => Err(errors),
        }
    }
}
