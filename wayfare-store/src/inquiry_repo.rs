use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;
use wayfare_booking::models::UnknownStatus;
use wayfare_booking::{
    ContactDetails, ContactInquiry, ContactInquiryRepository, CustomTourRepository, CustomTourRequest, CustomTourStatus,
    InquiryStatus, TourPreferences,
};
use wayfare_core::RepositoryError;
use wayfare_shared::Masked;

use crate::{as_i32, count, db_error, ensure_user};

fn corrupt(e: UnknownStatus) -> RepositoryError {
    RepositoryError::Corrupt(e.to_string())
}

pub struct PgCustomTourRepository {
    pool: PgPool,
}

impl PgCustomTourRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CustomTourRow {
    id: Uuid,
    name: String,
    email: String,
    phone: String,
    destination: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    number_of_adults: i32,
    number_of_children: i32,
    budget: String,
    accommodation_preferences: Option<String>,
    transport_preferences: Option<String>,
    activities_interests: Option<String>,
    special_requirements: Option<String>,
    status: String,
    user_id: Option<Uuid>,
    created_at: DateTime<Utc>,
    modified_at: DateTime<Utc>,
}

impl TryFrom<CustomTourRow> for CustomTourRequest {
    type Error = RepositoryError;

    fn try_from(row: CustomTourRow) -> Result<Self, Self::Error> {
        let status: CustomTourStatus = row.status.parse().map_err(corrupt)?;

        Ok(CustomTourRequest {
            id: row.id,
            contact: ContactDetails {
                name: row.name,
                email: Masked(row.email),
                phone: Some(row.phone).filter(|p| !p.is_empty()).map(Masked),
            },
            destination: row.destination,
            start_date: row.start_date,
            end_date: row.end_date,
            adults: count(row.number_of_adults, "number_of_adults")?,
            children: count(row.number_of_children, "number_of_children")?,
            budget: row.budget,
            preferences: TourPreferences {
                accommodation: row.accommodation_preferences,
                transport: row.transport_preferences,
                activities: row.activities_interests,
            },
            special_requirements: row.special_requirements,
            status,
            user_id: row.user_id,
            created_at: row.created_at,
            modified_at: row.modified_at,
        })
    }
}

#[async_trait]
impl CustomTourRepository for PgCustomTourRepository {
    async fn insert(&self, request: &CustomTourRequest) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;
        ensure_user(&mut tx, request.user_id).await?;

        let phone = request.contact.phone.as_ref().map(|p| p.expose().as_str()).unwrap_or_default();

        sqlx::query(
            r#"
            INSERT INTO custom_tour_requests (id, name, email, phone, destination, start_date, end_date,
                                              number_of_adults, number_of_children, budget,
                                              accommodation_preferences, transport_preferences,
                                              activities_interests, special_requirements, status, user_id,
                                              created_at, modified_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
            "#,
        )
        .bind(request.id)
        .bind(&request.contact.name)
        .bind(request.contact.email.expose())
        .bind(phone)
        .bind(&request.destination)
        .bind(request.start_date)
        .bind(request.end_date)
        .bind(as_i32(request.adults, "adults")?)
        .bind(as_i32(request.children, "children")?)
        .bind(&request.budget)
        .bind(&request.preferences.accommodation)
        .bind(&request.preferences.transport)
        .bind(&request.preferences.activities)
        .bind(&request.special_requirements)
        .bind(request.status.as_str())
        .bind(request.user_id)
        .bind(request.created_at)
        .bind(request.modified_at)
        .execute(&mut *tx)
        .await
        .map_err(db_error)?;

        tx.commit().await.map_err(db_error)?;

        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<CustomTourRequest>, RepositoryError> {
        let row = sqlx::query_as::<_, CustomTourRow>(
            r#"
            SELECT id, name, email, phone, destination, start_date, end_date, number_of_adults,
                   number_of_children, budget, accommodation_preferences, transport_preferences,
                   activities_interests, special_requirements, status, user_id, created_at, modified_at
            FROM custom_tour_requests
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.map(CustomTourRequest::try_from).transpose()
    }
}

pub struct PgContactInquiryRepository {
    pool: PgPool,
}

impl PgContactInquiryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ContactInquiryRow {
    id: Uuid,
    name: String,
    email: String,
    phone: Option<String>,
    subject: String,
    message: String,
    status: String,
    user_id: Option<Uuid>,
    created_at: DateTime<Utc>,
    modified_at: DateTime<Utc>,
}

impl TryFrom<ContactInquiryRow> for ContactInquiry {
    type Error = RepositoryError;

    fn try_from(row: ContactInquiryRow) -> Result<Self, Self::Error> {
        let status: InquiryStatus = row.status.parse().map_err(corrupt)?;

        Ok(ContactInquiry {
            id: row.id,
            contact: ContactDetails {
                name: row.name,
                email: Masked(row.email),
                phone: row.phone.map(Masked),
            },
            subject: row.subject,
            message: row.message,
            status,
            user_id: row.user_id,
            created_at: row.created_at,
            modified_at: row.modified_at,
        })
    }
}

#[async_trait]
impl ContactInquiryRepository for PgContactInquiryRepository {
    async fn insert(&self, inquiry: &ContactInquiry) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;
        ensure_user(&mut tx, inquiry.user_id).await?;

        sqlx::query(
            r#"
            INSERT INTO contact_inquiries (id, name, email, phone, subject, message, status, user_id,
                                           created_at, modified_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(inquiry.id)
        .bind(&inquiry.contact.name)
        .bind(inquiry.contact.email.expose())
        .bind(inquiry.contact.phone.as_ref().map(|p| p.expose().as_str()))
        .bind(&inquiry.subject)
        .bind(&inquiry.message)
        .bind(inquiry.status.as_str())
        .bind(inquiry.user_id)
        .bind(inquiry.created_at)
        .bind(inquiry.modified_at)
        .execute(&mut *tx)
        .await
        .map_err(db_error)?;

        tx.commit().await.map_err(db_error)?;

        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<ContactInquiry>, RepositoryError> {
        let row = sqlx::query_as::<_, ContactInquiryRow>(
            r#"
            SELECT id, name, email, phone, subject, message, status, user_id, created_at, modified_at
            FROM contact_inquiries
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.map(ContactInquiry::try_from).transpose()
    }
}
