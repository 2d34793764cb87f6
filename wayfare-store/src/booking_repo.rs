use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;
use wayfare_booking::{Address, Booking, BookingRepository, BookingStatus, ContactDetails, StatusChange};
use wayfare_core::RepositoryError;
use wayfare_shared::Masked;

use crate::{as_i32, count, db_error, ensure_user};

const BOOKING_COLUMNS: &str = "id, package_id, name, email, phone, travel_date, number_of_adults, \
    number_of_children, special_requirements, status, total_price, address, city, state_province, \
    zip_code, country, user_id, created_at, modified_at";

pub struct PgBookingRepository {
    pool: PgPool,
}

impl PgBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct BookingRow {
    id: Uuid,
    package_id: Uuid,
    name: String,
    email: String,
    phone: String,
    travel_date: NaiveDate,
    number_of_adults: i32,
    number_of_children: i32,
    special_requirements: Option<String>,
    status: String,
    total_price: Decimal,
    address: Option<String>,
    city: Option<String>,
    state_province: Option<String>,
    zip_code: Option<String>,
    country: Option<String>,
    user_id: Option<Uuid>,
    created_at: DateTime<Utc>,
    modified_at: DateTime<Utc>,
}

impl TryFrom<BookingRow> for Booking {
    type Error = RepositoryError;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        let status: BookingStatus = row
            .status
            .parse()
            .map_err(|e: wayfare_booking::models::UnknownStatus| RepositoryError::Corrupt(e.to_string()))?;

        Ok(Booking {
            id: row.id,
            package_id: row.package_id,
            contact: ContactDetails {
                name: row.name,
                email: Masked(row.email),
                phone: Some(row.phone).filter(|p| !p.is_empty()).map(Masked),
            },
            travel_date: row.travel_date,
            adults: count(row.number_of_adults, "number_of_adults")?,
            children: count(row.number_of_children, "number_of_children")?,
            special_requirements: row.special_requirements,
            status,
            total_price: row.total_price,
            address: Address {
                address: row.address,
                city: row.city,
                state_province: row.state_province,
                zip_code: row.zip_code,
                country: row.country,
            },
            user_id: row.user_id,
            created_at: row.created_at,
            modified_at: row.modified_at,
        })
    }
}

#[async_trait]
impl BookingRepository for PgBookingRepository {
    async fn insert(&self, booking: &Booking) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;
        ensure_user(&mut tx, booking.user_id).await?;

        let phone = booking.contact.phone.as_ref().map(|p| p.expose().as_str()).unwrap_or_default();

        sqlx::query(
            r#"
            INSERT INTO bookings (id, package_id, name, email, phone, travel_date, number_of_adults,
                                  number_of_children, special_requirements, status, total_price, address,
                                  city, state_province, zip_code, country, user_id, created_at, modified_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19)
            "#,
        )
        .bind(booking.id)
        .bind(booking.package_id)
        .bind(&booking.contact.name)
        .bind(booking.contact.email.expose())
        .bind(phone)
        .bind(booking.travel_date)
        .bind(as_i32(booking.adults, "adults")?)
        .bind(as_i32(booking.children, "children")?)
        .bind(&booking.special_requirements)
        .bind(booking.status.as_str())
        .bind(booking.total_price)
        .bind(&booking.address.address)
        .bind(&booking.address.city)
        .bind(&booking.address.state_province)
        .bind(&booking.address.zip_code)
        .bind(&booking.address.country)
        .bind(booking.user_id)
        .bind(booking.created_at)
        .bind(booking.modified_at)
        .execute(&mut *tx)
        .await
        .map_err(db_error)?;

        tx.commit().await.map_err(db_error)?;

        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Booking>, RepositoryError> {
        let row = sqlx::query_as::<_, BookingRow>(&format!("SELECT {} FROM bookings WHERE id = $1", BOOKING_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;

        row.map(Booking::try_from).transpose()
    }

    async fn list_for_owner(&self, owner_id: Uuid) -> Result<Vec<Booking>, RepositoryError> {
        let rows = sqlx::query_as::<_, BookingRow>(&format!(
            "SELECT {} FROM bookings WHERE user_id = $1 ORDER BY created_at DESC",
            BOOKING_COLUMNS
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.into_iter().map(Booking::try_from).collect()
    }

    async fn transition_status(
        &self,
        id: Uuid,
        owner_id: Uuid,
        next: BookingStatus,
        at: DateTime<Utc>,
    ) -> Result<StatusChange, RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        // Row lock: a concurrent transition on the same booking waits here and
        // then reads the committed status.
        let row = sqlx::query_as::<_, BookingRow>(&format!(
            "SELECT {} FROM bookings WHERE id = $1 AND user_id = $2 FOR UPDATE",
            BOOKING_COLUMNS
        ))
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_error)?;

        let Some(row) = row else {
            tx.rollback().await.map_err(db_error)?;
            return Ok(StatusChange::Missing);
        };

        let mut booking = Booking::try_from(row)?;
        let previous = match booking.transition(next, at) {
            Ok(previous) => previous,
            Err(rejected) => {
                tx.rollback().await.map_err(db_error)?;
                return Ok(StatusChange::Rejected(rejected));
            }
        };

        sqlx::query("UPDATE bookings SET status = $1, modified_at = $2 WHERE id = $3")
            .bind(booking.status.as_str())
            .bind(booking.modified_at)
            .bind(booking.id)
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;

        tx.commit().await.map_err(db_error)?;

        Ok(StatusChange::Applied { booking, previous })
    }
}
