use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::contracts::{
    BookingData, MailError, Mailer, OutboundEmail, SequenceAllocator, SequenceError,
};
use crate::mailer::{company_email, customer_email, Branding};
use crate::sequence::format_booking_id;

/// Server metrics for monitoring.
#[derive(Default)]
pub struct Metrics {
    pub allocations_total: AtomicU64,
    pub allocation_failures_total: AtomicU64,
    pub notifications_total: AtomicU64,
    pub notification_failures_total: AtomicU64,
    pub validation_failures_total: AtomicU64,
    pub start_time: std::sync::OnceLock<Instant>,
}

impl Metrics {
    pub fn new() -> Self {
        let m = Self::default();
        let _ = m.start_time.set(Instant::now());
        m
    }

    pub fn record_allocation(&self) {
        self.allocations_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_allocation_failure(&self) {
        self.allocation_failures_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_notification(&self) {
        self.notifications_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_notification_failure(&self) {
        self.notification_failures_total
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_validation_failure(&self) {
        self.validation_failures_total
            .fetch_add(1, Ordering::Relaxed);
    }
}

/// Application state shared across handlers.
pub struct AppState<A: SequenceAllocator, M: Mailer> {
    pub allocator: Arc<A>,
    pub mailer: Arc<M>,
    /// Identifier prefix, read once at startup. Not hot-reloadable.
    pub prefix: String,
    pub branding: Branding,
    pub metrics: Arc<Metrics>,
}

/// Response for the allocation endpoint.
#[derive(Debug, Serialize)]
pub struct NewBookingIdResponse {
    #[serde(rename = "bookingId")]
    pub booking_id: String,
}

/// Response for the notification dispatch endpoint.
#[derive(Debug, Serialize)]
pub struct NotificationsResponse {
    pub message: String,
    pub bookingdetails: BookingData,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

/// API error type.
pub enum ApiError {
    Sequence(SequenceError),
    Mail(MailError),
    BadRequest(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_response) = match self {
            ApiError::Sequence(e) => {
                tracing::error!(error = %e, "booking id allocation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Failed to generate booking ID".into(),
                        code: "SEQUENCE_ERROR".into(),
                    },
                )
            }
            ApiError::Mail(e) => {
                tracing::error!(error = %e, "notification dispatch failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Failed to send notifications".into(),
                        code: "MAIL_ERROR".into(),
                    },
                )
            }
            ApiError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: msg,
                    code: "BAD_REQUEST".into(),
                },
            ),
        };

        (status, Json(error_response)).into_response()
    }
}

impl From<SequenceError> for ApiError {
    fn from(e: SequenceError) -> Self {
        ApiError::Sequence(e)
    }
}

impl From<MailError> for ApiError {
    fn from(e: MailError) -> Self {
        ApiError::Mail(e)
    }
}

/// GET /bookings/new-id
/// Allocates the next booking identifier.
pub async fn new_booking_id<A: SequenceAllocator, M: Mailer>(
    State(state): State<Arc<AppState<A, M>>>,
) -> Result<Json<NewBookingIdResponse>, ApiError> {
    let sequence = state.allocator.allocate_next().await.map_err(|e| {
        state.metrics.record_allocation_failure();
        ApiError::from(e)
    })?;
    state.metrics.record_allocation();

    let booking_id = format_booking_id(&state.prefix, sequence);
    tracing::debug!(%booking_id, sequence, "allocated booking id");

    Ok(Json(NewBookingIdResponse { booking_id }))
}

fn validate_booking(booking: &BookingData) -> Result<(), String> {
    if booking.booking_id.is_empty()
        || booking.customer.email.is_empty()
        || booking.trip.pickup.is_empty()
        || booking.trip.dropoff.is_empty()
        || booking.payment.card_number.is_empty()
    {
        return Err("Missing required fields".into());
    }

    if let Some(rt) = &booking.return_trip {
        if !rt.return_date_time.is_empty() && rt.return_dropoff.is_empty() {
            return Err("Missing required return trip fields".into());
        }
    }

    Ok(())
}

fn customer_text(booking: &BookingData) -> String {
    let return_part = booking
        .return_trip
        .as_ref()
        .map(|rt| format!(" with a return from {}", rt.return_dropoff))
        .unwrap_or_default();
    format!(
        "Your booking for {} from {} to {}{} is confirmed! Booking ID: {}",
        booking.car.car_type,
        booking.trip.pickup,
        booking.trip.dropoff,
        return_part,
        booking.booking_id
    )
}

fn company_text(booking: &BookingData) -> String {
    let return_part = booking
        .return_trip
        .as_ref()
        .map(|rt| format!(" Includes return from {}", rt.return_dropoff))
        .unwrap_or_default();
    format!(
        "New booking received. Contact {} at {}{} for payment confirmation. Booking ID: {}{}",
        booking.customer.name,
        booking.customer.country_code,
        booking.customer.phone,
        booking.booking_id,
        return_part
    )
}

/// POST /bookings/notifications
/// Sends the customer confirmation and staff notification emails.
/// Succeeds only if both sends succeed; the already-allocated booking
/// identifier is never rolled back on failure.
pub async fn send_notifications<A: SequenceAllocator, M: Mailer>(
    State(state): State<Arc<AppState<A, M>>>,
    Json(booking): Json<BookingData>,
) -> Result<(StatusCode, Json<NotificationsResponse>), ApiError> {
    validate_booking(&booking).map_err(|msg| {
        state.metrics.record_validation_failure();
        ApiError::BadRequest(msg)
    })?;

    let to_customer = OutboundEmail {
        to: booking.customer.email.clone(),
        subject: format!("Booking Confirmation - {}", booking.booking_id),
        text: customer_text(&booking),
        html: customer_email(&state.branding, &booking),
    };
    let to_company = OutboundEmail {
        to: state.branding.company_email.clone(),
        subject: format!(
            "New Booking Notification - {} - {}",
            booking.booking_id, booking.customer.name
        ),
        text: company_text(&booking),
        html: company_email(&state.branding, &booking),
    };

    // Both sends run concurrently; either failure fails the whole attempt.
    futures::future::try_join(state.mailer.send(&to_customer), state.mailer.send(&to_company))
        .await
        .map_err(|e| {
            state.metrics.record_notification_failure();
            ApiError::from(e)
        })?;

    state.metrics.record_notification();
    tracing::info!(booking_id = %booking.booking_id, "notifications sent");

    Ok((
        StatusCode::OK,
        Json(NotificationsResponse {
            message: "Notifications sent successfully".into(),
            bookingdetails: booking,
        }),
    ))
}

/// GET /health
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy"
    }))
}

/// Response for stats endpoint.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub uptime_secs: f64,
    pub last_sequence: u64,
    pub sequence_resets_total: u64,
    pub allocations_total: u64,
    pub allocation_failures_total: u64,
    pub notifications_total: u64,
    pub notification_failures_total: u64,
    pub validation_failures_total: u64,
}

/// GET /stats
pub async fn get_stats<A: SequenceAllocator, M: Mailer>(
    State(state): State<Arc<AppState<A, M>>>,
) -> impl IntoResponse {
    let metrics = &state.metrics;

    let uptime_secs = metrics
        .start_time
        .get()
        .map(|t| t.elapsed().as_secs_f64())
        .unwrap_or(0.0);

    let last_sequence = state.allocator.current().await.unwrap_or(0);

    Json(StatsResponse {
        uptime_secs,
        last_sequence,
        sequence_resets_total: state.allocator.resets(),
        allocations_total: metrics.allocations_total.load(Ordering::Relaxed),
        allocation_failures_total: metrics.allocation_failures_total.load(Ordering::Relaxed),
        notifications_total: metrics.notifications_total.load(Ordering::Relaxed),
        notification_failures_total: metrics.notification_failures_total.load(Ordering::Relaxed),
        validation_failures_total: metrics.validation_failures_total.load(Ordering::Relaxed),
    })
}
