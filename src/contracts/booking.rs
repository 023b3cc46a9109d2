use serde::{Deserialize, Serialize};

/// A full booking record as submitted at the end of the wizard flow.
///
/// Field names follow the client wire format (camelCase JSON). The record is
/// carried opaquely through the flow; the server only validates it and
/// renders it into notification emails.
///
/// Every field defaults when absent so that an incomplete payload reaches
/// validation (and a 400 response) instead of dying in deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingData {
    pub booking_id: String,
    pub customer: Customer,
    pub trip: Trip,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_trip: Option<ReturnTrip>,
    pub car: Car,
    #[serde(default)]
    pub fare: f64,
    pub payment: Payment,
    /// Current wizard step, tracked client-side.
    #[serde(default)]
    pub step: u8,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Customer {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub country_code: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Trip {
    pub pickup: String,
    pub dropoff: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickup_lat_lng: Option<Coordinates>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dropoff_lat_lng: Option<Coordinates>,
    pub date_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flightnumber: Option<String>,
    pub passengers: u32,
    #[serde(default)]
    pub kids: u32,
    #[serde(default)]
    pub bags: u32,
    /// Hourly charter rather than a point-to-point transfer.
    pub hourly: bool,
    #[serde(default)]
    pub duration_hours: u32,
    #[serde(default)]
    pub duration_minutes: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stops: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReturnTrip {
    pub return_date_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_flight_number: Option<String>,
    /// May arrive empty when the client submitted a partial return trip;
    /// validation rejects that case.
    #[serde(default)]
    pub return_dropoff: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_dropoff_lat_lng: Option<Coordinates>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Car {
    #[serde(rename = "type")]
    pub car_type: String,
    pub transfer_rate: f64,
    pub hourly_rate: f64,
    pub quantity: u32,
    pub capacity: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Credit,
    Debit,
}

/// Card details are collected and forwarded in the notification flow only;
/// nothing here is charged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Payment {
    pub method: PaymentMethod,
    pub card_number: String,
    pub expiry_date: String,
    pub cvv: String,
    pub cardholder_name: String,
    pub billing_postal_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
}
