//! HTML bodies for the customer confirmation and staff notification emails.

use crate::contracts::{BookingData, Coordinates, PaymentMethod};

/// Company branding rendered into outbound email, read once at startup.
#[derive(Debug, Clone)]
pub struct Branding {
    pub name: String,
    pub website: String,
    pub phone: String,
    /// Staff inbox that receives the new-booking notification.
    pub company_email: String,
}

impl Branding {
    /// Reads `RIDELINE_COMPANY_NAME`, `RIDELINE_COMPANY_WEBSITE`,
    /// `RIDELINE_COMPANY_PHONE` and `RIDELINE_COMPANY_EMAIL`, with the
    /// Metro Detroit Sedan defaults.
    pub fn from_env() -> Self {
        Self {
            name: std::env::var("RIDELINE_COMPANY_NAME")
                .unwrap_or_else(|_| "Metro Detroit Sedan".into()),
            website: std::env::var("RIDELINE_COMPANY_WEBSITE")
                .unwrap_or_else(|_| "https://metrodtwsedan.com".into()),
            phone: std::env::var("RIDELINE_COMPANY_PHONE")
                .unwrap_or_else(|_| "+1 (734) 945-6067".into()),
            company_email: std::env::var("RIDELINE_COMPANY_EMAIL")
                .unwrap_or_else(|_| "bookings@metrodtwsedan.com".into()),
        }
    }
}

fn detail_row(rows: &mut String, label: &str, value: &str) {
    rows.push_str(&format!(
        "<tr>\
         <td style=\"font-weight: bold; color: #333; padding: 10px;\">{label}:</td>\
         <td style=\"color: #555; padding: 10px;\">{value}</td>\
         </tr>"
    ));
}

fn location(name: &str, coords: Option<&Coordinates>) -> String {
    match coords {
        Some(c) => format!("{name} (Lat: {}, Lng: {})", c.lat, c.lng),
        None => name.to_string(),
    }
}

/// Customer-facing confirmation email.
pub fn customer_email(branding: &Branding, booking: &BookingData) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="UTF-8" />
    <title>Booking Confirmation</title>
    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  </head>
  <body style="margin: 0; padding: 0; font-family: Arial, sans-serif; background-color: #f5f5f5;">
    <table width="100%" cellpadding="0" cellspacing="0" style="background-color: #f5f5f5; padding: 20px;">
      <tr>
        <td align="center">
          <table width="100%" cellpadding="0" cellspacing="0" style="max-width: 600px; background-color: #ffffff; border-radius: 8px; overflow: hidden;">
            <tr>
              <td style="background-color: #007bff; color: white; padding: 20px; text-align: center; font-size: 22px; font-weight: bold;">
                Booking Confirmation
              </td>
            </tr>
            <tr>
              <td style="padding: 20px; color: #333333;">
                <p style="font-size: 16px;">Hello <strong>{customer_name}</strong>,</p>
                <p style="font-size: 16px;">
                  Thank you for booking with us! Your request has been received. A team member will review it and send a confirmation email shortly. Your booking ID is <strong>{booking_id}</strong>.
                </p>
                <p style="font-size: 16px;">
                  Call us at <strong style="color: #000;">{phone}</strong> if you have any questions or need assistance with your booking.
                </p>
              </td>
            </tr>
            <tr>
              <td style="padding: 20px; text-align: left;">
                <a href="tel:{phone}" style="display: inline-block; padding: 12px 20px; background-color: #007bff; color: #ffffff; text-decoration: none; border-radius: 6px; font-size: 16px;">
                  Call {company_name}
                </a>
              </td>
            </tr>
            <tr>
              <td style="padding: 20px; color: #999; font-size: 12px; text-align: center;">
                {company_name} &middot; <a href="{website}" style="color: #999;">{website}</a>
              </td>
            </tr>
          </table>
        </td>
      </tr>
    </table>
  </body>
</html>"#,
        customer_name = booking.customer.name,
        booking_id = booking.booking_id,
        phone = branding.phone,
        company_name = branding.name,
        website = branding.website,
    )
}

/// Staff-facing notification email with the full booking detail table.
pub fn company_email(branding: &Branding, booking: &BookingData) -> String {
    let customer = &booking.customer;
    let trip = &booking.trip;

    let mut rows = String::new();
    detail_row(&mut rows, "Customer Name", &customer.name);
    detail_row(
        &mut rows,
        "Phone Number",
        &format!("{}{}", customer.country_code, customer.phone),
    );
    detail_row(&mut rows, "Email", &customer.email);
    detail_row(&mut rows, "Car Type", &booking.car.car_type);
    detail_row(
        &mut rows,
        "Pickup Location",
        &location(&trip.pickup, trip.pickup_lat_lng.as_ref()),
    );
    detail_row(
        &mut rows,
        "Drop-off Location",
        &location(&trip.dropoff, trip.dropoff_lat_lng.as_ref()),
    );
    if let Some(flight) = trip.flightnumber.as_deref().filter(|f| !f.is_empty()) {
        detail_row(&mut rows, "Flight Number", flight);
    }
    if !trip.stops.is_empty() {
        detail_row(&mut rows, "Stops", &trip.stops.join(", "));
    }
    detail_row(&mut rows, "Date & Time", &trip.date_time);
    detail_row(
        &mut rows,
        "Passengers",
        &format!("{} (Kids: {})", trip.passengers, trip.kids),
    );
    detail_row(&mut rows, "Bags", &trip.bags.to_string());
    detail_row(
        &mut rows,
        "Trip Type",
        if trip.hourly { "Hourly" } else { "Transfer" },
    );
    if trip.hourly {
        detail_row(
            &mut rows,
            "Duration",
            &format!("{}h {}m", trip.duration_hours, trip.duration_minutes),
        );
    }
    if let Some(rt) = &booking.return_trip {
        detail_row(&mut rows, "Return Date & Time", &rt.return_date_time);
        detail_row(
            &mut rows,
            "Return Drop-off",
            &location(&rt.return_dropoff, rt.return_dropoff_lat_lng.as_ref()),
        );
        if let Some(flight) = rt.return_flight_number.as_deref().filter(|f| !f.is_empty()) {
            detail_row(&mut rows, "Return Flight", flight);
        }
    }
    detail_row(&mut rows, "Fare Estimate", &format!("${:.2}", booking.fare));
    detail_row(
        &mut rows,
        "Payment Method",
        match booking.payment.method {
            PaymentMethod::Credit => "Credit",
            PaymentMethod::Debit => "Debit",
        },
    );
    if let Some(instructions) = booking
        .payment
        .special_instructions
        .as_deref()
        .filter(|i| !i.is_empty())
    {
        detail_row(&mut rows, "Special Instructions", instructions);
    }

    format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>New Booking Notification</title>
  </head>
  <body style="margin: 0; padding: 0; font-family: Arial, sans-serif; background-color: #f4f4f4;">
    <table role="presentation" width="100%" cellspacing="0" cellpadding="0" style="max-width: 600px; margin: 20px auto; background-color: #ffffff; border-radius: 8px;">
      <tr>
        <td style="padding: 20px; text-align: center; background-color: #d32f2f; border-radius: 8px 8px 0 0;">
          <h1 style="color: #ffffff; margin: 10px 0; font-size: 24px;">New Booking Notification</h1>
        </td>
      </tr>
      <tr>
        <td style="padding: 20px;">
          <h2 style="color: #333; font-size: 20px; margin-top: 0;">New Booking Received (ID: {booking_id}) - {customer_name}</h2>
          <p style="color: #555; font-size: 16px; line-height: 1.5;">
            A new booking has been made. Please contact the customer to confirm payment and finalize details.
          </p>
          <a href="tel:{customer_tel}" style="display: inline-block; padding: 12px 24px; background-color: #d32f2f; color: #ffffff; text-decoration: none; border-radius: 4px; font-size: 16px; margin: 20px 0;">
            Call Customer
          </a>
          <table role="presentation" width="100%" cellspacing="0" cellpadding="0" style="background-color: #f9f9f9; margin: 20px 0;">
            {rows}
          </table>
          <p style="color: #999; font-size: 12px;">{company_name} &middot; {website}</p>
        </td>
      </tr>
    </table>
  </body>
</html>"#,
        booking_id = booking.booking_id,
        customer_name = customer.name,
        customer_tel = format!("{}{}", customer.country_code, customer.phone),
        rows = rows,
        company_name = branding.name,
        website = branding.website,
    )
}
