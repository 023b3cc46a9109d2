//! Property tests for identifier formatting and fare arithmetic.

use proptest::prelude::*;

use rideline::booking::calculate_fare;
use rideline::contracts::{Car, Trip};
use rideline::sequence::format_booking_id;

fn trip(hourly: bool, hours: u32, minutes: u32) -> Trip {
    Trip {
        pickup: "A".into(),
        dropoff: "B".into(),
        pickup_lat_lng: None,
        dropoff_lat_lng: None,
        date_time: "2026-09-01T10:00".into(),
        flightnumber: None,
        passengers: 1,
        kids: 0,
        bags: 0,
        hourly,
        duration_hours: hours,
        duration_minutes: minutes,
        stops: Vec::new(),
        distance: None,
    }
}

fn car(transfer_rate: f64, hourly_rate: f64, quantity: u32) -> Car {
    Car {
        car_type: "Sedan".into(),
        transfer_rate,
        hourly_rate,
        quantity,
        capacity: 4,
    }
}

proptest! {
    /// The numeric part always parses back to the input sequence.
    #[test]
    fn formatted_id_round_trips_sequence(seq in 0u64..100_000_000) {
        let id = format_booking_id("MDS", seq);
        let digits = &id["MDS".len()..];
        prop_assert!(digits.len() >= 6);
        prop_assert_eq!(digits.parse::<u64>().unwrap(), seq);
    }

    /// Width is exactly six digits below one million, wider above.
    #[test]
    fn formatted_id_width_is_six_or_natural(prefix in "[A-Z]{0,5}", seq in 0u64..10_000_000_000) {
        let id = format_booking_id(&prefix, seq);
        prop_assert!(id.starts_with(prefix.as_str()));
        let natural = seq.to_string().len();
        prop_assert_eq!(id.len() - prefix.len(), natural.max(6));
    }

    /// Formatting is deterministic for any prefix, including empty.
    #[test]
    fn formatting_is_deterministic(prefix in ".{0,8}", seq in 0u64..1_000_000) {
        prop_assert_eq!(
            format_booking_id(&prefix, seq),
            format_booking_id(&prefix, seq)
        );
    }

    /// Fares are never negative for non-negative rates.
    #[test]
    fn fares_are_non_negative(
        hourly in any::<bool>(),
        hours in 0u32..24,
        minutes in 0u32..60,
        transfer_rate in 0.0f64..10_000.0,
        hourly_rate in 0.0f64..10_000.0,
        quantity in 1u32..10,
    ) {
        let fare = calculate_fare(
            &trip(hourly, hours, minutes),
            &car(transfer_rate, hourly_rate, quantity),
        );
        prop_assert!(fare >= 0.0);
    }

    /// Transfer fares scale linearly with vehicle quantity.
    #[test]
    fn transfer_fare_scales_with_quantity(
        transfer_rate in 0.0f64..10_000.0,
        quantity in 1u32..10,
    ) {
        let single = calculate_fare(&trip(false, 0, 0), &car(transfer_rate, 0.0, 1));
        let many = calculate_fare(&trip(false, 0, 0), &car(transfer_rate, 0.0, quantity));
        prop_assert!((many - single * f64::from(quantity)).abs() < 1e-9);
    }
}
