use crate::contracts::{Car, Trip};

/// Computes the quoted fare for a trip and selected vehicle.
///
/// Hourly charters bill `hourly_rate * hours * quantity`; point-to-point
/// transfers bill a flat `transfer_rate * quantity`. No vehicle selected
/// quotes zero.
pub fn calculate_fare(trip: &Trip, car: &Car) -> f64 {
    if car.car_type.is_empty() {
        return 0.0;
    }
    if trip.hourly {
        let total_hours =
            f64::from(trip.duration_hours) + f64::from(trip.duration_minutes) / 60.0;
        car.hourly_rate * total_hours * f64::from(car.quantity)
    } else {
        car.transfer_rate * f64::from(car.quantity)
    }
}
