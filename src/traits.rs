//! Seams between the scheduling stages and the geometry they rely on.

use crate::model::Location;

/// Estimates distance and travel time between two points.
///
/// Every stage of a run must share one model so their feasibility
/// verdicts agree.
pub trait TravelModel {
    /// Straight-line distance in kilometers.
    fn distance_km(&self, from: Location, to: Location) -> f64;

    /// Estimated road distance in kilometers.
    fn road_distance_km(&self, from: Location, to: Location) -> f64;

    /// Estimated driving time in minutes.
    fn travel_minutes(&self, from: Location, to: Location) -> f64;
}

impl<T: TravelModel + ?Sized> TravelModel for &T {
    fn distance_km(&self, from: Location, to: Location) -> f64 {
        (**self).distance_km(from, to)
    }

    fn road_distance_km(&self, from: Location, to: Location) -> f64 {
        (**self).road_distance_km(from, to)
    }

    fn travel_minutes(&self, from: Location, to: Location) -> f64 {
        (**self).travel_minutes(from, to)
    }
}
