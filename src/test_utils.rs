use crate::model::{Agent, Location, Outlet, Weekday};
use crate::traits::TravelModel;

/// One unit of longitude is one minute of travel (and one km).
pub struct LineModel;

impl TravelModel for LineModel {
    fn distance_km(&self, from: Location, to: Location) -> f64 {
        (from.lng - to.lng).abs()
    }

    fn road_distance_km(&self, from: Location, to: Location) -> f64 {
        self.distance_km(from, to)
    }

    fn travel_minutes(&self, from: Location, to: Location) -> f64 {
        self.distance_km(from, to)
    }
}

pub fn at(lng: f64) -> Location {
    Location::try_new(0.0, lng).unwrap()
}

/// Outlets "O0", "O1", .. on the line, one visit each.
pub fn outlets(positions: &[f64]) -> Vec<Outlet> {
    positions
        .iter()
        .enumerate()
        .map(|(i, &lng)| Outlet::new(format!("O{i}"), at(lng), 1))
        .collect()
}

/// Starts and ends at the origin, Sundays off.
pub fn agent() -> Agent {
    Agent::new("alice", at(0.0), at(0.0), Weekday::Sunday)
}
