//! Test fixtures for journey-planner.
//!
//! Provides realistic test data including:
//! - Karachi neighbourhood coordinates for outlets and agent homes
//! - Builders for outlets and agents
//! - A straight-line travel model with whole-minute legs

pub mod karachi_locations;

pub use karachi_locations::*;

use journey_planner::traits::TravelModel;
use journey_planner::{Agent, Location, Outlet, Weekday};

/// Kilometers per degree of latitude on the planner's sphere.
pub const KM_PER_DEGREE: f64 = 6371.0 * std::f64::consts::PI / 180.0;

pub fn loc(lat: f64, lng: f64) -> Location {
    Location::try_new(lat, lng).unwrap()
}

/// Point `km` due north (negative: south) of `from`.
pub fn north_of(from: Location, km: f64) -> Location {
    loc(from.lat + km / KM_PER_DEGREE, from.lng)
}

/// Builder for test agents with sensible defaults.
#[derive(Clone, Debug)]
pub struct TestAgent {
    name: String,
    start: Location,
    end: Option<Location>,
    day_off: Weekday,
}

impl TestAgent {
    pub fn new(name: &str, home: Location) -> Self {
        Self {
            name: name.to_string(),
            start: home,
            end: None,
            day_off: Weekday::Sunday,
        }
    }

    pub fn ends_at(mut self, end: Location) -> Self {
        self.end = Some(end);
        self
    }

    pub fn day_off(mut self, day: Weekday) -> Self {
        self.day_off = day;
        self
    }

    pub fn build(self) -> Agent {
        Agent::new(self.name, self.start, self.end.unwrap_or(self.start), self.day_off)
    }
}

pub fn outlet(code: &str, location: Location, frequency: u32) -> Outlet {
    Outlet::new(code, location, frequency)
}

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
