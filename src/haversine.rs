//! Great-circle travel model.
//!
//! Straight-line distance is stretched by a fixed road factor and turned
//! into driving time at an assumed average speed. No road network is
//! consulted.

use crate::config::PlannerConfig;
use crate::model::Location;
use crate::traits::TravelModel;

/// Average driving speed assumption for time estimation.
pub const DEFAULT_SPEED_KMH: f64 = 25.0;

/// Road distance over straight-line distance.
pub const ROAD_DISTANCE_FACTOR: f64 = 1.3;

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Clone)]
pub struct HaversineModel {
    /// Assumed average driving speed in km/h.
    pub speed_kmh: f64,
    pub road_factor: f64,
}

impl Default for HaversineModel {
    fn default() -> Self {
        Self {
            speed_kmh: DEFAULT_SPEED_KMH,
            road_factor: ROAD_DISTANCE_FACTOR,
        }
    }
}

impl HaversineModel {
    pub fn new(speed_kmh: f64) -> Self {
        Self {
            speed_kmh,
            ..Self::default()
        }
    }

    pub fn from_config(config: &PlannerConfig) -> Self {
        Self {
            speed_kmh: config.average_speed_kmh,
            road_factor: config.tuning.road_distance_factor,
        }
    }

    /// Calculate haversine distance between two points in kilometers.
    pub fn haversine_km(from: Location, to: Location) -> f64 {
        let (lat1, lng1) = from.coords();
        let (lat2, lng2) = to.coords();

        let lat1_rad = lat1.to_radians();
        let lat2_rad = lat2.to_radians();
        let delta_lat = (lat2 - lat1).to_radians();
        let delta_lng = (lng2 - lng1).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_KM * c
    }

    /// Convert distance in km to travel time in minutes.
    fn km_to_minutes(&self, km: f64) -> f64 {
        km / self.speed_kmh * 60.0
    }
}

impl TravelModel for HaversineModel {
    fn distance_km(&self, from: Location, to: Location) -> f64 {
        Self::haversine_km(from, to)
    }

    fn road_distance_km(&self, from: Location, to: Location) -> f64 {
        Self::haversine_km(from, to) * self.road_factor
    }

    fn travel_minutes(&self, from: Location, to: Location) -> f64 {
        self.km_to_minutes(self.road_distance_km(from, to))
    }
}
