//! Run-wide planning parameters.

use serde::Deserialize;

use crate::error::PlannerError;
use crate::haversine::{DEFAULT_SPEED_KMH, ROAD_DISTANCE_FACTOR};

/// Working window of agents and outlets, in hours of day (9.5 = 09:30).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WorkingHours {
    pub day_start: f64,
    pub day_end: f64,
    pub outlet_open: f64,
    pub outlet_close: f64,
}

impl Default for WorkingHours {
    fn default() -> Self {
        Self {
            day_start: 9.5,
            day_end: 19.5,
            outlet_open: 10.0,
            outlet_close: 19.0,
        }
    }
}

impl WorkingHours {
    pub fn day_start_minutes(&self) -> f64 {
        self.day_start * 60.0
    }

    pub fn day_end_minutes(&self) -> f64 {
        self.day_end * 60.0
    }

    pub fn outlet_open_minutes(&self) -> f64 {
        self.outlet_open * 60.0
    }

    pub fn outlet_close_minutes(&self) -> f64 {
        self.outlet_close * 60.0
    }

    pub fn total_working_minutes(&self) -> f64 {
        self.day_end_minutes() - self.day_start_minutes()
    }
}

/// Constants steering slot selection during assignment.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AssignmentTuning {
    pub road_distance_factor: f64,
    /// Assignment only accepts days finishing this long before day end.
    pub assignment_margin_minutes: f64,
    /// Slack subtracted from the working day when bounding reachable distance.
    pub reachability_slack_minutes: f64,
    /// Score added per outlet already on the candidate day.
    pub load_weight: f64,
    /// Straight-line distance beyond which the quadratic penalty applies.
    pub distance_penalty_radius_km: f64,
    pub distance_penalty_weight: f64,
}

impl Default for AssignmentTuning {
    fn default() -> Self {
        Self {
            road_distance_factor: ROAD_DISTANCE_FACTOR,
            assignment_margin_minutes: 90.0,
            reachability_slack_minutes: 60.0,
            load_weight: 30.0,
            distance_penalty_radius_km: 30.0,
            distance_penalty_weight: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub average_speed_kmh: f64,
    pub service_time_minutes: f64,
    pub hours: WorkingHours,
    pub tuning: AssignmentTuning,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            average_speed_kmh: DEFAULT_SPEED_KMH,
            service_time_minutes: 60.0,
            hours: WorkingHours::default(),
            tuning: AssignmentTuning::default(),
        }
    }
}

impl PlannerConfig {
    pub fn validate(&self) -> Result<(), PlannerError> {
        if !(self.average_speed_kmh.is_finite() && self.average_speed_kmh > 0.0) {
            return Err(PlannerError::InvalidConfig(format!(
                "average speed must be positive, got {}",
                self.average_speed_kmh
            )));
        }
        if !(self.service_time_minutes.is_finite() && self.service_time_minutes > 0.0) {
            return Err(PlannerError::InvalidConfig(format!(
                "service time must be positive, got {}",
                self.service_time_minutes
            )));
        }

        let hours = &self.hours;
        let all_finite = [hours.day_start, hours.day_end, hours.outlet_open, hours.outlet_close]
            .iter()
            .all(|value| value.is_finite());
        if !all_finite || hours.day_start >= hours.day_end {
            return Err(PlannerError::InvalidConfig(format!(
                "working day must start before it ends ({} - {})",
                hours.day_start, hours.day_end
            )));
        }
        if hours.outlet_open >= hours.outlet_close {
            return Err(PlannerError::InvalidConfig(format!(
                "outlets must open before they close ({} - {})",
                hours.outlet_open, hours.outlet_close
            )));
        }

        let tuning = &self.tuning;
        if !(tuning.road_distance_factor.is_finite() && tuning.road_distance_factor > 0.0) {
            return Err(PlannerError::InvalidConfig(format!(
                "road distance factor must be positive, got {}",
                tuning.road_distance_factor
            )));
        }
        if !(tuning.distance_penalty_radius_km.is_finite() && tuning.distance_penalty_radius_km > 0.0) {
            return Err(PlannerError::InvalidConfig(format!(
                "distance penalty radius must be positive, got {}",
                tuning.distance_penalty_radius_km
            )));
        }
        if !(tuning.assignment_margin_minutes.is_finite() && tuning.assignment_margin_minutes >= 0.0) {
            return Err(PlannerError::InvalidConfig(format!(
                "assignment margin must not be negative, got {}",
                tuning.assignment_margin_minutes
            )));
        }
        if !(tuning.reachability_slack_minutes.is_finite() && tuning.reachability_slack_minutes >= 0.0) {
            return Err(PlannerError::InvalidConfig(format!(
                "reachability slack must not be negative, got {}",
                tuning.reachability_slack_minutes
            )));
        }
        if self.assignment_deadline_minutes() < hours.day_start_minutes() {
            return Err(PlannerError::InvalidConfig(format!(
                "assignment margin of {} minutes leaves no working day",
                tuning.assignment_margin_minutes
            )));
        }

        Ok(())
    }

    /// Largest straight-line distance from an agent's start that can still
    /// host a single visit and the trip back.
    pub fn max_one_way_distance_km(&self) -> f64 {
        let max_one_way_minutes = (self.hours.total_working_minutes()
            - self.service_time_minutes
            - self.tuning.reachability_slack_minutes)
            / 2.0;
        max_one_way_minutes / 60.0 * self.average_speed_kmh
    }

    /// Latest finish time accepted while assigning visits.
    pub fn assignment_deadline_minutes(&self) -> f64 {
        self.hours.day_end_minutes() - self.tuning.assignment_margin_minutes
    }
}
