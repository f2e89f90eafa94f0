//! Errors raised before scheduling starts.
//!
//! Running out of time or capacity is not an error: unscheduled visits are
//! reported as shortfall in the returned plan.

use thiserror::Error;

use crate::model::DaySlot;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlannerError {
    #[error("No outlets found in the Outlets sheet")]
    NoOutlets,

    #[error("No users found in the Users sheet")]
    NoAgents,

    #[error("Missing required data ({field}) in row {row} of {sheet} sheet")]
    MissingField {
        sheet: &'static str,
        row: usize,
        field: &'static str,
    },

    #[error("Invalid numeric value {value:?} for {field} in row {row} of {sheet} sheet")]
    InvalidNumber {
        sheet: &'static str,
        row: usize,
        field: &'static str,
        value: String,
    },

    #[error("Visit frequency must be positive in row {row} of Outlets sheet (got {value})")]
    NonPositiveFrequency { row: usize, value: String },

    #[error("Invalid Week Off Day {value:?} in row {row} of Users sheet")]
    InvalidDayOff { row: usize, value: String },

    #[error("Invalid location format {value:?} for {field} in row {row} of Users sheet")]
    InvalidLocation {
        row: usize,
        field: &'static str,
        value: String,
    },

    #[error("Coordinates must be finite (lat: {lat}, lng: {lng})")]
    NonFiniteCoordinate { lat: f64, lng: f64 },

    #[error("Duplicate outlet code {0:?}")]
    DuplicateOutlet(String),

    #[error("Duplicate user name {0:?}")]
    DuplicateAgent(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("User {agent:?} has no day slot {slot}")]
    UnknownDaySlot { agent: String, slot: DaySlot },
}
