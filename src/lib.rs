//! journey-planner core
//!
//! Assigns recurring outlet visits to field agents over a four-week
//! horizon and orders each agent's day into a time-feasible route.

pub mod assignment;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod finalizer;
pub mod haversine;
pub mod input;
pub mod model;
pub mod optimizer;
pub mod polyline;
pub mod schedule;
pub mod solver;
pub mod traits;

#[cfg(test)]
mod test_utils;

pub use config::PlannerConfig;
pub use error::PlannerError;
pub use model::{Agent, DaySlot, JourneyPlan, Location, Outlet, PlanEntry, ShortfallEntry, Weekday};
pub use solver::{plan_journeys, plan_journeys_with};
