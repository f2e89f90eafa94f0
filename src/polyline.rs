//! Straight-segment geometry of a day route.
//!
//! Map layers draw the plan from this instead of recomputing the visiting
//! order themselves.

use serde::{Deserialize, Serialize};

use crate::model::{Agent, Outlet};

/// Ordered (latitude, longitude) points of a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<(f64, f64)>,
}

impl Polyline {
    fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    /// Start location, each outlet in visiting order, then end location.
    pub fn for_route(agent: &Agent, outlets: &[Outlet], route: &[usize]) -> Self {
        let points = std::iter::once(agent.start.coords())
            .chain(route.iter().map(|&outlet| outlets[outlet].location.coords()))
            .chain(std::iter::once(agent.end.coords()))
            .collect();
        Self::new(points)
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }
}
