//! Day timeline simulation.
//!
//! Every feasibility verdict in a run comes from [`RouteTimeEvaluator`], so
//! assignment, optimization and finalization cannot disagree on whether a
//! route fits.

use tracing::trace;

use crate::config::PlannerConfig;
use crate::model::{Agent, Outlet};
use crate::traits::TravelModel;

/// Renders minutes since midnight as `HH:MM`.
pub fn format_clock(minutes: f64) -> String {
    let total = minutes.round() as i64;
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Distance and timing of one day route.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSummary {
    pub outlets: usize,
    /// Start, every outlet, then end.
    pub road_distance_km: f64,
    pub travel_minutes: f64,
    pub service_minutes: f64,
    /// Latest departure that still reaches the first outlet at opening.
    pub departure_minutes: f64,
    pub finish_minutes: f64,
}

#[derive(Debug)]
pub struct RouteTimeEvaluator<'a, M: TravelModel> {
    model: &'a M,
    config: &'a PlannerConfig,
    outlets: &'a [Outlet],
}

impl<M: TravelModel> Clone for RouteTimeEvaluator<'_, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: TravelModel> Copy for RouteTimeEvaluator<'_, M> {}

impl<'a, M: TravelModel> RouteTimeEvaluator<'a, M> {
    pub fn new(model: &'a M, config: &'a PlannerConfig, outlets: &'a [Outlet]) -> Self {
        Self { model, config, outlets }
    }

    pub fn model(&self) -> &'a M {
        self.model
    }

    pub fn config(&self) -> &'a PlannerConfig {
        self.config
    }

    pub fn outlets(&self) -> &'a [Outlet] {
        self.outlets
    }

    /// Simulated clock (minutes since midnight) once the agent is back at
    /// their end location. An empty route ends at day start.
    ///
    /// Opening time is only waited for at the first arrival.
    pub fn finish_minutes(&self, agent: &Agent, route: &[usize]) -> f64 {
        let hours = &self.config.hours;
        let mut clock = hours.day_start_minutes();

        let Some(&first) = route.first() else {
            return clock;
        };

        let first_leg = self.model.travel_minutes(agent.start, self.outlets[first].location);
        clock += first_leg;
        trace!(agent = %agent.name, travel = first_leg, clock = %format_clock(clock), "arrive at first outlet");

        if clock < hours.outlet_open_minutes() {
            clock = hours.outlet_open_minutes();
            trace!(agent = %agent.name, clock = %format_clock(clock), "wait for opening");
        }

        for (position, &outlet) in route.iter().enumerate() {
            clock += self.config.service_time_minutes;
            trace!(
                agent = %agent.name,
                outlet = %self.outlets[outlet].code,
                clock = %format_clock(clock),
                "service done"
            );

            if let Some(&next) = route.get(position + 1) {
                let leg = self
                    .model
                    .travel_minutes(self.outlets[outlet].location, self.outlets[next].location);
                clock += leg;
                trace!(agent = %agent.name, travel = leg, clock = %format_clock(clock), "arrive at next outlet");
            }
        }

        let last = route[route.len() - 1];
        let return_leg = self.model.travel_minutes(self.outlets[last].location, agent.end);
        clock += return_leg;
        trace!(agent = %agent.name, travel = return_leg, clock = %format_clock(clock), "back at end location");

        clock
    }

    /// Finish time no later than the nominal day end.
    pub fn is_feasible(&self, agent: &Agent, route: &[usize]) -> bool {
        self.fits_by(agent, route, self.config.hours.day_end_minutes())
    }

    pub fn fits_by(&self, agent: &Agent, route: &[usize], deadline_minutes: f64) -> bool {
        self.finish_minutes(agent, route) <= deadline_minutes
    }

    /// Drops outlets from the end until the route is feasible and returns
    /// the dropped ones in removal order.
    pub fn truncate_to_fit(&self, agent: &Agent, route: &mut Vec<usize>) -> Vec<usize> {
        let mut dropped = Vec::new();
        while !route.is_empty() && !self.is_feasible(agent, route) {
            if let Some(outlet) = route.pop() {
                dropped.push(outlet);
            }
        }
        dropped
    }

    pub fn summarize(&self, agent: &Agent, route: &[usize]) -> RouteSummary {
        let mut road_distance_km = 0.0;
        let mut travel_minutes = 0.0;
        let mut previous = agent.start;

        for stop in route
            .iter()
            .map(|&outlet| self.outlets[outlet].location)
            .chain(std::iter::once(agent.end))
        {
            road_distance_km += self.model.road_distance_km(previous, stop);
            travel_minutes += self.model.travel_minutes(previous, stop);
            previous = stop;
        }

        let hours = &self.config.hours;
        let departure_minutes = match route.first() {
            Some(&first) => {
                let first_leg = self.model.travel_minutes(agent.start, self.outlets[first].location);
                (hours.outlet_open_minutes() - first_leg).max(hours.day_start_minutes())
            }
            None => hours.day_start_minutes(),
        };

        RouteSummary {
            outlets: route.len(),
            road_distance_km,
            travel_minutes,
            service_minutes: route.len() as f64 * self.config.service_time_minutes,
            departure_minutes,
            finish_minutes: self.finish_minutes(agent, route),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{LineModel, agent, outlets};

    #[test]
    fn test_empty_route_ends_at_day_start() {
        let config = PlannerConfig::default();
        let outlets = outlets(&[]);
        let evaluator = RouteTimeEvaluator::new(&LineModel, &config, &outlets);
        assert_eq!(evaluator.finish_minutes(&agent(), &[]), 570.0);
        assert!(evaluator.is_feasible(&agent(), &[]));
    }

    #[test]
    fn test_waits_for_opening_before_first_visit() {
        let config = PlannerConfig::default();
        let outlets = outlets(&[10.0]);
        let evaluator = RouteTimeEvaluator::new(&LineModel, &config, &outlets);
        // 09:40 arrival, wait to 10:00, 60 min service, 10 min back
        assert_eq!(evaluator.finish_minutes(&agent(), &[0]), 600.0 + 60.0 + 10.0);
    }

    #[test]
    fn test_late_first_arrival_does_not_wait() {
        let config = PlannerConfig::default();
        let outlets = outlets(&[45.0]);
        let evaluator = RouteTimeEvaluator::new(&LineModel, &config, &outlets);
        assert_eq!(evaluator.finish_minutes(&agent(), &[0]), 570.0 + 45.0 + 60.0 + 45.0);
    }

    #[test]
    fn test_multi_stop_timeline() {
        let config = PlannerConfig::default();
        let outlets = outlets(&[10.0, 30.0]);
        let evaluator = RouteTimeEvaluator::new(&LineModel, &config, &outlets);
        // 10:00 open, +60, +20 travel, +60, +30 back
        assert_eq!(evaluator.finish_minutes(&agent(), &[0, 1]), 600.0 + 60.0 + 20.0 + 60.0 + 30.0);
    }

    #[test]
    fn test_evaluation_is_repeatable() {
        let config = PlannerConfig::default();
        let outlets = outlets(&[12.5, 3.25, 40.0]);
        let evaluator = RouteTimeEvaluator::new(&LineModel, &config, &outlets);
        let route = [2, 0, 1];
        assert_eq!(
            evaluator.finish_minutes(&agent(), &route),
            evaluator.finish_minutes(&agent(), &route)
        );
    }

    #[test]
    fn test_feasibility_boundary_is_inclusive() {
        let config = PlannerConfig::default();
        // 09:30 + 270 = 14:00 arrival, 60 service, 270 back = 19:30 exactly
        let outlets = outlets(&[270.0]);
        let evaluator = RouteTimeEvaluator::new(&LineModel, &config, &outlets);
        assert_eq!(evaluator.finish_minutes(&agent(), &[0]), 1170.0);
        assert!(evaluator.is_feasible(&agent(), &[0]));
    }

    #[test]
    fn test_finishing_past_day_end_is_infeasible() {
        let config = PlannerConfig::default();
        let outlets = outlets(&[270.5]);
        let evaluator = RouteTimeEvaluator::new(&LineModel, &config, &outlets);
        assert_eq!(evaluator.finish_minutes(&agent(), &[0]), 1171.0);
        assert!(!evaluator.is_feasible(&agent(), &[0]));
    }

    #[test]
    fn test_truncate_to_fit_drops_from_end() {
        let config = PlannerConfig::default();
        let outlets = outlets(&[10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0]);
        let evaluator = RouteTimeEvaluator::new(&LineModel, &config, &outlets);
        let mut route: Vec<usize> = (0..10).collect();
        let dropped = evaluator.truncate_to_fit(&agent(), &mut route);

        assert!(evaluator.is_feasible(&agent(), &route));
        assert_eq!(route, (0..route.len()).collect::<Vec<_>>());
        assert_eq!(dropped.len() + route.len(), 10);
        assert_eq!(dropped[0], 9);
    }

    #[test]
    fn test_summary_totals() {
        let config = PlannerConfig::default();
        let outlets = outlets(&[10.0, 30.0]);
        let evaluator = RouteTimeEvaluator::new(&LineModel, &config, &outlets);
        let summary = evaluator.summarize(&agent(), &[0, 1]);

        assert_eq!(summary.outlets, 2);
        assert_eq!(summary.road_distance_km, 60.0);
        assert_eq!(summary.travel_minutes, 60.0);
        assert_eq!(summary.service_minutes, 120.0);
        // leave 09:50 to arrive at 10:00
        assert_eq!(summary.departure_minutes, 590.0);
        assert_eq!(summary.finish_minutes, evaluator.finish_minutes(&agent(), &[0, 1]));
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(570.0), "09:30");
        assert_eq!(format_clock(1170.0), "19:30");
        assert_eq!(format_clock(602.4), "10:02");
    }
}
