//! Orders one day's outlets into a time-feasible route.
//!
//! Construction is a nearest-neighbor walk that only considers outlets
//! which can still be served before closing and left in time to get back
//! to the agent's end location. The built route is then truncated from the
//! end until the evaluator accepts it.

use tracing::trace;

use crate::evaluator::{RouteTimeEvaluator, format_clock};
use crate::model::Agent;
use crate::traits::TravelModel;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptimizedRoute {
    /// Visiting order; always feasible or empty.
    pub route: Vec<usize>,
    /// Never reachable during construction.
    pub left_out: Vec<usize>,
    /// Removed from the end of the constructed order, last-added first.
    pub truncated: Vec<usize>,
}

impl OptimizedRoute {
    pub fn contains(&self, outlet: usize) -> bool {
        self.route.contains(&outlet)
    }

    /// Everything from the input that did not make it into the route.
    pub fn dropped(&self) -> impl Iterator<Item = usize> + '_ {
        self.left_out.iter().chain(self.truncated.iter()).copied()
    }
}

#[derive(Debug)]
pub struct RouteOptimizer<'a, M: TravelModel> {
    evaluator: RouteTimeEvaluator<'a, M>,
}

impl<M: TravelModel> Clone for RouteOptimizer<'_, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: TravelModel> Copy for RouteOptimizer<'_, M> {}

impl<'a, M: TravelModel> RouteOptimizer<'a, M> {
    pub fn new(evaluator: RouteTimeEvaluator<'a, M>) -> Self {
        Self { evaluator }
    }

    pub fn evaluator(&self) -> RouteTimeEvaluator<'a, M> {
        self.evaluator
    }

    pub fn optimize(&self, agent: &Agent, outlets: &[usize]) -> OptimizedRoute {
        let (mut route, left_out) = self.construct(agent, outlets);
        let truncated = self.evaluator.truncate_to_fit(agent, &mut route);

        if !truncated.is_empty() {
            trace!(agent = %agent.name, dropped = truncated.len(), "truncated constructed route");
        }

        OptimizedRoute {
            route,
            left_out,
            truncated,
        }
    }

    fn construct(&self, agent: &Agent, outlets: &[usize]) -> (Vec<usize>, Vec<usize>) {
        let model = self.evaluator.model();
        let config = self.evaluator.config();
        let locations = self.evaluator.outlets();
        let hours = &config.hours;

        let mut remaining = outlets.to_vec();
        let mut route = Vec::with_capacity(outlets.len());
        let mut position = agent.start;
        let mut clock = hours.day_start_minutes();

        loop {
            let mut best: Option<(usize, f64)> = None;
            let mut best_score = f64::INFINITY;

            for (index, &outlet) in remaining.iter().enumerate() {
                let location = locations[outlet].location;
                let travel = model.travel_minutes(position, location);

                let mut arrival = clock + travel;
                if route.is_empty() && arrival < hours.outlet_open_minutes() {
                    arrival = hours.outlet_open_minutes();
                }

                let departure = arrival + config.service_time_minutes;
                if departure > hours.outlet_close_minutes() {
                    continue;
                }
                if departure + model.travel_minutes(location, agent.end) > hours.day_end_minutes() {
                    continue;
                }

                let score = travel * 2.0 + model.distance_km(position, location);
                if score < best_score {
                    best_score = score;
                    best = Some((index, arrival));
                }
            }

            let Some((index, arrival)) = best else {
                break;
            };

            let outlet = remaining.remove(index);
            clock = arrival + config.service_time_minutes;
            position = locations[outlet].location;
            route.push(outlet);
            trace!(
                agent = %agent.name,
                outlet = %locations[outlet].code,
                departs = %format_clock(clock),
                "placed outlet"
            );
        }

        (route, remaining)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlannerConfig;
    use crate::test_utils::{LineModel, agent, outlets};

    #[test]
    fn test_single_outlet_kept() {
        let config = PlannerConfig::default();
        let outlets = outlets(&[15.0]);
        let optimizer = RouteOptimizer::new(RouteTimeEvaluator::new(&LineModel, &config, &outlets));
        let result = optimizer.optimize(&agent(), &[0]);
        assert_eq!(result.route, vec![0]);
        assert!(result.left_out.is_empty());
        assert!(result.truncated.is_empty());
    }

    #[test]
    fn test_orders_by_nearest_neighbor() {
        let config = PlannerConfig::default();
        let outlets = outlets(&[30.0, 10.0, 20.0]);
        let optimizer = RouteOptimizer::new(RouteTimeEvaluator::new(&LineModel, &config, &outlets));
        let result = optimizer.optimize(&agent(), &[0, 1, 2]);
        assert_eq!(result.route, vec![1, 2, 0]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let config = PlannerConfig::default();
        let outlets = outlets(&[-10.0, 10.0]);
        let optimizer = RouteOptimizer::new(RouteTimeEvaluator::new(&LineModel, &config, &outlets));
        assert_eq!(optimizer.optimize(&agent(), &[1, 0]).route, vec![1, 0]);
    }

    #[test]
    fn test_unreachable_outlet_left_out() {
        let config = PlannerConfig::default();
        // 300 minutes each way + service cannot fit in a ten hour day
        let outlets = outlets(&[10.0, 300.0]);
        let optimizer = RouteOptimizer::new(RouteTimeEvaluator::new(&LineModel, &config, &outlets));
        let result = optimizer.optimize(&agent(), &[0, 1]);
        assert_eq!(result.route, vec![0]);
        assert_eq!(result.left_out, vec![1]);
    }

    #[test]
    fn test_combined_round_trip_keeps_only_one() {
        let config = PlannerConfig::default();
        // Each alone is back by 17:10; together they overrun the day
        let outlets = outlets(&[200.0, -200.0]);
        let optimizer = RouteOptimizer::new(RouteTimeEvaluator::new(&LineModel, &config, &outlets));
        let result = optimizer.optimize(&agent(), &[0, 1]);
        assert_eq!(result.route.len(), 1);
        assert_eq!(result.dropped().count(), 1);
        assert!(optimizer.evaluator().is_feasible(&agent(), &result.route));
    }

    #[test]
    fn test_closing_time_prunes_candidates() {
        let mut config = PlannerConfig::default();
        config.hours.outlet_close = 11.5;
        // first stop served 10:00-11:00, second would end 12:10
        let outlets = outlets(&[5.0, 15.0]);
        let optimizer = RouteOptimizer::new(RouteTimeEvaluator::new(&LineModel, &config, &outlets));
        let result = optimizer.optimize(&agent(), &[0, 1]);
        assert_eq!(result.route, vec![0]);
        assert_eq!(result.left_out, vec![1]);
    }

    #[test]
    fn test_never_longer_than_input() {
        let config = PlannerConfig::default();
        let positions: Vec<f64> = (1..=12).map(|i| i as f64 * 7.0).collect();
        let outlets = outlets(&positions);
        let optimizer = RouteOptimizer::new(RouteTimeEvaluator::new(&LineModel, &config, &outlets));
        let input: Vec<usize> = (0..outlets.len()).collect();
        let result = optimizer.optimize(&agent(), &input);

        assert!(result.route.len() <= input.len());
        assert_eq!(result.route.len() + result.dropped().count(), input.len());
        assert!(optimizer.evaluator().is_feasible(&agent(), &result.route));
    }

    #[test]
    fn test_empty_input() {
        let config = PlannerConfig::default();
        let outlets = outlets(&[]);
        let optimizer = RouteOptimizer::new(RouteTimeEvaluator::new(&LineModel, &config, &outlets));
        assert_eq!(optimizer.optimize(&agent(), &[]), OptimizedRoute::default());
    }
}
