//! Final ordering and validation of every committed day.
//!
//! Each non-empty day is re-optimized and then checked again on its own
//! before any plan entry is written. Outlets lost at either step count
//! towards their shortfall.

use tracing::{debug, warn};

use crate::error::PlannerError;
use crate::evaluator::format_clock;
use crate::model::{Agent, DayRouteSummary, DaySlot, JourneyPlan, PlanEntry, ShortfallEntry};
use crate::optimizer::RouteOptimizer;
use crate::polyline::Polyline;
use crate::solver::SchedulingContext;
use crate::traits::TravelModel;

#[derive(Debug)]
pub struct PlanFinalizer<'a, M: TravelModel> {
    optimizer: RouteOptimizer<'a, M>,
    agents: &'a [Agent],
}

impl<'a, M: TravelModel> PlanFinalizer<'a, M> {
    pub fn new(optimizer: RouteOptimizer<'a, M>, agents: &'a [Agent]) -> Self {
        Self { optimizer, agents }
    }

    pub fn run(&self, context: &mut SchedulingContext) -> Result<JourneyPlan, PlannerError> {
        let evaluator = self.optimizer.evaluator();
        let outlets = evaluator.outlets();

        let committed: Vec<(usize, DaySlot, Vec<usize>)> = context
            .store
            .iter()
            .filter(|(_, _, day)| !day.is_empty())
            .map(|(agent, slot, day)| (agent, slot, day.to_vec()))
            .collect();

        let mut plan = Vec::new();
        let mut routes = Vec::with_capacity(committed.len());

        for (agent_index, slot, day) in committed {
            let agent = &self.agents[agent_index];
            let optimized = self.optimizer.optimize(agent, &day);
            let mut dropped: Vec<usize> = optimized.dropped().collect();
            let mut route = optimized.route;

            if !evaluator.is_feasible(agent, &route) {
                warn!(
                    agent = %agent.name,
                    slot = %slot,
                    finish = %format_clock(evaluator.finish_minutes(agent, &route)),
                    "optimized route exceeds working hours, truncating"
                );
                dropped.extend(evaluator.truncate_to_fit(agent, &mut route));
            }

            for &outlet in &dropped {
                context.dropped[outlet] += 1;
                debug!(agent = %agent.name, slot = %slot, outlet = %outlets[outlet].code, "dropped from final route");
            }

            plan.extend(route.iter().enumerate().map(|(index, &outlet)| PlanEntry {
                agent_name: agent.name.clone(),
                day_slot_label: slot,
                position: index + 1,
                outlet_code: outlets[outlet].code.clone(),
            }));

            if !route.is_empty() {
                let summary = evaluator.summarize(agent, &route);
                routes.push(DayRouteSummary {
                    agent_name: agent.name.clone(),
                    day_slot_label: slot,
                    outlets: summary.outlets,
                    road_distance_km: summary.road_distance_km,
                    travel_minutes: summary.travel_minutes,
                    service_minutes: summary.service_minutes,
                    departure_minutes: summary.departure_minutes,
                    finish_minutes: summary.finish_minutes,
                    path: Polyline::for_route(agent, outlets, &route),
                });
            }

            context.store.replace(agent_index, slot, route)?;
        }

        let shortfalls: Vec<ShortfallEntry> = outlets
            .iter()
            .enumerate()
            .filter_map(|(outlet, record)| {
                let missing = context.shortfall(outlet);
                (missing > 0).then(|| ShortfallEntry {
                    outlet_code: record.code.clone(),
                    shortfall_count: missing,
                })
            })
            .collect();

        Ok(JourneyPlan {
            has_shortfall: !shortfalls.is_empty(),
            plan,
            shortfalls,
            routes,
        })
    }
}
