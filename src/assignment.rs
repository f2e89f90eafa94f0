//! Greedy placement of outlet visits onto agent days.
//!
//! Visits are placed one at a time, outlet by outlet, in input order. Each
//! placement is final.

use tracing::debug;

use crate::error::PlannerError;
use crate::evaluator::format_clock;
use crate::model::{Agent, DaySlot};
use crate::optimizer::RouteOptimizer;
use crate::schedule::DayScheduleStore;
use crate::solver::SchedulingContext;
use crate::traits::TravelModel;

/// An accepted placement for one visit.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotCandidate {
    pub agent: usize,
    pub slot: DaySlot,
    pub score: f64,
    /// Finish time of the optimized day including the new visit.
    pub finish_minutes: f64,
}

#[derive(Debug)]
pub struct AssignmentEngine<'a, M: TravelModel> {
    optimizer: RouteOptimizer<'a, M>,
    agents: &'a [Agent],
}

impl<'a, M: TravelModel> AssignmentEngine<'a, M> {
    pub fn new(optimizer: RouteOptimizer<'a, M>, agents: &'a [Agent]) -> Self {
        Self { optimizer, agents }
    }

    /// Places every required visit of every outlet, decrementing the
    /// context's remaining-visit counters for each one placed.
    pub fn run(&self, context: &mut SchedulingContext) -> Result<(), PlannerError> {
        let outlets = self.optimizer.evaluator().outlets();

        for (outlet, record) in outlets.iter().enumerate() {
            for visit in 0..record.frequency {
                match self.assign_visit(&mut context.store, outlet)? {
                    Some(_) => context.remaining[outlet] -= 1,
                    None => debug!(outlet = %record.code, visit = visit + 1, "no suitable day found"),
                }
            }

            if context.remaining[outlet] > 0 {
                debug!(
                    outlet = %record.code,
                    scheduled = record.frequency - context.remaining[outlet],
                    required = record.frequency,
                    "outlet short of visits"
                );
            }
        }

        Ok(())
    }

    /// Commits one visit of `outlet` to the best accepted day, if any.
    pub fn assign_visit(
        &self,
        store: &mut DayScheduleStore,
        outlet: usize,
    ) -> Result<Option<SlotCandidate>, PlannerError> {
        let Some(best) = self.best_slot(store, outlet) else {
            return Ok(None);
        };

        store.append(best.agent, best.slot, outlet)?;
        debug!(
            outlet = %self.optimizer.evaluator().outlets()[outlet].code,
            agent = %self.agents[best.agent].name,
            slot = %best.slot,
            score = best.score,
            "assigned visit"
        );

        Ok(Some(best))
    }

    /// Lowest scoring accepted day; earlier agents and slots win ties.
    pub fn best_slot(&self, store: &DayScheduleStore, outlet: usize) -> Option<SlotCandidate> {
        let evaluator = self.optimizer.evaluator();
        let config = evaluator.config();
        let model = evaluator.model();
        let location = evaluator.outlets()[outlet].location;
        let max_distance = config.max_one_way_distance_km();

        let mut best: Option<SlotCandidate> = None;

        for (agent_index, agent) in self.agents.iter().enumerate() {
            let distance = model.distance_km(agent.start, location);
            if distance > max_distance {
                debug!(
                    outlet = %evaluator.outlets()[outlet].code,
                    agent = %agent.name,
                    distance,
                    max_distance,
                    "outlet out of reach"
                );
                continue;
            }

            for (slot, day) in store.slots(agent_index) {
                let Some(candidate) = self.evaluate_slot(agent_index, slot, day, outlet, distance) else {
                    continue;
                };

                if best.as_ref().is_none_or(|current| candidate.score < current.score) {
                    best = Some(candidate);
                }
            }
        }

        best
    }

    fn evaluate_slot(
        &self,
        agent_index: usize,
        slot: DaySlot,
        day: &[usize],
        outlet: usize,
        distance: f64,
    ) -> Option<SlotCandidate> {
        let evaluator = self.optimizer.evaluator();
        let config = evaluator.config();
        let tuning = &config.tuning;
        let agent = &self.agents[agent_index];

        let mut candidate_day = day.to_vec();
        candidate_day.push(outlet);
        let optimized = self.optimizer.optimize(agent, &candidate_day);

        let already_there = day.iter().filter(|&&existing| existing == outlet).count();
        let kept = optimized.route.iter().filter(|&&placed| placed == outlet).count();
        if kept <= already_there {
            debug!(
                outlet = %evaluator.outlets()[outlet].code,
                agent = %agent.name,
                slot = %slot,
                "outlet removed during optimization"
            );
            return None;
        }

        let finish_minutes = evaluator.finish_minutes(agent, &optimized.route);
        if finish_minutes > config.assignment_deadline_minutes() || !evaluator.is_feasible(agent, &optimized.route) {
            return None;
        }

        let travel = evaluator.model().travel_minutes(agent.start, evaluator.outlets()[outlet].location);
        let load = day.len() as f64 * tuning.load_weight;
        let distance_penalty = if distance > tuning.distance_penalty_radius_km {
            (distance / tuning.distance_penalty_radius_km).powi(2) * tuning.distance_penalty_weight
        } else {
            0.0
        };
        let score = travel + load + distance_penalty;

        debug!(
            outlet = %evaluator.outlets()[outlet].code,
            agent = %agent.name,
            slot = %slot,
            finish = %format_clock(finish_minutes),
            score,
            "potential assignment"
        );

        Some(SlotCandidate {
            agent: agent_index,
            slot,
            score,
            finish_minutes,
        })
    }
}
