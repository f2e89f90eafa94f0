//! Journey planning run: assignment followed by finalization.

use tracing::info;

use crate::assignment::AssignmentEngine;
use crate::config::PlannerConfig;
use crate::error::PlannerError;
use crate::evaluator::RouteTimeEvaluator;
use crate::finalizer::PlanFinalizer;
use crate::haversine::HaversineModel;
use crate::input::validate_records;
use crate::model::{Agent, JourneyPlan, Outlet};
use crate::optimizer::RouteOptimizer;
use crate::schedule::DayScheduleStore;
use crate::traits::TravelModel;

/// Mutable state of one planning run.
#[derive(Debug, Clone)]
pub struct SchedulingContext {
    pub store: DayScheduleStore,
    /// Visits per outlet still waiting for a day.
    pub remaining: Vec<u32>,
    /// Visits per outlet removed again during finalization.
    pub dropped: Vec<u32>,
}

impl SchedulingContext {
    pub fn new(outlets: &[Outlet], agents: &[Agent]) -> Self {
        Self {
            store: DayScheduleStore::new(agents),
            remaining: outlets.iter().map(|outlet| outlet.frequency).collect(),
            dropped: vec![0; outlets.len()],
        }
    }

    pub fn shortfall(&self, outlet: usize) -> u32 {
        self.remaining[outlet] + self.dropped[outlet]
    }
}

/// Plans with the great-circle travel model configured by `config`.
pub fn plan_journeys(
    outlets: &[Outlet],
    agents: &[Agent],
    config: &PlannerConfig,
) -> Result<JourneyPlan, PlannerError> {
    let model = HaversineModel::from_config(config);
    plan_journeys_with(&model, outlets, agents, config)
}

pub fn plan_journeys_with<M: TravelModel>(
    model: &M,
    outlets: &[Outlet],
    agents: &[Agent],
    config: &PlannerConfig,
) -> Result<JourneyPlan, PlannerError> {
    config.validate()?;
    validate_records(outlets, agents)?;

    info!(outlets = outlets.len(), agents = agents.len(), "starting outlet distribution");

    let evaluator = RouteTimeEvaluator::new(model, config, outlets);
    let optimizer = RouteOptimizer::new(evaluator);
    let mut context = SchedulingContext::new(outlets, agents);

    AssignmentEngine::new(optimizer, agents).run(&mut context)?;
    info!(assigned = context.store.total_visits(), "assignment finished");

    let plan = PlanFinalizer::new(optimizer, agents).run(&mut context)?;
    info!(
        entries = plan.plan.len(),
        short_outlets = plan.shortfalls.len(),
        "journey plan generated"
    );

    Ok(plan)
}
