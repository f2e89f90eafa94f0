//! Per-agent, per-day outlet lists for the whole planning horizon.
//!
//! Agents and outlets are referred to by their index in the run's input
//! slices.

use std::collections::BTreeMap;

use crate::error::PlannerError;
use crate::model::{Agent, DaySlot};

#[derive(Debug, Clone)]
struct AgentSchedule {
    name: String,
    days: BTreeMap<DaySlot, Vec<usize>>,
}

#[derive(Debug, Clone, Default)]
pub struct DayScheduleStore {
    agents: Vec<AgentSchedule>,
}

impl DayScheduleStore {
    /// One empty list for every slot of every agent, day off excluded.
    pub fn new(agents: &[Agent]) -> Self {
        let agents = agents
            .iter()
            .map(|agent| AgentSchedule {
                name: agent.name.clone(),
                days: agent.day_slots().map(|slot| (slot, Vec::new())).collect(),
            })
            .collect();

        Self { agents }
    }

    pub fn append(&mut self, agent: usize, slot: DaySlot, outlet: usize) -> Result<(), PlannerError> {
        self.day_mut(agent, slot)?.push(outlet);
        Ok(())
    }

    pub fn get(&self, agent: usize, slot: DaySlot) -> Option<&[usize]> {
        self.agents
            .get(agent)
            .and_then(|schedule| schedule.days.get(&slot))
            .map(Vec::as_slice)
    }

    /// Swaps in a new list for the day and returns the previous one.
    pub fn replace(
        &mut self,
        agent: usize,
        slot: DaySlot,
        outlets: Vec<usize>,
    ) -> Result<Vec<usize>, PlannerError> {
        Ok(std::mem::replace(self.day_mut(agent, slot)?, outlets))
    }

    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    /// Slots of one agent in horizon order.
    pub fn slots(&self, agent: usize) -> impl Iterator<Item = (DaySlot, &[usize])> {
        self.agents
            .get(agent)
            .into_iter()
            .flat_map(|schedule| schedule.days.iter())
            .map(|(slot, outlets)| (*slot, outlets.as_slice()))
    }

    /// Every (agent, slot) pair, agents in input order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, DaySlot, &[usize])> {
        self.agents.iter().enumerate().flat_map(|(agent, schedule)| {
            schedule
                .days
                .iter()
                .map(move |(slot, outlets)| (agent, *slot, outlets.as_slice()))
        })
    }

    pub fn total_visits(&self) -> usize {
        self.iter().map(|(_, _, outlets)| outlets.len()).sum()
    }

    fn day_mut(&mut self, agent: usize, slot: DaySlot) -> Result<&mut Vec<usize>, PlannerError> {
        let schedule = self
            .agents
            .get_mut(agent)
            .ok_or_else(|| PlannerError::UnknownDaySlot {
                agent: format!("#{agent}"),
                slot,
            })?;
        let name = &schedule.name;
        schedule
            .days
            .get_mut(&slot)
            .ok_or_else(|| PlannerError::UnknownDaySlot {
                agent: name.clone(),
                slot,
            })
    }
}
