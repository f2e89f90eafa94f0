//! Validation of parsed spreadsheet rows into planner records.
//!
//! Rows arrive with every column optional and every cell either numeric or
//! textual. Validation fails on the first bad row, before any scheduling.

use std::collections::HashSet;

use serde::Deserialize;

use crate::error::PlannerError;
use crate::model::{Agent, Location, Outlet, Weekday};

const OUTLETS_SHEET: &str = "Outlets";
const USERS_SHEET: &str = "Users";

/// A spreadsheet cell value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
}

impl Cell {
    /// Trimmed textual form; `None` when blank.
    fn text(&self) -> Option<String> {
        let text = match self {
            Cell::Number(value) => value.to_string(),
            Cell::Text(value) => value.trim().to_string(),
        };
        (!text.is_empty()).then_some(text)
    }

    fn number(&self) -> Option<f64> {
        match self {
            Cell::Number(value) => Some(*value),
            Cell::Text(value) => value.trim().parse::<f64>().ok(),
        }
        .filter(|value| value.is_finite())
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct OutletRecord {
    pub code: Option<Cell>,
    pub latitude: Option<Cell>,
    pub longitude: Option<Cell>,
    pub frequency: Option<Cell>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AgentRecord {
    pub name: Option<Cell>,
    /// "<lat> <lng>"
    pub start_location: Option<Cell>,
    pub end_location: Option<Cell>,
    pub week_off_day: Option<Cell>,
}

/// Both sheets of one planning workbook.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlanningInput {
    pub outlets: Vec<OutletRecord>,
    pub users: Vec<AgentRecord>,
}

pub fn validate_input(input: &PlanningInput) -> Result<(Vec<Outlet>, Vec<Agent>), PlannerError> {
    let outlets = validate_outlets(&input.outlets)?;
    let agents = validate_agents(&input.users)?;
    Ok((outlets, agents))
}

pub fn validate_outlets(records: &[OutletRecord]) -> Result<Vec<Outlet>, PlannerError> {
    if records.is_empty() {
        return Err(PlannerError::NoOutlets);
    }

    let mut seen = HashSet::new();
    let mut outlets = Vec::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        let row = index + 2;
        let code = required(OUTLETS_SHEET, row, "Outlet Code", &record.code)?;
        let lat = numeric(OUTLETS_SHEET, row, "Latitude", &record.latitude)?;
        let lng = numeric(OUTLETS_SHEET, row, "Longitude", &record.longitude)?;
        let frequency = numeric(OUTLETS_SHEET, row, "Visit Frequency", &record.frequency)?;

        if frequency <= 0.0 {
            return Err(PlannerError::NonPositiveFrequency {
                row,
                value: frequency.to_string(),
            });
        }
        if frequency.fract() != 0.0 || frequency > u32::MAX as f64 {
            return Err(PlannerError::InvalidNumber {
                sheet: OUTLETS_SHEET,
                row,
                field: "Visit Frequency",
                value: frequency.to_string(),
            });
        }

        if !seen.insert(code.clone()) {
            return Err(PlannerError::DuplicateOutlet(code));
        }

        outlets.push(Outlet::new(code, Location::try_new(lat, lng)?, frequency as u32));
    }

    Ok(outlets)
}

pub fn validate_agents(records: &[AgentRecord]) -> Result<Vec<Agent>, PlannerError> {
    if records.is_empty() {
        return Err(PlannerError::NoAgents);
    }

    let mut seen = HashSet::new();
    let mut agents = Vec::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        let row = index + 2;
        let name = required(USERS_SHEET, row, "User Name", &record.name)?;
        let start = required(USERS_SHEET, row, "Start Location", &record.start_location)?;
        let end = required(USERS_SHEET, row, "End Location", &record.end_location)?;
        let day_off = required(USERS_SHEET, row, "Week Off Day", &record.week_off_day)?;

        let day_off = day_off
            .parse::<Weekday>()
            .map_err(|_| PlannerError::InvalidDayOff { row, value: day_off })?;
        let start = parse_location(row, "Start Location", &start)?;
        let end = parse_location(row, "End Location", &end)?;

        if !seen.insert(name.clone()) {
            return Err(PlannerError::DuplicateAgent(name));
        }

        agents.push(Agent::new(name, start, end, day_off));
    }

    Ok(agents)
}

/// Checks already typed records: non-empty, unique and with positive
/// frequencies.
pub fn validate_records(outlets: &[Outlet], agents: &[Agent]) -> Result<(), PlannerError> {
    if outlets.is_empty() {
        return Err(PlannerError::NoOutlets);
    }
    if agents.is_empty() {
        return Err(PlannerError::NoAgents);
    }

    let mut codes = HashSet::new();
    for (index, outlet) in outlets.iter().enumerate() {
        if outlet.frequency == 0 {
            return Err(PlannerError::NonPositiveFrequency {
                row: index + 2,
                value: outlet.frequency.to_string(),
            });
        }
        if !codes.insert(outlet.code.as_str()) {
            return Err(PlannerError::DuplicateOutlet(outlet.code.clone()));
        }
    }

    let mut names = HashSet::new();
    for agent in agents {
        if !names.insert(agent.name.as_str()) {
            return Err(PlannerError::DuplicateAgent(agent.name.clone()));
        }
    }

    Ok(())
}

/// Parses a whitespace separated "<lat> <lng>" pair.
pub fn parse_location(row: usize, field: &'static str, value: &str) -> Result<Location, PlannerError> {
    let invalid = || PlannerError::InvalidLocation {
        row,
        field,
        value: value.to_string(),
    };

    let parts: Vec<&str> = value.split_whitespace().collect();
    let [lat, lng] = parts.as_slice() else {
        return Err(invalid());
    };
    let lat = lat.parse::<f64>().map_err(|_| invalid())?;
    let lng = lng.parse::<f64>().map_err(|_| invalid())?;

    Location::try_new(lat, lng).map_err(|_| invalid())
}

fn required(
    sheet: &'static str,
    row: usize,
    field: &'static str,
    cell: &Option<Cell>,
) -> Result<String, PlannerError> {
    cell.as_ref()
        .and_then(Cell::text)
        .ok_or(PlannerError::MissingField { sheet, row, field })
}

fn numeric(
    sheet: &'static str,
    row: usize,
    field: &'static str,
    cell: &Option<Cell>,
) -> Result<f64, PlannerError> {
    let text = required(sheet, row, field, cell)?;
    cell.as_ref()
        .and_then(Cell::number)
        .ok_or(PlannerError::InvalidNumber {
            sheet,
            row,
            field,
            value: text,
        })
}
