//! Domain records shared by every planning stage.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};

use crate::error::PlannerError;
use crate::polyline::Polyline;

/// A point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    /// Builds a location, rejecting NaN and infinite coordinates.
    pub fn try_new(lat: f64, lng: f64) -> Result<Self, PlannerError> {
        if !lat.is_finite() || !lng.is_finite() {
            return Err(PlannerError::NonFiniteCoordinate { lat, lng });
        }
        Ok(Self { lat, lng })
    }

    pub fn coords(&self) -> (f64, f64) {
        (self.lat, self.lng)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// The six schedulable days of a planning week.
    pub const WORK_WEEK: [Weekday; 6] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Weekday {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Monday" => Ok(Weekday::Monday),
            "Tuesday" => Ok(Weekday::Tuesday),
            "Wednesday" => Ok(Weekday::Wednesday),
            "Thursday" => Ok(Weekday::Thursday),
            "Friday" => Ok(Weekday::Friday),
            "Saturday" => Ok(Weekday::Saturday),
            "Sunday" => Ok(Weekday::Sunday),
            _ => Err(()),
        }
    }
}

/// Week of the four-week planning cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Week {
    First,
    Second,
    Third,
    Fourth,
}

impl Week {
    pub const ALL: [Week; 4] = [Week::First, Week::Second, Week::Third, Week::Fourth];

    pub fn label(&self) -> &'static str {
        match self {
            Week::First => "1st",
            Week::Second => "2nd",
            Week::Third => "3rd",
            Week::Fourth => "4th",
        }
    }
}

/// One schedulable day of the horizon, e.g. "2nd Thursday".
///
/// Ordering follows the horizon: week first, then weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DaySlot {
    pub week: Week,
    pub day: Weekday,
}

impl DaySlot {
    pub fn new(week: Week, day: Weekday) -> Self {
        Self { week, day }
    }

    /// Every slot of the horizon not falling on `day_off`, in horizon order.
    pub fn horizon(day_off: Weekday) -> impl Iterator<Item = DaySlot> {
        Week::ALL.into_iter().flat_map(move |week| {
            Weekday::WORK_WEEK
                .into_iter()
                .filter(move |day| *day != day_off)
                .map(move |day| DaySlot::new(week, day))
        })
    }
}

impl fmt::Display for DaySlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.week.label(), self.day)
    }
}

impl Serialize for DaySlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A visit target with a required number of visits per cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Outlet {
    pub code: String,
    pub location: Location,
    pub frequency: u32,
}

impl Outlet {
    pub fn new(code: impl Into<String>, location: Location, frequency: u32) -> Self {
        Self {
            code: code.into(),
            location,
            frequency,
        }
    }
}

/// A mobile worker ("user") with fixed start/end points and a weekly day off.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub name: String,
    pub start: Location,
    pub end: Location,
    pub day_off: Weekday,
}

impl Agent {
    pub fn new(name: impl Into<String>, start: Location, end: Location, day_off: Weekday) -> Self {
        Self {
            name: name.into(),
            start,
            end,
            day_off,
        }
    }

    pub fn day_slots(&self) -> impl Iterator<Item = DaySlot> {
        DaySlot::horizon(self.day_off)
    }
}

/// One visit of the final plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanEntry {
    pub agent_name: String,
    pub day_slot_label: DaySlot,
    /// 1-based position in the day route.
    pub position: usize,
    pub outlet_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortfallEntry {
    pub outlet_code: String,
    pub shortfall_count: u32,
}

/// Timing summary of one final day route.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayRouteSummary {
    pub agent_name: String,
    pub day_slot_label: DaySlot,
    pub outlets: usize,
    pub road_distance_km: f64,
    pub travel_minutes: f64,
    pub service_minutes: f64,
    /// Suggested leaving time, minutes since midnight.
    pub departure_minutes: f64,
    /// Minutes since midnight.
    pub finish_minutes: f64,
    pub path: Polyline,
}

/// The finished plan handed to export and visualization.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyPlan {
    pub plan: Vec<PlanEntry>,
    pub shortfalls: Vec<ShortfallEntry>,
    pub has_shortfall: bool,
    pub routes: Vec<DayRouteSummary>,
}

impl JourneyPlan {
    /// Number of plan entries for the given outlet code.
    pub fn scheduled_visits(&self, outlet_code: &str) -> usize {
        self.plan
            .iter()
            .filter(|entry| entry.outlet_code == outlet_code)
            .count()
    }

    pub fn shortfall_for(&self, outlet_code: &str) -> u32 {
        self.shortfalls
            .iter()
            .find(|entry| entry.outlet_code == outlet_code)
            .map(|entry| entry.shortfall_count)
            .unwrap_or(0)
    }

    /// Outlet codes of one agent's day in route order.
    pub fn route_for(&self, agent_name: &str, slot: DaySlot) -> Vec<&str> {
        let mut entries: Vec<&PlanEntry> = self
            .plan
            .iter()
            .filter(|entry| entry.agent_name == agent_name && entry.day_slot_label == slot)
            .collect();
        entries.sort_by_key(|entry| entry.position);
        entries.iter().map(|entry| entry.outlet_code.as_str()).collect()
    }
}
