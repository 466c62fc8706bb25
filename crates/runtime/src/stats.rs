//! Travel statistics gathered for the end-of-run report.
//!
//! Not decision-relevant: roles never read these numbers.
use std::fmt;

use arena_core::{AgentId, CargoFill, Point, TeamId};
use serde::Serialize;

/// Distance travelled per cargo fill state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct TravelStats {
    pub empty: f64,
    pub partial: f64,
    pub full: f64,
}

impl TravelStats {
    pub fn record(&mut self, fill: CargoFill, distance: f64) {
        match fill {
            CargoFill::Empty => self.empty += distance,
            CargoFill::Partial => self.partial += distance,
            CargoFill::Full => self.full += distance,
        }
    }

    pub fn total(&self) -> f64 {
        self.empty + self.partial + self.full
    }

    fn absorb(&mut self, other: &TravelStats) {
        self.empty += other.empty;
        self.partial += other.partial;
        self.full += other.full;
    }
}

/// Odometer of one agent: accumulated stats plus the point the current leg
/// started from.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TravelLog {
    stats: TravelStats,
    mark: Option<Point>,
}

impl TravelLog {
    /// Starts a new leg at `position` without recording anything.
    pub fn mark(&mut self, position: Point) {
        self.mark = Some(position);
    }

    /// Closes the current leg at `position`, bucketed by `fill`, and opens
    /// the next one there.
    pub fn record_leg(&mut self, position: Point, fill: CargoFill) {
        if let Some(start) = self.mark {
            self.stats.record(fill, start.distance_to_point(position));
        }
        self.mark = Some(position);
    }

    pub fn stats(&self) -> TravelStats {
        self.stats
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct MemberReport {
    pub agent: AgentId,
    pub travel: TravelStats,
}

/// Team-wide travel report.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TeamReport {
    pub team: TeamId,
    pub members: Vec<MemberReport>,
    pub totals: TravelStats,
}

impl TeamReport {
    pub fn new(team: TeamId, members: Vec<MemberReport>) -> Self {
        let mut totals = TravelStats::default();
        for member in &members {
            totals.absorb(&member.travel);
        }
        Self {
            team,
            members,
            totals,
        }
    }
}

impl fmt::Display for TeamReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: travelled {:.0} full, {:.0} partially loaded, {:.0} empty",
            self.team, self.totals.full, self.totals.partial, self.totals.empty
        )
    }
}
