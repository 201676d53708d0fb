//! Risk annotation from port congestion and weather.

use std::fmt;

use serde::Serialize;

use crate::constants::{HEAVY_CONGESTION_THRESHOLD, HIGH_WIND_THRESHOLD_KMH};
use crate::providers::WeatherReport;

/// Conditions observed at one port of a route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortConditions {
    pub port: String,
    pub congestion: f64,
    pub weather: WeatherReport,
}

/// A hazard detected at a port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RiskIssue {
    HeavyCongestion { port: String },
    HighWinds { port: String },
}

impl RiskIssue {
    /// Recommended action for the issue.
    pub fn precaution(&self) -> &'static str {
        match self {
            RiskIssue::HeavyCongestion { .. } => "Adjust schedule or reroute",
            RiskIssue::HighWinds { .. } => "Reduce speed",
        }
    }
}

impl fmt::Display for RiskIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskIssue::HeavyCongestion { port } => write!(f, "Heavy congestion at {port}"),
            RiskIssue::HighWinds { port } => write!(f, "High winds near {port}"),
        }
    }
}

/// Issues and their precautions, index-aligned.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RiskAssessment {
    pub issues: Vec<String>,
    pub precautions: Vec<String>,
}

impl RiskAssessment {
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    fn push(&mut self, issue: RiskIssue) {
        self.precautions.push(issue.precaution().to_string());
        self.issues.push(issue.to_string());
    }
}

/// Issues raised by a single port; congestion is reported before wind.
pub fn port_risks(conditions: &PortConditions) -> Vec<RiskIssue> {
    let mut issues = Vec::new();
    if conditions.congestion > HEAVY_CONGESTION_THRESHOLD {
        issues.push(RiskIssue::HeavyCongestion {
            port: conditions.port.clone(),
        });
    }
    if conditions
        .weather
        .max_wind_speed()
        .is_some_and(|wind| wind > HIGH_WIND_THRESHOLD_KMH)
    {
        issues.push(RiskIssue::HighWinds {
            port: conditions.port.clone(),
        });
    }
    issues
}

/// Annotate a route whose ports are given in traversal order.
///
/// Ports without a forecast, or with an empty wind series, only contribute
/// congestion issues.
pub fn annotate_risks(route: &[PortConditions]) -> RiskAssessment {
    let mut assessment = RiskAssessment::default();
    for issue in route.iter().flat_map(port_risks) {
        assessment.push(issue);
    }
    assessment
}
