//! Scenario keys and their canned observations.
//!
//! A scenario key (`scenario1`, `scenario2`, ...) selects both the mock
//! observation Analyze falls back to and the static plan Plan falls back to.

use std::sync::LazyLock;

use ff_core::contracts::ObservationPayload;
use regex::Regex;

pub const DEFAULT_SCENARIO: &str = "scenario1";

static SCENARIO_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"scenario(\d+)").expect("scenario pattern is valid"));

/// `scenarioN` found anywhere in `text`.
#[must_use]
pub fn scenario_key(text: &str) -> Option<String> {
    SCENARIO_KEY
        .captures(text)
        .map(|caps| format!("scenario{}", &caps[1]))
}

/// Scenario for Analyze: the image path wins, then the session tag, then
/// [`DEFAULT_SCENARIO`].
#[must_use]
pub fn resolve_scenario(image_path: &str, session_scenario: &str) -> String {
    scenario_key(image_path)
        .or_else(|| scenario_key(session_scenario))
        .unwrap_or_else(|| DEFAULT_SCENARIO.to_string())
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

/// Canned observation for a scenario. Unknown keys get the HVAC unit.
#[must_use]
pub fn mock_observation(scenario: &str) -> ObservationPayload {
    match scenario {
        "scenario2" => ObservationPayload {
            equipment_type: "Backup Generator".into(),
            problem_summary: "Generator fails to start during test cycle. Control panel shows no fault codes. Battery connections appear corroded. Fuel level adequate but age of fuel unknown.".into(),
            risk_flags: strings(&["electrical_components", "fuel_system"]),
            environmental_notes: Some("Outdoor installation, some weather exposure visible".into()),
        },
        "scenario3" => ObservationPayload {
            equipment_type: "Industrial Water Pump".into(),
            problem_summary: "Water pump showing active leak near seal area with visible water accumulation. Pump is located adjacent to electrical panel creating serious hazard. Exposed wiring visible in junction box. Motor casing shows water damage and corrosion.".into(),
            risk_flags: strings(&["water_near_power", "exposed_wires", "heavy_equipment"]),
            environmental_notes: Some("Wet floor conditions, electrical panel within splash zone, immediate safety concern".into()),
        },
        _ => ObservationPayload {
            equipment_type: "Commercial HVAC Air Conditioning Unit".into(),
            problem_summary: "Unit showing signs of overheating with reduced airflow. Visible dirt buildup on condenser coils and air filter appears clogged. Fan motor running but airflow significantly reduced.".into(),
            risk_flags: strings(&["overheating", "reduced_airflow"]),
            environmental_notes: Some("Indoor installation, ambient temperature elevated near unit".into()),
        },
    }
}
