//! Safety rule engine.
//!
//! Maps observation risk flags and plan action text to required PPE, named
//! hazards and mandatory pre-steps. Sets keep first-insertion order so the
//! same inputs always render the same lists.

use ff_core::contracts::{PlanStep, SafetyPayload};
use indexmap::IndexSet;

const BASELINE_PPE: [&str; 2] = ["safety glasses", "work gloves"];

const ELECTRICAL_WORDS: [&str; 5] = [
    "open panel",
    "wiring",
    "multimeter",
    "power module",
    "electrical",
];
const FIRE_WORDS: [&str; 3] = ["fire", "smoke", "flame"];
const HEIGHT_WORDS: [&str; 3] = ["height", "ladder", "roof"];

const LOCKOUT: &str = "Lockout/Tagout";
const INSULATED_GLOVES: &str = "insulated gloves";
const STOP_WORK: &str = "STOP WORK: call emergency services and follow site fire protocol";

/// What the engine looks at.
#[derive(Debug, Clone, Copy)]
pub struct SafetyInput<'a> {
    pub risk_flags: &'a [String],
    pub steps: &'a [PlanStep],
}

#[derive(Default)]
struct Findings {
    ppe: IndexSet<String>,
    hazards: IndexSet<String>,
    presteps: IndexSet<String>,
}

impl Findings {
    fn add(&mut self, hazard: &str, prestep: &str, ppe: &[&str]) {
        self.hazards.insert(hazard.to_string());
        self.presteps.insert(prestep.to_string());
        for item in ppe {
            self.ppe.insert((*item).to_string());
        }
    }
}

/// Evaluate the rule table.
///
/// `pass` is false only when a fire indicator appears in a flag or in the
/// plan text. Every other hazard adds requirements but still passes.
#[must_use]
pub fn evaluate_safety(input: SafetyInput<'_>) -> SafetyPayload {
    let mut found = Findings::default();
    for item in BASELINE_PPE {
        found.ppe.insert(item.to_string());
    }

    for flag in input.risk_flags {
        let flag = flag.to_lowercase();
        if flag.contains("water") && flag.contains("power") {
            found.add("electrocution", "Isolate power & keep area dry", &[INSULATED_GLOVES]);
        }
        if flag.contains("exposed") && flag.contains("wire") {
            found.add("electrical shock", LOCKOUT, &[INSULATED_GLOVES]);
        }
        if flag.contains("heavy") {
            found.add("crushing injury", "Use proper lifting equipment", &["steel-toe boots"]);
        }
        if flag.contains("chemical") {
            found.add(
                "chemical exposure",
                "Review chemical SDS",
                &["chemical-resistant gloves", "safety goggles"],
            );
        }
    }

    let plan_text = input
        .steps
        .iter()
        .map(|s| s.action.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ");
    let mentions = |words: &[&str]| words.iter().any(|w| plan_text.contains(w));

    if mentions(&ELECTRICAL_WORDS) {
        found.add("electrical hazard", LOCKOUT, &[INSULATED_GLOVES]);
    }

    let fire_flag = input.risk_flags.iter().any(|flag| {
        let flag = flag.to_lowercase();
        FIRE_WORDS.iter().any(|w| flag.contains(w))
    });
    let pass = !(fire_flag || mentions(&FIRE_WORDS));
    if !pass {
        found.add("fire hazard", STOP_WORK, &[]);
    }

    if mentions(&HEIGHT_WORDS) {
        found.add("fall hazard", "Secure ladder and use fall protection", &["harness"]);
    }

    tracing::debug!(
        pass,
        hazards = found.hazards.len(),
        presteps = found.presteps.len(),
        "safety rules evaluated"
    );

    SafetyPayload {
        pass,
        ppe_required: normalize(found.ppe),
        hazards: normalize(found.hazards),
        required_presteps: normalize(found.presteps),
    }
}

fn normalize(items: IndexSet<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn step(action: &str) -> PlanStep {
        PlanStep {
            step_number: 1,
            action: action.into(),
            duration: 10.0,
            citations: vec!["X".into()],
        }
    }

    fn run(flags: &[&str], actions: &[&str]) -> SafetyPayload {
        let flags: Vec<String> = flags.iter().map(|f| (*f).to_string()).collect();
        let steps: Vec<PlanStep> = actions.iter().map(|a| step(a)).collect();
        evaluate_safety(SafetyInput {
            risk_flags: &flags,
            steps: &steps,
        })
    }

    #[test]
    fn no_triggers_yields_baseline_only() {
        let out = run(&["reduced_airflow"], &["Replace the air filter"]);
        assert_eq!(
            out,
            SafetyPayload {
                pass: true,
                ppe_required: vec!["safety glasses".into(), "work gloves".into()],
                hazards: vec![],
                required_presteps: vec![],
            }
        );
    }

    #[rstest]
    #[case::water_power(&["water_near_power"], &[], "electrocution", "Isolate power & keep area dry", &["insulated gloves"])]
    #[case::exposed_wires(&["exposed_wires"], &[], "electrical shock", "Lockout/Tagout", &["insulated gloves"])]
    #[case::heavy(&["heavy_equipment"], &[], "crushing injury", "Use proper lifting equipment", &["steel-toe boots"])]
    #[case::chemical(&["chemical_leak"], &[], "chemical exposure", "Review chemical SDS", &["chemical-resistant gloves", "safety goggles"])]
    #[case::panel(&[], &["Open panel and inspect"], "electrical hazard", "Lockout/Tagout", &["insulated gloves"])]
    #[case::multimeter(&[], &["Test with a MULTIMETER"], "electrical hazard", "Lockout/Tagout", &["insulated gloves"])]
    #[case::ladder(&[], &["Climb the ladder to the roof unit"], "fall hazard", "Secure ladder and use fall protection", &["harness"])]
    fn passing_triggers(
        #[case] flags: &[&str],
        #[case] actions: &[&str],
        #[case] hazard: &str,
        #[case] prestep: &str,
        #[case] ppe: &[&str],
    ) {
        let out = run(flags, actions);
        assert!(out.pass);
        assert_eq!(out.hazards, vec![hazard.to_string()]);
        assert_eq!(out.required_presteps, vec![prestep.to_string()]);
        for item in ppe {
            assert!(out.ppe_required.contains(&(*item).to_string()), "missing {item}");
        }
        assert_eq!(&out.ppe_required[..2], &["safety glasses", "work gloves"]);
    }

    #[rstest]
    #[case::flag(&["fire_damage"], &["Inspect unit"])]
    #[case::smoke_in_plan(&[], &["Check for smoke near the motor"])]
    #[case::flame_flag(&["open_flame"], &[])]
    fn fire_fails_with_stop_work(#[case] flags: &[&str], #[case] actions: &[&str]) {
        let out = run(flags, actions);
        assert!(!out.pass);
        assert!(out.hazards.contains(&"fire hazard".to_string()));
        assert!(out.required_presteps.contains(&STOP_WORK.to_string()));
    }

    #[test]
    fn heavy_equipment_alone_still_passes() {
        assert!(run(&["heavy_equipment"], &["Lift motor"]).pass);
    }

    #[test]
    fn shared_prestep_is_listed_once() {
        let out = run(&["exposed_wires"], &["Inspect wiring in junction box"]);
        assert_eq!(out.required_presteps, vec!["Lockout/Tagout".to_string()]);
        assert_eq!(
            out.hazards,
            vec!["electrical shock".to_string(), "electrical hazard".to_string()]
        );
        let gloves = out.ppe_required.iter().filter(|p| *p == "insulated gloves").count();
        assert_eq!(gloves, 1);
    }

    #[test]
    fn pump_scenario_collects_everything_in_order() {
        let out = run(
            &["water_near_power", "exposed_wires", "heavy_equipment"],
            &["Isolate power", "Replace wiring connectors"],
        );
        assert!(out.pass);
        assert_eq!(
            out.hazards,
            vec!["electrocution", "electrical shock", "crushing injury", "electrical hazard"]
        );
        assert_eq!(
            out.required_presteps,
            vec![
                "Isolate power & keep area dry",
                "Lockout/Tagout",
                "Use proper lifting equipment"
            ]
        );
        assert_eq!(
            out.ppe_required,
            vec!["safety glasses", "work gloves", "insulated gloves", "steel-toe boots"]
        );
    }

    #[test]
    fn evaluation_is_deterministic() {
        let flags = ["water_near_power", "chemical_spill", "smoke_visible"];
        let actions = ["Climb ladder", "Open panel"];
        let first = run(&flags, &actions);
        for _ in 0..10 {
            assert_eq!(run(&flags, &actions), first);
        }
    }
}
