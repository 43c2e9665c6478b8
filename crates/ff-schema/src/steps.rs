//! Step-order and duration rules the plan schema cannot express.

use ff_core::contracts::PlanPayload;

use crate::error::{SchemaError, Violation};
use crate::registry::PLAN;

/// Steps must be numbered 1, 2, 3, ... in array order and take a positive
/// number of minutes.
///
/// # Errors
///
/// Returns `SchemaError::ValidationFailed` with one violation per offending
/// field, located like schema violations (`/steps/<index>/<field>`).
pub fn check_plan_steps(plan: &PlanPayload) -> Result<(), SchemaError> {
    let mut violations = Vec::new();
    for (index, step) in plan.steps.iter().enumerate() {
        let expected = index + 1;
        if usize::try_from(step.step_number).ok() != Some(expected) {
            violations.push(Violation {
                path: format!("/steps/{index}/stepNumber"),
                message: format!("expected step {expected}, got {}", step.step_number),
            });
        }
        if step.duration.is_nan() || step.duration <= 0.0 {
            violations.push(Violation {
                path: format!("/steps/{index}/duration"),
                message: format!("{} is not a positive number of minutes", step.duration),
            });
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(SchemaError::ValidationFailed {
            schema: PLAN.to_string(),
            violations,
        })
    }
}
