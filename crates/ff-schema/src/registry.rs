//! Central schema registry for stage-output contracts.
//!
//! The `SchemaRegistry` builds JSON Schemas from `ff-core` contract types at
//! construction time using [`schemars::schema_for!`] and validates via
//! `jsonschema`.

use std::collections::HashMap;

use schemars::schema_for;
use serde::de::DeserializeOwned;

use crate::error::{SchemaError, Violation};

pub const OBSERVATION: &str = "observation";
pub const PLAN: &str = "plan";
pub const QA: &str = "qa";
pub const SAFETY_CHECK: &str = "safety_check";

/// Store of every stage-output schema.
pub struct SchemaRegistry {
    schemas: HashMap<&'static str, serde_json::Value>,
}

/// Insert a schema into the map, converting the `schemars` output to a
/// `serde_json::Value`. Panics if `serde_json::to_value` fails (should be
/// infallible for valid `schemars` output).
macro_rules! register {
    ($map:expr, $name:expr, $ty:ty) => {
        $map.insert($name, serde_json::to_value(schema_for!($ty)).unwrap());
    };
}

impl SchemaRegistry {
    /// Build a registry containing the four stage contracts.
    ///
    /// # Panics
    ///
    /// Panics if `serde_json::to_value` fails on a `schemars`-generated schema,
    /// which `schemars` output never triggers.
    #[must_use]
    pub fn new() -> Self {
        let mut schemas = HashMap::new();

        register!(schemas, OBSERVATION, ff_core::contracts::ObservationPayload);
        register!(schemas, PLAN, ff_core::contracts::PlanPayload);
        register!(schemas, QA, ff_core::contracts::QaPayload);
        register!(schemas, SAFETY_CHECK, ff_core::contracts::SafetyPayload);

        Self { schemas }
    }

    /// Get a schema by name. Returns `None` if not found.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.schemas.get(name)
    }

    /// Validate a JSON value against a named schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound` if the schema name is unknown, or
    /// `SchemaError::ValidationFailed` with one violation per failed constraint.
    pub fn validate(&self, name: &str, instance: &serde_json::Value) -> Result<(), SchemaError> {
        let schema = self
            .get(name)
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))?;

        let validator = jsonschema::validator_for(schema)
            .map_err(|e| SchemaError::Generation(format!("{e}")))?;

        let violations: Vec<Violation> = validator
            .iter_errors(instance)
            .map(|e| Violation {
                path: e.instance_path.to_string(),
                message: e.to_string(),
            })
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::ValidationFailed {
                schema: name.to_string(),
                violations,
            })
        }
    }

    /// Validate, then deserialize into the contract type.
    ///
    /// # Errors
    ///
    /// Returns the validation failure, or `SchemaError::Deserialize` if serde
    /// rejects a value the schema accepted.
    pub fn parse<T: DeserializeOwned>(
        &self,
        name: &str,
        instance: &serde_json::Value,
    ) -> Result<T, SchemaError> {
        self.validate(name, instance)?;
        serde_json::from_value(instance.clone()).map_err(|e| SchemaError::Deserialize {
            schema: name.to_string(),
            message: e.to_string(),
        })
    }

    /// List all registered schema names.
    #[must_use]
    pub fn list(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.schemas.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}
