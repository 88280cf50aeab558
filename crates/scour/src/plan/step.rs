//! Plan and step definitions.

use serde::{Deserialize, Serialize};

use super::ops::StepOp;

/// An ordered list of transformation steps.
///
/// Owned by the caller and immutable during a run. The runner iterates
/// steps by ascending `order`; gaps and duplicates are tolerated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    /// Display name for the plan.
    #[serde(default)]
    pub name: String,
    /// The transformation steps.
    pub steps: Vec<Step>,
}

impl Plan {
    /// Create an empty plan.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            steps: Vec::new(),
        }
    }

    /// Append a step (builder style).
    pub fn with_step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }
}

/// One transformation step in a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// 1-based position in the plan.
    pub order: u32,
    /// Short step name.
    pub name: String,
    /// What the step is for.
    #[serde(default)]
    pub description: String,
    /// The operation to apply.
    pub op: StepOp,
}

impl Step {
    /// Create a step.
    pub fn new(order: u32, name: impl Into<String>, op: StepOp) -> Self {
        Self {
            order,
            name: name.into(),
            description: String::new(),
            op,
        }
    }

    /// Set the description (builder style).
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
