//! Plan model: ordered transformation steps and their operations.

mod ops;
mod step;

pub use ops::{CoerceTarget, FillStrategy, ScaleMethod, StepOp};
pub use step::{Plan, Step};
