//! The validation scenario: step executor and run driver

pub mod runner;
pub mod steps;

pub use runner::{EventHandler, ScenarioEvent, ScenarioRunner};
pub use steps::{ScenarioError, StepExecutor, StepPass};
