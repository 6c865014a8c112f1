//! CLI output formatting

use crate::core::state::{StepKind, Verdict};
use crate::scenario::ScenarioEvent;
use console::Emoji;

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static SPINNER: Emoji<'_, '_> = Emoji("⏳ ", "~ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "! ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", "> ");

/// Format a step name for display
pub fn format_step(step: StepKind) -> String {
    style(step.label()).cyan().to_string()
}

/// Format a scenario event as one progress line
pub fn format_scenario_event(event: &ScenarioEvent) -> Option<String> {
    match event {
        ScenarioEvent::RunStarted { run_id } => Some(format!(
            "{} Starting end-to-end validation ({})",
            ROCKET,
            style(&run_id.to_string()[..8]).dim()
        )),
        ScenarioEvent::StepStarted { step } => Some(format!("{} {}", SPINNER, format_step(*step))),
        ScenarioEvent::StepPassed { step, note } => Some(format!(
            "{} {} - {}",
            CHECK,
            style(step.label()).green(),
            note
        )),
        ScenarioEvent::StepWarning { step, warning } => Some(format!(
            "{} {}: {}",
            WARN,
            style(step.label()).yellow(),
            style(warning).dim()
        )),
        ScenarioEvent::StepFailed { step, error } => Some(format!(
            "{} {}: {}",
            CROSS,
            style(step.label()).red(),
            style(error).dim()
        )),
        // The final banner is printed separately from the report
        ScenarioEvent::RunFinished { .. } => None,
    }
}

/// Format the final verdict banner
pub fn format_verdict(verdict: &Verdict) -> String {
    let rule = "=".repeat(41);
    match verdict {
        Verdict::Pass => format!(
            "{rule}\n{} {}\n{rule}",
            ROCKET,
            style("ALL PIPELINE END-TO-END CHECKS PASSED").green().bold()
        ),
        Verdict::Fail { step, reason, .. } => format!(
            "{rule}\n{} {} {} {}\n{rule}",
            CROSS,
            style("RUN FAILED at").red().bold(),
            style(step.label()).red().bold(),
            style(format!("({reason})")).dim()
        ),
    }
}
