//! Scripted interaction with the Projects section.
//!
//! A script is a comma or whitespace separated list of steps:
//! `scroll:+N` / `scroll:-N` drags the strip by N pixels, `click:ABS` clicks
//! the rendered instance at absolute index ABS, `visit:LOGICAL` scrolls to the
//! nearest card of a project, `wait:MS` lets virtual time pass and `snap`
//! realigns the active card with the leading edge.

use std::fmt;
use std::str::FromStr;

use folio_carousel::{CarouselPhase, ViewportSampler};
use serde::Serialize;
use thiserror::Error;

use crate::panel::ProjectPanel;
use crate::section::ProjectsSection;

/// Drag granularity used for `scroll` steps, roughly a trackpad at 60 Hz.
const DRAG_STEP_PX: f32 = 10.0;
const DRAG_STEP_MS: u64 = 16;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    Scroll(f32),
    Click(usize),
    Visit(usize),
    Wait(u64),
    Snap,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("unknown step '{0}'")]
    UnknownStep(String),
    #[error("step '{step}' needs a numeric argument")]
    InvalidArgument { step: String },
}

impl FromStr for Step {
    type Err = ScriptError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || ScriptError::InvalidArgument {
            step: raw.to_string(),
        };
        let (name, arg) = match raw.split_once(':') {
            Some((name, arg)) => (name, Some(arg.trim())),
            None => (raw, None),
        };
        match (name.trim().to_ascii_lowercase().as_str(), arg) {
            ("scroll", Some(px)) => px
                .parse::<f32>()
                .ok()
                .filter(|px| px.is_finite())
                .map(Step::Scroll)
                .ok_or_else(invalid),
            ("click", Some(abs)) => abs.parse().map(Step::Click).map_err(|_| invalid()),
            ("visit", Some(logical)) => {
                logical.parse().map(Step::Visit).map_err(|_| invalid())
            }
            ("wait", Some(ms)) => ms.parse().map(Step::Wait).map_err(|_| invalid()),
            ("snap", None) => Ok(Step::Snap),
            ("scroll" | "click" | "visit" | "wait", None) => Err(invalid()),
            _ => Err(ScriptError::UnknownStep(raw.to_string())),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Scroll(px) => write!(f, "scroll:{px:+}"),
            Step::Click(abs) => write!(f, "click:{abs}"),
            Step::Visit(logical) => write!(f, "visit:{logical}"),
            Step::Wait(ms) => write!(f, "wait:{ms}"),
            Step::Snap => f.write_str("snap"),
        }
    }
}

pub fn parse_script(script: &str) -> Result<Vec<Step>, ScriptError> {
    script
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .collect()
}

/// Section state after one step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepReport {
    pub step: String,
    pub elapsed_ms: u128,
    pub offset: f32,
    pub active_index: Option<usize>,
    pub leading_index: Option<usize>,
    pub phase: &'static str,
    pub panel: Option<ProjectPanel>,
}

impl fmt::Display for StepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fmt_index = |i: Option<usize>| i.map_or_else(|| "-".to_string(), |i| i.to_string());
        write!(
            f,
            "{:>6}ms  {:<12} offset={:>8.1}  active={}  leading={}  {}",
            self.elapsed_ms,
            self.step,
            self.offset,
            fmt_index(self.active_index),
            fmt_index(self.leading_index),
            self.phase,
        )?;
        if let Some(panel) = &self.panel {
            write!(f, "  \"{}\"", panel.title)?;
        }
        Ok(())
    }
}

fn phase_name(phase: CarouselPhase) -> &'static str {
    match phase {
        CarouselPhase::Idle => "idle",
        CarouselPhase::Monitoring => "monitoring",
        CarouselPhase::Jumping { .. } => "jumping",
        CarouselPhase::Navigating { .. } => "navigating",
        CarouselPhase::Detached => "detached",
    }
}

pub fn apply(section: &mut ProjectsSection, step: Step) {
    let sim = section.simulation_mut();
    match step {
        Step::Scroll(px) => sim.drag(px, DRAG_STEP_PX, DRAG_STEP_MS),
        Step::Click(abs) => sim.click(abs),
        Step::Visit(logical) => sim.visit(logical),
        Step::Wait(ms) => sim.advance_ms(ms),
        Step::Snap => sim.carousel_mut().snap_to_active(),
    }
}

pub fn report(section: &ProjectsSection, step: &Step) -> StepReport {
    let sim = section.simulation();
    StepReport {
        step: step.to_string(),
        elapsed_ms: sim.elapsed().as_millis(),
        offset: sim.strip().scroll_offset(),
        active_index: sim.carousel().active_index(),
        leading_index: sim.leading_logical(),
        phase: phase_name(sim.carousel().phase()),
        panel: section.panel(),
    }
}

/// Run every step in order, reporting the section state after each.
pub fn run(section: &mut ProjectsSection, steps: &[Step]) -> Vec<StepReport> {
    steps
        .iter()
        .map(|step| {
            log::debug!("Applying step {step}");
            apply(section, *step);
            report(section, step)
        })
        .collect()
}
