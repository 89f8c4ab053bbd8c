#![forbid(unsafe_code)]

//! JSON gesture scripts.
//!
//! A script lists the items, an optional configuration, and a sequence of
//! gesture steps. Replaying drives a [`PickerSession`] against recording
//! fakes with a fixed-step [`FrameDriver`], so a script's outcome is fully
//! deterministic.
//!
//! ```json
//! {
//!   "items": [{"Reaction": {"value": "👍", "label": "Like", "animation": "like.tgs"}}],
//!   "steps": [
//!     {"op": "begin", "width": 390, "x": 320, "y": 640},
//!     {"op": "drag", "x": 300},
//!     {"op": "release", "target": {"origin": {"x": 40, "y": 700}, "size": {"width": 24, "height": 24}}},
//!     {"op": "wait", "ms": 400}
//!   ]
//! }
//! ```

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use rpick_core::geometry::{Point, Rect};
use rpick_widgets::{ConfigError, PickerConfig, PickerSession, ReactionItem, ReactionPicker, SessionPhase};
use serde::{Deserialize, Serialize};

use crate::digest::layout_digest;
use crate::driver::FrameDriver;
use crate::fakes::Recorder;

/// One gesture step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    /// Press at `(x, y)` in a container `width` wide.
    Begin { width: f64, x: f64, y: f64 },
    /// Move the touch to `x`.
    Drag { x: f64 },
    /// Let `ms` milliseconds of frames pass.
    Wait { ms: u64 },
    /// Lift the finger, optionally flying into `target`.
    Release {
        #[serde(default)]
        target: Option<Rect>,
        #[serde(default)]
        hide_target: bool,
    },
}

impl Step {
    fn name(&self) -> &'static str {
        match self {
            Self::Begin { .. } => "begin",
            Self::Drag { .. } => "drag",
            Self::Wait { .. } => "wait",
            Self::Release { .. } => "release",
        }
    }
}

/// A replayable gesture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GestureScript {
    pub items: Vec<ReactionItem>,
    #[serde(default)]
    pub config: Option<PickerConfig>,
    pub steps: Vec<Step>,
}

/// Script failure.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("malformed script: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("step {index} ({op}) is not valid in the {phase:?} phase")]
    OutOfOrder {
        index: usize,
        op: &'static str,
        phase: SessionPhase,
    },
}

/// What a replay observed.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayReport {
    /// Item returned by the release step.
    pub selected: Option<ReactionItem>,
    /// Highlighted item index after `begin` and after each drag.
    pub highlights: Vec<Option<usize>>,
    /// Haptic taps over the whole replay.
    pub taps: usize,
    /// Whether the exit callback fired.
    pub completed: bool,
    /// Layout digest at release (or at the end when never released).
    pub digest: String,
}

impl GestureScript {
    pub fn from_json(json: &str) -> Result<Self, ScriptError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ScriptError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Replay against fresh fakes wired to `recorder`.
    pub fn replay(&self, recorder: &Recorder, driver: FrameDriver) -> Result<ReplayReport, ScriptError> {
        let picker = ReactionPicker::with_config(
            self.items.clone(),
            recorder.services(),
            self.config.clone().unwrap_or_default(),
        )?;
        let mut session = PickerSession::new(picker);
        let completed = Rc::new(Cell::new(false));
        let mut highlights = Vec::new();
        let mut selected = None;
        let mut digest = None;

        for (index, step) in self.steps.iter().enumerate() {
            let phase = session.phase();
            let out_of_order = || ScriptError::OutOfOrder {
                index,
                op: step.name(),
                phase,
            };
            match step {
                Step::Begin { width, x, y } => {
                    if phase != SessionPhase::Idle {
                        return Err(out_of_order());
                    }
                    session.begin(*width, Point::new(*x, *y));
                    highlights.push(session.picker().highlighted_index());
                }
                Step::Drag { x } => {
                    if !session.drag(*x) {
                        return Err(out_of_order());
                    }
                    highlights.push(session.picker().highlighted_index());
                }
                Step::Wait { ms } => {
                    driver.run(&mut session, Duration::from_millis(*ms));
                }
                Step::Release { target, hide_target } => {
                    if phase != SessionPhase::Tracking {
                        return Err(out_of_order());
                    }
                    digest = Some(layout_digest(session.picker()));
                    let target = target.map(|frame| recorder.target(frame).boxed());
                    let flag = Rc::clone(&completed);
                    selected = session.release(target, *hide_target, move || flag.set(true));
                }
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(steps = self.steps.len(), completed = completed.get(), "script replayed");

        Ok(ReplayReport {
            selected,
            highlights,
            taps: recorder.taps(),
            completed: completed.get(),
            digest: digest.unwrap_or_else(|| layout_digest(session.picker())),
        })
    }
}
