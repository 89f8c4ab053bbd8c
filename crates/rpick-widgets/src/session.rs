#![forbid(unsafe_code)]

//! One press-drag-release interaction.
//!
//! [`PickerSession`] wraps a [`ReactionPicker`] and sequences the calls a
//! gesture controller makes so hosts do not have to track `is_initial` or
//! guard against late drag events themselves.
//!
//! ```text
//! Idle ──begin──▶ Tracking ──release──▶ Released
//!                  │    ▲
//!                  └drag┘
//! ```

use std::time::Duration;

use rpick_core::geometry::Point;

use crate::item::ReactionItem;
use crate::picker::ReactionPicker;
use crate::services::FlightTarget;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Tracking,
    Released,
}

/// Gesture-lifecycle driver for a picker.
#[derive(Debug)]
pub struct PickerSession {
    picker: ReactionPicker,
    available_width: f64,
    start: Point,
    phase: SessionPhase,
}

impl PickerSession {
    pub fn new(picker: ReactionPicker) -> Self {
        Self {
            picker,
            available_width: 0.0,
            start: Point::ZERO,
            phase: SessionPhase::Idle,
        }
    }

    /// Lay out for a press at `start` and play the entrance.
    ///
    /// Only the first call has an effect.
    pub fn begin(&mut self, available_width: f64, start: Point) {
        if self.phase != SessionPhase::Idle {
            return;
        }
        self.available_width = available_width;
        self.start = start;
        self.picker
            .update_layout(available_width, start, start.x, true);
        self.picker.animate_in();
        self.phase = SessionPhase::Tracking;
    }

    /// Follow the touch to `touch_x`. Returns `false` when ignored.
    pub fn drag(&mut self, touch_x: f64) -> bool {
        if self.phase != SessionPhase::Tracking {
            return false;
        }
        self.picker
            .update_layout(self.available_width, self.start, touch_x, false);
        true
    }

    /// End the gesture: pick the selection and play the exit.
    ///
    /// Returns the selected item. Outside of tracking this returns `None`
    /// and `on_complete` is dropped without being called.
    pub fn release(
        &mut self,
        target: Option<Box<dyn FlightTarget>>,
        hide_target: bool,
        on_complete: impl FnOnce() + 'static,
    ) -> Option<ReactionItem> {
        if self.phase != SessionPhase::Tracking {
            return None;
        }
        self.phase = SessionPhase::Released;
        let selected = self.picker.selected_reaction().cloned();
        self.picker.animate_out(target, hide_target, on_complete);
        selected
    }

    /// Advance presentation. Returns `true` while anything is moving.
    pub fn tick(&mut self, dt: Duration) -> bool {
        self.picker.tick(dt)
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Whether the exit has played out and the picker can be dropped.
    pub fn is_finished(&self) -> bool {
        self.picker.is_finished()
    }

    pub fn picker(&self) -> &ReactionPicker {
        &self.picker
    }

    pub fn picker_mut(&mut self) -> &mut ReactionPicker {
        &mut self.picker
    }

    pub fn into_inner(self) -> ReactionPicker {
        self.picker
    }
}
