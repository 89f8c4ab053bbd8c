#![forbid(unsafe_code)]

//! Entrance and exit choreography.
//!
//! Both are fire-and-forget: they only write presentation state, and the
//! host advances them with [`ReactionPicker::tick`]. The exit additionally
//! owns a completion callback that fires exactly once, after the container
//! fade and (when present) the selection flight have both finished.

use std::fmt;
use std::time::Duration;

use rpick_core::animation::{Animation, Curve, Fade, FlightPath, Keyframes};
use rpick_core::geometry::{Point, Rect};
use rpick_core::transition::{Layer, Transition};

use super::{ReactionPicker, TrackingBubble};
use crate::config::PickerConfig;
use crate::item_view::ReactionItemView;
use crate::services::{FlightTarget, Haptics, ImageHandle};

/// Scale everything starts from on entrance and shrinks to on exit.
const COLLAPSED_SCALE: f64 = 0.01;
/// Scale of the ghost and of the target when the flight lands.
const LANDING_SCALE: f64 = 0.5;

/// `numerator / denominator`, or 1.0 for an empty denominator.
fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        1.0
    }
}

// ---------------------------------------------------------------------------
// Flight
// ---------------------------------------------------------------------------

/// The magnified reaction flying into the host's target on release.
///
/// Two layers travel the same arc: a snapshot of the reaction view that
/// fades out and shrinks, and a ghost of the target's image that fades in.
pub struct Flight {
    view_index: usize,
    snapshot: Layer,
    ghost: Layer,
    ghost_image: Option<ImageHandle>,
    path: FlightPath,
    track: Keyframes,
    target: Box<dyn FlightTarget>,
    hide_target: bool,
    arrival: Transition,
    landed: bool,
}

impl fmt::Debug for Flight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Flight")
            .field("view_index", &self.view_index)
            .field("path", &self.path)
            .field("hide_target", &self.hide_target)
            .field("landed", &self.landed)
            .finish_non_exhaustive()
    }
}

impl Flight {
    fn launch(
        view_index: usize,
        view: &mut ReactionItemView,
        mut target: Box<dyn FlightTarget>,
        hide_target: bool,
        config: &PickerConfig,
    ) -> Self {
        let source: Rect = view.layer().frame();
        let destination = target.frame();
        view.layer_mut().set_hidden(true);
        if hide_target {
            target.set_hidden(true);
        }

        let travel = Transition::animated(config.flight_duration, Curve::EaseInOut);

        let mut snapshot = Layer::new().with_frame(source);
        snapshot.set_alpha(
            0.0,
            &Transition::animated(config.flight_snapshot_fade, Curve::EaseInOut),
        );
        snapshot.set_scale(ratio(destination.width() * LANDING_SCALE, source.width()), &travel);

        let mut ghost = Layer::new().with_frame(destination);
        ghost.set_alpha(0.0, &Transition::Immediate);
        ghost.set_alpha(
            1.0,
            &Transition::animated(config.flight_ghost_fade, Curve::EaseInOut),
        );
        ghost.set_scale(ratio(source.width(), destination.width()), &Transition::Immediate);
        ghost.set_scale(LANDING_SCALE, &travel);

        let path = FlightPath::arc(source.center(), destination.center(), config.flight_lift);
        let track = Keyframes::new(path.keyframes(config.flight_keyframes), config.flight_duration);
        let start = track.sample();
        snapshot.set_position(start, &Transition::Immediate);
        ghost.set_position(start, &Transition::Immediate);

        Self {
            view_index,
            ghost_image: target.image(),
            snapshot,
            ghost,
            path,
            track,
            target,
            hide_target,
            arrival: Transition::spring(config.flight_duration, config.arrival_damping),
            landed: false,
        }
    }

    /// Index of the view being flown.
    pub fn view_index(&self) -> usize {
        self.view_index
    }

    pub fn snapshot(&self) -> &Layer {
        &self.snapshot
    }

    pub fn ghost(&self) -> &Layer {
        &self.ghost
    }

    /// Image the ghost shows; copied from the target at launch.
    pub fn ghost_image(&self) -> Option<ImageHandle> {
        self.ghost_image
    }

    pub fn path(&self) -> &FlightPath {
        &self.path
    }

    /// Keyframe positions both layers travel through.
    pub fn keyframes(&self) -> &[Point] {
        self.track.points()
    }

    #[inline]
    pub fn has_landed(&self) -> bool {
        self.landed
    }

    fn tick(&mut self, dt: Duration, haptics: &mut dyn Haptics) -> bool {
        let fading = [self.snapshot.tick(dt), self.ghost.tick(dt)].contains(&true);
        if self.landed {
            return fading;
        }
        self.track.tick(dt);
        let position = self.track.sample();
        self.snapshot.set_position(position, &Transition::Immediate);
        self.ghost.set_position(position, &Transition::Immediate);
        if self.track.is_complete() {
            self.landed = true;
            haptics.tap();
            if self.hide_target {
                self.target.set_hidden(false);
                self.target.pop_in(LANDING_SCALE, self.arrival);
            }
            #[cfg(feature = "tracing")]
            tracing::debug!(index = self.view_index, "flight landed");
        }
        true
    }
}

// ---------------------------------------------------------------------------
// Exit state
// ---------------------------------------------------------------------------

pub(super) struct Exit {
    container: Fade,
    flight: Option<Flight>,
    on_complete: Option<Box<dyn FnOnce()>>,
}

impl fmt::Debug for Exit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Exit")
            .field("container", &self.container)
            .field("flight", &self.flight)
            .field("completed", &self.on_complete.is_none())
            .finish()
    }
}

impl Exit {
    fn tick(&mut self, dt: Duration, haptics: &mut dyn Haptics) -> bool {
        self.container.tick(dt);
        let flying = match self.flight.as_mut() {
            Some(flight) => flight.tick(dt, haptics),
            None => false,
        };
        let flight_done = self.flight.as_ref().is_none_or(Flight::has_landed);
        if self.container.is_complete() && flight_done {
            if let Some(done) = self.on_complete.take() {
                #[cfg(feature = "tracing")]
                tracing::debug!("exit complete");
                done();
            }
            return flying;
        }
        true
    }
}

// ---------------------------------------------------------------------------
// Picker choreography
// ---------------------------------------------------------------------------

impl ReactionPicker {
    /// Play the entrance: tracking bubbles pop, then the capsule and the
    /// views spring in from the press point.
    ///
    /// Call after the initial layout pass.
    pub fn animate_in(&mut self) {
        if self.exit.is_some() {
            return;
        }
        let Some(chrome) = self.chrome.as_mut() else {
            #[cfg(feature = "tracing")]
            tracing::debug!("entrance skipped before first layout");
            return;
        };
        let config = &self.config;
        let right_aligned = self.right_aligned.unwrap_or(false);
        let blur = chrome.metrics.shadow_blur;

        #[cfg(feature = "tracing")]
        tracing::debug!(count = self.views.len(), right_aligned, "entrance started");

        let pop = Transition::animated(config.bubble_pop_duration, Curve::EaseOut);
        let staggered_pop = pop.with_delay(config.bubble_pop_stagger);
        for layer in chrome.bubbles[TrackingBubble::Main.index()].layers_mut() {
            layer.scale_mut().animate_from(COLLAPSED_SCALE, &pop);
        }
        for layer in chrome.bubbles[TrackingBubble::Secondary.index()].layers_mut() {
            layer.scale_mut().animate_from(COLLAPSED_SCALE, &staggered_pop);
        }

        let background = chrome.background.frame();
        let half_width = (background.width() - blur) / 2.0;
        let half_height = (background.height() - blur) / 2.0;
        let background_offset = if right_aligned {
            Point::new(half_width - config.entrance_slide_inset, half_height)
        } else {
            Point::new(-half_width + config.entrance_slide_inset, half_height)
        };
        let spring = Transition::spring(config.entrance_duration, config.entrance_damping);
        for layer in chrome.background.layers_mut() {
            layer.scale_mut().animate_from(COLLAPSED_SCALE, &spring);
            let center = layer.position().committed();
            layer
                .position_mut()
                .animate_from(center + background_offset, &spring);
        }

        let count = self.views.len();
        for (i, view) in self.views.iter_mut().enumerate() {
            // Views far from the anchor side settle last.
            let stagger = if count > 1 {
                1.0 - i as f64 / (count - 1) as f64
            } else {
                1.0
            };
            let scale_spring = Transition::spring(
                config.entrance_duration + config.entrance_stagger.mul_f64(stagger),
                config.entrance_damping,
            );
            let frame = view.layer().frame();
            let slide_x = if right_aligned {
                frame.min_x() - (background.max_x() - blur) / 2.0 - config.entrance_slide_inset
            } else {
                frame.min_x() - (background.min_x() + blur) / 2.0 - config.entrance_slide_inset
            };
            let offset = Point::new(-slide_x, config.entrance_view_drop);
            let layer = view.layer_mut();
            layer.scale_mut().animate_from(COLLAPSED_SCALE, &scale_spring);
            let center = layer.position().committed();
            layer.position_mut().animate_from(center + offset, &spring);
        }
    }

    /// Play the exit and fly the magnified reaction into `target`.
    ///
    /// Without a target or a magnified view only the container fade runs.
    /// `on_complete` fires once, from inside [`tick`](Self::tick). A second
    /// call while an exit is running is ignored and its callback dropped.
    pub fn animate_out(
        &mut self,
        target: Option<Box<dyn FlightTarget>>,
        hide_target: bool,
        on_complete: impl FnOnce() + 'static,
    ) {
        if self.exit.is_some() {
            #[cfg(feature = "tracing")]
            tracing::debug!("exit already running");
            return;
        }
        self.services.haptics.prepare();

        let maximized = self.highlighted_index();
        let flight = match (target, maximized) {
            (Some(target), Some(index)) => Some(Flight::launch(
                index,
                &mut self.views[index],
                target,
                hide_target,
                &self.config,
            )),
            _ => None,
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(flight = flight.is_some(), hide_target, "exit started");

        let fade = self.config.exit_transition();
        let collapse = |layer: &mut Layer| {
            layer.set_scale(COLLAPSED_SCALE, &fade);
            layer.set_alpha(0.0, &fade);
        };
        if let Some(chrome) = self.chrome.as_mut() {
            let bubbles = std::iter::once(&mut chrome.background).chain(chrome.bubbles.iter_mut());
            for bubble in bubbles {
                for layer in bubble.layers_mut() {
                    collapse(layer);
                }
            }
        }
        for view in &mut self.views {
            collapse(view.layer_mut());
        }

        self.exit = Some(Exit {
            container: Fade::new(self.config.exit_duration),
            flight,
            on_complete: Some(Box::new(on_complete)),
        });
    }

    /// Advance every running transition by `dt`.
    ///
    /// Returns `true` while anything is still moving or an exit is pending.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let mut moving = false;
        if let Some(chrome) = self.chrome.as_mut() {
            moving |= chrome.tick(dt);
        }
        for view in &mut self.views {
            moving |= view.tick(dt);
        }
        if let Some(exit) = self.exit.as_mut() {
            moving |= exit.tick(dt, self.services.haptics.as_mut());
        }
        moving
    }

    /// Whether `animate_out` has been called.
    #[inline]
    pub fn is_exiting(&self) -> bool {
        self.exit.is_some()
    }

    /// Whether the exit has finished and its callback has fired.
    pub fn is_finished(&self) -> bool {
        self.exit
            .as_ref()
            .is_some_and(|exit| exit.on_complete.is_none())
    }

    /// The running selection flight, if any.
    pub fn flight(&self) -> Option<&Flight> {
        self.exit.as_ref().and_then(|exit| exit.flight.as_ref())
    }
}
