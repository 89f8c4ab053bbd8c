#![forbid(unsafe_code)]

//! The reaction picker container.
//!
//! [`ReactionPicker`] owns one [`ReactionItemView`] per item, the capsule
//! background, and two small tracking bubbles. The host calls
//! [`update_layout`](ReactionPicker::update_layout) on every gesture move;
//! the picker recomputes frames, decides which slot is magnified, and
//! forwards changes to the views.
//!
//! Logical state (`has_selection`, the magnified view, committed frames) is
//! authoritative as soon as `update_layout` returns. Presentation catches up
//! through [`tick`](ReactionPicker::tick).
//!
//! # Invariants
//!
//! 1. After the first layout pass `views().len() == items().len()`.
//! 2. After any layout pass with at least one item, exactly one view is
//!    maximized.
//! 3. `selected_reaction()` is `None` whenever `has_selection()` is false.
//! 4. Alignment is decided on the first pass and never changes.
//!
//! # Failure Modes
//!
//! | Condition | Behavior |
//! |-----------|----------|
//! | No items | Zero-width row, no highlight, no selection |
//! | Touch outside the row | Anchor clamps to the end slot, `has_selection` false |
//! | `update_layout` after `animate_out` | Ignored |
//! | `animate_in` before any layout | Ignored |

mod choreography;
pub mod metrics;

use std::fmt;

use rpick_core::geometry::{Point, Rect};
use rpick_core::transition::{Layer, Transition};

use crate::config::{ConfigError, PickerConfig};
use crate::item::ReactionItem;
use crate::item_view::ReactionItemView;
use crate::services::{BubbleArt, PickerServices};
use crate::tuning::TuningTable;

pub use choreography::Flight;
use choreography::Exit;
use metrics::{Anchor, PickerMetrics, place_slots};

// ---------------------------------------------------------------------------
// Bubble layers
// ---------------------------------------------------------------------------

/// Which tracking bubble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackingBubble {
    /// The smaller bubble trailing below and to the left.
    Secondary,
    /// The bubble directly under the anchor.
    Main,
}

impl TrackingBubble {
    pub const ALL: [Self; 2] = [Self::Secondary, Self::Main];

    #[inline]
    const fn index(self) -> usize {
        match self {
            Self::Secondary => 0,
            Self::Main => 1,
        }
    }

    /// Circle diameter in units of the configured tracking circle size.
    #[inline]
    pub const fn diameter_units(self) -> f64 {
        (self.index() + 1) as f64
    }
}

/// A stretchable bubble drawn as a shadow layer under a fill layer.
#[derive(Debug, Clone)]
pub struct BubbleLayers {
    pub fill_art: BubbleArt,
    pub shadow_art: BubbleArt,
    fill: Layer,
    shadow: Layer,
}

impl BubbleLayers {
    fn new((fill_art, shadow_art): (BubbleArt, BubbleArt)) -> Self {
        Self {
            fill_art,
            shadow_art,
            fill: Layer::new(),
            shadow: Layer::new(),
        }
    }

    pub fn fill(&self) -> &Layer {
        &self.fill
    }

    pub fn shadow(&self) -> &Layer {
        &self.shadow
    }

    /// Committed frame shared by both layers.
    pub fn frame(&self) -> Rect {
        self.fill.frame()
    }

    fn layers_mut(&mut self) -> [&mut Layer; 2] {
        [&mut self.fill, &mut self.shadow]
    }

    fn set_frame(&mut self, frame: Rect, transition: &Transition) {
        for layer in self.layers_mut() {
            layer.set_frame(frame, transition);
        }
    }

    fn tick(&mut self, dt: std::time::Duration) -> bool {
        let moving = [self.fill.tick(dt), self.shadow.tick(dt)];
        moving.contains(&true)
    }

    fn is_animating(&self) -> bool {
        self.fill.is_animating() || self.shadow.is_animating()
    }
}

/// Art and layers generated on the first layout pass.
#[derive(Debug, Clone)]
struct Chrome {
    metrics: PickerMetrics,
    background: BubbleLayers,
    bubbles: [BubbleLayers; 2],
}

impl Chrome {
    fn tick(&mut self, dt: std::time::Duration) -> bool {
        let moving = [
            self.background.tick(dt),
            self.bubbles[0].tick(dt),
            self.bubbles[1].tick(dt),
        ];
        moving.contains(&true)
    }
}

// ---------------------------------------------------------------------------
// Picker
// ---------------------------------------------------------------------------

/// A horizontal row of reaction bubbles driven by a drag gesture.
pub struct ReactionPicker {
    items: Vec<ReactionItem>,
    config: PickerConfig,
    tuning: TuningTable,
    services: PickerServices,

    chrome: Option<Chrome>,
    views: Vec<ReactionItemView>,
    right_aligned: Option<bool>,
    container_frame: Rect,
    anchor_x: f64,
    has_selection: bool,
    highlighted_slot: Option<usize>,

    exit: Option<Exit>,
}

impl fmt::Debug for ReactionPicker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReactionPicker")
            .field("items", &self.items.len())
            .field("right_aligned", &self.right_aligned)
            .field("container_frame", &self.container_frame)
            .field("has_selection", &self.has_selection)
            .field("highlighted_slot", &self.highlighted_slot)
            .field("exit", &self.exit)
            .finish_non_exhaustive()
    }
}

impl ReactionPicker {
    /// A picker with the default configuration and built-in tuning table.
    pub fn new(items: Vec<ReactionItem>, services: PickerServices) -> Self {
        Self {
            items,
            config: PickerConfig::default(),
            tuning: TuningTable::builtin(),
            services,
            chrome: None,
            views: Vec::new(),
            right_aligned: None,
            container_frame: Rect::default(),
            anchor_x: 0.0,
            has_selection: false,
            highlighted_slot: None,
            exit: None,
        }
    }

    /// A picker with a custom configuration.
    pub fn with_config(
        items: Vec<ReactionItem>,
        services: PickerServices,
        config: PickerConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut picker = Self::new(items, services);
        picker.config = config;
        Ok(picker)
    }

    /// Replace the art-direction table. Only affects views not yet built.
    #[must_use]
    pub fn with_tuning(mut self, tuning: TuningTable) -> Self {
        self.tuning = tuning;
        self
    }

    // -----------------------------------------------------------------------
    // Layout
    // -----------------------------------------------------------------------

    /// Recompute the row for a touch at `touch_x`.
    ///
    /// `start` is where the press began and anchors the container; it is
    /// expected to stay the same for a whole session. `is_initial` marks the
    /// first pass of a session: changes snap instead of animating and no
    /// haptic fires.
    pub fn update_layout(&mut self, available_width: f64, start: Point, touch_x: f64, is_initial: bool) {
        if self.exit.is_some() {
            #[cfg(feature = "tracing")]
            tracing::debug!(touch_x, "layout ignored after exit");
            return;
        }

        let metrics = match &self.chrome {
            Some(chrome) => chrome.metrics,
            None => self.prepare(available_width),
        };
        let right_aligned = *self
            .right_aligned
            .get_or_insert(start.x > available_width / 2.0);

        let frame = metrics.container_frame(start, right_aligned);
        let anchor = Anchor::clamp(&metrics, frame, touch_x);
        let slot = anchor.slot(metrics.count);
        self.container_frame = frame;
        self.anchor_x = anchor.x;
        self.has_selection = metrics.has_selection(frame, touch_x);
        self.highlighted_slot = slot;

        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "rpick.layout",
            initial = is_initial,
            touch_x,
            highlighted = ?slot,
            has_selection = self.has_selection,
            right_aligned
        )
        .entered();

        let transition = if is_initial {
            Transition::Immediate
        } else {
            self.config.highlight_transition()
        };

        if let Some(chrome) = self.chrome.as_mut() {
            chrome.background.set_frame(frame, &Transition::Immediate);
            let (main, secondary) = metrics.tracking_bubble_frames(
                frame,
                anchor.x,
                self.config.tracking_circle_size,
                self.config.tracking_bubble_offset,
            );
            chrome.bubbles[TrackingBubble::Main.index()].set_frame(main, &Transition::Immediate);
            chrome.bubbles[TrackingBubble::Secondary.index()].set_frame(secondary, &Transition::Immediate);
        }

        let slot_width = metrics.maximized_slot_width();
        for placement in place_slots(&metrics, frame, slot, right_aligned) {
            let Some(view) = self.views.get_mut(placement.index) else {
                continue;
            };
            if view.is_maximized() != Some(placement.maximized) {
                view.set_maximized(placement.maximized);
                view.set_animating(placement.maximized);
                #[cfg(feature = "tracing")]
                tracing::trace!(
                    index = placement.index,
                    maximized = placement.maximized,
                    "highlight changed"
                );
                if placement.maximized && !is_initial {
                    self.services.haptics.tap();
                }
            }
            view.update_layout(
                placement.frame.size,
                placement.frame.width() / slot_width,
                &transition,
                placement.maximized,
            );
            view.layer_mut().set_frame(placement.frame, &transition);
        }
    }

    /// First-pass setup: size the row, generate art, build views.
    fn prepare(&mut self, available_width: f64) -> PickerMetrics {
        let metrics = PickerMetrics::measure(self.items.len(), available_width, &self.config);
        let theme = self.services.theme.as_ref();
        let images = self.services.images.as_ref();
        let blur = metrics.shadow_blur;

        let background = BubbleLayers::new(BubbleArt::pair(images, theme, metrics.background_height, blur));
        let bubbles = TrackingBubble::ALL.map(|which| {
            let diameter = which.diameter_units() * self.config.tracking_circle_size;
            BubbleLayers::new(BubbleArt::pair(images, theme, diameter, blur))
        });

        self.views = self
            .items
            .iter()
            .map(|item| ReactionItemView::new(item.clone(), &self.services, &self.tuning, &self.config, true))
            .collect();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            count = metrics.count,
            minimized_size = metrics.minimized_size,
            shadow_blur = metrics.shadow_blur,
            "picker prepared"
        );

        self.chrome = Some(Chrome {
            metrics,
            background,
            bubbles,
        });
        metrics
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// The magnified item, if the last touch was over the row.
    pub fn selected_reaction(&self) -> Option<&ReactionItem> {
        if !self.has_selection {
            return None;
        }
        self.views
            .iter()
            .find(|view| view.is_maximized() == Some(true))
            .map(ReactionItemView::item)
    }

    pub fn items(&self) -> &[ReactionItem] {
        &self.items
    }

    pub fn views(&self) -> &[ReactionItemView] {
        &self.views
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    /// Whether the last touch fell within the row's horizontal bounds.
    #[inline]
    pub fn has_selection(&self) -> bool {
        self.has_selection
    }

    /// Index into [`items`](Self::items) of the magnified view.
    pub fn highlighted_index(&self) -> Option<usize> {
        self.views
            .iter()
            .position(|view| view.is_maximized() == Some(true))
    }

    /// Physical slot (counted from the left) under the anchor.
    #[inline]
    pub fn highlighted_slot(&self) -> Option<usize> {
        self.highlighted_slot
    }

    /// `None` before the first layout pass.
    #[inline]
    pub fn is_right_aligned(&self) -> Option<bool> {
        self.right_aligned
    }

    /// Frame of the capsule including its blur margins.
    pub fn container_frame(&self) -> Rect {
        self.container_frame
    }

    /// Clamped anchor x from the last layout pass.
    pub fn anchor_x(&self) -> f64 {
        self.anchor_x
    }

    /// Sizes fixed on the first layout pass.
    pub fn metrics(&self) -> Option<&PickerMetrics> {
        self.chrome.as_ref().map(|chrome| &chrome.metrics)
    }

    pub fn minimized_size(&self) -> Option<f64> {
        self.metrics().map(|m| m.minimized_size)
    }

    pub fn shadow_blur(&self) -> Option<f64> {
        self.metrics().map(|m| m.shadow_blur)
    }

    pub fn background(&self) -> Option<&BubbleLayers> {
        self.chrome.as_ref().map(|chrome| &chrome.background)
    }

    pub fn tracking_bubble(&self, which: TrackingBubble) -> Option<&BubbleLayers> {
        self.chrome.as_ref().map(|chrome| &chrome.bubbles[which.index()])
    }

    /// Whether any layer is still presenting a transition.
    pub fn is_animating(&self) -> bool {
        let chrome = self.chrome.as_ref().is_some_and(|chrome| {
            chrome.background.is_animating() || chrome.bubbles.iter().any(BubbleLayers::is_animating)
        });
        chrome || self.views.iter().any(ReactionItemView::is_animating)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    use rpick_core::color::Rgba;
    use rpick_core::geometry::Size;

    use crate::services::{
        AnimatedIcon, BubbleArtRequest, BubbleImageGenerator, DefaultTheme, FlightTarget, Haptics,
        IconProvider, IconRequest, ImageHandle,
    };

    #[derive(Debug, Default)]
    struct Record {
        prepares: usize,
        taps: usize,
        playing: Vec<(String, bool)>,
        target: Vec<String>,
    }

    type Shared = Rc<RefCell<Record>>;

    struct Images;
    impl BubbleImageGenerator for Images {
        fn bubble(&self, request: &BubbleArtRequest) -> ImageHandle {
            ImageHandle(request.diameter as u64)
        }
        fn filled_circle(&self, _diameter: f64, _color: Rgba) -> ImageHandle {
            ImageHandle(0)
        }
    }

    struct Icon(String, Shared);
    impl AnimatedIcon for Icon {
        fn set_size(&mut self, _size: Size) {}
        fn set_playing(&mut self, playing: bool) {
            self.1.borrow_mut().playing.push((self.0.clone(), playing));
        }
    }

    struct Icons(Shared);
    impl IconProvider for Icons {
        fn animated_icon(&self, request: &IconRequest<'_>) -> Box<dyn AnimatedIcon> {
            Box::new(Icon(request.source.as_str().to_owned(), Rc::clone(&self.0)))
        }
        fn reply_icon(&self) -> ImageHandle {
            ImageHandle(1)
        }
    }

    struct Taps(Shared);
    impl Haptics for Taps {
        fn prepare(&mut self) {
            self.0.borrow_mut().prepares += 1;
        }
        fn tap(&mut self) {
            self.0.borrow_mut().taps += 1;
        }
    }

    struct Target(Rect, Shared);
    impl FlightTarget for Target {
        fn frame(&self) -> Rect {
            self.0
        }
        fn image(&self) -> Option<ImageHandle> {
            Some(ImageHandle(7))
        }
        fn set_hidden(&mut self, hidden: bool) {
            self.1.borrow_mut().target.push(format!("hidden {hidden}"));
        }
        fn pop_in(&mut self, from_scale: f64, _transition: Transition) {
            self.1.borrow_mut().target.push(format!("pop {from_scale}"));
        }
    }

    fn items(count: usize) -> Vec<ReactionItem> {
        (0..count)
            .map(|i| ReactionItem::reaction(format!("r{i}"), format!("R{i}"), format!("a{i}")))
            .collect()
    }

    fn picker(count: usize) -> (ReactionPicker, Shared) {
        let record = Shared::default();
        let services = PickerServices {
            theme: Box::new(DefaultTheme::default()),
            images: Box::new(Images),
            icons: Box::new(Icons(Rc::clone(&record))),
            haptics: Box::new(Taps(Rc::clone(&record))),
        };
        (ReactionPicker::new(items(count), services), record)
    }

    const WIDTH: f64 = 360.0;
    const LEFT_START: Point = Point::new(60.0, 500.0);
    const RIGHT_START: Point = Point::new(300.0, 500.0);
    const FRAME: Duration = Duration::from_millis(10);

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-6 && (a.y - b.y).abs() < 1e-6
    }

    fn run(picker: &mut ReactionPicker, total: Duration) {
        let mut elapsed = Duration::ZERO;
        while elapsed < total {
            picker.tick(FRAME);
            elapsed += FRAME;
        }
    }

    #[test]
    fn first_pass_builds_views_and_art() {
        let (mut p, _) = picker(6);
        assert!(p.views().is_empty());
        p.update_layout(WIDTH, LEFT_START, LEFT_START.x, true);
        assert_eq!(p.views().len(), 6);
        assert_eq!(p.minimized_size(), Some(30.0));
        assert_eq!(p.shadow_blur(), Some(7.0));
        let background = p.background().expect("laid out");
        assert_eq!(background.fill_art.image, ImageHandle(42));
        assert_eq!(background.fill_art.cap_inset, 24.0);
        let main = p.tracking_bubble(TrackingBubble::Main).expect("laid out");
        assert_eq!(main.fill_art.image, ImageHandle(16));
        let secondary = p.tracking_bubble(TrackingBubble::Secondary).expect("laid out");
        assert_eq!(secondary.shadow_art.size, Size::square(22.0));
    }

    #[test]
    fn alignment_is_sticky() {
        let (mut p, _) = picker(4);
        p.update_layout(WIDTH, RIGHT_START, RIGHT_START.x, true);
        assert_eq!(p.is_right_aligned(), Some(true));
        p.update_layout(WIDTH, LEFT_START, RIGHT_START.x, false);
        assert_eq!(p.is_right_aligned(), Some(true));
    }

    #[test]
    fn initial_pass_maximizes_without_haptics() {
        let (mut p, record) = picker(6);
        p.update_layout(WIDTH, LEFT_START, LEFT_START.x, true);
        assert_eq!(record.borrow().taps, 0);
        let maximized = p.views().iter().filter(|v| v.is_maximized() == Some(true)).count();
        assert_eq!(maximized, 1);
        // Every view got its initial play state exactly once.
        assert_eq!(record.borrow().playing.len(), 6);
    }

    #[test]
    fn left_aligned_extremes() {
        let (mut p, _) = picker(6);
        p.update_layout(WIDTH, LEFT_START, LEFT_START.x, true);
        let frame = p.container_frame();
        p.update_layout(WIDTH, LEFT_START, frame.min_x() + 1.0, false);
        assert_eq!(p.highlighted_slot(), Some(0));
        assert_eq!(p.highlighted_index(), Some(5));
        p.update_layout(WIDTH, LEFT_START, frame.max_x() - 8.0, false);
        assert_eq!(p.highlighted_slot(), Some(5));
        assert_eq!(p.highlighted_index(), Some(0));
    }

    #[test]
    fn right_aligned_extremes() {
        let (mut p, _) = picker(6);
        p.update_layout(WIDTH, RIGHT_START, RIGHT_START.x, true);
        let frame = p.container_frame();
        p.update_layout(WIDTH, RIGHT_START, frame.min_x() + 1.0, false);
        assert_eq!(p.highlighted_index(), Some(0));
        p.update_layout(WIDTH, RIGHT_START, frame.max_x() - 8.0, false);
        assert_eq!(p.highlighted_index(), Some(5));
    }

    #[test]
    fn highlight_change_taps_once_and_toggles_playback() {
        let (mut p, record) = picker(6);
        p.update_layout(WIDTH, RIGHT_START, RIGHT_START.x, true);
        let frame = p.container_frame();
        p.update_layout(WIDTH, RIGHT_START, frame.min_x() + 1.0, false);
        record.borrow_mut().playing.clear();
        let before = record.borrow().taps;

        p.update_layout(WIDTH, RIGHT_START, frame.max_x() - 8.0, false);
        let r = record.borrow();
        assert_eq!(r.taps, before + 1);
        assert_eq!(
            r.playing,
            [("a0".to_owned(), false), ("a5".to_owned(), true)]
        );
    }

    #[test]
    fn same_slot_does_not_tap() {
        let (mut p, record) = picker(6);
        p.update_layout(WIDTH, RIGHT_START, RIGHT_START.x, true);
        let x = p.container_frame().min_x() + 1.0;
        p.update_layout(WIDTH, RIGHT_START, x, false);
        let taps = record.borrow().taps;
        p.update_layout(WIDTH, RIGHT_START, x + 1.0, false);
        assert_eq!(record.borrow().taps, taps);
    }

    #[test]
    fn selection_requires_touch_over_row() {
        let (mut p, _) = picker(3);
        p.update_layout(WIDTH, LEFT_START, LEFT_START.x, true);
        assert_eq!(p.selected_reaction().and_then(ReactionItem::value), Some("r2"));
        let frame = p.container_frame();
        p.update_layout(WIDTH, LEFT_START, frame.min_x() - 1.0, false);
        assert!(!p.has_selection());
        assert_eq!(p.selected_reaction(), None);
        // The anchor still clamps to an end slot.
        assert!(p.highlighted_index().is_some());
    }

    #[test]
    fn committed_state_is_ready_before_presentation() {
        let (mut p, _) = picker(6);
        p.update_layout(WIDTH, RIGHT_START, RIGHT_START.x, true);
        let frame = p.container_frame();
        p.update_layout(WIDTH, RIGHT_START, frame.min_x() + 1.0, false);
        let view = &p.views()[0];
        assert_eq!(view.layer().frame().width(), 78.0);
        assert!(view.layer().is_animating());
        assert!(p.is_animating());
        run(&mut p, Duration::from_millis(200));
        assert!(!p.is_animating());
    }

    #[test]
    fn empty_picker_degrades_quietly() {
        let (mut p, _) = picker(0);
        p.update_layout(WIDTH, LEFT_START, LEFT_START.x, true);
        assert!(p.views().is_empty());
        assert_eq!(p.highlighted_index(), None);
        assert!(!p.has_selection());
        assert_eq!(p.container_frame().width(), 2.0 * p.shadow_blur().unwrap_or_default());
    }

    #[test]
    fn with_config_validates() {
        let record = Shared::default();
        let services = PickerServices {
            theme: Box::new(DefaultTheme::default()),
            images: Box::new(Images),
            icons: Box::new(Icons(Rc::clone(&record))),
            haptics: Box::new(Taps(record)),
        };
        let bad = PickerConfig::new().minimized_size_range(30.0, 16.0);
        assert!(ReactionPicker::with_config(items(2), services, bad).is_err());
    }

    // -- choreography ------------------------------------------------------

    #[test]
    fn animate_in_starts_collapsed() {
        let (mut p, _) = picker(4);
        p.update_layout(WIDTH, LEFT_START, LEFT_START.x, true);
        p.animate_in();
        let background = p.background().expect("laid out");
        assert_eq!(background.fill().scale().presented(), 0.01);
        assert_eq!(background.fill().scale().committed(), 1.0);
        let view = &p.views()[0];
        assert_eq!(view.layer().scale().presented(), 0.01);
        assert!(p.tick(FRAME));
        run(&mut p, Duration::from_millis(800));
        assert!(!p.is_animating());
        assert_eq!(p.views()[0].layer().scale().presented(), 1.0);
    }

    #[test]
    fn secondary_bubble_waits_for_stagger() {
        let (mut p, _) = picker(4);
        p.update_layout(WIDTH, LEFT_START, LEFT_START.x, true);
        p.animate_in();
        run(&mut p, Duration::from_millis(40));
        let scale = |which| {
            p.tracking_bubble(which)
                .map(|b| b.fill().scale().presented())
                .unwrap_or_default()
        };
        assert!(scale(TrackingBubble::Main) > 0.01);
        assert_eq!(scale(TrackingBubble::Secondary), 0.01);
    }

    #[test]
    fn exit_without_target_completes_after_fade() {
        let (mut p, record) = picker(3);
        p.update_layout(WIDTH, LEFT_START, LEFT_START.x, true);
        let fired = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&fired);
        p.animate_out(None, false, move || *counter.borrow_mut() += 1);
        assert_eq!(record.borrow().prepares, 1);
        assert!(p.flight().is_none());
        run(&mut p, Duration::from_millis(190));
        assert_eq!(*fired.borrow(), 0);
        run(&mut p, Duration::from_millis(20));
        assert_eq!(*fired.borrow(), 1);
        assert!(p.is_finished());
        run(&mut p, Duration::from_millis(200));
        assert_eq!(*fired.borrow(), 1);
    }

    #[test]
    fn flight_lands_on_target() {
        let (mut p, record) = picker(3);
        p.update_layout(WIDTH, LEFT_START, LEFT_START.x, true);
        let source = p.views()[2].layer().frame();
        let target = Rect::new(200.0, 600.0, 40.0, 40.0);
        let fired = Rc::new(RefCell::new(false));
        let flag = Rc::clone(&fired);
        p.animate_out(
            Some(Box::new(Target(target, Rc::clone(&record)))),
            true,
            move || *flag.borrow_mut() = true,
        );

        let flight = p.flight().expect("flight launched");
        assert_eq!(flight.view_index(), 2);
        assert_eq!(flight.ghost_image(), Some(ImageHandle(7)));
        assert_eq!(flight.keyframes().len(), 10);
        assert!(close(flight.snapshot().position().presented(), source.center()));
        assert!(p.views()[2].layer().is_hidden());
        assert_eq!(record.borrow().target, ["hidden true"]);

        run(&mut p, Duration::from_millis(250));
        assert!(!*fired.borrow());
        run(&mut p, Duration::from_millis(60));
        assert!(*fired.borrow());
        let flight = p.flight().expect("flight kept");
        assert!(flight.has_landed());
        assert!(close(flight.snapshot().position().presented(), target.center()));
        assert_eq!(flight.ghost().scale().committed(), 0.5);
        let r = record.borrow();
        assert_eq!(r.taps, 1);
        assert_eq!(r.target, ["hidden true", "hidden false", "pop 0.5"]);
    }

    #[test]
    fn flight_peaks_above_source() {
        let (mut p, record) = picker(3);
        p.update_layout(WIDTH, LEFT_START, LEFT_START.x, true);
        let source = p.views()[2].layer().frame().center();
        let target = Rect::new(source.x + 100.0, source.y, 40.0, 40.0);
        p.animate_out(Some(Box::new(Target(target, record))), false, || {});
        let flight = p.flight().expect("flight launched");
        let highest = flight
            .keyframes()
            .iter()
            .map(|point| point.y)
            .fold(f64::INFINITY, f64::min);
        assert!(highest < source.y - 20.0);
    }

    #[test]
    fn layout_after_exit_is_ignored() {
        let (mut p, _) = picker(3);
        p.update_layout(WIDTH, LEFT_START, LEFT_START.x, true);
        let slot = p.highlighted_slot();
        p.animate_out(None, false, || {});
        p.update_layout(WIDTH, LEFT_START, p.container_frame().max_x(), false);
        assert_eq!(p.highlighted_slot(), slot);
    }
}
