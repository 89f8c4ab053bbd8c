#![forbid(unsafe_code)]

//! Recording host collaborators.
//!
//! Every fake shares one [`Recorder`]; tests inspect the event log after
//! driving the picker. Image handles are derived from request contents, so
//! the same art request always yields the same handle.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use rpick_core::color::Rgba;
use rpick_core::geometry::{Rect, Size};
use rpick_core::transition::Transition;
use rpick_widgets::services::{
    AnimatedIcon, BubbleArtRequest, BubbleImageGenerator, BubbleStyle, DefaultTheme, FlightTarget,
    Haptics, IconProvider, IconRequest, ImageHandle,
};
use rpick_widgets::{PickerServices, ReactionItem};

/// One recorded collaborator call.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    BubbleArt { style: BubbleStyle, diameter: f64, blur: f64 },
    IconCreated { source: String, width: u32, height: u32, first_frame: bool },
    Playing { source: String, playing: bool },
    HapticPrepare,
    HapticTap,
    TargetHidden(bool),
    TargetPop { from_scale: f64 },
}

/// Shared event log.
#[derive(Debug, Clone, Default)]
pub struct Recorder(Rc<RefCell<Vec<Event>>>);

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, event: Event) {
        self.0.borrow_mut().push(event);
    }

    pub fn events(&self) -> Ref<'_, Vec<Event>> {
        self.0.borrow()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    pub fn taps(&self) -> usize {
        self.count(|e| matches!(e, Event::HapticTap))
    }

    pub fn prepares(&self) -> usize {
        self.count(|e| matches!(e, Event::HapticPrepare))
    }

    /// Playback changes in call order.
    pub fn playback(&self) -> Vec<(String, bool)> {
        self.events()
            .iter()
            .filter_map(|e| match e {
                Event::Playing { source, playing } => Some((source.clone(), *playing)),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, predicate: impl Fn(&Event) -> bool) -> usize {
        self.events().iter().filter(|e| predicate(e)).count()
    }

    /// Collaborators wired to this recorder, with the default theme.
    pub fn services(&self) -> PickerServices {
        PickerServices {
            theme: Box::new(DefaultTheme::default()),
            images: Box::new(RecordingImages(self.clone())),
            icons: Box::new(RecordingIcons(self.clone())),
            haptics: Box::new(RecordingHaptics(self.clone())),
        }
    }

    /// A flight target at `frame` wired to this recorder.
    pub fn target(&self, frame: Rect) -> RecordingTarget {
        RecordingTarget {
            frame,
            recorder: self.clone(),
        }
    }
}

/// Handle derived from the bytes of an art request.
fn content_handle(parts: &[f64]) -> ImageHandle {
    let mut hasher = blake3::Hasher::new();
    for part in parts {
        hasher.update(&part.to_le_bytes());
    }
    let digest = hasher.finalize();
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest.as_bytes()[..8]);
    ImageHandle(u64::from_le_bytes(prefix))
}

struct RecordingImages(Recorder);

impl BubbleImageGenerator for RecordingImages {
    fn bubble(&self, request: &BubbleArtRequest) -> ImageHandle {
        self.0.push(Event::BubbleArt {
            style: request.style,
            diameter: request.diameter,
            blur: request.blur,
        });
        let style = match request.style {
            BubbleStyle::Fill => 0.0,
            BubbleStyle::Shadow => 1.0,
        };
        content_handle(&[style, request.diameter, request.blur])
    }

    fn filled_circle(&self, diameter: f64, color: Rgba) -> ImageHandle {
        content_handle(&[
            2.0,
            diameter,
            f64::from(color.r),
            f64::from(color.g),
            f64::from(color.b),
            f64::from(color.a),
        ])
    }
}

struct RecordingIcon {
    source: String,
    recorder: Recorder,
}

impl AnimatedIcon for RecordingIcon {
    fn set_size(&mut self, _size: Size) {}

    fn set_playing(&mut self, playing: bool) {
        self.recorder.push(Event::Playing {
            source: self.source.clone(),
            playing,
        });
    }
}

struct RecordingIcons(Recorder);

impl IconProvider for RecordingIcons {
    fn animated_icon(&self, request: &IconRequest<'_>) -> Box<dyn AnimatedIcon> {
        let source = request.source.as_str().to_owned();
        self.0.push(Event::IconCreated {
            source: source.clone(),
            width: request.width,
            height: request.height,
            first_frame: request.load_first_frame,
        });
        Box::new(RecordingIcon {
            source,
            recorder: self.0.clone(),
        })
    }

    fn reply_icon(&self) -> ImageHandle {
        ImageHandle(0)
    }
}

struct RecordingHaptics(Recorder);

impl Haptics for RecordingHaptics {
    fn prepare(&mut self) {
        self.0.push(Event::HapticPrepare);
    }

    fn tap(&mut self) {
        self.0.push(Event::HapticTap);
    }
}

/// Flight target that records visibility changes and arrival pops.
#[derive(Debug, Clone)]
pub struct RecordingTarget {
    frame: Rect,
    recorder: Recorder,
}

impl RecordingTarget {
    pub fn boxed(self) -> Box<dyn FlightTarget> {
        Box::new(self)
    }
}

impl FlightTarget for RecordingTarget {
    fn frame(&self) -> Rect {
        self.frame
    }

    fn image(&self) -> Option<ImageHandle> {
        Some(content_handle(&[
            3.0,
            self.frame.width(),
            self.frame.height(),
        ]))
    }

    fn set_hidden(&mut self, hidden: bool) {
        self.recorder.push(Event::TargetHidden(hidden));
    }

    fn pop_in(&mut self, from_scale: f64, _transition: Transition) {
        self.recorder.push(Event::TargetPop { from_scale });
    }
}

/// `count` synthetic reactions `r0..` with animations `a0..`.
pub fn items(count: usize) -> Vec<ReactionItem> {
    (0..count)
        .map(|i| ReactionItem::reaction(format!("r{i}"), format!("Reaction {i}"), format!("a{i}")))
        .collect()
}

/// The stock reaction set, reply last.
pub fn stock_items() -> Vec<ReactionItem> {
    vec![
        ReactionItem::reaction("👍", "Like", "like.tgs"),
        ReactionItem::reaction("😂", "Haha", "haha.tgs"),
        ReactionItem::reaction("😳", "Wow", "wow.tgs"),
        ReactionItem::reaction("😒", "Meh", "meh.tgs"),
        ReactionItem::reaction("❤️", "Love", "love.tgs"),
        ReactionItem::Reply,
    ]
}
