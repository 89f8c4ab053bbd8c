#![forbid(unsafe_code)]

//! One reaction bubble.
//!
//! A [`ReactionItemView`] owns the icon and the floating label of a single
//! [`ReactionItem`]. It knows nothing about its neighbours: the picker tells
//! it how large to be, whether it is magnified, and which transition to use.
//!
//! Geometry of the sub-layers is in the view's local coordinate space, with
//! the origin at the top-left of the view's frame.
//!
//! # Invariants
//!
//! 1. `is_maximized()` is `None` until the first layout pass assigns it.
//! 2. The label is fully transparent whenever `display_text` was false on
//!    the last `update_layout`.
//! 3. The icon only plays while the view is maximized.

use std::fmt;

use rpick_core::color::Rgba;
use rpick_core::geometry::{Point, Rect, Size};
use rpick_core::transition::{Layer, Transition};

use crate::config::PickerConfig;
use crate::item::ReactionItem;
use crate::services::{AnimatedIcon, IconRequest, ImageHandle, PickerServices};
use crate::tuning::TuningTable;

/// Diameter of the stretchable label background art.
const LABEL_CAP_DIAMETER: f64 = 20.0;
/// Alpha applied to the theme's label background colour.
const LABEL_BACKGROUND_ALPHA: f32 = 0.8;
/// Label scale while hidden.
const LABEL_HIDDEN_SCALE: f64 = 0.1;

enum Icon {
    Animated {
        element: Box<dyn AnimatedIcon>,
        playing: bool,
    },
    Static(ImageHandle),
}

/// A single reaction bubble.
pub struct ReactionItemView {
    item: ReactionItem,
    is_maximized: Option<bool>,
    intrinsic_size: Size,
    intrinsic_offset: Point,
    label_lift: f64,

    layer: Layer,
    icon: Icon,
    icon_layer: Layer,
    label_text: String,
    label_text_color: Rgba,
    label_background_image: ImageHandle,
    label_background: Layer,
    label_text_layer: Layer,
}

impl fmt::Debug for ReactionItemView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReactionItemView")
            .field("item", &self.item)
            .field("is_maximized", &self.is_maximized)
            .field("intrinsic_size", &self.intrinsic_size)
            .field("is_playing", &self.is_playing())
            .finish_non_exhaustive()
    }
}

impl ReactionItemView {
    /// Build the view for `item`.
    ///
    /// `load_first_frame` asks the icon provider to decode and show the
    /// first animation frame before playback is ever started.
    pub fn new(
        item: ReactionItem,
        services: &PickerServices,
        tuning: &TuningTable,
        config: &PickerConfig,
        load_first_frame: bool,
    ) -> Self {
        let theme = services.theme.as_ref();

        let label_text = item.label().to_owned();
        let text_size = theme.measure_label(&label_text);
        let background_size = Size::new(text_size.width + config.label_padding, config.label_height);
        let text_frame = Rect::new(
            ((background_size.width - text_size.width) / 2.0).floor(),
            ((background_size.height - text_size.height) / 2.0).floor(),
            text_size.width,
            text_size.height,
        );
        let label_background_image = services.images.filled_circle(
            LABEL_CAP_DIAMETER,
            theme.label_background().with_alpha(LABEL_BACKGROUND_ALPHA),
        );

        let mut label_background = Layer::new().with_frame(Rect::from_origin_size(Point::ZERO, background_size));
        label_background.set_alpha(0.0, &Transition::Immediate);
        let mut label_text_layer = Layer::new().with_frame(text_frame);
        label_text_layer.set_alpha(0.0, &Transition::Immediate);

        let base = Size::square(config.maximized_slot_width());
        let (intrinsic_size, intrinsic_offset) = tuning.lookup(item.value()).resolve(base);

        let icon = match &item {
            ReactionItem::Reaction { animation, .. } => {
                let factor = render_factor(config.display_scale, config.maximized_size);
                let request = IconRequest {
                    source: animation,
                    width: (intrinsic_size.width * factor) as u32,
                    height: (intrinsic_size.height * factor) as u32,
                    load_first_frame,
                    play_to_completion_on_stop: true,
                };
                let mut element = services.icons.animated_icon(&request);
                element.set_size(intrinsic_size);
                Icon::Animated {
                    element,
                    playing: false,
                }
            }
            ReactionItem::Reply => Icon::Static(services.icons.reply_icon()),
        };

        Self {
            item,
            is_maximized: None,
            intrinsic_size,
            intrinsic_offset,
            label_lift: config.label_lift,
            layer: Layer::new(),
            icon,
            icon_layer: Layer::new().with_frame(Rect::from_origin_size(Point::ZERO, intrinsic_size)),
            label_text,
            label_text_color: theme.label_text(),
            label_background_image,
            label_background,
            label_text_layer,
        }
    }

    pub fn item(&self) -> &ReactionItem {
        &self.item
    }

    /// `None` before the first layout pass.
    #[inline]
    pub fn is_maximized(&self) -> Option<bool> {
        self.is_maximized
    }

    pub(crate) fn set_maximized(&mut self, maximized: bool) {
        self.is_maximized = Some(maximized);
    }

    /// Icon size before any layout scale is applied.
    pub fn intrinsic_size(&self) -> Size {
        self.intrinsic_size
    }

    /// Art-directed icon offset at scale 1.0.
    pub fn intrinsic_offset(&self) -> Point {
        self.intrinsic_offset
    }

    /// Position the icon and label for a bubble of `size`.
    ///
    /// `scale` is applied to the icon; the label keeps its own size and only
    /// scales between hidden and shown.
    pub fn update_layout(&mut self, size: Size, scale: f64, transition: &Transition, display_text: bool) {
        let icon_center = Point::new(
            size.width / 2.0 + self.intrinsic_offset.x * scale,
            size.height / 2.0 + self.intrinsic_offset.y * scale,
        );
        self.icon_layer.set_position(icon_center, transition);
        self.icon_layer.set_scale(scale, transition);

        let label_y = if display_text {
            -self.label_lift
        } else {
            size.height / 2.0
        };
        let (label_scale, label_alpha) = if display_text {
            (1.0, 1.0)
        } else {
            (LABEL_HIDDEN_SCALE, 0.0)
        };
        self.label_background
            .set_position(Point::new(size.width / 2.0, label_y), transition);
        self.label_background.set_scale(label_scale, transition);
        self.label_background.set_alpha(label_alpha, transition);
        self.label_text_layer.set_alpha(label_alpha, transition);
    }

    /// Start or stop the icon animation. Static icons ignore this.
    pub fn set_animating(&mut self, animating: bool) {
        if let Icon::Animated { element, playing } = &mut self.icon {
            element.set_playing(animating);
            *playing = animating;
        }
    }

    /// Whether the icon animation is currently playing.
    pub fn is_playing(&self) -> bool {
        matches!(self.icon, Icon::Animated { playing: true, .. })
    }

    /// Static image for the reply entry; `None` for animated reactions.
    pub fn static_icon(&self) -> Option<ImageHandle> {
        match self.icon {
            Icon::Static(image) => Some(image),
            Icon::Animated { .. } => None,
        }
    }

    pub fn label_text(&self) -> &str {
        &self.label_text
    }

    /// Theme colour the label text is drawn in.
    pub fn label_text_color(&self) -> Rgba {
        self.label_text_color
    }

    pub fn label_background_image(&self) -> ImageHandle {
        self.label_background_image
    }

    /// The view's own frame in picker coordinates.
    pub fn layer(&self) -> &Layer {
        &self.layer
    }

    pub fn layer_mut(&mut self) -> &mut Layer {
        &mut self.layer
    }

    pub fn icon_layer(&self) -> &Layer {
        &self.icon_layer
    }

    pub fn label_background(&self) -> &Layer {
        &self.label_background
    }

    pub fn label_text_layer(&self) -> &Layer {
        &self.label_text_layer
    }

    /// Whether any sub-layer is mid-transition.
    pub fn is_animating(&self) -> bool {
        self.layer.is_animating()
            || self.icon_layer.is_animating()
            || self.label_background.is_animating()
            || self.label_text_layer.is_animating()
    }

    /// Advance every sub-layer. Returns `true` while any is animating.
    pub fn tick(&mut self, dt: std::time::Duration) -> bool {
        let moving = [
            self.layer.tick(dt),
            self.icon_layer.tick(dt),
            self.label_background.tick(dt),
            self.label_text_layer.tick(dt),
        ];
        moving.contains(&true)
    }
}

/// Icon pixel density relative to the intrinsic size.
///
/// Small pickers on 3× screens decode at 2.5× so magnified icons stay sharp.
fn render_factor(display_scale: f64, maximized_size: f64) -> f64 {
    if display_scale == 3.0 && maximized_size < 40.0 {
        2.5
    } else {
        2.0
    }
}
