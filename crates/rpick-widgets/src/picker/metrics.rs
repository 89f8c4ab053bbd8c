#![forbid(unsafe_code)]

//! Pure layout math for the picker row.
//!
//! Nothing here touches views or services, so every function can be called
//! from tests and benchmarks with plain numbers.
//!
//! Coordinates: the container frame includes a `shadow_blur` margin on all
//! four sides; the visible capsule is the frame inset by that margin.

use rpick_core::geometry::{Point, Rect, Size};

use crate::config::PickerConfig;

/// Sizes derived once, on the first layout pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickerMetrics {
    pub count: usize,
    pub minimized_size: f64,
    pub maximized_size: f64,
    /// Extra width of the magnified slot.
    pub maximized_extra_width: f64,
    pub shadow_blur: f64,
    /// Height of the visible capsule.
    pub background_height: f64,
    pub spacing: f64,
    /// Gap above and below a minimized bubble inside the capsule.
    pub vertical_inset: f64,
    /// Capsule width without blur margins.
    pub content_width: f64,
    pub vertical_gap: f64,
}

/// Largest minimized size that fits `count` bubbles into `available_width`.
///
/// The row holds `count - 1` minimized bubbles, one maximized bubble, and
/// `count + 1` gaps of `spacing_ratio × minimized`. The result is floored
/// and clamped to the configured range.
pub fn minimized_size(count: usize, available_width: f64, config: &PickerConfig) -> f64 {
    let units = count as f64 - 1.0 + (count as f64 + 1.0) * config.spacing_ratio;
    // Only an empty row gets here; the raw quotient would be negative.
    if !(units > 0.0) {
        return config.minimized_size_min;
    }
    let raw = (available_width - config.maximized_size) / units;
    // f64::max ignores NaN, so a degenerate width lands on the lower bound.
    raw.floor()
        .max(config.minimized_size_min)
        .min(config.minimized_size_max)
}

impl PickerMetrics {
    pub fn measure(count: usize, available_width: f64, config: &PickerConfig) -> Self {
        let minimized_size = minimized_size(count, available_width, config);
        let background_height = (minimized_size * config.background_ratio).floor();
        let spacing = (minimized_size * config.spacing_ratio).floor();
        let content_width = if count == 0 {
            0.0
        } else {
            (count - 1) as f64 * minimized_size
                + config.maximized_size
                + (count + 1) as f64 * spacing
        };
        Self {
            count,
            minimized_size,
            maximized_size: config.maximized_size,
            maximized_extra_width: config.maximized_extra_width,
            shadow_blur: (minimized_size * config.shadow_blur_ratio).floor(),
            background_height,
            spacing,
            vertical_inset: ((background_height - minimized_size) / 2.0).floor(),
            content_width,
            vertical_gap: config.vertical_gap,
        }
    }

    /// Width the icon scale is measured against.
    pub fn maximized_slot_width(&self) -> f64 {
        self.maximized_size + self.maximized_extra_width
    }

    /// Container frame (blur margins included) for a press at `start`.
    ///
    /// The capsule's end cap sits over the press point: the right cap when
    /// right-aligned, the left cap otherwise.
    pub fn container_frame(&self, start: Point, right_aligned: bool) -> Rect {
        let blur = self.shadow_blur;
        let base = Rect::new(
            -blur,
            -blur,
            self.content_width + blur * 2.0,
            self.background_height + blur * 2.0,
        );
        let dx = if right_aligned {
            start.x - self.content_width + self.background_height / 2.0
        } else {
            start.x - self.background_height / 2.0
        };
        base.offset_by(dx, start.y - self.background_height - self.vertical_gap)
    }

    /// Whether a touch at `x` counts as over the row.
    ///
    /// The right edge excludes the blur margin, the left edge does not.
    pub fn has_selection(&self, frame: Rect, x: f64) -> bool {
        self.count > 0 && !(x > frame.max_x() - self.shadow_blur || x < frame.min_x())
    }

    /// Frames of the main and secondary tracking bubbles under the anchor.
    ///
    /// `circle` is the small bubble diameter; frames add blur margins.
    pub fn tracking_bubble_frames(&self, frame: Rect, anchor_x: f64, circle: f64, offset: f64) -> (Rect, Rect) {
        let blur = self.shadow_blur;
        let main_side = circle * 2.0 + blur * 2.0;
        let main = Rect::new(
            anchor_x - circle - blur,
            frame.max_y() - blur - circle - blur,
            main_side,
            main_side,
        );
        let secondary_side = circle + blur * 2.0;
        let secondary = Rect::new(
            main.mid_x() - offset - secondary_side / 2.0,
            main.mid_y() + offset - secondary_side / 2.0,
            secondary_side,
            secondary_side,
        );
        (main, secondary)
    }
}

// ---------------------------------------------------------------------------
// Anchor
// ---------------------------------------------------------------------------

/// The touch position clamped to the row's interior.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub min_x: f64,
    pub max_x: f64,
    pub x: f64,
}

impl Anchor {
    /// Clamp `touch_x` between the centres of the capsule's end caps.
    pub fn clamp(metrics: &PickerMetrics, frame: Rect, touch_x: f64) -> Self {
        let inset = metrics.shadow_blur + metrics.background_height / 2.0;
        let min_x = frame.min_x() + inset;
        let max_x = frame.max_x() - inset;
        // Not f64::clamp: a tiny row can produce max_x < min_x.
        let x = min_x.max(max_x.min(touch_x));
        Self { min_x, max_x, x }
    }

    /// Logical slot under the anchor: `floor(fraction × count)` clamped.
    pub fn slot(&self, count: usize) -> Option<usize> {
        if count == 0 {
            return None;
        }
        let span = self.max_x - self.min_x;
        if !(span > 0.0) {
            return Some(0);
        }
        let raw = ((self.x - self.min_x) / span * count as f64).floor().max(0.0);
        Some((raw as usize).min(count - 1))
    }
}

// ---------------------------------------------------------------------------
// Slot placement
// ---------------------------------------------------------------------------

/// Where one view goes on a layout pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotPlacement {
    /// Physical slot, counted from the left.
    pub slot: usize,
    /// Index into the item list.
    pub index: usize,
    pub maximized: bool,
    pub frame: Rect,
}

/// View index shown in physical slot `slot`.
///
/// Left-aligned rows list items right to left.
#[inline]
pub fn view_index(slot: usize, count: usize, right_aligned: bool) -> usize {
    if right_aligned { slot } else { count - 1 - slot }
}

/// Frames for every slot, left to right.
///
/// Bubbles sit on a common baseline; the maximized one widens by
/// `maximized_extra_width`, split evenly to either side of its slot.
pub fn place_slots(
    metrics: &PickerMetrics,
    frame: Rect,
    maximized_slot: Option<usize>,
    right_aligned: bool,
) -> Vec<SlotPlacement> {
    let mut x = frame.min_x() + metrics.shadow_blur + metrics.spacing;
    let baseline = frame.max_y() - metrics.shadow_blur - metrics.vertical_inset;
    (0..metrics.count)
        .map(|slot| {
            let maximized = maximized_slot == Some(slot);
            let side = if maximized {
                metrics.maximized_size
            } else {
                metrics.minimized_size
            };
            let mut rect = Rect::from_origin_size(Point::new(x, baseline - side), Size::square(side));
            if maximized {
                rect.origin.x -= metrics.maximized_extra_width / 2.0;
                rect.size.width += metrics.maximized_extra_width;
            }
            x += side + metrics.spacing;
            SlotPlacement {
                slot,
                index: view_index(slot, metrics.count, right_aligned),
                maximized,
                frame: rect,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(count: usize, width: f64) -> PickerMetrics {
        PickerMetrics::measure(count, width, &PickerConfig::default())
    }

    #[test]
    fn six_items_clamp_to_thirty() {
        let m = metrics(6, 360.0);
        assert_eq!(m.minimized_size, 30.0);
        assert_eq!(m.shadow_blur, 7.0);
        assert_eq!(m.background_height, 42.0);
        assert_eq!(m.spacing, 6.0);
        assert_eq!(m.vertical_inset, 6.0);
        assert_eq!(m.content_width, 5.0 * 30.0 + 60.0 + 7.0 * 6.0);
    }

    #[test]
    fn narrow_width_clamps_to_sixteen() {
        assert_eq!(metrics(10, 100.0).minimized_size, 16.0);
        assert_eq!(metrics(3, -50.0).minimized_size, 16.0);
        assert_eq!(metrics(3, f64::NAN).minimized_size, 16.0);
    }

    #[test]
    fn intermediate_size_is_floored() {
        // (300 - 60) / (7 + 9 × 0.2) = 27.27…
        assert_eq!(metrics(8, 300.0).minimized_size, 27.0);
    }

    #[test]
    fn empty_row_has_zero_width() {
        let m = metrics(0, 360.0);
        assert_eq!(m.content_width, 0.0);
        assert_eq!(m.minimized_size, 16.0);
        let frame = m.container_frame(Point::new(100.0, 300.0), false);
        assert!(!m.has_selection(frame, frame.mid_x()));
        assert_eq!(Anchor::clamp(&m, frame, 0.0).slot(0), None);
        assert!(place_slots(&m, frame, None, false).is_empty());
    }

    #[test]
    fn single_item_never_divides_by_zero() {
        let m = metrics(1, 360.0);
        assert!(m.minimized_size.is_finite());
        let frame = m.container_frame(Point::new(50.0, 300.0), false);
        for x in [-1000.0, frame.min_x(), frame.mid_x(), frame.max_x(), 1000.0] {
            assert_eq!(Anchor::clamp(&m, frame, x).slot(1), Some(0));
        }
    }

    #[test]
    fn container_frame_alignment() {
        let m = metrics(6, 360.0);
        let start = Point::new(300.0, 500.0);
        let right = m.container_frame(start, true);
        assert_eq!(right.min_x(), -7.0 + 300.0 - 252.0 + 21.0);
        assert_eq!(right.min_y(), -7.0 + 500.0 - 42.0 - 16.0);
        assert_eq!(right.width(), 252.0 + 14.0);
        assert_eq!(right.height(), 56.0);
        let left = m.container_frame(Point::new(60.0, 500.0), false);
        assert_eq!(left.min_x(), -7.0 + 60.0 - 21.0);
    }

    #[test]
    fn selection_bounds_are_asymmetric() {
        let m = metrics(6, 360.0);
        let frame = m.container_frame(Point::new(60.0, 500.0), false);
        assert!(m.has_selection(frame, frame.min_x()));
        assert!(!m.has_selection(frame, frame.min_x() - 0.5));
        assert!(m.has_selection(frame, frame.max_x() - m.shadow_blur));
        assert!(!m.has_selection(frame, frame.max_x() - m.shadow_blur + 0.5));
    }

    #[test]
    fn anchor_extremes_pick_end_slots() {
        let m = metrics(6, 360.0);
        let frame = m.container_frame(Point::new(60.0, 500.0), false);
        assert_eq!(Anchor::clamp(&m, frame, frame.min_x()).slot(6), Some(0));
        assert_eq!(Anchor::clamp(&m, frame, frame.max_x()).slot(6), Some(5));
    }

    #[test]
    fn slots_accumulate_with_widened_maximized_slot() {
        let m = metrics(3, 360.0);
        let frame = m.container_frame(Point::new(60.0, 500.0), true);
        let slots = place_slots(&m, frame, Some(1), true);
        let first = slots[0].frame;
        assert_eq!(first.min_x(), frame.min_x() + m.shadow_blur + m.spacing);
        assert_eq!(first.width(), 30.0);
        let magnified = slots[1].frame;
        assert_eq!(magnified.min_x(), first.max_x() + m.spacing - 9.0);
        assert_eq!(magnified.width(), 78.0);
        assert_eq!(magnified.height(), 60.0);
        // Shared baseline.
        assert_eq!(first.max_y(), magnified.max_y());
        assert_eq!(slots[2].frame.min_x(), first.max_x() + m.spacing + 60.0 + m.spacing);
    }

    #[test]
    fn left_aligned_rows_reverse_item_order() {
        let m = metrics(4, 360.0);
        let frame = m.container_frame(Point::new(60.0, 500.0), false);
        let indices: Vec<_> = place_slots(&m, frame, Some(0), false).iter().map(|p| p.index).collect();
        assert_eq!(indices, [3, 2, 1, 0]);
        assert_eq!(view_index(0, 4, true), 0);
    }

    #[test]
    fn tracking_bubbles_hang_below_anchor() {
        let m = metrics(6, 360.0);
        let frame = m.container_frame(Point::new(60.0, 500.0), false);
        let (main, secondary) = m.tracking_bubble_frames(frame, 100.0, 8.0, 10.0);
        assert_eq!(main, Rect::new(100.0 - 8.0 - 7.0, frame.max_y() - 22.0, 30.0, 30.0));
        assert_eq!(secondary.size, Size::square(22.0));
        assert_eq!(secondary.center(), Point::new(main.mid_x() - 10.0, main.mid_y() + 10.0));
    }
}
