//! Property tests for the pure layout math.

use proptest::prelude::*;
use rpick_core::geometry::Point;
use rpick_widgets::PickerConfig;
use rpick_widgets::picker::metrics::{Anchor, PickerMetrics, minimized_size, place_slots};

fn start() -> impl Strategy<Value = Point> {
    (0.0f64..400.0, 100.0f64..900.0).prop_map(|(x, y)| Point::new(x, y))
}

proptest! {
    #[test]
    fn minimized_size_stays_in_range(count in 1usize..40, width in -100.0f64..2000.0) {
        let size = minimized_size(count, width, &PickerConfig::default());
        prop_assert!((16.0..=30.0).contains(&size));
        prop_assert_eq!(size, size.floor());
    }

    #[test]
    fn outside_row_is_never_selected(
        count in 1usize..12,
        start in start(),
        right in any::<bool>(),
        beyond in 0.5f64..500.0,
    ) {
        let m = PickerMetrics::measure(count, 390.0, &PickerConfig::default());
        let frame = m.container_frame(start, right);
        prop_assert!(!m.has_selection(frame, frame.min_x() - beyond));
        prop_assert!(!m.has_selection(frame, frame.max_x() + beyond));
    }

    #[test]
    fn slot_mapping_is_monotonic(
        count in 1usize..12,
        start in start(),
        right in any::<bool>(),
        a in -200.0f64..600.0,
        b in -200.0f64..600.0,
    ) {
        let m = PickerMetrics::measure(count, 390.0, &PickerConfig::default());
        let frame = m.container_frame(start, right);
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let lo_slot = Anchor::clamp(&m, frame, lo).slot(count);
        let hi_slot = Anchor::clamp(&m, frame, hi).slot(count);
        prop_assert!(lo_slot <= hi_slot);
        prop_assert!(hi_slot.is_some_and(|s| s < count));
    }

    #[test]
    fn placement_covers_every_item_once(
        count in 1usize..12,
        start in start(),
        right in any::<bool>(),
        touch in -200.0f64..600.0,
    ) {
        let m = PickerMetrics::measure(count, 390.0, &PickerConfig::default());
        let frame = m.container_frame(start, right);
        let slot = Anchor::clamp(&m, frame, touch).slot(count);
        let placements = place_slots(&m, frame, slot, right);
        let mut seen: Vec<usize> = placements.iter().map(|p| p.index).collect();
        seen.sort_unstable();
        prop_assert_eq!(seen, (0..count).collect::<Vec<_>>());
        prop_assert_eq!(placements.iter().filter(|p| p.maximized).count(), 1);
        for pair in placements.windows(2) {
            prop_assert!(pair[0].frame.min_x() < pair[1].frame.min_x());
        }
    }
}
