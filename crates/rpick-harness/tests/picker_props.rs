//! Property tests for the picker's layout state machine.

use proptest::prelude::*;
use rpick_core::geometry::Point;
use rpick_harness::fakes::items;
use rpick_harness::{Recorder, layout_digest};
use rpick_widgets::ReactionPicker;

const WIDTH: f64 = 390.0;

fn picker(count: usize, start: Point) -> ReactionPicker {
    let mut picker = ReactionPicker::new(items(count), Recorder::new().services());
    picker.update_layout(WIDTH, start, start.x, true);
    picker
}

fn start() -> impl Strategy<Value = Point> {
    (0.0f64..WIDTH, 200.0f64..800.0).prop_map(|(x, y)| Point::new(x, y))
}

proptest! {
    #[test]
    fn minimized_size_in_range(count in 1usize..30, width in 0.0f64..1500.0) {
        let mut p = ReactionPicker::new(items(count), Recorder::new().services());
        p.update_layout(width, Point::new(width / 2.0, 500.0), 0.0, true);
        let size = p.minimized_size().unwrap_or_default();
        prop_assert!((16.0..=30.0).contains(&size));
    }

    #[test]
    fn outside_bounds_selects_nothing(
        count in 1usize..10,
        start in start(),
        beyond in 1.0f64..300.0,
        left in any::<bool>(),
    ) {
        let mut p = picker(count, start);
        let frame = p.container_frame();
        let x = if left { frame.min_x() - beyond } else { frame.max_x() + beyond };
        p.update_layout(WIDTH, start, x, false);
        prop_assert!(!p.has_selection());
        prop_assert!(p.selected_reaction().is_none());
    }

    #[test]
    fn inside_bounds_maximizes_exactly_one(
        count in 1usize..10,
        start in start(),
        fraction in 0.01f64..0.99,
    ) {
        let mut p = picker(count, start);
        let frame = p.container_frame();
        let blur = p.shadow_blur().unwrap_or_default();
        let x = frame.min_x() + (frame.width() - blur) * fraction;
        p.update_layout(WIDTH, start, x, false);
        let maximized = p.views().iter().filter(|v| v.is_maximized() == Some(true)).count();
        prop_assert_eq!(maximized, 1);
        prop_assert!(p.has_selection());
        prop_assert!(p.selected_reaction().is_some());
    }

    #[test]
    fn repeated_layout_is_idempotent(
        count in 1usize..10,
        start in start(),
        x in -100.0f64..500.0,
    ) {
        let recorder = Recorder::new();
        let mut p = ReactionPicker::new(items(count), recorder.services());
        p.update_layout(WIDTH, start, start.x, true);
        p.update_layout(WIDTH, start, x, false);
        let digest = layout_digest(&p);
        let slot = p.highlighted_slot();
        let taps = recorder.taps();
        p.update_layout(WIDTH, start, x, false);
        prop_assert_eq!(layout_digest(&p), digest);
        prop_assert_eq!(p.highlighted_slot(), slot);
        prop_assert_eq!(recorder.taps(), taps);
    }

    #[test]
    fn highlighted_slot_is_non_decreasing(
        count in 1usize..10,
        start in start(),
        mut xs in prop::collection::vec(-100.0f64..500.0, 2..20),
    ) {
        xs.sort_by(f64::total_cmp);
        let mut p = picker(count, start);
        let mut previous = None;
        for x in xs {
            p.update_layout(WIDTH, start, x, false);
            let slot = p.highlighted_slot();
            prop_assert!(slot >= previous);
            previous = slot;
        }
    }
}
