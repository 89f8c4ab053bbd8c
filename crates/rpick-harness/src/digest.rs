#![forbid(unsafe_code)]

//! Stable checksums of committed picker state.
//!
//! Two pickers fed the same inputs must produce the same digest; replay
//! tests compare digests instead of asserting every frame by hand.

use rpick_core::geometry::Rect;
use rpick_widgets::ReactionPicker;

const CHECKSUM_PREFIX: &str = "blake3:";

fn hash_rect(hasher: &mut blake3::Hasher, rect: Rect) {
    for v in [rect.min_x(), rect.min_y(), rect.width(), rect.height()] {
        hasher.update(&v.to_le_bytes());
    }
}

/// Digest of the container frame, selection, and every view's committed
/// frame and highlight state.
pub fn layout_digest(picker: &ReactionPicker) -> String {
    let mut hasher = blake3::Hasher::new();
    hash_rect(&mut hasher, picker.container_frame());
    hasher.update(&[u8::from(picker.has_selection())]);
    let highlighted = picker.highlighted_index().map_or(u64::MAX, |i| i as u64);
    hasher.update(&highlighted.to_le_bytes());
    for view in picker.views() {
        hash_rect(&mut hasher, view.layer().frame());
        let state = match view.is_maximized() {
            None => 0u8,
            Some(false) => 1,
            Some(true) => 2,
        };
        hasher.update(&[state]);
    }
    format!("{CHECKSUM_PREFIX}{}", &hasher.finalize().to_hex()[..16])
}
